//! Output file handling: format selection, pixel sizing and directory setup.

use std::fs;
use std::io;
use std::path::Path;

/// Matplotlib-style point size.
pub const POINTS_PER_INCH: f64 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// `.svg` (any case) selects vector output; everything else is PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Self::Svg,
            _ => Self::Png,
        }
    }
}

/// Pixel dimensions of a figure of `inches` at `dpi`.
pub fn pixel_size(inches: (f64, f64), dpi: u32) -> (u32, u32) {
    let dpi = dpi as f64;
    (
        (inches.0 * dpi).round().max(1.0) as u32,
        (inches.1 * dpi).round().max(1.0) as u32,
    )
}

/// Pixels per typographic point at `dpi`.
pub fn point_scale(dpi: u32) -> f64 {
    dpi as f64 / POINTS_PER_INCH
}

/// Create the directory that will hold `path`, if it has one.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}
