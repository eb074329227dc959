//! Renderer configuration.
//!
//! Layering: CLI flags > TOML config file > built-in defaults. The defaults
//! reproduce the reference phase portrait.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

use limit_cycle::{DampedPendulum, Law, SimulationConfig, VanDerPol};

/// Highest accepted resolution. Keeps the largest figure's raster buffer
/// addressable.
pub const MAX_DPI: u32 = 1200;

/// Errors raised while loading or validating the renderer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Which acceleration law to integrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LawKind {
    /// x'' = μ(1 - x²)x' - x
    #[default]
    VanDerPol,
    /// x'' = -ε(x² - 1)x' - ω₀² sin(x)
    DampedPendulum,
}

/// Which figure to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    /// Velocity against position, transient thin and limit cycle thick.
    #[default]
    Portrait,
    /// Position against the evolution parameter τ.
    Series,
}

/// Effective renderer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    pub law: LawKind,
    /// Van der Pol nonlinearity μ.
    pub mu: f64,
    /// Damped-pendulum damping coefficient ε.
    pub epsilon: f64,
    /// Damped-pendulum natural frequency ω₀.
    pub omega0: f64,
    /// Integration step in the relational parameter τ.
    pub dt: f64,
    pub steps: i64,
    /// Initial Δφ.
    pub x0: f64,
    /// Initial dΔφ/dτ.
    pub v0: f64,
    /// Index where the transient ends and the limit cycle is highlighted.
    pub transient: i64,
    pub out: PathBuf,
    pub dpi: u32,
    pub figure: FigureKind,
    /// Log integration progress checkpoints.
    pub progress: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let vdp = VanDerPol::default();
        let pendulum = DampedPendulum::default();
        let sim = SimulationConfig::default();
        Self {
            law: LawKind::VanDerPol,
            mu: vdp.mu,
            epsilon: pendulum.epsilon,
            omega0: pendulum.omega0,
            dt: sim.dt,
            steps: sim.steps,
            x0: sim.x0,
            v0: sim.v0,
            transient: sim.transient_end,
            out: PathBuf::from("figs/figs_phase_portrait_emergent_time.png"),
            dpi: 300,
            figure: FigureKind::Portrait,
            progress: true,
        }
    }
}

impl PlotConfig {
    /// Load a TOML config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reject settings the renderer cannot use.
    ///
    /// Step counts are checked by the integrator itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dpi == 0 {
            return Err(ConfigError::Invalid("dpi must be positive".into()));
        }
        if self.dpi > MAX_DPI {
            return Err(ConfigError::Invalid(format!(
                "dpi must be at most {MAX_DPI}, got {}",
                self.dpi
            )));
        }
        if self.out.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output path is empty".into()));
        }
        Ok(())
    }

    /// Selected law with its coefficients.
    pub fn law(&self) -> Law {
        match self.law {
            LawKind::VanDerPol => VanDerPol { mu: self.mu }.into(),
            LawKind::DampedPendulum => DampedPendulum {
                epsilon: self.epsilon,
                omega0: self.omega0,
            }
            .into(),
        }
    }

    pub fn simulation(&self) -> SimulationConfig {
        SimulationConfig {
            law: self.law(),
            dt: self.dt,
            steps: self.steps,
            x0: self.x0,
            v0: self.v0,
            transient_end: self.transient,
        }
    }
}
