//! Figure drawing with plotters.
//!
//! Sizes are given in typographic points and scaled by the output dpi, so a
//! figure keeps its proportions at any resolution.

use std::error::Error;
use std::path::Path;

use anyhow::anyhow;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use limit_cycle::{PhaseView, Simulation};

use crate::annotate::{annotations, arrow_paths};
use crate::config::FigureKind;
use crate::output::{pixel_size, point_scale, OutputFormat};

const PORTRAIT_INCHES: (f64, f64) = (7.5, 7.5);
const SERIES_INCHES: (f64, f64) = (8.0, 4.0);

/// Half-width of the square portrait view.
const VIEW: f64 = 3.5;

const PORTRAIT_TITLE: &str = "Phase Portrait of Emergent Time via Limit Cycle";
const SERIES_TITLE: &str = "Emergence of a Time-Crystalline Phase";

const TRANSIENT_COLOR: RGBColor = RGBColor(31, 119, 180);
const CYCLE_COLOR: RGBColor = RGBColor(214, 39, 40);
const TRANSIENT_WIDTH_PT: f64 = 1.2;
const CYCLE_WIDTH_PT: f64 = 4.0;

/// Arrow head length in data units.
const ARROW_HEAD: f64 = 0.18;

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Draw `figure` for `sim` into `out`. The backend follows the extension.
pub fn render(sim: &Simulation, figure: FigureKind, out: &Path, dpi: u32) -> anyhow::Result<()> {
    let inches = match figure {
        FigureKind::Portrait => PORTRAIT_INCHES,
        FigureKind::Series => SERIES_INCHES,
    };
    let size = pixel_size(inches, dpi);
    let scale = point_scale(dpi);

    let result = match OutputFormat::from_path(out) {
        OutputFormat::Png => draw(
            &BitMapBackend::new(out, size).into_drawing_area(),
            sim,
            figure,
            scale,
        ),
        OutputFormat::Svg => draw(
            &SVGBackend::new(out, size).into_drawing_area(),
            sim,
            figure,
            scale,
        ),
    };
    result.map_err(|e| anyhow!("failed to draw {}: {e}", out.display()))
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    sim: &Simulation,
    figure: FigureKind,
    scale: f64,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    match figure {
        FigureKind::Portrait => draw_portrait(root, sim, scale)?,
        FigureKind::Series => draw_time_series(root, sim, scale)?,
    }
    root.present()?;
    Ok(())
}

/// Points to pixels, at least one pixel wide.
fn px(points: f64, scale: f64) -> u32 {
    (points * scale).round().max(1.0) as u32
}

fn finite_points(view: PhaseView<'_>) -> impl Iterator<Item = (f64, f64)> + '_ {
    view.points()
        .filter(|(x, v)| x.is_finite() && v.is_finite())
}

fn draw_portrait<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    sim: &Simulation,
    scale: f64,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(root)
        .caption(PORTRAIT_TITLE, ("sans-serif", 15.0 * scale))
        .margin(px(12.0, scale))
        .x_label_area_size(px(36.0, scale))
        .y_label_area_size(px(44.0, scale))
        .build_cartesian_2d(-VIEW..VIEW, -VIEW..VIEW)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Δφ")
        .y_desc("dΔφ/dτ")
        .label_style(("sans-serif", 10.0 * scale))
        .axis_desc_style(("sans-serif", 13.0 * scale))
        .draw()?;

    let axis_style = BLACK.mix(0.5).stroke_width(px(0.8, scale));
    chart.draw_series([
        PathElement::new(vec![(-VIEW, 0.0), (VIEW, 0.0)], axis_style),
        PathElement::new(vec![(0.0, -VIEW), (0.0, VIEW)], axis_style),
    ])?;

    let seg = sim.segments();
    chart.draw_series(LineSeries::new(
        finite_points(seg.transient),
        TRANSIENT_COLOR.stroke_width(px(TRANSIENT_WIDTH_PT, scale)),
    ))?;
    chart.draw_series(LineSeries::new(
        finite_points(seg.cycle),
        CYCLE_COLOR.stroke_width(px(CYCLE_WIDTH_PT, scale)),
    ))?;

    chart.draw_series(std::iter::once(Circle::new(
        (0.0, 0.0),
        px(4.0, scale) as i32,
        BLACK.filled(),
    )))?;

    draw_annotations(&mut chart, sim, scale)?;
    Ok(())
}

fn draw_annotations<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    sim: &Simulation,
    scale: f64,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let marks = sim.landmarks();
    let font = ("sans-serif", 10.0 * scale).into_font();
    let line_height = px(12.0, scale) as i32;
    let arrow_style = BLACK.stroke_width(px(1.0, scale));

    for note in annotations(marks.as_ref()) {
        for path in arrow_paths(note.text_at, note.target, ARROW_HEAD) {
            chart.draw_series(std::iter::once(PathElement::new(path, arrow_style)))?;
        }
        for (row, line) in note.lines.iter().enumerate() {
            chart.draw_series(std::iter::once(
                EmptyElement::at(note.text_at)
                    + Text::new(line.to_string(), (0, row as i32 * line_height), font.clone()),
            ))?;
        }
    }
    Ok(())
}

fn draw_time_series<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    sim: &Simulation,
    scale: f64,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (transient, cycle) = series_halves(sim);
    let all = || transient.iter().chain(&cycle);
    let (t_min, t_max) = padded_range(all().map(|p| p.0), 0.0);
    let (x_min, x_max) = padded_range(all().map(|p| p.1), 0.1);

    let mut chart = ChartBuilder::on(root)
        .caption(SERIES_TITLE, ("sans-serif", 15.0 * scale))
        .margin(px(12.0, scale))
        .x_label_area_size(px(36.0, scale))
        .y_label_area_size(px(44.0, scale))
        .build_cartesian_2d(t_min..t_max, x_min..x_max)?;

    chart
        .configure_mesh()
        .x_desc("relational parameter τ")
        .y_desc("Δφ(τ)")
        .light_line_style(BLACK.mix(0.05))
        .label_style(("sans-serif", 10.0 * scale))
        .axis_desc_style(("sans-serif", 13.0 * scale))
        .draw()?;

    // transient and cycle in the portrait's colors
    let width = px(TRANSIENT_WIDTH_PT, scale);
    chart.draw_series(LineSeries::new(
        transient,
        TRANSIENT_COLOR.stroke_width(width),
    ))?;
    chart.draw_series(LineSeries::new(cycle, CYCLE_COLOR.stroke_width(width)))?;
    Ok(())
}

/// Finite (τ, Δφ) points split by step index at the transient end. The
/// boundary point belongs to both halves so the line stays connected.
fn series_halves(sim: &Simulation) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let traj = &sim.trajectory;
    let mut transient = Vec::with_capacity(sim.transient_end + 1);
    let mut cycle = Vec::with_capacity(traj.len().saturating_sub(sim.transient_end));

    for (i, &x) in traj.positions().iter().enumerate() {
        let tau = traj.tau(i);
        if !tau.is_finite() || !x.is_finite() {
            continue;
        }
        if i <= sim.transient_end {
            transient.push((tau, x));
        }
        if i >= sim.transient_end {
            cycle.push((tau, x));
        }
    }

    (transient, cycle)
}

/// Min..max of the finite `values`, widened by `pad` of the span on each
/// side. Falls back to a unit range when there is nothing to span.
fn padded_range(values: impl Iterator<Item = f64>, pad: f64) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    if hi - lo < 1e-12 {
        return (lo - 1.0, hi + 1.0);
    }
    let margin = pad * (hi - lo);
    (lo - margin, hi + margin)
}
