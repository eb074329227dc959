use std::path::PathBuf;

use clap::Parser;

use crate::config::{FigureKind, LawKind, PlotConfig};

/// Render the phase portrait of a self-excited oscillator.
///
/// Flags override values from `--config`, which override built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "limit-cycle-plot", version, about)]
pub struct Args {
    /// Acceleration law
    #[arg(long, value_enum)]
    pub law: Option<LawKind>,

    /// Van der Pol nonlinearity
    #[arg(long)]
    pub mu: Option<f64>,

    /// Damped-pendulum damping coefficient
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Damped-pendulum natural frequency
    #[arg(long)]
    pub omega0: Option<f64>,

    /// Integration step
    #[arg(long)]
    pub dt: Option<f64>,

    /// Number of integration steps
    #[arg(long, allow_negative_numbers = true)]
    pub steps: Option<i64>,

    /// Initial position
    #[arg(long, allow_negative_numbers = true)]
    pub x0: Option<f64>,

    /// Initial velocity
    #[arg(long, allow_negative_numbers = true)]
    pub v0: Option<f64>,

    /// Index where the limit cycle starts
    #[arg(long, allow_negative_numbers = true)]
    pub transient: Option<i64>,

    /// Output image path (.svg for vector output, PNG otherwise)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Raster resolution in dots per inch
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Figure to draw
    #[arg(long, value_enum)]
    pub figure: Option<FigureKind>,

    /// TOML file with any of the settings above
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not log integration progress
    #[arg(long)]
    pub no_progress: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Overlay explicitly given flags onto `config`.
    pub fn apply(&self, config: &mut PlotConfig) {
        if let Some(law) = self.law {
            config.law = law;
        }
        if let Some(mu) = self.mu {
            config.mu = mu;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(omega0) = self.omega0 {
            config.omega0 = omega0;
        }
        if let Some(dt) = self.dt {
            config.dt = dt;
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(x0) = self.x0 {
            config.x0 = x0;
        }
        if let Some(v0) = self.v0 {
            config.v0 = v0;
        }
        if let Some(transient) = self.transient {
            config.transient = transient;
        }
        if let Some(out) = &self.out {
            config.out = out.clone();
        }
        if let Some(dpi) = self.dpi {
            config.dpi = dpi;
        }
        if let Some(figure) = self.figure {
            config.figure = figure;
        }
        if self.no_progress {
            config.progress = false;
        }
    }
}
