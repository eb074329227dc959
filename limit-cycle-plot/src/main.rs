//! Command-line renderer for limit-cycle phase portraits.
//!
//! ```text
//! limit-cycle-plot                                  # reference portrait
//! limit-cycle-plot --law damped-pendulum --out figs/pendulum.svg
//! limit-cycle-plot --figure series --config run.toml --verbose
//! ```

mod annotate;
mod cli;
mod config;
mod output;
mod render;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use limit_cycle::{simulate, AccelerationLaw, NoProgress, Progress, ProgressObserver};

use crate::cli::Args;
use crate::config::PlotConfig;

/// Logs integration checkpoints at info level.
struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_progress(&mut self, progress: Progress) {
        info!(
            completed = progress.completed,
            total = progress.total,
            "integrating: {}%",
            progress.percent()
        );
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt().with_env_filter(filter).with_target(false).init();

    let mut config = match &args.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            PlotConfig::load(path)?
        }
        None => PlotConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    let sim_config = config.simulation();
    info!(
        law = config.law().name(),
        dt = config.dt,
        steps = config.steps,
        "simulating"
    );
    let sim = if config.progress {
        simulate(&sim_config, &mut LogProgress)
    } else {
        simulate(&sim_config, &mut NoProgress)
    }
    .context("simulation failed")?;

    if !sim.trajectory.is_finite() {
        warn!("trajectory contains non-finite values; try a smaller dt");
    }

    output::ensure_parent_dir(&config.out)
        .with_context(|| format!("failed to create directory for {}", config.out.display()))?;
    render::render(&sim, config.figure, &config.out, config.dpi)?;

    info!("saved figure to {}", config.out.display());
    Ok(())
}
