//! # limit-cycle
//!
//! Fixed-step integration of self-excited second-order oscillators and
//! segmentation of the resulting trajectory into a transient and a limit
//! cycle, ready to be drawn as a phase portrait.
//!
//! - **Acceleration laws** ([`AccelerationLaw`], [`Law`]): Van der Pol and a
//!   sine-restoring damped pendulum, plus [`ClosureLaw`] for custom laws
//! - **Integrator** ([`integrate()`], [`simulate`]): semi-implicit Euler with
//!   preallocated output and an optional [`ProgressObserver`]
//! - **Segmenter** ([`segment()`]): clamped split into transient and cycle views
//! - **Landmarks** ([`landmarks()`]): representative points for annotations
//! - **Batch runs** ([`integrate_batch`]): many initial conditions in parallel
//!
//! ## Quick Start
//!
//! ```rust
//! use limit_cycle::{integrate, segment, OscillatorState, VanDerPol};
//!
//! let law = VanDerPol { mu: 1.2 };
//! let traj = integrate(&law, OscillatorState::new(0.1, 0.0), 0.01, 20_000);
//! assert_eq!(traj.len(), 20_000);
//!
//! let seg = segment(&traj, 12_000);
//! assert_eq!(seg.transient.len(), 12_000);
//! assert_eq!(seg.cycle.len(), 8_000);
//! assert!((seg.cycle.amplitude() - 2.0).abs() < 0.3);
//! ```
//!
//! Runs are deterministic: the same inputs always give the same trajectory,
//! bit for bit. Numerical blow-up is not detected; choose `dt` small enough
//! for the law's stiffness.

pub mod types;

pub mod batch;
pub mod integrate;
pub mod landmarks;
pub mod law;
pub mod progress;
pub mod segment;
pub mod utils;

pub use batch::{initial_grid, integrate_batch};
pub use integrate::{integrate, integrate_observed, simulate};
pub use landmarks::{landmarks, Landmarks};
pub use law::{AccelerationLaw, ClosureLaw, DampedPendulum, Law, VanDerPol};
pub use progress::{checkpoint_interval, NoProgress, Progress, ProgressObserver};
pub use segment::{clamp_split, segment, Segmentation};
pub use types::{
    OscillatorError, OscillatorState, PhaseView, Simulation, SimulationConfig, Trajectory,
};
