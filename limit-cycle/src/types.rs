use faer::Mat;

use crate::landmarks::{landmarks, Landmarks};
use crate::law::{Law, VanDerPol};
use crate::segment::{segment_at, Segmentation};

/// Error types for oscillator runs.
#[derive(Debug, thiserror::Error)]
pub enum OscillatorError {
    #[error("invalid step count: {0} (must be non-negative)")]
    InvalidStepCount(i64),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Instantaneous (position, velocity) pair of the oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OscillatorState {
    /// Generalized coordinate (e.g. the phase offset Δφ).
    pub position: f64,
    /// Rate of change of `position` with respect to the evolution parameter.
    pub velocity: f64,
}

impl OscillatorState {
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    /// Harmonic energy ½v² + ½x².
    pub fn harmonic_energy(&self) -> f64 {
        0.5 * self.velocity * self.velocity + 0.5 * self.position * self.position
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Recorded output of one integration run.
///
/// Index `i` holds the state after the `(i + 1)`-th update; the initial
/// condition is never part of the trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    positions: Vec<f64>,
    velocities: Vec<f64>,
    dt: f64,
}

impl Trajectory {
    /// Build a trajectory from index-aligned position and velocity sequences.
    pub fn from_parts(
        positions: Vec<f64>,
        velocities: Vec<f64>,
        dt: f64,
    ) -> Result<Self, OscillatorError> {
        if positions.len() != velocities.len() {
            return Err(OscillatorError::InvalidInput(format!(
                "positions has {} entries but velocities has {}",
                positions.len(),
                velocities.len()
            )));
        }
        Ok(Self {
            positions,
            velocities,
            dt,
        })
    }

    pub(crate) fn with_capacity(steps: usize, dt: f64) -> Self {
        Self {
            positions: Vec::with_capacity(steps),
            velocities: Vec::with_capacity(steps),
            dt,
        }
    }

    pub(crate) fn record(&mut self, state: &OscillatorState) {
        self.positions.push(state.position);
        self.velocities.push(state.velocity);
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Step size the trajectory was integrated with.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    pub fn velocities(&self) -> &[f64] {
        &self.velocities
    }

    /// Evolution parameter τ = (i + 1)·dt reached at index `i`.
    pub fn tau(&self, i: usize) -> f64 {
        (i + 1) as f64 * self.dt
    }

    /// State recorded at index `i`.
    pub fn state(&self, i: usize) -> Option<OscillatorState> {
        self.view().state(i)
    }

    /// Final recorded state.
    pub fn last(&self) -> Option<OscillatorState> {
        self.view().last()
    }

    /// Whether every recorded value is finite.
    pub fn is_finite(&self) -> bool {
        self.view().is_finite()
    }

    /// Borrowed view over the whole trajectory.
    pub fn view(&self) -> PhaseView<'_> {
        PhaseView {
            offset: 0,
            positions: &self.positions,
            velocities: &self.velocities,
        }
    }

    /// Trajectory as a matrix (2 × len): row 0 holds positions, row 1 velocities.
    pub fn to_mat(&self) -> Mat<f64> {
        let n = self.len();
        let mut mat = Mat::<f64>::zeros(2, n);
        for j in 0..n {
            mat[(0, j)] = self.positions[j];
            mat[(1, j)] = self.velocities[j];
        }
        mat
    }

    /// Consume the trajectory, returning `(positions, velocities)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.positions, self.velocities)
    }
}

/// Borrowed, read-only window onto a contiguous range of a [`Trajectory`].
#[derive(Debug, Clone, Copy)]
pub struct PhaseView<'a> {
    offset: usize,
    positions: &'a [f64],
    velocities: &'a [f64],
}

impl<'a> PhaseView<'a> {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Index of the first point of this view within the parent trajectory.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn positions(&self) -> &'a [f64] {
        self.positions
    }

    pub fn velocities(&self) -> &'a [f64] {
        self.velocities
    }

    pub fn state(&self, i: usize) -> Option<OscillatorState> {
        match (self.positions.get(i), self.velocities.get(i)) {
            (Some(&x), Some(&v)) => Some(OscillatorState::new(x, v)),
            _ => None,
        }
    }

    pub fn last(&self) -> Option<OscillatorState> {
        self.len().checked_sub(1).and_then(|i| self.state(i))
    }

    /// Iterate `(position, velocity)` pairs in chronological order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + 'a {
        let (positions, velocities) = (self.positions, self.velocities);
        positions.iter().copied().zip(velocities.iter().copied())
    }

    pub fn is_finite(&self) -> bool {
        self.points().all(|(x, v)| x.is_finite() && v.is_finite())
    }

    /// Largest |position| in the view, 0 when empty. NaN entries are skipped.
    pub fn amplitude(&self) -> f64 {
        self.positions.iter().map(|x| x.abs()).fold(0.0, f64::max)
    }

    /// Split into `[0, mid)` and `[mid, len)`.
    ///
    /// Panics if `mid > len`.
    pub fn split_at(&self, mid: usize) -> (PhaseView<'a>, PhaseView<'a>) {
        let (x_head, x_tail) = self.positions.split_at(mid);
        let (v_head, v_tail) = self.velocities.split_at(mid);
        (
            PhaseView {
                offset: self.offset,
                positions: x_head,
                velocities: v_head,
            },
            PhaseView {
                offset: self.offset + mid,
                positions: x_tail,
                velocities: v_tail,
            },
        )
    }
}

/// Configuration for one simulation run, as supplied by an external caller.
///
/// `steps` and `transient_end` are signed: a negative step count is rejected
/// when the run starts, a split index outside the trajectory is clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Acceleration law and its coefficients.
    pub law: Law,
    /// Fixed step size in the evolution parameter τ.
    pub dt: f64,
    /// Number of integration steps.
    pub steps: i64,
    /// Initial position.
    pub x0: f64,
    /// Initial velocity.
    pub v0: f64,
    /// Requested index where the transient ends and the limit cycle begins.
    pub transient_end: i64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            law: Law::VanDerPol(VanDerPol::default()),
            dt: 0.01,
            steps: 20_000,
            x0: 0.1,
            v0: 0.0,
            transient_end: 12_000,
        }
    }
}

impl SimulationConfig {
    pub fn initial_state(&self) -> OscillatorState {
        OscillatorState::new(self.x0, self.v0)
    }
}

/// Result of a configured simulation run.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Law the trajectory was integrated with.
    pub law: Law,
    /// Recorded trajectory.
    pub trajectory: Trajectory,
    /// Split index after clamping to `[0, len - 1]`.
    pub transient_end: usize,
}

impl Simulation {
    /// Transient and limit-cycle views at the clamped split index.
    pub fn segments(&self) -> Segmentation<'_> {
        segment_at(&self.trajectory, self.transient_end)
    }

    /// Annotation landmarks, `None` for an empty trajectory.
    pub fn landmarks(&self) -> Option<Landmarks> {
        landmarks(&self.segments())
    }
}
