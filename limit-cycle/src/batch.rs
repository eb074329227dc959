use rayon::prelude::*;

use crate::integrate::integrate;
use crate::law::AccelerationLaw;
use crate::types::{OscillatorError, OscillatorState, Trajectory};
use crate::utils::linspace;

/// Generate a grid of initial states over a rectangle of phase space.
///
/// Returns `resolution²` states ordered position-major: all velocities for
/// the first position, then the next position, and so on.
pub fn initial_grid(
    x_range: (f64, f64),
    v_range: (f64, f64),
    resolution: usize,
) -> Result<Vec<OscillatorState>, OscillatorError> {
    if resolution < 2 {
        return Err(OscillatorError::InvalidInput(
            "resolution must be at least 2".into(),
        ));
    }
    let xs = linspace(x_range, resolution);
    let vs = linspace(v_range, resolution);
    Ok(xs
        .iter()
        .flat_map(|&x| vs.iter().map(move |&v| OscillatorState::new(x, v)))
        .collect())
}

/// Integrate one trajectory per initial state.
///
/// Runs are independent and spread across threads with rayon; each run is
/// itself sequential, so every trajectory is identical to the one
/// [`integrate`] returns for the same initial state. Output order matches
/// `initials`.
pub fn integrate_batch<L>(
    law: &L,
    initials: &[OscillatorState],
    dt: f64,
    steps: usize,
) -> Vec<Trajectory>
where
    L: AccelerationLaw + ?Sized,
{
    initials
        .par_iter()
        .map(|&initial| integrate(law, initial, dt, steps))
        .collect()
}
