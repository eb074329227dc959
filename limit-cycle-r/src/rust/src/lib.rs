use extendr_api::prelude::*;
use limit_cycle as lc;
use limit_cycle::AccelerationLaw;

// ============================================================================
// Helper conversions
// ============================================================================

fn make_law(law_name: &str, params: &List) -> std::result::Result<lc::Law, Error> {
    let get_f64 = |key: &str, default: f64| -> f64 {
        params
            .dollar(key)
            .ok()
            .and_then(|v: Robj| v.as_real())
            .unwrap_or(default)
    };

    match law_name {
        "van_der_pol" => Ok(lc::VanDerPol {
            mu: get_f64("mu", lc::VanDerPol::default().mu),
        }
        .into()),
        "damped_pendulum" => {
            let defaults = lc::DampedPendulum::default();
            Ok(lc::DampedPendulum {
                epsilon: get_f64("epsilon", defaults.epsilon),
                omega0: get_f64("omega0", defaults.omega0),
            }
            .into())
        }
        _ => Err(Error::Other(format!(
            "Unknown law: '{}'. Use 'van_der_pol' or 'damped_pendulum'.",
            law_name
        ))),
    }
}

fn lc_err(e: lc::OscillatorError) -> Error {
    Error::Other(e.to_string())
}

fn state_vec(state: lc::OscillatorState) -> Vec<f64> {
    vec![state.position, state.velocity]
}

// ============================================================================
// Laws and integration
// ============================================================================

/// Evaluate an acceleration law at one state.
/// @param law Character law name ("van_der_pol" or "damped_pendulum").
/// @param position Numeric position.
/// @param velocity Numeric velocity.
/// @param params Named list of law coefficients.
/// @return Numeric acceleration.
/// @export
#[extendr]
fn rust_acceleration(law: &str, position: f64, velocity: f64, params: List) -> Result<f64> {
    let law = make_law(law, &params)?;
    Ok(law.acceleration(&lc::OscillatorState::new(position, velocity)))
}

/// Integrate an oscillator with the semi-implicit Euler scheme.
/// @param law Character law name.
/// @param x0 Numeric initial position.
/// @param v0 Numeric initial velocity.
/// @param dt Numeric step size.
/// @param steps Integer number of steps (must be non-negative).
/// @param params Named list of law coefficients.
/// @return List with positions and velocities.
/// @export
#[extendr]
fn rust_integrate(law: &str, x0: f64, v0: f64, dt: f64, steps: i32, params: List) -> Result<List> {
    let law = make_law(law, &params)?;
    let steps = lc::utils::checked_steps(steps as i64).map_err(lc_err)?;
    let (positions, velocities) =
        lc::integrate(&law, lc::OscillatorState::new(x0, v0), dt, steps).into_parts();
    Ok(list!(positions = positions, velocities = velocities))
}

/// Clamp a transient split index to a trajectory length.
/// @param length Integer trajectory length.
/// @param transient_end Integer requested split index (0-based).
/// @return Integer clamped split index (0-based).
/// @export
#[extendr]
fn rust_split_index(length: i32, transient_end: i32) -> i32 {
    lc::clamp_split(transient_end as i64, length.max(0) as usize) as i32
}

/// Run a simulation and segment it.
/// @param law Character law name.
/// @param x0 Numeric initial position.
/// @param v0 Numeric initial velocity.
/// @param dt Numeric step size.
/// @param steps Integer number of steps.
/// @param transient_end Integer requested split index (0-based).
/// @param params Named list of law coefficients.
/// @return List with positions, velocities, transient_end and landmarks.
/// @export
#[extendr]
fn rust_simulate(
    law: &str,
    x0: f64,
    v0: f64,
    dt: f64,
    steps: i32,
    transient_end: i32,
    params: List,
) -> Result<List> {
    let config = lc::SimulationConfig {
        law: make_law(law, &params)?,
        dt,
        steps: steps as i64,
        x0,
        v0,
        transient_end: transient_end as i64,
    };
    let sim = lc::simulate(&config, &mut lc::NoProgress).map_err(lc_err)?;

    let landmarks: Robj = match sim.landmarks() {
        Some(marks) => list!(
            cycle_early = state_vec(marks.cycle_early),
            cycle_mid = state_vec(marks.cycle_mid),
            arrow_of_time = state_vec(marks.arrow_of_time)
        )
        .into(),
        None => ().into(),
    };
    let split = sim.transient_end as i32;
    let (positions, velocities) = sim.trajectory.into_parts();

    Ok(list!(
        positions = positions,
        velocities = velocities,
        transient_end = split,
        landmarks = landmarks
    ))
}

/// Integrate many initial conditions in parallel.
/// @param law Character law name.
/// @param initial_conditions Numeric matrix (n_runs x 2) of (x0, v0) rows.
/// @param dt Numeric step size.
/// @param steps Integer number of steps.
/// @param params Named list of law coefficients.
/// @return List with positions and velocities matrices (n_runs x steps).
/// @export
#[extendr]
fn rust_integrate_batch(
    law: &str,
    initial_conditions: RMatrix<f64>,
    dt: f64,
    steps: i32,
    params: List,
) -> Result<List> {
    let law = make_law(law, &params)?;
    let steps = lc::utils::checked_steps(steps as i64).map_err(lc_err)?;

    let n = initial_conditions.nrows();
    if initial_conditions.ncols() != 2 {
        return Err(Error::Other(format!(
            "initial_conditions must have 2 columns, got {}",
            initial_conditions.ncols()
        )));
    }
    // R matrices are column-major
    let data = initial_conditions
        .as_real_slice()
        .ok_or_else(|| Error::Other("initial_conditions must be numeric".into()))?;
    let initials: Vec<lc::OscillatorState> = (0..n)
        .map(|i| lc::OscillatorState::new(data[i], data[n + i]))
        .collect();

    let runs = lc::integrate_batch(&law, &initials, dt, steps);

    Ok(list!(
        positions = RMatrix::new_matrix(n, steps, |i, j| runs[i].positions()[j]),
        velocities = RMatrix::new_matrix(n, steps, |i, j| runs[i].velocities()[j])
    ))
}

extendr_module! {
    mod limitcycle;
    fn rust_acceleration;
    fn rust_integrate;
    fn rust_split_index;
    fn rust_simulate;
    fn rust_integrate_batch;
}
