use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use ::limit_cycle as lc;

// ============================================================================
// Helper conversions
// ============================================================================

fn lc_err_to_py(e: lc::OscillatorError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn get_f64(params: Option<&Bound<'_, PyDict>>, key: &str, default: f64) -> PyResult<f64> {
    match params {
        Some(d) => match d.get_item(key)? {
            Some(v) => v.extract::<f64>(),
            None => Ok(default),
        },
        None => Ok(default),
    }
}

fn make_law(law_name: &str, params: Option<&Bound<'_, PyDict>>) -> PyResult<lc::Law> {
    match law_name {
        "van_der_pol" => {
            let mu = get_f64(params, "mu", lc::VanDerPol::default().mu)?;
            Ok(lc::VanDerPol { mu }.into())
        }
        "damped_pendulum" => {
            let defaults = lc::DampedPendulum::default();
            let epsilon = get_f64(params, "epsilon", defaults.epsilon)?;
            let omega0 = get_f64(params, "omega0", defaults.omega0)?;
            Ok(lc::DampedPendulum { epsilon, omega0 }.into())
        }
        other => Err(PyValueError::new_err(format!(
            "unknown law: '{other}'. Use 'van_der_pol' or 'damped_pendulum'"
        ))),
    }
}

fn state_tuple(state: lc::OscillatorState) -> (f64, f64) {
    (state.position, state.velocity)
}

// ============================================================================
// Laws
// ============================================================================

/// Evaluate an acceleration law at a single state.
///
/// Parameters
/// ----------
/// law : str
///     "van_der_pol" or "damped_pendulum".
/// position : float
/// velocity : float
/// params : dict, optional
///     Law coefficients, e.g. {"mu": 1.2} or {"epsilon": 0.3, "omega0": 1.0}.
#[pyfunction]
#[pyo3(signature = (law, position, velocity, params=None))]
fn acceleration(
    law: &str,
    position: f64,
    velocity: f64,
    params: Option<&Bound<'_, PyDict>>,
) -> PyResult<f64> {
    use lc::AccelerationLaw;
    let law = make_law(law, params)?;
    Ok(law.acceleration(&lc::OscillatorState::new(position, velocity)))
}

// ============================================================================
// Integration
// ============================================================================

/// Integrate an oscillator with the semi-implicit Euler scheme.
///
/// Parameters
/// ----------
/// law : str
///     "van_der_pol" or "damped_pendulum".
/// x0, v0 : float
///     Initial position and velocity (not included in the output).
/// dt : float
///     Fixed step size.
/// steps : int
///     Number of steps; negative values raise ValueError.
/// params : dict, optional
///     Law coefficients.
///
/// Returns
/// -------
/// tuple of numpy.ndarray
///     (positions, velocities), each of length `steps`.
#[pyfunction]
#[pyo3(signature = (law, x0, v0, dt, steps, params=None))]
fn integrate<'py>(
    py: Python<'py>,
    law: &str,
    x0: f64,
    v0: f64,
    dt: f64,
    steps: i64,
    params: Option<&Bound<'py, PyDict>>,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
    let law = make_law(law, params)?;
    let steps = lc::utils::checked_steps(steps).map_err(lc_err_to_py)?;
    let traj = py.allow_threads(|| lc::integrate(&law, lc::OscillatorState::new(x0, v0), dt, steps));
    let (xs, vs) = traj.into_parts();
    Ok((
        Array1::from(xs).into_pyarray(py),
        Array1::from(vs).into_pyarray(py),
    ))
}

/// Clamp a requested transient split index to a trajectory of `length` points.
#[pyfunction]
fn split_index(length: usize, transient_end: i64) -> usize {
    lc::clamp_split(transient_end, length)
}

/// Run a full simulation and segmentation.
///
/// Returns
/// -------
/// dict
///     positions, velocities (numpy arrays), transient_end (clamped int),
///     and landmarks (dict of (x, v) tuples, or None for an empty run).
#[pyfunction]
#[pyo3(signature = (law="van_der_pol", x0=0.1, v0=0.0, dt=0.01, steps=20000, transient_end=12000, params=None))]
#[allow(clippy::too_many_arguments)]
fn simulate<'py>(
    py: Python<'py>,
    law: &str,
    x0: f64,
    v0: f64,
    dt: f64,
    steps: i64,
    transient_end: i64,
    params: Option<&Bound<'py, PyDict>>,
) -> PyResult<Bound<'py, PyDict>> {
    let config = lc::SimulationConfig {
        law: make_law(law, params)?,
        dt,
        steps,
        x0,
        v0,
        transient_end,
    };
    let sim = py
        .allow_threads(|| lc::simulate(&config, &mut lc::NoProgress))
        .map_err(lc_err_to_py)?;

    let dict = PyDict::new(py);
    match sim.landmarks() {
        Some(marks) => {
            let lm = PyDict::new(py);
            lm.set_item("cycle_early", state_tuple(marks.cycle_early))?;
            lm.set_item("cycle_mid", state_tuple(marks.cycle_mid))?;
            lm.set_item("arrow_of_time", state_tuple(marks.arrow_of_time))?;
            dict.set_item("landmarks", lm)?;
        }
        None => dict.set_item("landmarks", py.None())?,
    }
    dict.set_item("transient_end", sim.transient_end)?;
    let (xs, vs) = sim.trajectory.into_parts();
    dict.set_item("positions", Array1::from(xs).into_pyarray(py))?;
    dict.set_item("velocities", Array1::from(vs).into_pyarray(py))?;
    Ok(dict)
}

/// Integrate many initial conditions in parallel.
///
/// Parameters
/// ----------
/// law : str
/// initial_conditions : numpy.ndarray
///     Shape (n_runs, 2): one (x0, v0) row per run.
/// dt : float
/// steps : int
/// params : dict, optional
///
/// Returns
/// -------
/// tuple of numpy.ndarray
///     (positions, velocities), each of shape (n_runs, steps).
#[pyfunction]
#[pyo3(signature = (law, initial_conditions, dt, steps, params=None))]
fn integrate_batch<'py>(
    py: Python<'py>,
    law: &str,
    initial_conditions: PyReadonlyArray2<f64>,
    dt: f64,
    steps: i64,
    params: Option<&Bound<'py, PyDict>>,
) -> PyResult<(Bound<'py, PyArray2<f64>>, Bound<'py, PyArray2<f64>>)> {
    let law = make_law(law, params)?;
    let steps = lc::utils::checked_steps(steps).map_err(lc_err_to_py)?;

    let ic = initial_conditions.as_array();
    if ic.ncols() != 2 {
        return Err(PyValueError::new_err(format!(
            "initial_conditions must have shape (n, 2), got (n, {})",
            ic.ncols()
        )));
    }
    let initials: Vec<lc::OscillatorState> = ic
        .rows()
        .into_iter()
        .map(|row| lc::OscillatorState::new(row[0], row[1]))
        .collect();

    let runs = py.allow_threads(|| lc::integrate_batch(&law, &initials, dt, steps));

    let n = runs.len();
    let xs = Array2::from_shape_fn((n, steps), |(i, j)| runs[i].positions()[j]);
    let vs = Array2::from_shape_fn((n, steps), |(i, j)| runs[i].velocities()[j]);
    Ok((xs.into_pyarray(py), vs.into_pyarray(py)))
}

#[pymodule]
fn limit_cycle(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(acceleration, m)?)?;
    m.add_function(wrap_pyfunction!(integrate, m)?)?;
    m.add_function(wrap_pyfunction!(split_index, m)?)?;
    m.add_function(wrap_pyfunction!(simulate, m)?)?;
    m.add_function(wrap_pyfunction!(integrate_batch, m)?)?;
    Ok(())
}
