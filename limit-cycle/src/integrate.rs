use tracing::debug;

use crate::law::AccelerationLaw;
use crate::progress::{checkpoint_interval, is_checkpoint, NoProgress, Progress, ProgressObserver};
use crate::segment::clamp_split;
use crate::types::{OscillatorError, OscillatorState, Simulation, SimulationConfig, Trajectory};
use crate::utils::checked_steps;

/// Integrate an oscillator with the semi-implicit (symplectic) Euler scheme.
///
/// Each step computes `a = law(state)`, then `v += a·dt`, then
/// `x += v·dt` with the updated velocity, and records `(x, v)`. The returned
/// trajectory has exactly `steps` entries and does not contain `initial`.
///
/// `dt` is not validated. Non-finite values are not detected: once the
/// state blows up, the remaining entries are non-finite as well.
///
/// # Arguments
/// * `law` - Acceleration law.
/// * `initial` - State at τ = 0.
/// * `dt` - Fixed step size.
/// * `steps` - Number of steps to take.
pub fn integrate<L>(law: &L, initial: OscillatorState, dt: f64, steps: usize) -> Trajectory
where
    L: AccelerationLaw + ?Sized,
{
    integrate_observed(law, initial, dt, steps, &mut NoProgress)
}

/// Same as [`integrate`], notifying `observer` at roughly twenty evenly
/// spaced checkpoints and after the final step.
pub fn integrate_observed<L>(
    law: &L,
    initial: OscillatorState,
    dt: f64,
    steps: usize,
    observer: &mut dyn ProgressObserver,
) -> Trajectory
where
    L: AccelerationLaw + ?Sized,
{
    let mut trajectory = Trajectory::with_capacity(steps, dt);
    let interval = checkpoint_interval(steps);
    let mut state = initial;

    for i in 0..steps {
        let a = law.acceleration(&state);
        state.velocity += a * dt;
        state.position += state.velocity * dt;
        trajectory.record(&state);

        if is_checkpoint(i, interval, steps) {
            observer.on_progress(Progress::new(i + 1, steps));
        }
    }

    trajectory
}

/// Run a configured simulation: validate the step count, integrate, and
/// clamp the requested split index to the produced trajectory.
pub fn simulate(
    config: &SimulationConfig,
    observer: &mut dyn ProgressObserver,
) -> Result<Simulation, OscillatorError> {
    let steps = checked_steps(config.steps)?;
    let law = config.law;

    debug!(
        law = law.name(),
        steps,
        dt = config.dt,
        x0 = config.x0,
        v0 = config.v0,
        "starting integration"
    );

    let trajectory = integrate_observed(&law, config.initial_state(), config.dt, steps, observer);
    let transient_end = clamp_split(config.transient_end, trajectory.len());

    debug!(
        requested = config.transient_end,
        transient_end,
        finite = trajectory.is_finite(),
        "integration finished"
    );

    Ok(Simulation {
        law,
        trajectory,
        transient_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::law::{ClosureLaw, DampedPendulum, Law, VanDerPol};

    #[test]
    fn test_zero_steps_is_empty() {
        let traj = integrate(&VanDerPol::default(), OscillatorState::new(0.1, 0.0), 0.01, 0);
        assert!(traj.is_empty());
        assert!(traj.positions().is_empty());
        assert!(traj.velocities().is_empty());
    }

    #[test]
    fn test_single_step_update_order() {
        let law = VanDerPol { mu: 1.2 };
        let (x0, v0, dt) = (0.1, 0.3, 0.01);
        let traj = integrate(&law, OscillatorState::new(x0, v0), dt, 1);

        let a = law.acceleration(&OscillatorState::new(x0, v0));
        let v1 = v0 + a * dt;
        assert_eq!(traj.velocities()[0], v1);
        assert_eq!(traj.positions()[0], x0 + v1 * dt);
    }

    #[test]
    fn test_not_forward_euler() {
        // Forward Euler would advance x with the old velocity.
        let law = ClosureLaw::new(|_: &OscillatorState| 1.0, "constant");
        let traj = integrate(&law, OscillatorState::new(0.0, 0.0), 0.5, 1);
        assert_eq!(traj.velocities()[0], 0.5);
        assert_eq!(traj.positions()[0], 0.25);
    }

    #[test]
    fn test_initial_state_not_recorded() {
        let law = ClosureLaw::new(|_: &OscillatorState| 0.0, "free");
        let traj = integrate(&law, OscillatorState::new(1.0, 2.0), 0.5, 3);
        assert_eq!(traj.positions(), &[2.0, 3.0, 4.0]);
        assert_eq!(traj.velocities(), &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_dyn_law() {
        let law: Box<dyn AccelerationLaw> = Box::new(DampedPendulum::default());
        let a = integrate(law.as_ref(), OscillatorState::new(0.1, 0.0), 0.01, 50);
        let b = integrate(&DampedPendulum::default(), OscillatorState::new(0.1, 0.0), 0.01, 50);
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_finite_propagates() {
        let law = VanDerPol { mu: 1.0 };
        let traj = integrate(&law, OscillatorState::new(f64::NAN, 0.0), 0.01, 10);
        assert_eq!(traj.len(), 10);
        assert!(traj.positions().iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_observer_cadence() {
        let mut seen: Vec<Progress> = Vec::new();
        let traj = integrate_observed(
            &VanDerPol::default(),
            OscillatorState::new(0.1, 0.0),
            0.01,
            100,
            &mut |p: Progress| seen.push(p),
        );
        assert_eq!(traj.len(), 100);
        // Steps 0, 5, ..., 95 plus the final step.
        assert_eq!(seen.len(), 21);
        assert_eq!(seen[0], Progress::new(1, 100));
        assert_eq!(seen[1], Progress::new(6, 100));
        assert_eq!(seen.last().unwrap().percent(), 100);
        assert!(seen.last().unwrap().is_done());
    }

    #[test]
    fn test_observer_silent_for_zero_steps() {
        let mut calls = 0;
        integrate_observed(
            &VanDerPol::default(),
            OscillatorState::default(),
            0.01,
            0,
            &mut |_: Progress| calls += 1,
        );
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_observer_does_not_change_result() {
        let law = Law::from(VanDerPol { mu: 2.0 });
        let start = OscillatorState::new(0.5, -0.5);
        let plain = integrate(&law, start, 0.005, 2_000);
        let observed = integrate_observed(&law, start, 0.005, 2_000, &mut |_: Progress| {});
        assert_eq!(plain, observed);
    }

    #[test]
    fn test_simulate_rejects_negative_steps() {
        let config = SimulationConfig {
            steps: -1,
            ..Default::default()
        };
        let err = simulate(&config, &mut NoProgress).unwrap_err();
        assert!(matches!(err, OscillatorError::InvalidStepCount(-1)));
    }

    #[test]
    fn test_simulate_clamps_split() {
        let config = SimulationConfig {
            steps: 50,
            transient_end: 500,
            ..Default::default()
        };
        let sim = simulate(&config, &mut NoProgress).unwrap();
        assert_eq!(sim.trajectory.len(), 50);
        assert_eq!(sim.transient_end, 49);
        assert_eq!(sim.segments().cycle.len(), 1);
    }

    #[test]
    fn test_simulate_matches_integrate() {
        let config = SimulationConfig {
            law: DampedPendulum::default().into(),
            steps: 1_000,
            ..Default::default()
        };
        let sim = simulate(&config, &mut NoProgress).unwrap();
        let direct = integrate(&DampedPendulum::default(), config.initial_state(), config.dt, 1_000);
        assert_eq!(sim.trajectory, direct);
        assert_eq!(sim.law.name(), "damped_pendulum");
    }
}
