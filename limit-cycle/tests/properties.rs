//! End-to-end behavior of the integrator and segmenter.

use approx::assert_abs_diff_eq;
use limit_cycle::*;

fn reference_run() -> Trajectory {
    integrate(
        &VanDerPol { mu: 1.2 },
        OscillatorState::new(0.1, 0.0),
        0.01,
        20_000,
    )
}

// ============================================================================
// Determinism and shape
// ============================================================================

#[test]
fn runs_are_bitwise_reproducible() {
    let a = reference_run();
    let b = reference_run();
    assert_eq!(a.len(), b.len());
    for i in 0..a.len() {
        assert_eq!(a.positions()[i].to_bits(), b.positions()[i].to_bits());
        assert_eq!(a.velocities()[i].to_bits(), b.velocities()[i].to_bits());
    }
}

#[test]
fn output_length_equals_step_count() {
    for steps in [0usize, 1, 2, 19, 20, 21, 1_000] {
        let traj = integrate(
            &DampedPendulum::default(),
            OscillatorState::new(0.1, 0.0),
            0.01,
            steps,
        );
        assert_eq!(traj.positions().len(), steps);
        assert_eq!(traj.velocities().len(), steps);
    }
}

#[test]
fn single_step_is_semi_implicit() {
    let (x0, v0, dt) = (0.4, -0.25, 0.02);
    for law in [
        Law::from(VanDerPol { mu: 1.2 }),
        Law::from(DampedPendulum {
            epsilon: 0.3,
            omega0: 1.0,
        }),
    ] {
        let traj = integrate(&law, OscillatorState::new(x0, v0), dt, 1);
        let v1 = v0 + law.acceleration(&OscillatorState::new(x0, v0)) * dt;
        assert_eq!(traj.velocities()[0], v1);
        assert_eq!(traj.positions()[0], x0 + v1 * dt);
    }
}

// ============================================================================
// Limit cycle behavior
// ============================================================================

#[test]
fn van_der_pol_settles_on_amplitude_two() {
    let traj = reference_run();
    assert!(traj.is_finite());

    let (_, tail) = traj.view().split_at(traj.len() - 1_000);
    assert_abs_diff_eq!(tail.amplitude(), 2.0, epsilon = 0.3);
}

#[test]
fn van_der_pol_small_and_large_starts_meet_the_same_cycle() {
    let law = VanDerPol { mu: 1.2 };
    let inner = integrate(&law, OscillatorState::new(0.1, 0.0), 0.01, 20_000);
    let outer = integrate(&law, OscillatorState::new(3.0, 3.0), 0.01, 20_000);
    let (_, inner_tail) = inner.view().split_at(19_000);
    let (_, outer_tail) = outer.view().split_at(19_000);
    assert_abs_diff_eq!(inner_tail.amplitude(), outer_tail.amplitude(), epsilon = 0.05);
}

#[test]
fn damped_pendulum_grows_into_a_bounded_cycle() {
    let law = DampedPendulum {
        epsilon: 0.3,
        omega0: 1.0,
    };
    let traj = integrate(&law, OscillatorState::new(0.1, 0.0), 0.01, 20_000);
    assert!(traj.is_finite());

    let (head, _) = traj.view().split_at(500);
    let (_, tail) = traj.view().split_at(18_000);
    assert!(head.amplitude() < 0.5);
    assert!(tail.amplitude() > 1.0);
    assert!(tail.amplitude() < std::f64::consts::PI);
}

#[test]
fn zero_damping_conserves_harmonic_energy() {
    let law = VanDerPol { mu: 0.0 };
    let start = OscillatorState::new(1.0, 0.0);
    let e0 = start.harmonic_energy();
    let traj = integrate(&law, start, 0.001, 100);
    for i in 0..traj.len() {
        let e = traj.state(i).unwrap().harmonic_energy();
        assert_abs_diff_eq!(e, e0, epsilon = 1e-3);
    }
}

#[test]
fn unstable_step_size_propagates_non_finite_values() {
    let law = VanDerPol { mu: 50.0 };
    let traj = integrate(&law, OscillatorState::new(2.0, 0.0), 0.5, 400);
    assert_eq!(traj.len(), 400);
    let first_bad = traj
        .positions()
        .iter()
        .zip(traj.velocities())
        .position(|(x, v)| !x.is_finite() || !v.is_finite())
        .expect("run should blow up");
    let (_, rest) = traj.view().split_at(first_bad + 1);
    assert!(rest.points().all(|(x, v)| !x.is_finite() || !v.is_finite()));
}

// ============================================================================
// Segmentation
// ============================================================================

#[test]
fn reference_scenario_segments() {
    let traj = reference_run();
    let seg = segment(&traj, 12_000);
    assert_eq!(seg.transient.len(), 12_000);
    assert_eq!(seg.cycle.len(), 8_000);
    assert!(seg.transient.is_finite());
    assert!(seg.cycle.is_finite());
}

#[test]
fn out_of_range_split_is_clamped() {
    let traj = integrate(&VanDerPol::default(), OscillatorState::new(0.1, 0.0), 0.01, 300);
    for k in [-1_000i64, -1, 0, 150, 299, 300, 1_000_000] {
        let seg = segment(&traj, k);
        assert_eq!(seg.transient.len() + seg.cycle.len(), 300);
        assert!(seg.transient_end <= 299);
    }
}

#[test]
fn simulate_reference_config() {
    let mut checkpoints = 0;
    let sim = simulate(&SimulationConfig::default(), &mut |_: Progress| checkpoints += 1).unwrap();
    assert_eq!(checkpoints, 21);
    assert_eq!(sim.transient_end, 12_000);

    let seg = sim.segments();
    assert_eq!(seg.cycle.len(), 8_000);

    let marks = sim.landmarks().unwrap();
    assert_eq!(Some(marks.arrow_of_time), sim.trajectory.state(4_000));
    assert_eq!(Some(marks.cycle_mid), sim.trajectory.state(16_000));
}

#[test]
fn simulate_rejects_negative_steps() {
    let config = SimulationConfig {
        steps: -20,
        ..Default::default()
    };
    let err = simulate(&config, &mut NoProgress).unwrap_err();
    assert!(matches!(err, OscillatorError::InvalidStepCount(-20)));
    assert!(err.to_string().contains("-20"));
}

// ============================================================================
// Interop
// ============================================================================

#[test]
fn trajectory_matrix_matches_sequences() {
    let traj = integrate(&VanDerPol::default(), OscillatorState::new(0.1, 0.0), 0.01, 64);
    let mat = traj.to_mat();
    assert_eq!((mat.nrows(), mat.ncols()), (2, 64));
    for j in 0..64 {
        assert_eq!(mat[(0, j)], traj.positions()[j]);
        assert_eq!(mat[(1, j)], traj.velocities()[j]);
    }
}
