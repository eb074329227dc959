use crate::types::OscillatorState;

/// Trait for acceleration laws of a second-order oscillator.
///
/// A law maps the current state to the instantaneous acceleration x''.
/// Implementations must be pure: no side effects, same output for the same
/// state.
pub trait AccelerationLaw: Send + Sync {
    /// Acceleration at `state`.
    fn acceleration(&self, state: &OscillatorState) -> f64;

    /// Law name.
    fn name(&self) -> &str;
}

/// Van der Pol oscillator.
///
/// x'' = μ(1 - x²)x' - x
///
/// Negative damping for |x| < 1 and positive damping for |x| > 1 drive every
/// non-trivial trajectory onto a limit cycle of amplitude ≈ 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanDerPol {
    pub mu: f64,
}

impl Default for VanDerPol {
    fn default() -> Self {
        Self { mu: 1.2 }
    }
}

impl AccelerationLaw for VanDerPol {
    fn acceleration(&self, state: &OscillatorState) -> f64 {
        let x = state.position;
        let v = state.velocity;
        self.mu * (1.0 - x * x) * v - x
    }
    fn name(&self) -> &str {
        "van_der_pol"
    }
}

/// Self-excited pendulum with a sine restoring term.
///
/// x'' = -ε(x² - 1)x' - ω₀² sin(x)
///
/// The damping coefficient is written against (x² - 1), the opposite
/// orientation of [`VanDerPol`]'s (1 - x²). `epsilon` and `mu` are therefore
/// not interchangeable when porting parameter sets between the two laws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedPendulum {
    pub epsilon: f64,
    pub omega0: f64,
}

impl Default for DampedPendulum {
    fn default() -> Self {
        Self {
            epsilon: 0.3,
            omega0: 1.0,
        }
    }
}

impl AccelerationLaw for DampedPendulum {
    fn acceleration(&self, state: &OscillatorState) -> f64 {
        let x = state.position;
        let v = state.velocity;
        -self.epsilon * (x * x - 1.0) * v - self.omega0 * self.omega0 * x.sin()
    }
    fn name(&self) -> &str {
        "damped_pendulum"
    }
}

/// Closed set of built-in laws, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Law {
    VanDerPol(VanDerPol),
    DampedPendulum(DampedPendulum),
}

impl Default for Law {
    fn default() -> Self {
        Law::VanDerPol(VanDerPol::default())
    }
}

impl From<VanDerPol> for Law {
    fn from(law: VanDerPol) -> Self {
        Law::VanDerPol(law)
    }
}

impl From<DampedPendulum> for Law {
    fn from(law: DampedPendulum) -> Self {
        Law::DampedPendulum(law)
    }
}

impl AccelerationLaw for Law {
    fn acceleration(&self, state: &OscillatorState) -> f64 {
        match self {
            Law::VanDerPol(law) => law.acceleration(state),
            Law::DampedPendulum(law) => law.acceleration(state),
        }
    }
    fn name(&self) -> &str {
        match self {
            Law::VanDerPol(law) => law.name(),
            Law::DampedPendulum(law) => law.name(),
        }
    }
}

/// A wrapper that turns a closure into an AccelerationLaw.
pub struct ClosureLaw<F: Fn(&OscillatorState) -> f64 + Send + Sync> {
    func: F,
    name: String,
}

impl<F: Fn(&OscillatorState) -> f64 + Send + Sync> ClosureLaw<F> {
    pub fn new(func: F, name: impl Into<String>) -> Self {
        Self {
            func,
            name: name.into(),
        }
    }
}

impl<F: Fn(&OscillatorState) -> f64 + Send + Sync> AccelerationLaw for ClosureLaw<F> {
    fn acceleration(&self, state: &OscillatorState) -> f64 {
        (self.func)(state)
    }
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near(a: f64, b: f64, eps: f64) {
        assert!(
            (a - b).abs() < eps,
            "expected {a} ≈ {b} (diff = {})",
            (a - b).abs()
        );
    }

    #[test]
    fn test_van_der_pol_value() {
        let law = VanDerPol { mu: 1.2 };
        let a = law.acceleration(&OscillatorState::new(0.5, 0.2));
        assert_near(a, -0.32, 1e-12); // 1.2 * 0.75 * 0.2 - 0.5
    }

    #[test]
    fn test_van_der_pol_zero_mu_is_harmonic() {
        let law = VanDerPol { mu: 0.0 };
        for &(x, v) in &[(0.3, 5.0), (-2.0, 1.0), (1.5, -0.7)] {
            let a = law.acceleration(&OscillatorState::new(x, v));
            assert_eq!(a, -x);
        }
    }

    #[test]
    fn test_van_der_pol_damping_switch() {
        // Inside |x| < 1 the damping term pushes along v, outside it opposes v.
        let law = VanDerPol { mu: 1.0 };
        let inside = law.acceleration(&OscillatorState::new(0.0, 1.0));
        let outside = law.acceleration(&OscillatorState::new(2.0, 1.0)) + 2.0;
        assert!(inside > 0.0);
        assert!(outside < 0.0);
    }

    #[test]
    fn test_damped_pendulum_value() {
        let law = DampedPendulum {
            epsilon: 0.3,
            omega0: 1.0,
        };
        let a = law.acceleration(&OscillatorState::new(0.5, 0.2));
        // -0.3 * (0.25 - 1) * 0.2 - sin(0.5)
        assert_near(a, 0.045 - 0.479425538604203, 1e-12);
    }

    #[test]
    fn test_damped_pendulum_omega0_scales_restoring_term() {
        let law = DampedPendulum {
            epsilon: 0.0,
            omega0: 2.0,
        };
        let a = law.acceleration(&OscillatorState::new(1.0, 3.0));
        assert_near(a, -4.0 * 1.0_f64.sin(), 1e-12);
    }

    #[test]
    fn test_damped_pendulum_equilibrium() {
        let law = DampedPendulum::default();
        assert_eq!(law.acceleration(&OscillatorState::default()), 0.0);
    }

    #[test]
    fn test_laws_differ_away_from_origin() {
        let state = OscillatorState::new(1.5, 0.4);
        let vdp = VanDerPol { mu: 0.3 }.acceleration(&state);
        let pendulum = DampedPendulum {
            epsilon: 0.3,
            omega0: 1.0,
        }
        .acceleration(&state);
        assert!((vdp - pendulum).abs() > 1e-3);
    }

    #[test]
    fn test_law_enum_dispatch() {
        let state = OscillatorState::new(0.7, -0.4);
        let vdp = VanDerPol { mu: 2.5 };
        let pendulum = DampedPendulum {
            epsilon: 0.1,
            omega0: 1.3,
        };
        assert_eq!(Law::from(vdp).acceleration(&state), vdp.acceleration(&state));
        assert_eq!(
            Law::from(pendulum).acceleration(&state),
            pendulum.acceleration(&state)
        );
        assert_eq!(Law::from(vdp).name(), "van_der_pol");
        assert_eq!(Law::from(pendulum).name(), "damped_pendulum");
    }

    #[test]
    fn test_closure_law() {
        let law = ClosureLaw::new(|s: &OscillatorState| -4.0 * s.position, "stiff_spring");
        assert_eq!(law.name(), "stiff_spring");
        assert_near(law.acceleration(&OscillatorState::new(0.25, 9.0)), -1.0, 1e-12);
    }
}
