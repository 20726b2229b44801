use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::traits::{RootSolver, Scalar};

/// Tuning knobs for Newton-Raphson iteration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NewtonSettings {
    /// Convergence threshold on the distance between successive iterates.
    /// The comparison is a strict less-than.
    pub tolerance: f64,
    /// Hard cap on the number of iterations. This is the only safeguard
    /// against an iteration that never settles.
    pub max_iter: usize,
}

impl Default for NewtonSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iter: 100,
        }
    }
}

/// The ways a root solve can fail. Neither kind is retried internally; both
/// surface to the caller untouched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RootError {
    /// `dg` evaluated to exactly zero, leaving the Newton step undefined.
    #[error("derivative is exactly zero; the Newton step is undefined")]
    ZeroDerivative,
    /// Successive iterates never came within tolerance of one another.
    #[error("no convergence within {max_iter} iterations")]
    IterationLimitExceeded { max_iter: usize },
}

/// Newton-Raphson iteration on `g(x) = 0`.
///
/// Starting from `x0`, repeats `x_new = x - g(x)/dg(x)` at most
/// `settings.max_iter` times, accepting `x_new` once `|x_new - x| <
/// settings.tolerance`.
///
/// The derivative test is an exact comparison against zero. That is a
/// deliberate policy: it catches a literally non-invertible tangent and
/// nothing more. Near-singular derivatives produce large steps and are left
/// to the iteration cap.
///
/// Positive `tolerance` and nonzero `max_iter` are the caller's contract
/// (steppers enforce it up front); degenerate settings cannot loop forever
/// here, they exhaust the cap and report `IterationLimitExceeded`.
pub fn find_root<T: Scalar>(
    g: impl Fn(T) -> T,
    dg: impl Fn(T) -> T,
    x0: T,
    settings: NewtonSettings,
) -> Result<T, RootError> {
    let tol = T::from_f64(settings.tolerance).unwrap();
    let mut x = x0;
    for _ in 0..settings.max_iter {
        let gx = g(x);
        let dgx = dg(x);
        if dgx == T::zero() {
            return Err(RootError::ZeroDerivative);
        }
        let x_new = x - gx / dgx;
        if (x_new - x).abs() < tol {
            return Ok(x_new);
        }
        x = x_new;
    }
    Err(RootError::IterationLimitExceeded {
        max_iter: settings.max_iter,
    })
}

/// The default root-finding strategy: plain Newton-Raphson over
/// [`find_root`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NewtonRaphson {
    pub settings: NewtonSettings,
}

impl NewtonRaphson {
    pub fn new(settings: NewtonSettings) -> Self {
        Self { settings }
    }
}

impl<T: Scalar> RootSolver<T> for NewtonRaphson {
    fn validate(&self) -> Result<(), String> {
        if !(self.settings.tolerance > 0.0) {
            return Err(format!(
                "tolerance must be positive, got {}",
                self.settings.tolerance
            ));
        }
        if self.settings.max_iter == 0 {
            return Err("max_iter must be at least 1".to_string());
        }
        Ok(())
    }

    fn solve(&self, g: impl Fn(T) -> T, dg: impl Fn(T) -> T, x0: T) -> Result<T, RootError> {
        find_root(g, dg, x0, self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::{find_root, NewtonRaphson, NewtonSettings, RootError};
    use crate::traits::RootSolver;

    #[test]
    fn linear_residual_converges_immediately() {
        let root = find_root(|y: f64| y - 2.0, |_| 1.0, 0.0, NewtonSettings::default())
            .expect("linear solve should converge");
        assert!((root - 2.0).abs() < 1e-12);
    }

    #[test]
    fn finds_sqrt_two() {
        let root = find_root(
            |x: f64| x * x - 2.0,
            |x| 2.0 * x,
            1.0,
            NewtonSettings::default(),
        )
        .expect("sqrt(2) solve should converge");
        assert!((root - 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn zero_derivative_fails_on_first_iteration() {
        for x0 in [-5.0, 0.0, 3.5] {
            let result = find_root(|y| y - 2.0, |_| 0.0, x0, NewtonSettings::default());
            assert_eq!(result, Err(RootError::ZeroDerivative));
        }
    }

    #[test]
    fn oscillating_iteration_hits_the_cap() {
        // x^3 - 2x + 2 from x0 = 0 cycles between 0 and 1.
        let settings = NewtonSettings {
            tolerance: 1e-6,
            max_iter: 5,
        };
        let result = find_root(
            |x: f64| x * x * x - 2.0 * x + 2.0,
            |x| 3.0 * x * x - 2.0,
            0.0,
            settings,
        );
        assert_eq!(result, Err(RootError::IterationLimitExceeded { max_iter: 5 }));
    }

    #[test]
    fn degenerate_settings_exhaust_the_cap_instead_of_looping() {
        let settings = NewtonSettings {
            tolerance: 0.0,
            max_iter: 3,
        };
        let result = find_root(|y| y - 2.0, |_| 1.0, 0.0, settings);
        assert_eq!(result, Err(RootError::IterationLimitExceeded { max_iter: 3 }));
    }

    #[test]
    fn newton_raphson_rejects_bad_settings() {
        let zero_tol = NewtonRaphson::new(NewtonSettings {
            tolerance: 0.0,
            max_iter: 100,
        });
        assert!(RootSolver::<f64>::validate(&zero_tol).is_err());

        let zero_iter = NewtonRaphson::new(NewtonSettings {
            tolerance: 1e-6,
            max_iter: 0,
        });
        assert!(RootSolver::<f64>::validate(&zero_iter).is_err());

        assert!(RootSolver::<f64>::validate(&NewtonRaphson::default()).is_ok());
    }

    #[test]
    fn solver_strategy_matches_free_function() {
        let solver = NewtonRaphson::default();
        let via_trait = solver
            .solve(|x: f64| x * x - 2.0, |x| 2.0 * x, 1.0)
            .expect("trait solve should converge");
        let via_fn = find_root(
            |x: f64| x * x - 2.0,
            |x| 2.0 * x,
            1.0,
            NewtonSettings::default(),
        )
        .expect("free function should converge");
        assert_eq!(via_trait.to_bits(), via_fn.to_bits());
    }
}
