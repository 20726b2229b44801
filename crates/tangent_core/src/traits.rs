use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

use crate::root::RootError;

/// A trait for types that can be used as scalars throughout the toolkit.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// A strategy for resolving a scalar nonlinear equation `g(x) = 0`.
///
/// The implicit stepper is written against this interface so that the
/// Newton-Raphson default can be swapped for another iteration (secant,
/// bisection) without touching the stepping loop.
pub trait RootSolver<T: Scalar> {
    /// Checks the solver's own configuration, returning a human-readable
    /// reason when it is unusable. Steppers call this once, before any
    /// stepping begins.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    /// Resolves `g(x) = 0` given the derivative `dg` and a starting guess.
    fn solve(&self, g: impl Fn(T) -> T, dg: impl Fn(T) -> T, x0: T) -> Result<T, RootError>;
}
