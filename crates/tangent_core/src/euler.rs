use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::derivative::forward_difference;
use crate::root::{NewtonRaphson, RootError};
use crate::traits::{RootSolver, Scalar};

/// One point `(t, y)` on a solution trajectory. Samples are immutable once
/// emitted; a trajectory is an append-only sequence owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample<T> {
    pub t: T,
    pub y: T,
}

/// Errors raised by the stepping loops.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StepError<T: Scalar> {
    /// Rejected before any stepping begins.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
    /// The root solve for one step failed. `partial` holds the samples
    /// accepted before the failing step; no value is invented for the step
    /// itself.
    #[error("root solve failed at step {step}: {source}")]
    SolverFailed {
        /// 1-based index of the step whose solve failed.
        step: usize,
        source: RootError,
        partial: Vec<Sample<T>>,
    },
}

fn validate_step_size<T: Scalar>(h: T) -> Result<(), StepError<T>> {
    if h > T::zero() && h.is_finite() {
        Ok(())
    } else {
        Err(StepError::InvalidConfiguration {
            reason: format!("step size must be positive and finite, got {:?}", h),
        })
    }
}

/// One explicit-Euler advance from `(t, y)`: the state slot of `f` is
/// differenced with spacing `h` and the quotient scaled back by `h`.
fn advance_explicit<T: Scalar>(f: &impl Fn(T, T) -> T, t: T, y: T, h: T) -> T {
    y + h * forward_difference(|x| f(t, x), y, h)
}

/// Explicit Euler over `s` fixed steps of size `h` starting from
/// `(t0, y0)`.
///
/// Returns the samples at `t0 + h, t0 + 2h, ..., t0 + s*h`; the initial
/// point is the caller's and is not repeated in the output. `s == 0` yields
/// an empty trajectory.
pub fn step_explicit<T, F>(f: F, y0: T, t0: T, h: T, s: usize) -> Result<Vec<Sample<T>>, StepError<T>>
where
    T: Scalar,
    F: Fn(T, T) -> T,
{
    validate_step_size(h)?;

    let mut samples = Vec::with_capacity(s);
    let mut t = t0;
    let mut y = y0;
    for k in 0..s {
        let t_next = t0 + T::from_usize(k + 1).unwrap() * h;
        y = advance_explicit(&f, t, y, h);
        samples.push(Sample { t: t_next, y });
        t = t_next;
    }
    Ok(samples)
}

/// Implicit Euler with the default Newton-Raphson solver.
pub fn step_implicit<T, F, DF>(
    f: F,
    df: DF,
    y0: T,
    t0: T,
    h: T,
    s: usize,
) -> Result<Vec<Sample<T>>, StepError<T>>
where
    T: Scalar,
    F: Fn(T, T) -> T,
    DF: Fn(T, T) -> T,
{
    step_implicit_with(f, df, y0, t0, h, s, &NewtonRaphson::default())
}

/// Implicit Euler over `s` fixed steps with a caller-chosen root-finding
/// strategy.
///
/// Per step, from the current `(t, y_prev)`:
///
/// 1. Predict: one explicit-Euler advance seeds the solver. The prediction
///    is only a starting guess, never the accepted value.
/// 2. Build the residual `g(y) = y - h*f(t + h, y) - y_prev` together with
///    its analytic derivative `dg(y) = 1 - h*df(t + h, y)`. `df` is the
///    partial of `f` with respect to `y`, evaluated at the advanced time,
///    consistent with the solve variable.
/// 3. Solve `g(y) = 0` from the prediction; the root becomes the step's
///    sample and the next step's `y_prev`.
///
/// Steps are strictly sequential: each residual embeds the previous step's
/// root. A solver failure stops the run and carries the 1-based step index,
/// the failure kind, and the samples accepted so far.
pub fn step_implicit_with<T, F, DF, S>(
    f: F,
    df: DF,
    y0: T,
    t0: T,
    h: T,
    s: usize,
    solver: &S,
) -> Result<Vec<Sample<T>>, StepError<T>>
where
    T: Scalar,
    F: Fn(T, T) -> T,
    DF: Fn(T, T) -> T,
    S: RootSolver<T>,
{
    validate_step_size(h)?;
    solver
        .validate()
        .map_err(|reason| StepError::InvalidConfiguration { reason })?;

    let mut samples = Vec::with_capacity(s);
    let mut t = t0;
    let mut y_prev = y0;
    for k in 0..s {
        let t_next = t0 + T::from_usize(k + 1).unwrap() * h;
        let y_pred = advance_explicit(&f, t, y_prev, h);
        let g = |y: T| y - h * f(t_next, y) - y_prev;
        let dg = |y: T| T::one() - h * df(t_next, y);
        match solver.solve(g, dg, y_pred) {
            Ok(y_next) => {
                samples.push(Sample {
                    t: t_next,
                    y: y_next,
                });
                t = t_next;
                y_prev = y_next;
            }
            Err(source) => {
                return Err(StepError::SolverFailed {
                    step: k + 1,
                    source,
                    partial: samples,
                });
            }
        }
    }
    Ok(samples)
}
