//! The `tangent_core` crate is the numerical engine of the Tangent ODE
//! toolkit: fixed-step Euler integration of scalar first-order initial-value
//! problems `y' = f(t, y)`, with Newton-Raphson root finding resolving the
//! implicit step's nonlinear equation.
//!
//! Key components:
//! - **Traits**: `Scalar` (numeric type abstraction), `RootSolver` (pluggable
//!   root-finding strategy).
//! - **Expression**: a restricted arithmetic grammar compiled to a small
//!   stack machine; user text is parsed, never executed as code.
//! - **Root finding**: Newton-Raphson with explicit convergence and failure
//!   semantics.
//! - **Euler steppers**: explicit and implicit fixed-step integrators
//!   producing `(t, y)` trajectories.

pub mod derivative;
pub mod euler;
pub mod expression;
pub mod root;
pub mod traits;
