//! # descent
//!
//! Scalar gradient-descent optimization over named differentiable variables.
//!
//! ## Modules
//!
//! - **autodiff** — Forward-mode AD: `Var` (named shared scalar) and `Dual`
//!   (value plus name-keyed partial derivatives), with arithmetic that
//!   propagates partials through a whole objective in one forward pass
//! - **optim** — `GradientDescent`: the single-step update engine with an
//!   exploding-gradient guard and per-call learning-rate override
//!
//! ```
//! use descent::autodiff::Var;
//! use descent::optim::GradientDescent;
//!
//! let x = Var::new("x", 9.0);
//! let y = Var::new("y", 4.0);
//! let targets = [x.clone(), y.clone()];
//! let opt = GradientDescent::new(0.1)?;
//!
//! for _ in 0..100 {
//!     opt.step(|| &x * &x + &y * &y, &targets)?;
//! }
//! assert!(x.value().abs() < 1e-6);
//! assert!(y.value().abs() < 1e-6);
//! # Ok::<(), descent::optim::StepError>(())
//! ```

/// Forward-mode automatic differentiation.
pub use descent_autodiff as autodiff;

/// Gradient-descent step engine.
pub use descent_optim as optim;
