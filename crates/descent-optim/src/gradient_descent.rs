use descent_autodiff::{Dual, Var};

use crate::error::{StepError, StepResult};

/// A gradient larger than the variable's current value times this factor
/// aborts the step as incipient numerical divergence.
const INSTABILITY_FACTOR: f64 = 1e6;

/// Plain gradient descent: x ← x - lr * ∂f/∂x.
///
/// The engine holds a single piece of state, the default learning rate. Each
/// call to [`step`](GradientDescent::step) evaluates the objective once,
/// validates the gradient of every target, and applies the update to all
/// targets from that one gradient snapshot. A multi-step loop, stopping
/// criterion, or learning-rate schedule belongs to the caller;
/// [`step_with`](GradientDescent::step_with) takes a per-call rate so a
/// schedule can vary it between iterations.
///
/// ```
/// use descent_autodiff::Var;
/// use descent_optim::GradientDescent;
///
/// let v1 = Var::new("v1", 9.0);
/// let v2 = Var::new("v2", 4.0);
/// let opt = GradientDescent::new(0.1)?;
///
/// // One descent step on f = v1² + v2².
/// let loss = opt.step(|| &v1 * &v1 + &v2 * &v2, &[v1.clone(), v2.clone()])?;
/// assert_eq!(loss, 97.0);
/// assert!((v1.value() - 7.2).abs() < 1e-12);
/// assert!((v2.value() - 3.2).abs() < 1e-12);
/// # Ok::<(), descent_optim::StepError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GradientDescent {
    /// Step size applied when `step` is called without an override.
    pub learning_rate: f64,
}

impl GradientDescent {
    /// Rejects negative or non-finite rates. Zero is allowed: a zero-rate
    /// step evaluates and validates but leaves every variable unchanged.
    pub fn new(learning_rate: f64) -> StepResult<Self> {
        check_rate(learning_rate)?;
        Ok(GradientDescent { learning_rate })
    }

    /// One descent step at the configured default rate.
    ///
    /// Evaluates `objective` exactly once, then updates every variable in
    /// `targets` (in order) from that single gradient mapping. Returns the
    /// pre-step loss value.
    ///
    /// The step is all-or-nothing: every target's gradient is looked up and
    /// checked for stability before any value is written, so an error leaves
    /// the whole batch unmodified.
    pub fn step<F>(&self, objective: F, targets: &[Var]) -> StepResult<f64>
    where
        F: FnOnce() -> Dual,
    {
        self.apply(objective, targets, self.learning_rate)
    }

    /// One descent step at an explicit rate, overriding the default.
    pub fn step_with<F>(&self, objective: F, targets: &[Var], learning_rate: f64) -> StepResult<f64>
    where
        F: FnOnce() -> Dual,
    {
        check_rate(learning_rate)?;
        self.apply(objective, targets, learning_rate)
    }

    fn apply<F>(&self, objective: F, targets: &[Var], lr: f64) -> StepResult<f64>
    where
        F: FnOnce() -> Dual,
    {
        if targets.is_empty() {
            return Err(StepError::NoTargets);
        }
        let loss = objective();

        // Validation pass: resolve and check every gradient before mutating
        // anything.
        let mut gradients = Vec::with_capacity(targets.len());
        for var in targets {
            let g = loss
                .partial(var.name())
                .ok_or_else(|| StepError::MissingGradient {
                    name: var.name().to_string(),
                })?;
            // Signed comparison, kept as the original optimizer wrote it.
            // Not a magnitude test: negative values and gradients pass
            // through differently than their positive mirrors.
            if g > var.value() * INSTABILITY_FACTOR {
                return Err(StepError::ExplodingGradient {
                    name: var.name().to_string(),
                    gradient: g,
                    value: var.value(),
                });
            }
            gradients.push(g);
        }

        // Apply pass. All gradients come from the single evaluation above:
        // the update is simultaneous across the batch, never recomputed
        // after earlier targets move.
        for (var, g) in targets.iter().zip(gradients) {
            var.set_value(var.value() - lr * g);
        }
        Ok(loss.value())
    }
}

impl Default for GradientDescent {
    fn default() -> Self {
        GradientDescent { learning_rate: 0.1 }
    }
}

fn check_rate(rate: f64) -> StepResult<()> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(StepError::InvalidLearningRate { rate })
    }
}
