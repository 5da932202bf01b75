use thiserror::Error;

/// Errors surfaced by a single optimization step.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StepError {
    #[error("no gradient entry for variable '{name}'")]
    MissingGradient { name: String },

    #[error(
        "exploding gradient for variable '{name}': {gradient} exceeds 1e6 times value {value}"
    )]
    ExplodingGradient {
        name: String,
        gradient: f64,
        value: f64,
    },

    #[error("step called with an empty target list")]
    NoTargets,

    #[error("invalid learning rate: {rate}")]
    InvalidLearningRate { rate: f64 },
}

pub type StepResult<T> = Result<T, StepError>;
