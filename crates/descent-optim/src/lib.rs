pub mod error;
pub mod gradient_descent;

pub use error::{StepError, StepResult};
pub use gradient_descent::GradientDescent;
