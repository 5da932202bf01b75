pub mod dual;
pub mod var;

pub use dual::Dual;
pub use var::Var;
