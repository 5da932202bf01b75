use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

use crate::dual::Dual;

/// A named scalar variable that participates in differentiation.
///
/// The value lives in a shared cell: cloning a `Var` clones the handle, so an
/// objective closure and an optimizer's target list observe (and the
/// optimizer mutates) the same underlying scalar. The name is fixed at
/// creation and is the key under which this variable's partial derivative
/// appears in a [`Dual`]'s gradient mapping.
///
/// `Rc<Cell<f64>>` is intentionally not `Send`/`Sync`; a variable belongs to
/// one thread, matching the optimizer's single-writer discipline.
#[derive(Debug, Clone)]
pub struct Var {
    name: String,
    value: Rc<Cell<f64>>,
}

impl Var {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Var {
            name: name.into(),
            value: Rc::new(Cell::new(value)),
        }
    }

    /// The canonical name, used as the gradient-mapping key. Names must be
    /// unique among the variables of a single objective.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value.get()
    }

    pub fn set_value(&self, value: f64) {
        self.value.set(value);
    }

    /// Seed a dual number for this variable: current value, with partial 1
    /// with respect to its own name.
    pub fn ad(&self) -> Dual {
        Dual::with_partials(self.value.get(), HashMap::from([(self.name.clone(), 1.0)]))
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value.get())
    }
}

// Arithmetic on `&Var` seeds through `ad()` so objectives read as plain
// expressions over variables.

impl Add<&Var> for &Var {
    type Output = Dual;
    fn add(self, rhs: &Var) -> Dual {
        self.ad() + rhs.ad()
    }
}

impl Sub<&Var> for &Var {
    type Output = Dual;
    fn sub(self, rhs: &Var) -> Dual {
        self.ad() - rhs.ad()
    }
}

impl Mul<&Var> for &Var {
    type Output = Dual;
    fn mul(self, rhs: &Var) -> Dual {
        self.ad() * rhs.ad()
    }
}

impl Div<&Var> for &Var {
    type Output = Dual;
    fn div(self, rhs: &Var) -> Dual {
        self.ad() / rhs.ad()
    }
}

impl Neg for &Var {
    type Output = Dual;
    fn neg(self) -> Dual {
        -self.ad()
    }
}

impl Add<f64> for &Var {
    type Output = Dual;
    fn add(self, rhs: f64) -> Dual {
        self.ad() + rhs
    }
}

impl Add<&Var> for f64 {
    type Output = Dual;
    fn add(self, rhs: &Var) -> Dual {
        self + rhs.ad()
    }
}

impl Sub<f64> for &Var {
    type Output = Dual;
    fn sub(self, rhs: f64) -> Dual {
        self.ad() - rhs
    }
}

impl Sub<&Var> for f64 {
    type Output = Dual;
    fn sub(self, rhs: &Var) -> Dual {
        self - rhs.ad()
    }
}

impl Mul<f64> for &Var {
    type Output = Dual;
    fn mul(self, rhs: f64) -> Dual {
        self.ad() * rhs
    }
}

impl Mul<&Var> for f64 {
    type Output = Dual;
    fn mul(self, rhs: &Var) -> Dual {
        self * rhs.ad()
    }
}

impl Div<f64> for &Var {
    type Output = Dual;
    fn div(self, rhs: f64) -> Dual {
        self.ad() / rhs
    }
}

impl Div<&Var> for f64 {
    type Output = Dual;
    fn div(self, rhs: &Var) -> Dual {
        self / rhs.ad()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_cell() {
        let v = Var::new("v", 1.0);
        let alias = v.clone();
        alias.set_value(2.5);
        assert_eq!(v.value(), 2.5);
        assert_eq!(alias.name(), "v");
    }

    #[test]
    fn test_ad_seeds_unit_partial() {
        let v = Var::new("v", 7.0);
        let d = v.ad();
        assert_eq!(d.value(), 7.0);
        assert_eq!(d.partial("v"), Some(1.0));
        assert_eq!(d.partials().len(), 1);
    }

    #[test]
    fn test_ad_reads_current_value() {
        let v = Var::new("v", 1.0);
        v.set_value(4.0);
        assert_eq!(v.ad().value(), 4.0);
    }

    #[test]
    fn test_expression_over_vars() {
        let x = Var::new("x", 3.0);
        let y = Var::new("y", 2.0);
        // f = x² + 2y
        let f = &x * &x + 2.0 * &y;
        assert_eq!(f.value(), 13.0);
        assert_eq!(f.partial("x"), Some(6.0));
        assert_eq!(f.partial("y"), Some(2.0));
    }

    #[test]
    fn test_var_scalar_mix() {
        let x = Var::new("x", 4.0);
        let f = 1.0 / &x - (&x - 3.0);
        assert_eq!(f.value(), 0.25 - 1.0);
        // d/dx = -1/x² - 1
        assert_eq!(f.partial("x"), Some(-1.0 / 16.0 - 1.0));
    }

    #[test]
    fn test_display() {
        let x = Var::new("x", 1.5);
        assert_eq!(x.to_string(), "x = 1.5");
    }
}
