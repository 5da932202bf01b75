use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// The result of evaluating a differentiable expression: a scalar value
/// together with the partial derivatives of that value with respect to every
/// named variable the expression touched.
///
/// Arithmetic on `Dual` propagates partials over the union of both operands'
/// variable names, so a whole objective builds its gradient mapping in a
/// single forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Dual {
    value: f64,
    partials: HashMap<String, f64>,
}

impl Dual {
    /// A constant: no sensitivity to any variable.
    pub fn constant(value: f64) -> Self {
        Dual {
            value,
            partials: HashMap::new(),
        }
    }

    /// A value with explicitly seeded partials. Seeding `{name: 1.0}` makes
    /// this the derivative seed for the variable `name`.
    pub fn with_partials(value: f64, partials: HashMap<String, f64>) -> Self {
        Dual { value, partials }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Partial derivative with respect to the named variable, if the
    /// expression referenced it.
    pub fn partial(&self, name: &str) -> Option<f64> {
        self.partials.get(name).copied()
    }

    /// The full gradient mapping, name → partial derivative.
    pub fn partials(&self) -> &HashMap<String, f64> {
        &self.partials
    }

    /// Chain rule for a unary function: value f(v), each partial scaled by
    /// f'(v).
    fn unary(&self, value: f64, dfdv: f64) -> Dual {
        let partials = self
            .partials
            .iter()
            .map(|(name, g)| (name.clone(), g * dfdv))
            .collect();
        Dual { value, partials }
    }

    /// Chain rule for a binary function: partials merged over the union of
    /// both operands' names, scaled by the respective local derivatives.
    fn binary(&self, rhs: &Dual, value: f64, dl: f64, dr: f64) -> Dual {
        let mut partials: HashMap<String, f64> =
            HashMap::with_capacity(self.partials.len() + rhs.partials.len());
        for (name, g) in &self.partials {
            partials.insert(name.clone(), g * dl);
        }
        for (name, g) in &rhs.partials {
            *partials.entry(name.clone()).or_insert(0.0) += g * dr;
        }
        Dual { value, partials }
    }

    /// Integer power.
    pub fn powi(&self, n: i32) -> Dual {
        self.unary(self.value.powi(n), f64::from(n) * self.value.powi(n - 1))
    }

    /// Real power (scalar exponent).
    pub fn powf(&self, p: f64) -> Dual {
        self.unary(self.value.powf(p), p * self.value.powf(p - 1.0))
    }

    /// Exponential.
    pub fn exp(&self) -> Dual {
        let e = self.value.exp();
        self.unary(e, e)
    }

    /// Natural logarithm.
    pub fn ln(&self) -> Dual {
        self.unary(self.value.ln(), 1.0 / self.value)
    }

    /// Square root.
    pub fn sqrt(&self) -> Dual {
        let r = self.value.sqrt();
        self.unary(r, 0.5 / r)
    }

    /// Sine.
    pub fn sin(&self) -> Dual {
        self.unary(self.value.sin(), self.value.cos())
    }

    /// Cosine.
    pub fn cos(&self) -> Dual {
        self.unary(self.value.cos(), -self.value.sin())
    }

    /// Hyperbolic tangent.
    pub fn tanh(&self) -> Dual {
        let t = self.value.tanh();
        self.unary(t, 1.0 - t * t)
    }

    /// Logistic sigmoid.
    pub fn sigmoid(&self) -> Dual {
        let s = 1.0 / (1.0 + (-self.value).exp());
        self.unary(s, s * (1.0 - s))
    }
}

impl fmt::Display for Dual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.value, self.partials)
    }
}

impl Add<&Dual> for &Dual {
    type Output = Dual;
    fn add(self, rhs: &Dual) -> Dual {
        self.binary(rhs, self.value + rhs.value, 1.0, 1.0)
    }
}

impl Sub<&Dual> for &Dual {
    type Output = Dual;
    fn sub(self, rhs: &Dual) -> Dual {
        self.binary(rhs, self.value - rhs.value, 1.0, -1.0)
    }
}

impl Mul<&Dual> for &Dual {
    type Output = Dual;
    fn mul(self, rhs: &Dual) -> Dual {
        self.binary(rhs, self.value * rhs.value, rhs.value, self.value)
    }
}

impl Div<&Dual> for &Dual {
    type Output = Dual;
    fn div(self, rhs: &Dual) -> Dual {
        self.binary(
            rhs,
            self.value / rhs.value,
            1.0 / rhs.value,
            -self.value / (rhs.value * rhs.value),
        )
    }
}

impl Add for Dual {
    type Output = Dual;
    fn add(self, rhs: Dual) -> Dual {
        &self + &rhs
    }
}

impl Sub for Dual {
    type Output = Dual;
    fn sub(self, rhs: Dual) -> Dual {
        &self - &rhs
    }
}

impl Mul for Dual {
    type Output = Dual;
    fn mul(self, rhs: Dual) -> Dual {
        &self * &rhs
    }
}

impl Div for Dual {
    type Output = Dual;
    fn div(self, rhs: Dual) -> Dual {
        &self / &rhs
    }
}

impl Neg for Dual {
    type Output = Dual;
    fn neg(self) -> Dual {
        self.unary(-self.value, -1.0)
    }
}

impl Neg for &Dual {
    type Output = Dual;
    fn neg(self) -> Dual {
        self.unary(-self.value, -1.0)
    }
}

impl Add<f64> for Dual {
    type Output = Dual;
    fn add(self, rhs: f64) -> Dual {
        self.unary(self.value + rhs, 1.0)
    }
}

impl Add<Dual> for f64 {
    type Output = Dual;
    fn add(self, rhs: Dual) -> Dual {
        rhs.unary(self + rhs.value, 1.0)
    }
}

impl Sub<f64> for Dual {
    type Output = Dual;
    fn sub(self, rhs: f64) -> Dual {
        self.unary(self.value - rhs, 1.0)
    }
}

impl Sub<Dual> for f64 {
    type Output = Dual;
    fn sub(self, rhs: Dual) -> Dual {
        rhs.unary(self - rhs.value, -1.0)
    }
}

impl Mul<f64> for Dual {
    type Output = Dual;
    fn mul(self, rhs: f64) -> Dual {
        self.unary(self.value * rhs, rhs)
    }
}

impl Mul<Dual> for f64 {
    type Output = Dual;
    fn mul(self, rhs: Dual) -> Dual {
        rhs.unary(self * rhs.value, self)
    }
}

impl Div<f64> for Dual {
    type Output = Dual;
    fn div(self, rhs: f64) -> Dual {
        self.unary(self.value / rhs, 1.0 / rhs)
    }
}

impl Div<Dual> for f64 {
    type Output = Dual;
    fn div(self, rhs: Dual) -> Dual {
        rhs.unary(self / rhs.value, -self / (rhs.value * rhs.value))
    }
}
