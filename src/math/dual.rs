use crate::traits::MathScalar;
use std::fmt;
use std::ops::{Add, Mul, Neg};

/// Dual number `val + eps·ε` with `ε² = 0`
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Dual<T: MathScalar> {
    pub val: T,
    pub eps: T,
}

impl<T: MathScalar> Dual<T> {
    pub fn new(val: T, eps: T) -> Self {
        Self { val, eps }
    }

    pub fn constant(val: T) -> Self {
        Self {
            val,
            eps: T::zero(),
        }
    }

    /// The differentiation variable itself (`dx/dx = 1`)
    pub fn variable(val: T) -> Self {
        Self { val, eps: T::one() }
    }

    pub fn sin(self) -> Self {
        Self::new(self.val.sin(), self.eps * self.val.cos())
    }

    pub fn cos(self) -> Self {
        Self::new(self.val.cos(), -self.eps * self.val.sin())
    }

    /// `self ^ rhs`
    ///
    /// With a constant exponent this is the power rule; otherwise
    /// `d(u^v) = u^v * (v' ln u + v u' / u)`.
    pub fn pow(self, rhs: Self) -> Self {
        let val = self.val.powf(rhs.val);
        if rhs.eps == T::zero() {
            let eps = rhs.val * self.val.powf(rhs.val - T::one()) * self.eps;
            return Self::new(val, eps);
        }
        let eps = val * (rhs.eps * self.val.ln() + rhs.val * self.eps / self.val);
        Self::new(val, eps)
    }
}

impl<T: MathScalar> fmt::Display for Dual<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}ε", self.val, self.eps)
    }
}

impl<T: MathScalar> Add for Dual<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.val + rhs.val, self.eps + rhs.eps)
    }
}

impl<T: MathScalar> Mul for Dual<T> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // Product rule
        Self::new(self.val * rhs.val, self.val * rhs.eps + self.eps * rhs.val)
    }
}

impl<T: MathScalar> Neg for Dual<T> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.val, -self.eps)
    }
}
