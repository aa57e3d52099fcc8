//! Power rule for product terms
//!
//! `f(x) = c * x^p  =>  f'(x) = c * p * x^(p - 1)`
//!
//! A product term is walked leaf by leaf: constant leaves are *summed* into the
//! coefficient and every variable leaf adds one to the power. An aggregated
//! coefficient of exactly `0.0` means "no constant factor" and is read as `1.0`.
//! Both rules are kept as they are, including for terms with several constant
//! factors (`2 * 3 * x` has coefficient 5) and for an explicit zero factor
//! (`0 * x * x` differentiates like `x * x`).

use std::ops::Add;

use crate::{DiffError, Expr, ExprKind, Var};

/// Coefficient and power gathered from one product term
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FunctionProperties {
    /// Sum of the constant leaves
    pub constant_sum: f64,
    /// Number of variable leaves
    pub variable_count: u32,
}

impl Add for FunctionProperties {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        FunctionProperties {
            constant_sum: self.constant_sum + rhs.constant_sum,
            variable_count: self.variable_count + rhs.variable_count,
        }
    }
}

impl FunctionProperties {
    /// Walk a product of numbers and variables
    pub fn of_product(expr: &Expr) -> Result<Self, DiffError> {
        match &expr.kind {
            ExprKind::Mul(l, r) => Ok(Self::of_product(l)? + Self::of_product(r)?),
            ExprKind::Number(n) => Ok(FunctionProperties {
                constant_sum: *n,
                variable_count: 0,
            }),
            ExprKind::Variable(_) => Ok(FunctionProperties {
                constant_sum: 0.0,
                variable_count: 1,
            }),
            ExprKind::Add(_, _) | ExprKind::Call { .. } => Err(DiffError::invalid_shape(format!(
                "'{}' inside a product term",
                expr
            ))),
        }
    }

    /// Coefficient used by the power rule (`0.0` reads as `1.0`)
    pub fn coefficient(&self) -> f64 {
        if self.constant_sum == 0.0 {
            1.0
        } else {
            self.constant_sum
        }
    }

    pub fn power(&self) -> f64 {
        f64::from(self.variable_count)
    }
}

/// Differentiate a bare variable or a product term
pub(crate) fn differentiate_power(term: &Expr, var: &Var) -> Result<Expr, DiffError> {
    match &term.kind {
        ExprKind::Variable(_) => Ok(Expr::number(1.0)),
        ExprKind::Mul(_, _) => {
            let props = FunctionProperties::of_product(term)?;
            let pow = props.power();
            Ok(Expr::mul_expr(
                Expr::number(props.coefficient() * pow),
                Expr::pow(Expr::var(var), Expr::number(pow - 1.0)),
            ))
        }
        _ => Err(DiffError::invalid_shape(format!(
            "'{}' is neither the variable nor a product",
            term
        ))),
    }
}
