//! Numeric machinery independent of the symbolic engine
//!
//! [`dual::Dual`] numbers evaluate a tree together with its exact derivative
//! (forward-mode automatic differentiation). They give a second opinion on the
//! symbolic result that shares no code with the rewrite rules.

pub mod dual;

use crate::traits::MathScalar;
use crate::{DiffError, Expr, ExprKind, MathFn, Var};
use dual::Dual;

impl Expr {
    /// Evaluate the tree over dual numbers seeded at `var = x`.
    ///
    /// Returns `(f(x), f'(x))`. Constants that cannot be represented in `T`
    /// evaluate to `NaN`.
    pub fn eval_dual<T: MathScalar>(&self, var: &Var, x: T) -> Result<(T, T), DiffError> {
        let d = self.eval_dual_inner(var, Dual::variable(x))?;
        Ok((d.val, d.eps))
    }

    fn eval_dual_inner<T: MathScalar>(&self, var: &Var, x: Dual<T>) -> Result<Dual<T>, DiffError> {
        match &self.kind {
            ExprKind::Number(n) => Ok(Dual::constant(T::from(*n).unwrap_or_else(T::nan))),
            ExprKind::Variable(v) if v == var => Ok(x),
            ExprKind::Variable(v) => Err(DiffError::UnboundVariable {
                name: v.name().to_string(),
            }),
            ExprKind::Add(l, r) => Ok(l.eval_dual_inner(var, x)? + r.eval_dual_inner(var, x)?),
            ExprKind::Mul(l, r) => Ok(l.eval_dual_inner(var, x)? * r.eval_dual_inner(var, x)?),
            ExprKind::Call { func, args } => match (func, &args[..]) {
                (MathFn::Sin, [a]) => Ok(a.eval_dual_inner(var, x)?.sin()),
                (MathFn::Cos, [a]) => Ok(a.eval_dual_inner(var, x)?.cos()),
                (MathFn::Pow, [b, e]) => {
                    Ok(b.eval_dual_inner(var, x)?.pow(e.eval_dual_inner(var, x)?))
                }
                _ => Err(DiffError::invalid_shape(format!(
                    "{}() called with {} argument(s)",
                    func.name(),
                    args.len()
                ))),
            },
        }
    }
}
