//! Trigonometric rules with chain-rule composition
//!
//! - `sin(u)' = cos(u) * u'`
//! - `cos(u)' = -1 * sin(u) * u'`
//!
//! When `u` is the bare variable the `u'` factor is left out.

use crate::{DiffError, Expr, ExprKind, MathFn, Var};

pub(crate) fn differentiate_trig(call: &Expr, var: &Var) -> Result<Expr, DiffError> {
    let ExprKind::Call { func, args } = &call.kind else {
        return Err(DiffError::invalid_shape(format!("'{}' is not a call", call)));
    };

    let (arg, base) = match (func, &args[..]) {
        (MathFn::Sin, [arg]) => (arg, arg.clone().cos()),
        (MathFn::Cos, [arg]) => (
            arg,
            Expr::mul_expr(Expr::number(-1.0), arg.clone().sin()),
        ),
        (MathFn::Pow, _) => return Err(DiffError::unsupported_function(func.name())),
        (MathFn::Sin | MathFn::Cos, _) => {
            return Err(DiffError::invalid_shape(format!(
                "{}() called with {} argument(s)",
                func.name(),
                args.len()
            )));
        }
    };

    if matches!(arg.kind, ExprKind::Variable(_)) {
        return Ok(base);
    }

    tracing::trace!(func = func.name(), argument = %arg, "applying chain rule");
    let inner = super::derive_sum(arg, var)?;
    Ok(Expr::mul_expr(base, inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sin_of_variable() {
        let x = Var::new("x");
        let d = differentiate_trig(&x.sin(), &x).unwrap();
        assert_eq!(d, x.cos());
    }

    #[test]
    fn test_cos_of_variable() {
        let x = Var::new("x");
        let d = differentiate_trig(&x.cos(), &x).unwrap();
        assert_eq!(format!("{}", d), "(-1) * sin(x)");
    }

    #[test]
    fn test_chain_rule_structure() {
        let x = Var::new("x");
        let expr = (x.clone() * x.clone()).sin();
        let d = differentiate_trig(&expr, &x).unwrap();
        assert_eq!(format!("{}", d), "cos(x * x) * 2 * pow(x, 1)");
    }

    #[test]
    fn test_pow_unsupported() {
        let x = Var::new("x");
        let expr = Expr::pow(x.to_expr(), Expr::number(2.0));
        assert_eq!(
            differentiate_trig(&expr, &x),
            Err(DiffError::UnsupportedFunction {
                name: "pow".to_string()
            })
        );
    }

    #[test]
    fn test_chain_rule_error_propagates() {
        let x = Var::new("x");
        let expr = Expr::pow(x.to_expr(), Expr::number(3.0)).sin();
        assert!(matches!(
            differentiate_trig(&expr, &x),
            Err(DiffError::UnsupportedFunction { .. })
        ));
    }
}
