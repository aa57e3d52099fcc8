// Display formatting for expression trees
use crate::{Expr, ExprKind};
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Number(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if *n > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else if n.fract() == 0.0 && n.abs() < 1e10 {
                    // Display as integer if no fractional part
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }

            ExprKind::Variable(v) => write!(f, "{}", v),

            ExprKind::Add(u, v) => write!(f, "{} + {}", u, v),

            ExprKind::Mul(u, v) => {
                write!(f, "{} * {}", format_mul_operand(u), format_mul_operand(v))
            }

            ExprKind::Call { func, args } => {
                let args_str: Vec<String> = args.iter().map(|arg| format!("{}", arg)).collect();
                write!(f, "{}({})", func.name(), args_str.join(", "))
            }
        }
    }
}

/// Sums inside products need parentheses; negative numbers too
fn format_mul_operand(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Add(_, _) => format!("({})", expr),
        ExprKind::Number(n) if *n < 0.0 => format!("({})", expr),
        _ => format!("{}", expr),
    }
}

#[cfg(test)]
mod tests {
    use crate::{Expr, Var};

    #[test]
    fn test_display_number() {
        assert_eq!(format!("{}", Expr::number(3.0)), "3");
        assert!(format!("{}", Expr::number(3.1)).starts_with("3.1"));
        assert_eq!(format!("{}", Expr::number(f64::NAN)), "NaN");
        assert_eq!(format!("{}", Expr::number(f64::INFINITY)), "Infinity");
    }

    #[test]
    fn test_display_tree() {
        let x = Var::new("x");
        let expr = 3.0 * x.clone() + x.clone().sin();
        assert_eq!(format!("{}", expr), "3 * x + sin(x)");

        let grouped = (x.clone() + 1.0) * x.clone();
        assert_eq!(format!("{}", grouped), "(x + 1) * x");

        let neg = Expr::mul_expr(Expr::number(-1.0), x.sin());
        assert_eq!(format!("{}", neg), "(-1) * sin(x)");

        let pow = Expr::pow(x.to_expr(), Expr::number(2.0));
        assert_eq!(format!("{}", pow), "pow(x, 2)");
    }
}
