//! Splitting sums into terms and folding terms back into sums

use crate::{DiffError, Expr, ExprKind};

/// Flatten the additive structure of `expr` into its terms, left to right.
///
/// Nesting does not matter: `(a + b) + c` and `a + (b + c)` both give `[a, b, c]`.
/// A non-sum is a single term.
pub(crate) fn split_terms(expr: &Expr) -> Vec<&Expr> {
    let mut terms = Vec::new();
    collect_terms(expr, &mut terms);
    terms
}

fn collect_terms<'a>(expr: &'a Expr, terms: &mut Vec<&'a Expr>) {
    match &expr.kind {
        ExprKind::Add(l, r) => {
            collect_terms(l, terms);
            collect_terms(r, terms);
        }
        _ => terms.push(expr),
    }
}

/// Fold terms into a left-leaning sum `((t0 + t1) + t2) + ...`.
///
/// A single term is returned as is.
pub(crate) fn build_sum(terms: Vec<Expr>) -> Result<Expr, DiffError> {
    let mut iter = terms.into_iter();
    let first = iter.next().ok_or(DiffError::EmptyTermList)?;
    Ok(iter.fold(first, Expr::add_expr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Var;

    #[test]
    fn test_split_single() {
        let x = Var::new("x");
        let expr = x.sin();
        let terms = split_terms(&expr);
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0], &expr);
    }

    #[test]
    fn test_split_nesting_independent() {
        let x = Var::new("x");
        let (a, b, c) = (Expr::number(1.0), x.to_expr(), x.cos());

        let left = Expr::add_expr(Expr::add_expr(a.clone(), b.clone()), c.clone());
        let right = Expr::add_expr(a.clone(), Expr::add_expr(b.clone(), c.clone()));

        let expected = vec![&a, &b, &c];
        assert_eq!(split_terms(&left), expected);
        assert_eq!(split_terms(&right), expected);
    }

    #[test]
    fn test_split_does_not_enter_products() {
        let x = Var::new("x");
        let product = Expr::mul_expr(x.to_expr(), x.to_expr());
        let expr = Expr::add_expr(product.clone(), x.sin());
        let terms = split_terms(&expr);
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0], &product);
    }

    #[test]
    fn test_build_sum_left_fold() {
        let terms = vec![Expr::number(1.0), Expr::number(2.0), Expr::number(3.0)];
        let sum = build_sum(terms).unwrap();
        match &sum.kind {
            ExprKind::Add(l, r) => {
                assert_eq!(r.as_number(), Some(3.0));
                assert!(matches!(l.kind, ExprKind::Add(_, _)));
            }
            _ => panic!("Expected Add at the root"),
        }
        assert_eq!(format!("{}", sum), "1 + 2 + 3");
    }

    #[test]
    fn test_build_sum_single_and_empty() {
        let one = build_sum(vec![Expr::number(7.0)]).unwrap();
        assert_eq!(one.as_number(), Some(7.0));
        assert_eq!(build_sum(Vec::new()), Err(DiffError::EmptyTermList));
    }
}
