//! Differentiation engine
//!
//! A sum is differentiated term by term:
//!
//! ```text
//! split_terms ─▶ dispatch (per term) ─▶ build_sum
//!                   │
//!                   ├─ Number         → 0
//!                   ├─ Call           → trig rule (recurses into derive_sum for the argument)
//!                   └─ Variable / Mul → power rule
//! ```
//!
//! The variable handle is passed explicitly through every step; nothing here
//! keeps state between calls.

pub(crate) mod power;
pub(crate) mod terms;
pub(crate) mod trig;

use crate::{DiffError, Expr, ExprKind, Var};

pub use power::FunctionProperties;

/// Differentiate `expr` with respect to `var`: split, differentiate each term, rebuild.
pub(crate) fn derive_sum(expr: &Expr, var: &Var) -> Result<Expr, DiffError> {
    let terms = terms::split_terms(expr);
    let derived = terms
        .into_iter()
        .map(|term| dispatch(term, var))
        .collect::<Result<Vec<_>, _>>()?;
    terms::build_sum(derived)
}

/// Route one additive term to the rule that handles its shape
pub(crate) fn dispatch(term: &Expr, var: &Var) -> Result<Expr, DiffError> {
    let derived = match &term.kind {
        // Constant rule
        ExprKind::Number(_) => Ok(Expr::number(0.0)),
        ExprKind::Call { .. } => trig::differentiate_trig(term, var),
        ExprKind::Variable(_) | ExprKind::Mul(_, _) | ExprKind::Add(_, _) => {
            power::differentiate_power(term, var)
        }
    }?;
    tracing::trace!(term = %term, derivative = %derived, "differentiated term");
    Ok(derived)
}
