//! Builder pattern API for differentiation
//!
//! Provides a fluent interface for configuring and executing differentiation.
//!
//! # Example
//! ```ignore
//! use symb_deriv::{Diff, Lambda, Var};
//!
//! let x = Var::new("x");
//! let f = Lambda::new(x.clone(), x.clone() * x.clone() + x.sin());
//!
//! let derivative = Diff::new().max_depth(50).differentiate(&f)?;
//! assert_eq!(derivative.eval(0.0), 1.0);
//! ```

use crate::evaluator::CompiledEvaluator;
use crate::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, DiffError, Expr, Lambda, Var, diff};

/// Builder for differentiation operations
#[derive(Debug, Clone)]
pub struct Diff {
    max_depth: usize,
    max_nodes: usize,
}

impl Default for Diff {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

impl Diff {
    /// Create a new differentiation builder with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum tree depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set maximum tree node count
    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = nodes;
        self
    }

    fn check_limits(&self, expr: &Expr) -> Result<(), DiffError> {
        if expr.max_depth() > self.max_depth {
            return Err(DiffError::MaxDepthExceeded);
        }
        if expr.node_count() > self.max_nodes {
            return Err(DiffError::MaxNodesExceeded);
        }
        Ok(())
    }

    /// Differentiate a tree with respect to `var`, returning the derivative tree only
    ///
    /// # Errors
    /// - `MaxDepthExceeded` / `MaxNodesExceeded` when the input is over the limits
    /// - `UnboundVariable` when the tree references a variable other than `var`
    /// - `UnsupportedFunction`, `InvalidExpressionShape`, `EmptyTermList` from the rules
    pub fn derive_expr(&self, expr: &Expr, var: &Var) -> Result<Expr, DiffError> {
        self.check_limits(expr)?;

        if let Some(stranger) = expr.variables().into_iter().find(|v| v != var) {
            return Err(DiffError::UnboundVariable {
                name: stranger.name().to_string(),
            });
        }

        diff::derive_sum(expr, var)
    }

    /// Differentiate a function and compile the result
    ///
    /// # Example
    /// ```ignore
    /// let x = Var::new("x");
    /// let f = Lambda::new(x.clone(), (x.clone() * x.clone()).sin());
    /// let df = Diff::new().differentiate(&f)?;
    /// assert!((df.eval(1.0) - 1.0_f64.cos() * 2.0).abs() < 1e-12);
    /// ```
    pub fn differentiate(&self, function: &Lambda) -> Result<Derivative, DiffError> {
        tracing::debug!(
            function = %function.body,
            var = %function.param,
            nodes = function.body.node_count(),
            "differentiating"
        );

        let body = self.derive_expr(&function.body, &function.param)?;
        let evaluator = CompiledEvaluator::compile(&body, &function.param)?;

        tracing::debug!(derivative = %body, nodes = body.node_count(), "differentiated");

        Ok(Derivative {
            function: Lambda::new(function.param.clone(), body),
            evaluator,
        })
    }
}

/// A derivative: its tree (as a function of the original variable) and compiled form
#[derive(Debug, Clone)]
pub struct Derivative {
    function: Lambda,
    evaluator: CompiledEvaluator,
}

impl Derivative {
    /// Evaluate the derivative at `x`
    #[inline]
    pub fn eval(&self, x: f64) -> f64 {
        self.evaluator.evaluate(x)
    }

    /// The derivative as a function literal, ready to be differentiated again
    pub fn lambda(&self) -> &Lambda {
        &self.function
    }

    /// The derivative tree
    pub fn expr(&self) -> &Expr {
        &self.function.body
    }

    pub fn evaluator(&self) -> &CompiledEvaluator {
        &self.evaluator
    }

    /// Borrow as a plain `Fn(f64) -> f64`
    pub fn as_fn(&self) -> impl Fn(f64) -> f64 + '_ {
        self.evaluator.as_fn()
    }

    pub fn into_parts(self) -> (Lambda, CompiledEvaluator) {
        (self.function, self.evaluator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_builder_basic() {
        let x = Var::new("x");
        let f = Lambda::new(x.clone(), x.clone() * x.clone());
        let df = Diff::new().differentiate(&f).unwrap();
        assert_eq!(format!("{}", df.expr()), "2 * pow(x, 1)");
        assert_eq!(df.eval(2.0), 4.0);
        assert_eq!(df.lambda().param, x);
    }

    #[test]
    fn test_depth_limit() {
        let x = Var::new("x");
        let mut nested = x.to_expr();
        for _ in 0..20 {
            nested = nested.sin();
        }

        let f = Lambda::new(x.clone(), nested);
        assert!(Diff::new().differentiate(&f).is_ok());
        assert!(matches!(
            Diff::new().max_depth(5).differentiate(&f),
            Err(DiffError::MaxDepthExceeded)
        ));
    }

    #[test]
    fn test_node_limit() {
        let x = Var::new("x");
        let terms: Vec<Expr> = (1..=20).map(|i| f64::from(i) * x.clone()).collect();
        let f = Lambda::new(x.clone(), Expr::sum(terms).unwrap());
        assert!(matches!(
            Diff::new().max_nodes(50).differentiate(&f),
            Err(DiffError::MaxNodesExceeded)
        ));
    }

    #[test]
    fn test_foreign_variable_rejected_before_work() {
        let x = Var::new("x");
        let y = Var::new("y");
        assert_eq!(
            Diff::new().derive_expr(&(x.clone() + y.clone()), &x),
            Err(DiffError::UnboundVariable {
                name: "y".to_string()
            })
        );
    }

    #[test]
    fn test_same_name_different_identity() {
        let x = Var::new("x");
        let other_x = Var::new("x");
        let f = Lambda::new(x, other_x.sin());
        assert!(matches!(
            Diff::new().differentiate(&f),
            Err(DiffError::UnboundVariable { .. })
        ));
    }

    #[test]
    fn test_into_parts() {
        let x = Var::new("x");
        let df = Diff::new()
            .differentiate(&Lambda::new(x.clone(), x.sin()))
            .unwrap();
        let (lambda, evaluator) = df.into_parts();
        assert_eq!(lambda.body, x.cos());
        assert_eq!(evaluator.evaluate(0.0), 1.0);
    }
}
