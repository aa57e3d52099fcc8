//! Expression trees for single-variable real functions

use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashSet;

use crate::{DiffError, Var};

/// Global counter for expression IDs
static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    EXPR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// The closed set of functions a call node may name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFn {
    Sin,
    Cos,
    /// Real power `pow(base, exponent)`, produced by the power rule
    Pow,
}

impl MathFn {
    /// Look up a function by its lowercase name
    pub fn from_name(name: &str) -> Result<Self, DiffError> {
        match name {
            "sin" => Ok(MathFn::Sin),
            "cos" => Ok(MathFn::Cos),
            "pow" => Ok(MathFn::Pow),
            _ => Err(DiffError::unsupported_function(name)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MathFn::Sin => "sin",
            MathFn::Cos => "cos",
            MathFn::Pow => "pow",
        }
    }

    /// Number of arguments the function takes
    pub fn arity(self) -> usize {
        match self {
            MathFn::Sin | MathFn::Cos => 1,
            MathFn::Pow => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Expr {
    /// Unique ID for debugging (not used in equality comparisons)
    pub id: u64,
    pub kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

// Structural equality on KIND only
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Constant number (e.g., 3.14, -1)
    Number(f64),

    /// The free variable of the function
    Variable(Var),

    /// Addition
    Add(Arc<Expr>, Arc<Expr>),

    /// Multiplication
    Mul(Arc<Expr>, Arc<Expr>),

    /// Call of a function from the closed [`MathFn`] set
    Call { func: MathFn, args: Arc<[Expr]> },
}

/// A function literal: a body together with its declared variable
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub param: Var,
    pub body: Expr,
}

impl Lambda {
    pub fn new(param: Var, body: impl Into<Expr>) -> Self {
        Lambda {
            param,
            body: body.into(),
        }
    }
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr {
            id: next_id(),
            kind,
        }
    }

    // Convenience constructors

    /// Create a number expression
    pub fn number(n: f64) -> Self {
        Expr::new(ExprKind::Number(n))
    }

    /// Create a variable reference
    pub fn var(v: &Var) -> Self {
        Expr::new(ExprKind::Variable(v.clone()))
    }

    /// Create an addition expression
    pub fn add_expr(left: Expr, right: Expr) -> Self {
        Expr::new(ExprKind::Add(Arc::new(left), Arc::new(right)))
    }

    /// Create a multiplication expression
    pub fn mul_expr(left: Expr, right: Expr) -> Self {
        Expr::new(ExprKind::Mul(Arc::new(left), Arc::new(right)))
    }

    pub fn sin(self) -> Self {
        Expr::new(ExprKind::Call {
            func: MathFn::Sin,
            args: Arc::from([self]),
        })
    }

    pub fn cos(self) -> Self {
        Expr::new(ExprKind::Call {
            func: MathFn::Cos,
            args: Arc::from([self]),
        })
    }

    /// Create a `pow(base, exponent)` call
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        Expr::new(ExprKind::Call {
            func: MathFn::Pow,
            args: Arc::from([base, exponent]),
        })
    }

    /// Create a function call, checking the argument count
    pub fn call(func: MathFn, args: Vec<Expr>) -> Result<Self, DiffError> {
        if args.len() != func.arity() {
            return Err(DiffError::invalid_shape(format!(
                "{}() expects {} argument(s), got {}",
                func.name(),
                func.arity(),
                args.len()
            )));
        }
        Ok(Expr::new(ExprKind::Call {
            func,
            args: Arc::from(args),
        }))
    }

    /// Create a function call by name
    ///
    /// # Example
    /// ```ignore
    /// let x = Var::new("x");
    /// assert!(Expr::call_named("sin", vec![x.to_expr()]).is_ok());
    /// assert!(Expr::call_named("tan", vec![x.to_expr()]).is_err());
    /// ```
    pub fn call_named(name: &str, args: Vec<Expr>) -> Result<Self, DiffError> {
        Expr::call(MathFn::from_name(name)?, args)
    }

    /// Fold a sequence of terms into a left-leaning sum
    pub fn sum(terms: Vec<Expr>) -> Result<Self, DiffError> {
        crate::diff::terms::build_sum(terms)
    }

    // Accessor methods

    pub fn as_number(&self) -> Option<f64> {
        match &self.kind {
            ExprKind::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_var(&self) -> Option<&Var> {
        match &self.kind {
            ExprKind::Variable(v) => Some(v),
            _ => None,
        }
    }

    // Analysis methods

    /// Count the total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        match &self.kind {
            ExprKind::Number(_) | ExprKind::Variable(_) => 1,
            ExprKind::Add(l, r) | ExprKind::Mul(l, r) => 1 + l.node_count() + r.node_count(),
            ExprKind::Call { args, .. } => 1 + args.iter().map(Expr::node_count).sum::<usize>(),
        }
    }

    /// Get the maximum nesting depth of the tree
    pub fn max_depth(&self) -> usize {
        match &self.kind {
            ExprKind::Number(_) | ExprKind::Variable(_) => 1,
            ExprKind::Add(l, r) | ExprKind::Mul(l, r) => 1 + l.max_depth().max(r.max_depth()),
            ExprKind::Call { args, .. } => {
                1 + args.iter().map(Expr::max_depth).max().unwrap_or(0)
            }
        }
    }

    /// Check if the expression references a specific variable
    pub fn contains_var(&self, var: &Var) -> bool {
        match &self.kind {
            ExprKind::Number(_) => false,
            ExprKind::Variable(v) => v == var,
            ExprKind::Add(l, r) | ExprKind::Mul(l, r) => l.contains_var(var) || r.contains_var(var),
            ExprKind::Call { args, .. } => args.iter().any(|a| a.contains_var(var)),
        }
    }

    /// Distinct variables in the expression, in first-seen (pre-order) order
    pub fn variables(&self) -> Vec<Var> {
        let mut seen = FxHashSet::default();
        let mut vars = Vec::new();
        self.collect_variables(&mut seen, &mut vars);
        vars
    }

    fn collect_variables(&self, seen: &mut FxHashSet<Var>, vars: &mut Vec<Var>) {
        match &self.kind {
            ExprKind::Variable(v) => {
                if seen.insert(v.clone()) {
                    vars.push(v.clone());
                }
            }
            ExprKind::Add(l, r) | ExprKind::Mul(l, r) => {
                l.collect_variables(seen, vars);
                r.collect_variables(seen, vars);
            }
            ExprKind::Call { args, .. } => {
                for arg in args.iter() {
                    arg.collect_variables(seen, vars);
                }
            }
            ExprKind::Number(_) => {}
        }
    }

    /// Evaluate the tree directly with `var = x`
    ///
    /// Reference semantics for [`crate::CompiledEvaluator`]; prefer the compiled
    /// form when evaluating many points.
    pub fn evaluate(&self, var: &Var, x: f64) -> Result<f64, DiffError> {
        match &self.kind {
            ExprKind::Number(n) => Ok(*n),
            ExprKind::Variable(v) if v == var => Ok(x),
            ExprKind::Variable(v) => Err(DiffError::UnboundVariable {
                name: v.name().to_string(),
            }),
            ExprKind::Add(l, r) => Ok(l.evaluate(var, x)? + r.evaluate(var, x)?),
            ExprKind::Mul(l, r) => Ok(l.evaluate(var, x)? * r.evaluate(var, x)?),
            ExprKind::Call { func, args } => match (func, &args[..]) {
                (MathFn::Sin, [a]) => Ok(a.evaluate(var, x)?.sin()),
                (MathFn::Cos, [a]) => Ok(a.evaluate(var, x)?.cos()),
                (MathFn::Pow, [b, e]) => Ok(b.evaluate(var, x)?.powf(e.evaluate(var, x)?)),
                _ => Err(DiffError::invalid_shape(format!(
                    "{}() called with {} argument(s)",
                    func.name(),
                    args.len()
                ))),
            },
        }
    }
}
