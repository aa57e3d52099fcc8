//! Symbolic Differentiation of Single-Variable Functions
//!
//! Exact derivatives of expression trees built from constants, one variable,
//! `+`, `*`, `sin` and `cos`, compiled into fast `f64 -> f64` evaluators.
//!
//! # Features
//! - Sum, power and chain rules over arbitrarily nested sums
//! - Trigonometric calls with composed arguments (`sin(x * x)`, `cos(sin(x))`)
//! - Bytecode compilation of the derivative with batch and parallel evaluation
//! - Dual-number and finite-difference cross-checks
//!
//! # Usage
//! ```ignore
//! use symb_deriv::{differentiate, Lambda, Var};
//!
//! let x = Var::new("x");
//! let f = Lambda::new(x.clone(), (x.clone() * x.clone()).sin());
//!
//! let df = differentiate(&f)?;          // cos(x * x) * 2 * pow(x, 1)
//! println!("{}", df.expr());
//! assert!((df.eval(1.0) - 1.0806).abs() < 1e-4);
//! ```
//!
//! # Literal power rule
//!
//! Product terms are read as `c * x^p` by *summing* their constant leaves and
//! counting their variable leaves; a summed coefficient of `0` is read as `1`.
//! No simplification is performed on results.

mod ast;
mod builder;
mod diff;
mod display;
mod error;
pub mod evaluator;
pub mod helpers;
pub mod math;
mod symbol;
pub mod traits;


pub use ast::{Expr, ExprKind, Lambda, MathFn};
pub use builder::{Derivative, Diff};
pub use diff::FunctionProperties;
pub use error::DiffError;
pub use evaluator::CompiledEvaluator;
pub use symbol::Var;

/// Default maximum tree depth
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// Default maximum tree node count
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// Differentiate a function and compile the derivative, using default limits
///
/// # Example
/// ```ignore
/// let x = Var::new("x");
/// let df = differentiate(&Lambda::new(x.clone(), 3.0 * x.clone()))?;
/// assert_eq!(df.eval(10.0), 3.0);
/// ```
pub fn differentiate(function: &Lambda) -> Result<Derivative, DiffError> {
    Diff::new().differentiate(function)
}

/// Differentiate a tree with respect to `var`, using default limits
pub fn derive(expr: &Expr, var: &Var) -> Result<Expr, DiffError> {
    Diff::new().derive_expr(expr, var)
}
