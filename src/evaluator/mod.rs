//! Compiled evaluator for fast numerical evaluation.
//!
//! Expression trees are lowered to flat bytecode bound to one variable, then run
//! on a small stack machine without walking the tree.
//!
//! ```text
//! ┌─────────────┐    ┌────────────┐    ┌─────────────────────┐
//! │    Expr     │ -> │  Compiler  │ -> │  CompiledEvaluator  │
//! │ (+ its Var) │    │ (Bytecode) │    │   (Stack Machine)   │
//! └─────────────┘    └────────────┘    └─────────────────────┘
//!                                              │
//!                          ┌───────────────────┼───────────────────┐
//!                          ▼                   ▼                   ▼
//!                    ┌──────────┐       ┌──────────┐       ┌──────────┐
//!                    │ evaluate │       │eval_batch│       │ parallel │
//!                    │ (scalar) │       │ (points) │       │  (Rayon) │
//!                    └──────────┘       └──────────┘       └──────────┘
//! ```

mod compiler;
mod execution;
mod instruction;

pub use compiler::{Compiler, MAX_STACK_DEPTH};
pub use instruction::Instruction;

use crate::{DiffError, Expr, Var};

/// Compiled single-variable function - immutable, thread-safe, reusable.
///
/// `CompiledEvaluator` is `Send + Sync`: all data is immutable after
/// construction and every evaluation uses its own stack.
#[derive(Debug, Clone)]
pub struct CompiledEvaluator {
    /// Bytecode instructions (immutable after compilation)
    instructions: Box<[Instruction]>,
    /// Constant pool for numeric literals
    constants: Box<[f64]>,
    /// Required stack depth for evaluation
    stack_size: usize,
    /// The variable this program reads through `LoadParam`
    param: Var,
}

impl CompiledEvaluator {
    /// Compile `expr` as a function of `param`.
    ///
    /// # Errors
    ///
    /// - `UnboundVariable`: the tree references another variable
    /// - `StackOverflow`: expression too deeply nested (> 1024 depth)
    /// - `InvalidExpressionShape`: a call with the wrong number of arguments
    pub fn compile(expr: &Expr, param: &Var) -> Result<Self, DiffError> {
        let mut compiler = Compiler::new(param);
        compiler.compile_expr(expr)?;
        let (instructions, constants, stack_size) = compiler.into_parts();

        tracing::debug!(
            nodes = expr.node_count(),
            instructions = instructions.len(),
            constants = constants.len(),
            stack_size,
            "compiled expression"
        );

        Ok(Self {
            instructions: instructions.into_boxed_slice(),
            constants: constants.into_boxed_slice(),
            stack_size,
            param: param.clone(),
        })
    }

    pub fn param(&self) -> &Var {
        &self.param
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn constants(&self) -> &[f64] {
        &self.constants
    }

    pub fn stack_size(&self) -> usize {
        self.stack_size
    }

    /// Borrow as a plain `Fn(f64) -> f64`
    pub fn as_fn(&self) -> impl Fn(f64) -> f64 + '_ {
        move |x| self.evaluate(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_evaluate_matches_tree() {
        let x = Var::new("x");
        let expr = 3.0 * x.clone() * x.clone() + (x.clone() * 2.0).sin() + x.cos();
        let eval = CompiledEvaluator::compile(&expr, &x).unwrap();

        for &p in &[-2.0, -0.5, 0.0, 0.3, 1.0, 4.25] {
            let tree = expr.evaluate(&x, p).unwrap();
            assert_abs_diff_eq!(eval.evaluate(p), tree, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_evaluate_deterministic() {
        let x = Var::new("x");
        let expr = Expr::pow(x.to_expr(), Expr::number(0.5)) * x.sin();
        let eval = CompiledEvaluator::compile(&expr, &x).unwrap();
        let a = eval.evaluate(1.7);
        let b = eval.evaluate(1.7);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_compiled_layout() {
        let x = Var::new("x");
        let expr = 2.0 * x.clone() + x.sin() * 2.0;
        let eval = CompiledEvaluator::compile(&expr, &x).unwrap();

        assert_eq!(eval.param(), &x);
        assert_eq!(eval.constants(), &[2.0]);
        assert_eq!(
            eval.instructions(),
            &[
                Instruction::LoadConst(0),
                Instruction::LoadParam,
                Instruction::Mul,
                Instruction::LoadParam,
                Instruction::Sin,
                Instruction::LoadConst(0),
                Instruction::Mul,
                Instruction::Add,
            ]
        );
        assert_eq!(eval.stack_size(), 3);
    }

    #[test]
    fn test_eval_batch() {
        let x = Var::new("x");
        let eval = CompiledEvaluator::compile(&(x.clone() + 1.0), &x).unwrap();
        assert_eq!(eval.eval_batch(&[0.0, 1.0, 2.5]), vec![1.0, 2.0, 3.5]);
        assert!(eval.eval_batch(&[]).is_empty());
    }

    #[test]
    fn test_as_fn() {
        let x = Var::new("x");
        let eval = CompiledEvaluator::compile(&(x.clone() * x.clone()), &x).unwrap();
        let f = eval.as_fn();
        let ys: Vec<f64> = [1.0, 2.0, 3.0].into_iter().map(f).collect();
        assert_eq!(ys, vec![1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_evaluator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompiledEvaluator>();
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_eval_batch_parallel_matches_sequential() {
        let x = Var::new("x");
        let expr = (x.clone() * x.clone()).sin() + x.cos();
        let eval = CompiledEvaluator::compile(&expr, &x).unwrap();
        let xs: Vec<f64> = (0..1000).map(|i| f64::from(i) * 0.01).collect();
        assert_eq!(eval.eval_batch_parallel(&xs), eval.eval_batch(&xs));
    }
}
