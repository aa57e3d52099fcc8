//! Scalar and batch evaluation for the bytecode evaluator.
//!
//! The compiler guarantees every program is balanced, so pops never underflow
//! on compiled bytecode. Should that invariant ever break, debug builds panic
//! and release builds yield `NaN`.

use super::CompiledEvaluator;
use super::instruction::Instruction;

impl CompiledEvaluator {
    /// Evaluate at a single point.
    ///
    /// Pure and deterministic: the same `x` always gives a bit-identical result.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let x = Var::new("x");
    /// let eval = CompiledEvaluator::compile(&(x.clone() * x.clone()), &x)?;
    /// assert_eq!(eval.evaluate(3.0), 9.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let mut stack = Vec::with_capacity(self.stack_size);
        self.evaluate_with_stack(x, &mut stack)
    }

    /// Evaluate reusing a caller-provided stack buffer (cleared first).
    pub(crate) fn evaluate_with_stack(&self, x: f64, stack: &mut Vec<f64>) -> f64 {
        stack.clear();
        let consts = &*self.constants;

        for instr in self.instructions.iter() {
            match *instr {
                Instruction::LoadConst(c) => stack.push(consts[c as usize]),
                Instruction::LoadParam => stack.push(x),
                Instruction::Add => {
                    let (a, b) = pop_two(stack);
                    stack.push(a + b);
                }
                Instruction::Mul => {
                    let (a, b) = pop_two(stack);
                    stack.push(a * b);
                }
                Instruction::Pow => {
                    let (base, exp) = pop_two(stack);
                    stack.push(base.powf(exp));
                }
                Instruction::Sin => {
                    let a = pop_one(stack);
                    stack.push(a.sin());
                }
                Instruction::Cos => {
                    let a = pop_one(stack);
                    stack.push(a.cos());
                }
            }
        }

        debug_assert_eq!(stack.len(), 1, "unbalanced bytecode");
        pop_one(stack)
    }

    /// Evaluate at many points, reusing one stack buffer.
    pub fn eval_batch(&self, xs: &[f64]) -> Vec<f64> {
        let mut stack = Vec::with_capacity(self.stack_size);
        xs.iter()
            .map(|&x| self.evaluate_with_stack(x, &mut stack))
            .collect()
    }

    /// Evaluate at many points across the rayon thread pool.
    ///
    /// Small inputs are evaluated sequentially.
    #[cfg(feature = "parallel")]
    pub fn eval_batch_parallel(&self, xs: &[f64]) -> Vec<f64> {
        use rayon::prelude::*;

        const MIN_PARALLEL_SIZE: usize = 256;
        if xs.len() < MIN_PARALLEL_SIZE {
            return self.eval_batch(xs);
        }

        xs.par_iter()
            .map_init(
                || Vec::with_capacity(self.stack_size),
                |stack, &x| self.evaluate_with_stack(x, stack),
            )
            .collect()
    }
}

#[inline]
fn pop_one(stack: &mut Vec<f64>) -> f64 {
    let top = stack.pop();
    debug_assert!(top.is_some(), "stack underflow");
    top.unwrap_or(f64::NAN)
}

#[inline]
fn pop_two(stack: &mut Vec<f64>) -> (f64, f64) {
    let b = pop_one(stack);
    let a = pop_one(stack);
    (a, b)
}
