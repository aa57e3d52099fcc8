//! Expression compiler for the bytecode evaluator.
//!
//! Lowers an [`Expr`] into a post-order stream of [`Instruction`]s in a single
//! pass, while tracking:
//! - Stack depth (to pre-size the evaluation stack and reject runaway trees)
//! - A constant pool de-duplicated by bit pattern
//!
//! # Example
//!
//! ```text
//! let mut compiler = Compiler::new(&var);
//! compiler.compile_expr(&expr)?;
//! let (instructions, constants, max_stack) = compiler.into_parts();
//! ```

use super::instruction::Instruction;
use crate::{DiffError, Expr, ExprKind, MathFn, Var};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// Maximum allowed stack depth to prevent deeply nested expressions from causing issues.
pub const MAX_STACK_DEPTH: usize = 1024;

pub struct Compiler<'a> {
    /// Emitted bytecode instructions
    instructions: Vec<Instruction>,
    /// The variable bound to `LoadParam`
    param: &'a Var,
    /// Current stack depth during compilation
    current_stack: usize,
    /// Maximum stack depth seen during compilation
    max_stack: usize,
    /// Constant pool for numeric literals
    constants: Vec<f64>,
    /// Map from constant bit pattern → pool index (deduplication)
    const_map: FxHashMap<u64, u32>,
}

impl<'a> Compiler<'a> {
    pub fn new(param: &'a Var) -> Self {
        Self {
            instructions: Vec::with_capacity(32),
            param,
            current_stack: 0,
            max_stack: 0,
            constants: Vec::new(),
            const_map: FxHashMap::default(),
        }
    }

    /// Add a constant to the pool, deduplicating by bit pattern.
    #[inline]
    fn add_const(&mut self, val: f64) -> u32 {
        match self.const_map.entry(val.to_bits()) {
            Entry::Occupied(o) => *o.get(),
            Entry::Vacant(v) => {
                // Pool size is bounded by the node count, far below u32::MAX
                let idx = self.constants.len() as u32;
                self.constants.push(val);
                v.insert(idx);
                idx
            }
        }
    }

    fn push(&mut self) -> Result<(), DiffError> {
        self.current_stack += 1;
        if self.current_stack > MAX_STACK_DEPTH {
            return Err(DiffError::StackOverflow {
                depth: self.current_stack,
                limit: MAX_STACK_DEPTH,
            });
        }
        self.max_stack = self.max_stack.max(self.current_stack);
        Ok(())
    }

    #[inline]
    fn pop(&mut self) {
        self.current_stack = self.current_stack.saturating_sub(1);
    }

    #[inline]
    fn emit(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    /// Compile `expr`, leaving exactly one value on the stack.
    pub fn compile_expr(&mut self, expr: &Expr) -> Result<(), DiffError> {
        match &expr.kind {
            ExprKind::Number(n) => {
                let idx = self.add_const(*n);
                self.emit(Instruction::LoadConst(idx));
                self.push()
            }
            ExprKind::Variable(v) => {
                if v != self.param {
                    return Err(DiffError::UnboundVariable {
                        name: v.name().to_string(),
                    });
                }
                self.emit(Instruction::LoadParam);
                self.push()
            }
            ExprKind::Add(l, r) => {
                self.compile_binary(l, r)?;
                self.emit(Instruction::Add);
                Ok(())
            }
            ExprKind::Mul(l, r) => {
                self.compile_binary(l, r)?;
                self.emit(Instruction::Mul);
                Ok(())
            }
            ExprKind::Call { func, args } => match (func, &args[..]) {
                (MathFn::Sin, [a]) => {
                    self.compile_expr(a)?;
                    self.emit(Instruction::Sin);
                    Ok(())
                }
                (MathFn::Cos, [a]) => {
                    self.compile_expr(a)?;
                    self.emit(Instruction::Cos);
                    Ok(())
                }
                (MathFn::Pow, [base, exp]) => {
                    self.compile_binary(base, exp)?;
                    self.emit(Instruction::Pow);
                    Ok(())
                }
                _ => Err(DiffError::invalid_shape(format!(
                    "{}() called with {} argument(s)",
                    func.name(),
                    args.len()
                ))),
            },
        }
    }

    /// Compile both operands; the binary instruction then folds two values into one
    fn compile_binary(&mut self, left: &Expr, right: &Expr) -> Result<(), DiffError> {
        self.compile_expr(left)?;
        self.compile_expr(right)?;
        self.pop();
        Ok(())
    }

    /// Consume the compiler and return `(instructions, constants, max_stack)`.
    pub fn into_parts(self) -> (Vec<Instruction>, Vec<f64>, usize) {
        debug_assert_eq!(
            self.instructions
                .iter()
                .map(|i| i.stack_effect())
                .sum::<isize>(),
            1,
            "compiled program must leave exactly one value"
        );
        (self.instructions, self.constants, self.max_stack)
    }
}
