//! Bytecode instruction set for the stack evaluator.

/// One stack-machine operation.
///
/// Operands are popped right-to-left: for `Pow`, the exponent is on top of the
/// stack and the base below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Push `constants[idx]`
    LoadConst(u32),
    /// Push the bound variable's value
    LoadParam,
    /// Pop `b`, pop `a`, push `a + b`
    Add,
    /// Pop `b`, pop `a`, push `a * b`
    Mul,
    /// Replace top with `sin(top)`
    Sin,
    /// Replace top with `cos(top)`
    Cos,
    /// Pop exponent, pop base, push `base.powf(exponent)`
    Pow,
}

impl Instruction {
    /// Net change in stack depth after executing this instruction
    pub(crate) const fn stack_effect(self) -> isize {
        match self {
            Instruction::LoadConst(_) | Instruction::LoadParam => 1,
            Instruction::Add | Instruction::Mul | Instruction::Pow => -1,
            Instruction::Sin | Instruction::Cos => 0,
        }
    }
}
