use thiserror::Error;

/// Errors that can occur during differentiation and compilation
///
/// Every variant is terminal for the call that produced it: no partial
/// derivative is returned and the input tree is left untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiffError {
    // Differentiation errors
    /// A call node names a function without a differentiation rule
    #[error("Differentiation for the '{name}' function is not implemented")]
    UnsupportedFunction { name: String },

    /// A term reached the power rule that is not a product of constants and the variable
    #[error("Invalid expression shape for a power-rule term: {found}")]
    InvalidExpressionShape { found: String },

    /// The sum builder was handed nothing to fold
    #[error("Cannot build a sum from an empty term list")]
    EmptyTermList,

    // Compilation errors
    /// The tree references a variable other than the one being bound
    #[error("Variable '{name}' is not bound by this function")]
    UnboundVariable { name: String },

    #[error("Expression requires a stack depth of {depth}, limit is {limit}")]
    StackOverflow { depth: usize, limit: usize },

    // Safety limits
    #[error("Expression nesting depth exceeds maximum limit")]
    MaxDepthExceeded,

    #[error("Expression size exceeds maximum node count limit")]
    MaxNodesExceeded,
}

impl DiffError {
    pub fn unsupported_function(name: impl Into<String>) -> Self {
        DiffError::UnsupportedFunction { name: name.into() }
    }

    pub fn invalid_shape(found: impl Into<String>) -> Self {
        DiffError::InvalidExpressionShape {
            found: found.into(),
        }
    }
}
