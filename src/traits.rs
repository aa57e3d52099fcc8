use num_traits::Float;
use std::fmt::{Debug, Display};

/// Scalars the numeric helpers are generic over.
///
/// Aggregates `num_traits::Float` (sin, cos, powf, ...) with the formatting
/// bounds needed for diagnostics. Implemented for `f32` and `f64`.
pub trait MathScalar: Float + Debug + Display + Send + Sync + 'static {}

// Blanket implementation for any type that satisfies the bounds
impl<T> MathScalar for T where T: Float + Debug + Display + Send + Sync + 'static {}
