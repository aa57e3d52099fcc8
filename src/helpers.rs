//! Numerical cross-checks for computed derivatives
//!
//! Compares a [`Derivative`] against a central finite difference of the
//! original function.

use crate::traits::MathScalar;
use crate::{Derivative, DiffError, Lambda};

/// Central finite difference `(f(x + h) - f(x - h)) / 2h`
pub fn central_difference<T, F>(f: F, x: T, h: T) -> T
where
    T: MathScalar,
    F: Fn(T) -> T,
{
    let two = T::one() + T::one();
    (f(x + h) - f(x - h)) / (two * h)
}

/// Largest absolute gap between `derivative` and a central difference of
/// `function` over `points`.
///
/// The original function is evaluated by walking its tree. Points where either
/// side is not finite are skipped.
///
/// # Example
/// ```ignore
/// let err = max_finite_difference_error(&f, &df, &[0.1, 0.5, 2.0], 1e-5)?;
/// assert!(err < 1e-4);
/// ```
pub fn max_finite_difference_error(
    function: &Lambda,
    derivative: &Derivative,
    points: &[f64],
    h: f64,
) -> Result<f64, DiffError> {
    let mut worst = 0.0_f64;
    for &x in points {
        // Unbound variables and bad call shapes fail regardless of the point
        function.body.evaluate(&function.param, x)?;
        let numeric = central_difference(
            |t| function.body.evaluate(&function.param, t).unwrap_or(f64::NAN),
            x,
            h,
        );
        let symbolic = derivative.eval(x);
        if numeric.is_finite() && symbolic.is_finite() {
            worst = worst.max((numeric - symbolic).abs());
        }
    }
    Ok(worst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diff, Var};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_central_difference() {
        let d = central_difference(|x: f64| x * x, 3.0, 1e-4);
        assert_abs_diff_eq!(d, 6.0, epsilon = 1e-8);

        let d32 = central_difference(|x: f32| x.sin(), 0.0, 1e-3);
        assert_abs_diff_eq!(d32, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_max_finite_difference_error() {
        let x = Var::new("x");
        let f = Lambda::new(x.clone(), 2.0 * x.clone() * x.clone() + x.cos());
        let df = Diff::new().differentiate(&f).unwrap();
        let err = max_finite_difference_error(&f, &df, &[-1.5, 0.2, 0.7, 3.0], 1e-5).unwrap();
        assert!(err < 1e-4, "error too large: {}", err);
    }

    #[test]
    fn test_finite_difference_reports_foreign_variable() {
        let x = Var::new("x");
        let y = Var::new("y");
        let df = Diff::new()
            .differentiate(&Lambda::new(x.clone(), x.sin()))
            .unwrap();
        let g = Lambda::new(x.clone(), x.clone() + y);
        assert_eq!(
            max_finite_difference_error(&g, &df, &[0.5], 1e-5),
            Err(DiffError::UnboundVariable {
                name: "y".to_string()
            })
        );
    }

    #[test]
    fn test_finite_difference_matches_central_difference() {
        let x = Var::new("x");
        let f = Lambda::new(x.clone(), x.clone() * x.clone() * x.clone());
        let df = Diff::new().differentiate(&f).unwrap();
        let h = 1e-3;
        let err = max_finite_difference_error(&f, &df, &[2.0], h).unwrap();
        // x³: the central difference overshoots by exactly h²
        let numeric = central_difference(|t: f64| t * t * t, 2.0, h);
        assert_abs_diff_eq!(err, (numeric - 12.0).abs(), epsilon = 1e-9);
        assert_abs_diff_eq!(err, h * h, epsilon = 1e-9);
    }
}
