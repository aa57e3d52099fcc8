//! Variable handles and operator overloading for ergonomic expression building
//!
//! # Example
//! ```ignore
//! use symb_deriv::Var;
//!
//! let x = Var::new("x");
//! let expr = 3.0 * x.clone() * x.clone() + x.sin();  // 3*x*x + sin(x)
//! ```

use crate::Expr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter used to mint variable identities
static VAR_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_var_id() -> u64 {
    VAR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Handle to the single free variable of a function.
///
/// Every call to [`Var::new`] mints a new identity, so two handles named `"x"`
/// created separately are *different* variables. Cloning a handle keeps the
/// identity. Equality and hashing only look at the identity, never the name.
#[derive(Clone)]
pub struct Var {
    id: u64,
    name: Arc<str>,
}

impl Var {
    /// Create a fresh variable with the given display name
    pub fn new(name: impl AsRef<str>) -> Self {
        Var {
            id: next_var_id(),
            name: Arc::from(name.as_ref()),
        }
    }

    /// Unique identity of this variable
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Display name of this variable
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Convert to an Expr
    pub fn to_expr(&self) -> Expr {
        Expr::var(self)
    }

    pub fn sin(&self) -> Expr {
        Expr::sin(self.to_expr())
    }

    pub fn cos(&self) -> Expr {
        Expr::cos(self.to_expr())
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Var {}

impl Hash for Var {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<Var> for Expr {
    fn from(v: Var) -> Self {
        v.to_expr()
    }
}

impl From<&Var> for Expr {
    fn from(v: &Var) -> Self {
        v.to_expr()
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::number(n)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Expr::number(f64::from(n))
    }
}

// ===== Operator overloading =====
// Only `+` and `*`: the node set has no subtraction or division.

macro_rules! impl_binary_ops {
    ($lhs:ty, $rhs:ty, $to_lhs:expr, $to_rhs:expr) => {
        impl Add<$rhs> for $lhs {
            type Output = Expr;
            fn add(self, rhs: $rhs) -> Expr {
                Expr::add_expr($to_lhs(self), $to_rhs(rhs))
            }
        }
        impl Mul<$rhs> for $lhs {
            type Output = Expr;
            fn mul(self, rhs: $rhs) -> Expr {
                Expr::mul_expr($to_lhs(self), $to_rhs(rhs))
            }
        }
    };
}

impl_binary_ops!(Var, Var, |s: Var| s.to_expr(), |r: Var| r.to_expr());
impl_binary_ops!(Var, Expr, |s: Var| s.to_expr(), |r: Expr| r);
impl_binary_ops!(Var, f64, |s: Var| s.to_expr(), |r: f64| Expr::number(r));

impl_binary_ops!(Expr, Expr, |s: Expr| s, |r: Expr| r);
impl_binary_ops!(Expr, Var, |s: Expr| s, |r: Var| r.to_expr());
impl_binary_ops!(Expr, f64, |s: Expr| s, |r: f64| Expr::number(r));

impl_binary_ops!(f64, Var, |s: f64| Expr::number(s), |r: Var| r.to_expr());
impl_binary_ops!(f64, Expr, |s: f64| Expr::number(s), |r: Expr| r);
