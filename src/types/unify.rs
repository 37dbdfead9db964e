use std::fmt;

use super::subst::Substitution;
use super::ty::{Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyError {
    Mismatch { t1: Type, t2: Type },
    OccursCheck { var: TypeVar, ty: Type },
}

impl fmt::Display for UnifyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnifyError::Mismatch { t1, t2 } => {
                write!(f, "failed to unify {} with {}", t1.pretty(), t2.pretty())
            }
            UnifyError::OccursCheck { var, ty } => {
                write!(
                    f,
                    "occurs check: cannot construct infinite type {} = {}",
                    var,
                    ty.pretty()
                )
            }
        }
    }
}

/// Check whether a type variable occurs within a type.
///
/// Binding a variable to a type containing that same variable would require
/// an infinite type (`'t0 = 't0 -> Int`), so [`unify`] refuses it.
fn occurs_in(var: &TypeVar, ty: &Type) -> bool {
    match ty {
        Type::Int | Type::Bool | Type::Error => false,
        Type::Var(v) => v == var,
        Type::Fun(t1, t2) => occurs_in(var, t1) || occurs_in(var, t2),
    }
}

/// Bind a type variable, failing the occurs check if `ty` contains `var`.
fn var_bind(var: &TypeVar, ty: &Type) -> Result<Substitution, UnifyError> {
    if occurs_in(var, ty) {
        Err(UnifyError::OccursCheck {
            var: var.clone(),
            ty: ty.clone(),
        })
    } else {
        Ok(Substitution::singleton(var.clone(), ty.clone()))
    }
}

/// Unify two types, producing a substitution that makes them equal.
///
/// Structural recursion:
/// - the error sentinel unifies with nothing, itself included; callers are
///   expected to intercept it before unifying, and if one slips through it
///   fails here rather than silently succeeding on the equality fast path
/// - identical types unify with the empty substitution
/// - a type variable binds to the other side via [`var_bind`]
/// - function types unify argument-first, with the argument substitution
///   applied to both result sides before unifying them; the result is the
///   composition `s2 ∘ s1`
/// - everything else is a mismatch
///
/// Soundness: if `unify(t1, t2)` returns `Ok(s)` then
/// `s.apply(t1) == s.apply(t2)`.
pub fn unify(t1: &Type, t2: &Type) -> Result<Substitution, UnifyError> {
    match (t1, t2) {
        // Sentinel branch before the equality fast path
        (Type::Error, _) | (_, Type::Error) => Err(UnifyError::Mismatch {
            t1: t1.clone(),
            t2: t2.clone(),
        }),

        _ if t1 == t2 => Ok(Substitution::empty()),

        (Type::Var(v), t) | (t, Type::Var(v)) => var_bind(v, t),

        (Type::Fun(a1, r1), Type::Fun(a2, r2)) => {
            let s1 = unify(a1, a2)?;
            let s2 = unify(&s1.apply(r1), &s1.apply(r2))?;
            Ok(s2.compose(&s1))
        }

        _ => Err(UnifyError::Mismatch {
            t1: t1.clone(),
            t2: t2.clone(),
        }),
    }
}
