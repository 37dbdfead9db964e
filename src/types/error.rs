//! Type error definitions.
//!
//! All four kinds are recoverable at the point of detection: the inference
//! engine records the error, annotates the offending subterm with the error
//! sentinel and keeps going, so one pass can surface several independent
//! errors. Every error carries the source span of the node that produced it.

use std::fmt;

use crate::ast::Span;

use super::ty::{Type, TypeVar};
use super::unify::UnifyError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// Two concrete types that cannot be made equal.
    Unification { t1: Type, t2: Type, span: Span },

    /// Reference to an unbound identifier.
    UnknownVar { name: String, span: Span },

    /// Binding a type variable to a type containing itself, which would
    /// require an infinite type.
    OccursCheck { var: TypeVar, ty: Type, span: Span },

    /// A type ascription mentioning free type variables. Ascriptions are
    /// expected to be closed; an open one is reported rather than treated as
    /// a fatal contract violation.
    OpenAscription { ty: Type, span: Span },
}

impl TypeError {
    pub fn unification(t1: Type, t2: Type, span: Span) -> Self {
        TypeError::Unification { t1, t2, span }
    }

    pub fn unknown_var(name: String, span: Span) -> Self {
        TypeError::UnknownVar { name, span }
    }

    pub fn occurs_check(var: TypeVar, ty: Type, span: Span) -> Self {
        TypeError::OccursCheck { var, ty, span }
    }

    pub fn open_ascription(ty: Type, span: Span) -> Self {
        TypeError::OpenAscription { ty, span }
    }

    /// Attach a source span to a unification failure.
    pub fn from_unify_error(err: UnifyError, span: Span) -> Self {
        match err {
            UnifyError::Mismatch { t1, t2 } => TypeError::unification(t1, t2, span),
            UnifyError::OccursCheck { var, ty } => TypeError::occurs_check(var, ty, span),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TypeError::Unification { span, .. }
            | TypeError::UnknownVar { span, .. }
            | TypeError::OccursCheck { span, .. }
            | TypeError::OpenAscription { span, .. } => *span,
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            TypeError::Unification { t1, t2, .. } => {
                format!("failed to unify {} with {}", t1.pretty(), t2.pretty())
            }
            TypeError::UnknownVar { name, .. } => format!("unknown variable: {}", name),
            TypeError::OccursCheck { var, ty, .. } => format!(
                "cannot construct infinite type: {} = {}",
                var,
                ty.pretty()
            ),
            TypeError::OpenAscription { ty, .. } => format!(
                "type ascription {} contains free type variables",
                ty.pretty()
            ),
        };
        let span = self.span();
        if span.is_dummy() {
            write!(f, "Type error: {}", msg)
        } else {
            write!(f, "Type error: {} at {}", msg, span)
        }
    }
}

impl std::error::Error for TypeError {}
