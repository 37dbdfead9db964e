//! Runtime terms.
//!
//! The evaluator works on [`Term`], the source tree with spans and info
//! erased. Type ascriptions survive the conversion: they stay in the tree as
//! [`Term::Typed`] nodes but are transparent to substitution and are treated
//! as values by the evaluator.

use std::collections::HashSet;
use std::fmt;

use crate::ast::{Expr, Lit};
use crate::types::Type;

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Lit(Lit),
    Var(String),
    Lambda { binder: String, body: Box<Term> },
    App { func: Box<Term>, arg: Box<Term> },
    Typed { inner: Box<Term>, ty: Type },
}

impl Term {
    pub fn int(value: i64) -> Self {
        Term::Lit(Lit::Int(value))
    }

    pub fn bool(value: bool) -> Self {
        Term::Lit(Lit::Bool(value))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    pub fn lambda(binder: impl Into<String>, body: Term) -> Self {
        Term::Lambda {
            binder: binder.into(),
            body: Box::new(body),
        }
    }

    pub fn app(func: Term, arg: Term) -> Self {
        Term::App {
            func: Box::new(func),
            arg: Box::new(arg),
        }
    }

    pub fn typed(inner: Term, ty: Type) -> Self {
        Term::Typed {
            inner: Box::new(inner),
            ty,
        }
    }

    /// Erase spans and info from a source expression.
    pub fn from_expr<T>(expr: &Expr<T>) -> Term {
        match expr {
            Expr::Literal(lit) => Term::Lit(lit.value),
            Expr::Ident(ident) => Term::Var(ident.value.clone()),
            Expr::Lambda(lambda) => Term::Lambda {
                binder: lambda.binder.value.clone(),
                body: Box::new(Term::from_expr(&lambda.body)),
            },
            Expr::App(app) => Term::App {
                func: Box::new(Term::from_expr(&app.func)),
                arg: Box::new(Term::from_expr(&app.arg)),
            },
            Expr::Ascription(asc) => Term::Typed {
                inner: Box::new(Term::from_expr(&asc.expr)),
                ty: asc.ty.clone(),
            },
        }
    }

    /// The free term variables: occurrences not bound by an enclosing lambda.
    pub fn free_vars(&self) -> HashSet<String> {
        match self {
            Term::Lit(_) => HashSet::new(),
            Term::Var(name) => {
                let mut set = HashSet::new();
                set.insert(name.clone());
                set
            }
            Term::Lambda { binder, body } => {
                let mut set = body.free_vars();
                set.remove(binder);
                set
            }
            Term::App { func, arg } => {
                let mut set = func.free_vars();
                set.extend(arg.free_vars());
                set
            }
            Term::Typed { inner, .. } => inner.free_vars(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Lit(Lit::Int(n)) => write!(f, "{}", n),
            Term::Lit(Lit::Bool(b)) => write!(f, "{}", b),
            Term::Var(name) => write!(f, "{}", name),
            Term::Lambda { binder, body } => write!(f, "\\{}. {}", binder, body),
            Term::App { func, arg } => {
                match func.as_ref() {
                    Term::Lambda { .. } => write!(f, "({})", func)?,
                    _ => write!(f, "{}", func)?,
                }
                match arg.as_ref() {
                    Term::App { .. } | Term::Lambda { .. } => write!(f, " ({})", arg),
                    _ => write!(f, " {}", arg),
                }
            }
            Term::Typed { inner, ty } => write!(f, "({} : {})", inner, ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_vars_of_application_chain() {
        // x y z
        let term = Term::app(Term::app(Term::var("x"), Term::var("y")), Term::var("z"));
        let free = term.free_vars();
        assert_eq!(
            free,
            ["x", "y", "z"].iter().map(|s| s.to_string()).collect()
        );
    }

    #[test]
    fn test_free_vars_lambda_removes_binder() {
        // \x. x z
        let term = Term::lambda("x", Term::app(Term::var("x"), Term::var("z")));
        assert_eq!(term.free_vars(), ["z".to_string()].into_iter().collect());
    }

    #[test]
    fn test_free_vars_binder_only_scopes_body() {
        // (\x. x) x y z
        let term = Term::app(
            Term::app(
                Term::app(
                    Term::lambda("x", Term::var("x")),
                    Term::var("x"),
                ),
                Term::var("y"),
            ),
            Term::var("z"),
        );
        assert_eq!(
            term.free_vars(),
            ["x", "y", "z"].iter().map(|s| s.to_string()).collect()
        );
    }

    #[test]
    fn test_free_vars_typed_is_transparent() {
        let term = Term::typed(Term::var("x"), Type::Int);
        assert_eq!(term.free_vars(), ["x".to_string()].into_iter().collect());
    }

    #[test]
    fn test_from_expr_erases_annotations() {
        let expr = Expr::app(
            Expr::ascribe(Expr::lambda("x", Expr::ident("x")), Type::fun(Type::Int, Type::Int)),
            Expr::int(5),
        );
        let term = Term::from_expr(&expr);
        assert_eq!(
            term,
            Term::app(
                Term::typed(
                    Term::lambda("x", Term::var("x")),
                    Type::fun(Type::Int, Type::Int)
                ),
                Term::int(5)
            )
        );
    }

    #[test]
    fn test_display() {
        let term = Term::app(Term::lambda("x", Term::var("x")), Term::int(5));
        assert_eq!(term.to_string(), "(\\x. x) 5");
    }
}
