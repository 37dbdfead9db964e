//! Source expression trees.
//!
//! This is the parse-time representation handed to the crate by an external
//! parser. Every node carries a [`Span`] locating it in the source text and a
//! generic `info` payload:
//!
//! - **Before type checking**: `Expr<()>` (no type info)
//! - **After type checking**: `Expr<Type>` (every node annotated with its
//!   inferred type)
//!
//! The evaluator does not consume this tree directly; it works on
//! [`crate::interpreter::Term`], which erases spans and info.

use crate::types::Type;

/// Byte range into the original source text.
///
/// The default span is the "dummy" span used for synthesized nodes that have
/// no source location (e.g. trees built programmatically in tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Whether this span was synthesized rather than produced by a parser.
    pub fn is_dummy(&self) -> bool {
        *self == Span::default()
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Literal values shared by the source tree and the runtime term language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lit {
    Int(i64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<T> {
    Literal(Literal<T>),
    Ident(Ident<T>),
    Lambda(Lambda<T>),
    App(App<T>),
    Ascription(Ascription<T>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Literal<T> {
    pub value: Lit,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ident<T> {
    pub value: String,
    pub position: Span,
    pub info: T,
}

/// Lambda abstraction with exactly one binder.
///
/// Within a single lambda the binder scopes exactly the free occurrences of
/// that identifier inside `body` not shadowed by a nested lambda with the
/// same binder.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda<T> {
    pub binder: Ident<T>,
    pub body: Box<Expr<T>>,
    pub position: Span,
    pub info: T,
}

/// Function application with exactly one argument.
#[derive(Debug, Clone, PartialEq)]
pub struct App<T> {
    pub func: Box<Expr<T>>,
    pub arg: Box<Expr<T>>,
    pub position: Span,
    pub info: T,
}

/// A type-ascribed expression, `e : ty`.
///
/// The annotation is checked by inference but is transparent to evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Ascription<T> {
    pub expr: Box<Expr<T>>,
    pub ty: Type,
    pub position: Span,
    pub info: T,
}

impl<T> Expr<T> {
    pub fn position(&self) -> Span {
        match self {
            Expr::Literal(l) => l.position,
            Expr::Ident(i) => i.position,
            Expr::Lambda(l) => l.position,
            Expr::App(a) => a.position,
            Expr::Ascription(a) => a.position,
        }
    }

    pub fn info(&self) -> &T {
        match self {
            Expr::Literal(l) => &l.info,
            Expr::Ident(i) => &i.info,
            Expr::Lambda(l) => &l.info,
            Expr::App(a) => &a.info,
            Expr::Ascription(a) => &a.info,
        }
    }
}

/// Convenience constructors for untyped trees, used by drivers and tests in
/// place of a parser. All nodes get the dummy span.
impl Expr<()> {
    pub fn int(value: i64) -> Self {
        Expr::Literal(Literal {
            value: Lit::Int(value),
            position: Span::default(),
            info: (),
        })
    }

    pub fn bool(value: bool) -> Self {
        Expr::Literal(Literal {
            value: Lit::Bool(value),
            position: Span::default(),
            info: (),
        })
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(Ident {
            value: name.into(),
            position: Span::default(),
            info: (),
        })
    }

    pub fn lambda(binder: impl Into<String>, body: Expr<()>) -> Self {
        Expr::Lambda(Lambda {
            binder: Ident {
                value: binder.into(),
                position: Span::default(),
                info: (),
            },
            body: Box::new(body),
            position: Span::default(),
            info: (),
        })
    }

    pub fn app(func: Expr<()>, arg: Expr<()>) -> Self {
        Expr::App(App {
            func: Box::new(func),
            arg: Box::new(arg),
            position: Span::default(),
            info: (),
        })
    }

    pub fn ascribe(expr: Expr<()>, ty: Type) -> Self {
        Expr::Ascription(Ascription {
            expr: Box::new(expr),
            ty,
            position: Span::default(),
            info: (),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_span_is_dummy() {
        assert!(Span::default().is_dummy());
        assert!(!Span::new(3, 7).is_dummy());
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(3, 7).to_string(), "3..7");
    }

    #[test]
    fn test_constructors_build_expected_shape() {
        let expr = Expr::app(Expr::lambda("x", Expr::ident("x")), Expr::int(5));
        match expr {
            Expr::App(app) => {
                assert!(matches!(*app.func, Expr::Lambda(_)));
                assert!(matches!(
                    *app.arg,
                    Expr::Literal(Literal {
                        value: Lit::Int(5),
                        ..
                    })
                ));
            }
            other => panic!("expected application, got: {:?}", other),
        }
    }

    #[test]
    fn test_info_and_position_accessors() {
        let expr = Expr::ident("y");
        assert_eq!(*expr.info(), ());
        assert!(expr.position().is_dummy());
    }
}
