//! Type substitutions.
//!
//! A substitution is a finite mapping from type variables to types. It is a
//! plain value: application and composition always build a new substitution,
//! the inference algorithms never mutate one in place. The single structural
//! [`Substitution::apply`] over [`Type`] is reused for the composite shapes
//! (schemes, contexts, annotated expression trees).

use std::collections::HashMap;

use crate::ast::{App, Ascription, Expr, Lambda};

use super::ty::{Scheme, Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution(pub HashMap<TypeVar, Type>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(HashMap::new())
    }

    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        let mut map = HashMap::new();
        map.insert(var, ty);
        Substitution(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rewrite every free type variable of `ty` per the mapping.
    ///
    /// `Int`, `Bool` and the error sentinel are fixed points.
    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Int | Type::Bool | Type::Error => ty.clone(),
            Type::Var(v) => self.0.get(v).cloned().unwrap_or_else(|| ty.clone()),
            Type::Fun(t1, t2) => Type::fun(self.apply(t1), self.apply(t2)),
        }
    }

    /// Compose `self` over `earlier`, where `earlier` was computed first.
    ///
    /// The result applies `earlier` first and then `self`:
    /// `self.compose(earlier).apply(t) == self.apply(&earlier.apply(t))`.
    /// `self` is applied to `earlier`'s range to close over intermediate
    /// variables, and `self`'s own bindings win on key collision.
    pub fn compose(&self, earlier: &Substitution) -> Substitution {
        let mut result: HashMap<TypeVar, Type> = earlier
            .0
            .iter()
            .map(|(var, ty)| (var.clone(), self.apply(ty)))
            .collect();

        for (var, ty) in &self.0 {
            result.insert(var.clone(), ty.clone());
        }

        Substitution(result)
    }

    /// Apply to a scheme without touching its quantified variables.
    ///
    /// The quantified set is removed from the domain first so generalized
    /// variables are never instantiated away by an unrelated binding.
    pub fn apply_scheme(&self, scheme: &Scheme) -> Scheme {
        let narrowed = Substitution(
            self.0
                .iter()
                .filter(|(var, _)| !scheme.vars.contains(*var))
                .map(|(var, ty)| (var.clone(), ty.clone()))
                .collect(),
        );
        Scheme {
            vars: scheme.vars.clone(),
            ty: narrowed.apply(&scheme.ty),
        }
    }

    /// Apply pointwise to every type embedded in a type-annotated tree: the
    /// per-node annotations and the declared types of ascriptions.
    pub fn apply_expr(&self, expr: &Expr<Type>) -> Expr<Type> {
        match expr {
            Expr::Literal(lit) => {
                let mut lit = lit.clone();
                lit.info = self.apply(&lit.info);
                Expr::Literal(lit)
            }
            Expr::Ident(ident) => {
                let mut ident = ident.clone();
                ident.info = self.apply(&ident.info);
                Expr::Ident(ident)
            }
            Expr::Lambda(lambda) => {
                let mut binder = lambda.binder.clone();
                binder.info = self.apply(&binder.info);
                Expr::Lambda(Lambda {
                    binder,
                    body: Box::new(self.apply_expr(&lambda.body)),
                    position: lambda.position,
                    info: self.apply(&lambda.info),
                })
            }
            Expr::App(app) => Expr::App(App {
                func: Box::new(self.apply_expr(&app.func)),
                arg: Box::new(self.apply_expr(&app.arg)),
                position: app.position,
                info: self.apply(&app.info),
            }),
            Expr::Ascription(asc) => Expr::Ascription(Ascription {
                expr: Box::new(self.apply_expr(&asc.expr)),
                ty: self.apply(&asc.ty),
                position: asc.position,
                info: self.apply(&asc.info),
            }),
        }
    }
}
