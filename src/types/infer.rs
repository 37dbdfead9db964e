//! Syntax-directed Algorithm-W-style type inference.
//!
//! [`Infer::infer`] walks the source tree and returns the same tree with
//! every node annotated by its inferred type, together with the substitution
//! accumulated so far. Errors do not abort the walk: each one is recorded on
//! the engine and the offending node is annotated with [`Type::Error`], which
//! downstream cases propagate without further unification. The top-level
//! entry [`Infer::infer_expr`] surfaces all accumulated errors together, or
//! generalizes the final type into a principal scheme.

use std::collections::HashMap;

use itertools::Itertools;

use crate::ast::{App, Ascription, Expr, Ident, Lambda, Lit, Literal};

use super::env::TypeEnv;
use super::error::TypeError;
use super::subst::Substitution;
use super::ty::{Scheme, Type, TypeVar};
use super::unify::unify;

/// The initial typing context used by [`Infer::infer_expr`].
///
/// Contains `add: Int -> Int -> Int` and `identity: forall a. a -> a`.
pub fn initial_env() -> TypeEnv {
    let a = TypeVar::with_name(0, "a");
    TypeEnv::with_bindings(vec![
        (
            "add".to_string(),
            Scheme::monomorphic(Type::fun(Type::Int, Type::fun(Type::Int, Type::Int))),
        ),
        (
            "identity".to_string(),
            Scheme::polymorphic(
                vec![a.clone()],
                Type::fun(Type::Var(a.clone()), Type::Var(a)),
            ),
        ),
    ])
}

/// One inference run: owns the fresh-variable counter and the accumulated
/// error list. Independent runs must use independent instances.
pub struct Infer {
    next_var: usize,
    errors: Vec<TypeError>,
}

impl Infer {
    pub fn new() -> Self {
        Infer {
            next_var: 0,
            errors: Vec::new(),
        }
    }

    /// Errors recorded so far in this run.
    pub fn errors(&self) -> &[TypeError] {
        &self.errors
    }

    fn report_error(&mut self, error: TypeError) {
        self.errors.push(error);
    }

    fn fresh_var(&mut self) -> TypeVar {
        let id = self.next_var;
        self.next_var += 1;
        TypeVar::new(id)
    }

    /// Replace every quantified variable of the scheme with a fresh one,
    /// yielding a monomorphic type usable at this call site.
    pub fn instantiate(&mut self, scheme: &Scheme) -> Type {
        let subst: HashMap<_, _> = scheme
            .vars
            .iter()
            .map(|v| (v.clone(), Type::Var(self.fresh_var())))
            .collect();
        Substitution(subst).apply(&scheme.ty)
    }

    /// Quantify the free variables of `ty` that are not free anywhere in the
    /// context. Variables still in play in the environment must stay
    /// monomorphic or let-polymorphism becomes unsound.
    ///
    /// The quantified set is sorted so generalization output is
    /// reproducible.
    pub fn generalize(&self, env: &TypeEnv, ty: &Type) -> Scheme {
        let free_in_env = env.free_type_vars();
        let vars = ty
            .free_type_vars()
            .into_iter()
            .filter(|v| !free_in_env.contains(v))
            .sorted_by(|a, b| (a.id, &a.name).cmp(&(b.id, &b.name)))
            .collect();
        Scheme {
            vars,
            ty: ty.clone(),
        }
    }

    /// Infer the type of `expr` under `env`.
    ///
    /// Returns the fully annotated tree and the substitution accumulated by
    /// this subtree. When a child is annotated with the error sentinel the
    /// parent propagates the sentinel without unifying, and returns the
    /// empty substitution since no new constraint was solved at this level.
    pub fn infer(&mut self, env: &TypeEnv, expr: &Expr<()>) -> (Expr<Type>, Substitution) {
        match expr {
            Expr::Literal(lit) => {
                let ty = match lit.value {
                    Lit::Int(_) => Type::Int,
                    Lit::Bool(_) => Type::Bool,
                };
                (
                    Expr::Literal(Literal {
                        value: lit.value,
                        position: lit.position,
                        info: ty,
                    }),
                    Substitution::empty(),
                )
            }

            Expr::Ident(ident) => {
                let ty = match env.lookup(&ident.value) {
                    Some(scheme) => self.instantiate(scheme),
                    None => {
                        self.report_error(TypeError::unknown_var(
                            ident.value.clone(),
                            ident.position,
                        ));
                        Type::Error
                    }
                };
                (
                    Expr::Ident(Ident {
                        value: ident.value.clone(),
                        position: ident.position,
                        info: ty,
                    }),
                    Substitution::empty(),
                )
            }

            Expr::Lambda(lambda) => self.infer_lambda(env, lambda),

            Expr::App(app) => self.infer_app(env, app),

            Expr::Ascription(asc) => self.infer_ascription(env, asc),
        }
    }

    fn infer_lambda(&mut self, env: &TypeEnv, lambda: &Lambda<()>) -> (Expr<Type>, Substitution) {
        // Binders are never generalized; only top-level bindings are.
        let binder_ty = Type::Var(self.fresh_var());
        let inner_env = env.extend(
            lambda.binder.value.clone(),
            Scheme::monomorphic(binder_ty.clone()),
        );
        let (body, s) = self.infer(&inner_env, &lambda.body);

        let binder = Ident {
            value: lambda.binder.value.clone(),
            position: lambda.binder.position,
            info: binder_ty.clone(),
        };

        if body.info().is_error() {
            let node = Expr::Lambda(Lambda {
                binder,
                body: Box::new(body),
                position: lambda.position,
                info: Type::Error,
            });
            (node, Substitution::empty())
        } else {
            let lambda_ty = Type::fun(binder_ty, body.info().clone());
            let node = Expr::Lambda(Lambda {
                binder,
                body: Box::new(body),
                position: lambda.position,
                info: lambda_ty,
            });
            (s.apply_expr(&node), s)
        }
    }

    fn infer_app(&mut self, env: &TypeEnv, app: &App<()>) -> (Expr<Type>, Substitution) {
        let result_ty = Type::Var(self.fresh_var());
        let (func, s1) = self.infer(env, &app.func);
        // The argument is inferred under the constraints already discovered
        // on the function side.
        let (arg, s2) = self.infer(&env.apply_subst(&s1), &app.arg);

        let rebuild = |func: Expr<Type>, arg: Expr<Type>, info: Type| {
            Expr::App(App {
                func: Box::new(func),
                arg: Box::new(arg),
                position: app.position,
                info,
            })
        };

        if func.info().is_error() || arg.info().is_error() {
            return (rebuild(func, arg, Type::Error), Substitution::empty());
        }

        let expected = Type::fun(arg.info().clone(), result_ty.clone());
        match unify(&s2.apply(func.info()), &expected) {
            Err(err) => {
                self.report_error(TypeError::from_unify_error(err, app.position));
                (rebuild(func, arg, Type::Error), Substitution::empty())
            }
            Ok(s3) => {
                let s = s3.compose(&s2).compose(&s1);
                let node = rebuild(func, arg, result_ty);
                (s.apply_expr(&node), s)
            }
        }
    }

    fn infer_ascription(
        &mut self,
        env: &TypeEnv,
        asc: &Ascription<()>,
    ) -> (Expr<Type>, Substitution) {
        let (inner, s) = self.infer(env, &asc.expr);

        let rebuild = |inner: Expr<Type>, info: Type| {
            Expr::Ascription(Ascription {
                expr: Box::new(inner),
                ty: asc.ty.clone(),
                position: asc.position,
                info,
            })
        };

        if inner.info().is_error() {
            return (rebuild(inner, Type::Error), Substitution::empty());
        }

        // Ascriptions must be closed; the surface grammar is expected to
        // guarantee this, so an open one is reported, not panicked on.
        if !asc.ty.free_type_vars().is_empty() {
            self.report_error(TypeError::open_ascription(asc.ty.clone(), asc.position));
            return (rebuild(inner, Type::Error), Substitution::empty());
        }

        match unify(inner.info(), &asc.ty) {
            Err(err) => {
                self.report_error(TypeError::from_unify_error(err, asc.position));
                (rebuild(inner, Type::Error), Substitution::empty())
            }
            Ok(s2) => {
                let node = rebuild(inner, asc.ty.clone());
                (s2.apply_expr(&node), s2.compose(&s))
            }
        }
    }

    /// Infer the principal type scheme of `expr` under [`initial_env`].
    ///
    /// Fails with every error accumulated during the run; on success the
    /// final substituted type is generalized under the initial context.
    pub fn infer_expr(&mut self, expr: &Expr<()>) -> Result<Scheme, Vec<TypeError>> {
        let env = initial_env();
        let (typed, s) = self.infer(&env, expr);
        if !self.errors.is_empty() {
            return Err(std::mem::take(&mut self.errors));
        }
        Ok(self.generalize(&env, &s.apply(typed.info())))
    }
}

impl Default for Infer {
    fn default() -> Self {
        Self::new()
    }
}
