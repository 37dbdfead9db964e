//! Capture-avoiding substitution and big-step evaluation.
//!
//! [`Eval`] owns the monotonic counter used to mint fresh binder names during
//! alpha-renaming, so independent evaluations use independent [`Eval`]
//! instances. Reduction is a pure tree rewrite: only applications reduce,
//! nothing reduces under a lambda, and non-terminating terms are the caller's
//! responsibility.

use super::term::Term;

pub struct Eval {
    fresh_supply: usize,
}

impl Eval {
    pub fn new() -> Self {
        Eval { fresh_supply: 0 }
    }

    fn fresh_name(&mut self, base: &str) -> String {
        self.fresh_supply += 1;
        format!("{}{}", base, self.fresh_supply)
    }

    /// Compute `[target := replacement] term`, the capture-avoiding
    /// substitution of `replacement` for the free occurrences of `target`.
    ///
    /// A lambda whose binder equals `target` shadows it and is returned
    /// unchanged. A lambda whose binder occurs free in `replacement` would
    /// capture it, so the binder is alpha-renamed to a fresh name first.
    pub fn substitute(&mut self, target: &str, replacement: &Term, term: &Term) -> Term {
        match term {
            Term::Lit(_) => term.clone(),
            Term::Var(name) => {
                if name == target {
                    replacement.clone()
                } else {
                    term.clone()
                }
            }
            Term::Lambda { binder, body } => {
                if binder == target {
                    term.clone()
                } else if replacement.free_vars().contains(binder) {
                    let fresh_binder = self.fresh_name(binder);
                    let renamed_body =
                        self.substitute(binder, &Term::Var(fresh_binder.clone()), body);
                    Term::Lambda {
                        binder: fresh_binder,
                        body: Box::new(self.substitute(target, replacement, &renamed_body)),
                    }
                } else {
                    Term::Lambda {
                        binder: binder.clone(),
                        body: Box::new(self.substitute(target, replacement, body)),
                    }
                }
            }
            Term::App { func, arg } => Term::App {
                func: Box::new(self.substitute(target, replacement, func)),
                arg: Box::new(self.substitute(target, replacement, arg)),
            },
            // The annotation carries no term-level variables.
            Term::Typed { inner, ty } => Term::Typed {
                inner: Box::new(self.substitute(target, replacement, inner)),
                ty: ty.clone(),
            },
        }
    }

    /// Big-step reduction to normal form.
    ///
    /// Literals, variables, lambdas and ascribed terms are values or stuck;
    /// only applications reduce. The function side is evaluated first; if it
    /// is a lambda the argument is evaluated, substituted for the binder and
    /// the result reduced further. If the function side is stuck the
    /// argument is still evaluated, keeping the evaluation order uniform
    /// between the reducible and stuck branches.
    pub fn eval(&mut self, term: &Term) -> Term {
        match term {
            Term::App { func, arg } => match self.eval(func) {
                Term::Lambda { binder, body } => {
                    let arg_value = self.eval(arg);
                    let reduced = self.substitute(&binder, &arg_value, &body);
                    self.eval(&reduced)
                }
                stuck => Term::App {
                    func: Box::new(stuck),
                    arg: Box::new(self.eval(arg)),
                },
            },
            _ => term.clone(),
        }
    }
}

impl Default for Eval {
    fn default() -> Self {
        Self::new()
    }
}
