use std::collections::{HashMap, HashSet};

use super::subst::Substitution;
use super::ty::{Scheme, TypeVar};

/// The typing context: currently-bound names and their (possibly polymorphic)
/// type schemes.
///
/// Immutable by convention; [`TypeEnv::extend`] builds a new context by copy,
/// which is how inference enters a lambda body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeEnv {
    bindings: HashMap<String, Scheme>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv {
            bindings: HashMap::new(),
        }
    }

    pub fn with_bindings(bindings: Vec<(String, Scheme)>) -> Self {
        TypeEnv {
            bindings: bindings.into_iter().collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Scheme> {
        self.bindings.get(name)
    }

    pub fn extend(&self, name: String, scheme: Scheme) -> TypeEnv {
        let mut new_bindings = self.bindings.clone();
        new_bindings.insert(name, scheme);
        TypeEnv {
            bindings: new_bindings,
        }
    }

    /// Type variables still "in play" in the surrounding environment.
    ///
    /// Generalization must not quantify over these.
    pub fn free_type_vars(&self) -> HashSet<TypeVar> {
        let mut free = HashSet::new();
        for scheme in self.bindings.values() {
            free.extend(scheme.free_vars());
        }
        free
    }

    pub fn apply_subst(&self, subst: &Substitution) -> TypeEnv {
        TypeEnv {
            bindings: self
                .bindings
                .iter()
                .map(|(name, scheme)| (name.clone(), subst.apply_scheme(scheme)))
                .collect(),
        }
    }
}
