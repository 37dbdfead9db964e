use std::collections::HashSet;
use std::fmt;

use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVar {
    pub id: usize,
    pub name: Option<String>,
}

impl TypeVar {
    pub fn new(id: usize) -> Self {
        Self { id, name: None }
    }

    pub fn with_name(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }
}

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "'{}", name)
        } else {
            write!(f, "'t{}", self.id)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Bool,
    Var(TypeVar),
    Fun(Box<Type>, Box<Type>),
    /// Sentinel standing in for the type of a subterm whose inference already
    /// failed. It unifies with nothing (itself included) so one reported
    /// error does not cascade into spurious follow-ups.
    Error,
}

impl Type {
    pub fn fun(arg: Type, result: Type) -> Self {
        Type::Fun(Box::new(arg), Box::new(result))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn free_type_vars(&self) -> HashSet<TypeVar> {
        match self {
            Type::Int | Type::Bool | Type::Error => HashSet::new(),
            Type::Var(v) => {
                let mut set = HashSet::new();
                set.insert(v.clone());
                set
            }
            Type::Fun(t1, t2) => {
                let mut set = t1.free_type_vars();
                set.extend(t2.free_type_vars());
                set
            }
        }
    }

    pub fn pretty(&self) -> String {
        match self {
            Type::Int => "Int".to_string(),
            Type::Bool => "Bool".to_string(),
            Type::Var(v) => v.to_string(),
            Type::Fun(t1, t2) => {
                let t1_str = if matches!(**t1, Type::Fun(_, _)) {
                    format!("({})", t1.pretty())
                } else {
                    t1.pretty()
                };
                format!("{} -> {}", t1_str, t2.pretty())
            }
            Type::Error => "<error>".to_string(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

/// A polymorphic type scheme: a type universally quantified over `vars`.
///
/// Created by generalization, consumed by instantiation. A context-stored
/// scheme is never renamed in place; shadowing is resolved by substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    pub vars: Vec<TypeVar>,
    pub ty: Type,
}

impl Scheme {
    pub fn monomorphic(ty: Type) -> Self {
        Scheme {
            vars: Vec::new(),
            ty,
        }
    }

    pub fn polymorphic(vars: Vec<TypeVar>, ty: Type) -> Self {
        Scheme { vars, ty }
    }

    /// Free type variables of the scheme body, minus the quantified set.
    pub fn free_vars(&self) -> HashSet<TypeVar> {
        let mut free = self.ty.free_type_vars();
        for var in &self.vars {
            free.remove(var);
        }
        free
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.vars.is_empty() {
            write!(f, "{}", self.ty)
        } else {
            write!(f, "forall {}. {}", self.vars.iter().format(" "), self.ty)
        }
    }
}
