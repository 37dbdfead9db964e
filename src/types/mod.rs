pub mod env;
pub mod error;
pub mod infer;
pub mod subst;
pub mod ty;
pub mod unify;

pub use env::TypeEnv;
pub use error::TypeError;
pub use infer::{Infer, initial_env};
pub use subst::Substitution;
pub use ty::{Scheme, Type, TypeVar};
pub use unify::{UnifyError, unify};
