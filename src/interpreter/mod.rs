mod eval;
mod term;

pub use eval::Eval;
pub use term::Term;
