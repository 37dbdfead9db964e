//! # Lamb - The Semantic Core of a Minimal Functional Language
//!
//! Lamb implements the two correctness-critical pieces of a small functional
//! language: a capture-avoiding substitution-based evaluator for an untyped
//! lambda calculus, and a Hindley-Milner type inference engine that assigns
//! principal types to the same expression language.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Code (external lexer/parser)
//!     ↓
//! Expr<()> ──────────────────┬─────────────────────────┐
//!     ↓                      ↓                         ↓
//! [Type Inference] → Expr<Type> + Scheme   [Term::from_expr] → Term
//!                                                       ↓
//!                                             [Eval] → Term (normal form)
//! ```
//!
//! Parsing is an external collaborator: this crate consumes already-built
//! [`ast::Expr`] trees carrying position spans and produces either a fully
//! type-annotated tree plus a principal [`types::Scheme`], or a reduced
//! runtime [`interpreter::Term`].
//!
//! ## Key Design Decisions
//!
//! ### Two-Tier Expression System
//!
//! - **Source expressions** ([`ast::Expr`]): parse-time trees, generic over a
//!   per-node `info` payload. Before inference the payload is `()`; after
//!   inference every node carries its inferred [`types::Type`].
//! - **Runtime terms** ([`interpreter::Term`]): the same shape with spans and
//!   info erased, consumed by the tree-rewriting evaluator.
//!
//! ### Hindley-Milner Type System
//!
//! The checker implements standard Algorithm-W-style inference:
//! - unification with occurs check ([`types::unify`])
//! - substitution composition threaded through the recursion
//! - let-polymorphism via generalize/instantiate
//! - local error recovery: failed subterms are annotated with a non-unifiable
//!   error sentinel so one pass can report several independent errors
//!
//! ### Capture-Avoiding Substitution
//!
//! Beta reduction substitutes evaluated arguments into lambda bodies. When a
//! binder would capture a free variable of the replacement, the binder is
//! alpha-renamed to a fresh name minted from a per-evaluator counter.
//!
//! ## Module Structure
//!
//! - [`ast`] - Source expression trees with span metadata
//! - [`interpreter`] - Runtime terms, substitution engine and evaluator
//! - [`types`] - Types, schemes, unification and type inference

pub mod ast;
pub mod interpreter;
pub mod types;
