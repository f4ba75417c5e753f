//! Template evaluation.
//!
//! Walks a [`ParsedTemplate`](crate::parser::ParsedTemplate) against a context
//! value, resolving variables through a scope chain, iterating loops and
//! collecting non-fatal warnings.

mod alias;
mod context;
mod evaluator;
mod scope;

pub use alias::item_alias;
pub use context::EvalContext;
pub use evaluator::{RenderResult, render};
pub use scope::ScopeChain;
