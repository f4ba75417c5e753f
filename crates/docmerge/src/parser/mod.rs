//! Template tokenizer and parser.
//!
//! `tokenize` scans a body into text and directive tokens, `parse` checks loop
//! nesting and builds the node tree. `parse_template` runs both.

pub mod ast;
pub mod error;
mod lexer;
mod template;

pub use ast::*;
pub use error::ParseError;
pub use lexer::{Token, TokenKind, TokenStream, tokenize};
pub use template::{MAX_LOOP_DEPTH, parse, parse_template};
