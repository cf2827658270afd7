/*!
# Rust Language Module

This Rust module provides lexical analysis of BASIC lines and parsing of
the expressions they contain.

*/

pub type LineNumber = Option<u16>;

/// Highest line number the program store accepts.
pub const MAX_LINE_NUMBER: u16 = 65529;

#[macro_use]
mod error;
mod lex;
mod line;
mod parse;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use line::Line;
pub use parse::is_identifier;
pub use parse::parse;
pub use parse::split_condition;
pub use token::{Literal, Operator, Token, Word};

pub mod ast;
