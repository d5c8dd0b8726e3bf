//! The core Glint syntax implementation.
//!
//! The provided parser turns template source text into a small abstract syntax
//! tree of literal text runs and `{ expression }` sections, which the runtime
//! evaluates directly.

#[macro_use]
extern crate log;

pub mod ast;
pub mod error;
mod grammar;
mod parser;
pub mod source;

pub use parser::parse;
