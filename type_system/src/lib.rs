#![warn(rust_2018_idioms)]
#![warn(
    clippy::print_stdout,
    clippy::unimplemented,
    clippy::doc_markdown,
    clippy::items_after_statements,
    clippy::match_same_arms,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::use_self,
    clippy::use_debug
)]

//! The type universe of a small Java-like language: primitive, object, null
//! and void types, the members declared on object types, and the subtype
//! relation between all of them.

#[macro_use]
extern crate derive_more;

mod builtin_types;
pub mod errors;
pub mod type_system;

pub use self::{errors::*, type_system::*};
