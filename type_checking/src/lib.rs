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

//! Static type checking of expression trees against a `TypeSystem`.
//!
//! Checking is depth-first, left-to-right, and visits children before their
//! parent, so the first error reported is the innermost one.

#[macro_use]
extern crate derive_more;

pub mod ast;
pub mod expr_typechecker;

pub use self::{
    ast::{Assignment, Expr, ExprDiscriminants, Literal, MethodInvocation, NewObject, Var},
    expr_typechecker::ExprTypeChecker,
};
pub use type_system::{CheckedType, TypeError, TypeErrorKind, TypeSystem};
