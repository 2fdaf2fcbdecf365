use failure::Fail;
use itertools::Itertools;
use std::fmt;

/// The four kinds of compile-time errors an expression can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TypeErrorKind {
    TypeMismatch,
    ArgumentCountMismatch,
    NoSuchMethod,
    IllegalInstantiation,
}

/// Names of the types in a parameter or argument list, printed as
/// `(T1, T2, ...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeList(pub Vec<String>);

impl fmt::Display for TypeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

/// A type error found while checking an expression.
///
/// The display strings are part of the contract: callers compare them
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum TypeError {
    #[fail(
        display = "Cannot assign {} to variable {} of type {}",
        value_ty, var_name, var_ty
    )]
    CannotAssign {
        var_name: String,
        var_ty: String,
        value_ty: String,
    },
    #[fail(
        display = "{} expects arguments of type {}, but got {}",
        callee, expected, actual
    )]
    ArgumentTypeMismatch {
        callee: String,
        expected: TypeList,
        actual: TypeList,
    },
    #[fail(
        display = "Wrong number of arguments for {}: expected {}, got {}",
        callee, expected, actual
    )]
    ArgumentCountMismatch {
        callee: String,
        expected: usize,
        actual: usize,
    },
    #[fail(display = "{} has no method named {}", ty, method_name)]
    NoSuchMethod { ty: String, method_name: String },
    #[fail(display = "Type {} does not have methods", ty)]
    NoMethods { ty: String },
    #[fail(display = "Cannot invoke method {}() on null", method_name)]
    InvokeOnNull { method_name: String },
    #[fail(display = "Type {} is not instantiable", ty)]
    IllegalInstantiation { ty: String },
}

impl TypeError {
    pub fn kind(&self) -> TypeErrorKind {
        use self::TypeError::*;
        match self {
            CannotAssign { .. } | ArgumentTypeMismatch { .. } => TypeErrorKind::TypeMismatch,
            ArgumentCountMismatch { .. } => TypeErrorKind::ArgumentCountMismatch,
            NoSuchMethod { .. } | NoMethods { .. } | InvokeOnNull { .. } => {
                TypeErrorKind::NoSuchMethod
            }
            IllegalInstantiation { .. } => TypeErrorKind::IllegalInstantiation,
        }
    }
}

/// An invalid declaration while building a `TypeSystem`.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum DeclarationError {
    #[fail(display = "redefinition of {} '{}'", kind, name)]
    RedefinitionError {
        kind: String, // "class", "method", "constructor"
        name: String,
    },
    #[fail(display = "parameter {} of {} cannot have type void", index, callable)]
    VoidNotAllowed { callable: String, index: usize },
    #[fail(display = "supertype of class '{}' does not exist", class_name)]
    UnknownSupertype { class_name: String },
}
