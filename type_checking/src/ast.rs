use crate::expr_typechecker::ExprTypeChecker;
use strum_macros::EnumDiscriminants;
use type_system::{CheckedType, TypeError, TypeSystem};

/// An expression tree. Built once by the caller and never mutated by the
/// checker; every node owns its children.
///
/// * `Var`: a read of a variable with a declared type, e.g. `p`
/// * `Literal`: a literal such as `3` or `true`, with the type it was given
/// * `Null`: the literal `null`
/// * `Assign`: `var = value`
/// * `MethodInvocation`: `target.name(args...)`
/// * `NewObject`: `new T(args...)`
#[derive(EnumDiscriminants, Debug, PartialEq, Eq, Clone)]
#[strum_discriminants(derive(Display))]
pub enum Expr {
    Var(Var),
    Literal(Literal),
    Null,
    Assign(Assignment),
    MethodInvocation(MethodInvocation),
    NewObject(NewObject),
}

/// A variable reference. There are no scopes: the declared type is supplied
/// directly.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Var {
    pub name: String,
    pub ty: CheckedType,
}

impl Var {
    pub fn new(name: impl Into<String>, ty: CheckedType) -> Var {
        Var {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Literal {
    /// The literal as written in the source
    pub value: String,
    pub ty: CheckedType,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Assignment {
    pub var: Var,
    pub value: Box<Expr>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MethodInvocation {
    pub target: Box<Expr>,
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NewObject {
    pub ty: CheckedType,
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn var(name: impl Into<String>, ty: CheckedType) -> Expr {
        Var::new(name, ty).into()
    }

    pub fn literal(value: impl Into<String>, ty: CheckedType) -> Expr {
        Expr::Literal(Literal {
            value: value.into(),
            ty,
        })
    }

    pub fn null() -> Expr {
        Expr::Null
    }

    pub fn assign(var: Var, value: Expr) -> Expr {
        Expr::Assign(Assignment {
            var,
            value: Box::new(value),
        })
    }

    pub fn method_call(target: Expr, name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::MethodInvocation(MethodInvocation {
            target: Box::new(target),
            name: name.into(),
            args,
        })
    }

    pub fn new_object(ty: CheckedType, args: Vec<Expr>) -> Expr {
        Expr::NewObject(NewObject { ty, args })
    }

    /// See `ExprTypeChecker::static_type`.
    pub fn static_type(&self, type_system: &TypeSystem) -> Result<CheckedType, TypeError> {
        ExprTypeChecker::new(type_system).static_type(self)
    }

    /// See `ExprTypeChecker::check_types`.
    pub fn check_types(&self, type_system: &TypeSystem) -> Result<(), TypeError> {
        ExprTypeChecker::new(type_system).check_types(self)
    }
}

impl From<Var> for Expr {
    fn from(var: Var) -> Expr {
        Expr::Var(var)
    }
}
