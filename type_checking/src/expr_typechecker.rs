use crate::ast::{self, Expr, ExprDiscriminants};
use std::fmt;
use type_system::{CheckedType, TypeError, TypeList, TypeSystem};

/// Computes static types of expressions and validates expression trees
/// against a read-only `TypeSystem`.
///
/// Holds no state besides the borrowed type system, so one checker (or any
/// number of them, on any number of threads) can check many trees.
#[derive(Debug, Clone, Copy)]
pub struct ExprTypeChecker<'ts> {
    type_system: &'ts TypeSystem,
}

/// What is being called, as printed in argument diagnostics.
enum Callee<'a> {
    Method { ty: &'a str, name: &'a str },
    Constructor { ty: &'a str },
}

impl fmt::Display for Callee<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callee::Method { ty, name } => write!(f, "{}.{}()", ty, name),
            Callee::Constructor { ty } => write!(f, "{} constructor", ty),
        }
    }
}

impl<'ts> ExprTypeChecker<'ts> {
    pub fn new(type_system: &'ts TypeSystem) -> Self {
        ExprTypeChecker { type_system }
    }

    /// The compile-time type of `expr`, computed without validating it.
    ///
    /// Only method invocations can fail here, when the method cannot be
    /// resolved on the target's static type.
    pub fn static_type(&self, expr: &Expr) -> Result<CheckedType, TypeError> {
        use crate::ast::Expr::*;
        match expr {
            Var(var) => Ok(var.ty),
            Literal(literal) => Ok(literal.ty),
            Null => Ok(CheckedType::NULL),
            // like in Java, an assignment has the type of its left-hand side
            Assign(assignment) => Ok(assignment.var.ty),
            MethodInvocation(invocation) => {
                let target_ty = self.static_type(&invocation.target)?;
                let method = self.type_system.method_named(&target_ty, &invocation.name)?;
                Ok(method.return_ty)
            }
            NewObject(new_object) => Ok(new_object.ty),
        }
    }

    /// Validates `expr` and all of its children. Returns the first error in
    /// depth-first, left-to-right order; children are always checked before
    /// their parent.
    pub fn check_types(&self, expr: &Expr) -> Result<(), TypeError> {
        match self.check_expr(expr) {
            Ok(_) => Ok(()),
            Err(err) => {
                log::debug!("type error ({}): {}", err.kind(), err);
                Err(err)
            }
        }
    }

    /// Checks `expr` and yields its static type, so that parents never have
    /// to walk a child subtree twice.
    fn check_expr(&self, expr: &Expr) -> Result<CheckedType, TypeError> {
        use crate::ast::Expr::*;
        log::trace!("checking {}", ExprDiscriminants::from(expr));

        match expr {
            // a variable or literal by itself is never a type error
            Var(var) => Ok(var.ty),
            Literal(literal) => Ok(literal.ty),
            Null => Ok(CheckedType::NULL),
            Assign(assignment) => self.check_assignment(assignment),
            MethodInvocation(invocation) => self.check_method_invocation(invocation),
            NewObject(new_object) => self.check_new_object(new_object),
        }
    }

    fn check_assignment(&self, assignment: &ast::Assignment) -> Result<CheckedType, TypeError> {
        let value_ty = self.check_expr(&assignment.value)?;

        let var = &assignment.var;
        if !self.type_system.is_subtype_of(&value_ty, &var.ty) {
            return Err(TypeError::CannotAssign {
                var_name: var.name.clone(),
                var_ty: self.type_name(&var.ty),
                value_ty: self.type_name(&value_ty),
            });
        }

        Ok(var.ty)
    }

    fn check_method_invocation(
        &self,
        invocation: &ast::MethodInvocation,
    ) -> Result<CheckedType, TypeError> {
        // e.g. "target.name(arg1, arg2)"
        let target_ty = self.check_expr(&invocation.target)?;
        self.type_system
            .check_receiver(&target_ty, &invocation.name)?;

        let arg_types = self.check_args(&invocation.args)?;

        let method = self.type_system.method_named(&target_ty, &invocation.name)?;
        let callee = Callee::Method {
            ty: self.type_system.type_name(&target_ty),
            name: &invocation.name,
        };
        self.check_arg_types(&callee, &method.params, &arg_types)?;

        Ok(method.return_ty)
    }

    fn check_new_object(&self, new_object: &ast::NewObject) -> Result<CheckedType, TypeError> {
        // e.g. "new T(arg1, arg2)"
        let constructor = self.type_system.constructor_of(&new_object.ty)?;

        let arg_types = self.check_args(&new_object.args)?;

        let callee = Callee::Constructor {
            ty: self.type_system.type_name(&new_object.ty),
        };
        self.check_arg_types(&callee, &constructor.params, &arg_types)?;

        Ok(new_object.ty)
    }

    /// Checks every argument left to right and returns their static types.
    fn check_args(&self, args: &[Expr]) -> Result<Vec<CheckedType>, TypeError> {
        args.iter().map(|arg| self.check_expr(arg)).collect()
    }

    fn check_arg_types(
        &self,
        callee: &Callee<'_>,
        params: &[CheckedType],
        arg_types: &[CheckedType],
    ) -> Result<(), TypeError> {
        if params.len() != arg_types.len() {
            return Err(TypeError::ArgumentCountMismatch {
                callee: callee.to_string(),
                expected: params.len(),
                actual: arg_types.len(),
            });
        }

        let compatible = params
            .iter()
            .zip(arg_types)
            .all(|(param_ty, arg_ty)| self.type_system.is_subtype_of(arg_ty, param_ty));

        if !compatible {
            return Err(TypeError::ArgumentTypeMismatch {
                callee: callee.to_string(),
                expected: self.type_list(params),
                actual: self.type_list(arg_types),
            });
        }

        Ok(())
    }

    fn type_name(&self, ty: &CheckedType) -> String {
        self.type_system.type_name(ty).to_string()
    }

    fn type_list(&self, types: &[CheckedType]) -> TypeList {
        TypeList(types.iter().map(|ty| self.type_name(ty)).collect())
    }
}
