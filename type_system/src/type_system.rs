use crate::{
    builtin_types,
    errors::{DeclarationError, TypeError},
};
use std::{
    collections::{hash_map::Entry, HashMap, HashSet},
    fmt,
};
use strum_macros::{EnumIter, EnumString};

/// The universe of object types known to the checker.
///
/// Built once, then shared read-only by any number of checks. Every type
/// system contains the root class `Object` under `ClassDefId::OBJECT`.
#[derive(Debug)]
pub struct TypeSystem {
    defined_classes: Vec<ClassDef>,
    class_ids: HashMap<String, ClassDefId>,
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeSystem {
    pub fn new() -> Self {
        let mut type_system = Self {
            defined_classes: Vec::new(),
            class_ids: HashMap::new(),
        };
        builtin_types::add_to(&mut type_system);
        type_system
    }

    pub fn is_type_defined(&self, name: &str) -> bool {
        self.class_ids.contains_key(name)
    }

    /// Adds a class to the universe. All of its supertypes must already be
    /// part of this type system, which keeps the inheritance graph acyclic.
    pub fn add_class_def(&mut self, class_def: ClassDef) -> Result<ClassDefId, DeclarationError> {
        let next_id = ClassDefId {
            idx: self.defined_classes.len(),
        };

        if class_def
            .supertypes
            .iter()
            .any(|supertype| supertype.idx >= next_id.idx)
        {
            return Err(DeclarationError::UnknownSupertype {
                class_name: class_def.name,
            });
        }

        match self.class_ids.entry(class_def.name.clone()) {
            Entry::Occupied(_) => Err(DeclarationError::RedefinitionError {
                kind: "class".to_string(),
                name: class_def.name,
            }),
            Entry::Vacant(e) => {
                log::debug!(
                    "declared class {} with {} supertype(s)",
                    class_def.name,
                    class_def.supertypes.len()
                );
                e.insert(next_id);
                self.defined_classes.push(class_def);
                Ok(next_id)
            }
        }
    }

    pub fn class_mut(&mut self, id: ClassDefId) -> &mut ClassDef {
        self.defined_classes
            .get_mut(id.idx)
            .expect("Ids always point to existing classes")
    }

    pub fn class(&self, id: ClassDefId) -> &ClassDef {
        self.defined_classes
            .get(id.idx)
            .expect("Ids always point to existing classes")
    }

    pub fn lookup_class(&self, name: &str) -> Option<(&ClassDef, ClassDefId)> {
        self.class_ids
            .get(name)
            .map(|&id| (self.class(id), id))
    }

    pub fn defined_classes(&self) -> impl Iterator<Item = (ClassDefId, &ClassDef)> {
        self.defined_classes
            .iter()
            .enumerate()
            .map(|(idx, class_def)| (ClassDefId { idx }, class_def))
    }

    /// The declared name of a type, as used in diagnostics.
    pub fn type_name<'a>(&'a self, ty: &CheckedType) -> &'a str {
        match ty {
            CheckedType::Primitive(primitive) => primitive.as_str(),
            CheckedType::Object(id) => self.class(*id).name(),
            CheckedType::Null => "null",
            CheckedType::Void => "void",
        }
    }

    /// True if a value of type `sub` can be used where `sup` is expected.
    ///
    /// Reflexive and transitive. `null` is a subtype of every object type;
    /// primitives and `void` are only subtypes of themselves.
    pub fn is_subtype_of(&self, sub: &CheckedType, sup: &CheckedType) -> bool {
        use self::CheckedType::*;
        match (sub, sup) {
            (Object(class), Object(ancestor)) => self.inherits_from(*class, *ancestor),
            (Null, _) => sup.is_object_type(),
            _ => sub == sup,
        }
    }

    pub fn is_supertype_of(&self, sup: &CheckedType, sub: &CheckedType) -> bool {
        self.is_subtype_of(sub, sup)
    }

    fn inherits_from(&self, class: ClassDefId, ancestor: ClassDefId) -> bool {
        let mut visited = HashSet::new();
        let mut worklist = vec![class];

        while let Some(current) = worklist.pop() {
            if current == ancestor {
                return true;
            }
            if visited.insert(current) {
                worklist.extend(self.class(current).supertypes.iter().cloned());
            }
        }

        false
    }

    /// Fails unless methods can be invoked on a value of type `ty`.
    pub fn check_receiver(&self, ty: &CheckedType, method_name: &str) -> Result<(), TypeError> {
        match ty {
            CheckedType::Object(_) => Ok(()),
            _ => Err(self.receiver_error(ty, method_name)),
        }
    }

    fn receiver_error(&self, ty: &CheckedType, method_name: &str) -> TypeError {
        match ty {
            CheckedType::Null => TypeError::InvokeOnNull {
                method_name: method_name.to_string(),
            },
            _ => TypeError::NoMethods {
                ty: self.type_name(ty).to_string(),
            },
        }
    }

    /// Resolves a method by name, looking at the type's own methods first and
    /// then at its supertypes, depth-first in declaration order.
    pub fn method_named(
        &self,
        ty: &CheckedType,
        method_name: &str,
    ) -> Result<&ClassMethodDef, TypeError> {
        match ty {
            CheckedType::Object(class) => {
                self.lookup_method(*class, method_name)
                    .ok_or_else(|| TypeError::NoSuchMethod {
                        ty: self.class(*class).name().to_string(),
                        method_name: method_name.to_string(),
                    })
            }
            _ => Err(self.receiver_error(ty, method_name)),
        }
    }

    fn lookup_method(&self, class: ClassDefId, method_name: &str) -> Option<&ClassMethodDef> {
        // each class is searched once, even when reachable through a diamond
        let mut visited = HashSet::new();
        let mut stack = vec![class];

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let class_def = self.class(current);
            if let Some(method) = class_def.method(method_name) {
                return Some(method);
            }
            stack.extend(class_def.supertypes.iter().rev().cloned());
        }

        None
    }

    /// The constructor used by `new T(...)`, or an error if `T` cannot be
    /// instantiated.
    pub fn constructor_of(&self, ty: &CheckedType) -> Result<&ConstructorDef, TypeError> {
        match ty {
            CheckedType::Object(class) => Ok(self.class(*class).constructor()),
            _ => Err(TypeError::IllegalInstantiation {
                ty: self.type_name(ty).to_string(),
            }),
        }
    }
}

/// A `ClassDefId` refers to a class definition.
///
/// Having an instance of this struct ensures that
/// the type system that issued this instance can
/// provide the definition of that class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClassDefId {
    idx: usize,
}

impl ClassDefId {
    pub const OBJECT: ClassDefId = ClassDefId { idx: 0 };
}

impl From<ClassDefId> for CheckedType {
    fn from(id: ClassDefId) -> CheckedType {
        CheckedType::Object(id)
    }
}

static DEFAULT_CONSTRUCTOR: ConstructorDef = ConstructorDef { params: Vec::new() };

/// A class or interface. The model does not distinguish the two: `extends`
/// and `implements` both end up in `supertypes`.
#[derive(Debug, Clone)]
pub struct ClassDef {
    name: String,
    supertypes: Vec<ClassDefId>,
    constructor: Option<ConstructorDef>,
    methods: HashMap<String, ClassMethodDef>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>, supertypes: Vec<ClassDefId>) -> ClassDef {
        ClassDef {
            name: name.into(),
            supertypes,
            constructor: None,
            methods: HashMap::new(),
        }
    }

    /// The name the class was registered under. Fixed once the class is part
    /// of a `TypeSystem`, which indexes classes by it.
    ///
    /// ```compile_fail
    /// let mut ts = type_system::TypeSystem::new();
    /// ts.class_mut(type_system::ClassDefId::OBJECT).name = "Thing".to_string();
    /// ```
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supertypes(&self) -> &[ClassDefId] {
        &self.supertypes
    }

    pub fn add_method(&mut self, method: ClassMethodDef) -> Result<(), DeclarationError> {
        check_no_void_params(&method.params, || format!("method {}.{}", self.name, method.name))?;

        match self.methods.entry(method.name.clone()) {
            Entry::Occupied(_) => Err(DeclarationError::RedefinitionError {
                kind: "method".to_string(),
                name: method.name,
            }),
            Entry::Vacant(e) => {
                e.insert(method);
                Ok(())
            }
        }
    }

    /// Only the methods declared on this class, not inherited ones.
    pub fn method(&self, name: &str) -> Option<&ClassMethodDef> {
        self.methods.get(name)
    }

    pub fn set_constructor(&mut self, constructor: ConstructorDef) -> Result<(), DeclarationError> {
        if self.constructor.is_some() {
            return Err(DeclarationError::RedefinitionError {
                kind: "constructor".to_string(),
                name: self.name.clone(),
            });
        }
        check_no_void_params(&constructor.params, || {
            format!("constructor of {}", self.name)
        })?;

        self.constructor = Some(constructor);
        Ok(())
    }

    /// Classes without a declared constructor get an implicit one without
    /// parameters.
    pub fn constructor(&self) -> &ConstructorDef {
        self.constructor.as_ref().unwrap_or(&DEFAULT_CONSTRUCTOR)
    }
}

fn check_no_void_params(
    params: &[CheckedType],
    callable: impl FnOnce() -> String,
) -> Result<(), DeclarationError> {
    match params.iter().position(|ty| *ty == CheckedType::Void) {
        Some(index) => Err(DeclarationError::VoidNotAllowed {
            callable: callable(),
            index,
        }),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMethodDef {
    pub name: String,
    pub params: Vec<CheckedType>,
    pub return_ty: CheckedType,
}

impl ClassMethodDef {
    pub fn new(
        name: impl Into<String>,
        params: Vec<CheckedType>,
        return_ty: CheckedType,
    ) -> ClassMethodDef {
        ClassMethodDef {
            name: name.into(),
            params,
            return_ty,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorDef {
    pub params: Vec<CheckedType>,
}

impl ConstructorDef {
    pub fn new(params: Vec<CheckedType>) -> ConstructorDef {
        ConstructorDef { params }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter)]
pub enum PrimitiveType {
    #[strum(serialize = "boolean")]
    Boolean,
    #[strum(serialize = "byte")]
    Byte,
    #[strum(serialize = "short")]
    Short,
    #[strum(serialize = "char")]
    Char,
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "long")]
    Long,
    #[strum(serialize = "float")]
    Float,
    #[strum(serialize = "double")]
    Double,
}

impl PrimitiveType {
    pub fn as_str(self) -> &'static str {
        use self::PrimitiveType::*;
        match self {
            Boolean => "boolean",
            Byte => "byte",
            Short => "short",
            Char => "char",
            Int => "int",
            Long => "long",
            Float => "float",
            Double => "double",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &'_ mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The static type of an expression.
///
/// Object types refer into the `TypeSystem` that issued their id, so their
/// names are resolved through `TypeSystem::type_name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckedType {
    Primitive(PrimitiveType),
    Object(ClassDefId),
    Null,
    Void,
}

impl CheckedType {
    pub const BOOLEAN: CheckedType = CheckedType::Primitive(PrimitiveType::Boolean);
    pub const BYTE: CheckedType = CheckedType::Primitive(PrimitiveType::Byte);
    pub const SHORT: CheckedType = CheckedType::Primitive(PrimitiveType::Short);
    pub const CHAR: CheckedType = CheckedType::Primitive(PrimitiveType::Char);
    pub const INT: CheckedType = CheckedType::Primitive(PrimitiveType::Int);
    pub const LONG: CheckedType = CheckedType::Primitive(PrimitiveType::Long);
    pub const FLOAT: CheckedType = CheckedType::Primitive(PrimitiveType::Float);
    pub const DOUBLE: CheckedType = CheckedType::Primitive(PrimitiveType::Double);
    pub const OBJECT: CheckedType = CheckedType::Object(ClassDefId::OBJECT);
    pub const NULL: CheckedType = CheckedType::Null;
    pub const VOID: CheckedType = CheckedType::Void;

    /// Whether values of this type are objects (or `null`).
    pub fn is_object_type(&self) -> bool {
        match self {
            CheckedType::Object(_) | CheckedType::Null => true,
            CheckedType::Primitive(_) | CheckedType::Void => false,
        }
    }

    pub fn is_instantiable(&self) -> bool {
        match self {
            CheckedType::Object(_) => true,
            _ => false,
        }
    }
}

impl From<PrimitiveType> for CheckedType {
    fn from(primitive: PrimitiveType) -> CheckedType {
        CheckedType::Primitive(primitive)
    }
}
