use crate::type_system::*;

/// Installs the root class `Object`. Must be the first class of every type
/// system so that it ends up under `ClassDefId::OBJECT`.
pub(crate) fn add_to(type_system: &mut TypeSystem) {
    let mut object_class_def = ClassDef::new("Object", vec![]);
    object_class_def
        .add_method(ClassMethodDef::new(
            "equals",
            vec![CheckedType::OBJECT],
            CheckedType::BOOLEAN,
        ))
        .expect("equals is declared once");
    object_class_def
        .add_method(ClassMethodDef::new("hashCode", vec![], CheckedType::INT))
        .expect("hashCode is declared once");

    let object_class_id = type_system
        .add_class_def(object_class_def)
        .expect("Object is the first class of a type system");
    debug_assert_eq!(ClassDefId::OBJECT, object_class_id);
}
