#![allow(dead_code)]

//! A small graphics library used as the type universe of the tests:
//!
//! ```java
//! class Point { Point(double x, double y); double getX(); double getY(); }
//! class Size { Size(double width, double height); double getWidth(); double getHeight(); }
//! class GraphicsObject {
//!     double getX(); double getY(); Point getPosition(); Size getSize();
//!     void setPosition(double x, double y);
//! }
//! interface Paint {}
//! class Color implements Paint { Color(int r, int g, int b); }
//! interface Fillable { void setFillColor(Paint fillColor); Paint getFillColor(); }
//! interface Strokable { void setStrokeColor(Paint strokeColor); Paint getStrokeColor(); }
//! class Rectangle extends GraphicsObject implements Strokable, Fillable {
//!     Rectangle(Point position, Size size);
//! }
//! class GraphicsGroup extends GraphicsObject {
//!     void add(GraphicsObject gObject); GraphicsObject getElementAt(Point position);
//! }
//! class Window { Size getSize(); }
//! ```

use type_checking::{CheckedType, Expr, TypeError, TypeErrorKind, TypeSystem};
use type_system::{ClassDef, ClassDefId, ClassMethodDef, ConstructorDef};

pub struct Graphics {
    pub ts: TypeSystem,
    pub point: CheckedType,
    pub size: CheckedType,
    pub graphics_object: CheckedType,
    pub paint: CheckedType,
    pub color: CheckedType,
    pub fillable: CheckedType,
    pub strokable: CheckedType,
    pub rectangle: CheckedType,
    pub graphics_group: CheckedType,
    pub window: CheckedType,
}

fn declare(
    ts: &mut TypeSystem,
    name: &str,
    supertypes: Vec<ClassDefId>,
    constructor: Option<Vec<CheckedType>>,
    methods: Vec<ClassMethodDef>,
) -> ClassDefId {
    let id = ts.add_class_def(ClassDef::new(name, supertypes)).unwrap();
    let class = ts.class_mut(id);
    if let Some(params) = constructor {
        class.set_constructor(ConstructorDef::new(params)).unwrap();
    }
    for method in methods {
        class.add_method(method).unwrap();
    }
    id
}

fn method(name: &str, params: Vec<CheckedType>, return_ty: CheckedType) -> ClassMethodDef {
    ClassMethodDef::new(name, params, return_ty)
}

impl Graphics {
    pub fn new() -> Graphics {
        use type_checking::CheckedType as T;

        init_logging();

        let mut ts = TypeSystem::new();
        let object = ClassDefId::OBJECT;

        let point = declare(
            &mut ts,
            "Point",
            vec![object],
            Some(vec![T::DOUBLE, T::DOUBLE]),
            vec![
                method("getX", vec![], T::DOUBLE),
                method("getY", vec![], T::DOUBLE),
            ],
        );
        let size = declare(
            &mut ts,
            "Size",
            vec![object],
            Some(vec![T::DOUBLE, T::DOUBLE]),
            vec![
                method("getWidth", vec![], T::DOUBLE),
                method("getHeight", vec![], T::DOUBLE),
            ],
        );
        let graphics_object = declare(
            &mut ts,
            "GraphicsObject",
            vec![object],
            None,
            vec![
                method("getX", vec![], T::DOUBLE),
                method("getY", vec![], T::DOUBLE),
                method("getPosition", vec![], point.into()),
                method("getSize", vec![], size.into()),
                method("setPosition", vec![T::DOUBLE, T::DOUBLE], T::VOID),
            ],
        );
        let paint = declare(&mut ts, "Paint", vec![object], None, vec![]);
        let color = declare(
            &mut ts,
            "Color",
            vec![paint],
            Some(vec![T::INT, T::INT, T::INT]),
            vec![],
        );
        let fillable = declare(
            &mut ts,
            "Fillable",
            vec![object],
            None,
            vec![
                method("setFillColor", vec![paint.into()], T::VOID),
                method("getFillColor", vec![], paint.into()),
            ],
        );
        let strokable = declare(
            &mut ts,
            "Strokable",
            vec![object],
            None,
            vec![
                method("setStrokeColor", vec![paint.into()], T::VOID),
                method("getStrokeColor", vec![], paint.into()),
            ],
        );
        let rectangle = declare(
            &mut ts,
            "Rectangle",
            vec![graphics_object, strokable, fillable],
            Some(vec![point.into(), size.into()]),
            vec![],
        );
        let graphics_group = declare(
            &mut ts,
            "GraphicsGroup",
            vec![graphics_object],
            None,
            vec![
                method("add", vec![graphics_object.into()], T::VOID),
                method("getElementAt", vec![point.into()], graphics_object.into()),
            ],
        );
        let window = declare(
            &mut ts,
            "Window",
            vec![object],
            None,
            vec![method("getSize", vec![], size.into())],
        );

        Graphics {
            ts,
            point: point.into(),
            size: size.into(),
            graphics_object: graphics_object.into(),
            paint: paint.into(),
            color: color.into(),
            fillable: fillable.into(),
            strokable: strokable.into(),
            rectangle: rectangle.into(),
            graphics_group: graphics_group.into(),
            window: window.into(),
        }
    }

    pub fn assert_subtype(&self, sub: CheckedType, sup: CheckedType) {
        assert!(
            self.ts.is_subtype_of(&sub, &sup),
            "expected {} to be a subtype of {}",
            self.ts.type_name(&sub),
            self.ts.type_name(&sup)
        );
    }

    pub fn assert_not_subtype(&self, sub: CheckedType, sup: CheckedType) {
        assert!(
            !self.ts.is_subtype_of(&sub, &sup),
            "expected {} not to be a subtype of {}",
            self.ts.type_name(&sub),
            self.ts.type_name(&sup)
        );
    }

    pub fn assert_no_compile_errors(&self, expr: &Expr) {
        if let Err(err) = expr.check_types(&self.ts) {
            panic!("unexpected type error: {}", err);
        }
    }

    pub fn assert_compile_error(&self, kind: TypeErrorKind, message: &str, expr: &Expr) {
        let err: TypeError = expr
            .check_types(&self.ts)
            .expect_err("expected a type error");
        assert_eq!(message, err.to_string());
        assert_eq!(kind, err.kind(), "wrong kind of error: {}", err);
    }
}

fn init_logging() {
    // RUST_LOG=type_checking=trace shows every visited node
    let _ = env_logger::try_init();
}
