//! Shared fixtures for unit tests.

use crate::config::GenerationConfig;
use crate::emit::MethodContext;
use crate::ir::{
    Class, ClassId, CodeTree, Method, MethodKind, Parameter, ParameterKind, Property, PropertyKind,
    TypeRef,
};
use crate::traits::Conventions;
use crate::translate::{Direction, Primitive};

/// Conventions that spell everything as it appears in the model.
pub(crate) struct PlainConventions;

impl Conventions for PlainConventions {
    fn primitive_type_name(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::String => "string",
            Primitive::Bool => "bool",
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Guid => "guid",
            Primitive::Timestamp => "timestamp",
        }
    }

    fn stream_type_name(&self) -> &'static str {
        "stream"
    }

    fn void_type_name(&self) -> &'static str {
        "void"
    }

    fn null_literal(&self) -> &'static str {
        "null"
    }

    fn accessor_prefix(&self, direction: Direction) -> &'static str {
        match direction {
            Direction::Read => "get",
            Direction::Write => "write",
        }
    }

    fn accessor_type_argument(&self, argument: &str) -> String {
        format!("<{argument}>")
    }

    fn collection_type(&self, element: &str) -> String {
        format!("{element}[]")
    }

    fn async_type(&self, syntax: &str) -> String {
        format!("Async<{syntax}>")
    }

    fn method_name(&self, name: &str) -> String {
        name.to_string()
    }

    fn member_name(&self, name: &str) -> String {
        name.to_string()
    }
}

/// A tree with one class, `parentClass`, holding one method, `methodName`.
pub(crate) struct Fixture {
    pub tree: CodeTree,
    pub class: ClassId,
    pub config: GenerationConfig,
    method: usize,
}

impl Fixture {
    pub fn new(kind: MethodKind) -> Self {
        let mut tree = CodeTree::new();
        let class = tree.add_class(tree.root(), "parentClass").unwrap();
        let mut fixture = Self {
            tree,
            class,
            config: GenerationConfig::default(),
            method: 0,
        };
        fixture
            .class_mut()
            .add_method(Method::new("methodName", kind).returning(TypeRef::new("Somecustomtype")));
        fixture
    }

    pub fn class_mut(&mut self) -> &mut Class {
        self.tree.class_mut(self.class).expect("fixture class")
    }

    pub fn method_mut(&mut self) -> &mut Method {
        let index = self.method;
        &mut self.class_mut().methods[index]
    }

    pub fn add_property(&mut self, property: Property) {
        self.class_mut().add_property(property).expect("unique property");
    }

    pub fn add_sibling(&mut self, method: Method) {
        self.class_mut().add_method(method);
    }

    pub fn add_inheritance(&mut self) {
        self.class_mut().set_inherits(TypeRef::new("someParentClass"));
    }

    pub fn add_serialization_properties(&mut self) {
        let root = self.tree.root();
        let complex = self.tree.add_class(root, "SomeComplexType").unwrap();
        let status = self.tree.add_enum(root, "EnumType").unwrap();
        self.add_property(Property::new(
            "additionalData",
            PropertyKind::AdditionalData,
            TypeRef::new("string"),
        ));
        self.add_property(Property::custom("dummyProp", TypeRef::new("string")));
        self.add_property(Property::custom("dummyColl", TypeRef::new("string").array()));
        self.add_property(Property::custom(
            "dummyComplexColl",
            TypeRef::new("Complex").array().with_class(complex),
        ));
        self.add_property(Property::custom(
            "dummyEnumCollection",
            TypeRef::new("SomeEnum").with_enum(status),
        ));
    }

    pub fn add_request_body_parameters(&mut self) {
        let string = TypeRef::new("string");
        self.method_mut().parameters.extend([
            Parameter::new("h", ParameterKind::Headers, string.clone()),
            Parameter::new("q", ParameterKind::QueryParameter, string.clone()),
            Parameter::new("b", ParameterKind::RequestBody, string.clone()),
            Parameter::new("r", ParameterKind::ResponseHandler, string),
        ]);
    }

    pub fn with_context<R>(&self, f: impl FnOnce(&MethodContext<'_>) -> R) -> R {
        let class = self.tree.class(self.class).expect("fixture class");
        let ctx = MethodContext::new(
            &self.tree,
            &PlainConventions,
            class,
            &class.methods[self.method],
            &self.config,
        );
        f(&ctx)
    }
}
