//! Fixtures shared by the writer tests.
#![allow(dead_code)]

use normalize_clientgen::ir::{
    Class, ClassId, CodeTree, EnumId, HttpMethod, Method, MethodKind, Parameter, ParameterKind, Property,
    PropertyKind, TypeRef,
};
use normalize_clientgen::{CodeWriter, EmitError, GeneratedUnit, GenerationConfig, Language};

/// Opening and closing braces balance, and never close more than was opened.
pub fn assert_braces_closed(source: &str) {
    let mut depth = 0i64;
    for (line_no, line) in source.lines().enumerate() {
        for c in line.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            assert!(depth >= 0, "unbalanced `}}` on line {}:\n{source}", line_no + 1);
        }
    }
    assert_eq!(depth, 0, "unclosed `{{` in:\n{source}");
}

/// Byte offset of `needle`, panicking with the source when absent.
pub fn position(source: &str, needle: &str) -> usize {
    source
        .find(needle)
        .unwrap_or_else(|| panic!("`{needle}` not found in:\n{source}"))
}

/// A tree holding one class, `parentClass`, in the root namespace.
pub struct Sample {
    pub tree: CodeTree,
    pub class: ClassId,
}

impl Sample {
    pub fn new() -> Self {
        let mut tree = CodeTree::new();
        let class = tree.add_class(tree.root(), "parentClass").unwrap();
        Self { tree, class }
    }

    pub fn class_mut(&mut self) -> &mut Class {
        self.tree.class_mut(self.class).unwrap()
    }

    /// Adds `method` and returns its index.
    pub fn add_method(&mut self, method: Method) -> usize {
        let class = self.class_mut();
        class.add_method(method);
        class.methods.len() - 1
    }

    /// Adds `property` and returns its index.
    pub fn add_property(&mut self, property: Property) -> usize {
        let class = self.class_mut();
        class.add_property(property).unwrap();
        class.properties.len() - 1
    }

    pub fn add_inheritance(&mut self) {
        self.class_mut().set_inherits(TypeRef::new("someParentClass"));
    }

    /// `additionalData` plus four custom properties covering every collection
    /// and enum accessor family.
    pub fn add_serialization_properties(&mut self) {
        let root = self.tree.root();
        let complex = self.tree.add_class(root, "Complex").unwrap();
        let status = self.tree.add_enum(root, "EnumType").unwrap();
        self.tree.enum_mut(status).unwrap().add_member("one");
        self.add_property(Property::new(
            "additionalData",
            PropertyKind::AdditionalData,
            TypeRef::new("IDictionary<string, object>"),
        ));
        self.add_property(Property::custom("dummyProp", TypeRef::new("string")));
        self.add_property(Property::custom("dummyColl", TypeRef::new("string").array()));
        self.add_property(Property::custom(
            "dummyComplexColl",
            TypeRef::new("Complex").array().with_class(complex),
        ));
        self.add_property(Property::custom(
            "dummyEnumCollection",
            TypeRef::new("EnumType").with_enum(status),
        ));
    }

    /// Adds an enum to the root namespace.
    pub fn add_enum<S: Into<String>>(
        &mut self,
        name: &str,
        flags: bool,
        members: impl IntoIterator<Item = S>,
    ) -> EnumId {
        let id = self.tree.add_enum(self.tree.root(), name).unwrap();
        let definition = self.tree.enum_mut(id).unwrap();
        definition.flags = flags;
        for member in members {
            definition.add_member(member);
        }
        id
    }

    pub fn add_structural_properties(&mut self) {
        self.add_property(Property::new(
            "httpCore",
            PropertyKind::HttpCore,
            TypeRef::new("HttpCore"),
        ));
        self.add_property(Property::new(
            "currentPath",
            PropertyKind::CurrentPath,
            TypeRef::new("string"),
        ));
        self.add_property(
            Property::new("pathSegment", PropertyKind::PathSegment, TypeRef::new("string"))
                .with_default("\"somePath\""),
        );
    }

    pub fn render(&self, language: Language, index: usize) -> Result<String, EmitError> {
        self.render_with(&GenerationConfig::for_language(language), index)
    }

    pub fn render_with(&self, config: &GenerationConfig, index: usize) -> Result<String, EmitError> {
        CodeWriter::new(&self.tree, config)?.render_method(self.class, index)
    }

    pub fn render_enum(&self, language: Language, id: EnumId) -> Result<GeneratedUnit, EmitError> {
        let config = GenerationConfig::for_language(language);
        CodeWriter::new(&self.tree, &config)?.write_enum(id)
    }

    pub fn render_property(&self, language: Language, index: usize) -> Result<String, EmitError> {
        let config = GenerationConfig::for_language(language);
        CodeWriter::new(&self.tree, &config)?.render_property(self.class, index)
    }
}

/// `methodName` of the given kind returning `Somecustomtype`.
pub fn method(kind: MethodKind) -> Method {
    Method::new("methodName", kind).returning(TypeRef::new("Somecustomtype"))
}

/// Async GET method with body, query, headers and response handler parameters.
pub fn request_method(kind: MethodKind) -> Method {
    let string = TypeRef::new("string");
    method(kind)
        .with_http_method(HttpMethod::Get)
        .asynchronous()
        .with_content_type("application/json")
        .with_parameter(Parameter::new("h", ParameterKind::Headers, string.clone()))
        .with_parameter(Parameter::new("q", ParameterKind::QueryParameter, string.clone()))
        .with_parameter(Parameter::new("b", ParameterKind::RequestBody, string.clone()))
        .with_parameter(Parameter::new("r", ParameterKind::ResponseHandler, string))
}

/// Serializer or deserializer taking one non-string parameter.
pub fn serialization_method(kind: MethodKind, parameter_type: &str) -> Method {
    let method = Method::new("methodName", kind);
    match kind {
        MethodKind::Serializer => method.returning(TypeRef::new("void")).with_parameter(
            Parameter::new("writer", ParameterKind::Other, TypeRef::new(parameter_type)),
        ),
        _ => method.returning(TypeRef::new(parameter_type)),
    }
}

pub fn constructor(kind: MethodKind) -> Method {
    let method = Method::new("constructor", kind).with_parameter(Parameter::new(
        "httpCore",
        ParameterKind::HttpCore,
        TypeRef::new("HttpCore"),
    ));
    if kind == MethodKind::Constructor {
        method.with_parameter(Parameter::new(
            "currentPath",
            ParameterKind::CurrentPath,
            TypeRef::new("string"),
        ))
    } else {
        method
    }
}
