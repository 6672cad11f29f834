//! Method body emitters.
//!
//! Each semantic method kind has one planning function here. A plan is the
//! language-neutral outcome of the algorithm (which properties, in which
//! order, with which accessor, calling which sibling), and backends only
//! render plans. Ordering, pairing and validation therefore live in one place
//! and hold for every target language.

mod accessor;
mod construct;
mod declaration;
mod request;
mod serialization;
mod structure;

pub use accessor::{AccessorKind, AccessorPlan, plan_accessor};
pub use construct::{Binding, ConstructorPlan, plan_constructor};
pub use declaration::{
    DocPlan, Guard, GuardCheck, ParameterDecl, PrototypePlan, plan_doc, plan_guards, plan_prototype,
};
pub use request::{
    AddressPart, BodyPlan, IndexerPlan, QueryPlan, RequestExecutorPlan, RequestGeneratorPlan,
    SendKind, plan_indexer, plan_request_executor, plan_request_generator,
};
pub use serialization::{
    DeserializerEntry, DeserializerPlan, SerializerPlan, SerializerWrite, plan_deserializer,
    plan_serializer,
};
pub use structure::{
    ClassDecl, EnumDecl, EnumMember, ImportPlan, NavigationPlan, PropertyPlan, PropertyShape, plan_class,
    plan_enum, plan_property,
};

use crate::config::GenerationConfig;
use crate::error::EmitError;
use crate::ir::{Class, CodeTree, HttpMethod, Method, PropertyKind, TypeRef};
use crate::traits::Conventions;
use crate::translate::TypeTranslator;

/// Fallback names for the structural properties a class may omit.
pub const CURRENT_PATH: &str = "currentPath";
pub const PATH_SEGMENT: &str = "pathSegment";
pub const HTTP_CORE: &str = "httpCore";

/// Everything an emitter may read while planning one method.
#[derive(Clone, Copy)]
pub struct MethodContext<'a> {
    pub translator: TypeTranslator<'a>,
    pub class: &'a Class,
    pub method: &'a Method,
    pub config: &'a GenerationConfig,
}

impl<'a> MethodContext<'a> {
    pub fn new(
        tree: &'a CodeTree,
        conventions: &'a dyn Conventions,
        class: &'a Class,
        method: &'a Method,
        config: &'a GenerationConfig,
    ) -> Self {
        Self {
            translator: TypeTranslator::new(tree, conventions),
            class,
            method,
            config,
        }
    }

    pub fn conventions(&self) -> &'a dyn Conventions {
        self.translator.conventions()
    }

    pub fn return_type(&self) -> Result<&'a TypeRef, EmitError> {
        self.method
            .return_type
            .as_ref()
            .ok_or_else(|| EmitError::MissingReturnType {
                method: self.method.name.clone(),
            })
    }

    pub fn http_method(&self) -> Result<HttpMethod, EmitError> {
        self.method
            .http_method
            .ok_or_else(|| EmitError::MissingHttpMethod {
                method: self.method.name.clone(),
                kind: self.method.kind,
            })
    }

    /// Decorated return type, or `None` for constructors without one.
    pub fn return_syntax(&self) -> Option<String> {
        self.method
            .return_type
            .as_ref()
            .map(|ty| self.conventions().type_string(ty))
    }

    pub fn returns_void(&self) -> bool {
        self.return_syntax()
            .is_some_and(|ty| ty.eq_ignore_ascii_case(self.conventions().void_type_name()))
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators::of(self.class)
    }
}

/// Names of the structural properties generated code reaches through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collaborators {
    pub current_path: String,
    pub has_current_path: bool,
    pub path_segment: String,
    pub http_core: String,
}

impl Collaborators {
    pub fn of(class: &Class) -> Self {
        let name_of = |kind, fallback: &str| {
            class
                .property_of_kind(kind)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| fallback.to_string())
        };
        Self {
            current_path: name_of(PropertyKind::CurrentPath, CURRENT_PATH),
            has_current_path: class.property_of_kind(PropertyKind::CurrentPath).is_some(),
            path_segment: name_of(PropertyKind::PathSegment, PATH_SEGMENT),
            http_core: name_of(PropertyKind::HttpCore, HTTP_CORE),
        }
    }
}
