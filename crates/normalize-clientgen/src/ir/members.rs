//! Class members: properties, methods and their parameters.

use super::TypeRef;
use crate::naming::first_lower;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visibility of a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessModifier {
    #[default]
    Public,
    Protected,
    Private,
}

/// HTTP verb carried by request generators and executors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
    Options,
    Head,
    Connect,
    Trace,
}

impl HttpMethod {
    /// Upper-case wire spelling (`GET`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Connect => "CONNECT",
            Self::Trace => "TRACE",
        }
    }

    /// Pascal-case spelling used to derive identifiers (`Get`).
    pub fn pascal(self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Post => "Post",
            Self::Patch => "Patch",
            Self::Put => "Put",
            Self::Delete => "Delete",
            Self::Options => "Options",
            Self::Head => "Head",
            Self::Connect => "Connect",
            Self::Trace => "Trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generation-time role of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Custom,
    AdditionalData,
    RequestBuilder,
    HttpCore,
    CurrentPath,
    PathSegment,
    BackingStore,
}

impl PropertyKind {
    /// Order in which constructors assign defaults: structural properties first.
    pub fn assignment_priority(self) -> u8 {
        match self {
            Self::HttpCore => 0,
            Self::CurrentPath => 1,
            Self::PathSegment => 2,
            Self::BackingStore => 3,
            Self::AdditionalData => 4,
            Self::RequestBuilder => 5,
            Self::Custom => 6,
        }
    }

    /// At most one property of this kind may exist per class.
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::AdditionalData | Self::HttpCore)
    }
}

/// A property of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub read_only: bool,
    /// Key used on the wire when it differs from the property name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialization_name: Option<String>,
    #[serde(default)]
    pub access: AccessModifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Property {
    pub fn new(name: impl Into<String>, kind: PropertyKind, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            default_value: None,
            read_only: false,
            serialization_name: None,
            access: AccessModifier::Public,
            description: None,
        }
    }

    pub fn custom(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, PropertyKind::Custom, ty)
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_serialization_name(mut self, name: impl Into<String>) -> Self {
        self.serialization_name = Some(name.into());
        self
    }

    pub fn with_access(mut self, access: AccessModifier) -> Self {
        self.access = access;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Key the serializer and deserializer use for this property.
    pub fn serialization_key(&self) -> String {
        self.serialization_name
            .clone()
            .unwrap_or_else(|| first_lower(&self.name))
    }
}

/// Generation-time role of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Serializer,
    Deserializer,
    RequestGenerator,
    RequestExecutor,
    Constructor,
    ClientConstructor,
    Getter,
    Setter,
    IndexerCompat,
    Custom,
}

impl MethodKind {
    pub fn is_constructor(self) -> bool {
        matches!(self, Self::Constructor | Self::ClientConstructor)
    }

    pub fn is_serialization(self) -> bool {
        matches!(self, Self::Serializer | Self::Deserializer)
    }

    pub fn is_accessor(self) -> bool {
        matches!(self, Self::Getter | Self::Setter)
    }

    pub fn requires_http_method(self) -> bool {
        matches!(self, Self::RequestGenerator | Self::RequestExecutor)
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Serializer => "serializer",
            Self::Deserializer => "deserializer",
            Self::RequestGenerator => "request generator",
            Self::RequestExecutor => "request executor",
            Self::Constructor => "constructor",
            Self::ClientConstructor => "client constructor",
            Self::Getter => "getter",
            Self::Setter => "setter",
            Self::IndexerCompat => "indexer",
            Self::Custom => "custom method",
        };
        f.write_str(name)
    }
}

/// Generation-time role of a parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    RequestBody,
    QueryParameter,
    Headers,
    ResponseHandler,
    HttpCore,
    CurrentPath,
    #[default]
    Other,
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub kind: ParameterKind,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParameterKind, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            kind,
            optional: false,
            description: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A method of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub kind: MethodKind,
    /// Required for every kind except constructors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<HttpMethod>,
    #[serde(default)]
    pub is_async: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub access: AccessModifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub serializer_modules: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deserializer_modules: Vec<String>,
    /// Name of the property a getter or setter reads or writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessed_property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_segment: Option<String>,
}

impl Method {
    pub fn new(name: impl Into<String>, kind: MethodKind) -> Self {
        Self {
            name: name.into(),
            kind,
            return_type: None,
            parameters: Vec::new(),
            http_method: None,
            is_async: false,
            is_static: false,
            access: AccessModifier::Public,
            description: None,
            serializer_modules: Vec::new(),
            deserializer_modules: Vec::new(),
            accessed_property: None,
            content_type: None,
            path_segment: None,
        }
    }

    pub fn returning(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_http_method(mut self, method: HttpMethod) -> Self {
        self.http_method = Some(method);
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn with_access(mut self, access: AccessModifier) -> Self {
        self.access = access;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_path_segment(mut self, segment: impl Into<String>) -> Self {
        self.path_segment = Some(segment.into());
        self
    }

    pub fn accessing(mut self, property: impl Into<String>) -> Self {
        self.accessed_property = Some(property.into());
        self
    }

    /// First parameter of the given kind, in declaration order.
    pub fn parameter_of_kind(&self, kind: ParameterKind) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_key_prefers_explicit_name() {
        let plain = Property::custom("DisplayName", TypeRef::new("string"));
        assert_eq!(plain.serialization_key(), "displayName");

        let renamed = plain.with_serialization_name("display_name");
        assert_eq!(renamed.serialization_key(), "display_name");
    }

    #[test]
    fn structural_properties_are_assigned_first() {
        let mut kinds = vec![
            PropertyKind::Custom,
            PropertyKind::PathSegment,
            PropertyKind::AdditionalData,
            PropertyKind::HttpCore,
        ];
        kinds.sort_by_key(|k| k.assignment_priority());
        assert_eq!(
            kinds,
            vec![
                PropertyKind::HttpCore,
                PropertyKind::PathSegment,
                PropertyKind::AdditionalData,
                PropertyKind::Custom,
            ]
        );
    }

    #[test]
    fn http_method_spellings() {
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
        assert_eq!(HttpMethod::Patch.pascal(), "Patch");
        let parsed: HttpMethod = serde_json::from_str("\"DELETE\"").unwrap();
        assert_eq!(parsed, HttpMethod::Delete);
    }
}
