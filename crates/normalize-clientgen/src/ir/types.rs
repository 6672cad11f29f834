//! Type references.

use super::{ClassId, EnumId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collection shape of a type occurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    #[default]
    None,
    Array,
}

/// Non-owning link from a type occurrence to a type defined in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionRef {
    Class(ClassId),
    Enum(EnumId),
}

impl fmt::Display for DefinitionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(id) => id.fmt(f),
            Self::Enum(id) => id.fmt(f),
        }
    }
}

/// A single occurrence of a type (property type, parameter type, return type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Base type name as the model builder spelled it (e.g. `string`, `User`).
    pub name: String,
    #[serde(default)]
    pub collection: CollectionKind,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Link to the defined class or enum, absent for primitives and external types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<DefinitionRef>,
    /// The type comes from a dependency rather than the generated code.
    #[serde(default)]
    pub external: bool,
}

fn default_nullable() -> bool {
    true
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection: CollectionKind::None,
            nullable: true,
            definition: None,
            external: false,
        }
    }

    pub fn array(mut self) -> Self {
        self.collection = CollectionKind::Array;
        self
    }

    pub fn non_nullable(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn external(mut self) -> Self {
        self.external = true;
        self
    }

    pub fn with_class(mut self, id: ClassId) -> Self {
        self.definition = Some(DefinitionRef::Class(id));
        self
    }

    pub fn with_enum(mut self, id: EnumId) -> Self {
        self.definition = Some(DefinitionRef::Enum(id));
        self
    }

    pub fn is_collection(&self) -> bool {
        self.collection != CollectionKind::None
    }
}
