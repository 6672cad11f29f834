//! Intermediate code model for generated API clients.
//!
//! The model builder constructs a [`CodeTree`] once per generation run and
//! the writers only ever read it. Ownership flows namespace → class/enum →
//! members; type references point back into the tree through
//! [`DefinitionRef`] indices, never through shared ownership, so a link may
//! be absent for primitive and external types.
//!
//! ```
//! use normalize_clientgen::ir::{CodeTree, Property, TypeRef};
//!
//! let mut tree = CodeTree::new();
//! let ns = tree.add_namespace(tree.root(), "graph").unwrap();
//! let user = tree.add_class(ns, "User").unwrap();
//! tree.class_mut(user)
//!     .unwrap()
//!     .add_property(Property::custom("displayName", TypeRef::new("string")))
//!     .unwrap();
//!
//! assert_eq!(tree.namespace_path(ns), "graph");
//! ```

mod members;
mod types;

pub use members::{
    AccessModifier, HttpMethod, Method, MethodKind, Parameter, ParameterKind, Property,
    PropertyKind,
};
pub use types::{CollectionKind, DefinitionRef, TypeRef};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error raised while assembling a tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("class `{class}` already has a {kind:?} property")]
    DuplicateProperty { class: String, kind: PropertyKind },

    #[error("code tree has no root namespace")]
    MissingRoot,

    #[error("{0} does not exist in the code tree")]
    UnknownNamespace(NamespaceId),

    #[error("{0} does not exist in the code tree")]
    UnknownClass(ClassId),

    #[error("{0} does not exist in the code tree")]
    UnknownEnum(EnumId),

    #[error("{namespace} must name an earlier namespace as its parent")]
    InvalidParent { namespace: NamespaceId },

    #[error("invalid code tree: {0}")]
    Json(#[from] serde_json::Error),
}

macro_rules! node_id {
    ($name:ident, $label:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

node_id!(NamespaceId, "namespace");
node_id!(ClassId, "class");
node_id!(EnumId, "enum");

/// A namespace (package / module) and the ids of what it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    /// `None` only for the root namespace.
    pub parent: Option<NamespaceId>,
    #[serde(default)]
    pub namespaces: Vec<NamespaceId>,
    #[serde(default)]
    pub classes: Vec<ClassId>,
    #[serde(default)]
    pub enums: Vec<EnumId>,
}

/// An import of another type into a class's file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Using {
    /// Imported symbol or namespace name.
    pub name: String,
    /// Module or namespace the symbol comes from, for external imports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Imported definition when it lives in this tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<DefinitionRef>,
}

impl Using {
    pub fn external(name: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: Some(from.into()),
            definition: None,
        }
    }

    pub fn internal(name: impl Into<String>, definition: DefinitionRef) -> Self {
        Self {
            name: name.into(),
            from: None,
            definition: Some(definition),
        }
    }
}

/// A class: the unit most emitters work on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    pub parent: NamespaceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits: Option<TypeRef>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub usings: Vec<Using>,
}

impl Class {
    fn new(name: String, parent: NamespaceId) -> Self {
        Self {
            name,
            parent,
            description: None,
            inherits: None,
            properties: Vec::new(),
            methods: Vec::new(),
            usings: Vec::new(),
        }
    }

    /// Add a property, rejecting a second AdditionalData or HttpCore property.
    pub fn add_property(&mut self, property: Property) -> Result<&mut Property, TreeError> {
        if property.kind.is_singleton() && self.property_of_kind(property.kind).is_some() {
            return Err(TreeError::DuplicateProperty {
                class: self.name.clone(),
                kind: property.kind,
            });
        }
        self.properties.push(property);
        let last = self.properties.len() - 1;
        Ok(&mut self.properties[last])
    }

    pub fn add_method(&mut self, method: Method) -> &mut Method {
        self.methods.push(method);
        let last = self.methods.len() - 1;
        &mut self.methods[last]
    }

    pub fn add_using(&mut self, using: Using) {
        if !self.usings.contains(&using) {
            self.usings.push(using);
        }
    }

    pub fn set_inherits(&mut self, base: TypeRef) {
        self.inherits = Some(base);
    }

    pub fn inherits(&self) -> bool {
        self.inherits.is_some()
    }

    pub fn property_of_kind(&self, kind: PropertyKind) -> Option<&Property> {
        self.properties.iter().find(|p| p.kind == kind)
    }

    pub fn property_named(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Whether the class stores its values in a backing store.
    pub fn uses_backing_store(&self) -> bool {
        self.property_of_kind(PropertyKind::BackingStore).is_some()
    }

    /// Custom properties in ascending name order, ties kept in declaration order.
    pub fn custom_properties(&self) -> Vec<&Property> {
        let mut props: Vec<&Property> = self
            .properties
            .iter()
            .filter(|p| p.kind == PropertyKind::Custom)
            .collect();
        props.sort_by(|a, b| a.name.cmp(&b.name));
        props
    }

    /// The request generator paired with an executor of the given verb.
    pub fn request_generator_for(&self, verb: HttpMethod) -> Option<&Method> {
        self.methods
            .iter()
            .find(|m| m.kind == MethodKind::RequestGenerator && m.http_method == Some(verb))
    }
}

/// An enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    pub parent: NamespaceId,
    #[serde(default)]
    pub flags: bool,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Enum {
    pub fn add_member(&mut self, member: impl Into<String>) {
        self.members.push(member.into());
    }
}

/// A resolved [`DefinitionRef`].
#[derive(Debug, Clone, Copy)]
pub enum Definition<'a> {
    Class(&'a Class),
    Enum(&'a Enum),
}

impl Definition<'_> {
    pub fn name(&self) -> &str {
        match self {
            Self::Class(c) => &c.name,
            Self::Enum(e) => &e.name,
        }
    }

    pub fn parent(&self) -> NamespaceId {
        match self {
            Self::Class(c) => c.parent,
            Self::Enum(e) => e.parent,
        }
    }
}

/// The whole client model. Index 0 of `namespaces` is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeTree {
    namespaces: Vec<Namespace>,
    #[serde(default)]
    classes: Vec<Class>,
    #[serde(default)]
    enums: Vec<Enum>,
}

impl Default for CodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeTree {
    pub fn new() -> Self {
        Self {
            namespaces: vec![Namespace {
                name: String::new(),
                parent: None,
                namespaces: Vec::new(),
                classes: Vec::new(),
                enums: Vec::new(),
            }],
            classes: Vec::new(),
            enums: Vec::new(),
        }
    }

    /// Load a tree handed over by the model builder as JSON. Every id the
    /// tree stores must point at a node it holds.
    pub fn from_json(input: &str) -> Result<Self, TreeError> {
        let tree: Self = serde_json::from_str(input)?;
        tree.validate()?;
        Ok(tree)
    }

    /// The root comes first and is the only namespace without a parent.
    /// Every other namespace names an earlier one, so parent chains end.
    fn validate(&self) -> Result<(), TreeError> {
        let root = self.namespaces.first().ok_or(TreeError::MissingRoot)?;
        if root.parent.is_some() {
            return Err(TreeError::InvalidParent {
                namespace: NamespaceId(0),
            });
        }
        for (i, ns) in self.namespaces.iter().enumerate().skip(1) {
            match ns.parent {
                Some(parent) if parent.0 < i => {}
                _ => {
                    return Err(TreeError::InvalidParent {
                        namespace: NamespaceId(i),
                    });
                }
            }
        }
        for ns in &self.namespaces {
            if let Some(&id) = ns.namespaces.iter().find(|id| id.0 >= self.namespaces.len()) {
                return Err(TreeError::UnknownNamespace(id));
            }
            if let Some(&id) = ns.classes.iter().find(|id| id.0 >= self.classes.len()) {
                return Err(TreeError::UnknownClass(id));
            }
            if let Some(&id) = ns.enums.iter().find(|id| id.0 >= self.enums.len()) {
                return Err(TreeError::UnknownEnum(id));
            }
        }
        let parents = self
            .classes
            .iter()
            .map(|c| c.parent)
            .chain(self.enums.iter().map(|e| e.parent));
        for parent in parents {
            self.namespace(parent)
                .ok_or(TreeError::UnknownNamespace(parent))?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, TreeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn root(&self) -> NamespaceId {
        NamespaceId(0)
    }

    /// Child namespace with the given name, created if missing.
    pub fn add_namespace(
        &mut self,
        parent: NamespaceId,
        name: impl Into<String>,
    ) -> Result<NamespaceId, TreeError> {
        let name = name.into();
        let siblings = &self
            .namespaces
            .get(parent.0)
            .ok_or(TreeError::UnknownNamespace(parent))?
            .namespaces;
        if let Some(existing) = siblings
            .iter()
            .copied()
            .find(|id| self.namespaces.get(id.0).is_some_and(|ns| ns.name == name))
        {
            return Ok(existing);
        }
        let id = NamespaceId(self.namespaces.len());
        self.namespaces.push(Namespace {
            name,
            parent: Some(parent),
            namespaces: Vec::new(),
            classes: Vec::new(),
            enums: Vec::new(),
        });
        self.namespace_mut(parent)?.namespaces.push(id);
        Ok(id)
    }

    /// Class with the given name in `namespace`, created if missing.
    pub fn add_class(
        &mut self,
        namespace: NamespaceId,
        name: impl Into<String>,
    ) -> Result<ClassId, TreeError> {
        let name = name.into();
        let owner = self
            .namespaces
            .get(namespace.0)
            .ok_or(TreeError::UnknownNamespace(namespace))?;
        if let Some(existing) = owner
            .classes
            .iter()
            .copied()
            .find(|id| self.classes.get(id.0).is_some_and(|c| c.name == name))
        {
            return Ok(existing);
        }
        let id = ClassId(self.classes.len());
        self.classes.push(Class::new(name, namespace));
        self.namespace_mut(namespace)?.classes.push(id);
        Ok(id)
    }

    /// Enum with the given name in `namespace`, created if missing.
    pub fn add_enum(
        &mut self,
        namespace: NamespaceId,
        name: impl Into<String>,
    ) -> Result<EnumId, TreeError> {
        let name = name.into();
        let owner = self
            .namespaces
            .get(namespace.0)
            .ok_or(TreeError::UnknownNamespace(namespace))?;
        if let Some(existing) = owner
            .enums
            .iter()
            .copied()
            .find(|id| self.enums.get(id.0).is_some_and(|e| e.name == name))
        {
            return Ok(existing);
        }
        let id = EnumId(self.enums.len());
        self.enums.push(Enum {
            name,
            parent: namespace,
            flags: false,
            members: Vec::new(),
            description: None,
        });
        self.namespace_mut(namespace)?.enums.push(id);
        Ok(id)
    }

    fn namespace_mut(&mut self, id: NamespaceId) -> Result<&mut Namespace, TreeError> {
        self.namespaces
            .get_mut(id.0)
            .ok_or(TreeError::UnknownNamespace(id))
    }

    pub fn namespace(&self, id: NamespaceId) -> Option<&Namespace> {
        self.namespaces.get(id.0)
    }

    pub fn class(&self, id: ClassId) -> Option<&Class> {
        self.classes.get(id.0)
    }

    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut Class> {
        self.classes.get_mut(id.0)
    }

    pub fn enum_def(&self, id: EnumId) -> Option<&Enum> {
        self.enums.get(id.0)
    }

    pub fn enum_mut(&mut self, id: EnumId) -> Option<&mut Enum> {
        self.enums.get_mut(id.0)
    }

    /// Follow a weak type link. `None` when the id is dangling.
    pub fn resolve(&self, link: DefinitionRef) -> Option<Definition<'_>> {
        match link {
            DefinitionRef::Class(id) => self.class(id).map(Definition::Class),
            DefinitionRef::Enum(id) => self.enum_def(id).map(Definition::Enum),
        }
    }

    /// All classes in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &Class)> {
        self.classes.iter().enumerate().map(|(i, c)| (ClassId(i), c))
    }

    /// All enums in insertion order.
    pub fn enums(&self) -> impl Iterator<Item = (EnumId, &Enum)> {
        self.enums.iter().enumerate().map(|(i, e)| (EnumId(i), e))
    }

    /// Dotted path from the root, e.g. `graph.users`. Empty for the root.
    pub fn namespace_path(&self, id: NamespaceId) -> String {
        let mut segments = Vec::new();
        let mut current = self.namespace(id);
        while let Some(ns) = current {
            if !ns.name.is_empty() {
                segments.push(ns.name.as_str());
            }
            current = ns.parent.and_then(|p| self.namespace(p));
        }
        segments.reverse();
        segments.join(".")
    }
}
