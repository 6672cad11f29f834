//! Type translation: a type occurrence to its emitted name and accessor family.
//!
//! The family is decided here, once, for every language. Backends only spell
//! it (see [`Conventions::accessor_name`]), so a property read with
//! `GetStringValue` in C# is read with `getStringValue` in Java and never
//! with a different shape.

use crate::error::EmitError;
use crate::ir::{CodeTree, Definition, TypeRef};
use crate::traits::Conventions;
use serde::Serialize;

/// Canonical primitive types with a dedicated accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Bool,
    Int,
    Float,
    Double,
    Guid,
    Timestamp,
}

impl Primitive {
    /// Recognise a model type name. Matching is case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "string" => Some(Self::String),
            "bool" | "boolean" => Some(Self::Bool),
            "int" | "integer" | "int32" => Some(Self::Int),
            "float" | "float32" => Some(Self::Float),
            "double" | "float64" | "number" => Some(Self::Double),
            "guid" | "uuid" => Some(Self::Guid),
            "timestamp" | "datetime" | "datetimeoffset" | "date-time" => Some(Self::Timestamp),
            _ => None,
        }
    }

    /// Primitives that are value types in languages that distinguish them.
    pub fn is_value_type(self) -> bool {
        !matches!(self, Self::String)
    }
}

/// Which half of a read/write accessor pair to spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

/// The read/write operation pair that moves a value of some shape through the
/// serialization format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "family", content = "type", rename_all = "snake_case")]
pub enum AccessorFamily {
    Primitive(Primitive),
    Enum(String),
    Object(String),
    CollectionOfPrimitive(String),
    CollectionOfObject(String),
}

impl AccessorFamily {
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            Self::CollectionOfPrimitive(_) | Self::CollectionOfObject(_)
        )
    }

    /// Syntax name the family is parameterized by, if any.
    pub fn type_argument(&self) -> Option<&str> {
        match self {
            Self::Primitive(_) => None,
            Self::Enum(name)
            | Self::Object(name)
            | Self::CollectionOfPrimitive(name)
            | Self::CollectionOfObject(name) => Some(name),
        }
    }
}

/// Result of translating one type occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Fully decorated type as written in declarations.
    pub syntax_name: String,
    pub family: AccessorFamily,
    /// Accessor spelled for the requested direction.
    pub accessor: String,
}

/// Pure mapping from [`TypeRef`] to emitted names, bound to one tree and one
/// language's conventions.
#[derive(Clone, Copy)]
pub struct TypeTranslator<'a> {
    tree: &'a CodeTree,
    conventions: &'a dyn Conventions,
}

impl<'a> TypeTranslator<'a> {
    pub fn new(tree: &'a CodeTree, conventions: &'a dyn Conventions) -> Self {
        Self { tree, conventions }
    }

    pub fn conventions(&self) -> &'a dyn Conventions {
        self.conventions
    }

    pub fn tree(&self) -> &'a CodeTree {
        self.tree
    }

    pub fn resolve(&self, ty: &TypeRef, direction: Direction) -> Result<ResolvedType, EmitError> {
        let family = self.family(ty)?;
        let accessor = self.conventions.accessor_name(&family, direction);
        Ok(ResolvedType {
            syntax_name: self.conventions.type_string(ty),
            family,
            accessor,
        })
    }

    /// Accessor family of a type occurrence. Collections win over enum links,
    /// enum links win over the primitive table, and anything else is an object.
    ///
    /// A link that does not resolve, or a collection linked to anything but a
    /// class, is a broken tree and fails.
    pub fn family(&self, ty: &TypeRef) -> Result<AccessorFamily, EmitError> {
        let element = self.conventions.translate_type(&ty.name);
        let definition = ty
            .definition
            .map(|link| {
                self.tree
                    .resolve(link)
                    .map(|def| (link, def))
                    .ok_or_else(|| EmitError::DanglingDefinition {
                        type_name: ty.name.clone(),
                        link,
                    })
            })
            .transpose()?;

        let family = match (ty.is_collection(), definition) {
            (true, None) => AccessorFamily::CollectionOfPrimitive(element),
            (true, Some((_, Definition::Class(_)))) => AccessorFamily::CollectionOfObject(element),
            (true, Some((link, Definition::Enum(_)))) => {
                return Err(EmitError::InvalidCollectionLink {
                    type_name: ty.name.clone(),
                    link,
                });
            }
            (false, Some((_, Definition::Enum(e)))) => {
                AccessorFamily::Enum(self.conventions.type_name(&e.name))
            }
            (false, _) => match Primitive::from_name(&ty.name) {
                Some(primitive) => AccessorFamily::Primitive(primitive),
                None => {
                    tracing::trace!(name = %ty.name, "no dedicated accessor, using object accessor");
                    AccessorFamily::Object(element)
                }
            },
        };
        Ok(family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ClassId, DefinitionRef, EnumId};

    #[test]
    fn recognises_primitive_aliases() {
        assert_eq!(Primitive::from_name("String"), Some(Primitive::String));
        assert_eq!(Primitive::from_name("boolean"), Some(Primitive::Bool));
        assert_eq!(Primitive::from_name("DateTimeOffset"), Some(Primitive::Timestamp));
        assert_eq!(Primitive::from_name("uuid"), Some(Primitive::Guid));
        assert_eq!(Primitive::from_name("User"), None);
    }

    #[test]
    fn family_type_argument() {
        assert_eq!(AccessorFamily::Primitive(Primitive::Int).type_argument(), None);
        assert_eq!(
            AccessorFamily::CollectionOfObject("User".into()).type_argument(),
            Some("User")
        );
        assert!(AccessorFamily::CollectionOfPrimitive("string".into()).is_collection());
        assert!(!AccessorFamily::Enum("Status".into()).is_collection());
    }

    fn family_of(tree: &CodeTree, ty: TypeRef) -> Result<AccessorFamily, EmitError> {
        TypeTranslator::new(tree, &crate::testing::PlainConventions).family(&ty)
    }

    #[test]
    fn links_pick_the_family() {
        let mut tree = CodeTree::new();
        let user = tree.add_class(tree.root(), "User").unwrap();
        let status = tree.add_enum(tree.root(), "Status").unwrap();
        assert_eq!(
            family_of(&tree, TypeRef::new("User").array().with_class(user)).unwrap(),
            AccessorFamily::CollectionOfObject("User".into())
        );
        assert_eq!(
            family_of(&tree, TypeRef::new("string").array()).unwrap(),
            AccessorFamily::CollectionOfPrimitive("string".into())
        );
        assert_eq!(
            family_of(&tree, TypeRef::new("Status").with_enum(status)).unwrap(),
            AccessorFamily::Enum("Status".into())
        );
        assert_eq!(
            family_of(&tree, TypeRef::new("Unknown")).unwrap(),
            AccessorFamily::Object("Unknown".into())
        );
    }

    #[test]
    fn dangling_link_fails() {
        let tree = CodeTree::new();
        let err = family_of(&tree, TypeRef::new("Ghost").with_enum(EnumId(42))).unwrap_err();
        assert!(matches!(
            err,
            EmitError::DanglingDefinition { ref type_name, link: DefinitionRef::Enum(EnumId(42)) }
                if type_name == "Ghost"
        ));
        assert!(err.is_structural());

        let err = family_of(&tree, TypeRef::new("User").array().with_class(ClassId(7)))
            .unwrap_err();
        assert!(matches!(err, EmitError::DanglingDefinition { .. }));
    }

    #[test]
    fn collection_linked_to_enum_fails() {
        let mut tree = CodeTree::new();
        let status = tree.add_enum(tree.root(), "Status").unwrap();
        let err = family_of(&tree, TypeRef::new("Status").array().with_enum(status))
            .unwrap_err();
        assert!(matches!(err, EmitError::InvalidCollectionLink { ref type_name, .. } if type_name == "Status"));
        assert!(err.is_structural());
    }
}
