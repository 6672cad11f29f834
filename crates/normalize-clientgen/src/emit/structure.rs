//! Class, enum and property declarations.

use super::{AddressPart, Collaborators};
use crate::config::GenerationConfig;
use crate::error::EmitError;
use crate::ir::{Class, CodeTree, Definition, Enum, MethodKind, NamespaceId, Property, PropertyKind};
use crate::traits::Conventions;

/// Dotted namespace of a node. The unnamed root is the client namespace.
fn namespace_of(tree: &CodeTree, config: &GenerationConfig, id: NamespaceId) -> String {
    let path = tree.namespace_path(id);
    match (config.client_namespace_name.as_str(), path.is_empty()) {
        (client, true) => client.to_string(),
        ("", false) => path,
        (client, false) => format!("{client}.{path}"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImportPlan {
    /// Namespace or module the symbol comes from.
    pub module: String,
    pub name: String,
    pub external: bool,
}

#[derive(Debug, Clone)]
pub struct ClassDecl<'a> {
    pub class: &'a Class,
    pub name: String,
    pub namespace: String,
    pub base: Option<String>,
    /// Class has a serializer and therefore implements the parsable contract.
    pub parsable: bool,
    /// Sorted, de-duplicated.
    pub imports: Vec<ImportPlan>,
}

impl ClassDecl<'_> {
    /// Imports that live outside the class's own namespace.
    pub fn foreign_imports(&self) -> impl Iterator<Item = &ImportPlan> {
        self.imports
            .iter()
            .filter(move |i| i.external || i.module != self.namespace)
    }
}

pub fn plan_class<'a>(
    tree: &'a CodeTree,
    conventions: &dyn Conventions,
    config: &GenerationConfig,
    class: &'a Class,
) -> Result<ClassDecl<'a>, EmitError> {
    if class.name.is_empty() {
        return Err(EmitError::EmptyName { element: "class" });
    }
    let mut imports: Vec<ImportPlan> = class
        .usings
        .iter()
        .filter_map(|using| match (using.definition, &using.from) {
            (Some(link), _) => tree.resolve(link).map(|def| ImportPlan {
                module: namespace_of(tree, config, def.parent()),
                name: conventions.type_name(def.name()),
                external: false,
            }),
            (None, from) => Some(ImportPlan {
                module: from.clone().unwrap_or_else(|| using.name.clone()),
                name: using.name.clone(),
                external: true,
            }),
        })
        .collect();
    imports.sort();
    imports.dedup();

    Ok(ClassDecl {
        class,
        name: conventions.type_name(&class.name),
        namespace: namespace_of(tree, config, class.parent),
        base: class.inherits.as_ref().map(|ty| conventions.translate_type(&ty.name)),
        parsable: class.methods.iter().any(|m| m.kind == MethodKind::Serializer),
        imports,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumMember<'a> {
    pub name: &'a str,
    /// Bit value, set only for flags enums.
    pub flag: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct EnumDecl<'a> {
    pub definition: &'a Enum,
    pub name: String,
    pub namespace: String,
    pub flags: bool,
    /// Named members in declaration order.
    pub members: Vec<EnumMember<'a>>,
}

pub fn plan_enum<'a>(
    tree: &CodeTree,
    conventions: &dyn Conventions,
    config: &GenerationConfig,
    definition: &'a Enum,
) -> Result<EnumDecl<'a>, EmitError> {
    if definition.name.is_empty() {
        return Err(EmitError::EmptyName { element: "enum" });
    }
    let names: Vec<&str> = definition
        .members
        .iter()
        .map(String::as_str)
        .filter(|m| !m.is_empty())
        .collect();
    let count = names.len();
    let members = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let flag = if definition.flags {
                let bit = u32::try_from(i).ok().and_then(|shift| 1u64.checked_shl(shift));
                Some(bit.ok_or_else(|| EmitError::TooManyFlagMembers {
                    name: definition.name.clone(),
                    count,
                })?)
            } else {
                None
            };
            Ok(EnumMember { name, flag })
        })
        .collect::<Result<_, EmitError>>()?;

    Ok(EnumDecl {
        definition,
        name: conventions.type_name(&definition.name),
        namespace: namespace_of(tree, config, definition.parent),
        flags: definition.flags,
        members,
    })
}

/// Getter body of a request-builder navigation property.
#[derive(Debug, Clone)]
pub struct NavigationPlan {
    pub builder_type: String,
    pub address: Vec<AddressPart>,
    pub http_core: String,
}

#[derive(Debug, Clone)]
pub enum PropertyShape {
    /// Plain field or auto-property.
    Field,
    /// Read and written through the class's backing store, named by `store`.
    BackingStored { store: String },
    Navigation(NavigationPlan),
}

#[derive(Debug, Clone)]
pub struct PropertyPlan<'a> {
    pub property: &'a Property,
    /// Declared name in the language's member casing.
    pub name: String,
    pub type_syntax: String,
    pub access: &'static str,
    /// Type links to an enum declared with flags.
    pub flag_enum: bool,
    pub shape: PropertyShape,
}

pub fn plan_property<'a>(
    tree: &CodeTree,
    conventions: &dyn Conventions,
    class: &Class,
    property: &'a Property,
) -> Result<PropertyPlan<'a>, EmitError> {
    if property.name.is_empty() {
        return Err(EmitError::EmptyName { element: "property" });
    }
    let type_syntax = conventions.type_string(&property.ty);
    let store = class.property_of_kind(PropertyKind::BackingStore);
    let shape = match (property.kind, store) {
        (PropertyKind::RequestBuilder, _) => {
            let collaborators = Collaborators::of(class);
            let mut address = Vec::with_capacity(2);
            if collaborators.has_current_path {
                address.push(AddressPart::Property(collaborators.current_path));
            }
            address.push(AddressPart::Property(collaborators.path_segment));
            PropertyShape::Navigation(NavigationPlan {
                builder_type: conventions.translate_type(&property.ty.name),
                address,
                http_core: collaborators.http_core,
            })
        }
        (PropertyKind::Custom | PropertyKind::AdditionalData, Some(store)) => {
            PropertyShape::BackingStored {
                store: store.name.clone(),
            }
        }
        (
            PropertyKind::Custom
            | PropertyKind::AdditionalData
            | PropertyKind::HttpCore
            | PropertyKind::CurrentPath
            | PropertyKind::PathSegment
            | PropertyKind::BackingStore,
            _,
        ) => PropertyShape::Field,
    };
    let flag_enum = matches!(
        property.ty.definition.and_then(|link| tree.resolve(link)),
        Some(Definition::Enum(e)) if e.flags
    );

    Ok(PropertyPlan {
        property,
        name: conventions.member_name(&property.name),
        type_syntax,
        access: conventions.access_modifier(property.access),
        flag_enum,
        shape,
    })
}
