//! Serializer and deserializer bodies.

use super::MethodContext;
use crate::error::EmitError;
use crate::ir::{Property, PropertyKind};
use crate::translate::{AccessorFamily, Direction};

/// One `write<Family>(key, value)` call.
#[derive(Debug, Clone)]
pub struct SerializerWrite<'a> {
    pub key: String,
    pub property: &'a Property,
    pub accessor: String,
    pub family: AccessorFamily,
}

#[derive(Debug, Clone)]
pub struct SerializerPlan<'a> {
    /// Base serializer to call first, when the class inherits.
    pub base_method: Option<&'a str>,
    /// Name of the serialization-writer parameter.
    pub writer_name: &'a str,
    pub writes: Vec<SerializerWrite<'a>>,
    pub additional_data: Option<&'a Property>,
}

pub fn plan_serializer<'a>(ctx: &MethodContext<'a>) -> Result<SerializerPlan<'a>, EmitError> {
    let writes = ctx
        .class
        .custom_properties()
        .into_iter()
        .map(|property| {
            let resolved = ctx.translator.resolve(&property.ty, Direction::Write)?;
            Ok(SerializerWrite {
                key: property.serialization_key(),
                property,
                accessor: resolved.accessor,
                family: resolved.family,
            })
        })
        .collect::<Result<_, EmitError>>()?;

    Ok(SerializerPlan {
        base_method: ctx.class.inherits().then_some(ctx.method.name.as_str()),
        writer_name: ctx
            .method
            .parameters
            .first()
            .map(|p| p.name.as_str())
            .unwrap_or("writer"),
        writes,
        additional_data: ctx.class.property_of_kind(PropertyKind::AdditionalData),
    })
}

/// One `key → (target, node) => target.prop = node.get<Family>()` entry.
#[derive(Debug, Clone)]
pub struct DeserializerEntry<'a> {
    pub key: String,
    pub property: &'a Property,
    pub accessor: String,
    pub family: AccessorFamily,
}

#[derive(Debug, Clone)]
pub struct DeserializerPlan<'a> {
    /// Emitted name of the owning class, used to cast the target.
    pub class_name: String,
    /// Base deserializer whose mapping is merged underneath, when the class inherits.
    pub base_method: Option<&'a str>,
    pub entries: Vec<DeserializerEntry<'a>>,
}

/// Derived entries are written after the base mapping is merged, so a key
/// both classes map resolves to the derived setter.
pub fn plan_deserializer<'a>(ctx: &MethodContext<'a>) -> Result<DeserializerPlan<'a>, EmitError> {
    let entries = ctx
        .class
        .custom_properties()
        .into_iter()
        .map(|property| {
            let resolved = ctx.translator.resolve(&property.ty, Direction::Read)?;
            Ok(DeserializerEntry {
                key: property.serialization_key(),
                property,
                accessor: resolved.accessor,
                family: resolved.family,
            })
        })
        .collect::<Result<_, EmitError>>()?;

    Ok(DeserializerPlan {
        class_name: ctx.conventions().type_name(&ctx.class.name),
        base_method: ctx.class.inherits().then_some(ctx.method.name.as_str()),
        entries,
    })
}
