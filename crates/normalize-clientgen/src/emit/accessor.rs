//! Getter and setter bodies, for profiles that keep them as methods.

use super::MethodContext;
use crate::error::EmitError;
use crate::ir::{MethodKind, Property, PropertyKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Get,
    Set,
}

#[derive(Debug, Clone)]
pub struct AccessorPlan<'a> {
    pub kind: AccessorKind,
    pub property: &'a Property,
    pub type_syntax: String,
    /// Backing-store property the value lives in, instead of a field.
    pub backing_store: Option<&'a str>,
    /// Applied by getters when the stored value is absent. Only set for
    /// non-nullable properties that declare a default.
    pub default: Option<&'a str>,
    /// Name of the incoming value for setters.
    pub value: &'a str,
}

pub fn plan_accessor<'a>(ctx: &MethodContext<'a>) -> Result<AccessorPlan<'a>, EmitError> {
    let method = ctx.method;
    let kind = if method.kind == MethodKind::Setter {
        AccessorKind::Set
    } else {
        AccessorKind::Get
    };
    let name = method
        .accessed_property
        .as_deref()
        .ok_or_else(|| EmitError::MissingAccessedProperty {
            method: method.name.clone(),
            kind: method.kind,
        })?;
    let property =
        ctx.class
            .property_named(name)
            .ok_or_else(|| EmitError::UnknownAccessedProperty {
                method: method.name.clone(),
                kind: method.kind,
                property: name.to_string(),
            })?;

    Ok(AccessorPlan {
        kind,
        property,
        type_syntax: ctx.conventions().type_string(&property.ty),
        backing_store: ctx
            .class
            .property_of_kind(PropertyKind::BackingStore)
            .map(|p| p.name.as_str()),
        default: property
            .default_value
            .as_deref()
            .filter(|_| !property.ty.nullable),
        value: method
            .parameters
            .first()
            .map(|p| p.name.as_str())
            .unwrap_or("value"),
    })
}
