//! Constructor and client-constructor bodies.

use super::MethodContext;
use crate::ir::{MethodKind, Parameter, ParameterKind, Property, PropertyKind};

/// `property = parameter;`
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    pub property: &'a Property,
    pub parameter: &'a Parameter,
}

#[derive(Debug, Clone)]
pub struct ConstructorPlan<'a> {
    /// Properties with a default, structural kinds first, then by name.
    pub defaults: Vec<&'a Property>,
    pub bindings: Vec<Binding<'a>>,
    pub serializer_modules: &'a [String],
    pub deserializer_modules: &'a [String],
    pub http_core: String,
    pub enable_backing_store: bool,
}

impl ConstructorPlan<'_> {
    pub fn registers_modules(&self) -> bool {
        !self.serializer_modules.is_empty() || !self.deserializer_modules.is_empty()
    }
}

pub fn plan_constructor<'a>(ctx: &MethodContext<'a>) -> ConstructorPlan<'a> {
    let mut defaults: Vec<&Property> = ctx
        .class
        .properties
        .iter()
        .filter(|p| p.default_value.as_deref().is_some_and(|d| !d.is_empty()))
        .collect();
    defaults.sort_by(|a, b| {
        a.kind
            .assignment_priority()
            .cmp(&b.kind.assignment_priority())
            .then_with(|| a.name.cmp(&b.name))
    });

    let bind = |parameter_kind, property_kind| {
        let property = ctx.class.property_of_kind(property_kind)?;
        let parameter = ctx.method.parameter_of_kind(parameter_kind)?;
        Some(Binding {
            property,
            parameter,
        })
    };

    let is_client = ctx.method.kind == MethodKind::ClientConstructor;
    let bindings = match ctx.method.kind {
        MethodKind::Constructor => [
            bind(ParameterKind::HttpCore, PropertyKind::HttpCore),
            bind(ParameterKind::CurrentPath, PropertyKind::CurrentPath),
        ]
        .into_iter()
        .flatten()
        .collect(),
        MethodKind::ClientConstructor => bind(ParameterKind::HttpCore, PropertyKind::HttpCore)
            .into_iter()
            .collect(),
        _ => Vec::new(),
    };

    let (serializer_modules, deserializer_modules): (&[String], &[String]) = if is_client {
        (
            ctx.method.serializer_modules.as_slice(),
            ctx.method.deserializer_modules.as_slice(),
        )
    } else {
        (&[], &[])
    };

    ConstructorPlan {
        defaults,
        bindings,
        serializer_modules,
        deserializer_modules,
        http_core: ctx.collaborators().http_core,
        enable_backing_store: is_client && ctx.config.uses_backing_store,
    }
}
