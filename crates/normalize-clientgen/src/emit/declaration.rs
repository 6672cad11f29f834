//! Method signatures, documentation and the guarded-parameter prologue.

use super::MethodContext;
use crate::error::EmitError;
use crate::ir::{MethodKind, Parameter};
use crate::translate::Primitive;

#[derive(Debug, Clone, Default)]
pub struct DocPlan<'a> {
    pub description: Option<&'a str>,
    /// Described parameters, ascending by name.
    pub parameters: Vec<(&'a str, &'a str)>,
    /// Return type named in `@return`-style tags, absent for void and constructors.
    pub returns: Option<String>,
    pub is_async: bool,
}

impl DocPlan<'_> {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.parameters.is_empty()
    }
}

pub fn plan_doc<'a>(ctx: &MethodContext<'a>) -> DocPlan<'a> {
    let mut parameters: Vec<(&str, &str)> = ctx
        .method
        .parameters
        .iter()
        .filter_map(|p| {
            p.description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| (p.name.as_str(), d))
        })
        .collect();
    parameters.sort_by_key(|(name, _)| *name);

    DocPlan {
        description: ctx.method.description.as_deref().filter(|d| !d.is_empty()),
        parameters,
        returns: ctx.return_syntax().filter(|_| !ctx.returns_void()),
        is_async: ctx.method.is_async,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardCheck {
    /// Null or empty string.
    Emptiness,
    /// Null or undefined.
    Definedness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guard<'a> {
    pub parameter: &'a str,
    pub check: GuardCheck,
}

/// One guard per required parameter, ascending by name.
pub fn plan_guards<'a>(ctx: &MethodContext<'a>) -> Vec<Guard<'a>> {
    let mut required: Vec<&Parameter> = ctx.method.parameters.iter().filter(|p| !p.optional).collect();
    required.sort_by(|a, b| a.name.cmp(&b.name));
    required
        .into_iter()
        .map(|p| {
            let is_string =
                !p.ty.is_collection() && Primitive::from_name(&p.ty.name) == Some(Primitive::String);
            Guard {
                parameter: &p.name,
                check: if is_string {
                    GuardCheck::Emptiness
                } else {
                    GuardCheck::Definedness
                },
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ParameterDecl<'a> {
    pub name: &'a str,
    pub type_syntax: String,
    pub optional: bool,
}

#[derive(Debug, Clone)]
pub struct PrototypePlan<'a> {
    pub kind: MethodKind,
    /// Emitted method name; the class name for constructors.
    pub name: String,
    pub access: &'static str,
    pub is_static: bool,
    pub is_async: bool,
    /// Serializer/deserializer re-declared in an inheriting class.
    pub hides_base: bool,
    /// Constructor of an inheriting class.
    pub calls_base: bool,
    /// Undecorated by async wrapping; `None` for constructors.
    pub return_type: Option<String>,
    pub returns_void: bool,
    pub parameters: Vec<ParameterDecl<'a>>,
}

impl PrototypePlan<'_> {
    pub fn is_constructor(&self) -> bool {
        self.kind.is_constructor()
    }
}

pub fn plan_prototype<'a>(ctx: &MethodContext<'a>) -> Result<PrototypePlan<'a>, EmitError> {
    let method = ctx.method;
    let conventions = ctx.conventions();
    if method.name.is_empty() {
        return Err(EmitError::EmptyName { element: "method" });
    }
    let is_constructor = method.kind.is_constructor();
    let return_type = if is_constructor {
        None
    } else {
        Some(conventions.type_string(ctx.return_type()?))
    };
    let inherits = ctx.class.inherits();

    Ok(PrototypePlan {
        kind: method.kind,
        name: if is_constructor {
            conventions.type_name(&ctx.class.name)
        } else {
            conventions.method_name(&method.name)
        },
        access: conventions.access_modifier(method.access),
        is_static: method.is_static,
        is_async: method.is_async,
        hides_base: inherits && method.kind.is_serialization(),
        calls_base: inherits && is_constructor,
        returns_void: ctx.returns_void(),
        return_type,
        parameters: method
            .parameters
            .iter()
            .map(|p| ParameterDecl {
                name: &p.name,
                type_syntax: conventions.type_string(&p.ty),
                optional: p.optional,
            })
            .collect(),
    })
}
