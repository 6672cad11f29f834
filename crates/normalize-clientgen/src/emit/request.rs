//! Request generator, request executor and indexer bodies.

use super::MethodContext;
use crate::error::EmitError;
use crate::ir::{HttpMethod, MethodKind, Parameter, ParameterKind};
use crate::naming::first_upper;
use crate::translate::AccessorFamily;

/// One operand of a string concatenation that builds a target address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressPart {
    /// A property of the owning class.
    Property(String),
    /// A method parameter.
    Parameter(String),
    /// A literal path fragment.
    Literal(String),
}

#[derive(Debug, Clone, Copy)]
pub enum BodyPlan<'a> {
    /// The body is an opaque byte stream attached as-is.
    Stream(&'a Parameter),
    /// The body is serialized through the HTTP core for `content_type`.
    Parsable {
        parameter: &'a Parameter,
        content_type: &'a str,
    },
}

impl<'a> BodyPlan<'a> {
    pub fn parameter(&self) -> &'a Parameter {
        match self {
            Self::Stream(p) => p,
            Self::Parsable { parameter, .. } => parameter,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryPlan<'a> {
    pub parameter: &'a Parameter,
    /// Holder type the configurator fills, e.g. `GetQueryParameters`.
    pub holder_type: String,
}

#[derive(Debug, Clone)]
pub struct RequestGeneratorPlan<'a> {
    pub http_method: HttpMethod,
    pub address: Vec<AddressPart>,
    pub http_core: String,
    pub body: Option<BodyPlan<'a>>,
    pub query: Option<QueryPlan<'a>>,
    pub headers: Option<&'a Parameter>,
}

/// Address is the current path followed by the method's own segment when it
/// declares one, otherwise by the class's path-segment property.
pub fn plan_request_generator<'a>(
    ctx: &MethodContext<'a>,
) -> Result<RequestGeneratorPlan<'a>, EmitError> {
    let http_method = ctx.http_method()?;
    let method = ctx.method;
    let collaborators = ctx.collaborators();

    let segment = match &method.path_segment {
        Some(segment) => AddressPart::Literal(segment.clone()),
        None => AddressPart::Property(collaborators.path_segment),
    };
    let address = vec![AddressPart::Property(collaborators.current_path), segment];

    let body = match method.parameter_of_kind(ParameterKind::RequestBody) {
        None => None,
        Some(parameter) => {
            let ty = ctx.conventions().translate_type(&parameter.ty.name);
            if ty.eq_ignore_ascii_case(ctx.conventions().stream_type_name()) {
                Some(BodyPlan::Stream(parameter))
            } else {
                let content_type = method
                    .content_type
                    .as_deref()
                    .filter(|c| !c.is_empty())
                    .ok_or_else(|| EmitError::MissingContentType {
                        method: method.name.clone(),
                    })?;
                Some(BodyPlan::Parsable {
                    parameter,
                    content_type,
                })
            }
        }
    };

    let query = method
        .parameter_of_kind(ParameterKind::QueryParameter)
        .map(|parameter| QueryPlan {
            parameter,
            holder_type: format!("{}QueryParameters", http_method.pascal()),
        });

    Ok(RequestGeneratorPlan {
        http_method,
        address,
        http_core: collaborators.http_core,
        body,
        query,
        headers: method.parameter_of_kind(ParameterKind::Headers),
    })
}

/// Which send operation the executor dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendKind {
    NoContent,
    Primitive,
    Typed,
    /// Collection of model objects, sent per element type.
    Collection,
    /// Collection of primitive values, sent per element type.
    PrimitiveCollection,
}

#[derive(Debug, Clone)]
pub struct RequestExecutorPlan<'a> {
    pub http_method: HttpMethod,
    /// Emitted name of the paired generator.
    pub generator_name: String,
    /// Body, query and headers parameter names, in that order, when declared.
    pub arguments: Vec<&'a str>,
    pub send: SendKind,
    /// Decorated return type the typed and primitive sends are parameterized by.
    pub return_type: String,
    /// Undecorated element type the collection sends are parameterized by.
    pub element_type: String,
    pub response_handler: Option<&'a str>,
    pub http_core: String,
}

pub fn plan_request_executor<'a>(
    ctx: &MethodContext<'a>,
) -> Result<RequestExecutorPlan<'a>, EmitError> {
    let http_method = ctx.http_method()?;
    let method = ctx.method;
    let conventions = ctx.conventions();
    let returns = ctx.return_type()?;
    let return_type = conventions.type_string(returns);

    let generator_name = match ctx.class.request_generator_for(http_method) {
        Some(generator) => conventions.method_name(&generator.name),
        None => {
            let fallback = format!("create{}RequestInfo", http_method.pascal());
            tracing::warn!(
                class = %ctx.class.name,
                method = %method.name,
                generator = %fallback,
                "no request generator paired with executor"
            );
            conventions.method_name(&fallback)
        }
    };

    let arguments = [
        ParameterKind::RequestBody,
        ParameterKind::QueryParameter,
        ParameterKind::Headers,
    ]
    .into_iter()
    .filter_map(|kind| method.parameter_of_kind(kind))
    .map(|p| p.name.as_str())
    .collect();

    let send = if returns.is_collection() {
        match ctx.translator.family(returns)? {
            AccessorFamily::CollectionOfObject(_) => SendKind::Collection,
            _ => SendKind::PrimitiveCollection,
        }
    } else if return_type.eq_ignore_ascii_case(conventions.void_type_name()) {
        SendKind::NoContent
    } else if return_type.eq_ignore_ascii_case(conventions.stream_type_name()) {
        SendKind::Primitive
    } else {
        SendKind::Typed
    };

    Ok(RequestExecutorPlan {
        http_method,
        generator_name,
        arguments,
        send,
        return_type,
        element_type: conventions.translate_type(&returns.name),
        response_handler: method
            .parameter_of_kind(ParameterKind::ResponseHandler)
            .map(|p| p.name.as_str()),
        http_core: ctx.collaborators().http_core,
    })
}

#[derive(Debug, Clone)]
pub struct IndexerPlan {
    /// Request builder type to construct.
    pub return_type: String,
    pub address: Vec<AddressPart>,
    pub http_core: String,
}

/// Indexers return a builder addressed at `currentPath + pathSegment + segment + id`.
pub fn plan_indexer(ctx: &MethodContext<'_>) -> Result<IndexerPlan, EmitError> {
    debug_assert_eq!(ctx.method.kind, MethodKind::IndexerCompat);
    let return_type = ctx.conventions().type_string(ctx.return_type()?);
    let collaborators = ctx.collaborators();
    let mut address = vec![
        AddressPart::Property(collaborators.current_path),
        AddressPart::Property(collaborators.path_segment),
    ];
    if let Some(segment) = &ctx.method.path_segment {
        address.push(AddressPart::Literal(segment.clone()));
    }
    let id = ctx
        .method
        .parameters
        .first()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "id".to_string());
    address.push(AddressPart::Parameter(id));

    Ok(IndexerPlan {
        return_type: first_upper(&return_type),
        address,
        http_core: collaborators.http_core,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Method, TypeRef};
    use crate::testing::Fixture;

    #[test]
    fn generator_requires_http_method() {
        let fx = Fixture::new(MethodKind::RequestGenerator);
        let err = fx.with_context(|ctx| plan_request_generator(ctx).map(|_| ()).unwrap_err());
        assert!(matches!(err, EmitError::MissingHttpMethod { .. }));
        assert!(err.is_structural());
    }

    #[test]
    fn executor_requires_http_method() {
        let fx = Fixture::new(MethodKind::RequestExecutor);
        let err = fx.with_context(|ctx| plan_request_executor(ctx).map(|_| ()).unwrap_err());
        assert!(matches!(err, EmitError::MissingHttpMethod { .. }));
    }

    #[test]
    fn generator_collects_parameters_by_kind() {
        let mut fx = Fixture::new(MethodKind::RequestGenerator);
        fx.method_mut().http_method = Some(HttpMethod::Get);
        fx.method_mut().content_type = Some("application/json".into());
        fx.add_request_body_parameters();
        let (body, query, headers, address) = fx.with_context(|ctx| {
            let plan = plan_request_generator(ctx).unwrap();
            (
                plan.body.map(|b| b.parameter().name.clone()),
                plan.query.map(|q| q.holder_type),
                plan.headers.map(|h| h.name.clone()),
                plan.address,
            )
        });
        assert_eq!(body.as_deref(), Some("b"));
        assert_eq!(query.as_deref(), Some("GetQueryParameters"));
        assert_eq!(headers.as_deref(), Some("h"));
        assert_eq!(
            address,
            [
                AddressPart::Property("currentPath".into()),
                AddressPart::Property("pathSegment".into())
            ]
        );
    }

    #[test]
    fn generator_uses_declared_path_segment() {
        let mut fx = Fixture::new(MethodKind::RequestGenerator);
        fx.method_mut().http_method = Some(HttpMethod::Post);
        fx.method_mut().path_segment = Some("/me".into());
        let address = fx.with_context(|ctx| plan_request_generator(ctx).unwrap().address);
        assert_eq!(address[1], AddressPart::Literal("/me".into()));
    }

    #[test]
    fn stream_body_is_attached_without_content_type() {
        let mut fx = Fixture::new(MethodKind::RequestGenerator);
        fx.method_mut().http_method = Some(HttpMethod::Put);
        fx.method_mut().parameters.push(Parameter::new(
            "body",
            ParameterKind::RequestBody,
            TypeRef::new("binary"),
        ));
        let is_stream = fx.with_context(|ctx| {
            matches!(
                plan_request_generator(ctx).unwrap().body,
                Some(BodyPlan::Stream(_))
            )
        });
        assert!(is_stream);
    }

    #[test]
    fn parsable_body_needs_content_type() {
        let mut fx = Fixture::new(MethodKind::RequestGenerator);
        fx.method_mut().http_method = Some(HttpMethod::Post);
        fx.add_request_body_parameters();
        let err = fx.with_context(|ctx| plan_request_generator(ctx).map(|_| ()).unwrap_err());
        assert!(matches!(err, EmitError::MissingContentType { .. }));
        assert!(!err.is_structural());
    }

    #[test]
    fn executor_pairs_with_generator_of_same_verb() {
        let mut fx = Fixture::new(MethodKind::RequestExecutor);
        fx.method_mut().http_method = Some(HttpMethod::Get);
        fx.add_request_body_parameters();
        fx.add_sibling(
            Method::new("createPostRequestInfo", MethodKind::RequestGenerator)
                .with_http_method(HttpMethod::Post),
        );
        fx.add_sibling(
            Method::new("createGetRequestInfo", MethodKind::RequestGenerator)
                .with_http_method(HttpMethod::Get),
        );
        let (name, args, handler, send) = fx.with_context(|ctx| {
            let plan = plan_request_executor(ctx).unwrap();
            (
                plan.generator_name,
                plan.arguments.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
                plan.response_handler.map(str::to_string),
                plan.send,
            )
        });
        assert_eq!(name, "createGetRequestInfo");
        assert_eq!(args, ["b", "q", "h"]);
        assert_eq!(handler.as_deref(), Some("r"));
        assert_eq!(send, SendKind::Typed);
    }

    #[test]
    fn executor_without_generator_still_names_one() {
        let mut fx = Fixture::new(MethodKind::RequestExecutor);
        fx.method_mut().http_method = Some(HttpMethod::Delete);
        fx.method_mut().return_type = Some(TypeRef::new("void"));
        let (name, send) = fx.with_context(|ctx| {
            let plan = plan_request_executor(ctx).unwrap();
            (plan.generator_name, plan.send)
        });
        assert_eq!(name, "createDeleteRequestInfo");
        assert_eq!(send, SendKind::NoContent);
    }

    #[test]
    fn executor_streams_binary_responses() {
        let mut fx = Fixture::new(MethodKind::RequestExecutor);
        fx.method_mut().http_method = Some(HttpMethod::Get);
        fx.method_mut().return_type = Some(TypeRef::new("binary"));
        let send = fx.with_context(|ctx| plan_request_executor(ctx).unwrap().send);
        assert_eq!(send, SendKind::Primitive);
    }

    #[test]
    fn executor_sends_collections_per_element() {
        let mut fx = Fixture::new(MethodKind::RequestExecutor);
        fx.method_mut().http_method = Some(HttpMethod::Get);
        fx.method_mut().return_type = Some(TypeRef::new("string").array());
        let (send, element) = fx.with_context(|ctx| {
            let plan = plan_request_executor(ctx).unwrap();
            (plan.send, plan.element_type)
        });
        assert_eq!(send, SendKind::PrimitiveCollection);
        assert_eq!(element, "string");

        let user = fx.tree.add_class(fx.tree.root(), "User").unwrap();
        fx.method_mut().return_type = Some(TypeRef::new("User").array().with_class(user));
        let (send, element) = fx.with_context(|ctx| {
            let plan = plan_request_executor(ctx).unwrap();
            (plan.send, plan.element_type)
        });
        assert_eq!(send, SendKind::Collection);
        assert_eq!(element, "User");
    }

    #[test]
    fn indexer_appends_segment_and_id() {
        let mut fx = Fixture::new(MethodKind::IndexerCompat);
        fx.method_mut().path_segment = Some("somePath".into());
        let address = fx.with_context(|ctx| plan_indexer(ctx).unwrap().address);
        assert_eq!(address[2], AddressPart::Literal("somePath".into()));
        assert_eq!(address[3], AddressPart::Parameter("id".into()));
    }
}
