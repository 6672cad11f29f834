//! Request descriptor built by generated request generators.

use crate::error::RuntimeError;
use crate::headers::CaseInsensitiveMap;
use crate::serialization::{Parsable, SerializationWriterFactory};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use tracing::debug;
use url::Url;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const BINARY_CONTENT_TYPE: &str = "application/octet-stream";

/// HTTP verbs a request can carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Patch,
    Delete,
    Options,
    Connect,
    Put,
    Trace,
    Head,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Connect => "CONNECT",
            Self::Put => "PUT",
            Self::Trace => "TRACE",
            Self::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request option read by a delegating handler. Options are unique by
/// type: adding a second option of the same type replaces the first.
pub trait MiddlewareOption: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

/// Anything an HTTP core exposes to request building.
pub trait HttpCore: Send + Sync {
    fn serialization_writer_factory(&self) -> &dyn SerializationWriterFactory;
}

/// A request ready to be sent: address, verb, query, headers and payload.
#[derive(Default)]
pub struct RequestInformation {
    pub uri: Option<Url>,
    pub http_method: HttpMethod,
    pub query_parameters: CaseInsensitiveMap<Value>,
    pub headers: CaseInsensitiveMap<String>,
    pub content: Option<Vec<u8>>,
    middleware_options: BTreeMap<&'static str, Box<dyn MiddlewareOption>>,
}

impl fmt::Debug for RequestInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestInformation")
            .field("uri", &self.uri)
            .field("http_method", &self.http_method)
            .field("query_parameters", &self.query_parameters)
            .field("headers", &self.headers)
            .field("content_len", &self.content.as_ref().map(Vec::len))
            .field("middleware_options", &self.middleware_options.keys())
            .finish()
    }
}

impl RequestInformation {
    pub fn new(http_method: HttpMethod) -> Self {
        Self {
            http_method,
            ..Self::default()
        }
    }

    /// Parse and set the target address.
    pub fn set_uri(&mut self, uri: &str) -> Result<(), RuntimeError> {
        let parsed = Url::parse(uri).map_err(|source| RuntimeError::InvalidUri {
            uri: uri.to_string(),
            source,
        })?;
        self.uri = Some(parsed);
        Ok(())
    }

    /// Target address with the query parameters appended. Null parameters are
    /// skipped; strings are written unquoted.
    pub fn uri_with_query(&self) -> Option<Url> {
        let mut uri = self.uri.clone()?;
        if !self.query_parameters.is_empty() {
            let mut pairs = uri.query_pairs_mut();
            for (key, value) in self.query_parameters.iter() {
                match value {
                    Value::Null => {}
                    Value::String(s) => {
                        pairs.append_pair(key, s);
                    }
                    other => {
                        pairs.append_pair(key, &other.to_string());
                    }
                }
            }
        }
        Some(uri)
    }

    /// Take the whole of `content` as a raw payload and mark it binary.
    pub fn set_stream_content(&mut self, mut content: impl Read) -> Result<(), RuntimeError> {
        let mut bytes = Vec::new();
        content.read_to_end(&mut bytes)?;
        self.content = Some(bytes);
        self.headers.insert(CONTENT_TYPE_HEADER, BINARY_CONTENT_TYPE.to_string());
        Ok(())
    }

    /// Serialize `item` with the core's writer for `content_type` and attach it.
    pub fn set_content_from_parsable(
        &mut self,
        item: &dyn Parsable,
        http_core: &dyn HttpCore,
        content_type: &str,
    ) -> Result<(), RuntimeError> {
        if content_type.is_empty() {
            return Err(RuntimeError::EmptyContentType);
        }
        let mut writer = http_core
            .serialization_writer_factory()
            .serialization_writer(content_type)?;
        writer.write_object_value(None, item)?;
        let content = writer.serialized_content()?;
        debug!(content_type, len = content.len(), "attached serialized content");
        self.headers.insert(CONTENT_TYPE_HEADER, content_type.to_string());
        self.content = Some(content);
        Ok(())
    }

    pub fn add_middleware_option<O: MiddlewareOption>(&mut self, option: O) {
        self.middleware_options
            .insert(std::any::type_name::<O>(), Box::new(option));
    }

    pub fn remove_middleware_option<O: MiddlewareOption>(&mut self) -> bool {
        self.middleware_options
            .remove(std::any::type_name::<O>())
            .is_some()
    }

    pub fn middleware_option<O: MiddlewareOption>(&self) -> Option<&O> {
        self.middleware_options
            .get(std::any::type_name::<O>())
            .and_then(|o| o.as_any().downcast_ref::<O>())
    }

    pub fn middleware_options(&self) -> impl Iterator<Item = &dyn MiddlewareOption> {
        self.middleware_options.values().map(|o| o.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct RetryOption {
        max_retries: u32,
    }

    impl MiddlewareOption for RetryOption {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn stream_content_sets_binary_content_type() {
        let mut request = RequestInformation::new(HttpMethod::Put);
        request.set_stream_content(&b"raw bytes"[..]).unwrap();
        assert_eq!(request.content.as_deref(), Some(&b"raw bytes"[..]));
        assert_eq!(
            request.headers.get("content-type").map(String::as_str),
            Some(BINARY_CONTENT_TYPE)
        );
    }

    #[test]
    fn invalid_uri_is_rejected() {
        let mut request = RequestInformation::default();
        let err = request.set_uri("not a uri").unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidUri { ref uri, .. } if uri == "not a uri"));
        assert!(request.uri.is_none());
    }

    #[test]
    fn query_parameters_are_appended() {
        let mut request = RequestInformation::default();
        request.set_uri("https://graph.example.com/v1/users").unwrap();
        request.query_parameters.insert("$top", Value::from(10));
        request.query_parameters.insert("$select", Value::from("id,name"));
        request.query_parameters.insert("$skip", Value::Null);
        let uri = request.uri_with_query().unwrap();
        assert_eq!(
            uri.as_str(),
            "https://graph.example.com/v1/users?%24select=id%2Cname&%24top=10"
        );
    }

    #[test]
    fn middleware_options_are_unique_by_type() {
        let mut request = RequestInformation::default();
        request.add_middleware_option(RetryOption { max_retries: 1 });
        request.add_middleware_option(RetryOption { max_retries: 3 });
        assert_eq!(request.middleware_options().count(), 1);
        assert_eq!(
            request.middleware_option::<RetryOption>(),
            Some(&RetryOption { max_retries: 3 })
        );
        assert!(request.remove_middleware_option::<RetryOption>());
        assert!(!request.remove_middleware_option::<RetryOption>());
    }

    #[test]
    fn method_displays_uppercase() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }
}
