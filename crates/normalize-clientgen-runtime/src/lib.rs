//! Runtime contracts for clients produced by `normalize-clientgen`.
//!
//! Generated request generators fill a [`RequestInformation`]; generated
//! models implement [`Parsable`] and write themselves through a
//! [`SerializationWriter`]; a client's transport runs requests through a
//! chain of [`DelegatingHandler`]s built with [`chain_handlers`].
//!
//! ```
//! use normalize_clientgen_runtime::{HttpMethod, RequestInformation};
//!
//! let mut request = RequestInformation::new(HttpMethod::Put);
//! request.set_uri("https://graph.example.com/v1/me/photo").unwrap();
//! request.set_stream_content(&b"\x89PNG"[..]).unwrap();
//! assert_eq!(
//!     request.headers.get("content-type").map(String::as_str),
//!     Some("application/octet-stream")
//! );
//! ```

pub mod error;
pub mod handler;
pub mod headers;
pub mod json;
pub mod request;
pub mod serialization;

pub use error::RuntimeError;
pub use handler::{DelegatingHandler, HeadersHandler, chain_handlers, default_handlers};
pub use headers::CaseInsensitiveMap;
pub use json::{JSON_CONTENT_TYPE, JsonSerializationWriter, JsonSerializationWriterFactory};
pub use request::{
    BINARY_CONTENT_TYPE, CONTENT_TYPE_HEADER, HttpCore, HttpMethod, MiddlewareOption,
    RequestInformation,
};
pub use serialization::{Parsable, SerializationWriter, SerializationWriterFactory};
