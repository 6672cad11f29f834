//! Runtime errors.

/// Error raised while building or serializing a request.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("content type must not be empty")]
    EmptyContentType,

    #[error("no serialization writer for content type `{0}`")]
    UnsupportedContentType(String),

    #[error("cannot serialize non-finite number {value}")]
    NonFiniteNumber { key: Option<String>, value: f64 },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid uri `{uri}`: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },
}
