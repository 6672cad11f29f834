//! Emission errors.
//!
//! Every variant is fatal for the element being written: either a required
//! input was missing (argument contract) or the model builder produced a
//! tree that breaks a structural invariant. Unknown custom type names are not
//! errors; they degrade to the generic object accessor. A type link that
//! points nowhere is.

use crate::config::Language;
use crate::ir::{ClassId, DefinitionRef, EnumId, MethodKind};

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("{element} name must not be empty")]
    EmptyName { element: &'static str },

    #[error("method `{method}` sends a request body but declares no content type")]
    MissingContentType { method: String },

    #[error("{kind} `{method}` requires an http method")]
    MissingHttpMethod { method: String, kind: MethodKind },

    #[error("method `{method}` has no return type")]
    MissingReturnType { method: String },

    #[error("{kind} `{method}` has no accessed property")]
    MissingAccessedProperty { method: String, kind: MethodKind },

    #[error("{kind} `{method}` accesses unknown property `{property}`")]
    UnknownAccessedProperty {
        method: String,
        kind: MethodKind,
        property: String,
    },

    #[error("{0} does not exist in the code tree")]
    UnknownClass(ClassId),

    #[error("{0} does not exist in the code tree")]
    UnknownEnum(EnumId),

    #[error("type `{type_name}` links to {link}, which does not exist in the code tree")]
    DanglingDefinition {
        type_name: String,
        link: DefinitionRef,
    },

    #[error("collection of `{type_name}` links to {link}; collection links must name a class")]
    InvalidCollectionLink {
        type_name: String,
        link: DefinitionRef,
    },

    #[error("flags enum `{name}` has {count} members, more than a 64-bit flag value can hold")]
    TooManyFlagMembers { name: String, count: usize },

    #[error("class `{class}` has no member at index {index}")]
    UnknownMember { class: String, index: usize },

    #[error("{language} folds {kind}s into property emission")]
    AccessorsFolded { language: Language, kind: MethodKind },

    #[error("no backend registered for {0}")]
    UnsupportedLanguage(Language),
}

impl EmitError {
    /// The error stems from a defect in the model builder rather than a missing input.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self,
            Self::EmptyName { .. } | Self::MissingContentType { .. } | Self::UnsupportedLanguage(_)
        )
    }
}
