//! Typed API client generation from a language-agnostic code model.
//!
//! `normalize-clientgen` lowers a [`CodeTree`](ir::CodeTree) describing an HTTP
//! API client (request builders, models, their methods and properties) into
//! source code for several target languages.
//!
//! # Architecture
//!
//! ```text
//! Code Tree            Emitters               Backends
//! ─────────────     ──────────────────     ─────────────────
//!                   ┌─ serializer     ─┐   ┌─> C#
//! ir::CodeTree ─────┼─ request        ─┼───┼─> Java
//!  (read-only)      ├─ constructor    ─┤   └─> TypeScript
//!                   └─ declaration    ─┘
//!                    (emit/: plans)        (lang/: Dialect)
//! ```
//!
//! Emitters decide *what* goes into a body (which properties, in which order,
//! with which accessor family). Backends decide only *how* it is spelled. The
//! [`CodeWriter`] walks the tree and runs both.
//!
//! # Example
//!
//! ```
//! use normalize_clientgen::ir::{CodeTree, Method, MethodKind, Parameter, ParameterKind, Property, TypeRef};
//! use normalize_clientgen::{CodeWriter, GenerationConfig, Language};
//!
//! let mut tree = CodeTree::new();
//! let user = tree.add_class(tree.root(), "User").unwrap();
//! let class = tree.class_mut(user).unwrap();
//! class
//!     .add_property(Property::custom("displayName", TypeRef::new("string")))
//!     .unwrap();
//! class.add_method(
//!     Method::new("serialize", MethodKind::Serializer)
//!         .returning(TypeRef::new("void"))
//!         .with_parameter(Parameter::new(
//!             "writer",
//!             ParameterKind::Other,
//!             TypeRef::new("SerializationWriter"),
//!         )),
//! );
//!
//! let config = GenerationConfig::for_language(Language::Java);
//! let writer = CodeWriter::new(&tree, &config).unwrap();
//! let unit = writer.write_class(user).unwrap();
//! assert!(unit.source.contains("writer.writeStringValue(\"displayName\", this.getDisplayName());"));
//! ```
//!
//! # Using the Backend Registry
//!
//! ```ignore
//! use normalize_clientgen::{get_backend, backend_names};
//!
//! for name in backend_names() {
//!     println!("Backend: {}", name);
//! }
//!
//! if let Some(backend) = get_backend("csharp") {
//!     let writer = CodeWriter::with_backend(&tree, &config, backend);
//! }
//! ```
//!
//! # Feature Flags
//!
//! Backend flags (use `backend-*` prefix):
//! - `backend-csharp` - C# (auto-properties, `Task<T>`)
//! - `backend-java` - Java (accessor methods, `CompletableFuture<T>`)
//! - `backend-typescript` - TypeScript (`Promise<T>`)
//!
//! Language umbrella flags: `csharp`, `java`, `typescript`.

pub mod config;
pub mod emit;
pub mod engine;
pub mod error;
pub mod ir;
pub mod lang;
pub mod naming;
pub mod registry;
pub mod traits;
pub mod translate;
pub mod writer;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, GenerationConfig, Language};
pub use engine::{CodeWriter, GeneratedUnit};
pub use error::EmitError;
pub use translate::{AccessorFamily, Direction, Primitive, ResolvedType, TypeTranslator};
pub use writer::LanguageWriter;

// Re-export traits
pub use traits::{Backend, Conventions, Dialect};

// Re-export registry functions
pub use registry::{backend_for, backend_names, backends, get_backend, register_backend};

// Re-export backend structs
#[cfg(feature = "backend-csharp")]
pub use lang::csharp::CSharpBackend;

#[cfg(feature = "backend-java")]
pub use lang::java::JavaBackend;

#[cfg(feature = "backend-typescript")]
pub use lang::typescript::TypeScriptBackend;
