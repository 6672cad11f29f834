//! Registry for code generation backends.

use crate::config::Language;
use crate::traits::Backend;
use std::sync::{OnceLock, RwLock};

/// Global registry of backends.
static BACKENDS: RwLock<Vec<&'static dyn Backend>> = RwLock::new(Vec::new());
static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom backend.
///
/// Call this before any generation operations to add custom backends.
/// Built-in backends are registered automatically on first use. A later
/// registration for the same language takes precedence in [`backend_for`].
pub fn register_backend(backend: &'static dyn Backend) {
    init_builtin();
    BACKENDS.write().unwrap().push(backend);
}

/// Initialize built-in backends (called automatically on first use).
fn init_builtin() {
    INITIALIZED.get_or_init(|| {
        let mut backends = BACKENDS.write().unwrap();

        #[cfg(feature = "backend-csharp")]
        {
            backends.push(&crate::lang::csharp::CSHARP_BACKEND);
        }

        #[cfg(feature = "backend-java")]
        {
            backends.push(&crate::lang::java::JAVA_BACKEND);
        }

        #[cfg(feature = "backend-typescript")]
        {
            backends.push(&crate::lang::typescript::TYPESCRIPT_BACKEND);
        }
    });
}

/// Get a backend by name.
pub fn get_backend(name: &str) -> Option<&'static dyn Backend> {
    init_builtin();
    BACKENDS
        .read()
        .unwrap()
        .iter()
        .find(|b| b.name() == name)
        .copied()
}

/// Get the backend that writes a language, preferring the latest registration.
pub fn backend_for(language: Language) -> Option<&'static dyn Backend> {
    init_builtin();
    BACKENDS
        .read()
        .unwrap()
        .iter()
        .rev()
        .find(|b| b.language() == language)
        .copied()
}

/// List all registered backends.
pub fn backends() -> Vec<&'static dyn Backend> {
    init_builtin();
    BACKENDS.read().unwrap().clone()
}

/// List all registered backend names.
pub fn backend_names() -> Vec<&'static str> {
    init_builtin();
    BACKENDS.read().unwrap().iter().map(|b| b.name()).collect()
}
