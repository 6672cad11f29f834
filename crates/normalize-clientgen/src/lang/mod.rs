//! Per-language backends.
//!
//! Each backend implements [`Conventions`](crate::traits::Conventions),
//! [`Dialect`](crate::traits::Dialect) and [`Backend`](crate::traits::Backend)
//! on one zero-sized type and exposes a static instance for the registry.

// C#
#[cfg(feature = "backend-csharp")]
pub mod csharp;

#[cfg(feature = "backend-csharp")]
pub use csharp::{CSHARP_BACKEND, CSharpBackend};

// Java
#[cfg(feature = "backend-java")]
pub mod java;

#[cfg(feature = "backend-java")]
pub use java::{JAVA_BACKEND, JavaBackend};

// TypeScript
#[cfg(feature = "backend-typescript")]
pub mod typescript;

#[cfg(feature = "backend-typescript")]
pub use typescript::{TYPESCRIPT_BACKEND, TypeScriptBackend};

use crate::emit::AddressPart;
use crate::naming::quote;
use crate::writer::LanguageWriter;

/// Render an address as a `+` concatenation. `member` spells property reads.
pub(crate) fn concat_address(parts: &[AddressPart], member: impl Fn(&str) -> String) -> String {
    parts
        .iter()
        .map(|part| match part {
            AddressPart::Property(name) => member(name),
            AddressPart::Parameter(name) => name.clone(),
            AddressPart::Literal(text) => quote(text),
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Write `head(args);`, breaking arguments onto their own line when present.
pub(crate) fn write_call(w: &mut LanguageWriter, head: &str, args: &[&str]) {
    if args.is_empty() {
        w.write_line(format!("{head}();"));
        return;
    }
    w.write_line(format!("{head}("));
    w.increase_indent();
    w.write_line(args.join(", "));
    w.decrease_indent();
    w.write_line(");");
}
