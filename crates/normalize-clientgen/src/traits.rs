//! Traits for per-language backends.
//!
//! A backend is split along the same line as the emitters:
//!
//! - [`Conventions`] spells names and types (what a `string` or a read
//!   accessor is called). The [`TypeTranslator`](crate::translate::TypeTranslator)
//!   and the planning functions only ever ask these questions.
//! - [`Dialect`] renders already-decided plans into a [`LanguageWriter`].
//! - [`Backend`] ties the two together for the registry and the
//!   [`CodeWriter`](crate::CodeWriter).

use crate::config::Language;
use crate::emit::{
    AccessorPlan, ClassDecl, ConstructorPlan, DeserializerPlan, DocPlan, EnumDecl, Guard,
    IndexerPlan, PropertyPlan, PrototypePlan, RequestExecutorPlan, RequestGeneratorPlan,
    SerializerPlan,
};
use crate::error::EmitError;
use crate::ir::{AccessModifier, MethodKind, TypeRef};
use crate::naming::first_upper;
use crate::translate::{AccessorFamily, Direction, Primitive};
use crate::writer::LanguageWriter;

/// Surface spelling of types, members and accessors for one language.
pub trait Conventions: Send + Sync {
    fn primitive_type_name(&self, primitive: Primitive) -> &'static str;

    /// Opaque byte-stream type (`Stream`, `InputStream`, ...).
    fn stream_type_name(&self) -> &'static str;

    fn void_type_name(&self) -> &'static str;

    fn null_literal(&self) -> &'static str;

    /// `Get`/`Write` or `get`/`write`.
    fn accessor_prefix(&self, direction: Direction) -> &'static str;

    /// Generic argument appended to a parameterized accessor name, if the
    /// language passes it that way.
    fn accessor_type_argument(&self, argument: &str) -> String;

    /// Arguments passed to a read accessor, without parentheses.
    fn accessor_arguments(&self, family: &AccessorFamily) -> String {
        let _ = family;
        String::new()
    }

    fn collection_type(&self, element: &str) -> String;

    /// Decorate a nullable, non-collection type.
    fn nullable_type(&self, syntax: &str, primitive: Option<Primitive>) -> String {
        let _ = primitive;
        syntax.to_string()
    }

    /// Wrap a return type for an asynchronous method.
    fn async_type(&self, syntax: &str) -> String;

    fn access_modifier(&self, access: AccessModifier) -> &'static str {
        match access {
            AccessModifier::Public => "public",
            AccessModifier::Protected => "protected",
            AccessModifier::Private => "private",
        }
    }

    fn method_name(&self, name: &str) -> String;

    /// Spelling of a property when read or assigned from generated code.
    fn member_name(&self, name: &str) -> String;

    fn type_name(&self, name: &str) -> String {
        first_upper(name)
    }

    /// Map a model type name to the language's spelling, without decoration.
    fn translate_type(&self, name: &str) -> String {
        match name.to_ascii_lowercase().as_str() {
            "binary" | "stream" => self.stream_type_name().to_string(),
            "void" => self.void_type_name().to_string(),
            _ => match Primitive::from_name(name) {
                Some(primitive) => self.primitive_type_name(primitive).to_string(),
                None => self.type_name(name),
            },
        }
    }

    /// Fully decorated type as written in declarations.
    fn type_string(&self, ty: &TypeRef) -> String {
        let element = self.translate_type(&ty.name);
        if ty.is_collection() {
            self.collection_type(&element)
        } else if ty.nullable {
            self.nullable_type(&element, Primitive::from_name(&ty.name))
        } else {
            element
        }
    }

    /// Accessor for a family in one direction, e.g. `GetCollectionOfObjectValues<User>`.
    fn accessor_name(&self, family: &AccessorFamily, direction: Direction) -> String {
        let stem = match family {
            AccessorFamily::Primitive(p) => format!("{}Value", first_upper(self.primitive_type_name(*p))),
            AccessorFamily::Enum(_) => "EnumValue".to_string(),
            AccessorFamily::Object(_) => "ObjectValue".to_string(),
            AccessorFamily::CollectionOfPrimitive(_) => "CollectionOfPrimitiveValues".to_string(),
            AccessorFamily::CollectionOfObject(_) => "CollectionOfObjectValues".to_string(),
        };
        let argument = family
            .type_argument()
            .map(|a| self.accessor_type_argument(a))
            .unwrap_or_default();
        format!("{}{stem}{argument}", self.accessor_prefix(direction))
    }
}

/// Renders plans as source text.
///
/// Every method receives a plan whose ordering and validation are already
/// settled, so implementations only decide spelling and layout.
pub trait Dialect: Conventions {
    /// Package/namespace line and imports, before any declaration.
    fn write_file_header(&self, w: &mut LanguageWriter, decl: &ClassDecl);

    fn write_class_open(&self, w: &mut LanguageWriter, decl: &ClassDecl);

    fn write_class_close(&self, w: &mut LanguageWriter, decl: &ClassDecl);

    fn write_enum(&self, w: &mut LanguageWriter, decl: &EnumDecl);

    fn write_property(&self, w: &mut LanguageWriter, plan: &PropertyPlan);

    fn write_documentation(&self, w: &mut LanguageWriter, doc: &DocPlan);

    /// Signature through the opening brace.
    fn write_prototype(&self, w: &mut LanguageWriter, proto: &PrototypePlan);

    /// Explicit base-initializer statement for languages that put it in the body.
    fn write_base_initializer(&self, w: &mut LanguageWriter, proto: &PrototypePlan) {
        let _ = (w, proto);
    }

    fn write_guard(&self, w: &mut LanguageWriter, guard: &Guard);

    fn write_serializer(&self, w: &mut LanguageWriter, plan: &SerializerPlan);

    fn write_deserializer(&self, w: &mut LanguageWriter, plan: &DeserializerPlan);

    fn write_request_generator(&self, w: &mut LanguageWriter, plan: &RequestGeneratorPlan);

    fn write_request_executor(&self, w: &mut LanguageWriter, plan: &RequestExecutorPlan);

    fn write_constructor(&self, w: &mut LanguageWriter, plan: &ConstructorPlan);

    /// Only called for profiles that keep accessors as methods.
    fn write_accessor(&self, w: &mut LanguageWriter, plan: &AccessorPlan) {
        let _ = (w, plan);
    }

    fn write_indexer(&self, w: &mut LanguageWriter, plan: &IndexerPlan);

    /// Placeholder body of a hand-written method.
    fn write_custom(&self, w: &mut LanguageWriter, returns_void: bool) {
        if !returns_void {
            w.write_line(format!("return {};", self.null_literal()));
        }
    }
}

/// A code generation backend.
///
/// # Implementing Custom Backends
///
/// ```ignore
/// use normalize_clientgen::{Backend, register_backend};
///
/// struct KotlinBackend;
///
/// impl Backend for KotlinBackend {
///     fn name(&self) -> &'static str { "kotlin" }
///     fn language(&self) -> Language { /* ... */ }
///     fn extension(&self) -> &'static str { "kt" }
///     fn folds_accessors(&self) -> bool { true }
///     fn conventions(&self) -> &dyn Conventions { self }
///     fn dialect(&self) -> &dyn Dialect { self }
/// }
///
/// // Register before first use
/// register_backend(&KotlinBackend);
/// ```
pub trait Backend: Send + Sync {
    /// Unique backend identifier (e.g., "csharp", "java").
    fn name(&self) -> &'static str;

    fn language(&self) -> Language;

    /// File extension for generated code (e.g., "cs", "java", "ts").
    fn extension(&self) -> &'static str;

    /// Whether Getter/Setter semantics live in property emission rather than
    /// in separate accessor methods.
    fn folds_accessors(&self) -> bool;

    fn conventions(&self) -> &dyn Conventions;

    fn dialect(&self) -> &dyn Dialect;

    /// Error returned when an accessor method is written for a folding profile.
    fn check_accessor(&self, kind: MethodKind) -> Result<(), EmitError> {
        if kind.is_accessor() && self.folds_accessors() {
            return Err(EmitError::AccessorsFolded {
                language: self.language(),
                kind,
            });
        }
        Ok(())
    }
}
