//! Writer Engine: walks the tree and drives one backend.
//!
//! Every method is written in the same order regardless of language:
//! documentation, prototype, base initializer, guards, kind-specific body,
//! closing brace. The body plan is computed before anything is written, so
//! a failing element leaves no partial text behind.

use crate::config::GenerationConfig;
use crate::emit::{
    AccessorPlan, ConstructorPlan, DeserializerPlan, IndexerPlan, MethodContext,
    RequestExecutorPlan, RequestGeneratorPlan, SerializerPlan, plan_accessor, plan_class,
    plan_constructor, plan_deserializer, plan_doc, plan_enum, plan_guards, plan_indexer,
    plan_property, plan_prototype, plan_request_executor, plan_request_generator,
    plan_serializer,
};
use crate::error::EmitError;
use crate::ir::{Class, ClassId, CodeTree, EnumId, Method, MethodKind, Property};
use crate::registry::backend_for;
use crate::traits::Backend;
use crate::writer::LanguageWriter;
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// One emitted source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedUnit {
    pub namespace: String,
    /// Declared type name, also the file stem.
    pub name: String,
    pub extension: &'static str,
    pub source: String,
}

impl GeneratedUnit {
    /// `namespace/segments/Name.ext`, relative to the output root.
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.namespace.split('.').filter(|s| !s.is_empty()).collect();
        path.push(format!("{}.{}", self.name, self.extension));
        path
    }
}

/// Kind-specific body, planned ahead of writing.
enum Body<'a> {
    Serializer(SerializerPlan<'a>),
    Deserializer(DeserializerPlan<'a>),
    RequestGenerator(RequestGeneratorPlan<'a>),
    RequestExecutor(RequestExecutorPlan<'a>),
    Constructor(ConstructorPlan<'a>),
    Accessor(AccessorPlan<'a>),
    Indexer(IndexerPlan),
    Custom { returns_void: bool },
}

/// Writes a [`CodeTree`] in one language.
pub struct CodeWriter<'a> {
    tree: &'a CodeTree,
    config: &'a GenerationConfig,
    backend: &'static dyn Backend,
}

impl<'a> CodeWriter<'a> {
    /// Writer for the language named by `config`, looked up in the registry.
    pub fn new(tree: &'a CodeTree, config: &'a GenerationConfig) -> Result<Self, EmitError> {
        let backend =
            backend_for(config.language).ok_or(EmitError::UnsupportedLanguage(config.language))?;
        Ok(Self::with_backend(tree, config, backend))
    }

    pub fn with_backend(
        tree: &'a CodeTree,
        config: &'a GenerationConfig,
        backend: &'static dyn Backend,
    ) -> Self {
        Self {
            tree,
            config,
            backend,
        }
    }

    pub fn backend(&self) -> &'static dyn Backend {
        self.backend
    }

    fn class(&self, id: ClassId) -> Result<&'a Class, EmitError> {
        self.tree.class(id).ok_or(EmitError::UnknownClass(id))
    }

    fn plan_body(&self, ctx: &MethodContext<'a>) -> Result<Body<'a>, EmitError> {
        Ok(match ctx.method.kind {
            MethodKind::Serializer => Body::Serializer(plan_serializer(ctx)?),
            MethodKind::Deserializer => Body::Deserializer(plan_deserializer(ctx)?),
            MethodKind::RequestGenerator => Body::RequestGenerator(plan_request_generator(ctx)?),
            MethodKind::RequestExecutor => Body::RequestExecutor(plan_request_executor(ctx)?),
            MethodKind::Constructor | MethodKind::ClientConstructor => {
                Body::Constructor(plan_constructor(ctx))
            }
            MethodKind::Getter | MethodKind::Setter => Body::Accessor(plan_accessor(ctx)?),
            MethodKind::IndexerCompat => Body::Indexer(plan_indexer(ctx)?),
            MethodKind::Custom => Body::Custom {
                returns_void: ctx.returns_void(),
            },
        })
    }

    /// Write one method of `class` into `w`.
    pub fn write_method(
        &self,
        w: &mut LanguageWriter,
        class: &'a Class,
        method: &'a Method,
    ) -> Result<(), EmitError> {
        self.backend.check_accessor(method.kind)?;
        let ctx = MethodContext::new(
            self.tree,
            self.backend.conventions(),
            class,
            method,
            self.config,
        );
        let proto = plan_prototype(&ctx)?;
        let body = self.plan_body(&ctx)?;
        let dialect = self.backend.dialect();

        dialect.write_documentation(w, &plan_doc(&ctx));
        dialect.write_prototype(w, &proto);
        w.increase_indent();
        dialect.write_base_initializer(w, &proto);
        for guard in plan_guards(&ctx) {
            dialect.write_guard(w, &guard);
        }
        match &body {
            Body::Serializer(plan) => dialect.write_serializer(w, plan),
            Body::Deserializer(plan) => dialect.write_deserializer(w, plan),
            Body::RequestGenerator(plan) => dialect.write_request_generator(w, plan),
            Body::RequestExecutor(plan) => dialect.write_request_executor(w, plan),
            Body::Constructor(plan) => dialect.write_constructor(w, plan),
            Body::Accessor(plan) => dialect.write_accessor(w, plan),
            Body::Indexer(plan) => dialect.write_indexer(w, plan),
            Body::Custom { returns_void } => dialect.write_custom(w, *returns_void),
        }
        w.decrease_indent();
        w.write_line("}");
        Ok(())
    }

    /// Write one property of `class` into `w`.
    pub fn write_property(
        &self,
        w: &mut LanguageWriter,
        class: &Class,
        property: &Property,
    ) -> Result<(), EmitError> {
        let plan = plan_property(self.tree, self.backend.conventions(), class, property)?;
        self.backend.dialect().write_property(w, &plan);
        Ok(())
    }

    /// Source of the method at `index` in `class`, outside any class body.
    pub fn render_method(&self, class: ClassId, index: usize) -> Result<String, EmitError> {
        let owner = self.class(class)?;
        let method = owner.methods.get(index).ok_or_else(|| EmitError::UnknownMember {
            class: owner.name.clone(),
            index,
        })?;
        let mut w = LanguageWriter::default();
        self.write_method(&mut w, owner, method)?;
        Ok(w.into_string())
    }

    /// Source of the property at `index` in `class`, outside any class body.
    pub fn render_property(&self, class: ClassId, index: usize) -> Result<String, EmitError> {
        let owner = self.class(class)?;
        let property = owner.properties.get(index).ok_or_else(|| EmitError::UnknownMember {
            class: owner.name.clone(),
            index,
        })?;
        let mut w = LanguageWriter::default();
        self.write_property(&mut w, owner, property)?;
        Ok(w.into_string())
    }

    /// Whole file for one class: header, declaration, properties, methods.
    pub fn write_class(&self, id: ClassId) -> Result<GeneratedUnit, EmitError> {
        let class = self.class(id)?;
        let decl = plan_class(self.tree, self.backend.conventions(), self.config, class)?;
        debug!(class = %decl.name, language = %self.config.language, "writing class");
        let dialect = self.backend.dialect();
        let mut w = LanguageWriter::default();

        dialect.write_file_header(&mut w, &decl);
        dialect.write_class_open(&mut w, &decl);
        for property in &class.properties {
            self.write_property(&mut w, class, property)?;
        }
        let folds = self.backend.folds_accessors();
        for method in class
            .methods
            .iter()
            .filter(|m| !(folds && m.kind.is_accessor()))
        {
            w.blank_line();
            self.write_method(&mut w, class, method)?;
        }
        dialect.write_class_close(&mut w, &decl);

        Ok(GeneratedUnit {
            namespace: decl.namespace,
            name: decl.name,
            extension: self.backend.extension(),
            source: w.into_string(),
        })
    }

    pub fn write_enum(&self, id: EnumId) -> Result<GeneratedUnit, EmitError> {
        let definition = self.tree.enum_def(id).ok_or(EmitError::UnknownEnum(id))?;
        let decl = plan_enum(self.tree, self.backend.conventions(), self.config, definition)?;
        debug!(name = %decl.name, language = %self.config.language, "writing enum");
        let mut w = LanguageWriter::default();
        self.backend.dialect().write_enum(&mut w, &decl);
        Ok(GeneratedUnit {
            namespace: decl.namespace,
            name: decl.name,
            extension: self.backend.extension(),
            source: w.into_string(),
        })
    }

    /// Every class, then every enum, in tree order.
    ///
    /// Units are written in parallel; each owns its buffer and the tree is
    /// only read, so the result is the same as a sequential walk.
    pub fn write_tree(&self) -> Result<Vec<GeneratedUnit>, EmitError> {
        let classes: Vec<ClassId> = self.tree.classes().map(|(id, _)| id).collect();
        let enums: Vec<EnumId> = self.tree.enums().map(|(id, _)| id).collect();
        let mut units: Vec<GeneratedUnit> = classes
            .par_iter()
            .map(|&id| self.write_class(id))
            .collect::<Result<_, _>>()?;
        let enum_units: Vec<GeneratedUnit> = enums
            .par_iter()
            .map(|&id| self.write_enum(id))
            .collect::<Result<_, _>>()?;
        units.extend(enum_units);
        debug!(units = units.len(), language = %self.config.language, "tree written");
        Ok(units)
    }
}
