//! Java backend.
//!
//! Java keeps Getter/Setter as real methods, so this is the one backend that
//! renders [`AccessorPlan`]s. Asynchronous methods return a
//! `CompletableFuture` and request generators declare `URISyntaxException`.

use super::{concat_address, write_call};
use crate::config::Language;
use crate::emit::{
    AccessorKind, AccessorPlan, AddressPart, BodyPlan, ClassDecl, ConstructorPlan,
    DeserializerPlan, DocPlan, EnumDecl, Guard, GuardCheck, IndexerPlan, PropertyPlan,
    PropertyShape, PrototypePlan, RequestExecutorPlan, RequestGeneratorPlan, SendKind,
    SerializerPlan,
};
use crate::ir::MethodKind;
use crate::naming::{first_lower, first_upper, quote, shouty_snake_case};
use crate::traits::{Backend, Conventions, Dialect};
use crate::translate::{AccessorFamily, Direction, Primitive};
use crate::writer::LanguageWriter;

/// Static instance of the Java backend for registry.
pub static JAVA_BACKEND: JavaBackend = JavaBackend;

const FUTURE: &str = "java.util.concurrent.CompletableFuture";
const URI_EXCEPTION: &str = "java.net.URISyntaxException";

/// Java backend implementing [`Conventions`], [`Dialect`] and [`Backend`].
pub struct JavaBackend;

impl Conventions for JavaBackend {
    fn primitive_type_name(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::String => "String",
            Primitive::Bool => "Boolean",
            Primitive::Int => "Integer",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
            Primitive::Guid => "UUID",
            Primitive::Timestamp => "OffsetDateTime",
        }
    }

    fn stream_type_name(&self) -> &'static str {
        "InputStream"
    }

    fn void_type_name(&self) -> &'static str {
        "void"
    }

    fn null_literal(&self) -> &'static str {
        "null"
    }

    fn accessor_prefix(&self, direction: Direction) -> &'static str {
        match direction {
            Direction::Read => "get",
            Direction::Write => "write",
        }
    }

    fn accessor_type_argument(&self, _argument: &str) -> String {
        String::new()
    }

    fn accessor_arguments(&self, family: &AccessorFamily) -> String {
        family
            .type_argument()
            .map(|t| format!("{t}.class"))
            .unwrap_or_default()
    }

    fn collection_type(&self, element: &str) -> String {
        format!("List<{element}>")
    }

    fn async_type(&self, syntax: &str) -> String {
        if syntax == self.void_type_name() {
            format!("{FUTURE}<Void>")
        } else {
            format!("{FUTURE}<{syntax}>")
        }
    }

    fn method_name(&self, name: &str) -> String {
        first_lower(name)
    }

    fn member_name(&self, name: &str) -> String {
        first_lower(name)
    }
}

impl JavaBackend {
    fn address(&self, parts: &[AddressPart]) -> String {
        concat_address(parts, |m| self.member_name(m))
    }

    fn getter(&self, property: &str) -> String {
        format!("get{}", first_upper(property))
    }

    fn setter(&self, property: &str) -> String {
        format!("set{}", first_upper(property))
    }
}

impl Dialect for JavaBackend {
    fn write_file_header(&self, w: &mut LanguageWriter, decl: &ClassDecl) {
        w.write_line(format!("package {};", decl.namespace));
        w.blank_line();
        let mut imports: Vec<String> = decl
            .foreign_imports()
            .map(|i| format!("import {}.{};", i.module, i.name))
            .collect();
        imports.extend(
            ["java.util.HashMap", "java.util.List", "java.util.Map", "java.util.function.BiConsumer"]
                .map(|i| format!("import {i};")),
        );
        imports.sort();
        imports.dedup();
        w.write_lines(imports);
        w.blank_line();
    }

    fn write_class_open(&self, w: &mut LanguageWriter, decl: &ClassDecl) {
        if let Some(description) = decl.class.description.as_deref() {
            w.write_line(format!("/** {description} */"));
        }
        let mut line = format!("public class {}", decl.name);
        if let Some(base) = &decl.base {
            line.push_str(&format!(" extends {base}"));
        }
        if decl.parsable {
            line.push_str(" implements Parsable");
        }
        line.push_str(" {");
        w.write_line(line);
        w.increase_indent();
    }

    fn write_class_close(&self, w: &mut LanguageWriter, _decl: &ClassDecl) {
        w.decrease_indent();
        w.write_line("}");
    }

    fn write_enum(&self, w: &mut LanguageWriter, decl: &EnumDecl) {
        w.write_line(format!("package {};", decl.namespace));
        w.blank_line();
        if let Some(description) = decl.definition.description.as_deref() {
            w.write_line(format!("/** {description} */"));
        }
        w.block(format!("public enum {} {{", decl.name), "}", |w| {
            if decl.members.is_empty() {
                w.write_line(";");
            }
            let last = decl.members.len().saturating_sub(1);
            for (i, member) in decl.members.iter().enumerate() {
                let end = if i == last { ";" } else { "," };
                w.write_line(format!(
                    "{}({}){end}",
                    shouty_snake_case(member.name),
                    quote(member.name)
                ));
            }
            w.write_line("public final String value;");
            w.block(format!("{}(final String value) {{", decl.name), "}", |w| {
                w.write_line("this.value = value;");
            });
        });
    }

    fn write_property(&self, w: &mut LanguageWriter, plan: &PropertyPlan) {
        match &plan.shape {
            PropertyShape::Navigation(nav) => {
                if let Some(description) = plan.property.description.as_deref() {
                    w.write_line(format!("/** {description} */"));
                }
                w.block(
                    format!("{} {} {}() {{", plan.access, plan.type_syntax, plan.name),
                    "}",
                    |w| {
                        w.write_line(format!(
                            "return new {}({}, {});",
                            nav.builder_type,
                            self.address(&nav.address),
                            self.member_name(&nav.http_core)
                        ));
                    },
                );
            }
            // Stored values are reached through the accessor methods only.
            PropertyShape::BackingStored { .. } => {}
            PropertyShape::Field => {
                if let Some(description) = plan.property.description.as_deref() {
                    w.write_line(format!("/** {description} */"));
                }
                w.write_line(format!("private {} {};", plan.type_syntax, plan.name));
            }
        }
    }

    fn write_documentation(&self, w: &mut LanguageWriter, doc: &DocPlan) {
        if doc.is_empty() {
            return;
        }
        w.write_line("/**");
        if let Some(description) = doc.description {
            w.write_line(format!(" * {description}"));
        }
        for (name, description) in &doc.parameters {
            w.write_line(format!(" * @param {name} {description}"));
        }
        if let Some(returns) = &doc.returns {
            if doc.is_async {
                w.write_line(format!(" * @return a CompletableFuture of {returns}"));
            } else {
                w.write_line(format!(" * @return a {returns}"));
            }
        }
        w.write_line(" */");
    }

    fn write_prototype(&self, w: &mut LanguageWriter, proto: &PrototypePlan) {
        if proto.hides_base {
            w.write_line("@Override");
        }
        let mut line = format!("{} ", proto.access);
        if proto.is_static {
            line.push_str("static ");
        }
        if proto.kind == MethodKind::Deserializer {
            line.push_str("<T> ");
        }
        if let Some(ret) = &proto.return_type {
            if proto.is_async {
                line.push_str(&self.async_type(ret));
            } else {
                line.push_str(ret);
            }
            line.push(' ');
        }
        let parameters: Vec<String> = proto
            .parameters
            .iter()
            .map(|p| format!("final {} {}", p.type_syntax, p.name))
            .collect();
        line.push_str(&format!("{}({})", proto.name, parameters.join(", ")));
        if proto.kind == MethodKind::RequestGenerator {
            line.push_str(&format!(" throws {URI_EXCEPTION}"));
        }
        line.push_str(" {");
        w.write_line(line);
    }

    fn write_base_initializer(&self, w: &mut LanguageWriter, proto: &PrototypePlan) {
        if proto.calls_base {
            w.write_line("super();");
        }
    }

    fn write_guard(&self, w: &mut LanguageWriter, guard: &Guard) {
        let p = guard.parameter;
        match guard.check {
            GuardCheck::Emptiness => w.write_line(format!(
                "if({p} == null || {p}.isEmpty()) throw new IllegalArgumentException(\"{p} cannot be null or empty\");"
            )),
            GuardCheck::Definedness => {
                w.write_line(format!("java.util.Objects.requireNonNull({p});"))
            }
        }
    }

    fn write_serializer(&self, w: &mut LanguageWriter, plan: &SerializerPlan) {
        let writer = plan.writer_name;
        if let Some(base) = plan.base_method {
            w.write_line(format!("super.{}({writer});", self.method_name(base)));
        }
        for write in &plan.writes {
            w.write_line(format!(
                "{writer}.{}({}, this.{}());",
                write.accessor,
                quote(&write.key),
                self.getter(&write.property.name)
            ));
        }
        if let Some(extra) = plan.additional_data {
            w.write_line(format!(
                "{writer}.writeAdditionalData(this.{}());",
                self.getter(&extra.name)
            ));
        }
    }

    fn write_deserializer(&self, w: &mut LanguageWriter, plan: &DeserializerPlan) {
        let base = plan
            .base_method
            .map(|b| format!("super.{}()", self.method_name(b)))
            .unwrap_or_default();
        w.block(
            format!(
                "final Map<String, BiConsumer<T, ParseNode>> fields = new HashMap<String, BiConsumer<T, ParseNode>>({base}) {{{{"
            ),
            "}};",
            |w| {
                for entry in &plan.entries {
                    w.write_line(format!(
                        "this.put({}, (o, n) -> {{ (({})o).{}(n.{}({})); }});",
                        quote(&entry.key),
                        plan.class_name,
                        self.setter(&entry.property.name),
                        entry.accessor,
                        self.accessor_arguments(&entry.family)
                    ));
                }
            },
        );
        w.write_line("return fields;");
    }

    fn write_request_generator(&self, w: &mut LanguageWriter, plan: &RequestGeneratorPlan) {
        w.block(
            "final RequestInformation requestInfo = new RequestInformation() {{",
            "}};",
            |w| {
                w.write_line(format!("uri = new URI({});", self.address(&plan.address)));
                w.write_line(format!("httpMethod = HttpMethod.{};", plan.http_method));
            },
        );
        let core = self.member_name(&plan.http_core);
        match plan.body {
            Some(BodyPlan::Stream(body)) => {
                w.write_line(format!("requestInfo.setStreamContent({});", body.name));
            }
            Some(BodyPlan::Parsable {
                parameter,
                content_type,
            }) => {
                w.write_line(format!(
                    "requestInfo.setContentFromParsable({}, {core}, {});",
                    parameter.name,
                    quote(content_type)
                ));
            }
            None => {}
        }
        if let Some(query) = &plan.query {
            let q = &query.parameter.name;
            w.block(format!("if ({q} != null) {{"), "}", |w| {
                w.write_line(format!(
                    "final {holder} qParams = new {holder}();",
                    holder = query.holder_type
                ));
                w.write_line(format!("{q}.accept(qParams);"));
                w.write_line("qParams.addQueryParameters(requestInfo.queryParameters);");
            });
        }
        if let Some(headers) = plan.headers {
            let h = &headers.name;
            w.block(format!("if ({h} != null) {{"), "}", |w| {
                w.write_line(format!("{h}.accept(requestInfo.headers);"));
            });
        }
        w.write_line("return requestInfo;");
    }

    fn write_request_executor(&self, w: &mut LanguageWriter, plan: &RequestExecutorPlan) {
        let core = self.member_name(&plan.http_core);
        let handler = plan.response_handler.unwrap_or(self.null_literal());
        w.write_line("try {");
        w.increase_indent();
        write_call(
            w,
            &format!("final RequestInformation requestInfo = {}", plan.generator_name),
            &plan.arguments,
        );
        w.write_line(match plan.send {
            SendKind::NoContent => {
                format!("return this.{core}.sendNoContentAsync(requestInfo, {handler});")
            }
            SendKind::Primitive => format!(
                "return this.{core}.sendPrimitiveAsync(requestInfo, {}.class, {handler});",
                plan.return_type
            ),
            SendKind::Typed => format!(
                "return this.{core}.sendAsync(requestInfo, {}.class, {handler});",
                plan.return_type
            ),
            SendKind::Collection => format!(
                "return this.{core}.sendCollectionAsync(requestInfo, {}.class, {handler});",
                plan.element_type
            ),
            SendKind::PrimitiveCollection => format!(
                "return this.{core}.sendPrimitiveCollectionAsync(requestInfo, {}.class, {handler});",
                plan.element_type
            ),
        });
        w.decrease_indent();
        w.block(format!("}} catch ({URI_EXCEPTION} ex) {{"), "}", |w| {
            w.write_line(format!("return {FUTURE}.failedFuture(ex);"));
        });
    }

    fn write_constructor(&self, w: &mut LanguageWriter, plan: &ConstructorPlan) {
        for property in &plan.defaults {
            if let Some(default) = &property.default_value {
                w.write_line(format!("this.{} = {default};", self.member_name(&property.name)));
            }
        }
        for binding in &plan.bindings {
            w.write_line(format!(
                "this.{} = {};",
                self.member_name(&binding.property.name),
                binding.parameter.name
            ));
        }
        for module in plan.serializer_modules {
            w.write_line(format!("ApiClientBuilder.registerDefaultSerializer({module}::new);"));
        }
        for module in plan.deserializer_modules {
            w.write_line(format!("ApiClientBuilder.registerDefaultDeserializer({module}::new);"));
        }
        if plan.enable_backing_store {
            w.write_line(format!(
                "this.{}.enableBackingStore();",
                self.member_name(&plan.http_core)
            ));
        }
    }

    fn write_accessor(&self, w: &mut LanguageWriter, plan: &AccessorPlan) {
        let name = self.member_name(&plan.property.name);
        let key = quote(&plan.property.name);
        match (plan.kind, plan.backing_store) {
            (AccessorKind::Get, Some(store)) => {
                let read = format!("this.{}().get({key})", self.getter(store));
                match plan.default {
                    None => w.write_line(format!("return {read};")),
                    Some(default) => {
                        w.write_line(format!("{} value = {read};", plan.type_syntax));
                        w.block("if(value == null) {", "}", |w| {
                            w.write_line(format!("value = {default};"));
                            w.write_line(format!(
                                "this.{}(value);",
                                self.setter(&plan.property.name)
                            ));
                        });
                        w.write_line("return value;");
                    }
                }
            }
            (AccessorKind::Get, None) => {
                if let Some(default) = plan.default {
                    w.block(format!("if(this.{name} == null) {{"), "}", |w| {
                        w.write_line(format!("this.{name} = {default};"));
                    });
                }
                w.write_line(format!("return this.{name};"));
            }
            (AccessorKind::Set, Some(store)) => {
                w.write_line(format!(
                    "this.{}().set({key}, {});",
                    self.getter(store),
                    plan.value
                ));
            }
            (AccessorKind::Set, None) => {
                w.write_line(format!("this.{name} = {};", plan.value));
            }
        }
    }

    fn write_indexer(&self, w: &mut LanguageWriter, plan: &IndexerPlan) {
        w.write_line(format!(
            "return new {}({}, {});",
            plan.return_type,
            self.address(&plan.address),
            self.member_name(&plan.http_core)
        ));
    }
}

impl Backend for JavaBackend {
    fn name(&self) -> &'static str {
        "java"
    }

    fn language(&self) -> Language {
        Language::Java
    }

    fn extension(&self) -> &'static str {
        "java"
    }

    fn folds_accessors(&self) -> bool {
        false
    }

    fn conventions(&self) -> &dyn Conventions {
        self
    }

    fn dialect(&self) -> &dyn Dialect {
        self
    }
}
