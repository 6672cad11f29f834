//! C# backend.
//!
//! Properties are auto-properties, so Getter/Setter methods are folded into
//! property emission. Asynchronous methods return `Task<T>` and constructors
//! of derived classes chain with ` : base()`.

use super::{concat_address, write_call};
use crate::config::Language;
use crate::emit::{
    AddressPart, BodyPlan, ClassDecl, ConstructorPlan, DeserializerPlan, DocPlan, EnumDecl, Guard,
    GuardCheck, IndexerPlan, PropertyPlan, PropertyShape, PrototypePlan, RequestExecutorPlan,
    RequestGeneratorPlan, SendKind, SerializerPlan,
};
use crate::naming::{first_upper, pascal_case, quote};
use crate::traits::{Backend, Conventions, Dialect};
use crate::translate::{Direction, Primitive};
use crate::writer::LanguageWriter;

/// Static instance of the C# backend for registry.
pub static CSHARP_BACKEND: CSharpBackend = CSharpBackend;

/// Namespaces every generated file imports.
const BCL_USINGS: &[&str] = &[
    "System",
    "System.Collections.Generic",
    "System.IO",
    "System.Linq",
    "System.Threading.Tasks",
];

const DOC_PREFIX: &str = "/// ";

/// C# backend implementing [`Conventions`], [`Dialect`] and [`Backend`].
pub struct CSharpBackend;

impl Conventions for CSharpBackend {
    fn primitive_type_name(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::String => "string",
            Primitive::Bool => "bool",
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Guid => "Guid",
            Primitive::Timestamp => "DateTimeOffset",
        }
    }

    fn stream_type_name(&self) -> &'static str {
        "Stream"
    }

    fn void_type_name(&self) -> &'static str {
        "void"
    }

    fn null_literal(&self) -> &'static str {
        "null"
    }

    fn accessor_prefix(&self, direction: Direction) -> &'static str {
        match direction {
            Direction::Read => "Get",
            Direction::Write => "Write",
        }
    }

    fn accessor_type_argument(&self, argument: &str) -> String {
        format!("<{argument}>")
    }

    fn collection_type(&self, element: &str) -> String {
        format!("List<{element}>")
    }

    fn nullable_type(&self, syntax: &str, primitive: Option<Primitive>) -> String {
        match primitive {
            Some(p) if p.is_value_type() => format!("{syntax}?"),
            _ => syntax.to_string(),
        }
    }

    fn async_type(&self, syntax: &str) -> String {
        if syntax == self.void_type_name() {
            "Task".to_string()
        } else {
            format!("Task<{syntax}>")
        }
    }

    fn method_name(&self, name: &str) -> String {
        first_upper(name)
    }

    fn member_name(&self, name: &str) -> String {
        first_upper(name)
    }
}

impl CSharpBackend {
    fn address(&self, parts: &[AddressPart]) -> String {
        concat_address(parts, |m| self.member_name(m))
    }
}

impl Dialect for CSharpBackend {
    fn write_file_header(&self, w: &mut LanguageWriter, decl: &ClassDecl) {
        let mut namespaces: Vec<&str> = BCL_USINGS.to_vec();
        namespaces.extend(decl.foreign_imports().map(|i| i.module.as_str()));
        namespaces.sort_unstable();
        namespaces.dedup();
        for ns in namespaces {
            w.write_line(format!("using {ns};"));
        }
        w.write_line(format!("namespace {} {{", decl.namespace));
        w.increase_indent();
    }

    fn write_class_open(&self, w: &mut LanguageWriter, decl: &ClassDecl) {
        if let Some(description) = decl.class.description.as_deref() {
            w.write_line(format!("{DOC_PREFIX}<summary>{description}</summary>"));
        }
        let mut bases: Vec<&str> = decl.base.iter().map(String::as_str).collect();
        if decl.parsable {
            bases.push("IParsable");
        }
        if bases.is_empty() {
            w.write_line(format!("public class {} {{", decl.name));
        } else {
            w.write_line(format!("public class {} : {} {{", decl.name, bases.join(", ")));
        }
        w.increase_indent();
    }

    fn write_class_close(&self, w: &mut LanguageWriter, _decl: &ClassDecl) {
        w.decrease_indent();
        w.write_line("}");
        w.decrease_indent();
        w.write_line("}");
    }

    fn write_enum(&self, w: &mut LanguageWriter, decl: &EnumDecl) {
        w.write_line("using System;");
        w.block(format!("namespace {} {{", decl.namespace), "}", |w| {
            if let Some(description) = decl.definition.description.as_deref() {
                w.write_line(format!("{DOC_PREFIX}<summary>{description}</summary>"));
            }
            if decl.flags {
                w.write_line("[Flags]");
            }
            let wide = decl
                .members
                .iter()
                .any(|m| m.flag.is_some_and(|v| v > i32::MAX as u64));
            let base = if wide { " : ulong" } else { "" };
            w.block(format!("public enum {}{base} {{", decl.name), "}", |w| {
                for member in &decl.members {
                    let name = pascal_case(member.name);
                    match member.flag {
                        Some(value) => w.write_line(format!("{name} = {value},")),
                        None => w.write_line(format!("{name},")),
                    }
                }
            });
        });
    }

    fn write_property(&self, w: &mut LanguageWriter, plan: &PropertyPlan) {
        if let Some(description) = plan.property.description.as_deref() {
            w.write_line(format!("{DOC_PREFIX}<summary>{description}</summary>"));
        }
        let head = format!("{} {} {}", plan.access, plan.type_syntax, plan.name);
        match &plan.shape {
            PropertyShape::Navigation(nav) => {
                w.write_line(format!(
                    "{head} {{ get => new {}({}, {}); }}",
                    nav.builder_type,
                    self.address(&nav.address),
                    self.member_name(&nav.http_core)
                ));
            }
            PropertyShape::BackingStored { store } => {
                let store = self.member_name(store);
                w.block(format!("{head} {{"), "}", |w| {
                    w.write_line(format!(
                        "get {{ return {store}?.Get<{}>(nameof({})); }}",
                        plan.type_syntax, plan.name
                    ));
                    w.write_line(format!(
                        "set {{ {store}?.Set(nameof({}), value); }}",
                        plan.name
                    ));
                });
            }
            PropertyShape::Field => {
                let setter = if plan.property.read_only {
                    "private set;"
                } else {
                    "set;"
                };
                w.write_line(format!("{head} {{ get; {setter} }}"));
            }
        }
    }

    fn write_documentation(&self, w: &mut LanguageWriter, doc: &DocPlan) {
        if doc.is_empty() {
            return;
        }
        w.write_line(format!("{DOC_PREFIX}<summary>"));
        if let Some(description) = doc.description {
            w.write_line(format!("{DOC_PREFIX}{description}"));
        }
        w.write_line(format!("{DOC_PREFIX}</summary>"));
        for (name, description) in &doc.parameters {
            w.write_line(format!("{DOC_PREFIX}<param name=\"{name}\">{description}</param>"));
        }
    }

    fn write_prototype(&self, w: &mut LanguageWriter, proto: &PrototypePlan) {
        let mut line = format!("{} ", proto.access);
        if proto.is_static {
            line.push_str("static ");
        }
        if proto.hides_base {
            line.push_str("new ");
        }
        if let Some(ret) = &proto.return_type {
            if proto.is_async {
                line.push_str("async ");
                line.push_str(&self.async_type(ret));
            } else {
                line.push_str(ret);
            }
            line.push(' ');
        }
        let parameters: Vec<String> = proto
            .parameters
            .iter()
            .map(|p| {
                if p.optional {
                    format!("{} {} = default", p.type_syntax, p.name)
                } else {
                    format!("{} {}", p.type_syntax, p.name)
                }
            })
            .collect();
        line.push_str(&format!("{}({})", proto.name, parameters.join(", ")));
        if proto.calls_base {
            line.push_str(" : base()");
        }
        line.push_str(" {");
        w.write_line(line);
    }

    fn write_guard(&self, w: &mut LanguageWriter, guard: &Guard) {
        let p = guard.parameter;
        match guard.check {
            GuardCheck::Emptiness => w.write_line(format!(
                "if(string.IsNullOrEmpty({p})) throw new ArgumentNullException(nameof({p}));"
            )),
            GuardCheck::Definedness => {
                w.write_line(format!("_ = {p} ?? throw new ArgumentNullException(nameof({p}));"))
            }
        }
    }

    fn write_serializer(&self, w: &mut LanguageWriter, plan: &SerializerPlan) {
        let writer = plan.writer_name;
        if let Some(base) = plan.base_method {
            w.write_line(format!("base.{}({writer});", self.method_name(base)));
        }
        for write in &plan.writes {
            w.write_line(format!(
                "{writer}.{}({}, {});",
                write.accessor,
                quote(&write.key),
                self.member_name(&write.property.name)
            ));
        }
        if let Some(extra) = plan.additional_data {
            w.write_line(format!(
                "{writer}.WriteAdditionalData({});",
                self.member_name(&extra.name)
            ));
        }
    }

    fn write_deserializer(&self, w: &mut LanguageWriter, plan: &DeserializerPlan) {
        let base = plan
            .base_method
            .map(|b| format!("(base.{}())", self.method_name(b)))
            .unwrap_or_default();
        w.block(
            format!("return new Dictionary<string, Action<T, IParseNode>>{base} {{"),
            "};",
            |w| {
                for entry in &plan.entries {
                    let collapse = if entry.family.is_collection() {
                        ".ToList()"
                    } else {
                        ""
                    };
                    w.write_line(format!(
                        "[{}] = (o,n) => {{ (o as {}).{} = n.{}(){collapse}; }},",
                        quote(&entry.key),
                        plan.class_name,
                        self.member_name(&entry.property.name),
                        entry.accessor
                    ));
                }
            },
        );
    }

    fn write_request_generator(&self, w: &mut LanguageWriter, plan: &RequestGeneratorPlan) {
        w.block("var requestInfo = new RequestInformation {", "};", |w| {
            w.write_line(format!("HttpMethod = HttpMethod.{},", plan.http_method));
            w.write_line(format!("URI = new Uri({}),", self.address(&plan.address)));
        });
        let core = self.member_name(&plan.http_core);
        match plan.body {
            Some(BodyPlan::Stream(body)) => {
                w.write_line(format!("requestInfo.SetStreamContent({});", body.name));
            }
            Some(BodyPlan::Parsable {
                parameter,
                content_type,
            }) => {
                w.write_line(format!(
                    "requestInfo.SetContentFromParsable({}, {core}, {});",
                    parameter.name,
                    quote(content_type)
                ));
            }
            None => {}
        }
        if let Some(query) = &plan.query {
            let q = &query.parameter.name;
            w.block(format!("if ({q} != null) {{"), "}", |w| {
                w.write_line(format!("var qParams = new {}();", query.holder_type));
                w.write_line(format!("{q}.Invoke(qParams);"));
                w.write_line("qParams.AddQueryParameters(requestInfo.QueryParameters);");
            });
        }
        if let Some(headers) = plan.headers {
            w.write_line(format!("{}?.Invoke(requestInfo.Headers);", headers.name));
        }
        w.write_line("return requestInfo;");
    }

    fn write_request_executor(&self, w: &mut LanguageWriter, plan: &RequestExecutorPlan) {
        write_call(
            w,
            &format!("var requestInfo = {}", plan.generator_name),
            &plan.arguments,
        );
        let core = self.member_name(&plan.http_core);
        let handler = plan.response_handler.unwrap_or(self.null_literal());
        let line = match plan.send {
            SendKind::NoContent => {
                format!("await {core}.SendNoContentAsync(requestInfo, {handler});")
            }
            SendKind::Primitive => format!(
                "return await {core}.SendPrimitiveAsync<{}>(requestInfo, {handler});",
                plan.return_type
            ),
            SendKind::Typed => format!(
                "return await {core}.SendAsync<{}>(requestInfo, {handler});",
                plan.return_type
            ),
            SendKind::Collection => format!(
                "return await {core}.SendCollectionAsync<{}>(requestInfo, {handler});",
                plan.element_type
            ),
            SendKind::PrimitiveCollection => format!(
                "return await {core}.SendPrimitiveCollectionAsync<{}>(requestInfo, {handler});",
                plan.element_type
            ),
        };
        w.write_line(line);
    }

    fn write_constructor(&self, w: &mut LanguageWriter, plan: &ConstructorPlan) {
        for property in &plan.defaults {
            if let Some(default) = &property.default_value {
                w.write_line(format!("{} = {default};", self.member_name(&property.name)));
            }
        }
        for binding in &plan.bindings {
            w.write_line(format!(
                "{} = {};",
                self.member_name(&binding.property.name),
                binding.parameter.name
            ));
        }
        for module in plan.serializer_modules {
            w.write_line(format!("ApiClientBuilder.RegisterDefaultSerializer<{module}>();"));
        }
        for module in plan.deserializer_modules {
            w.write_line(format!("ApiClientBuilder.RegisterDefaultDeserializer<{module}>();"));
        }
        if plan.enable_backing_store {
            w.write_line(format!(
                "{}.EnableBackingStore();",
                self.member_name(&plan.http_core)
            ));
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

impl Backend for CSharpBackend {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn language(&self) -> Language {
        Language::CSharp
    }

    fn extension(&self) -> &'static str {
        "cs"
    }

    fn folds_accessors(&self) -> bool {
        true
    }

    fn conventions(&self) -> &dyn Conventions {
        self
    }

    fn dialect(&self) -> &dyn Dialect {
        self
    }
}
