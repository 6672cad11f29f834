//! TypeScript backend.

use super::{concat_address, write_call};
use crate::config::Language;
use crate::emit::{
    AddressPart, BodyPlan, ClassDecl, ConstructorPlan, DeserializerPlan, DocPlan, EnumDecl, Guard,
    GuardCheck, ImportPlan, IndexerPlan, PropertyPlan, PropertyShape, PrototypePlan,
    RequestExecutorPlan, RequestGeneratorPlan, SendKind, SerializerPlan,
};
use crate::naming::{first_lower, pascal_case, quote};
use crate::traits::{Backend, Conventions, Dialect};
use crate::translate::{AccessorFamily, Direction, Primitive};
use crate::writer::LanguageWriter;

/// Static instance of the TypeScript backend for registry.
pub static TYPESCRIPT_BACKEND: TypeScriptBackend = TypeScriptBackend;

/// TypeScript backend implementing [`Conventions`], [`Dialect`] and [`Backend`].
pub struct TypeScriptBackend;

impl Conventions for TypeScriptBackend {
    fn primitive_type_name(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::String | Primitive::Guid => "string",
            Primitive::Bool => "boolean",
            Primitive::Int | Primitive::Float | Primitive::Double => "number",
            Primitive::Timestamp => "Date",
        }
    }

    fn stream_type_name(&self) -> &'static str {
        "ReadableStream"
    }

    fn void_type_name(&self) -> &'static str {
        "void"
    }

    fn null_literal(&self) -> &'static str {
        "undefined"
    }

    fn accessor_prefix(&self, direction: Direction) -> &'static str {
        match direction {
            Direction::Read => "get",
            Direction::Write => "write",
        }
    }

    fn accessor_type_argument(&self, argument: &str) -> String {
        format!("<{argument}>")
    }

    fn accessor_arguments(&self, family: &AccessorFamily) -> String {
        match family {
            AccessorFamily::Enum(name)
            | AccessorFamily::Object(name)
            | AccessorFamily::CollectionOfObject(name) => name.clone(),
            AccessorFamily::Primitive(_) | AccessorFamily::CollectionOfPrimitive(_) => {
                String::new()
            }
        }
    }

    fn collection_type(&self, element: &str) -> String {
        format!("{element}[]")
    }

    fn async_type(&self, syntax: &str) -> String {
        format!("Promise<{syntax}>")
    }

    fn method_name(&self, name: &str) -> String {
        first_lower(name)
    }

    fn member_name(&self, name: &str) -> String {
        first_lower(name)
    }
}

impl TypeScriptBackend {
    fn address(&self, parts: &[AddressPart]) -> String {
        concat_address(parts, |m| format!("this.{}", self.member_name(m)))
    }

    fn member(&self, name: &str) -> String {
        format!("this.{}", self.member_name(name))
    }
}

/// Module specifier of `import` relative to a file in namespace `from`.
fn module_specifier(from: &str, import: &ImportPlan) -> String {
    if import.external {
        return import.module.clone();
    }
    let from: Vec<&str> = from.split('.').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = import.module.split('.').filter(|s| !s.is_empty()).collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    let mut path = match from.len() - common {
        0 => "./".to_string(),
        up => "../".repeat(up),
    };
    for segment in &to[common..] {
        path.push_str(&first_lower(segment));
        path.push('/');
    }
    path.push_str(&first_lower(&import.name));
    path
}

fn quote_single(text: &str) -> String {
    format!("'{}'", text.replace('\'', "\\'"))
}

impl Dialect for TypeScriptBackend {
    fn write_file_header(&self, w: &mut LanguageWriter, decl: &ClassDecl) {
        // Every module is a file, so same-namespace types are imported too.
        let mut lines: Vec<String> = decl
            .imports
            .iter()
            .map(|i| {
                format!(
                    "import {{{}}} from {};",
                    i.name,
                    quote_single(&module_specifier(&decl.namespace, i))
                )
            })
            .collect();
        lines.sort();
        lines.dedup();
        if !lines.is_empty() {
            w.write_lines(lines);
            w.blank_line();
        }
    }

    fn write_class_open(&self, w: &mut LanguageWriter, decl: &ClassDecl) {
        if let Some(description) = decl.class.description.as_deref() {
            w.write_line(format!("/** {description} */"));
        }
        let mut line = format!("export class {}", decl.name);
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
        if let Some(description) = decl.definition.description.as_deref() {
            w.write_line(format!("/** {description} */"));
        }
        w.block(format!("export enum {} {{", decl.name), "}", |w| {
            for member in &decl.members {
                w.write_line(format!("{} = {},", pascal_case(member.name), quote(member.name)));
            }
        });
    }

    fn write_property(&self, w: &mut LanguageWriter, plan: &PropertyPlan) {
        if let Some(description) = plan.property.description.as_deref() {
            w.write_line(format!("/** {description} */"));
        }
        match &plan.shape {
            PropertyShape::Navigation(nav) => {
                w.block(
                    format!("{} get {}(): {} {{", plan.access, plan.name, plan.type_syntax),
                    "}",
                    |w| {
                        w.write_line(format!(
                            "return new {}({}, {});",
                            nav.builder_type,
                            self.address(&nav.address),
                            self.member(&nav.http_core)
                        ));
                    },
                );
            }
            PropertyShape::BackingStored { store } => {
                let store = self.member(store);
                let key = quote(&plan.property.name);
                w.block(
                    format!(
                        "{} get {}(): {} | undefined {{",
                        plan.access, plan.name, plan.type_syntax
                    ),
                    "}",
                    |w| {
                        w.write_line(format!("return {store}.get<{}>({key});", plan.type_syntax));
                    },
                );
                if !plan.property.read_only {
                    w.block(
                        format!(
                            "{} set {}(value: {} | undefined) {{",
                            plan.access, plan.name, plan.type_syntax
                        ),
                        "}",
                        |w| {
                            w.write_line(format!("{store}.set({key}, value);"));
                        },
                    );
                }
            }
            PropertyShape::Field => {
                let readonly = if plan.property.read_only {
                    " readonly"
                } else {
                    ""
                };
                // Flag enums hold any combination of members.
                let ty = if plan.flag_enum {
                    format!("{}[]", plan.type_syntax)
                } else {
                    plan.type_syntax.clone()
                };
                w.write_line(format!(
                    "{}{readonly} {}?: {ty} | undefined;",
                    plan.access, plan.name
                ));
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
                w.write_line(format!(" * @returns a Promise of {returns}"));
            } else {
                w.write_line(format!(" * @returns a {returns}"));
            }
        }
        w.write_line(" */");
    }

    fn write_prototype(&self, w: &mut LanguageWriter, proto: &PrototypePlan) {
        let parameters: Vec<String> = proto
            .parameters
            .iter()
            .map(|p| {
                if p.optional {
                    format!("{}?: {} | undefined", p.name, p.type_syntax)
                } else {
                    format!("{}: {}", p.name, p.type_syntax)
                }
            })
            .collect();
        if proto.is_constructor() {
            w.write_line(format!("{} constructor({}) {{", proto.access, parameters.join(", ")));
            return;
        }
        let mut line = format!("{} ", proto.access);
        if proto.is_static {
            line.push_str("static ");
        }
        if proto.hides_base {
            line.push_str("override ");
        }
        line.push_str(&format!("{}({})", proto.name, parameters.join(", ")));
        if let Some(ret) = &proto.return_type {
            let ret = if proto.is_async {
                self.async_type(ret)
            } else if proto.returns_void {
                ret.clone()
            } else {
                format!("{ret} | undefined")
            };
            line.push_str(&format!(": {ret}"));
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
                "if(!{p} || {p}.length === 0) throw new Error(\"{p} cannot be null or empty\");"
            )),
            GuardCheck::Definedness => w.write_line(format!(
                "if({p} === undefined || {p} === null) throw new Error(\"{p} cannot be undefined\");"
            )),
        }
    }

    fn write_serializer(&self, w: &mut LanguageWriter, plan: &SerializerPlan) {
        let writer = plan.writer_name;
        if let Some(base) = plan.base_method {
            w.write_line(format!("super.{}({writer});", self.method_name(base)));
        }
        for write in &plan.writes {
            w.write_line(format!(
                "{writer}.{}({}, {});",
                write.accessor,
                quote(&write.key),
                self.member(&write.property.name)
            ));
        }
        if let Some(extra) = plan.additional_data {
            w.write_line(format!(
                "{writer}.writeAdditionalData({});",
                self.member(&extra.name)
            ));
        }
    }

    fn write_deserializer(&self, w: &mut LanguageWriter, plan: &DeserializerPlan) {
        w.block(
            "return new Map<string, (item: T, node: ParseNode) => void>([",
            "]);",
            |w| {
                if let Some(base) = plan.base_method {
                    w.write_line(format!("...super.{}(),", self.method_name(base)));
                }
                for entry in &plan.entries {
                    w.write_line(format!(
                        "[{}, (o, n) => {{ (o as unknown as {}).{} = n.{}({}); }}],",
                        quote(&entry.key),
                        plan.class_name,
                        self.member_name(&entry.property.name),
                        entry.accessor,
                        self.accessor_arguments(&entry.family)
                    ));
                }
            },
        );
    }

    fn write_request_generator(&self, w: &mut LanguageWriter, plan: &RequestGeneratorPlan) {
        w.write_line("const requestInfo = new RequestInformation();");
        w.write_line(format!("requestInfo.URI = {};", self.address(&plan.address)));
        w.write_line(format!("requestInfo.httpMethod = HttpMethod.{};", plan.http_method));
        let core = self.member(&plan.http_core);
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
            w.block(format!("if ({q}) {{"), "}", |w| {
                w.write_line(format!("const qParams = new {}();", query.holder_type));
                w.write_line(format!("{q}.call(this, qParams);"));
                w.write_line("qParams.addQueryParameters(requestInfo.queryParameters);");
            });
        }
        if let Some(headers) = plan.headers {
            let h = &headers.name;
            w.write_line(format!("{h} && {h}.call(this, requestInfo.headers);"));
        }
        w.write_line("return requestInfo;");
    }

    fn write_request_executor(&self, w: &mut LanguageWriter, plan: &RequestExecutorPlan) {
        write_call(
            w,
            &format!("const requestInfo = this.{}", plan.generator_name),
            &plan.arguments,
        );
        let core = self.member(&plan.http_core);
        let handler = plan.response_handler.unwrap_or(self.null_literal());
        let ty = &plan.return_type;
        let send = match plan.send {
            SendKind::NoContent => format!("sendNoContentAsync(requestInfo, {handler})"),
            SendKind::Primitive => format!(
                "sendPrimitiveAsync<{ty}>(requestInfo, {}, {handler})",
                quote(ty)
            ),
            SendKind::Typed => format!("sendAsync<{ty}>(requestInfo, {ty}, {handler})"),
            SendKind::Collection => format!(
                "sendCollectionAsync<{element}>(requestInfo, {element}, {handler})",
                element = plan.element_type
            ),
            SendKind::PrimitiveCollection => format!(
                "sendCollectionOfPrimitiveAsync<{element}>(requestInfo, {}, {handler})",
                quote(&plan.element_type),
                element = plan.element_type
            ),
        };
        w.write_line(format!(
            "return {core}?.{send} ?? Promise.reject(new Error('http core is null'));"
        ));
    }

    fn write_constructor(&self, w: &mut LanguageWriter, plan: &ConstructorPlan) {
        for property in &plan.defaults {
            if let Some(default) = &property.default_value {
                w.write_line(format!("{} = {default};", self.member(&property.name)));
            }
        }
        for binding in &plan.bindings {
            w.write_line(format!(
                "{} = {};",
                self.member(&binding.property.name),
                binding.parameter.name
            ));
        }
        for module in plan.serializer_modules {
            w.write_line(format!("registerDefaultSerializer({module});"));
        }
        for module in plan.deserializer_modules {
            w.write_line(format!("registerDefaultDeserializer({module});"));
        }
        if plan.enable_backing_store {
            w.write_line(format!("{}.enableBackingStore();", self.member(&plan.http_core)));
        }
    }

    fn write_indexer(&self, w: &mut LanguageWriter, plan: &IndexerPlan) {
        w.write_line(format!(
            "return new {}({}, {});",
            plan.return_type,
            self.address(&plan.address),
            self.member(&plan.http_core)
        ));
    }
}

impl Backend for TypeScriptBackend {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn extension(&self) -> &'static str {
        "ts"
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
