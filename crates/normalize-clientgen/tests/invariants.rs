//! Properties every backend must uphold, checked across all languages.

mod common;

use common::{Sample, assert_braces_closed, position, request_method, serialization_method};
use normalize_clientgen::emit::{MethodContext, plan_deserializer, plan_serializer};
use normalize_clientgen::ir::{
    CodeTree, EnumId, Method, MethodKind, Parameter, ParameterKind, Property, PropertyKind, TypeRef,
};
use normalize_clientgen::{
    AccessorFamily, CodeWriter, EmitError, GenerationConfig, Language, Primitive, backend_for,
};

const KEYS: [&str; 4] = ["dummyColl", "dummyComplexColl", "dummyEnumCollection", "dummyProp"];

fn quoted(key: &str) -> String {
    format!("\"{key}\"")
}

#[test]
fn request_methods_need_an_http_method() {
    for language in Language::ALL {
        for kind in [MethodKind::RequestGenerator, MethodKind::RequestExecutor] {
            let mut sample = Sample::new();
            let mut method = request_method(kind);
            method.http_method = None;
            let index = sample.add_method(method);
            let err = sample.render(language, index).unwrap_err();
            assert!(
                matches!(err, EmitError::MissingHttpMethod { kind: k, .. } if k == kind),
                "{language}: {err}"
            );
        }
    }
}

#[test]
fn guards_run_in_name_order_before_the_body() {
    for language in Language::ALL {
        let mut sample = Sample::new();
        let index = sample.add_method(
            Method::new("methodName", MethodKind::Custom)
                .returning(TypeRef::new("Somecustomtype"))
                .with_parameter(Parameter::new("zeta", ParameterKind::Other, TypeRef::new("string")))
                .with_parameter(Parameter::new("alpha", ParameterKind::Other, TypeRef::new("Item")))
                .with_parameter(
                    Parameter::new("mid", ParameterKind::Other, TypeRef::new("string")).optional(),
                ),
        );
        let result = sample.render(language, index).unwrap();
        let body = &result[position(&result, "{\n") + 2..];
        assert!(
            position(body, "alpha") < position(body, "zeta"),
            "{language}:\n{result}"
        );
        assert!(!body.contains("mid"), "{language}: optional parameter guarded");
        assert!(position(body, "zeta") < position(body, "return "));
    }
}

#[test]
fn serializer_writes_each_property_once_in_order() {
    for language in Language::ALL {
        let mut sample = Sample::new();
        sample.add_serialization_properties();
        let index =
            sample.add_method(serialization_method(MethodKind::Serializer, "SerializationWriter"));
        let result = sample.render(language, index).unwrap();

        let mut last = 0;
        for key in KEYS {
            let key = quoted(key);
            assert_eq!(result.matches(&key).count(), 1, "{language}: {key}");
            let at = position(&result, &key);
            assert!(at > last, "{language}: {key} out of order");
            last = at;
        }
        let lower = result.to_lowercase();
        assert_eq!(lower.matches("writeadditionaldata(").count(), 1, "{language}");
        assert!(position(&lower, "writeadditionaldata(") > last, "{language}");
        assert!(!result.contains("\"additionalData\""), "{language}");
        assert_braces_closed(&result);
    }
}

#[test]
fn serializer_without_additional_data_writes_none() {
    for language in Language::ALL {
        let mut sample = Sample::new();
        sample.add_property(Property::custom("name", TypeRef::new("string")));
        let index =
            sample.add_method(serialization_method(MethodKind::Serializer, "SerializationWriter"));
        let result = sample.render(language, index).unwrap();
        assert!(!result.to_lowercase().contains("additionaldata"), "{language}");
    }
}

#[test]
fn deserializer_maps_each_property_once_in_order() {
    for language in Language::ALL {
        let mut sample = Sample::new();
        sample.add_serialization_properties();
        let index = sample.add_method(serialization_method(MethodKind::Deserializer, "Fields"));
        let result = sample.render(language, index).unwrap();
        let mut last = 0;
        for key in KEYS {
            let key = quoted(key);
            assert_eq!(result.matches(&key).count(), 1, "{language}: {key}");
            let at = position(&result, &key);
            assert!(at > last, "{language}: {key} out of order");
            last = at;
        }
        assert!(!result.contains("\"additionalData\""), "{language}");
        assert_braces_closed(&result);
    }
}

#[test]
fn reads_and_writes_share_accessor_families() {
    let mut sample = Sample::new();
    sample.add_serialization_properties();
    let index =
        sample.add_method(serialization_method(MethodKind::Serializer, "SerializationWriter"));
    let config = GenerationConfig::default();
    let class = sample.tree.class(sample.class).unwrap();
    let method = &class.methods[index];

    for language in Language::ALL {
        let backend = backend_for(language).unwrap();
        let ctx = MethodContext::new(&sample.tree, backend.conventions(), class, method, &config);
        let writes: Vec<(String, AccessorFamily)> = plan_serializer(&ctx)
            .unwrap()
            .writes
            .into_iter()
            .map(|w| (w.key, w.family))
            .collect();
        let reads: Vec<(String, AccessorFamily)> = plan_deserializer(&ctx)
            .unwrap()
            .entries
            .into_iter()
            .map(|e| (e.key, e.family))
            .collect();
        assert_eq!(writes, reads, "{language}");
        assert!(matches!(
            writes[3].1,
            AccessorFamily::Primitive(Primitive::String)
        ));
    }
}

#[test]
fn accessor_family_serializes_tagged() {
    insta::assert_json_snapshot!(AccessorFamily::CollectionOfObject("Complex".into()), @r#"
    {
      "family": "collection_of_object",
      "type": "Complex"
    }
    "#);
}

#[test]
fn inherited_serializer_calls_base_first() {
    for language in Language::ALL {
        let mut sample = Sample::new();
        sample.add_inheritance();
        sample.add_serialization_properties();
        let index =
            sample.add_method(serialization_method(MethodKind::Serializer, "SerializationWriter"));
        let result = sample.render(language, index).unwrap();
        let lower = result.to_lowercase();
        let base = position(&lower, "methodname(writer);");
        for key in KEYS {
            assert!(base < position(&result, &quoted(key)), "{language}");
        }
    }
}

#[test]
fn inherited_deserializer_merges_base_mapping() {
    for language in Language::ALL {
        let mut plain = Sample::new();
        plain.add_serialization_properties();
        let index = plain.add_method(serialization_method(MethodKind::Deserializer, "Fields"));
        let without = plain.render(language, index).unwrap().to_lowercase();
        assert_eq!(without.matches("methodname()").count(), 1, "{language}");

        plain.add_inheritance();
        let with = plain.render(language, index).unwrap().to_lowercase();
        assert_eq!(with.matches("methodname()").count(), 2, "{language}");
        let base = with.rfind("methodname()").unwrap();
        assert!(base < position(&with, "\"dummycoll\""), "{language}");
    }
}

#[test]
fn derived_deserializer_entry_wins_key_collision() {
    for language in Language::ALL {
        let mut sample = Sample::new();
        let root = sample.tree.root();
        let entity = sample.tree.add_class(root, "entity").unwrap();
        {
            let base = sample.tree.class_mut(entity).unwrap();
            base.add_property(Property::custom("id", TypeRef::new("string")))
                .unwrap();
            base.add_method(serialization_method(MethodKind::Deserializer, "Fields"));
        }
        sample
            .class_mut()
            .set_inherits(TypeRef::new("entity").with_class(entity));
        sample.add_property(
            Property::custom("identifier", TypeRef::new("string")).with_serialization_name("id"),
        );
        let index = sample.add_method(serialization_method(MethodKind::Deserializer, "Fields"));

        let config = GenerationConfig::for_language(language);
        let base = CodeWriter::new(&sample.tree, &config)
            .unwrap()
            .render_method(entity, 0)
            .unwrap();
        let base_entry = base.lines().find(|l| l.contains("\"id\"")).unwrap().to_lowercase();
        assert!(!base_entry.contains("identifier"), "{language}: {base_entry}");

        let derived = sample.render(language, index).unwrap();
        let lower = derived.to_lowercase();
        assert_eq!(derived.matches("\"id\"").count(), 1, "{language}:\n{derived}");
        let merge = lower.rfind("methodname()").unwrap();
        assert!(merge < position(&derived, "\"id\""), "{language}:\n{derived}");
        let entry = lower.lines().find(|l| l.contains("\"id\"")).unwrap();
        assert!(entry.contains("identifier"), "{language}: {entry}");
    }
}

#[test]
fn broken_type_links_fail_every_backend() {
    for language in Language::ALL {
        for (kind, parameter) in [
            (MethodKind::Serializer, "SerializationWriter"),
            (MethodKind::Deserializer, "Fields"),
        ] {
            let mut sample = Sample::new();
            sample.add_property(Property::custom(
                "ghost",
                TypeRef::new("Ghost").with_enum(EnumId(42)),
            ));
            let index = sample.add_method(serialization_method(kind, parameter));
            let err = sample.render(language, index).unwrap_err();
            assert!(
                matches!(err, EmitError::DanglingDefinition { ref type_name, .. } if type_name == "Ghost"),
                "{language}: {err}"
            );
            assert!(err.is_structural());

            let mut sample = Sample::new();
            let status = sample.add_enum("status", false, ["active"]);
            sample.add_property(Property::custom(
                "tags",
                TypeRef::new("status").array().with_enum(status),
            ));
            let index = sample.add_method(serialization_method(kind, parameter));
            let err = sample.render(language, index).unwrap_err();
            assert!(
                matches!(err, EmitError::InvalidCollectionLink { .. }),
                "{language}: {err}"
            );
        }
    }
}

fn client_tree() -> CodeTree {
    let mut tree = CodeTree::new();
    let root = tree.root();
    let models = tree.add_namespace(root, "models").unwrap();
    let status = tree.add_enum(models, "status").unwrap();
    {
        let status = tree.enum_mut(status).unwrap();
        status.add_member("active");
        status.add_member("disabled");
    }
    let user = tree.add_class(models, "user").unwrap();
    {
        let class = tree.class_mut(user).unwrap();
        class
            .add_property(Property::custom("displayName", TypeRef::new("string")))
            .unwrap();
        class
            .add_property(Property::custom("status", TypeRef::new("status").with_enum(status)))
            .unwrap();
        class.add_method(serialization_method(MethodKind::Serializer, "SerializationWriter"));
        class.add_method(serialization_method(MethodKind::Deserializer, "Fields"));
    }
    let users = tree.add_class(root, "usersRequestBuilder").unwrap();
    {
        let class = tree.class_mut(users).unwrap();
        for property in [
            Property::new("httpCore", PropertyKind::HttpCore, TypeRef::new("HttpCore")),
            Property::new("currentPath", PropertyKind::CurrentPath, TypeRef::new("string")),
            Property::new("pathSegment", PropertyKind::PathSegment, TypeRef::new("string"))
                .with_default("\"/users\""),
        ] {
            class.add_property(property).unwrap();
        }
        class.add_method(common::constructor(MethodKind::Constructor));
        class.add_method(
            request_method(MethodKind::RequestGenerator)
                .returning(TypeRef::new("RequestInformation")),
        );
        class.add_method(request_method(MethodKind::RequestExecutor).returning(
            TypeRef::new("user").with_class(user),
        ));
    }
    tree
}

#[test]
fn every_unit_is_balanced() {
    let tree = client_tree();
    for language in Language::ALL {
        let config = GenerationConfig::for_language(language);
        let units = CodeWriter::new(&tree, &config).unwrap().write_tree().unwrap();
        assert_eq!(units.len(), 3, "{language}");
        for unit in &units {
            assert_braces_closed(&unit.source);
        }
    }
}

#[test]
fn output_is_deterministic() {
    let tree = client_tree();
    for language in Language::ALL {
        let config = GenerationConfig::for_language(language);
        let writer = CodeWriter::new(&tree, &config).unwrap();
        let first = writer.write_tree().unwrap();
        let second = writer.write_tree().unwrap();
        assert_eq!(first, second, "{language}");

        let sequential: Vec<_> = tree
            .classes()
            .map(|(id, _)| writer.write_class(id).unwrap())
            .chain(tree.enums().map(|(id, _)| writer.write_enum(id).unwrap()))
            .collect();
        assert_eq!(first, sequential, "{language}");
    }
}

#[test]
fn json_round_trip_preserves_output() {
    let tree = client_tree();
    let restored = CodeTree::from_json(&tree.to_json().unwrap()).unwrap();
    for language in Language::ALL {
        let config = GenerationConfig::for_language(language);
        let before = CodeWriter::new(&tree, &config).unwrap().write_tree().unwrap();
        let after = CodeWriter::new(&restored, &config).unwrap().write_tree().unwrap();
        assert_eq!(before, after, "{language}");
    }
}

#[test]
fn executor_pairs_with_declared_generator() {
    let tree = client_tree();
    for language in Language::ALL {
        let config = GenerationConfig::for_language(language);
        let units = CodeWriter::new(&tree, &config).unwrap().write_tree().unwrap();
        let builder = units
            .iter()
            .find(|u| u.name == "UsersRequestBuilder")
            .unwrap();
        assert!(
            !builder.source.to_lowercase().contains("creategetrequestinfo"),
            "{language}: fell back despite a paired generator"
        );
    }
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clientgen.toml");
    std::fs::write(
        &path,
        "language = \"typescript\"\nuses_backing_store = true\nclient_namespace_name = \"graph\"\n",
    )
    .unwrap();
    let config = GenerationConfig::load(&path).unwrap();
    assert_eq!(config.language, Language::TypeScript);
    assert!(config.uses_backing_store);
    assert_eq!(config.client_namespace_name, "graph");
    assert_eq!(config.client_class_name, "ApiClient");

    let tree = client_tree();
    let units = CodeWriter::new(&tree, &config).unwrap().write_tree().unwrap();
    let user = units.iter().find(|u| u.name == "User").unwrap();
    assert_eq!(user.namespace, "graph.models");
    assert_eq!(user.relative_path(), std::path::Path::new("graph/models/User.ts"));
}
