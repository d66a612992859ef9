//! Definition File Integration Tests
//!
//! Loading registries and backup lists from JSON files, exporting the stock
//! definitions, and the errors a bad file produces.

mod common;

use common::DefinitionDir;
use setguard::{
    builtin, check_completeness, load_definition, DefinitionFormat, Error, JsonFormat, Namespace,
    NamespaceDefinition, RestorePipeline, Validator,
};

const SECURE_JSON: &str = r#"{
    "namespace": "secure",
    "backup": ["accessibility_enabled", "enabled_accessibility_services"],
    "legacy": ["enabled_notification_listeners"],
    "validators": [
        { "key": "accessibility_enabled", "validator": { "type": "boolean" } },
        { "key": "enabled_accessibility_services", "validator": { "type": "component_name_list", "separator": ":" } },
        { "key": "enabled_notification_listeners", "validator": { "type": "component_name_list", "separator": ":" } },
        { "key": "default_input_method", "validator": { "type": "nullable_component_name" } }
    ]
}"#;

#[test]
fn test_load_and_restore_from_json_file() {
    common::init_logging();
    let dir = DefinitionDir::new();
    let path = dir.write("secure.json", SECURE_JSON);

    let (registry, keys) = load_definition(&path).unwrap().into_parts().unwrap();
    assert_eq!(registry.namespace(), Namespace::Secure);
    assert!(check_completeness(&keys, &registry).unwrap().is_complete());

    let outcome = RestorePipeline::new(&registry).run([
        ("accessibility_enabled", "1"),
        (
            "enabled_accessibility_services",
            "com.example.reader/.ReaderService:com.example.zoom/com.example.zoom.ZoomService",
        ),
        ("enabled_notification_listeners", "not a component"),
    ]);
    assert_eq!(outcome.accepted.len(), 2);
    assert_eq!(outcome.diagnostics[0].key, "enabled_notification_listeners");
}

#[test]
fn test_stock_definitions_survive_export() {
    let dir = DefinitionDir::new();
    let format = JsonFormat::new();

    for namespace in Namespace::ALL {
        let registry = builtin::registry(namespace).unwrap();
        let keys = builtin::backup_keys(namespace);
        let text = format
            .serialize(&NamespaceDefinition::from_parts(&registry, &keys).unwrap())
            .unwrap();
        let path = dir.write(&format!("{namespace}.{}", format.extension()), &text);

        let (loaded, loaded_keys) = load_definition(&path).unwrap().into_parts().unwrap();
        assert_eq!(loaded, registry);
        assert_eq!(loaded_keys, keys);
    }
}

#[test]
fn test_definition_with_gap_fails_completeness() {
    let dir = DefinitionDir::new();
    let path = dir.write(
        "global.json",
        r#"{"namespace": "global", "backup": ["auto_time", "auto_time_zone"],
            "validators": [{"key": "auto_time", "validator": {"type": "boolean"}}]}"#,
    );

    let definition = load_definition(&path).unwrap();
    let report =
        check_completeness(&definition.backup_keys(), &definition.registry().unwrap()).unwrap();

    assert_eq!(report.offenders, vec!["auto_time_zone"]);
}

// =============================================================================
// Bad Files
// =============================================================================

#[test]
fn test_ill_formed_rule_rejected_at_build() {
    let dir = DefinitionDir::new();
    let path = dir.write(
        "system.json",
        r#"{"namespace": "system", "validators": [
            {"key": "vol", "validator": {"type": "inclusive_integer_range", "min": 10, "max": 0}}
        ]}"#,
    );

    let err = load_definition(&path).unwrap().registry().unwrap_err();
    assert!(err.is_construction_error());
    assert!(matches!(err, Error::InvalidValidatorDefinition { ref key, .. } if key == "vol"));
}

#[test]
fn test_corrupted_file() {
    let dir = DefinitionDir::new();
    let path = dir.write("system.json", "{ \"namespace\": \"system\", ");

    let err = load_definition(&path).unwrap_err();
    assert!(err.is_load_error());
}

#[test]
fn test_unknown_namespace() {
    let dir = DefinitionDir::new();
    let path = dir.write("vendor.json", r#"{"namespace": "vendor"}"#);

    assert!(load_definition(&path).unwrap_err().is_load_error());
}

#[test]
fn test_minimal_definition_defaults_to_empty() {
    let dir = DefinitionDir::new();
    let path = dir.write("global.json", r#"{"namespace": "global"}"#);

    let (registry, keys) = load_definition(&path).unwrap().into_parts().unwrap();
    assert!(registry.is_empty());
    assert!(keys.is_empty());
    assert_eq!(registry.validate("auto_time", "1"), None);
}

#[test]
fn test_separator_must_be_single_char() {
    let result: setguard::Result<Validator> =
        JsonFormat::new().deserialize(r#"{"type": "package_name_list", "separator": "::"}"#);

    assert!(result.is_err());
}
