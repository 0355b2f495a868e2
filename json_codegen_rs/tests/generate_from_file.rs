//! File-level generation through the public API.

use std::fs;
use std::path::PathBuf;

use json_codegen_rs::{
    AccessPlan, CodegenError, GenerateSettings, Language, Read, ResolvedModule, Shape,
    build_module, generate_from_file, load_schema,
};

const SCHEMA_JSON: &str = r##"{
    "title": "Inventory",
    "definitions": {
        "Item": {
            "title": "Item",
            "required": ["name"],
            "properties": {
                "name": { "type": "string" },
                "count": { "type": "integer", "default": 5 }
            }
        }
    },
    "properties": {
        "items": {
            "type": "array",
            "items": { "oneOf": [{ "$ref": "#/definitions/Item" }] }
        },
        "owner": { "type": "string" }
    }
}"##;

fn write_schema(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path: PathBuf = dir.path().join("schema.json");
    fs::write(&path, contents).expect("write schema");
    path
}

#[test]
fn writes_generated_code_to_output_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input: PathBuf = write_schema(&dir, SCHEMA_JSON);
    let output: PathBuf = dir.path().join("models.py");

    generate_from_file(&input, &output, &GenerateSettings::default()).expect("generate");

    let code: String = fs::read_to_string(&output).expect("read output");
    assert!(code.contains("class Item(object):"), "{code}");
    assert!(
        code.contains("self.items = [Item(v) for v in data.get('items')]"),
        "{code}"
    );
    assert!(
        code.contains("self.count = 5 if data.get('count') is None else data.get('count')"),
        "{code}"
    );
    assert!(code.ends_with('\n') && !code.ends_with("\n\n"), "{code:?}");
}

#[test]
fn prefix_applies_to_every_class_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input: PathBuf = write_schema(&dir, SCHEMA_JSON);
    let output: PathBuf = dir.path().join("models.js");
    let settings = GenerateSettings::new(Language::JavaScript).with_prefix("Gen");

    generate_from_file(&input, &output, &settings).expect("generate");

    let code: String = fs::read_to_string(&output).expect("read output");
    assert!(code.contains("export class GenItem {"), "{code}");
    assert!(code.contains("export class GenInventory {"), "{code}");
    assert!(code.contains("new GenItem(v)"), "{code}");
    assert!(!code.contains("new Item("), "{code}");
}

#[test]
fn failed_generation_creates_no_output_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input: PathBuf = write_schema(
        &dir,
        r#"{ "title": "Bad", "properties": { "pair": { "type": "array", "items": [{ "type": "string" }] } } }"#,
    );
    let output: PathBuf = dir.path().join("models.py");

    let err: CodegenError =
        generate_from_file(&input, &output, &GenerateSettings::default()).expect_err("unsupported");

    assert!(
        matches!(&err, CodegenError::UnsupportedSchema { definition, property, .. } if definition == "Bad" && property == "pair"),
        "{err:?}"
    );
    assert!(!output.exists(), "no output file on error");
}

#[test]
fn missing_input_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err: CodegenError = generate_from_file(
        dir.path().join("absent.json"),
        dir.path().join("out.py"),
        &GenerateSettings::default(),
    )
    .expect_err("missing input");
    assert!(matches!(err, CodegenError::IoError(_)), "{err:?}");
}

#[test]
fn resolved_module_is_language_agnostic() {
    let schema = load_schema(SCHEMA_JSON).expect("valid schema");
    let module: ResolvedModule = build_module(&schema).expect("built");

    let names: Vec<&str> = module.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(vec!["Item", "Inventory"], names);

    let inventory = module.class("Inventory").expect("root class");
    let items: &AccessPlan = &inventory.fields[0].plan;
    assert_eq!("items", items.key());
    assert!(matches!(
        items,
        AccessPlan::Value { read: Read::Optional, shape: Shape::ConstructEach(class), .. } if class == "Item"
    ));
}

#[test]
fn explicit_null_payload_keys_fall_back_to_defaults_in_every_language() {
    for language in Language::ALL {
        let code: String =
            json_codegen_rs::generate(SCHEMA_JSON, &GenerateSettings::new(language))
                .expect("generate");
        let defaulted: bool = match language {
            Language::Python2 => code.contains("5 if data.get('count') is None"),
            Language::JavaScript | Language::Flow => code.contains("data[\"count\"] ?? 5"),
        };
        assert!(defaulted, "{language}: {code}");
    }
}
