//! Schema loading.
//!
//! Only the keywords the generator reads are modeled; anything else in the
//! document is ignored via serde's default behavior.

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::CodegenError;

/// Wraps the JSON Schema `default` keyword to preserve `null`.
/// Serde deserializes `Option<Value>` with JSON null as `None`; we need to
/// distinguish absent key from `"default": null`.
#[derive(Debug, Default)]
pub enum DefaultKeyword {
    /// Key "default" was absent from the schema.
    #[default]
    Absent,
    /// Key "default" was present; the value may be `Value::Null`.
    Present(serde_json::Value),
}

impl DefaultKeyword {
    #[must_use]
    pub const fn value(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Absent => None,
            Self::Present(v) => Some(v),
        }
    }
}

impl<'de> Deserialize<'de> for DefaultKeyword {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v: serde_json::Value = Deserialize::deserialize(deserializer)?;
        Ok(DefaultKeyword::Present(v))
    }
}

/// The `items` keyword: one descriptor for every element, or a tuple list.
/// The boolean form constrains nothing the generator shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Items {
    Bool(bool),
    Tuple(Vec<JsonSchema>),
    Single(Box<JsonSchema>),
}

/// The `additionalProperties` keyword. Only the schema form describes a
/// uniform key/value container; the boolean form is ignored.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<JsonSchema>),
}

/// Root document, definition, or property descriptor.
///
/// Uses `BTreeMap` for properties so iteration is always in ascending
/// lexical order of property name, and `IndexMap` for definitions so their
/// encounter order survives loading.
#[derive(Debug, Default, Deserialize)]
pub struct JsonSchema {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Kept raw so a type list can be reported against its property.
    #[serde(default)]
    pub r#type: Option<serde_json::Value>,

    #[serde(default)]
    pub properties: Option<BTreeMap<String, JsonSchema>>,

    /// Names from the definition-level array form. The draft-3 per-property
    /// boolean form, and any other shape, reads as absent.
    #[serde(default, deserialize_with = "required_names")]
    pub required: Option<Vec<String>>,

    #[serde(default)]
    pub items: Option<Items>,

    #[serde(default, rename = "additionalProperties")]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(default, rename = "oneOf")]
    pub one_of: Option<Vec<JsonSchema>>,

    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,

    #[serde(default)]
    pub default: DefaultKeyword,

    #[serde(default)]
    pub definitions: Option<IndexMap<String, JsonSchema>>,

    #[serde(default, rename = "$defs")]
    pub defs: Option<IndexMap<String, JsonSchema>>,
}

fn required_names<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v: serde_json::Value = Deserialize::deserialize(deserializer)?;
    let serde_json::Value::Array(names) = v else {
        return Ok(None);
    };
    Ok(Some(
        names
            .into_iter()
            .filter_map(|name| match name {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
    ))
}

impl JsonSchema {
    /// A schema with no (or empty) `properties` is a primitive alias.
    #[must_use]
    pub fn has_properties(&self) -> bool {
        self.properties.as_ref().is_some_and(|p| !p.is_empty())
    }

    #[must_use]
    pub fn is_required(&self, key: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|r| r.iter().any(|name| name == key))
    }

    /// The `$ref` carried by the first `oneOf` entry, if any. This is the only
    /// form of `oneOf` the generator understands: "an instance of the
    /// referenced class, or null".
    #[must_use]
    pub fn one_of_ref(&self) -> Option<&str> {
        self.one_of
            .as_ref()
            .and_then(|variants| variants.first())
            .and_then(|first| first.reference.as_deref())
    }

    /// The uniform-map value descriptor, when `additionalProperties` is a schema.
    #[must_use]
    pub fn additional_properties_schema(&self) -> Option<&JsonSchema> {
        match self.additional_properties.as_ref()? {
            AdditionalProperties::Schema(schema) => Some(schema),
            AdditionalProperties::Bool(_) => None,
        }
    }

    /// Non-empty, trimmed title.
    #[must_use]
    pub fn class_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Parse schema text into a [`JsonSchema`].
///
/// # Errors
///
/// Returns `CodegenError::JsonError` if the text is not valid JSON or does not
/// fit the schema model, and `CodegenError::InvalidSchema` if the root is not
/// a JSON object.
pub fn load_schema(schema_json: &str) -> Result<JsonSchema, CodegenError> {
    let value: serde_json::Value = serde_json::from_str(schema_json)?;
    if !value.is_object() {
        return Err(CodegenError::InvalidSchema(
            "root must be a JSON object".to_string(),
        ));
    }
    // Parsed again from text so model errors keep their line and column.
    Ok(serde_json::from_str(schema_json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_keep_encounter_order() {
        let schema: JsonSchema = load_schema(
            r#"{
                "definitions": {
                    "Zebra": { "title": "Zebra" },
                    "Apple": { "title": "Apple" },
                    "Mango": { "title": "Mango" }
                }
            }"#,
        )
        .expect("valid schema");
        let actual: Vec<&str> = schema
            .definitions
            .as_ref()
            .expect("definitions")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(vec!["Zebra", "Apple", "Mango"], actual);
    }

    #[test]
    fn properties_iterate_in_lexical_order() {
        let schema: JsonSchema = load_schema(
            r#"{ "properties": { "b": { "type": "string" }, "C": { "type": "string" }, "a": { "type": "string" } } }"#,
        )
        .expect("valid schema");
        let actual: Vec<&str> = schema
            .properties
            .as_ref()
            .expect("properties")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(vec!["C", "a", "b"], actual);
    }

    #[test]
    fn default_distinguishes_absent_from_null() {
        let schema: JsonSchema = load_schema(
            r#"{ "properties": { "a": { "type": "string", "default": null }, "b": { "type": "string" } } }"#,
        )
        .expect("valid schema");
        let props = schema.properties.as_ref().expect("properties");
        assert!(matches!(
            props["a"].default,
            DefaultKeyword::Present(serde_json::Value::Null)
        ));
        assert!(matches!(props["b"].default, DefaultKeyword::Absent));
    }

    #[test]
    fn items_may_be_tuple_or_single() {
        let schema: JsonSchema = load_schema(
            r#"{ "properties": {
                "pair": { "type": "array", "items": [{ "type": "string" }, { "type": "integer" }] },
                "tags": { "type": "array", "items": { "type": "string" } }
            } }"#,
        )
        .expect("valid schema");
        let props = schema.properties.as_ref().expect("properties");
        assert!(matches!(props["pair"].items, Some(Items::Tuple(ref t)) if t.len() == 2));
        assert!(matches!(props["tags"].items, Some(Items::Single(_))));
    }

    #[test]
    fn boolean_items_are_accepted() {
        let schema: JsonSchema = load_schema(
            r#"{ "properties": { "any": { "type": "array", "items": true } } }"#,
        )
        .expect("valid schema");
        let props = schema.properties.as_ref().expect("properties");
        assert!(matches!(props["any"].items, Some(Items::Bool(true))));
    }

    #[test]
    fn property_level_required_boolean_is_ignored() {
        let schema: JsonSchema = load_schema(
            r#"{ "title": "T", "properties": { "x": { "type": "string", "required": true } } }"#,
        )
        .expect("valid schema");
        let props = schema.properties.as_ref().expect("properties");
        assert!(props["x"].required.is_none());
        assert!(!schema.is_required("x"));
    }

    #[test]
    fn required_keeps_only_string_names() {
        let schema: JsonSchema = load_schema(r#"{ "required": ["a", 3, "b"] }"#).expect("valid schema");
        assert_eq!(
            Some(vec!["a".to_string(), "b".to_string()]),
            schema.required
        );
    }

    #[test]
    fn model_errors_report_their_position() {
        let err: CodegenError = load_schema("{\n  \"title\": 5\n}").expect_err("title must be a string");
        match err {
            CodegenError::JsonError(json_error) => assert_eq!(2, json_error.line()),
            other => panic!("expected a JSON error, got {other:?}"),
        }
    }

    #[test]
    fn boolean_additional_properties_is_not_a_map_descriptor() {
        let schema: JsonSchema =
            load_schema(r#"{ "type": "object", "additionalProperties": false }"#)
                .expect("valid schema");
        assert!(schema.additional_properties_schema().is_none());
    }

    #[test]
    fn one_of_ref_reads_first_entry_only() {
        let schema: JsonSchema = load_schema(
            r##"{ "type": "object", "oneOf": [{ "$ref": "#/definitions/A" }, { "$ref": "#/definitions/B" }] }"##,
        )
        .expect("valid schema");
        assert_eq!(Some("#/definitions/A"), schema.one_of_ref());
    }

    #[test]
    fn primitive_alias_has_no_properties() {
        let empty: JsonSchema =
            load_schema(r#"{ "title": "Id", "type": "string", "properties": {} }"#)
                .expect("valid schema");
        assert!(!empty.has_properties());
        let absent: JsonSchema = load_schema(r#"{ "title": "Id" }"#).expect("valid schema");
        assert!(!absent.has_properties());
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err: CodegenError = load_schema("[1, 2]").expect_err("array root");
        assert!(matches!(err, CodegenError::InvalidSchema(_)), "{err:?}");
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err: CodegenError = load_schema("{ \"title\": ").expect_err("truncated");
        assert!(matches!(err, CodegenError::JsonError(_)), "{err:?}");
    }
}
