//! Property access planning.
//!
//! For every property of a class, the planner derives how the constructor
//! pulls the value out of the untyped payload (the read) and how that value
//! is then shaped (left alone, or passed through another class's
//! constructor). Plans name classes by title only, so they outlive the schema
//! they were planned from.

use serde_json::Value;
use tracing::trace;

use crate::error::CodegenError;
use crate::resolve::{DefinitionId, Resolver};
use crate::schema::{Items, JsonSchema};

/// The property type tags the generator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl PropertyType {
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let property_type = match tag {
            "string" => Self::String,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "array" => Self::Array,
            "object" => Self::Object,
            _ => return None,
        };
        Some(property_type)
    }

    /// Whether `default` has the shape this type requires. `null` fits every type.
    #[must_use]
    pub fn accepts_default(self, default: &Value) -> bool {
        if default.is_null() {
            return true;
        }
        match self {
            Self::String => default.is_string(),
            Self::Integer => default.is_i64() || default.is_u64(),
            Self::Number => default.is_number(),
            Self::Boolean => default.is_boolean(),
            Self::Array => default.is_array(),
            Self::Object => default.is_object(),
        }
    }
}

/// How the raw value is read from the payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Read {
    /// Direct lookup; a missing key is an error in the generated code.
    Required,
    /// Null-safe lookup; a missing key reads as null.
    Optional,
    /// Null-safe lookup, with null (missing or explicit) replaced by the literal.
    Defaulted(Value),
}

/// What happens to the value after it is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Unchanged,
    /// Every element of the sequence is passed to the named class's constructor.
    ConstructEach(String),
    /// Null stays null; anything else is passed to the named class's constructor.
    ConstructUnlessNull(String),
}

/// Resolved rule for populating one field.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessPlan {
    /// `additionalProperties` container: read null-safely, defaulting to an
    /// empty container; keys are kept and each value goes through the named
    /// class's constructor, or is kept as-is when the target is an alias.
    UniformMap {
        key: String,
        value_class: Option<String>,
    },
    Value {
        key: String,
        value_type: PropertyType,
        read: Read,
        shape: Shape,
    },
}

impl AccessPlan {
    /// Payload key the plan reads.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::UniformMap { key, .. } | Self::Value { key, .. } => key,
        }
    }

    /// Name of the class the plan constructs, if any.
    #[must_use]
    pub fn constructed_class(&self) -> Option<&str> {
        match self {
            Self::UniformMap { value_class, .. } => value_class.as_deref(),
            Self::Value { shape, .. } => match shape {
                Shape::Unchanged => None,
                Shape::ConstructEach(class) | Shape::ConstructUnlessNull(class) => Some(class),
            },
        }
    }
}

/// Plans one property of `owner`.
///
/// # Errors
///
/// Returns `CodegenError::UnsupportedSchema` for tuple `items`, scalar
/// `additionalProperties`, a missing or unknown type tag, or a default that
/// does not fit the type; `CodegenError::UnresolvedReference` for an unknown
/// `$ref`; `CodegenError::MissingTitle` when a referenced class has no title.
pub fn plan_property(
    resolver: &Resolver<'_>,
    owner: DefinitionId,
    key: &str,
    property: &JsonSchema,
    required: bool,
) -> Result<AccessPlan, CodegenError> {
    let owner_name: String = resolver.display_name(owner);
    let unsupported = |reason: String| CodegenError::UnsupportedSchema {
        definition: owner_name.clone(),
        property: key.to_string(),
        reason,
    };

    // additionalProperties wins over default/required and over the type tag.
    if let Some(value_schema) = property.additional_properties_schema() {
        let Some(reference) = value_schema.reference.as_deref() else {
            return Err(unsupported(
                "scalar values for additionalProperties are not supported".to_string(),
            ));
        };
        let value_class: Option<String> =
            constructed_class(resolver, reference, &owner_name, key)?;
        trace!(definition = %owner_name, property = key, ?value_class, "planned uniform map");
        return Ok(AccessPlan::UniformMap {
            key: key.to_string(),
            value_class,
        });
    }

    let tag: &str = match property.r#type.as_ref() {
        None => return Err(unsupported("missing \"type\"".to_string())),
        Some(Value::String(tag)) => tag.as_str(),
        Some(other) => {
            return Err(unsupported(format!(
                "\"type\" must be a single type name, got {other}"
            )));
        }
    };
    let value_type: PropertyType = PropertyType::from_tag(tag)
        .ok_or_else(|| unsupported(format!("type {tag:?} is not supported")))?;

    let read: Read = if let Some(default) = property.default.value() {
        if !value_type.accepts_default(default) {
            return Err(unsupported(format!(
                "default {default} does not match type {tag:?}"
            )));
        }
        Read::Defaulted(default.clone())
    } else if required {
        Read::Required
    } else {
        Read::Optional
    };

    let shape: Shape = match value_type {
        PropertyType::Array => match property.items.as_ref() {
            Some(Items::Tuple(_)) => {
                return Err(unsupported(
                    "tuple items for type \"array\" are not supported".to_string(),
                ));
            }
            Some(Items::Single(items)) => match items.one_of_ref() {
                Some(reference) => constructed_class(resolver, reference, &owner_name, key)?
                    .map_or(Shape::Unchanged, Shape::ConstructEach),
                None => Shape::Unchanged,
            },
            Some(Items::Bool(_)) | None => Shape::Unchanged,
        },
        PropertyType::Object => match property.one_of_ref() {
            Some(reference) => constructed_class(resolver, reference, &owner_name, key)?
                .map_or(Shape::Unchanged, Shape::ConstructUnlessNull),
            None => Shape::Unchanged,
        },
        PropertyType::String
        | PropertyType::Integer
        | PropertyType::Number
        | PropertyType::Boolean => Shape::Unchanged,
    };

    trace!(definition = %owner_name, property = key, ?read, ?shape, "planned property");
    Ok(AccessPlan::Value {
        key: key.to_string(),
        value_type,
        read,
        shape,
    })
}

/// Class to construct for `reference`, or `None` when it is a primitive alias.
fn constructed_class(
    resolver: &Resolver<'_>,
    reference: &str,
    owner_name: &str,
    key: &str,
) -> Result<Option<String>, CodegenError> {
    let target: DefinitionId = resolver.resolve(reference, owner_name, key)?;
    if resolver.is_primitive_alias(target) {
        return Ok(None);
    }
    Ok(Some(resolver.class_name(target)?))
}
