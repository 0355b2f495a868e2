//! Flow type annotations for class fields.

use super::class_name;
use crate::plan::{AccessPlan, PropertyType, Read, Shape};

fn base_type(value_type: PropertyType, shape: &Shape, prefix: &str) -> String {
    match (value_type, shape) {
        (PropertyType::Array, Shape::ConstructEach(class)) => {
            format!("Array<{}>", class_name(prefix, class))
        }
        (_, Shape::ConstructUnlessNull(class)) => class_name(prefix, class),
        (PropertyType::String, _) => "string".to_string(),
        (PropertyType::Integer | PropertyType::Number, _) => "number".to_string(),
        (PropertyType::Boolean, _) => "boolean".to_string(),
        (PropertyType::Array, _) => "Array<mixed>".to_string(),
        (PropertyType::Object, _) => "Object".to_string(),
    }
}

/// Annotation for the field a plan populates. Fields that can hold null are
/// maybe types.
pub(super) fn field_type(plan: &AccessPlan, prefix: &str) -> String {
    match plan {
        AccessPlan::UniformMap {
            value_class: Some(class),
            ..
        } => format!("{{ [string]: {} }}", class_name(prefix, class)),
        AccessPlan::UniformMap {
            value_class: None, ..
        } => "{ [string]: mixed }".to_string(),
        AccessPlan::Value {
            value_type,
            read,
            shape,
            ..
        } => {
            let base: String = base_type(*value_type, shape, prefix);
            let nullable: bool = match read {
                Read::Optional => true,
                Read::Defaulted(default) => default.is_null(),
                Read::Required => matches!(shape, Shape::ConstructUnlessNull(_)),
            };
            if nullable { format!("?{base}") } else { base }
        }
    }
}
