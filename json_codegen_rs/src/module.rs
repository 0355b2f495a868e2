//! Class/module building: turns a schema into the ordered, fully resolved
//! list of classes a renderer prints.

use std::collections::HashSet;

use tracing::debug;

use crate::error::CodegenError;
use crate::plan::{AccessPlan, Read, plan_property};
use crate::resolve::{DefinitionId, Resolver};
use crate::schema::JsonSchema;

/// One field assignment in a constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub required: bool,
    pub plan: AccessPlan,
}

/// A class to be emitted. An empty `fields` list means an alias class with a
/// no-op body.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDef>,
}

/// Ordered classes for one generation run. Classes appear after the classes
/// they construct, except inside reference cycles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedModule {
    pub classes: Vec<ClassDef>,
}

impl ResolvedModule {
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ClassDef> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// True if any field reads its key without a null-safe fallback.
    #[must_use]
    pub fn has_required_reads(&self) -> bool {
        self.classes.iter().flat_map(|c| &c.fields).any(|f| {
            matches!(
                f.plan,
                AccessPlan::Value {
                    read: Read::Required,
                    ..
                }
            )
        })
    }
}

/// Normalize description: trim and treat empty/whitespace as None.
fn normalize_description(s: Option<&String>) -> Option<String> {
    s.as_ref().and_then(|t| {
        let trimmed: &str = t.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn build_class(resolver: &Resolver<'_>, id: DefinitionId) -> Result<ClassDef, CodegenError> {
    let definition: &JsonSchema = resolver.schema(id);
    let name: String = resolver.class_name(id)?;

    let mut fields: Vec<FieldDef> = Vec::new();
    // BTreeMap iteration: ascending lexical order of property name.
    for (key, property) in definition.properties.iter().flatten() {
        let required: bool = definition.is_required(key);
        let plan: AccessPlan = plan_property(resolver, id, key, property, required)?;
        fields.push(FieldDef {
            name: key.clone(),
            required,
            plan,
        });
    }

    debug!(class = %name, fields = fields.len(), "built class");
    Ok(ClassDef {
        name,
        description: normalize_description(definition.description.as_ref()),
        fields,
    })
}

/// Build the resolved module for `schema`: every definition, then the root
/// if it has a title.
///
/// # Errors
///
/// Fails on the first unresolved reference, unsupported construct, untitled
/// class, or duplicate class name. Nothing is returned on error.
pub fn build_module(schema: &JsonSchema) -> Result<ResolvedModule, CodegenError> {
    let resolver = Resolver::new(schema);
    let order: Vec<DefinitionId> = resolver.emission_order()?;

    let mut seen: HashSet<String> = HashSet::new();
    let mut classes: Vec<ClassDef> = Vec::with_capacity(order.len());
    for id in order {
        let class: ClassDef = build_class(&resolver, id)?;
        if !seen.insert(class.name.clone()) {
            return Err(CodegenError::DuplicateClass { name: class.name });
        }
        classes.push(class);
    }

    Ok(ResolvedModule { classes })
}
