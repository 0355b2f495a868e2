//! Definition resolution: `$ref` lookup, primitive-alias classification, and
//! class emission order.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::error::CodegenError;
use crate::json_pointer;
use crate::naming::class_identifier;
use crate::schema::{Items, JsonSchema};

/// Index of a definition in the resolver's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefinitionId(usize);

impl DefinitionId {
    /// The root document, addressable as `#`.
    pub const ROOT: Self = Self(0);
}

struct Entry<'a> {
    reference: String,
    schema: &'a JsonSchema,
    is_alias: bool,
}

/// Flat table of every definition in a schema, keyed by `$ref` string.
///
/// Definitions refer to each other only through [`DefinitionId`]s, so cyclic
/// schemas need no cyclic ownership. Alias classification is computed once
/// here and reused by every lookup.
pub struct Resolver<'a> {
    entries: Vec<Entry<'a>>,
    index: HashMap<String, DefinitionId>,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(root: &'a JsonSchema) -> Self {
        let mut entries: Vec<Entry<'a>> = vec![Entry {
            reference: json_pointer::ROOT.to_string(),
            schema: root,
            is_alias: !root.has_properties(),
        }];

        let blocks = [
            ("definitions", root.definitions.as_ref()),
            ("$defs", root.defs.as_ref()),
        ];
        for (block, definitions) in blocks {
            for (name, schema) in definitions.into_iter().flatten() {
                let is_alias: bool = !schema.has_properties();
                let reference: String = json_pointer::definition_ref(block, name);
                trace!(%reference, is_alias, "registered definition");
                entries.push(Entry {
                    reference,
                    schema,
                    is_alias,
                });
            }
        }

        let index: HashMap<String, DefinitionId> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.reference.clone(), DefinitionId(i)))
            .collect();

        debug!(
            definitions = entries.len() - 1,
            aliases = entries.iter().filter(|e| e.is_alias).count(),
            "resolved definition table"
        );

        Self { entries, index }
    }

    /// Look up `reference`. `definition` and `property` name the place the
    /// reference was found and only feed the error message.
    ///
    /// # Errors
    ///
    /// Returns `CodegenError::UnresolvedReference` if nothing is registered
    /// under `reference`.
    pub fn resolve(
        &self,
        reference: &str,
        definition: &str,
        property: &str,
    ) -> Result<DefinitionId, CodegenError> {
        self.index
            .get(reference)
            .copied()
            .ok_or_else(|| CodegenError::UnresolvedReference {
                reference: reference.to_string(),
                definition: definition.to_string(),
                property: property.to_string(),
            })
    }

    #[must_use]
    pub fn schema(&self, id: DefinitionId) -> &'a JsonSchema {
        self.entries[id.0].schema
    }

    #[must_use]
    pub fn reference(&self, id: DefinitionId) -> &str {
        &self.entries[id.0].reference
    }

    #[must_use]
    pub fn is_primitive_alias(&self, id: DefinitionId) -> bool {
        self.entries[id.0].is_alias
    }

    /// Every entry of the definition blocks, in encounter order. Excludes the root.
    pub fn definitions(&self) -> impl Iterator<Item = DefinitionId> + '_ {
        (1..self.entries.len()).map(DefinitionId)
    }

    /// Class name of a definition: its `title`, normalized to an identifier.
    ///
    /// # Errors
    ///
    /// Returns `CodegenError::MissingTitle` if the title is absent or blank.
    pub fn class_name(&self, id: DefinitionId) -> Result<String, CodegenError> {
        self.schema(id)
            .class_title()
            .map(class_identifier)
            .ok_or_else(|| CodegenError::MissingTitle {
                reference: self.reference(id).to_string(),
            })
    }

    /// Human-readable name for error messages: the title if there is one,
    /// otherwise the definition's key.
    #[must_use]
    pub fn display_name(&self, id: DefinitionId) -> String {
        if let Some(title) = self.schema(id).class_title() {
            return title.to_string();
        }
        json_pointer::last_segment(self.reference(id)).unwrap_or_else(|| "root".to_string())
    }

    /// Classes the properties of `id` construct, in property order.
    /// Aliases and the root are left out.
    fn dependencies(&self, id: DefinitionId) -> Result<Vec<DefinitionId>, CodegenError> {
        let mut deps: Vec<DefinitionId> = Vec::new();
        let Some(properties) = self.schema(id).properties.as_ref() else {
            return Ok(deps);
        };
        for (key, property) in properties {
            let Some(reference) = constructed_ref(property) else {
                continue;
            };
            let dep: DefinitionId = self.resolve(reference, &self.display_name(id), key)?;
            if dep != DefinitionId::ROOT && !self.is_primitive_alias(dep) {
                deps.push(dep);
            }
        }
        Ok(deps)
    }

    /// Order in which definitions are emitted as classes.
    ///
    /// Definitions are visited in encounter order and each one is placed after
    /// the classes it constructs. Members of a reference cycle are placed in
    /// the order the walk first finishes them. The root comes last, and only
    /// when it has a title.
    ///
    /// # Errors
    ///
    /// Returns `CodegenError::UnresolvedReference` if a property references an
    /// unknown definition.
    pub fn emission_order(&self) -> Result<Vec<DefinitionId>, CodegenError> {
        fn visit(
            resolver: &Resolver<'_>,
            id: DefinitionId,
            order: &mut Vec<DefinitionId>,
            visited: &mut HashSet<DefinitionId>,
        ) -> Result<(), CodegenError> {
            if !visited.insert(id) {
                return Ok(());
            }
            for dep in resolver.dependencies(id)? {
                visit(resolver, dep, order, visited)?;
            }
            order.push(id);
            Ok(())
        }

        let mut order: Vec<DefinitionId> = Vec::with_capacity(self.entries.len());
        let mut visited: HashSet<DefinitionId> = HashSet::from([DefinitionId::ROOT]);

        for id in self.definitions() {
            visit(self, id, &mut order, &mut visited)?;
        }

        if self.schema(DefinitionId::ROOT).class_title().is_some() {
            order.push(DefinitionId::ROOT);
        }

        Ok(order)
    }
}

/// The `$ref` whose class a property's value may be constructed from,
/// following the same precedence the planner uses.
fn constructed_ref(property: &JsonSchema) -> Option<&str> {
    if let Some(value_schema) = property.additional_properties_schema() {
        return value_schema.reference.as_deref();
    }
    match property.r#type.as_ref().and_then(serde_json::Value::as_str)? {
        "object" => property.one_of_ref(),
        "array" => match property.items.as_ref()? {
            Items::Single(items) => items.one_of_ref(),
            Items::Tuple(_) | Items::Bool(_) => None,
        },
        _ => None,
    }
}
