//! Resolved, collision-checked view of a schema, ready for emission.
//!
//! Planning does every decision the emitters need: entity and member names,
//! key and index shapes, relationship cardinality and both navigation names of
//! every edge. Emitters only format a [`SchemaPlan`]; they never look names up
//! on their own, so an entity member and the mapping that wires it always agree.

use crate::classify::{Cardinality, Classification, Endpoint};
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::model::{ColumnModel, DatabaseModel, RelationshipModel, TableModel, TargetDescriptor};
use crate::naming::{Inflector, entity_name, humanize};
use crate::navigation::NavigationNamer;
use crate::types::{ResolvedType, resolve_type};
use std::collections::HashMap;

/// Planned output for one schema model.
#[derive(Debug, Clone)]
pub struct SchemaPlan<'m> {
    pub model: &'m DatabaseModel,
    /// One entry per table, in declaration order
    pub entities: Vec<EntityPlan<'m>>,
}

impl<'m> SchemaPlan<'m> {
    /// Entities whose table has no primary key.
    pub fn keyless_entities(&self) -> impl Iterator<Item = &EntityPlan<'m>> {
        self.entities.iter().filter(|e| e.key.is_none())
    }

    pub fn entity(&self, name: &str) -> Option<&EntityPlan<'m>> {
        self.entities.iter().find(|e| e.name == name)
    }
}

/// Planned output for one table.
#[derive(Debug, Clone)]
pub struct EntityPlan<'m> {
    pub table: &'m TableModel,
    /// Entity class name
    pub name: String,
    /// Context `DbSet` property name
    pub set_name: String,
    pub key: Option<KeyPlan>,
    /// One per column, in declaration order
    pub properties: Vec<PropertyPlan<'m>>,
    /// Non-key indexes
    pub indexes: Vec<IndexPlan>,
    /// One per relationship endpoint on this table, in relationship order
    pub navigations: Vec<NavigationPlan>,
}

impl EntityPlan<'_> {
    pub fn has_composite_key(&self) -> bool {
        self.key.as_ref().is_some_and(|k| k.properties.len() > 1)
    }

    /// Collection navigations, which the constructor initializes.
    pub fn collections(&self) -> impl Iterator<Item = &NavigationPlan> {
        self.navigations.iter().filter(|n| n.is_collection())
    }

    /// Navigations on the owning (referencing) side, which the mapping wires.
    pub fn owned_navigations(&self) -> impl Iterator<Item = &NavigationPlan> {
        self.navigations
            .iter()
            .filter(|n| n.endpoint == Endpoint::Left)
    }

    pub fn property(&self, column: &str) -> Option<&PropertyPlan<'_>> {
        self.properties.iter().find(|p| p.column.name == column)
    }
}

/// Resolved primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPlan {
    /// Property names in key order
    pub properties: Vec<String>,
    /// Explicit index name, else `PK_<table>`
    pub name: String,
}

/// One scalar member.
#[derive(Debug, Clone)]
pub struct PropertyPlan<'m> {
    pub column: &'m ColumnModel,
    pub name: String,
    pub ty: ResolvedType,
    pub nullable: bool,
    /// Explicit not-null string column
    pub required: bool,
    /// Sole member of a single-column key
    pub is_key: bool,
}

impl PropertyPlan<'_> {
    /// Rendered C# type with nullability applied.
    pub fn type_name(&self) -> String {
        self.ty.ty.render(self.nullable)
    }
}

/// One non-key index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPlan {
    pub properties: Vec<String>,
    /// Explicit name, else `IX_<Entity>_<Props>`
    pub name: String,
    pub unique: bool,
}

/// One navigation member together with what the mapping needs to wire it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPlan {
    pub name: String,
    /// Entity on the other end
    pub target_entity: String,
    /// Member name on the other end
    pub inverse: String,
    /// Cardinality seen from this endpoint
    pub cardinality: Cardinality,
    pub endpoint: Endpoint,
    /// Index into the model's relationships
    pub relationship: usize,
    /// Referencing property names on the left entity
    pub foreign_key: Vec<String>,
    /// Referenced property names on the right entity
    pub principal_key: Vec<String>,
}

impl NavigationPlan {
    pub fn is_collection(&self) -> bool {
        self.cardinality.is_collection()
    }
}

/// Builds a [`SchemaPlan`] and rejects models that cannot be emitted.
pub struct Planner<'a> {
    inflector: &'a dyn Inflector,
    config: &'a GeneratorConfig,
}

impl<'a> Planner<'a> {
    pub fn new(inflector: &'a dyn Inflector, config: &'a GeneratorConfig) -> Self {
        Self { inflector, config }
    }

    /// Plan `model` for `target`.
    ///
    /// Relationship shape and endpoint errors are collected first; when there
    /// are none, entities are named and every naming collision is collected.
    /// Either way all problems are returned at once.
    pub fn plan<'m>(
        &self,
        model: &'m DatabaseModel,
        target: &TargetDescriptor,
    ) -> Result<SchemaPlan<'m>, Vec<GenerateError>> {
        let errors: Vec<GenerateError> = model
            .relationships
            .iter()
            .filter_map(|rel| validate_relationship(model, rel).err())
            .collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut entities: Vec<EntityPlan<'m>> =
            model.tables.iter().map(|t| self.plan_entity(t)).collect();

        self.attach_navigations(model, &mut entities);

        let mut errors = check_namespace(model, &entities, target);
        for entity in &entities {
            errors.extend(check_entity(model, entity));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        tracing::debug!(
            target_class = %target.class_name,
            entities = entities.len(),
            "planned schema"
        );

        Ok(SchemaPlan { model, entities })
    }

    fn plan_entity<'m>(&self, table: &'m TableModel) -> EntityPlan<'m> {
        let name = entity_name(self.inflector, &table.name);
        let set_name = self.inflector.pluralize(&name);

        let primary_key = table.primary_key();
        let key_columns: Vec<String> = primary_key
            .as_ref()
            .map(|k| k.columns.clone())
            .unwrap_or_default();
        let single_key = match key_columns.as_slice() {
            [column] => Some(column.as_str()),
            _ => None,
        };

        let key = primary_key.map(|k| KeyPlan {
            properties: k.columns.iter().map(|c| humanize(c)).collect(),
            name: k.name.unwrap_or_else(|| format!("PK_{}", table.name)),
        });

        let properties = table
            .columns
            .iter()
            .map(|column| {
                let ty = resolve_type(&column.type_name);
                let required = column.not_null && ty.ty.is_string();
                PropertyPlan {
                    column,
                    name: humanize(&column.name),
                    nullable: column.is_nullable() && !key_columns.contains(&column.name),
                    required,
                    is_key: single_key == Some(column.name.as_str()),
                    ty,
                }
            })
            .collect();

        let indexes = plan_indexes(table, &name);

        EntityPlan {
            table,
            name,
            set_name,
            key,
            properties,
            indexes,
            navigations: Vec::new(),
        }
    }

    fn attach_navigations(&self, model: &DatabaseModel, entities: &mut [EntityPlan<'_>]) {
        let namer = NavigationNamer::new(self.inflector, &self.config.navigation_suffix);
        let positions: HashMap<&str, usize> = model
            .tables
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.as_str(), i))
            .rev()
            .collect();

        for (index, rel) in model.relationships.iter().enumerate() {
            // endpoints were validated before planning
            let (Some(&left), Some(&right)) = (
                positions.get(rel.left_table.as_str()),
                positions.get(rel.right_table.as_str()),
            ) else {
                continue;
            };

            let classification = Classification::of(rel, entities[left].table);
            let names = namer.name_pair(rel, classification);
            let foreign_key: Vec<String> = rel.left_columns.iter().map(|c| humanize(c)).collect();
            let principal_key: Vec<String> =
                rel.right_columns.iter().map(|c| humanize(c)).collect();

            tracing::debug!(
                relationship = %rel.describe(),
                left = %classification.left,
                navigation = %names.left,
                inverse = %names.right,
                "classified relationship"
            );

            for endpoint in [Endpoint::Left, Endpoint::Right] {
                let (owner, other) = match endpoint {
                    Endpoint::Left => (left, right),
                    Endpoint::Right => (right, left),
                };
                let target_entity = entities[other].name.clone();

                entities[owner].navigations.push(NavigationPlan {
                    name: names.for_endpoint(endpoint).to_string(),
                    target_entity,
                    inverse: names.for_endpoint(endpoint.opposite()).to_string(),
                    cardinality: classification.for_endpoint(endpoint),
                    endpoint,
                    relationship: index,
                    foreign_key: foreign_key.clone(),
                    principal_key: principal_key.clone(),
                });
            }
        }
    }
}

fn validate_relationship(
    model: &DatabaseModel,
    rel: &RelationshipModel,
) -> Result<(), GenerateError> {
    let left_arity = rel.left_columns.len();
    let right_arity = rel.right_columns.len();
    if left_arity == 0 || left_arity != right_arity {
        return Err(GenerateError::UnsupportedRelationshipShape {
            relationship: rel.describe(),
            left_arity,
            right_arity,
        });
    }

    for (table_name, columns) in [
        (&rel.left_table, &rel.left_columns),
        (&rel.right_table, &rel.right_columns),
    ] {
        let unknown = |what: String| GenerateError::UnknownRelationshipEndpoint {
            relationship: rel.describe(),
            what,
        };

        let table = model
            .table(table_name)
            .ok_or_else(|| unknown(format!("table '{table_name}'")))?;

        if let Some(missing) = columns.iter().find(|c| table.find_column(c).is_none()) {
            return Err(unknown(format!("column '{table_name}.{missing}'")));
        }
    }

    Ok(())
}

fn plan_indexes(table: &TableModel, entity: &str) -> Vec<IndexPlan> {
    let mut indexes: Vec<IndexPlan> = Vec::new();

    let declared = table
        .indexes
        .iter()
        .filter(|i| !i.primary_key && !i.columns.is_empty())
        .map(|i| (i.columns.as_slice(), i.unique, i.name.as_deref()));

    let unique_columns = table
        .columns
        .iter()
        .filter(|c| c.unique && !c.primary_key)
        .map(|c| (std::slice::from_ref(&c.name), true, None));

    for (columns, unique, name) in declared.chain(unique_columns) {
        let properties: Vec<String> = columns.iter().map(|c| humanize(c)).collect();
        if indexes.iter().any(|existing| existing.properties == properties) {
            continue;
        }
        let name = match name {
            Some(name) => name.to_string(),
            None => format!("IX_{entity}_{}", properties.join("_")),
        };
        indexes.push(IndexPlan {
            properties,
            name,
            unique,
        });
    }

    indexes
}

/// Entity, enum and context class names must be distinct within the target
/// namespace.
fn check_namespace(
    model: &DatabaseModel,
    entities: &[EntityPlan<'_>],
    target: &TargetDescriptor,
) -> Vec<GenerateError> {
    let scope = if target.namespace.is_empty() {
        "the global namespace".to_string()
    } else {
        format!("namespace '{}'", target.namespace)
    };

    let mut names = NameRegistry::new(scope);
    names.claim(&target.class_name, "the context class".to_string());
    for entity in entities {
        names.claim(&entity.name, format!("table '{}'", entity.table.name));
    }
    for enum_model in &model.enums {
        names.claim(&enum_model.name, format!("enum '{}'", enum_model.name));
    }
    names.into_errors()
}

/// Members of one entity must be distinct from each other and from the
/// entity's own name.
fn check_entity(model: &DatabaseModel, entity: &EntityPlan<'_>) -> Vec<GenerateError> {
    let mut names = NameRegistry::new(format!("entity '{}'", entity.name));
    names.claim(&entity.name, "the entity type name".to_string());

    for property in &entity.properties {
        names.claim(
            &property.name,
            format!("column '{}.{}'", entity.table.name, property.column.name),
        );
    }
    for navigation in &entity.navigations {
        let described = model
            .relationships
            .get(navigation.relationship)
            .map(RelationshipModel::describe)
            .unwrap_or_default();
        names.claim(&navigation.name, format!("relationship {described}"));
    }
    names.into_errors()
}

/// First-come registry of names within one scope.
struct NameRegistry {
    scope: String,
    owners: HashMap<String, String>,
    errors: Vec<GenerateError>,
}

impl NameRegistry {
    fn new(scope: String) -> Self {
        Self {
            scope,
            owners: HashMap::new(),
            errors: Vec::new(),
        }
    }

    fn claim(&mut self, name: &str, owner: String) {
        match self.owners.get(name) {
            Some(first) => self.errors.push(GenerateError::NamingCollision {
                scope: self.scope.clone(),
                name: name.to_string(),
                first: first.clone(),
                second: owner,
            }),
            None => {
                self.owners.insert(name.to_string(), owner);
            }
        }
    }

    fn into_errors(self) -> Vec<GenerateError> {
        self.errors
    }
}

#[cfg(test)]
#[path = "plan/plan_tests.rs"]
mod plan_tests;
