//! Relationship cardinality, evaluated per endpoint.
//!
//! The same edge reads differently from each side: `posts.user_id > users.id`
//! is ManyToOne from `posts` and OneToMany from `users`. Cardinality is never
//! stored on the model; it is derived from the referencing table's key and
//! uniqueness metadata every time it is needed.

use crate::model::{RelationshipModel, TableModel};
use std::fmt;

/// Relationship multiplicity as seen from one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    OneToOne,
    /// This endpoint holds a collection of the opposite entity
    OneToMany,
    ManyToOne,
}

impl Cardinality {
    /// Whether the navigation on this endpoint is a collection.
    pub fn is_collection(self) -> bool {
        self == Cardinality::OneToMany
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::OneToOne => write!(f, "OneToOne"),
            Cardinality::OneToMany => write!(f, "OneToMany"),
            Cardinality::ManyToOne => write!(f, "ManyToOne"),
        }
    }
}

/// Side of a relationship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Referencing side, owns the foreign-key columns
    Left,
    /// Referenced (principal) side
    Right,
}

impl Endpoint {
    pub fn opposite(self) -> Self {
        match self {
            Endpoint::Left => Endpoint::Right,
            Endpoint::Right => Endpoint::Left,
        }
    }
}

/// Cardinality of one edge from both endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub left: Cardinality,
    pub right: Cardinality,
}

impl Classification {
    /// Classify an edge given the referencing (left) table.
    ///
    /// OneToOne when the referencing column set is unique on that table,
    /// otherwise ManyToOne from the left and OneToMany from the right.
    pub fn of(relationship: &RelationshipModel, left_table: &TableModel) -> Self {
        if is_unique_column_set(left_table, &relationship.left_columns) {
            Self {
                left: Cardinality::OneToOne,
                right: Cardinality::OneToOne,
            }
        } else {
            Self {
                left: Cardinality::ManyToOne,
                right: Cardinality::OneToMany,
            }
        }
    }

    pub fn for_endpoint(&self, endpoint: Endpoint) -> Cardinality {
        match endpoint {
            Endpoint::Left => self.left,
            Endpoint::Right => self.right,
        }
    }
}

/// Whether `columns` can hold each value combination at most once.
///
/// True when the table's primary key, a unique or primary-key index, or a
/// unique or primary-key column covers a subset of `columns`. Column order
/// does not matter.
pub fn is_unique_column_set(table: &TableModel, columns: &[String]) -> bool {
    if columns.is_empty() {
        return false;
    }

    let covers = |unique: &[String]| -> bool {
        !unique.is_empty() && unique.iter().all(|c| columns.contains(c))
    };

    if table.primary_key().is_some_and(|key| covers(&key.columns)) {
        return true;
    }

    if table
        .indexes
        .iter()
        .filter(|i| i.unique || i.primary_key)
        .any(|i| covers(&i.columns))
    {
        return true;
    }

    table
        .columns
        .iter()
        .filter(|c| c.unique)
        .any(|c| columns.contains(&c.name))
}

#[cfg(test)]
#[path = "classify/classify_tests.rs"]
mod classify_tests;
