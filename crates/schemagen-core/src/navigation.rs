//! Navigation member naming.
//!
//! Each relationship yields two member names, one per endpoint:
//!
//! 1. The base name on the left entity is the right entity's name, and the
//!    base name on the right entity is the left entity's name.
//! 2. With exactly one referencing column, the column name minus its
//!    `Id`/`Fk`/`Pk` suffix becomes a qualifier. Unless it is empty, equal to
//!    the referenced entity name, or just `id`, it replaces the base name on
//!    **both** sides.
//! 3. To-one members get the configured suffix; collections are pluralized.
//! 4. A self-referencing edge whose two members still share a name (a
//!    one-to-one from a table to itself) prefixes the referenced side's base
//!    with `Inverse`.
//!
//! ```text
//! follows.following_user_id > users.id
//!   Follow.FollowingUserNavigation  <->  User.FollowingUsers
//! follows.followed_user_id > users.id
//!   Follow.FollowedUserNavigation   <->  User.FollowedUsers
//! users.successor_id > users.id  (successor_id unique)
//!   User.SuccessorNavigation        <->  User.InverseSuccessorNavigation
//! ```
//!
//! Names that still clash after this are reported by the planner, never
//! renamed.

use crate::classify::{Cardinality, Classification, Endpoint};
use crate::model::RelationshipModel;
use crate::naming::{Inflector, entity_name, humanize};

/// Member names for both endpoints of one relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPair {
    /// Member on the left (referencing) entity
    pub left: String,
    /// Member on the right (referenced) entity
    pub right: String,
}

impl NavigationPair {
    /// Member name owned by `endpoint`.
    pub fn for_endpoint(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Left => &self.left,
            Endpoint::Right => &self.right,
        }
    }
}

/// Computes navigation names through an injected [`Inflector`].
pub struct NavigationNamer<'a> {
    inflector: &'a dyn Inflector,
    suffix: &'a str,
}

impl<'a> NavigationNamer<'a> {
    pub fn new(inflector: &'a dyn Inflector, suffix: &'a str) -> Self {
        Self { inflector, suffix }
    }

    /// Name both members of `relationship`.
    pub fn name_pair(
        &self,
        relationship: &RelationshipModel,
        classification: Classification,
    ) -> NavigationPair {
        let right_entity = entity_name(self.inflector, &relationship.right_table);
        let left_entity = entity_name(self.inflector, &relationship.left_table);

        let (left_base, right_base) = match self.qualifier(relationship, &right_entity) {
            Some(qualifier) => (qualifier.clone(), qualifier),
            None => (right_entity, left_entity),
        };

        let left = self.member_name(&left_base, classification.left);
        let mut right = self.member_name(&right_base, classification.right);

        if relationship.is_self_referencing() && left == right {
            right = self.member_name(&format!("Inverse{right_base}"), classification.right);
        }

        NavigationPair { left, right }
    }

    /// Qualifier recovered from a single referencing column, if usable.
    pub fn qualifier(&self, relationship: &RelationshipModel, referenced: &str) -> Option<String> {
        let [column] = relationship.left_columns.as_slice() else {
            return None;
        };

        let qualifier = self.inflector.strip_conventional_suffix(&humanize(column));

        let usable = !qualifier.is_empty()
            && !qualifier.eq_ignore_ascii_case(referenced)
            && !qualifier.eq_ignore_ascii_case("id");

        usable.then_some(qualifier)
    }

    fn member_name(&self, base: &str, cardinality: Cardinality) -> String {
        if cardinality.is_collection() {
            self.inflector.pluralize(base)
        } else {
            format!("{base}{}", self.suffix)
        }
    }
}
