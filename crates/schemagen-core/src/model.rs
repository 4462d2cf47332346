//! Relational schema model handed over by a parser collaborator.
//!
//! The model is plain data: it is built once from parser output and only ever
//! borrowed immutably by the generation pass.
//!
//! # Relationship orientation
//!
//! In a [`RelationshipModel`] the *left* side is the referencing side (the table
//! owning the foreign-key columns) and the *right* side is the referenced
//! (principal) side. Parsers normalise `<` references into this orientation.

use serde::{Deserialize, Serialize};

/// Root aggregate for one schema resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseModel {
    /// Tables in declaration order.
    #[serde(default)]
    pub tables: Vec<TableModel>,

    /// Relationship edges in declaration order.
    #[serde(default)]
    pub relationships: Vec<RelationshipModel>,

    /// Enums in declaration order.
    #[serde(default)]
    pub enums: Vec<EnumModel>,
}

impl DatabaseModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a table
    pub fn with_table(mut self, table: TableModel) -> Self {
        self.tables.push(table);
        self
    }

    /// Append a relationship
    pub fn with_relationship(mut self, relationship: RelationshipModel) -> Self {
        self.relationships.push(relationship);
        self
    }

    /// Append an enum
    pub fn with_enum(mut self, enum_model: EnumModel) -> Self {
        self.enums.push(enum_model);
        self
    }

    /// Look up a table by its schema name.
    pub fn table(&self, name: &str) -> Option<&TableModel> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// A table and its columns and indexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableModel {
    pub name: String,

    #[serde(default)]
    pub columns: Vec<ColumnModel>,

    #[serde(default)]
    pub indexes: Vec<IndexModel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TableModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            indexes: Vec::new(),
            note: None,
        }
    }

    /// Append a column
    pub fn column(mut self, column: ColumnModel) -> Self {
        self.columns.push(column);
        self
    }

    /// Append an index
    pub fn index(mut self, index: IndexModel) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn find_column(&self, name: &str) -> Option<&ColumnModel> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Resolve the table's primary key.
    ///
    /// A primary-key index wins over column-level primary-key flags. Returns
    /// `None` for keyless tables.
    pub fn primary_key(&self) -> Option<PrimaryKey> {
        if let Some(index) = self
            .indexes
            .iter()
            .find(|i| i.primary_key && !i.columns.is_empty())
        {
            return Some(PrimaryKey {
                columns: index.columns.clone(),
                name: index.name.clone(),
            });
        }

        let columns: Vec<String> = self
            .columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.clone())
            .collect();

        if columns.is_empty() {
            None
        } else {
            Some(PrimaryKey {
                columns,
                name: None,
            })
        }
    }
}

/// A resolved primary key: ordered column names plus an optional explicit name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKey {
    pub columns: Vec<String>,
    pub name: Option<String>,
}

/// A single table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnModel {
    pub name: String,

    /// Declared schema type, possibly with a size suffix (`varchar(500)`) or
    /// an array marker (`int[]`).
    #[serde(rename = "type")]
    pub type_name: String,

    /// Explicit `null` setting. Columns are nullable unless declared otherwise.
    #[serde(default = "default_nullable")]
    pub nullable: bool,

    /// Explicit `not null` setting.
    #[serde(default)]
    pub not_null: bool,

    #[serde(default)]
    pub primary_key: bool,

    #[serde(default)]
    pub increment: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn default_nullable() -> bool {
    true
}

impl ColumnModel {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            nullable: default_nullable(),
            not_null: false,
            primary_key: false,
            increment: false,
            unique: false,
            note: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self.nullable = false;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn increment(mut self) -> Self {
        self.increment = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Whether the generated member may hold no value.
    ///
    /// Primary-key columns are never nullable.
    pub fn is_nullable(&self) -> bool {
        self.nullable && !self.not_null && !self.primary_key
    }
}

/// A table index, possibly composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexModel {
    pub columns: Vec<String>,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub primary_key: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl IndexModel {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            unique: false,
            primary_key: false,
            name: None,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A foreign-key relationship edge, possibly over composite keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Referencing table.
    pub left_table: String,
    pub left_columns: Vec<String>,

    /// Referenced table.
    pub right_table: String,
    pub right_columns: Vec<String>,
}

impl RelationshipModel {
    pub fn new<L, R, S>(
        left_table: impl Into<String>,
        left_columns: L,
        right_table: impl Into<String>,
        right_columns: R,
    ) -> Self
    where
        L: IntoIterator<Item = S>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            left_table: left_table.into(),
            left_columns: left_columns.into_iter().map(Into::into).collect(),
            right_table: right_table.into(),
            right_columns: right_columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_self_referencing(&self) -> bool {
        self.left_table == self.right_table
    }

    /// Human-readable form used in diagnostics, e.g. `posts.(user_id) > users.(id)`.
    pub fn describe(&self) -> String {
        let edge = format!(
            "{}.({}) > {}.({})",
            self.left_table,
            self.left_columns.join(", "),
            self.right_table,
            self.right_columns.join(", ")
        );
        match &self.name {
            Some(name) => format!("'{name}' {edge}"),
            None => edge,
        }
    }
}

/// A schema enum with ordered values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumModel {
    pub name: String,

    #[serde(default)]
    pub values: Vec<String>,
}

impl EnumModel {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// One generation request: which context class to produce, where, and from
/// which schema resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    pub class_name: String,

    #[serde(default)]
    pub namespace: String,

    /// Identifier matched against the tail of available schema resource paths.
    pub source: String,
}

impl TargetDescriptor {
    pub fn new(
        class_name: impl Into<String>,
        namespace: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            namespace: namespace.into(),
            source: source.into(),
        }
    }

    /// Relative output path of the unit generated for this target.
    pub fn file_name(&self) -> String {
        if self.namespace.is_empty() {
            format!("{}.g.cs", self.class_name)
        } else {
            format!("{}/{}.g.cs", self.namespace, self.class_name)
        }
    }
}
