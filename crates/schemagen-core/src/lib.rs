//! schemagen-core - Relational schema to Entity Framework Core code generation
//!
//! This crate turns a relational schema model into C# entity classes and a
//! fluent mapping context:
//! - [`DatabaseModel`] and friends describe the schema handed over by a parser
//! - [`Classification`] derives relationship cardinality per endpoint
//! - [`NavigationNamer`] picks collision-free navigation member names
//! - [`Generator`] runs the pass over many targets and reports [`Diagnostic`]s
//!
//! # Example
//!
//! ```
//! use schemagen_core::prelude::*;
//!
//! let model = DatabaseModel::new()
//!     .with_table(TableModel::new("users").column(ColumnModel::new("id", "integer").primary_key()))
//!     .with_table(
//!         TableModel::new("posts")
//!             .column(ColumnModel::new("id", "integer").primary_key())
//!             .column(ColumnModel::new("user_id", "integer").not_null()),
//!     )
//!     .with_relationship(RelationshipModel::new("posts", ["user_id"], "users", ["id"]));
//! let target = TargetDescriptor::new("BlogContext", "Blog.Data", "blog.json");
//!
//! let code = Generator::default().generate(&model, &target).unwrap();
//!
//! assert!(code.contains("public virtual User UserNavigation { get; set; }"));
//! assert!(code.contains("public virtual ICollection<Post> Posts { get; set; }"));
//! ```

pub mod classify;
mod config;
pub mod diagnostic;
pub mod emit;
mod error;
mod generator;
pub mod model;
pub mod naming;
pub mod navigation;
pub mod plan;
pub mod source;
pub mod types;

pub use classify::{Cardinality, Classification, Endpoint};
pub use config::{GeneratorConfig, InflectionConfig};
pub use diagnostic::{Diagnostic, DiagnosticCode, DiagnosticSink, Severity, SourceLocation};
pub use error::{GenerateError, GenerateResult};
pub use generator::{GeneratedUnit, Generator};
pub use model::{
    ColumnModel, DatabaseModel, EnumModel, IndexModel, PrimaryKey, RelationshipModel, TableModel,
    TargetDescriptor,
};
pub use naming::{EnglishInflector, Inflector};
pub use navigation::{NavigationNamer, NavigationPair};
pub use source::{
    JsonSchemaParser, ResourceLookup, SchemaParseError, SchemaParser, SchemaResource,
    resolve_source,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ColumnModel, DatabaseModel, Diagnostic, DiagnosticSink, EnumModel, GenerateError,
        GeneratedUnit, Generator, GeneratorConfig, IndexModel, Inflector, JsonSchemaParser,
        RelationshipModel, SchemaParser, SchemaResource, Severity, TableModel, TargetDescriptor,
    };
}
