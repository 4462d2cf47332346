#![allow(non_snake_case)]

use super::*;
use crate::diagnostic::Severity;
use crate::model::{ColumnModel, TableModel};
use crate::source::{JsonSchemaParser, SchemaParseError, SchemaResource};

const BLOG_JSON: &str = r#"{
    "tables": [
        { "name": "users", "columns": [ { "name": "id", "type": "integer", "primary_key": true } ] },
        { "name": "posts", "columns": [
            { "name": "id", "type": "integer", "primary_key": true },
            { "name": "user_id", "type": "integer", "not_null": true }
        ] }
    ],
    "relationships": [
        { "left_table": "posts", "left_columns": ["user_id"], "right_table": "users", "right_columns": ["id"] }
    ]
}"#;

const AUDIT_JSON: &str = r#"{
    "tables": [ { "name": "audit_log", "columns": [ { "name": "message", "type": "text" } ] } ]
}"#;

fn resources() -> Vec<SchemaResource> {
    vec![
        SchemaResource::new("schemas/blog.json", BLOG_JSON),
        SchemaResource::new("schemas/audit.json", AUDIT_JSON),
        SchemaResource::new("schemas/broken.json", "{ \"tables\": "),
    ]
}

#[test]
fn Generator___run___missing_source_does_not_block_siblings() {
    let generator = Generator::default();
    let targets = vec![
        TargetDescriptor::new("InventoryContext", "Inventory", "inventory.json"),
        TargetDescriptor::new("BlogContext", "Blog", "blog.json"),
    ];
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let units = generator.run(&targets, &resources(), &JsonSchemaParser, &mut diagnostics);

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].target.class_name, "BlogContext");
    assert_eq!(units[0].file_name, "Blog/BlogContext.g.cs");
    assert_eq!(units[0].source_path, "schemas/blog.json");
    assert!(units[0].code.contains("public partial class BlogContext"));

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::MissingSchemaSource);
    assert_eq!(diagnostics[0].target.as_deref(), Some("InventoryContext"));
    assert!(diagnostics[0].message.contains("inventory.json"));
}

#[test]
fn Generator___run___parse_failure_reported_with_location() {
    let generator = Generator::default();
    let targets = vec![TargetDescriptor::new("BrokenContext", "", "broken.json")];
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let units = generator.run(&targets, &resources(), &JsonSchemaParser, &mut diagnostics);

    assert!(units.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::SchemaParseFailure);
    let location = diagnostics[0].location.as_ref().unwrap();
    assert_eq!(location.path, "schemas/broken.json");
    assert!(location.line.is_some());
}

#[test]
fn Generator___run___keyless_table_is_warning_and_still_generates() {
    let generator = Generator::default();
    let targets = vec![TargetDescriptor::new("AuditContext", "Audit", "audit.json")];
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let units = generator.run(&targets, &resources(), &JsonSchemaParser, &mut diagnostics);

    assert_eq!(units.len(), 1);
    assert!(units[0].code.contains("entity.HasNoKey();"));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::KeylessEntity);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(
        diagnostics[0].location,
        Some(SourceLocation::new("schemas/audit.json"))
    );
}

#[test]
fn Generator___run___planning_errors_carry_resource_path() {
    let generator = Generator::default();
    let targets = vec![TargetDescriptor::new("BlogContext", "Blog", "blog.json")];
    let parser = |_: &SchemaResource| -> Result<DatabaseModel, SchemaParseError> {
        Ok(DatabaseModel::new()
            .with_table(TableModel::new("posts").column(ColumnModel::new("id", "int").primary_key()))
            .with_relationship(crate::model::RelationshipModel::new(
                "posts",
                ["author_id"],
                "users",
                ["id"],
            )))
    };
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let units = generator.run(&targets, &resources(), &parser, &mut diagnostics);

    assert!(units.is_empty());
    assert_eq!(diagnostics[0].code, DiagnosticCode::UnknownRelationshipEndpoint);
    assert_eq!(
        diagnostics[0].location,
        Some(SourceLocation::new("schemas/blog.json"))
    );
    assert_eq!(diagnostics[0].target.as_deref(), Some("BlogContext"));
}

#[test]
fn Generator___generate___is_idempotent() {
    let generator = Generator::default();
    let model = JsonSchemaParser
        .parse(&SchemaResource::new("blog.json", BLOG_JSON))
        .unwrap();
    let target = TargetDescriptor::new("BlogContext", "Blog", "blog.json");

    let first = generator.generate(&model, &target).unwrap();
    let second = generator.generate(&model, &target).unwrap();

    assert_eq!(first, second);
}

#[test]
fn Generator___with_inflector___custom_rules_used() {
    let generator = Generator::default()
        .with_inflector(crate::naming::EnglishInflector::new().with_irregular("post", "articles"));
    let model = JsonSchemaParser
        .parse(&SchemaResource::new("blog.json", BLOG_JSON))
        .unwrap();
    let target = TargetDescriptor::new("BlogContext", "Blog", "blog.json");

    let code = generator.generate(&model, &target).unwrap();

    assert!(code.contains("public virtual DbSet<Post> Articles { get; set; }"));
    assert!(code.contains("public virtual ICollection<Post> Articles { get; set; }"));
}

#[test]
fn Generator___new___applies_configured_inflections() {
    let mut config = GeneratorConfig::default();
    config
        .inflections
        .irregular
        .insert("post".to_string(), "entries".to_string());
    let generator = Generator::new(config);
    let model = JsonSchemaParser
        .parse(&SchemaResource::new("blog.json", BLOG_JSON))
        .unwrap();
    let target = TargetDescriptor::new("BlogContext", "Blog", "blog.json");

    let code = generator.generate(&model, &target).unwrap();

    assert!(code.contains("DbSet<Post> Entries"));
}
