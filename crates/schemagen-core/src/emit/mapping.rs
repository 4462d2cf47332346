//! Context class emission: `DbSet` properties and the fluent mapping in
//! `OnModelCreating`.
//!
//! Relationships are wired from the owning (referencing) side only, using the
//! navigation names from the plan so both ends of each edge agree with the
//! entity members.

use super::{string_literal, string_literals};
use crate::classify::Cardinality;
use crate::model::TargetDescriptor;
use crate::plan::{EntityPlan, NavigationPlan, SchemaPlan};

/// Emit the partial context class for a target.
pub fn emit_context(code: &mut String, plan: &SchemaPlan<'_>, target: &TargetDescriptor) {
    code.push_str(&format!("public partial class {}\n", target.class_name));
    code.push_str("{\n");

    for entity in &plan.entities {
        code.push_str(&format!(
            "    public virtual DbSet<{}> {} {{ get; set; }}\n",
            entity.name, entity.set_name
        ));
    }
    if !plan.entities.is_empty() {
        code.push('\n');
    }

    code.push_str("    partial void OnModelCreatingPartial(ModelBuilder modelBuilder);\n");
    code.push('\n');

    for entity in &plan.entities {
        code.push_str(&format!(
            "    partial void OnConfigurePartial(EntityTypeBuilder<{}> entity);\n",
            entity.name
        ));
    }
    if !plan.entities.is_empty() {
        code.push('\n');
    }

    code.push_str("    protected override void OnModelCreating(ModelBuilder modelBuilder)\n");
    code.push_str("    {\n");
    code.push_str("        base.OnModelCreating(modelBuilder);\n");
    code.push('\n');

    for entity in &plan.entities {
        emit_entity_block(code, entity);
        code.push('\n');
    }

    code.push_str("        OnModelCreatingPartial(modelBuilder);\n");
    code.push_str("    }\n");
    code.push_str("}\n");
}

fn emit_entity_block(code: &mut String, entity: &EntityPlan<'_>) {
    code.push_str(&format!(
        "        modelBuilder.Entity<{}>(entity =>\n",
        entity.name
    ));
    code.push_str("        {\n");

    let mut statements: Vec<String> = vec![format!(
        "            entity.ToTable({});\n",
        string_literal(&entity.table.name)
    )];

    match &entity.key {
        Some(key) => statements.push(format!(
            "            entity.HasKey({})\n                .HasName({});\n",
            string_literals(&key.properties),
            string_literal(&key.name)
        )),
        None => statements.push("            entity.HasNoKey();\n".to_string()),
    }

    for index in &entity.indexes {
        let mut statement = format!(
            "            entity.HasIndex({})\n",
            string_literals(&index.properties)
        );
        if index.unique {
            statement.push_str("                .IsUnique()\n");
        }
        statement.push_str(&format!(
            "                .HasDatabaseName({});\n",
            string_literal(&index.name)
        ));
        statements.push(statement);
    }

    for navigation in entity.owned_navigations() {
        statements.push(relationship_statement(&entity.name, navigation));
    }

    statements.push("            OnConfigurePartial(entity);\n".to_string());

    code.push_str(&statements.join("\n"));
    code.push_str("        });\n");
}

fn relationship_statement(entity: &str, navigation: &NavigationPlan) -> String {
    let principal = &navigation.target_entity;
    let mut statement = format!(
        "            entity.HasOne<{}>({})\n",
        principal,
        string_literal(&navigation.name)
    );

    match navigation.cardinality {
        Cardinality::OneToOne => {
            statement.push_str(&format!(
                "                .WithOne({})\n",
                string_literal(&navigation.inverse)
            ));
            statement.push_str(&format!(
                "                .HasForeignKey<{}>({})\n",
                entity,
                string_literals(&navigation.foreign_key)
            ));
            statement.push_str(&format!(
                "                .HasPrincipalKey<{}>({});\n",
                principal,
                string_literals(&navigation.principal_key)
            ));
        }
        Cardinality::ManyToOne | Cardinality::OneToMany => {
            statement.push_str(&format!(
                "                .WithMany({})\n",
                string_literal(&navigation.inverse)
            ));
            statement.push_str(&format!(
                "                .HasForeignKey({})\n",
                string_literals(&navigation.foreign_key)
            ));
            statement.push_str(&format!(
                "                .HasPrincipalKey({});\n",
                string_literals(&navigation.principal_key)
            ));
        }
    }

    statement
}
