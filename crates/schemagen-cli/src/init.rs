//! Init command implementation
//!
//! Writes a starter `schemagen.toml` and a sample schema model so that
//! `schemagen generate` works right away.

use crate::manifest::{MANIFEST_FILE, is_identifier};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

// ============================================================================
// Embedded Templates
// ============================================================================

mod templates {
    pub const MANIFEST: &str = include_str!("../templates/schemagen.toml.tmpl");
    pub const SCHEMA: &str = include_str!("../templates/schema.json.tmpl");
}

// ============================================================================
// Template Context
// ============================================================================

/// Context for template variable substitution
struct TemplateContext {
    /// Project name as given, used for the schema file name (e.g., "my-blog")
    project_name: String,
    /// PascalCase name used for the namespace and context class (e.g., "MyBlog")
    class_name: String,
}

impl TemplateContext {
    fn new(name: &str) -> Self {
        Self {
            project_name: name.to_string(),
            class_name: to_pascal_case(name),
        }
    }

    /// Apply placeholder substitutions to template content
    fn apply(&self, template: &str) -> String {
        template
            .replace("{{project-name}}", &self.project_name)
            .replace("{{class-name}}", &self.class_name)
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

/// Run the init command
pub fn run(name: &str, path: Option<String>) -> Result<()> {
    let ctx = TemplateContext::new(name);
    if !ctx.class_name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        anyhow::bail!("Project name must start with a letter: '{name}'");
    }
    if !is_identifier(&ctx.class_name) {
        anyhow::bail!(
            "Project name '{name}' gives '{}', which is not a valid identifier",
            ctx.class_name
        );
    }

    let project_dir = path.unwrap_or_else(|| ".".to_string());
    let project_path = Path::new(&project_dir);
    let manifest_path = project_path.join(MANIFEST_FILE);

    if manifest_path.exists() {
        anyhow::bail!("Manifest already exists: {}", manifest_path.display());
    }

    let schema_dir = project_path.join("schemas");
    fs::create_dir_all(&schema_dir)
        .with_context(|| format!("Failed to create directory: {}", schema_dir.display()))?;

    let schema_path = schema_dir.join(format!("{}.json", ctx.project_name));
    if !schema_path.exists() {
        fs::write(&schema_path, ctx.apply(templates::SCHEMA))
            .with_context(|| format!("Failed to write {}", schema_path.display()))?;
        println!("  Created {}", schema_path.display());
    }

    fs::write(&manifest_path, ctx.apply(templates::MANIFEST))
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;
    println!("  Created {}", manifest_path.display());

    tracing::info!("Initialized schemagen project in {}", project_dir);
    print_next_steps(&project_dir);
    Ok(())
}

fn print_next_steps(project_dir: &str) {
    println!("\nProject initialized!\n");
    println!("Next steps:");
    println!("  cd {project_dir}");
    println!("  schemagen check");
    println!("  schemagen generate");
}

// ============================================================================
// Utilities
// ============================================================================

/// Convert a string to PascalCase
fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_', ' ', '.'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}
