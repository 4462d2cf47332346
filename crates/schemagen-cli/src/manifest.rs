//! Manifest parsing and validation

use anyhow::{Context, Result};
use schemagen_core::{GeneratorConfig, TargetDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default manifest file name
pub const MANIFEST_FILE: &str = "schemagen.toml";

/// schemagen.toml manifest structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default, rename = "target")]
    pub targets: Vec<TargetDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    /// Directory searched for `*.json` schema resources, relative to the manifest
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Directory generated units are written to, relative to the manifest
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("schemas")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("Generated")
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            output_dir: default_output_dir(),
            log_level: None,
        }
    }
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse manifest from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            anyhow::bail!("Manifest declares no [[target]] entries");
        }

        if !is_identifier(&self.generator.collection_type) {
            anyhow::bail!(
                "Collection type is not a valid identifier: '{}'",
                self.generator.collection_type
            );
        }

        if !self.generator.navigation_suffix.is_empty()
            && !self
                .generator
                .navigation_suffix
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_')
        {
            anyhow::bail!(
                "Navigation suffix may only contain letters, digits and '_': '{}'",
                self.generator.navigation_suffix
            );
        }

        if let Some(level) = &self.project.log_level {
            crate::logging::parse_level(level)?;
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            if target.class_name.is_empty() {
                anyhow::bail!("Target class name cannot be empty");
            }

            if !is_identifier(&target.class_name) {
                anyhow::bail!(
                    "Target class name is not a valid identifier: '{}'",
                    target.class_name
                );
            }

            if target.source.trim().is_empty() {
                anyhow::bail!("Target '{}' has an empty source", target.class_name);
            }

            if !target.namespace.is_empty() && !target.namespace.split('.').all(is_identifier) {
                anyhow::bail!(
                    "Target '{}' has an invalid namespace: '{}'",
                    target.class_name,
                    target.namespace
                );
            }

            if !seen.insert(target.file_name()) {
                anyhow::bail!(
                    "Duplicate target: '{}' in namespace '{}'",
                    target.class_name,
                    target.namespace
                );
            }
        }

        Ok(())
    }

    /// Schema directory resolved against the directory holding the manifest
    pub fn schema_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.project.schema_dir)
    }

    /// Output directory resolved against the directory holding the manifest
    pub fn output_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.project.output_dir)
    }
}

/// Check if a string is a valid C# identifier (ASCII subset)
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
