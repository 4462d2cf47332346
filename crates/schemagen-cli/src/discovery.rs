//! Schema resource discovery
//!
//! Collects every `*.json` file under the schema directory, recursively and
//! in sorted order so that resource order never depends on the file system.

use anyhow::{Context, Result};
use schemagen_core::SchemaResource;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of schema model resources
pub const SCHEMA_EXTENSION: &str = "json";

/// Discover schema resources under `root`.
///
/// Resource paths are `root` joined with the file's relative path, using `/`
/// as separator. Hidden files and directories are skipped.
pub fn discover(root: &Path) -> Result<Vec<SchemaResource>> {
    if !root.is_dir() {
        anyhow::bail!("Schema directory not found: {}", root.display());
    }

    let mut files = Vec::new();
    collect(root, &mut files)?;
    files.sort();

    let mut resources = Vec::with_capacity(files.len());
    for file in files {
        let content = fs::read_to_string(&file)
            .with_context(|| format!("Failed to read schema: {}", file.display()))?;
        let path = file.to_string_lossy().replace('\\', "/");
        tracing::debug!("Discovered schema resource {}", path);
        resources.push(SchemaResource::new(path, content));
    }

    Ok(resources)
}

fn collect(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if is_hidden(&path) {
            continue;
        }

        if path.is_dir() {
            collect(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == SCHEMA_EXTENSION) {
            files.push(path);
        }
    }

    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
