//! Generate and check command implementations

use crate::discovery;
use crate::logging::{self, TracingSink};
use crate::manifest::{MANIFEST_FILE, Manifest};
use anyhow::{Context, Result};
use schemagen_core::{GeneratedUnit, Generator, JsonSchemaParser};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Options for the generate command
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub manifest: Option<String>,
    pub output: Option<String>,
    pub stdout: bool,
    pub log_level: Option<String>,
}

/// Result of a command run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub generated: usize,
    pub written: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl Outcome {
    /// No error diagnostic was reported
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// A loaded and validated manifest plus the directory it lives in
struct Project {
    manifest: Manifest,
    base: PathBuf,
}

impl Project {
    fn load(manifest_path: Option<String>, log_level: Option<&str>) -> Result<Self> {
        let path = PathBuf::from(manifest_path.unwrap_or_else(|| MANIFEST_FILE.to_string()));

        let manifest = Manifest::from_file(&path)?;
        logging::init(log_level.or(manifest.project.log_level.as_deref()))?;
        manifest.validate()?;

        let base = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        tracing::debug!("Loaded manifest {}", path.display());
        Ok(Self { manifest, base })
    }

    /// Discover resources and run the pass over every target.
    fn generate(&self, sink: &mut TracingSink) -> Result<Vec<GeneratedUnit>> {
        let schema_dir = self.manifest.schema_dir(&self.base);
        let resources = discovery::discover(&schema_dir)?;
        tracing::info!(
            "Found {} schema resource(s) in {}",
            resources.len(),
            schema_dir.display()
        );

        let generator = Generator::new(self.manifest.generator.clone());
        Ok(generator.run(&self.manifest.targets, &resources, &JsonSchemaParser, sink))
    }
}

/// Generate command implementation
pub fn run(options: GenerateOptions) -> Result<Outcome> {
    let project = Project::load(options.manifest, options.log_level.as_deref())?;

    let mut sink = TracingSink::new();
    let units = project.generate(&mut sink)?;

    let output_dir = match options.output {
        Some(output) => PathBuf::from(output),
        None => project.manifest.output_dir(&project.base),
    };

    let mut written = 0;
    for unit in &units {
        if options.stdout {
            println!("// {}", unit.file_name);
            print!("{}", unit.code);
        } else if write_unit(&output_dir, unit)? {
            written += 1;
        }
    }

    let outcome = Outcome {
        generated: units.len(),
        written,
        errors: sink.errors,
        warnings: sink.warnings,
    };

    if !options.stdout {
        println!(
            "Generated {} of {} target(s) into {} ({} written, {} error(s), {} warning(s))",
            outcome.generated,
            project.manifest.targets.len(),
            output_dir.display(),
            outcome.written,
            outcome.errors,
            outcome.warnings
        );
    }

    Ok(outcome)
}

/// Check command implementation
pub fn check(manifest_path: Option<String>, log_level: Option<String>) -> Result<Outcome> {
    let path = manifest_path
        .clone()
        .unwrap_or_else(|| MANIFEST_FILE.to_string());
    println!("Checking manifest: {}", path);

    let project = Project::load(manifest_path, log_level.as_deref())?;
    println!("✓ Targets: {}", project.manifest.targets.len());

    let mut sink = TracingSink::new();
    let units = project.generate(&mut sink)?;

    for unit in &units {
        println!("✓ {} <- {}", unit.file_name, unit.source_path);
    }

    let outcome = Outcome {
        generated: units.len(),
        written: 0,
        errors: sink.errors,
        warnings: sink.warnings,
    };

    if outcome.is_success() {
        println!("\nManifest is valid! ({} warning(s))", outcome.warnings);
    } else {
        println!(
            "\n{} error(s), {} warning(s)",
            outcome.errors, outcome.warnings
        );
    }

    Ok(outcome)
}

/// Write one unit below `output_dir`.
///
/// Returns `false` when the file already holds identical content.
fn write_unit(output_dir: &Path, unit: &GeneratedUnit) -> Result<bool> {
    let path = output_dir.join(&unit.file_name);

    if fs::read_to_string(&path).is_ok_and(|existing| existing == unit.code) {
        tracing::debug!("Unchanged {}", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&path, &unit.code)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Wrote {}", path.display());
    Ok(true)
}
