//! The generation pass.
//!
//! [`Generator::generate`] is the pure core: one model and one target in,
//! generated text or errors out. [`Generator::run`] drives it over many
//! targets: it resolves each target's schema resource, parses it, generates,
//! and reports every problem to a [`DiagnosticSink`]. A failing target never
//! stops its siblings.

use crate::config::GeneratorConfig;
use crate::diagnostic::{Diagnostic, DiagnosticCode, DiagnosticSink, SourceLocation};
use crate::emit::emit_unit;
use crate::error::GenerateError;
use crate::model::{DatabaseModel, TargetDescriptor};
use crate::naming::{EnglishInflector, Inflector};
use crate::plan::{Planner, SchemaPlan};
use crate::source::{ResourceLookup, SchemaParser, resolve_source};

/// Generated code for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    pub target: TargetDescriptor,
    /// Relative output path, see [`TargetDescriptor::file_name`]
    pub file_name: String,
    /// Path of the schema resource the unit was generated from
    pub source_path: String,
    pub code: String,
}

/// Stateless code generator.
///
/// Holds only configuration and the inflection rules; nothing is carried
/// from one target to the next.
pub struct Generator {
    config: GeneratorConfig,
    inflector: Box<dyn Inflector>,
}

impl Generator {
    /// Create a generator with English inflection rules extended by
    /// `config.inflections`.
    pub fn new(config: GeneratorConfig) -> Self {
        let inflector = Box::new(EnglishInflector::from_config(&config.inflections));
        Self { config, inflector }
    }

    /// Replace the inflection rules.
    pub fn with_inflector(mut self, inflector: impl Inflector + 'static) -> Self {
        self.inflector = Box::new(inflector);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Resolve names, keys and relationships without emitting.
    pub fn plan<'m>(
        &self,
        model: &'m DatabaseModel,
        target: &TargetDescriptor,
    ) -> Result<SchemaPlan<'m>, Vec<GenerateError>> {
        Planner::new(self.inflector.as_ref(), &self.config).plan(model, target)
    }

    /// Generate the unit for one target from an already-built model.
    pub fn generate(
        &self,
        model: &DatabaseModel,
        target: &TargetDescriptor,
    ) -> Result<String, Vec<GenerateError>> {
        let plan = self.plan(model, target)?;
        Ok(emit_unit(&plan, target, &self.config))
    }

    /// Run the pass over `targets`.
    ///
    /// Returns the units of the targets that succeeded, in target order.
    /// Failed targets emit nothing and are reported to `sink` as error
    /// diagnostics; keyless tables are reported as warnings.
    pub fn run<L, P, S>(
        &self,
        targets: &[TargetDescriptor],
        resources: &L,
        parser: &P,
        sink: &mut S,
    ) -> Vec<GeneratedUnit>
    where
        L: ResourceLookup + ?Sized,
        P: SchemaParser + ?Sized,
        S: DiagnosticSink + ?Sized,
    {
        let mut units = Vec::new();

        for target in targets {
            tracing::debug!(
                "Generating {} from '{}'",
                target.class_name,
                target.source
            );

            match self.run_target(target, resources, parser, sink) {
                Ok(unit) => {
                    tracing::debug!("Generated {} ({} bytes)", unit.file_name, unit.code.len());
                    units.push(unit);
                }
                Err(errors) => {
                    tracing::warn!(
                        "Target {} failed with {} error(s)",
                        target.class_name,
                        errors.len()
                    );
                }
            }
        }

        units
    }

    /// Generate one target, reporting every diagnostic it produces.
    ///
    /// Errors are reported to `sink` before being returned.
    fn run_target<L, P, S>(
        &self,
        target: &TargetDescriptor,
        resources: &L,
        parser: &P,
        sink: &mut S,
    ) -> Result<GeneratedUnit, Vec<GenerateError>>
    where
        L: ResourceLookup + ?Sized,
        P: SchemaParser + ?Sized,
        S: DiagnosticSink + ?Sized,
    {
        let report = |sink: &mut S, errors: Vec<GenerateError>, path: Option<&str>| {
            for error in &errors {
                let mut diagnostic = Diagnostic::from_error(error, &target.class_name);
                if diagnostic.location.is_none() {
                    diagnostic.location = path.map(SourceLocation::new);
                }
                sink.report(diagnostic);
            }
            errors
        };

        let resource = match resolve_source(resources, target) {
            Ok(resource) => resource,
            Err(error) => return Err(report(sink, vec![error], None)),
        };

        let model = match parser.parse(resource) {
            Ok(model) => model,
            Err(error) => {
                let error = error.into_generate_error(resource, &target.class_name);
                return Err(report(sink, vec![error], Some(&resource.path)));
            }
        };

        let plan = match self.plan(&model, target) {
            Ok(plan) => plan,
            Err(errors) => return Err(report(sink, errors, Some(&resource.path))),
        };

        for entity in plan.keyless_entities() {
            sink.report(
                Diagnostic::new(
                    DiagnosticCode::KeylessEntity,
                    format!(
                        "table '{}' has no primary key; entity '{}' is mapped as keyless",
                        entity.table.name, entity.name
                    ),
                )
                .with_location(SourceLocation::new(&resource.path))
                .for_target(&target.class_name),
            );
        }

        Ok(GeneratedUnit {
            target: target.clone(),
            file_name: target.file_name(),
            source_path: resource.path.clone(),
            code: emit_unit(&plan, target, &self.config),
        })
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

#[cfg(test)]
#[path = "generator/generator_tests.rs"]
mod generator_tests;
