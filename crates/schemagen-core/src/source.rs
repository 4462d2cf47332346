//! Schema resources and the collaborators that locate and parse them.
//!
//! The core never reads files. A host hands over the available resources
//! through [`ResourceLookup`] and a [`SchemaParser`] that turns resource text
//! into a [`DatabaseModel`].

use crate::error::{GenerateError, GenerateResult};
use crate::model::{DatabaseModel, TargetDescriptor};
use thiserror::Error;

/// An available schema resource: its path and full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaResource {
    pub path: String,
    pub content: String,
}

impl SchemaResource {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Whether this resource's path ends with `source_id`.
    ///
    /// Separators are normalised to `/` and the comparison is
    /// case-insensitive. This is a plain string suffix, so `log.json` matches
    /// `schemas/blog.json` as well as `schemas/log.json`.
    pub fn matches(&self, source_id: &str) -> bool {
        let id = normalize(source_id);
        !id.is_empty() && normalize(&self.path).ends_with(&id)
    }

    /// Whether this resource's file name equals the file name of `source_id`,
    /// ignoring case and any directories on either side.
    pub fn matches_file_name(&self, source_id: &str) -> bool {
        let id = normalize(source_id);
        let name = file_name(&id);
        !name.is_empty() && file_name(&normalize(&self.path)) == name
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/").to_lowercase()
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Source of the schema resources available to a pass.
pub trait ResourceLookup {
    /// All available resources, in discovery order.
    fn resources(&self) -> &[SchemaResource];
}

impl ResourceLookup for [SchemaResource] {
    fn resources(&self) -> &[SchemaResource] {
        self
    }
}

impl ResourceLookup for Vec<SchemaResource> {
    fn resources(&self) -> &[SchemaResource] {
        self.as_slice()
    }
}

/// Locate the single resource a target asks for.
///
/// Resources whose path ends with the identifier are tried first. When none
/// does, resources with the same file name are tried instead, so
/// `schema/blog.json` still finds `db/blog.json`. Zero matches is
/// [`GenerateError::MissingSchemaSource`]; more than one at the deciding step
/// is [`GenerateError::AmbiguousSchemaSource`].
pub fn resolve_source<'r, L>(
    lookup: &'r L,
    target: &TargetDescriptor,
) -> GenerateResult<&'r SchemaResource>
where
    L: ResourceLookup + ?Sized,
{
    let resources = lookup.resources();
    let mut matches: Vec<&SchemaResource> = resources
        .iter()
        .filter(|r| r.matches(&target.source))
        .collect();

    if matches.is_empty() {
        matches = resources
            .iter()
            .filter(|r| r.matches_file_name(&target.source))
            .collect();
        if !matches.is_empty() {
            tracing::debug!(
                source = %target.source,
                "no resource path ends with the source, matched by file name"
            );
        }
    }

    match matches.as_slice() {
        [single] => Ok(*single),
        [] => Err(GenerateError::MissingSchemaSource {
            source_id: target.source.clone(),
            target: target.class_name.clone(),
        }),
        many => Err(GenerateError::AmbiguousSchemaSource {
            source_id: target.source.clone(),
            target: target.class_name.clone(),
            candidates: many.iter().map(|r| r.path.clone()).collect(),
        }),
    }
}

/// Error reported by a [`SchemaParser`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SchemaParseError {
    pub message: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl SchemaParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Attach the resource and target this failure belongs to.
    pub fn into_generate_error(self, resource: &SchemaResource, target: &str) -> GenerateError {
        GenerateError::SchemaParseFailure {
            path: resource.path.clone(),
            target: target.to_string(),
            message: self.message,
            line: self.line,
            column: self.column,
        }
    }
}

/// Turns schema text into a [`DatabaseModel`].
pub trait SchemaParser {
    fn parse(&self, resource: &SchemaResource) -> Result<DatabaseModel, SchemaParseError>;
}

impl<F> SchemaParser for F
where
    F: Fn(&SchemaResource) -> Result<DatabaseModel, SchemaParseError>,
{
    fn parse(&self, resource: &SchemaResource) -> Result<DatabaseModel, SchemaParseError> {
        self(resource)
    }
}

/// Parser for the JSON hand-over format (the serde form of [`DatabaseModel`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaParser;

impl SchemaParser for JsonSchemaParser {
    fn parse(&self, resource: &SchemaResource) -> Result<DatabaseModel, SchemaParseError> {
        serde_json::from_str(&resource.content).map_err(|e| {
            let line = u32::try_from(e.line()).unwrap_or(u32::MAX);
            let column = u32::try_from(e.column()).unwrap_or(u32::MAX);
            SchemaParseError::new(e.to_string()).at(line, column)
        })
    }
}
