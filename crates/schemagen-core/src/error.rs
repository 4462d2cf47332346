//! Error types for the generation pass

use crate::diagnostic::DiagnosticCode;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Failure that prevents code from being emitted for one target
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// No available resource matches the target's source identifier
    #[error("no schema resource matches '{source_id}' (target '{target}')")]
    MissingSchemaSource { source_id: String, target: String },

    /// More than one available resource matches the target's source identifier
    #[error(
        "schema source '{source_id}' is ambiguous (target '{target}'): matches {}",
        .candidates.join(", ")
    )]
    AmbiguousSchemaSource {
        source_id: String,
        target: String,
        candidates: Vec<String>,
    },

    /// The parser collaborator rejected the resource
    #[error("failed to parse schema resource '{path}' (target '{target}'): {message}")]
    SchemaParseFailure {
        path: String,
        target: String,
        message: String,
        line: Option<u32>,
        column: Option<u32>,
    },

    /// Two members or types resolve to the same name
    #[error("name '{name}' in {scope} is produced by both {first} and {second}")]
    NamingCollision {
        scope: String,
        name: String,
        first: String,
        second: String,
    },

    /// Referencing and referenced column lists cannot be paired
    #[error(
        "relationship {relationship} has {left_arity} referencing and {right_arity} referenced columns"
    )]
    UnsupportedRelationshipShape {
        relationship: String,
        left_arity: usize,
        right_arity: usize,
    },

    /// A relationship names a table or column that does not exist
    #[error("relationship {relationship} references unknown {what}")]
    UnknownRelationshipEndpoint { relationship: String, what: String },
}

impl GenerateError {
    /// Stable diagnostic code for this error
    pub fn code(&self) -> DiagnosticCode {
        match self {
            GenerateError::SchemaParseFailure { .. } => DiagnosticCode::SchemaParseFailure,
            GenerateError::AmbiguousSchemaSource { .. } => DiagnosticCode::AmbiguousSchemaSource,
            GenerateError::MissingSchemaSource { .. } => DiagnosticCode::MissingSchemaSource,
            GenerateError::NamingCollision { .. } => DiagnosticCode::NamingCollision,
            GenerateError::UnsupportedRelationshipShape { .. } => {
                DiagnosticCode::UnsupportedRelationshipShape
            }
            GenerateError::UnknownRelationshipEndpoint { .. } => {
                DiagnosticCode::UnknownRelationshipEndpoint
            }
        }
    }
}
