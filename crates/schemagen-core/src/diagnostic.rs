//! Structured diagnostics and the sink they are reported through.
//!
//! Every failure of the pass becomes a [`Diagnostic`]; nothing crosses the
//! generation boundary as a panic. Hosts decide what to do with diagnostics by
//! supplying a [`DiagnosticSink`].

use crate::error::GenerateError;
use std::fmt;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Stable diagnostic identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    SchemaParseFailure,
    AmbiguousSchemaSource,
    MissingSchemaSource,
    NamingCollision,
    UnsupportedRelationshipShape,
    UnknownRelationshipEndpoint,
    KeylessEntity,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::SchemaParseFailure => "SG001",
            DiagnosticCode::AmbiguousSchemaSource => "SG002",
            DiagnosticCode::MissingSchemaSource => "SG003",
            DiagnosticCode::NamingCollision => "SG004",
            DiagnosticCode::UnsupportedRelationshipShape => "SG005",
            DiagnosticCode::UnknownRelationshipEndpoint => "SG006",
            DiagnosticCode::KeylessEntity => "SG101",
        }
    }

    /// Default severity for this code
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::KeylessEntity => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position inside a schema resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub path: String,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl SourceLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
            if let Some(column) = self.column {
                write!(f, ":{column}")?;
            }
        }
        Ok(())
    }
}

/// A reported problem, attributed to a target where one is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    pub location: Option<SourceLocation>,
    /// Class name of the target the diagnostic belongs to
    pub target: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the code's default severity
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: message.into(),
            location: None,
            target: None,
        }
    }

    /// Convert an error raised while generating `target`
    pub fn from_error(error: &GenerateError, target: impl Into<String>) -> Self {
        let location = match error {
            GenerateError::SchemaParseFailure {
                path, line, column, ..
            } => Some(SourceLocation {
                path: path.clone(),
                line: *line,
                column: *column,
            }),
            _ => None,
        };

        Self {
            location,
            target: Some(target.into()),
            ..Self::new(error.code(), error.to_string())
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn for_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(location) = &self.location {
            write!(f, "{location}: ")?;
        }
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// Receiver for diagnostics produced by a generation pass
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
