//! Logging setup and the tracing-backed diagnostics sink

use anyhow::Result;
use schemagen_core::{Diagnostic, DiagnosticSink, Severity};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Level used when neither RUST_LOG, `--log-level` nor the manifest sets one
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

/// Parse a log level name
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        "off" => Ok(LevelFilter::OFF),
        other => anyhow::bail!("Invalid log level: '{}'", other),
    }
}

/// Build the filter: RUST_LOG wins, then `level`, then [`DEFAULT_LEVEL`].
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = match level {
        Some(level) => parse_level(level)?,
        None => DEFAULT_LEVEL,
    };

    Ok(EnvFilter::default().add_directive(level.into()))
}

/// Install the global fmt subscriber, writing to stderr.
///
/// Calling this again after a subscriber is installed is a no-op.
pub fn init(level: Option<&str>) -> Result<()> {
    let filter = build_filter(level)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();

    Ok(())
}

/// Diagnostics sink that logs each diagnostic at a level matching its
/// severity and keeps counts.
#[derive(Debug, Default)]
pub struct TracingSink {
    pub errors: usize,
    pub warnings: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        let target = diagnostic.target.as_deref().unwrap_or("-");

        match diagnostic.severity {
            Severity::Error => {
                self.errors += 1;
                tracing::error!("[{}] {}", target, diagnostic);
            }
            Severity::Warning => {
                self.warnings += 1;
                tracing::warn!("[{}] {}", target, diagnostic);
            }
            Severity::Info => {
                tracing::info!("[{}] {}", target, diagnostic);
            }
        }
    }
}
