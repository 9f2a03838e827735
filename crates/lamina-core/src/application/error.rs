//! Application layer errors.
//!
//! These errors represent failures in the load/compile/execute pipeline, not
//! name or configuration rules. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while loading, compiling, or executing templates.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No compiled template exists under the requested key.
    #[error("template not found: {name}")]
    TemplateNotFound { name: String },

    /// The template's source file could not be opened or read.
    #[error("load {name} failed: {reason}")]
    LoadFailed { name: String, reason: String },

    /// The template's source text is malformed.
    #[error("parse {name} failed: {reason}")]
    ParseFailed { name: String, reason: String },

    /// The template runtime failed during execution (passed through unwrapped).
    #[error("template execution failed: {reason}")]
    ExecutionFailed { reason: String },

    /// Raw root I/O failure, carrying the file path rather than a template name.
    #[error("root I/O error at {path}: {reason}")]
    RootIo { path: PathBuf, reason: String },

    /// The root could not be narrowed to the requested subdirectory.
    #[error("cannot narrow template root to {dir}")]
    RootNarrowing { dir: PathBuf },

    /// Cache access failed (lock poisoned).
    #[error("template cache lock poisoned")]
    CacheLock,

    /// Render data could not be serialized for the template runtime.
    #[error("data serialization failed: {reason}")]
    DataSerialization { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { name } => vec![
                format!("No template compiled under '{}'", name),
                "Check the file exists under the root as name + extension".into(),
                "Eager engines only serve files present at first render".into(),
            ],
            Self::LoadFailed { name, .. } => vec![
                format!("Could not read the source for '{}'", name),
                "Check the file exists and is readable".into(),
            ],
            Self::ParseFailed { name, .. } => vec![
                format!("Template '{}' has a syntax error", name),
                "Fix the template source; the engine never retries a compile".into(),
            ],
            Self::RootNarrowing { dir } => vec![
                format!("Subdirectory not found in root: {}", dir.display()),
                "Engine construction should be treated as fatal at startup".into(),
            ],
            Self::CacheLock => vec![
                "The template cache lock was poisoned".into(),
                "Try again in a moment".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::LoadFailed { .. } | Self::ParseFailed { .. } => ErrorCategory::Validation,
            Self::RootNarrowing { .. } => ErrorCategory::Configuration,
            Self::ExecutionFailed { .. }
            | Self::RootIo { .. }
            | Self::CacheLock
            | Self::DataSerialization { .. } => ErrorCategory::Internal,
        }
    }
}
