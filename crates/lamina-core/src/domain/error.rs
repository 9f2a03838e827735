use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for host display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("template name is empty")]
    EmptyTemplateName,

    #[error("absolute template names not allowed: {name}")]
    AbsoluteNameNotAllowed { name: String },

    #[error("template name escapes the root: {name}")]
    NameEscapesRoot { name: String },

    #[error("invalid extension '{extension}': {reason}")]
    InvalidExtension { extension: String, reason: String },

    #[error("invalid layout name '{layout}': {reason}")]
    InvalidLayout { layout: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyTemplateName => vec![
                "Pass a non-empty template name to render".into(),
                "Template names map to files as name + extension".into(),
            ],
            Self::AbsoluteNameNotAllowed { name } => vec![
                format!("'{}' is absolute", name),
                "Template names are resolved relative to the configured root".into(),
            ],
            Self::NameEscapesRoot { name } => vec![
                format!("'{}' contains '..' components", name),
                "Templates outside the root cannot be rendered".into(),
            ],
            Self::InvalidExtension { .. } => vec![
                "Extensions must start with a dot, e.g. \".html\"".into(),
            ],
            Self::InvalidLayout { .. } => vec![
                "The layout name is a plain relative template name, e.g. \"layout/main\"".into(),
                "Pass None (or an empty string) to disable the layout".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyTemplateName
            | Self::AbsoluteNameNotAllowed { .. }
            | Self::NameEscapesRoot { .. } => ErrorCategory::Validation,
            Self::InvalidExtension { .. } | Self::InvalidLayout { .. } => {
                ErrorCategory::Configuration
            }
        }
    }
}

/// Error categories for host display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}
