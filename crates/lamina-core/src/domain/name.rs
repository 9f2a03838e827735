//! Template name resolution.
//!
//! A template name is a relative, slash-separated path without its file
//! extension; the file it maps to is `name + extension` under the root.
//! A caller may pass the name *with* the extension attached, which marks the
//! request standalone: the configured layout is bypassed for that call.

use std::path::{Component, Path, PathBuf};

use super::error::DomainError;

/// Outcome of resolving a raw render-call name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// Cache key and file stem, extension stripped.
    pub key: String,
    /// True when the caller attached the extension (layout bypass).
    pub standalone: bool,
}

/// Resolve and validate a raw template name against the configured extension.
pub fn resolve(raw: &str, extension: &str) -> Result<ResolvedName, DomainError> {
    if raw.is_empty() {
        return Err(DomainError::EmptyTemplateName);
    }

    let (key, standalone) = match raw.strip_suffix(extension) {
        Some(stripped) => (stripped, true),
        None => (raw, false),
    };

    if key.is_empty() {
        return Err(DomainError::EmptyTemplateName);
    }

    let path = Path::new(key);
    if path.is_absolute() || key.starts_with('/') {
        return Err(DomainError::AbsoluteNameNotAllowed {
            name: raw.to_string(),
        });
    }
    for component in path.components() {
        if matches!(component, Component::ParentDir) {
            return Err(DomainError::NameEscapesRoot {
                name: raw.to_string(),
            });
        }
    }

    Ok(ResolvedName {
        key: key.to_string(),
        standalone,
    })
}

/// Derive the cache key for a walked file path, if it matches the extension.
///
/// Components are re-joined with `/` so keys are identical across platforms.
pub fn key_for_path(rel: &Path, extension: &str) -> Option<String> {
    let joined = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    joined.strip_suffix(extension).map(str::to_owned)
}

/// File path a template name maps to: `name + extension`, relative to root.
pub fn file_for(name: &str, extension: &str) -> PathBuf {
    PathBuf::from(format!("{name}{extension}"))
}
