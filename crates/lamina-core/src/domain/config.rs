//! Engine configuration value objects.
//!
//! Fixed at construction time; an [`EngineConfig`] is never mutated for the
//! lifetime of the engine it configures.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::name;

/// Caching policy for compiled templates.
///
/// One engine type, strategy selected by flag: `Lazy` compiles each template
/// on its first request, `Eager` walks the whole root on the first render and
/// compiles everything up front.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadMode {
    #[default]
    Lazy,
    Eager,
}

/// Validated file-name extension, e.g. `".html"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension(String);

impl Extension {
    /// Validate and wrap an extension string.
    ///
    /// Must start with a dot and carry at least one character after it.
    pub fn new(extension: impl Into<String>) -> Result<Self, DomainError> {
        let extension = extension.into();
        if !extension.starts_with('.') {
            return Err(DomainError::InvalidExtension {
                extension,
                reason: "must start with '.'".into(),
            });
        }
        if extension.len() < 2 {
            return Err(DomainError::InvalidExtension {
                extension,
                reason: "missing suffix after '.'".into(),
            });
        }
        Ok(Self(extension))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Extension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    extension: Extension,
    layout: Option<String>,
    mode: LoadMode,
}

impl EngineConfig {
    /// Build a validated configuration.
    ///
    /// `layout` of `None` or `Some("")` means "no layout"; a present layout
    /// name must be a clean relative name (no `..`, not absolute).
    pub fn new(
        extension: impl Into<String>,
        layout: Option<&str>,
        mode: LoadMode,
    ) -> Result<Self, DomainError> {
        let extension = Extension::new(extension)?;
        let layout = match layout {
            None | Some("") => None,
            Some(l) => {
                name::resolve(l, extension.as_str()).map_err(|e| DomainError::InvalidLayout {
                    layout: l.to_string(),
                    reason: e.to_string(),
                })?;
                Some(l.to_string())
            }
        };
        Ok(Self {
            extension,
            layout,
            mode,
        })
    }

    pub fn extension(&self) -> &str {
        self.extension.as_str()
    }

    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_requires_leading_dot() {
        assert!(Extension::new(".html").is_ok());
        assert!(matches!(
            Extension::new("html"),
            Err(DomainError::InvalidExtension { .. })
        ));
        assert!(matches!(
            Extension::new("."),
            Err(DomainError::InvalidExtension { .. })
        ));
    }

    #[test]
    fn empty_layout_means_none() {
        let config = EngineConfig::new(".html", Some(""), LoadMode::Lazy).unwrap();
        assert_eq!(config.layout(), None);

        let config = EngineConfig::new(".html", None, LoadMode::Lazy).unwrap();
        assert_eq!(config.layout(), None);
    }

    #[test]
    fn layout_name_is_validated() {
        let config = EngineConfig::new(".html", Some("layout/main"), LoadMode::Lazy).unwrap();
        assert_eq!(config.layout(), Some("layout/main"));

        assert!(matches!(
            EngineConfig::new(".html", Some("../outside"), LoadMode::Lazy),
            Err(DomainError::InvalidLayout { .. })
        ));
    }
}
