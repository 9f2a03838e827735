//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the engine needs from external systems.
//! The `lamina-adapters` crate provides implementations.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::LaminaResult;

/// Port for the read-only template source ("the root").
///
/// Implemented by:
/// - `lamina_adapters::filesystem::LocalRoot` (production, OS directory)
/// - `lamina_adapters::filesystem::MemoryRoot` (testing, embedded sets)
///
/// ## Design Notes
///
/// - All paths are relative to the root; absolute paths never cross this port
/// - The root is never written through; the engine owns no mutation API
/// - Read failures surface as `ApplicationError::RootIo` carrying the path
pub trait TemplateRoot: Send + Sync {
    /// Read the full contents of one file under the root.
    fn read(&self, path: &Path) -> LaminaResult<String>;

    /// List every file under the root, as paths relative to it.
    fn walk(&self) -> LaminaResult<Vec<PathBuf>>;

    /// Re-root into a subdirectory.
    ///
    /// Fails with `ApplicationError::RootNarrowing` when the directory is
    /// absent; callers treat that as a fatal construction error.
    fn narrow(&self, dir: &Path) -> LaminaResult<Box<dyn TemplateRoot>>;
}

impl std::fmt::Debug for dyn TemplateRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn TemplateRoot")
    }
}

/// One named template source handed to the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateUnit {
    pub name: String,
    pub source: String,
}

impl TemplateUnit {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Port for template compilation.
///
/// Implemented by:
/// - `lamina_adapters::compiler::HandlebarsCompiler`
pub trait TemplateCompiler: Send + Sync {
    /// Compile a set of named sources into one executable bundle.
    ///
    /// Units later in the slice may reference earlier ones (a layout unit
    /// plus its content unit). A syntax error fails the whole bundle with
    /// `ApplicationError::ParseFailed` naming the offending unit.
    fn compile(&self, units: &[TemplateUnit]) -> LaminaResult<Box<dyn CompiledTemplate>>;
}

/// An opaque, immutable, executable template bundle.
///
/// Produced once per cache key and shared across render calls; never
/// recompiled for the lifetime of the engine.
pub trait CompiledTemplate: Send + Sync {
    /// Execute the named entry point against `data`, writing to `out`.
    ///
    /// Runtime failures surface as `ApplicationError::ExecutionFailed`,
    /// deliberately not wrapped with the template name.
    fn execute(
        &self,
        entry: &str,
        data: &serde_json::Value,
        out: &mut dyn Write,
    ) -> LaminaResult<()>;
}

impl std::fmt::Debug for dyn CompiledTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn CompiledTemplate")
    }
}
