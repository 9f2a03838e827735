//! Engine wiring helpers.
//!
//! Assemble a ready [`Engine`] from the adapters in this crate. Hosts with
//! custom roots or compilers can wire `Engine::new` themselves; these cover
//! the two standard constructions: an OS directory, and a pre-built root
//! narrowed to a subdirectory (e.g. an embedded template set).

use std::path::Path;

use tracing::debug;

use lamina_core::{
    application::{Engine, ports::TemplateRoot},
    domain::{EngineConfig, LoadMode},
    error::LaminaResult,
};

use crate::{compiler::HandlebarsCompiler, filesystem::LocalRoot};

/// Engine over an OS directory.
///
/// `layout` of `None` (or `Some("")`) disables the layout. The directory is
/// not checked for existence here; a missing directory surfaces as a load
/// error (lazy) or walk error (eager) on first render.
pub fn from_directory(
    directory: impl AsRef<Path>,
    layout: Option<&str>,
    extension: &str,
    mode: LoadMode,
) -> LaminaResult<Engine> {
    let config = EngineConfig::new(extension, layout, mode)?;
    debug!(directory = %directory.as_ref().display(), "building engine over local directory");
    Ok(Engine::new(
        Box::new(LocalRoot::new(directory.as_ref())),
        Box::new(HandlebarsCompiler::new()),
        config,
    ))
}

/// Engine over an existing root, narrowed to `subdirectory` first.
///
/// Narrowing failure aborts construction; callers treat it as fatal at
/// startup rather than continuing with a broken engine.
pub fn from_root(
    root: &dyn TemplateRoot,
    subdirectory: impl AsRef<Path>,
    layout: Option<&str>,
    extension: &str,
    mode: LoadMode,
) -> LaminaResult<Engine> {
    let config = EngineConfig::new(extension, layout, mode)?;
    let narrowed = root.narrow(subdirectory.as_ref())?;
    debug!(subdirectory = %subdirectory.as_ref().display(), "building engine over narrowed root");
    Ok(Engine::new(
        narrowed,
        Box::new(HandlebarsCompiler::new()),
        config,
    ))
}
