//! Handlebars-backed template compiler.
//!
//! Each compiled bundle is its own `Handlebars` registry holding the unit
//! set it was compiled from. Partial resolution inside a bundle is what
//! implements layout insertion: a layout template written as
//! `{{#> content}}fallback{{/content}}` picks up the content unit the engine
//! registered under the reserved `content` name, and falls back to its block
//! body when rendering standalone bundles.

use std::io::Write;

use handlebars::Handlebars;

use lamina_core::{
    application::{
        ApplicationError,
        ports::{CompiledTemplate, TemplateCompiler, TemplateUnit},
    },
    error::LaminaResult,
};

/// Compiler adapter delegating parse and execution to the `handlebars` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlebarsCompiler {
    strict: bool,
}

impl HandlebarsCompiler {
    /// Create a compiler with default (lenient) field lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a compiler that fails execution on missing data fields.
    pub fn strict() -> Self {
        Self { strict: true }
    }
}

impl TemplateCompiler for HandlebarsCompiler {
    fn compile(&self, units: &[TemplateUnit]) -> LaminaResult<Box<dyn CompiledTemplate>> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(self.strict);

        for unit in units {
            registry
                .register_template_string(&unit.name, &unit.source)
                .map_err(|e| ApplicationError::ParseFailed {
                    name: unit.name.clone(),
                    reason: e.to_string(),
                })?;
        }

        Ok(Box::new(CompiledBundle { registry }))
    }
}

struct CompiledBundle {
    registry: Handlebars<'static>,
}

impl CompiledTemplate for CompiledBundle {
    fn execute(
        &self,
        entry: &str,
        data: &serde_json::Value,
        out: &mut dyn Write,
    ) -> LaminaResult<()> {
        self.registry
            .render_to_write(entry, data, out)
            .map_err(|e| {
                ApplicationError::ExecutionFailed {
                    reason: e.to_string(),
                }
                .into()
            })
    }
}
