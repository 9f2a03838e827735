//! The hosting framework's view-rendering contract.
//!
//! Web frameworks hand their response pipeline a renderer with a fixed
//! signature that includes a request-scoped context argument. The engine
//! accepts that argument to satisfy the contract but never reads it; it is an
//! adapter boundary, not an input to the rendering core.

use std::collections::HashMap;
use std::io::Write;

use crate::error::LaminaResult;

/// Opaque request-scoped values the host may attach to a render call.
///
/// Carried for call-signature compatibility only; the engine ignores it.
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    values: HashMap<String, String>,
}

impl ViewContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a request-scoped value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Driving port: what the host framework calls to render a view.
///
/// Implemented by [`crate::application::Engine`].
pub trait ViewRenderer: Send + Sync {
    /// Render the named template with `data` into `out`.
    fn render(
        &self,
        out: &mut dyn Write,
        name: &str,
        data: &serde_json::Value,
        ctx: &ViewContext,
    ) -> LaminaResult<()>;
}
