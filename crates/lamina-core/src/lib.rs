//! Lamina Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Lamina
//! view engine, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        Host web framework               │
//! │   (Calls the ViewRenderer contract)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Service             │
//! │              (Engine)                   │
//! │   Resolve name → fetch/compile → exec   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (TemplateRoot, TemplateCompiler)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    lamina-adapters (Infrastructure)     │
//! │  (LocalRoot, MemoryRoot, Handlebars)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │   (EngineConfig, LoadMode, names)       │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lamina_core::{
//!     application::Engine,
//!     domain::{EngineConfig, LoadMode},
//! };
//!
//! // 1. Describe the engine
//! let config = EngineConfig::new(".html", Some("layout/main"), LoadMode::Lazy).unwrap();
//!
//! // 2. Wire in adapters (root + compiler) and render
//! let engine = Engine::new(root, compiler, config);
//! let mut out = Vec::new();
//! engine.render(&mut out, "index", &serde_json::json!({"title": "Home"})).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Engine,
        ports::{CompiledTemplate, TemplateCompiler, TemplateRoot, TemplateUnit},
        view::{ViewContext, ViewRenderer},
    };
    pub use crate::domain::{EngineConfig, LoadMode, ResolvedName};
    pub use crate::error::{LaminaError, LaminaResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
