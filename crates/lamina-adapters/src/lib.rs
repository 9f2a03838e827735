//! Infrastructure adapters for Lamina.
//!
//! This crate implements the ports defined in `lamina-core::application::ports`.
//! It contains all external dependencies and I/O operations, plus wiring
//! helpers that assemble a ready [`lamina_core::application::Engine`].

pub mod compiler;
pub mod engine;
pub mod filesystem;

// Re-export commonly used adapters
pub use compiler::HandlebarsCompiler;
pub use filesystem::{LocalRoot, MemoryRoot};
