//! Core domain layer for Lamina.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! All I/O and template compilation concerns are handled via ports (traits)
//! defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror
//! - **Immutable values**: All domain objects are Clone + PartialEq

pub mod config;
pub mod error;
pub mod name;

// Re-exports for convenience
pub use config::{EngineConfig, Extension, LoadMode};
pub use error::{DomainError, ErrorCategory};
pub use name::{ResolvedName, key_for_path, resolve};

/// Reserved partial name a layout uses as its insertion point.
///
/// Content templates are co-registered under this name inside every
/// layout-bearing bundle, so layouts are written as
/// `{{#> content}}fallback{{/content}}`.
pub const CONTENT_PARTIAL: &str = "content";
