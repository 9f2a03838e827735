//! Application layer for Lamina.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (Engine)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Name and configuration rules live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;
pub mod view;

// Re-export main service
pub use services::Engine;

// Re-export port traits (for adapter implementation)
pub use ports::{CompiledTemplate, TemplateCompiler, TemplateRoot, TemplateUnit};

// Re-export the host-framework contract
pub use view::{ViewContext, ViewRenderer};

pub use error::ApplicationError;
