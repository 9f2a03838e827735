//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `lamina-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `TemplateRoot`: Read-only template source
//!   - `TemplateCompiler` / `CompiledTemplate`: Template compilation and execution
//!
//! - **Driving (Input) Ports**: Called by the host framework, implemented by
//!   the application (`ViewRenderer` in `crate::application::view`)

pub mod output;

pub use output::{CompiledTemplate, TemplateCompiler, TemplateRoot, TemplateUnit};
