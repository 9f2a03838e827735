//! Application services.

mod engine;

pub use engine::Engine;
