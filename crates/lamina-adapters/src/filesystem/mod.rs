//! Template root adapters.

mod local;
mod memory;

pub use local::LocalRoot;
pub use memory::MemoryRoot;
