//! Filesystem access layer
//!
//! The classifier never touches `std::fs` directly. Everything goes through
//! the [`FileSystemGateway`] trait so the same predicates run against a real
//! disk ([`LocalFileSystem`]) or an in-memory tree ([`MemoryFileSystem`]).

mod local;
mod memory;
mod traits;

pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;
pub use traits::{leaf_name, FileEntry, FileSystemGateway, GatewayResult};
