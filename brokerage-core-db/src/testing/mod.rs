//! In-memory repositories and fixtures for exercising the tracking services
//! without a database.

pub mod fixtures;
pub mod memory_store;

pub use memory_store::{Faults, MemoryStore};
