pub mod models;
pub mod repository;
pub mod service;
pub mod tracking;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
