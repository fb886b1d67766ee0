pub mod repo_impl;
pub mod create;
pub mod find_by_id;
pub mod update;

pub use repo_impl::ContactRepositoryImpl;
