pub mod repo_impl;
pub mod append;

pub use repo_impl::StageHistoryRepositoryImpl;
