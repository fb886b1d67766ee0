pub mod repo_impl;
pub mod append;
pub mod load_audits;
pub mod load_history;
#[cfg(test)]
pub mod test_utils;

pub use repo_impl::UpdateLogRepositoryImpl;
