pub mod activity_log_repository;
pub mod stage_history_repository;
pub mod update_log_repository;

pub use activity_log_repository::ActivityLogRepositoryImpl;
pub use stage_history_repository::StageHistoryRepositoryImpl;
pub use update_log_repository::UpdateLogRepositoryImpl;
