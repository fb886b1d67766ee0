pub mod append_log;
pub mod create;
pub mod find_by_id;
pub mod load_audits;
pub mod load_history;
pub mod pagination;
pub mod record_repository;
pub mod update;

// Re-exports
pub use append_log::*;
pub use create::*;
pub use find_by_id::*;
pub use load_audits::*;
pub use load_history::*;
pub use pagination::*;
pub use record_repository::*;
pub use update::*;
