pub mod activity_log;
pub mod contact;
pub mod deal;
pub mod identifiable;
pub mod listing;
pub mod pipeline_stage_history;
pub mod price_history;
pub mod tracked_record;
pub mod update_log;

// Re-exports
pub use activity_log::*;
pub use contact::*;
pub use deal::*;
pub use identifiable::*;
pub use listing::*;
pub use pipeline_stage_history::*;
pub use price_history::*;
pub use tracked_record::*;
pub use update_log::*;
