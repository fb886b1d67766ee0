pub mod audit_logger;
pub mod change_detector;
pub mod days_on_market;
pub mod price_history;
pub mod timeline;

// Re-exports
pub use audit_logger::*;
pub use change_detector::*;
pub use days_on_market::*;
pub use price_history::*;
pub use timeline::*;
