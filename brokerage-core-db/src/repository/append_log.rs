use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::{Identifiable, WorkspaceScoped};

/// Repository trait for append-only log tables
///
/// Entries are never updated or deleted once appended.
#[async_trait]
pub trait AppendLog<DB: Database, T: Identifiable + WorkspaceScoped>: Send + Sync {
    /// Append one entry to the log
    async fn append(&self, entry: &T) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
