use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::{Identifiable, WorkspaceScoped};

/// Generic repository trait for writing back a modified entity
///
/// The whole row is written in one statement, scoped by the entity's
/// workspace. There is no version check: the last writer wins.
///
/// # Example
/// ```ignore
/// impl Update<Postgres, ListingModel> for ListingRepositoryImpl {
///     async fn update(&self, item: &ListingModel) -> Result<ListingModel, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait Update<DB: Database, T: Identifiable + WorkspaceScoped>: Send + Sync {
    /// Write all columns of the item
    ///
    /// # Returns
    /// * `Ok(T)` - The stored entity
    /// * `Err` - An error if the row does not exist or could not be written
    async fn update(&self, item: &T) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
