use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::{Identifiable, WorkspaceScoped};

/// Generic repository trait for inserting a single entity
///
/// # Example
/// ```ignore
/// impl Create<Postgres, ContactModel> for ContactRepositoryImpl {
///     async fn create(&self, item: &ContactModel) -> Result<ContactModel, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait Create<DB: Database, T: Identifiable + WorkspaceScoped>: Send + Sync {
    /// Insert the item as a new row
    ///
    /// # Returns
    /// * `Ok(T)` - The stored entity
    /// * `Err` - An error if the row could not be inserted
    async fn create(&self, item: &T) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
