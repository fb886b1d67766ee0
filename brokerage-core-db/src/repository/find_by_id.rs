use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::{Identifiable, WorkspaceScoped};

/// Generic repository trait for finding entities by their ID within a workspace
/// 
/// Returns an Option to handle cases where the entity does not exist or belongs
/// to another workspace. The two cases are indistinguishable to the caller.
/// 
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable and WorkspaceScoped
///
/// # Example
/// ```ignore
/// impl FindById<Postgres, ListingModel> for ListingRepositoryImpl {
///     async fn find_by_id(&self, workspace_id: Uuid, id: Uuid) -> Result<Option<ListingModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait FindById<DB: Database, T: Identifiable + WorkspaceScoped>: Send + Sync {
    /// Find an entity by its unique identifier
    /// 
    /// # Arguments
    /// * `workspace_id` - The workspace the entity must belong to
    /// * `id` - The UUID of the entity to find
    /// 
    /// # Returns
    /// * `Ok(Some(T))` - The found entity
    /// * `Ok(None)` - If the entity does not exist in this workspace
    /// * `Err` - An error if the query could not be executed
    async fn find_by_id(
        &self,
        workspace_id: Uuid,
        id: Uuid,
    ) -> Result<Option<T>, Box<dyn std::error::Error + Send + Sync>>;
}
