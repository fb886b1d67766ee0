use async_trait::async_trait;
use brokerage_core_api::EntityType;
use sqlx::Database;
use uuid::Uuid;

use crate::models::update_log::UpdateLogModel;

/// Repository trait for reading the update log of one record in
/// chronological order
///
/// # Example
/// ```ignore
/// let status_changes = repo
///     .load_history(workspace_id, EntityType::Listing, listing_id, Some("status"))
///     .await?;
/// let timeline = build_timeline(&status_changes, "ACTIVE", Utc::now());
/// ```
#[async_trait]
pub trait LoadHistory<DB: Database>: Send + Sync {
    /// Load all update log entries for a record, oldest first
    ///
    /// # Arguments
    /// * `field` - Restrict to entries for this column name
    async fn load_history(
        &self,
        workspace_id: Uuid,
        entity_type: EntityType,
        record_id: Uuid,
        field: Option<&str>,
    ) -> Result<Vec<UpdateLogModel>, Box<dyn std::error::Error + Send + Sync>>;
}
