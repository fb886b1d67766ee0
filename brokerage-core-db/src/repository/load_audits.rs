use async_trait::async_trait;
use brokerage_core_api::EntityType;
use sqlx::Database;
use uuid::Uuid;

use crate::models::update_log::UpdateLogModel;
use crate::repository::pagination::{Page, PageRequest};

/// Repository trait for loading the audit trail of a record with pagination
///
/// Entries are returned newest first.
///
/// # Example
/// ```ignore
/// use brokerage_core_db::repository::pagination::PageRequest;
///
/// let page = repo.load_audits(workspace_id, EntityType::Contact, contact_id, PageRequest::new(20, 0)).await?;
/// println!("Page {} of {}", page.page_number(), page.total_pages());
/// ```
#[async_trait]
pub trait LoadAudits<DB: Database>: Send + Sync {
    /// Load one page of update log entries for a record
    ///
    /// # Returns
    /// * `Ok(Page<UpdateLogModel>)` - The requested page and the total entry count
    /// * `Err` - An error if the entries could not be loaded
    async fn load_audits(
        &self,
        workspace_id: Uuid,
        entity_type: EntityType,
        record_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<UpdateLogModel>, Box<dyn std::error::Error + Send + Sync>>;
}
