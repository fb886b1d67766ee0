pub mod actor;
pub mod contact_service;
pub mod listing_service;
pub mod record_tracker;
pub mod repositories;
pub mod stage_transitioner;

// Re-exports
pub use actor::*;
pub use contact_service::*;
pub use listing_service::*;
pub use record_tracker::*;
pub use repositories::*;
pub use stage_transitioner::*;

use std::error::Error;
use std::sync::Arc;

use brokerage_core_api::{ApiError, ApiResult};
use sqlx::Database;
use uuid::Uuid;

pub(crate) fn db_error(error: Box<dyn Error + Send + Sync>) -> ApiError {
    ApiError::DatabaseError(error.to_string())
}

/// The mutation entry points and read projections, wired to one set of
/// repositories and one actor resolver.
pub struct TrackingServices<DB: Database> {
    pub listings: ListingService<DB>,
    pub contacts: ContactService<DB>,
    pub deals: StageTransitioner<DB>,
}

impl<DB: Database> TrackingServices<DB> {
    pub fn new(repositories: TrackingRepositories<DB>, actor: Arc<dyn ActorResolver>) -> Self {
        let audit = repositories.audit_logger();
        Self {
            listings: ListingService::new(RecordTracker::new(
                repositories.listings.clone(),
                repositories.update_logs.clone(),
                audit.clone(),
                actor.clone(),
            )),
            contacts: ContactService::new(RecordTracker::new(
                repositories.contacts.clone(),
                repositories.update_logs.clone(),
                audit.clone(),
                actor.clone(),
            )),
            deals: StageTransitioner::new(repositories.deals, audit, actor),
        }
    }

    pub async fn move_deal_stage(
        &self,
        workspace_id: Uuid,
        deal_id: Uuid,
        new_stage_id: Uuid,
    ) -> ApiResult<StageTransition> {
        self.deals.move_stage(workspace_id, deal_id, new_stage_id).await
    }
}
