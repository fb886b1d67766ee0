use std::sync::Arc;

use brokerage_core_db::service::{ActorResolver, TrackingRepositories, TrackingServices};
use sqlx::{PgPool, Postgres};

use crate::repository::record::{ContactRepositoryImpl, DealRepositoryImpl, ListingRepositoryImpl};
use crate::repository::tracking::{
    ActivityLogRepositoryImpl, StageHistoryRepositoryImpl, UpdateLogRepositoryImpl,
};

/// Every Postgres-backed repository, sharing one connection pool
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
    pub listing_repository: Arc<ListingRepositoryImpl>,
    pub contact_repository: Arc<ContactRepositoryImpl>,
    pub deal_repository: Arc<DealRepositoryImpl>,
    pub update_log_repository: Arc<UpdateLogRepositoryImpl>,
    pub activity_log_repository: Arc<ActivityLogRepositoryImpl>,
    pub stage_history_repository: Arc<StageHistoryRepositoryImpl>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            listing_repository: Arc::new(ListingRepositoryImpl::new(pool.clone())),
            contact_repository: Arc::new(ContactRepositoryImpl::new(pool.clone())),
            deal_repository: Arc::new(DealRepositoryImpl::new(pool.clone())),
            update_log_repository: Arc::new(UpdateLogRepositoryImpl::new(pool.clone())),
            activity_log_repository: Arc::new(ActivityLogRepositoryImpl::new(pool.clone())),
            stage_history_repository: Arc::new(StageHistoryRepositoryImpl::new(pool.clone())),
            pool,
        }
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    /// The repositories as the trait objects the tracking services consume
    pub fn tracking_repositories(&self) -> TrackingRepositories<Postgres> {
        TrackingRepositories {
            listings: self.listing_repository.clone(),
            contacts: self.contact_repository.clone(),
            deals: self.deal_repository.clone(),
            update_logs: self.update_log_repository.clone(),
            activity_logs: self.activity_log_repository.clone(),
            stage_history: self.stage_history_repository.clone(),
        }
    }

    pub fn services(&self, actor: Arc<dyn ActorResolver>) -> TrackingServices<Postgres> {
        TrackingServices::new(self.tracking_repositories(), actor)
    }
}
