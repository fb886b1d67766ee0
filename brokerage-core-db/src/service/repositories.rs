use std::sync::Arc;

use sqlx::Database;

use crate::models::{
    ActivityLogModel, ContactModel, DealModel, ListingModel, PipelineStageHistoryModel,
};
use crate::repository::{AppendLog, RecordRepository, UpdateLogRepository};

/// Every store the tracking services read from or write to
pub struct TrackingRepositories<DB: Database> {
    pub listings: Arc<dyn RecordRepository<DB, ListingModel>>,
    pub contacts: Arc<dyn RecordRepository<DB, ContactModel>>,
    pub deals: Arc<dyn RecordRepository<DB, DealModel>>,
    pub update_logs: Arc<dyn UpdateLogRepository<DB>>,
    pub activity_logs: Arc<dyn AppendLog<DB, ActivityLogModel>>,
    pub stage_history: Arc<dyn AppendLog<DB, PipelineStageHistoryModel>>,
}

// Manual impl: a derive would require `DB: Clone`
impl<DB: Database> Clone for TrackingRepositories<DB> {
    fn clone(&self) -> Self {
        Self {
            listings: self.listings.clone(),
            contacts: self.contacts.clone(),
            deals: self.deals.clone(),
            update_logs: self.update_logs.clone(),
            activity_logs: self.activity_logs.clone(),
            stage_history: self.stage_history.clone(),
        }
    }
}

impl<DB: Database> TrackingRepositories<DB> {
    pub fn audit_logger(&self) -> crate::tracking::AuditLogger<DB> {
        crate::tracking::AuditLogger::new(
            self.update_logs.clone(),
            self.activity_logs.clone(),
            self.stage_history.clone(),
        )
    }
}
