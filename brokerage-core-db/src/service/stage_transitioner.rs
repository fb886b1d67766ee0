use std::sync::Arc;

use brokerage_core_api::{ActionType, ApiError, ApiResult, EntityType};
use chrono::Utc;
use serde_json::json;
use sqlx::Database;
use tracing::debug;
use uuid::Uuid;

use crate::models::activity_log::PendingActivity;
use crate::models::deal::DealModel;
use crate::models::pipeline_stage_history::PipelineStageHistoryModel;
use crate::repository::RecordRepository;
use crate::service::actor::ActorResolver;
use crate::service::db_error;
use crate::tracking::audit_logger::{AuditBatch, AuditLogger, AuditReport};

/// A deal after its pipeline stage was moved
#[derive(Debug, Clone)]
pub struct StageTransition {
    pub deal: DealModel,
    pub from_stage_id: Option<Uuid>,
    pub audit: AuditReport,
}

/// Moves deals between pipeline stages and records every move.
///
/// The stage is not checked against the deal side, and moving a deal to its
/// current stage is still recorded.
pub struct StageTransitioner<DB: Database> {
    deals: Arc<dyn RecordRepository<DB, DealModel>>,
    audit: AuditLogger<DB>,
    actor: Arc<dyn ActorResolver>,
}

impl<DB: Database> Clone for StageTransitioner<DB> {
    fn clone(&self) -> Self {
        Self {
            deals: self.deals.clone(),
            audit: self.audit.clone(),
            actor: self.actor.clone(),
        }
    }
}

impl<DB: Database> StageTransitioner<DB> {
    pub fn new(
        deals: Arc<dyn RecordRepository<DB, DealModel>>,
        audit: AuditLogger<DB>,
        actor: Arc<dyn ActorResolver>,
    ) -> Self {
        Self {
            deals,
            audit,
            actor,
        }
    }

    pub async fn move_stage(
        &self,
        workspace_id: Uuid,
        deal_id: Uuid,
        new_stage_id: Uuid,
    ) -> ApiResult<StageTransition> {
        let mut deal = self
            .deals
            .find_by_id(workspace_id, deal_id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ApiError::NotFound(format!("DEAL {deal_id} not found")))?;

        let actor = self.actor.current_actor_id();
        let at = Utc::now();
        let from_stage_id = deal.pipeline_stage_id;

        deal.pipeline_stage_id = Some(new_stage_id);
        deal.updated_at = at;
        let deal = self.deals.update(&deal).await.map_err(db_error)?;

        let mut batch = AuditBatch::new();
        batch.push_stage_history(PipelineStageHistoryModel {
            id: Uuid::new_v4(),
            workspace_id,
            deal_id,
            from_stage_id,
            to_stage_id: new_stage_id,
            changed_by: actor,
            changed_at: at,
        });
        batch.push_activity(
            PendingActivity {
                action_type: ActionType::StageChanged,
                description: format!("Moved {} to a new pipeline stage", deal.title),
                metadata: json!({
                    "from_stage_id": from_stage_id,
                    "to_stage_id": new_stage_id,
                }),
            }
            .into_model(EntityType::Deal, workspace_id, deal_id, actor, at),
        );
        let audit = self.audit.flush(batch).await;

        debug!(deal_id = %deal_id, to_stage_id = %new_stage_id, "Deal stage moved");

        Ok(StageTransition {
            deal,
            from_stage_id,
            audit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use sqlx::Postgres;
    use tokio_test::{assert_err, assert_ok};

    use crate::service::actor::FixedActor;
    use crate::service::TrackingServices;
    use crate::testing::fixtures::{sample_deal, OTHER_WORKSPACE_ID, WORKSPACE_ID};
    use crate::testing::MemoryStore;

    type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

    fn transitioner(store: &Arc<MemoryStore>, actor: Uuid) -> StageTransitioner<Postgres> {
        TrackingServices::new(store.repositories::<Postgres>(), Arc::new(FixedActor(actor))).deals
    }

    #[tokio::test]
    async fn test_move_stage_records_history_and_activity() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let lead = Uuid::new_v4();
        let viewing = Uuid::new_v4();
        let deal = sample_deal(Some(lead));
        store.insert_deal(deal.clone());
        let actor = Uuid::new_v4();

        let moved = transitioner(&store, actor)
            .move_stage(WORKSPACE_ID, deal.id, viewing)
            .await?;

        assert_eq!(moved.deal.pipeline_stage_id, Some(viewing));
        assert_eq!(moved.from_stage_id, Some(lead));
        assert_eq!(store.deal(deal.id).unwrap().pipeline_stage_id, Some(viewing));

        let history = store.stage_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].from_stage_id, Some(lead));
        assert_eq!(history[0].to_stage_id, viewing);
        assert_eq!(history[0].changed_by, Some(actor));

        let activities = store.activity_logs();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].action_type, ActionType::StageChanged);
        assert_eq!(activities[0].entity_type, EntityType::Deal);
        Ok(())
    }

    #[tokio::test]
    async fn test_moving_to_same_stage_is_still_recorded() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let stage = Uuid::new_v4();
        let deal = sample_deal(Some(stage));
        store.insert_deal(deal.clone());

        transitioner(&store, Uuid::new_v4())
            .move_stage(WORKSPACE_ID, deal.id, stage)
            .await?;

        assert_eq!(store.stage_history().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_deal_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let deal = sample_deal(None);
        store.insert_deal(deal.clone());
        let service = transitioner(&store, Uuid::new_v4());

        let missing = service.move_stage(WORKSPACE_ID, Uuid::new_v4(), Uuid::new_v4()).await;
        let foreign = service.move_stage(OTHER_WORKSPACE_ID, deal.id, Uuid::new_v4()).await;

        assert!(matches!(assert_err!(missing), ApiError::NotFound(_)));
        assert!(matches!(assert_err!(foreign), ApiError::NotFound(_)));
        assert_eq!(store.record_writes(), 0);
        assert!(store.stage_history().is_empty());
        assert!(store.activity_logs().is_empty());
    }

    #[tokio::test]
    async fn test_history_failure_keeps_stage_move() {
        let store = Arc::new(MemoryStore::new());
        let deal = sample_deal(None);
        store.insert_deal(deal.clone());
        store.faults().fail_stage_history(true);
        let stage = Uuid::new_v4();

        let moved = assert_ok!(
            transitioner(&store, Uuid::new_v4())
                .move_stage(WORKSPACE_ID, deal.id, stage)
                .await
        );

        assert_eq!(moved.audit, AuditReport { written: 1, failed: 1 });
        assert_eq!(store.deal(deal.id).unwrap().pipeline_stage_id, Some(stage));
        assert_eq!(store.activity_logs().len(), 1);
    }
}
