use std::sync::Arc;

use brokerage_core_api::{
    ActionType, ApiError, ApiResult, RecordPatch, TrackedField, TrackedValue,
};
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::Database;
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::models::activity_log::PendingActivity;
use crate::models::tracked_record::TrackedRecord;
use crate::models::update_log::UpdateLogModel;
use crate::repository::{Page, PageRequest, RecordRepository, UpdateLogRepository};
use crate::service::actor::ActorResolver;
use crate::service::db_error;
use crate::tracking::audit_logger::{update_log_entry, AuditBatch, AuditLogger, AuditReport};
use crate::tracking::change_detector::{detect_record_changes, FieldChange};

/// Result of a create or update on a tracked record
#[derive(Debug, Clone)]
pub struct MutationOutcome<R: TrackedRecord> {
    pub record: R,
    pub changes: Vec<FieldChange<R::Field>>,
    /// False when the mutation was a no-op and nothing was written
    pub persisted: bool,
    pub audit: AuditReport,
}

/// Runs creates and partial updates of one record type through change
/// detection and audit logging.
pub struct RecordTracker<DB: Database, R: TrackedRecord> {
    records: Arc<dyn RecordRepository<DB, R>>,
    update_logs: Arc<dyn UpdateLogRepository<DB>>,
    audit: AuditLogger<DB>,
    actor: Arc<dyn ActorResolver>,
}

impl<DB: Database, R: TrackedRecord> Clone for RecordTracker<DB, R> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            update_logs: self.update_logs.clone(),
            audit: self.audit.clone(),
            actor: self.actor.clone(),
        }
    }
}

impl<DB: Database, R: TrackedRecord> RecordTracker<DB, R> {
    pub fn new(
        records: Arc<dyn RecordRepository<DB, R>>,
        update_logs: Arc<dyn UpdateLogRepository<DB>>,
        audit: AuditLogger<DB>,
        actor: Arc<dyn ActorResolver>,
    ) -> Self {
        Self {
            records,
            update_logs,
            audit,
            actor,
        }
    }

    pub fn current_actor(&self) -> Option<Uuid> {
        self.actor.current_actor_id()
    }

    /// Inserts a new record and seeds its audit trail with the initial
    /// status and a CREATED activity.
    pub async fn create(&self, record: R, at: DateTime<Utc>) -> ApiResult<MutationOutcome<R>> {
        let actor = self.current_actor();
        let stored = self.records.create(&record).await.map_err(db_error)?;

        let mut batch = AuditBatch::new();
        let status_field = <R::Field as TrackedField>::TRACKED
            .iter()
            .copied()
            .find(|field| field.is_status());
        if let (Some(field), Some(status)) = (status_field, stored.status_label()) {
            let seed = FieldChange {
                field,
                old_value: TrackedValue::Null,
                new_value: TrackedValue::Enum(status.clone()),
            };
            batch.push_update_log(update_log_entry(&stored, Some(status), &seed, actor, at));
        }
        batch.push_activity(created_activity(&stored).into_model(
            R::ENTITY_TYPE,
            stored.get_workspace_id(),
            stored.get_id(),
            actor,
            at,
        ));

        let audit = self.audit.flush(batch).await;
        debug!(record_id = %stored.get_id(), entity_type = R::ENTITY_TYPE.as_str(), "Record created");

        Ok(MutationOutcome {
            record: stored,
            changes: Vec::new(),
            persisted: true,
            audit,
        })
    }

    /// Applies a partial update. Every changed tracked field produces one
    /// update log row and one activity entry.
    pub async fn update(
        &self,
        workspace_id: Uuid,
        id: Uuid,
        patch: &R::Patch,
    ) -> ApiResult<MutationOutcome<R>> {
        patch.validate()?;
        let current = self.load(workspace_id, id).await?;
        self.apply(current, patch).await
    }

    /// Sets a single field. Writes nothing when the value is unchanged.
    pub async fn update_field(
        &self,
        workspace_id: Uuid,
        id: Uuid,
        field: R::Field,
        value: TrackedValue,
    ) -> ApiResult<MutationOutcome<R>> {
        let patch = R::Patch::from_field(field, value)?;
        patch.validate()?;
        let current = self.load(workspace_id, id).await?;

        // Compared after parsing so text like "1250000.00" matches a stored 1250000
        let unchanged = patch
            .proposed_values()
            .iter()
            .all(|(field, proposed)| current.tracked_value(*field).same_as(proposed));
        if unchanged {
            debug!(record_id = %id, field = field.column(), "Value unchanged, skipping update");
            return Ok(MutationOutcome {
                record: current,
                changes: Vec::new(),
                persisted: false,
                audit: AuditReport::default(),
            });
        }
        self.apply(current, &patch).await
    }

    /// Update log of one record, newest first
    pub async fn audit_trail(
        &self,
        workspace_id: Uuid,
        id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<UpdateLogModel>> {
        self.update_logs
            .load_audits(workspace_id, R::ENTITY_TYPE, id, page)
            .await
            .map_err(db_error)
    }

    /// Changes to one field of a record, oldest first
    pub async fn field_history(
        &self,
        workspace_id: Uuid,
        id: Uuid,
        field: R::Field,
    ) -> ApiResult<Vec<UpdateLogModel>> {
        self.update_logs
            .load_history(workspace_id, R::ENTITY_TYPE, id, Some(field.column()))
            .await
            .map_err(db_error)
    }

    pub async fn load(&self, workspace_id: Uuid, id: Uuid) -> ApiResult<R> {
        self.records
            .find_by_id(workspace_id, id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ApiError::NotFound(format!("{} {id} not found", R::ENTITY_TYPE)))
    }

    async fn apply(&self, current: R, patch: &R::Patch) -> ApiResult<MutationOutcome<R>> {
        let actor = self.current_actor();
        let at = Utc::now();
        let changes = detect_record_changes(&current, patch);

        let mut next = current.clone();
        next.apply_patch(patch)?;
        next.derive_fields(&current, &changes, actor, at);
        next.touch(at);
        let side_activities = next.side_activities(&current, patch);

        let stored = self.records.update(&next).await.map_err(db_error)?;

        let mut batch = AuditBatch::new();
        for change in &changes {
            batch.push_field_change(&current, change, actor, at);
        }
        for activity in side_activities {
            batch.push_activity(activity.into_model(
                R::ENTITY_TYPE,
                stored.get_workspace_id(),
                stored.get_id(),
                actor,
                at,
            ));
        }
        let audit = self.audit.flush(batch).await;

        debug!(
            record_id = %stored.get_id(),
            changes = changes.len(),
            audit_failures = audit.failed,
            "Record updated"
        );

        Ok(MutationOutcome {
            record: stored,
            changes,
            persisted: true,
            audit,
        })
    }
}

fn created_activity<R: TrackedRecord>(record: &R) -> PendingActivity {
    let entity = R::ENTITY_TYPE.as_str().to_lowercase();
    PendingActivity {
        action_type: ActionType::Created,
        description: format!("Created {entity} {}", record.display_name()),
        metadata: json!({ "status": record.status_label() }),
    }
}
