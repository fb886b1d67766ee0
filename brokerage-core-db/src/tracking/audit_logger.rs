use std::sync::Arc;

use brokerage_core_api::{ActionType, TrackedField, TrackedValue};
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::Database;
use tracing::warn;
use uuid::Uuid;

use crate::models::activity_log::{ActivityLogModel, PendingActivity};
use crate::models::pipeline_stage_history::PipelineStageHistoryModel;
use crate::models::tracked_record::TrackedRecord;
use crate::models::update_log::UpdateLogModel;
use crate::repository::{AppendLog, UpdateLogRepository};
use crate::tracking::change_detector::FieldChange;
use crate::utils::truncated_string;

/// One best-effort audit write waiting for the primary write to succeed
#[derive(Debug, Clone, PartialEq)]
pub enum AuditWrite {
    FieldChange(UpdateLogModel),
    Activity(ActivityLogModel),
    StageHistory(PipelineStageHistoryModel),
}

impl AuditWrite {
    fn kind(&self) -> &'static str {
        match self {
            AuditWrite::FieldChange(_) => "update_log",
            AuditWrite::Activity(_) => "activity_log",
            AuditWrite::StageHistory(_) => "pipeline_stage_history",
        }
    }

    fn subject_id(&self) -> Uuid {
        match self {
            AuditWrite::FieldChange(entry) => entry.record_id,
            AuditWrite::Activity(entry) => entry.entity_id,
            AuditWrite::StageHistory(entry) => entry.deal_id,
        }
    }
}

/// Audit writes collected during one mutation, drained in insertion order
/// by [`AuditLogger::flush`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditBatch {
    writes: Vec<AuditWrite>,
}

impl AuditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the update log row and the activity entry for one change.
    /// `before` is the record as it was when the change was detected.
    pub fn push_field_change<R: TrackedRecord>(
        &mut self,
        before: &R,
        change: &FieldChange<R::Field>,
        actor: Option<Uuid>,
        at: DateTime<Utc>,
    ) {
        let status = status_at_change(before, change);
        self.push_update_log(update_log_entry(before, status, change, actor, at));
        self.push_activity(change_activity(before, change, actor, at));
    }

    pub fn push_update_log(&mut self, entry: UpdateLogModel) {
        self.writes.push(AuditWrite::FieldChange(entry));
    }

    pub fn push_activity(&mut self, entry: ActivityLogModel) {
        self.writes.push(AuditWrite::Activity(entry));
    }

    pub fn push_stage_history(&mut self, entry: PipelineStageHistoryModel) {
        self.writes.push(AuditWrite::StageHistory(entry));
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn writes(&self) -> &[AuditWrite] {
        &self.writes
    }
}

/// Outcome of draining an audit batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub written: usize,
    pub failed: usize,
}

impl AuditReport {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, ok: bool) {
        if ok {
            self.written += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Status written next to a change: the new status when the status field
/// itself changed, otherwise the status the record had before the update.
pub fn status_at_change<R: TrackedRecord>(before: &R, change: &FieldChange<R::Field>) -> Option<String> {
    if change.field.is_status() {
        change.new_value.to_log_string()
    } else {
        before.status_label()
    }
}

pub fn update_log_entry<R: TrackedRecord>(
    record: &R,
    status: Option<String>,
    change: &FieldChange<R::Field>,
    actor: Option<Uuid>,
    at: DateTime<Utc>,
) -> UpdateLogModel {
    UpdateLogModel {
        id: Uuid::new_v4(),
        workspace_id: record.get_workspace_id(),
        entity_type: R::ENTITY_TYPE,
        record_id: record.get_id(),
        status,
        field_changed: truncated_string(change.field.column()),
        old_value: change.old_value.to_log_string(),
        new_value: change.new_value.to_log_string(),
        updated_by: actor,
        updated_at: at,
    }
}

pub fn change_activity<R: TrackedRecord>(
    record: &R,
    change: &FieldChange<R::Field>,
    actor: Option<Uuid>,
    at: DateTime<Utc>,
) -> ActivityLogModel {
    let action_type = if change.field.is_status() {
        ActionType::StatusChanged
    } else {
        ActionType::Updated
    };
    PendingActivity {
        action_type,
        description: describe_change(change.field, &change.old_value, &change.new_value),
        metadata: json!({
            "field": change.field.column(),
            "old_value": change.old_value.to_log_string(),
            "new_value": change.new_value.to_log_string(),
        }),
    }
    .into_model(R::ENTITY_TYPE, record.get_workspace_id(), record.get_id(), actor, at)
}

fn describe_change<F: TrackedField>(field: F, old: &TrackedValue, new: &TrackedValue) -> String {
    if field.is_status() {
        return format!("Status changed from {old} to {new}");
    }
    match (old.is_null(), new.is_null()) {
        (true, _) => format!("Set {} to {new}", field.label()),
        (false, true) => format!("Cleared {} (was {old})", field.label()),
        (false, false) => format!("Updated {} from {old} to {new}", field.label()),
    }
}

/// Writes audit entries without ever failing the caller.
///
/// Every write is attempted on its own. A failed write is logged and counted
/// but neither retried nor propagated.
pub struct AuditLogger<DB: Database> {
    update_logs: Arc<dyn UpdateLogRepository<DB>>,
    activity_logs: Arc<dyn AppendLog<DB, ActivityLogModel>>,
    stage_history: Arc<dyn AppendLog<DB, PipelineStageHistoryModel>>,
}

impl<DB: Database> Clone for AuditLogger<DB> {
    fn clone(&self) -> Self {
        Self {
            update_logs: self.update_logs.clone(),
            activity_logs: self.activity_logs.clone(),
            stage_history: self.stage_history.clone(),
        }
    }
}

impl<DB: Database> AuditLogger<DB> {
    pub fn new(
        update_logs: Arc<dyn UpdateLogRepository<DB>>,
        activity_logs: Arc<dyn AppendLog<DB, ActivityLogModel>>,
        stage_history: Arc<dyn AppendLog<DB, PipelineStageHistoryModel>>,
    ) -> Self {
        Self {
            update_logs,
            activity_logs,
            stage_history,
        }
    }

    pub async fn log_field_change<R: TrackedRecord>(
        &self,
        record: &R,
        status_at_change: Option<String>,
        change: &FieldChange<R::Field>,
        actor: Option<Uuid>,
    ) -> AuditReport {
        let at = Utc::now();
        let mut batch = AuditBatch::new();
        batch.push_update_log(update_log_entry(record, status_at_change, change, actor, at));
        batch.push_activity(change_activity(record, change, actor, at));
        self.flush(batch).await
    }

    pub async fn log_activity(&self, entry: ActivityLogModel) -> AuditReport {
        let mut batch = AuditBatch::new();
        batch.push_activity(entry);
        self.flush(batch).await
    }

    /// Drains the batch sequentially
    pub async fn flush(&self, batch: AuditBatch) -> AuditReport {
        let mut report = AuditReport::default();
        for write in &batch.writes {
            let result = match write {
                AuditWrite::FieldChange(entry) => self.update_logs.append(entry).await,
                AuditWrite::Activity(entry) => self.activity_logs.append(entry).await,
                AuditWrite::StageHistory(entry) => self.stage_history.append(entry).await,
            };
            if let Err(error) = &result {
                warn!(
                    kind = write.kind(),
                    record_id = %write.subject_id(),
                    error = %error,
                    "Audit write failed"
                );
            }
            report.record(result.is_ok());
        }
        report
    }
}
