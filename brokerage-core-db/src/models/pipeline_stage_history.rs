use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::{Identifiable, WorkspaceScoped};

/// Append-only record of a deal moving between pipeline stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStageHistoryModel {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub deal_id: Uuid,
    pub from_stage_id: Option<Uuid>,
    pub to_stage_id: Uuid,
    pub changed_by: Option<Uuid>,
    pub changed_at: DateTime<Utc>,
}

impl Identifiable for PipelineStageHistoryModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl WorkspaceScoped for PipelineStageHistoryModel {
    fn get_workspace_id(&self) -> Uuid {
        self.workspace_id
    }
}
