use brokerage_core_api::DealSide;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::{Identifiable, WorkspaceScoped};

/// Database model for a deal in the sales pipeline.
///
/// The pipeline stage is only moved through the stage transitioner, which
/// keeps `pipeline_stage_history` in step with `pipeline_stage_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealModel {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub title: String,
    pub side: DealSide,
    pub pipeline_stage_id: Option<Uuid>,
    pub contact_id: Option<Uuid>,
    pub listing_id: Option<Uuid>,
    pub value: Option<Decimal>,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for DealModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl WorkspaceScoped for DealModel {
    fn get_workspace_id(&self) -> Uuid {
        self.workspace_id
    }
}
