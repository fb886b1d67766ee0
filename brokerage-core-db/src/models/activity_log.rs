use brokerage_core_api::{ActionType, EntityType};
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::{Identifiable, WorkspaceScoped};
use crate::utils::truncated_string;

pub const MAX_DESCRIPTION_LEN: usize = 500;

/// # Documentation
/// Human-readable activity feed row. Append-only and never read back into
/// the record it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogModel {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub entity_type: EntityType,
    pub entity_id: Uuid,
    pub action_type: ActionType,
    pub actor_id: Option<Uuid>,
    pub description: HeaplessString<MAX_DESCRIPTION_LEN>,

    /// Free-form key/value details, always a JSON object
    pub metadata: serde_json::Value,

    pub created_at: DateTime<Utc>,
}

impl Identifiable for ActivityLogModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl WorkspaceScoped for ActivityLogModel {
    fn get_workspace_id(&self) -> Uuid {
        self.workspace_id
    }
}

/// An activity produced by a record mutation before it is bound to the
/// record and actor.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingActivity {
    pub action_type: ActionType,
    pub description: String,
    pub metadata: serde_json::Value,
}

impl PendingActivity {
    pub fn into_model(
        self,
        entity_type: EntityType,
        workspace_id: Uuid,
        entity_id: Uuid,
        actor_id: Option<Uuid>,
        at: DateTime<Utc>,
    ) -> ActivityLogModel {
        ActivityLogModel {
            id: Uuid::new_v4(),
            workspace_id,
            entity_type,
            entity_id,
            action_type: self.action_type,
            actor_id,
            description: truncated_string(&self.description),
            metadata: self.metadata,
            created_at: at,
        }
    }
}
