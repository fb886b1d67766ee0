use brokerage_core_api::EntityType;
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::{Identifiable, WorkspaceScoped};

/// # Documentation
/// One tracked field change on a listing or contact.
/// - Immutable once written; the log is append-only.
/// - `status` is the record status at the time of the change (the new status
///   when the status field itself changed).
/// - Values are stored as text regardless of the source type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateLogModel {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub entity_type: EntityType,

    /// References the listing or contact this change belongs to
    pub record_id: Uuid,

    pub status: Option<String>,
    pub field_changed: HeaplessString<50>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub updated_by: Option<Uuid>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for UpdateLogModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl WorkspaceScoped for UpdateLogModel {
    fn get_workspace_id(&self) -> Uuid {
        self.workspace_id
    }
}
