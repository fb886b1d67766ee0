use brokerage_core_api::{ApiResult, EntityType, RecordPatch, TrackedField, TrackedValue};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::activity_log::PendingActivity;
use crate::models::identifiable::{Identifiable, WorkspaceScoped};
use crate::tracking::change_detector::FieldChange;

/// A record whose tracked field changes are written to the update log.
pub trait TrackedRecord: Identifiable + WorkspaceScoped + Clone + Send + Sync + 'static {
    type Field: TrackedField;
    type Patch: RecordPatch<Field = Self::Field>;

    const ENTITY_TYPE: EntityType;

    /// Current value of any writable field, tracked or not
    fn tracked_value(&self, field: Self::Field) -> TrackedValue;

    /// Status as written to the `status` column of the update log
    fn status_label(&self) -> Option<String>;

    /// Name used in activity descriptions
    fn display_name(&self) -> String;

    fn apply_patch(&mut self, patch: &Self::Patch) -> ApiResult<()>;

    fn touch(&mut self, at: DateTime<Utc>);

    /// Recomputes derived fields after `apply_patch`. `self` already carries
    /// the new values, `before` the snapshot the changes were detected on.
    fn derive_fields(
        &mut self,
        _before: &Self,
        _changes: &[FieldChange<Self::Field>],
        _actor: Option<Uuid>,
        _at: DateTime<Utc>,
    ) {
    }

    /// Activities for untracked fields that still deserve a feed entry.
    fn side_activities(&self, _before: &Self, _patch: &Self::Patch) -> Vec<PendingActivity> {
        Vec::new()
    }
}
