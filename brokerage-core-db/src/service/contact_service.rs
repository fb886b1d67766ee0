use brokerage_core_api::{ApiResult, ContactField, ContactPatch, NewContact, TrackedValue};
use chrono::Utc;
use sqlx::Database;
use uuid::Uuid;
use validator::Validate;

use crate::models::contact::ContactModel;
use crate::models::update_log::UpdateLogModel;
use crate::repository::{Page, PageRequest};
use crate::service::record_tracker::{MutationOutcome, RecordTracker};

pub struct ContactService<DB: Database> {
    tracker: RecordTracker<DB, ContactModel>,
}

impl<DB: Database> Clone for ContactService<DB> {
    fn clone(&self) -> Self {
        Self {
            tracker: self.tracker.clone(),
        }
    }
}

impl<DB: Database> ContactService<DB> {
    pub fn new(tracker: RecordTracker<DB, ContactModel>) -> Self {
        Self { tracker }
    }

    pub async fn create_contact(
        &self,
        workspace_id: Uuid,
        new: NewContact,
    ) -> ApiResult<MutationOutcome<ContactModel>> {
        new.validate()?;
        let at = Utc::now();
        let contact = ContactModel::create(workspace_id, new, self.tracker.current_actor(), at)?;
        self.tracker.create(contact, at).await
    }

    pub async fn update_contact(
        &self,
        workspace_id: Uuid,
        contact_id: Uuid,
        patch: ContactPatch,
    ) -> ApiResult<MutationOutcome<ContactModel>> {
        self.tracker.update(workspace_id, contact_id, &patch).await
    }

    pub async fn update_contact_field(
        &self,
        workspace_id: Uuid,
        contact_id: Uuid,
        field: ContactField,
        value: TrackedValue,
    ) -> ApiResult<MutationOutcome<ContactModel>> {
        self.tracker
            .update_field(workspace_id, contact_id, field, value)
            .await
    }

    pub async fn audit_trail(
        &self,
        workspace_id: Uuid,
        contact_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<UpdateLogModel>> {
        self.tracker.audit_trail(workspace_id, contact_id, page).await
    }
}
