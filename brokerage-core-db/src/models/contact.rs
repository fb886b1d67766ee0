use brokerage_core_api::{
    ApiResult, ContactField, ContactPatch, ContactStatus, ContactType, EntityType, NewContact,
    TrackedValue,
};
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::{Identifiable, WorkspaceScoped};
use crate::models::tracked_record::TrackedRecord;
use crate::utils::optional_bounded_string;

/// Database model for a contact (lead, client, owner)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactModel {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<HeaplessString<30>>,
    pub contact_type: ContactType,
    pub status: ContactStatus,
    pub source: Option<String>,
    pub budget_min: Option<Decimal>,
    pub budget_max: Option<Decimal>,
    pub preferred_zone: Option<String>,

    /// References the workspace member responsible for this contact
    pub assigned_agent_id: Option<Uuid>,

    pub notes: Option<String>,
    pub is_archived: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactModel {
    pub fn create(
        workspace_id: Uuid,
        new: NewContact,
        created_by: Option<Uuid>,
        at: DateTime<Utc>,
    ) -> ApiResult<Self> {
        Ok(ContactModel {
            id: Uuid::new_v4(),
            workspace_id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: optional_bounded_string(new.phone.as_deref(), "phone")?,
            contact_type: new.contact_type,
            status: new.status,
            source: new.source,
            budget_min: new.budget_min,
            budget_max: new.budget_max,
            preferred_zone: new.preferred_zone,
            assigned_agent_id: new.assigned_agent_id,
            notes: new.notes,
            is_archived: false,
            created_by,
            created_at: at,
            updated_at: at,
        })
    }

    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.is_empty() => format!("{} {last}", self.first_name),
            _ => self.first_name.clone(),
        }
    }
}

impl Identifiable for ContactModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl WorkspaceScoped for ContactModel {
    fn get_workspace_id(&self) -> Uuid {
        self.workspace_id
    }
}

impl TrackedRecord for ContactModel {
    type Field = ContactField;
    type Patch = ContactPatch;

    const ENTITY_TYPE: EntityType = EntityType::Contact;

    fn tracked_value(&self, field: ContactField) -> TrackedValue {
        match field {
            ContactField::FirstName => self.first_name.as_str().into(),
            ContactField::LastName => self.last_name.clone().into(),
            ContactField::Email => self.email.clone().into(),
            ContactField::Phone => self.phone.as_ref().map(|p| p.as_str()).into(),
            ContactField::ContactType => TrackedValue::enumeration(&self.contact_type),
            ContactField::Status => TrackedValue::enumeration(&self.status),
            ContactField::Source => self.source.clone().into(),
            ContactField::BudgetMin => self.budget_min.into(),
            ContactField::BudgetMax => self.budget_max.into(),
            ContactField::PreferredZone => self.preferred_zone.clone().into(),
            ContactField::AssignedAgent => self.assigned_agent_id.into(),
            ContactField::Notes => self.notes.clone().into(),
        }
    }

    fn status_label(&self) -> Option<String> {
        Some(self.status.to_string())
    }

    fn display_name(&self) -> String {
        self.full_name()
    }

    fn apply_patch(&mut self, patch: &ContactPatch) -> ApiResult<()> {
        if let Some(first_name) = &patch.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = optional_bounded_string(phone.as_deref(), "phone")?;
        }
        if let Some(contact_type) = patch.contact_type {
            self.contact_type = contact_type;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(source) = &patch.source {
            self.source = source.clone();
        }
        if let Some(budget_min) = patch.budget_min {
            self.budget_min = budget_min;
        }
        if let Some(budget_max) = patch.budget_max {
            self.budget_max = budget_max;
        }
        if let Some(preferred_zone) = &patch.preferred_zone {
            self.preferred_zone = preferred_zone.clone();
        }
        if let Some(assigned_agent_id) = patch.assigned_agent_id {
            self.assigned_agent_id = assigned_agent_id;
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
        Ok(())
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}
