use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidationError};

use super::enums::{ContactStatus, ContactType};
use super::field::ContactField;
use super::patch::{
    check_max_len, check_non_negative, deserialize_some, push_supplied, required, RecordPatch,
};
use super::value::TrackedValue;
use crate::error::ApiResult;

const MAX_NAME_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 30;
const MAX_SOURCE_LEN: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_new_contact"))]
pub struct NewContact {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    pub contact_type: ContactType,
    pub status: ContactStatus,
    #[validate(length(max = 100))]
    pub source: Option<String>,
    pub budget_min: Option<Decimal>,
    pub budget_max: Option<Decimal>,
    #[validate(length(max = 100))]
    pub preferred_zone: Option<String>,
    pub assigned_agent_id: Option<Uuid>,
    pub notes: Option<String>,
}

fn validate_new_contact(contact: &NewContact) -> Result<(), ValidationError> {
    check_non_negative(contact.budget_min, "budget_min_negative")?;
    check_non_negative(contact.budget_max, "budget_max_negative")?;
    if let (Some(min), Some(max)) = (contact.budget_min, contact.budget_max) {
        if min > max {
            return Err(ValidationError::new("budget_range_inverted"));
        }
    }
    Ok(())
}

/// Partial update of a contact
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_contact_patch"))]
pub struct ContactPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<ContactType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ContactStatus>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub source: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub preferred_zone: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub assigned_agent_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

fn validate_contact_patch(patch: &ContactPatch) -> Result<(), ValidationError> {
    fn inner(value: &Option<Option<String>>) -> Option<&str> {
        value.as_ref().and_then(|v| v.as_deref())
    }

    check_max_len(inner(&patch.last_name), MAX_NAME_LEN, "last_name_too_long")?;
    check_max_len(inner(&patch.phone), MAX_PHONE_LEN, "phone_too_long")?;
    check_max_len(inner(&patch.source), MAX_SOURCE_LEN, "source_too_long")?;
    check_max_len(inner(&patch.preferred_zone), MAX_NAME_LEN, "preferred_zone_too_long")?;
    if let Some(email) = inner(&patch.email) {
        if !email.validate_email() {
            return Err(ValidationError::new("email"));
        }
    }
    check_non_negative(patch.budget_min.flatten(), "budget_min_negative")?;
    check_non_negative(patch.budget_max.flatten(), "budget_max_negative")?;
    Ok(())
}

impl RecordPatch for ContactPatch {
    type Field = ContactField;

    fn proposed_values(&self) -> Vec<(ContactField, TrackedValue)> {
        let mut values = Vec::new();
        push_supplied(&mut values, ContactField::FirstName, self.first_name.clone().map(TrackedValue::from));
        push_supplied(&mut values, ContactField::LastName, self.last_name.clone().map(TrackedValue::from));
        push_supplied(&mut values, ContactField::Email, self.email.clone().map(TrackedValue::from));
        push_supplied(&mut values, ContactField::Phone, self.phone.clone().map(TrackedValue::from));
        push_supplied(&mut values, ContactField::ContactType, self.contact_type.map(|t| TrackedValue::enumeration(&t)));
        push_supplied(&mut values, ContactField::Status, self.status.map(|s| TrackedValue::enumeration(&s)));
        push_supplied(&mut values, ContactField::Source, self.source.clone().map(TrackedValue::from));
        push_supplied(&mut values, ContactField::BudgetMin, self.budget_min.map(TrackedValue::from));
        push_supplied(&mut values, ContactField::BudgetMax, self.budget_max.map(TrackedValue::from));
        push_supplied(&mut values, ContactField::PreferredZone, self.preferred_zone.clone().map(TrackedValue::from));
        push_supplied(&mut values, ContactField::AssignedAgent, self.assigned_agent_id.map(TrackedValue::from));
        push_supplied(&mut values, ContactField::Notes, self.notes.clone().map(TrackedValue::from));
        values
    }

    fn from_field(field: ContactField, value: TrackedValue) -> ApiResult<Self> {
        let mut patch = ContactPatch::default();
        match field {
            ContactField::FirstName => patch.first_name = Some(required(value.as_text()?, "first_name")?),
            ContactField::LastName => patch.last_name = Some(value.as_text()?),
            ContactField::Email => patch.email = Some(value.as_text()?),
            ContactField::Phone => patch.phone = Some(value.as_text()?),
            ContactField::ContactType => {
                patch.contact_type = Some(required(value.parse_enum()?, "contact_type")?)
            }
            ContactField::Status => patch.status = Some(required(value.parse_enum()?, "status")?),
            ContactField::Source => patch.source = Some(value.as_text()?),
            ContactField::BudgetMin => patch.budget_min = Some(value.as_decimal()?),
            ContactField::BudgetMax => patch.budget_max = Some(value.as_decimal()?),
            ContactField::PreferredZone => patch.preferred_zone = Some(value.as_text()?),
            ContactField::AssignedAgent => patch.assigned_agent_id = Some(value.as_uuid()?),
            ContactField::Notes => patch.notes = Some(value.as_text()?),
        }
        Ok(patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_checked_when_supplied() {
        let patch = ContactPatch { email: Some(Some("not-an-email".to_string())), ..Default::default() };
        assert!(patch.validate().is_err());

        let patch = ContactPatch { email: Some(None), ..Default::default() };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_patch_text_lengths_are_checked() {
        let patch = ContactPatch { last_name: Some(Some("x".repeat(MAX_NAME_LEN + 1))), ..Default::default() };
        assert!(patch.validate().is_err());

        let patch = ContactPatch { last_name: Some(None), phone: Some(Some("+971 50 123 4567".to_string())), ..Default::default() };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_new_contact_budget_range() {
        let contact = NewContact {
            first_name: "Maya".to_string(),
            last_name: None,
            email: Some("maya@example.com".to_string()),
            phone: None,
            contact_type: ContactType::Buyer,
            status: ContactStatus::New,
            source: None,
            budget_min: Some(Decimal::from(900_000)),
            budget_max: Some(Decimal::from(500_000)),
            preferred_zone: None,
            assigned_agent_id: None,
            notes: None,
        };
        assert!(contact.validate().is_err());
    }

    #[test]
    fn test_agent_uuid_round_trips_through_tracked_value() {
        let agent = Uuid::new_v4();
        let patch = ContactPatch::from_field(ContactField::AssignedAgent, TrackedValue::from(agent)).unwrap();
        assert_eq!(patch.assigned_agent_id, Some(Some(agent)));
        assert_eq!(
            patch.proposed_values(),
            vec![(ContactField::AssignedAgent, TrackedValue::Text(agent.to_string()))]
        );
    }
}
