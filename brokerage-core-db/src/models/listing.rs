use brokerage_core_api::{
    ActionType, ApiResult, EntityType, ListingField, ListingGrade, ListingPatch, ListingStatus,
    ListingType, NewListing, PropertyType, TrackedValue, MAX_FLOOR_LEN, MAX_ZONE_LEN,
};
use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::models::activity_log::PendingActivity;
use crate::models::identifiable::{Identifiable, WorkspaceScoped};
use crate::models::price_history::PriceHistoryEntry;
use crate::models::tracked_record::TrackedRecord;
use crate::tracking::change_detector::FieldChange;
use crate::tracking::days_on_market::seeded_days_on_market;
use crate::tracking::price_history::append_price_history;
use crate::utils::optional_bounded_string;

/// Database model for a property listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingModel {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub title: String,
    pub status: ListingStatus,
    pub asking_price: Option<Decimal>,
    pub rental_price: Option<Decimal>,
    pub grade: Option<ListingGrade>,
    pub listing_type: ListingType,
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub size_sqm: Option<Decimal>,
    pub floor: Option<HeaplessString<MAX_FLOOR_LEN>>,
    pub zone: Option<HeaplessString<MAX_ZONE_LEN>>,

    // Visibility flags
    pub is_published: bool,
    pub show_price: bool,
    pub is_featured: bool,
    pub is_exclusive: bool,

    pub unit_photos: Vec<String>,
    pub notes: Option<String>,

    /// Set on creation and on every status change
    pub status_changed_at: Option<DateTime<Utc>>,

    /// Snapshot seeded to 0 the first time the listing goes ACTIVE
    pub days_on_market: Option<i32>,

    /// Prices replaced so far, oldest first
    pub asking_price_history: Vec<PriceHistoryEntry>,

    pub is_archived: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListingModel {
    pub fn create(
        workspace_id: Uuid,
        new: NewListing,
        created_by: Option<Uuid>,
        at: DateTime<Utc>,
    ) -> ApiResult<Self> {
        Ok(ListingModel {
            id: Uuid::new_v4(),
            workspace_id,
            title: new.title,
            status: new.status,
            asking_price: new.asking_price,
            rental_price: new.rental_price,
            grade: new.grade,
            listing_type: new.listing_type,
            property_type: new.property_type,
            bedrooms: new.bedrooms,
            bathrooms: new.bathrooms,
            size_sqm: new.size_sqm,
            floor: optional_bounded_string(new.floor.as_deref(), "floor")?,
            zone: optional_bounded_string(new.zone.as_deref(), "zone")?,
            is_published: new.is_published,
            show_price: new.show_price,
            is_featured: new.is_featured,
            is_exclusive: new.is_exclusive,
            unit_photos: new.unit_photos,
            notes: new.notes,
            status_changed_at: Some(at),
            days_on_market: seeded_days_on_market(None, new.status),
            asking_price_history: Vec::new(),
            is_archived: false,
            created_by,
            created_at: at,
            updated_at: at,
        })
    }

    /// When the live asking price took effect: the moment it replaced the
    /// last remembered price, or creation if it was never replaced.
    pub fn asking_price_since(&self) -> DateTime<Utc> {
        self.asking_price_history
            .last()
            .map_or(self.created_at, |entry| entry.date)
    }
}

impl Identifiable for ListingModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl WorkspaceScoped for ListingModel {
    fn get_workspace_id(&self) -> Uuid {
        self.workspace_id
    }
}

impl TrackedRecord for ListingModel {
    type Field = ListingField;
    type Patch = ListingPatch;

    const ENTITY_TYPE: EntityType = EntityType::Listing;

    fn tracked_value(&self, field: ListingField) -> TrackedValue {
        match field {
            ListingField::Status => TrackedValue::enumeration(&self.status),
            ListingField::AskingPrice => self.asking_price.into(),
            ListingField::RentalPrice => self.rental_price.into(),
            ListingField::Grade => TrackedValue::optional_enum(self.grade.as_ref()),
            ListingField::ListingType => TrackedValue::enumeration(&self.listing_type),
            ListingField::PropertyType => TrackedValue::optional_enum(self.property_type.as_ref()),
            ListingField::Bedrooms => self.bedrooms.into(),
            ListingField::Bathrooms => self.bathrooms.into(),
            ListingField::Size => self.size_sqm.into(),
            ListingField::Floor => self.floor.as_ref().map(|f| f.as_str()).into(),
            ListingField::Zone => self.zone.as_ref().map(|z| z.as_str()).into(),
            ListingField::IsPublished => self.is_published.into(),
            ListingField::ShowPrice => self.show_price.into(),
            ListingField::IsFeatured => self.is_featured.into(),
            ListingField::IsExclusive => self.is_exclusive.into(),
            ListingField::Title => self.title.as_str().into(),
            ListingField::UnitPhotos => TrackedValue::Text(self.unit_photos.join("\n")),
            ListingField::Notes => self.notes.clone().into(),
        }
    }

    fn status_label(&self) -> Option<String> {
        Some(self.status.to_string())
    }

    fn display_name(&self) -> String {
        self.title.clone()
    }

    fn apply_patch(&mut self, patch: &ListingPatch) -> ApiResult<()> {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(asking_price) = patch.asking_price {
            self.asking_price = asking_price;
        }
        if let Some(rental_price) = patch.rental_price {
            self.rental_price = rental_price;
        }
        if let Some(grade) = patch.grade {
            self.grade = grade;
        }
        if let Some(listing_type) = patch.listing_type {
            self.listing_type = listing_type;
        }
        if let Some(property_type) = patch.property_type {
            self.property_type = property_type;
        }
        if let Some(bedrooms) = patch.bedrooms {
            self.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = patch.bathrooms {
            self.bathrooms = bathrooms;
        }
        if let Some(size_sqm) = patch.size_sqm {
            self.size_sqm = size_sqm;
        }
        if let Some(floor) = &patch.floor {
            self.floor = optional_bounded_string(floor.as_deref(), "floor")?;
        }
        if let Some(zone) = &patch.zone {
            self.zone = optional_bounded_string(zone.as_deref(), "zone")?;
        }
        if let Some(is_published) = patch.is_published {
            self.is_published = is_published;
        }
        if let Some(show_price) = patch.show_price {
            self.show_price = show_price;
        }
        if let Some(is_featured) = patch.is_featured {
            self.is_featured = is_featured;
        }
        if let Some(is_exclusive) = patch.is_exclusive {
            self.is_exclusive = is_exclusive;
        }
        if let Some(unit_photos) = &patch.unit_photos {
            self.unit_photos = unit_photos.clone();
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
        Ok(())
    }

    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    fn derive_fields(
        &mut self,
        before: &Self,
        changes: &[FieldChange<ListingField>],
        actor: Option<Uuid>,
        at: DateTime<Utc>,
    ) {
        let changed = |field: ListingField| changes.iter().any(|c| c.field == field);

        if changed(ListingField::Status) {
            self.status_changed_at = Some(at);
            self.days_on_market = seeded_days_on_market(before.days_on_market, self.status);
        }
        if changed(ListingField::AskingPrice) {
            self.asking_price_history = append_price_history(
                before.asking_price,
                &before.asking_price_history,
                actor,
                at,
            );
        }
    }

    fn side_activities(&self, before: &Self, patch: &ListingPatch) -> Vec<PendingActivity> {
        let Some(photos) = &patch.unit_photos else {
            return Vec::new();
        };
        let added: Vec<&String> = photos
            .iter()
            .filter(|photo| !before.unit_photos.contains(photo))
            .collect();
        if added.is_empty() {
            return Vec::new();
        }

        let noun = if added.len() == 1 { "photo" } else { "photos" };
        vec![PendingActivity {
            action_type: ActionType::PhotoUploaded,
            description: format!("Uploaded {} {noun} to {}", added.len(), self.title),
            metadata: json!({
                "photo_count": added.len(),
                "photos": added,
            }),
        }]
    }
}
