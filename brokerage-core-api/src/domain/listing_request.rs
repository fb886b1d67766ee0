use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::enums::{ListingGrade, ListingStatus, ListingType, PropertyType};
use super::field::ListingField;
use super::patch::{
    check_count, check_max_len, check_non_negative, deserialize_some, push_supplied, required,
    RecordPatch,
};
use super::value::TrackedValue;
use crate::error::{ApiError, ApiResult};

pub const MAX_FLOOR_LEN: usize = 20;
pub const MAX_ZONE_LEN: usize = 100;
const MAX_ROOMS: i32 = 100;

/// Fields accepted when a listing is created
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_new_listing"))]
pub struct NewListing {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub status: ListingStatus,
    pub listing_type: ListingType,
    pub asking_price: Option<Decimal>,
    pub rental_price: Option<Decimal>,
    pub grade: Option<ListingGrade>,
    pub property_type: Option<PropertyType>,
    #[validate(range(min = 0, max = 100))]
    pub bedrooms: Option<i32>,
    #[validate(range(min = 0, max = 100))]
    pub bathrooms: Option<i32>,
    pub size_sqm: Option<Decimal>,
    #[validate(length(max = 20))]
    pub floor: Option<String>,
    #[validate(length(max = 100))]
    pub zone: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub show_price: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_exclusive: bool,
    #[serde(default)]
    pub unit_photos: Vec<String>,
    pub notes: Option<String>,
}

fn validate_new_listing(listing: &NewListing) -> Result<(), ValidationError> {
    check_non_negative(listing.asking_price, "asking_price_negative")?;
    check_non_negative(listing.rental_price, "rental_price_negative")?;
    check_non_negative(listing.size_sqm, "size_negative")?;
    Ok(())
}

/// Partial update of a listing
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_listing_patch"))]
pub struct ListingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ListingStatus>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub asking_price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub rental_price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub grade: Option<Option<ListingGrade>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<ListingType>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<Option<PropertyType>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<Option<i32>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub size_sqm: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub floor: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub zone: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_price: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_exclusive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_photos: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

fn validate_listing_patch(patch: &ListingPatch) -> Result<(), ValidationError> {
    check_non_negative(patch.asking_price.flatten(), "asking_price_negative")?;
    check_non_negative(patch.rental_price.flatten(), "rental_price_negative")?;
    check_non_negative(patch.size_sqm.flatten(), "size_negative")?;
    check_count(patch.bedrooms.flatten(), MAX_ROOMS, "bedrooms_out_of_range")?;
    check_count(patch.bathrooms.flatten(), MAX_ROOMS, "bathrooms_out_of_range")?;
    check_max_len(patch.floor.as_ref().and_then(|f| f.as_deref()), MAX_FLOOR_LEN, "floor_too_long")?;
    check_max_len(patch.zone.as_ref().and_then(|z| z.as_deref()), MAX_ZONE_LEN, "zone_too_long")?;
    Ok(())
}

impl RecordPatch for ListingPatch {
    type Field = ListingField;

    fn proposed_values(&self) -> Vec<(ListingField, TrackedValue)> {
        let mut values = Vec::new();
        push_supplied(&mut values, ListingField::Status, self.status.map(|s| TrackedValue::enumeration(&s)));
        push_supplied(&mut values, ListingField::AskingPrice, self.asking_price.map(TrackedValue::from));
        push_supplied(&mut values, ListingField::RentalPrice, self.rental_price.map(TrackedValue::from));
        push_supplied(&mut values, ListingField::Grade, self.grade.map(|g| TrackedValue::optional_enum(g.as_ref())));
        push_supplied(&mut values, ListingField::ListingType, self.listing_type.map(|t| TrackedValue::enumeration(&t)));
        push_supplied(
            &mut values,
            ListingField::PropertyType,
            self.property_type.map(|p| TrackedValue::optional_enum(p.as_ref())),
        );
        push_supplied(&mut values, ListingField::Bedrooms, self.bedrooms.map(TrackedValue::from));
        push_supplied(&mut values, ListingField::Bathrooms, self.bathrooms.map(TrackedValue::from));
        push_supplied(&mut values, ListingField::Size, self.size_sqm.map(TrackedValue::from));
        push_supplied(&mut values, ListingField::Floor, self.floor.clone().map(TrackedValue::from));
        push_supplied(&mut values, ListingField::Zone, self.zone.clone().map(TrackedValue::from));
        push_supplied(&mut values, ListingField::IsPublished, self.is_published.map(TrackedValue::from));
        push_supplied(&mut values, ListingField::ShowPrice, self.show_price.map(TrackedValue::from));
        push_supplied(&mut values, ListingField::IsFeatured, self.is_featured.map(TrackedValue::from));
        push_supplied(&mut values, ListingField::IsExclusive, self.is_exclusive.map(TrackedValue::from));
        push_supplied(&mut values, ListingField::Title, self.title.clone().map(TrackedValue::from));
        push_supplied(
            &mut values,
            ListingField::UnitPhotos,
            self.unit_photos.as_ref().map(|photos| TrackedValue::Text(photos.join("\n"))),
        );
        push_supplied(&mut values, ListingField::Notes, self.notes.clone().map(TrackedValue::from));
        values
    }

    fn from_field(field: ListingField, value: TrackedValue) -> ApiResult<Self> {
        let mut patch = ListingPatch::default();
        match field {
            ListingField::Status => patch.status = Some(required(value.parse_enum()?, "status")?),
            ListingField::AskingPrice => patch.asking_price = Some(value.as_decimal()?),
            ListingField::RentalPrice => patch.rental_price = Some(value.as_decimal()?),
            ListingField::Grade => patch.grade = Some(value.parse_enum()?),
            ListingField::ListingType => {
                patch.listing_type = Some(required(value.parse_enum()?, "listing_type")?)
            }
            ListingField::PropertyType => patch.property_type = Some(value.parse_enum()?),
            ListingField::Bedrooms => patch.bedrooms = Some(value.as_i32()?),
            ListingField::Bathrooms => patch.bathrooms = Some(value.as_i32()?),
            ListingField::Size => patch.size_sqm = Some(value.as_decimal()?),
            ListingField::Floor => patch.floor = Some(value.as_text()?),
            ListingField::Zone => patch.zone = Some(value.as_text()?),
            ListingField::IsPublished => patch.is_published = Some(value.as_bool()?),
            ListingField::ShowPrice => patch.show_price = Some(value.as_bool()?),
            ListingField::IsFeatured => patch.is_featured = Some(value.as_bool()?),
            ListingField::IsExclusive => patch.is_exclusive = Some(value.as_bool()?),
            ListingField::Title => patch.title = Some(required(value.as_text()?, "title")?),
            ListingField::Notes => patch.notes = Some(value.as_text()?),
            ListingField::UnitPhotos => {
                return Err(ApiError::ValidationError(
                    "unit_photos must be updated with the full photo list".to_string(),
                ))
            }
        }
        Ok(patch)
    }
}
