use brokerage_core_api::{
    ContactStatus, ContactType, DealSide, ListingGrade, ListingStatus, ListingType, NewContact,
    NewListing, PropertyType,
};
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{ContactModel, DealModel, ListingModel};

pub const WORKSPACE_ID: Uuid = Uuid::from_u128(0x5e1f_0000_0000_4000_8000_0000_0000_0001);
pub const OTHER_WORKSPACE_ID: Uuid = Uuid::from_u128(0x5e1f_0000_0000_4000_8000_0000_0000_0002);

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

pub fn new_listing(status: ListingStatus) -> NewListing {
    NewListing {
        title: "Marina View 2BR".to_string(),
        status,
        listing_type: ListingType::Sale,
        asking_price: Some(Decimal::from(1_250_000)),
        rental_price: None,
        grade: Some(ListingGrade::A),
        property_type: Some(PropertyType::Apartment),
        bedrooms: Some(2),
        bathrooms: Some(2),
        size_sqm: Some(Decimal::new(1105, 1)),
        floor: Some("12".to_string()),
        zone: Some("Dubai Marina".to_string()),
        is_published: false,
        show_price: true,
        is_featured: false,
        is_exclusive: false,
        unit_photos: vec!["photos/front.jpg".to_string()],
        notes: None,
    }
}

pub fn new_contact(status: ContactStatus) -> NewContact {
    NewContact {
        first_name: "Lea".to_string(),
        last_name: Some("Moreau".to_string()),
        email: None,
        phone: Some("+971500000001".to_string()),
        contact_type: ContactType::Buyer,
        status,
        source: Some("Website".to_string()),
        budget_min: Some(Decimal::from(900_000)),
        budget_max: Some(Decimal::from(1_500_000)),
        preferred_zone: Some("Dubai Marina".to_string()),
        assigned_agent_id: None,
        notes: None,
    }
}

/// A listing created at [`fixed_time`] in [`WORKSPACE_ID`]
pub fn sample_listing(status: ListingStatus) -> ListingModel {
    ListingModel::create(WORKSPACE_ID, new_listing(status), None, fixed_time())
        .expect("fixture listing is valid")
}

pub fn sample_contact(status: ContactStatus) -> ContactModel {
    ContactModel::create(WORKSPACE_ID, new_contact(status), None, fixed_time())
        .expect("fixture contact is valid")
}

pub fn sample_deal(stage: Option<Uuid>) -> DealModel {
    DealModel {
        id: Uuid::new_v4(),
        workspace_id: WORKSPACE_ID,
        title: "Marina View purchase".to_string(),
        side: DealSide::Buy,
        pipeline_stage_id: stage,
        contact_id: None,
        listing_id: None,
        value: Some(Decimal::from(1_200_000)),
        is_archived: false,
        created_at: fixed_time(),
        updated_at: fixed_time(),
    }
}
