use brokerage_core_db::models::listing::ListingModel;
use brokerage_core_db::models::price_history::price_history_from_json;
use crate::utils::{get_optional_heapless_string, TryFromRow};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::error::Error;
use std::sync::Arc;

pub struct ListingRepositoryImpl {
    pub pool: Arc<PgPool>,
}

impl ListingRepositoryImpl {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for ListingModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(ListingModel {
            id: row.try_get("id")?,
            workspace_id: row.try_get("workspace_id")?,
            title: row.try_get("title")?,
            status: row.try_get("status")?,
            asking_price: row.try_get("asking_price")?,
            rental_price: row.try_get("rental_price")?,
            grade: row.try_get("grade")?,
            listing_type: row.try_get("listing_type")?,
            property_type: row.try_get("property_type")?,
            bedrooms: row.try_get("bedrooms")?,
            bathrooms: row.try_get("bathrooms")?,
            size_sqm: row.try_get("size_sqm")?,
            floor: get_optional_heapless_string(row, "floor")?,
            zone: get_optional_heapless_string(row, "zone")?,
            is_published: row.try_get("is_published")?,
            show_price: row.try_get("show_price")?,
            is_featured: row.try_get("is_featured")?,
            is_exclusive: row.try_get("is_exclusive")?,
            unit_photos: row.try_get("unit_photos")?,
            notes: row.try_get("notes")?,
            status_changed_at: row.try_get("status_changed_at")?,
            days_on_market: row.try_get("days_on_market")?,
            asking_price_history: price_history_from_json(row.try_get("asking_price_history")?),
            is_archived: row.try_get("is_archived")?,
            created_by: row.try_get("created_by")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
