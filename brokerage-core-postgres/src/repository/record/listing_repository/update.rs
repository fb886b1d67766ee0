use async_trait::async_trait;
use brokerage_core_db::models::listing::ListingModel;
use brokerage_core_db::repository::update::Update;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ListingRepositoryImpl;

impl ListingRepositoryImpl {
    pub(super) async fn update_impl(
        repo: &ListingRepositoryImpl,
        item: &ListingModel,
    ) -> Result<ListingModel, Box<dyn Error + Send + Sync>> {
        let query = r#"
            UPDATE listings SET
                title = $3, status = $4, asking_price = $5, rental_price = $6, grade = $7,
                listing_type = $8, property_type = $9, bedrooms = $10, bathrooms = $11,
                size_sqm = $12, floor = $13, zone = $14, is_published = $15, show_price = $16,
                is_featured = $17, is_exclusive = $18, unit_photos = $19, notes = $20,
                status_changed_at = $21, days_on_market = $22, asking_price_history = $23,
                is_archived = $24, updated_at = $25
            WHERE id = $1 AND workspace_id = $2
            RETURNING *
        "#;

        let row = sqlx::query(query)
            .bind(item.id)
            .bind(item.workspace_id)
            .bind(&item.title)
            .bind(item.status)
            .bind(item.asking_price)
            .bind(item.rental_price)
            .bind(item.grade)
            .bind(item.listing_type)
            .bind(item.property_type)
            .bind(item.bedrooms)
            .bind(item.bathrooms)
            .bind(item.size_sqm)
            .bind(item.floor.as_ref().map(|s| s.as_str()))
            .bind(item.zone.as_ref().map(|s| s.as_str()))
            .bind(item.is_published)
            .bind(item.show_price)
            .bind(item.is_featured)
            .bind(item.is_exclusive)
            .bind(&item.unit_photos)
            .bind(&item.notes)
            .bind(item.status_changed_at)
            .bind(item.days_on_market)
            .bind(serde_json::to_value(&item.asking_price_history)?)
            .bind(item.is_archived)
            .bind(item.updated_at)
            .fetch_optional(repo.pool.as_ref())
            .await?
            .ok_or_else(|| format!("Listing {} not found", item.id))?;

        ListingModel::try_from_row(&row)
    }
}

#[async_trait]
impl Update<Postgres, ListingModel> for ListingRepositoryImpl {
    async fn update(&self, item: &ListingModel) -> Result<ListingModel, Box<dyn Error + Send + Sync>> {
        Self::update_impl(self, item).await
    }
}
