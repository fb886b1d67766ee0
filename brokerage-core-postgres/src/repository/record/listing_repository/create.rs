use async_trait::async_trait;
use brokerage_core_db::models::listing::ListingModel;
use brokerage_core_db::repository::create::Create;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ListingRepositoryImpl;

impl ListingRepositoryImpl {
    pub(super) async fn create_impl(
        repo: &ListingRepositoryImpl,
        item: &ListingModel,
    ) -> Result<ListingModel, Box<dyn Error + Send + Sync>> {
        let query = r#"
            INSERT INTO listings (
                id, workspace_id, title, status, asking_price, rental_price, grade,
                listing_type, property_type, bedrooms, bathrooms, size_sqm, floor, zone,
                is_published, show_price, is_featured, is_exclusive, unit_photos, notes,
                status_changed_at, days_on_market, asking_price_history, is_archived,
                created_by, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27
            )
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
            .bind(item.created_by)
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(repo.pool.as_ref())
            .await?;

        ListingModel::try_from_row(&row)
    }
}

#[async_trait]
impl Create<Postgres, ListingModel> for ListingRepositoryImpl {
    async fn create(&self, item: &ListingModel) -> Result<ListingModel, Box<dyn Error + Send + Sync>> {
        Self::create_impl(self, item).await
    }
}
