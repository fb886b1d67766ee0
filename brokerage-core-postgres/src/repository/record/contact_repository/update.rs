use async_trait::async_trait;
use brokerage_core_db::models::contact::ContactModel;
use brokerage_core_db::repository::update::Update;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::ContactRepositoryImpl;

impl ContactRepositoryImpl {
    pub(super) async fn update_impl(
        repo: &ContactRepositoryImpl,
        item: &ContactModel,
    ) -> Result<ContactModel, Box<dyn Error + Send + Sync>> {
        let query = r#"
            UPDATE contacts SET
                first_name = $3, last_name = $4, email = $5, phone = $6, contact_type = $7,
                status = $8, source = $9, budget_min = $10, budget_max = $11,
                preferred_zone = $12, assigned_agent_id = $13, notes = $14,
                is_archived = $15, updated_at = $16
            WHERE id = $1 AND workspace_id = $2
            RETURNING *
        "#;

        let row = sqlx::query(query)
            .bind(item.id)
            .bind(item.workspace_id)
            .bind(&item.first_name)
            .bind(&item.last_name)
            .bind(&item.email)
            .bind(item.phone.as_ref().map(|s| s.as_str()))
            .bind(item.contact_type)
            .bind(item.status)
            .bind(&item.source)
            .bind(item.budget_min)
            .bind(item.budget_max)
            .bind(&item.preferred_zone)
            .bind(item.assigned_agent_id)
            .bind(&item.notes)
            .bind(item.is_archived)
            .bind(item.updated_at)
            .fetch_optional(repo.pool.as_ref())
            .await?
            .ok_or_else(|| format!("Contact {} not found", item.id))?;

        ContactModel::try_from_row(&row)
    }
}

#[async_trait]
impl Update<Postgres, ContactModel> for ContactRepositoryImpl {
    async fn update(&self, item: &ContactModel) -> Result<ContactModel, Box<dyn Error + Send + Sync>> {
        Self::update_impl(self, item).await
    }
}
