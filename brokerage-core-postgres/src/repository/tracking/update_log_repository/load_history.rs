use async_trait::async_trait;
use brokerage_core_api::EntityType;
use brokerage_core_db::models::update_log::UpdateLogModel;
use brokerage_core_db::repository::load_history::LoadHistory;
use crate::utils::try_from_rows;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{log_table, select_columns, UpdateLogRepositoryImpl};

impl UpdateLogRepositoryImpl {
    pub(super) async fn load_history_impl(
        repo: &UpdateLogRepositoryImpl,
        workspace_id: Uuid,
        entity_type: EntityType,
        record_id: Uuid,
        field: Option<&str>,
    ) -> Result<Vec<UpdateLogModel>, Box<dyn Error + Send + Sync>> {
        let (table, record_column) = log_table(entity_type)?;
        let query = format!(
            r#"
            SELECT {columns} FROM {table}
            WHERE workspace_id = $1 AND {record_column} = $2
              AND ($3::text IS NULL OR field_changed = $3)
            ORDER BY updated_at ASC, seq ASC
            "#,
            columns = select_columns(entity_type, record_column),
        );

        let rows = sqlx::query(&query)
            .bind(workspace_id)
            .bind(record_id)
            .bind(field)
            .fetch_all(repo.pool.as_ref())
            .await?;

        try_from_rows(&rows)
    }
}

#[async_trait]
impl LoadHistory<Postgres> for UpdateLogRepositoryImpl {
    async fn load_history(
        &self,
        workspace_id: Uuid,
        entity_type: EntityType,
        record_id: Uuid,
        field: Option<&str>,
    ) -> Result<Vec<UpdateLogModel>, Box<dyn Error + Send + Sync>> {
        Self::load_history_impl(self, workspace_id, entity_type, record_id, field).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::tracking::update_log_repository::test_utils::create_test_update_log;
    use crate::test_helper::setup_test_context;
    use brokerage_core_api::{EntityType, ListingStatus};
    use brokerage_core_db::repository::append_log::AppendLog;
    use brokerage_core_db::repository::create::Create;
    use brokerage_core_db::repository::load_history::LoadHistory;
    use brokerage_core_db::testing::fixtures::{sample_listing, WORKSPACE_ID};
    use chrono::Duration;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    #[ignore = "requires DATABASE_URL"]
    async fn test_load_history_is_oldest_first_and_filtered() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let listing_repo = &ctx.repos().listing_repository;
        let update_log_repo = &ctx.repos().update_log_repository;

        let listing = sample_listing(ListingStatus::New);
        listing_repo.create(&listing).await?;

        let t0 = listing.created_at;
        let entries = [
            create_test_update_log(&listing, "status", None, Some("NEW"), t0),
            create_test_update_log(&listing, "zone", None, Some("Marina"), t0 + Duration::days(1)),
            create_test_update_log(&listing, "status", Some("NEW"), Some("ACTIVE"), t0 + Duration::days(2)),
        ];
        // Appended out of order on purpose
        for entry in entries.iter().rev() {
            update_log_repo.append(entry).await?;
        }

        let all = update_log_repo
            .load_history(WORKSPACE_ID, EntityType::Listing, listing.id, None)
            .await?;
        let ids: Vec<_> = all.iter().map(|e| e.id).collect();
        assert_eq!(ids, entries.iter().map(|e| e.id).collect::<Vec<_>>());
        assert!(all.iter().all(|e| e.entity_type == EntityType::Listing && e.record_id == listing.id));

        let status_only = update_log_repo
            .load_history(WORKSPACE_ID, EntityType::Listing, listing.id, Some("status"))
            .await?;
        assert_eq!(status_only.len(), 2);
        assert_eq!(status_only[1].new_value.as_deref(), Some("ACTIVE"));

        Ok(())
    }
}
