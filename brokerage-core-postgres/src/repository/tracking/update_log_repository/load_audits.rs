use async_trait::async_trait;
use brokerage_core_api::EntityType;
use brokerage_core_db::models::update_log::UpdateLogModel;
use brokerage_core_db::repository::load_audits::LoadAudits;
use brokerage_core_db::repository::pagination::{Page, PageRequest};
use crate::utils::try_from_rows;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::{log_table, select_columns, UpdateLogRepositoryImpl};

impl UpdateLogRepositoryImpl {
    pub(super) async fn load_audits_impl(
        repo: &UpdateLogRepositoryImpl,
        workspace_id: Uuid,
        entity_type: EntityType,
        record_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<UpdateLogModel>, Box<dyn Error + Send + Sync>> {
        let (table, record_column) = log_table(entity_type)?;

        let count_query = format!(
            r#"SELECT COUNT(*) FROM {table} WHERE workspace_id = $1 AND {record_column} = $2"#
        );
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(workspace_id)
            .bind(record_id)
            .fetch_one(repo.pool.as_ref())
            .await?;

        let query = format!(
            r#"
            SELECT {columns} FROM {table}
            WHERE workspace_id = $1 AND {record_column} = $2
            ORDER BY updated_at DESC, seq DESC
            LIMIT $3 OFFSET $4
            "#,
            columns = select_columns(entity_type, record_column),
        );
        let rows = sqlx::query(&query)
            .bind(workspace_id)
            .bind(record_id)
            .bind(page.limit as i64)
            .bind(page.offset as i64)
            .fetch_all(repo.pool.as_ref())
            .await?;

        let items = try_from_rows(&rows)?;
        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[async_trait]
impl LoadAudits<Postgres> for UpdateLogRepositoryImpl {
    async fn load_audits(
        &self,
        workspace_id: Uuid,
        entity_type: EntityType,
        record_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<UpdateLogModel>, Box<dyn Error + Send + Sync>> {
        Self::load_audits_impl(self, workspace_id, entity_type, record_id, page).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::tracking::update_log_repository::test_utils::create_test_update_log;
    use crate::test_helper::setup_test_context;
    use brokerage_core_api::{ContactStatus, EntityType};
    use brokerage_core_db::repository::append_log::AppendLog;
    use brokerage_core_db::repository::create::Create;
    use brokerage_core_db::repository::load_audits::LoadAudits;
    use brokerage_core_db::repository::pagination::PageRequest;
    use brokerage_core_db::testing::fixtures::{sample_contact, WORKSPACE_ID};
    use chrono::Duration;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    #[ignore = "requires DATABASE_URL"]
    async fn test_load_audits() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let contact_repo = &ctx.repos().contact_repository;
        let update_log_repo = &ctx.repos().update_log_repository;

        let contact = sample_contact(ContactStatus::New);
        contact_repo.create(&contact).await?;

        let statuses = ["NEW", "CONTACTED", "QUALIFIED", "NEGOTIATING"];
        for (i, status) in statuses.iter().enumerate() {
            let entry = create_test_update_log(
                &contact,
                "status",
                None,
                Some(status),
                contact.created_at + Duration::hours(i as i64),
            );
            update_log_repo.append(&entry).await?;
        }

        let page = update_log_repo
            .load_audits(WORKSPACE_ID, EntityType::Contact, contact.id, PageRequest::new(2, 0))
            .await?;

        assert_eq!(page.total, 4);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].new_value.as_deref(), Some("NEGOTIATING"));
        assert_eq!(page.page_number(), 1);
        assert_eq!(page.total_pages(), 2);
        assert!(page.has_more());

        let page2 = update_log_repo
            .load_audits(WORKSPACE_ID, EntityType::Contact, contact.id, PageRequest::new(2, 2))
            .await?;
        assert_eq!(page2.items[1].new_value.as_deref(), Some("NEW"));
        assert!(!page2.has_more());

        Ok(())
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires DATABASE_URL"]
    async fn test_load_audits_empty() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let update_log_repo = &ctx.repos().update_log_repository;

        let page = update_log_repo
            .load_audits(WORKSPACE_ID, EntityType::Listing, uuid::Uuid::new_v4(), PageRequest::default())
            .await?;

        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
        assert!(!page.has_more());

        Ok(())
    }
}
