//! Schema setup and teardown by running the SQL files under `migrations/`
//! and `cleanup/` directly, for environments that do not use `sqlx migrate`.

use sqlx::PgPool;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Run every migration file in ascending file name order
///
/// # Example
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use brokerage_core_postgres::repository::db_init::init_database;
///
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// init_database(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
    execute_sql_files_in_order(pool, &migrations_dir, true).await
}

/// Drop the schema by running the cleanup files in descending order
pub async fn cleanup_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    let cleanup_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("cleanup");
    execute_sql_files_in_order(pool, &cleanup_dir, false).await
}

async fn execute_sql_files_in_order(
    pool: &PgPool,
    dir: &Path,
    ascending: bool,
) -> Result<(), sqlx::Error> {
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(sqlx::Error::Io)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().and_then(|s| s.to_str()) == Some("sql"))
        .collect();

    entries.sort_by(|a, b| {
        let ordering = a.file_name().cmp(&b.file_name());
        if ascending {
            ordering
        } else {
            ordering.reverse()
        }
    });

    for entry in entries {
        let path = entry.path();
        let sql = fs::read_to_string(&path).map_err(sqlx::Error::Io)?;
        debug!(file = %path.display(), "Executing SQL file");
        sqlx::raw_sql(&sql).execute(pool).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Leaves the schema in place so later runs of the sqlx migrator still
    // find the tables it recorded as applied.
    #[tokio::test]
    #[serial]
    #[ignore = "requires a disposable DATABASE_URL"]
    async fn test_cleanup_then_init() -> Result<(), Box<dyn std::error::Error>> {
        let url = std::env::var("DATABASE_URL")?;
        let pool = PgPool::connect(&url).await?;

        let count_tables = || {
            sqlx::query_scalar::<_, i64>(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_name IN \
                 ('listings', 'contacts', 'deals', 'listing_updates', 'contact_updates', \
                  'activity_logs', 'pipeline_stage_history')",
            )
            .fetch_one(&pool)
        };

        cleanup_database(&pool).await?;
        assert_eq!(count_tables().await?, 0);

        init_database(&pool).await?;
        assert_eq!(count_tables().await?, 7);

        Ok(())
    }
}
