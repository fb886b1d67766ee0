use sqlx::Database;

use crate::models::identifiable::{Identifiable, WorkspaceScoped};
use crate::models::update_log::UpdateLogModel;
use crate::repository::{AppendLog, Create, FindById, LoadAudits, LoadHistory, Update};

/// Point lookup, insert and write-back for one record type
pub trait RecordRepository<DB: Database, T: Identifiable + WorkspaceScoped>:
    FindById<DB, T> + Create<DB, T> + Update<DB, T>
{
}

impl<DB, T, R> RecordRepository<DB, T> for R
where
    DB: Database,
    T: Identifiable + WorkspaceScoped,
    R: FindById<DB, T> + Create<DB, T> + Update<DB, T>,
{
}

/// Append and read access to the update log
pub trait UpdateLogRepository<DB: Database>:
    AppendLog<DB, UpdateLogModel> + LoadHistory<DB> + LoadAudits<DB>
{
}

impl<DB, R> UpdateLogRepository<DB> for R
where
    DB: Database,
    R: AppendLog<DB, UpdateLogModel> + LoadHistory<DB> + LoadAudits<DB>,
{
}
