use std::collections::HashMap;
use std::error::Error;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use brokerage_core_api::EntityType;
use parking_lot::RwLock;
use sqlx::Database;
use uuid::Uuid;

use crate::models::{
    ActivityLogModel, ContactModel, DealModel, Identifiable, ListingModel,
    PipelineStageHistoryModel, UpdateLogModel, WorkspaceScoped,
};
use crate::repository::{
    AppendLog, Create, FindById, LoadAudits, LoadHistory, Page, PageRequest, Update,
};
use crate::service::repositories::TrackingRepositories;

type BoxError = Box<dyn Error + Send + Sync>;

/// Switches that make the matching repository calls fail
#[derive(Debug, Default)]
pub struct Faults {
    record_reads: AtomicBool,
    record_writes: AtomicBool,
    update_logs: AtomicBool,
    activity_logs: AtomicBool,
    stage_history: AtomicBool,
}

impl Faults {
    pub fn fail_record_reads(&self, fail: bool) {
        self.record_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_record_writes(&self, fail: bool) {
        self.record_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_update_logs(&self, fail: bool) {
        self.update_logs.store(fail, Ordering::SeqCst);
    }

    pub fn fail_activity_logs(&self, fail: bool) {
        self.activity_logs.store(fail, Ordering::SeqCst);
    }

    pub fn fail_stage_history(&self, fail: bool) {
        self.stage_history.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool, what: &str) -> Result<(), BoxError> {
        if flag.load(Ordering::SeqCst) {
            Err(format!("injected {what} failure").into())
        } else {
            Ok(())
        }
    }
}

/// Record and log tables kept in process memory.
///
/// Implements every repository trait for any `sqlx::Database`, so services
/// can be built with [`MemoryStore::repositories`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    listings: RwLock<HashMap<Uuid, ListingModel>>,
    contacts: RwLock<HashMap<Uuid, ContactModel>>,
    deals: RwLock<HashMap<Uuid, DealModel>>,
    update_logs: RwLock<Vec<UpdateLogModel>>,
    activity_logs: RwLock<Vec<ActivityLogModel>>,
    stage_history: RwLock<Vec<PipelineStageHistoryModel>>,
    record_writes: AtomicUsize,
    faults: Faults,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repositories<DB: Database>(self: &Arc<Self>) -> TrackingRepositories<DB> {
        TrackingRepositories {
            listings: self.clone(),
            contacts: self.clone(),
            deals: self.clone(),
            update_logs: self.clone(),
            activity_logs: self.clone(),
            stage_history: self.clone(),
        }
    }

    pub fn faults(&self) -> &Faults {
        &self.faults
    }

    /// Number of successful record inserts and updates
    pub fn record_writes(&self) -> usize {
        self.record_writes.load(Ordering::SeqCst)
    }

    pub fn insert_listing(&self, listing: ListingModel) {
        self.listings.write().insert(listing.id, listing);
    }

    pub fn insert_contact(&self, contact: ContactModel) {
        self.contacts.write().insert(contact.id, contact);
    }

    pub fn insert_deal(&self, deal: DealModel) {
        self.deals.write().insert(deal.id, deal);
    }

    pub fn listing(&self, id: Uuid) -> Option<ListingModel> {
        self.listings.read().get(&id).cloned()
    }

    pub fn contact(&self, id: Uuid) -> Option<ContactModel> {
        self.contacts.read().get(&id).cloned()
    }

    pub fn deal(&self, id: Uuid) -> Option<DealModel> {
        self.deals.read().get(&id).cloned()
    }

    pub fn update_logs(&self) -> Vec<UpdateLogModel> {
        self.update_logs.read().clone()
    }

    pub fn activity_logs(&self) -> Vec<ActivityLogModel> {
        self.activity_logs.read().clone()
    }

    pub fn stage_history(&self) -> Vec<PipelineStageHistoryModel> {
        self.stage_history.read().clone()
    }
}

/// A record type with its own table in the store
pub trait StoredRecord: Identifiable + WorkspaceScoped + Clone + Send + Sync + 'static {
    fn table(store: &MemoryStore) -> &RwLock<HashMap<Uuid, Self>>;
}

impl StoredRecord for ListingModel {
    fn table(store: &MemoryStore) -> &RwLock<HashMap<Uuid, Self>> {
        &store.listings
    }
}

impl StoredRecord for ContactModel {
    fn table(store: &MemoryStore) -> &RwLock<HashMap<Uuid, Self>> {
        &store.contacts
    }
}

impl StoredRecord for DealModel {
    fn table(store: &MemoryStore) -> &RwLock<HashMap<Uuid, Self>> {
        &store.deals
    }
}

/// An append-only log with its own fault switch
pub trait StoredLog: Identifiable + WorkspaceScoped + Clone + Send + Sync + 'static {
    fn log(store: &MemoryStore) -> &RwLock<Vec<Self>>;
    fn fault(store: &MemoryStore) -> &AtomicBool;
}

impl StoredLog for UpdateLogModel {
    fn log(store: &MemoryStore) -> &RwLock<Vec<Self>> {
        &store.update_logs
    }

    fn fault(store: &MemoryStore) -> &AtomicBool {
        &store.faults.update_logs
    }
}

impl StoredLog for ActivityLogModel {
    fn log(store: &MemoryStore) -> &RwLock<Vec<Self>> {
        &store.activity_logs
    }

    fn fault(store: &MemoryStore) -> &AtomicBool {
        &store.faults.activity_logs
    }
}

impl StoredLog for PipelineStageHistoryModel {
    fn log(store: &MemoryStore) -> &RwLock<Vec<Self>> {
        &store.stage_history
    }

    fn fault(store: &MemoryStore) -> &AtomicBool {
        &store.faults.stage_history
    }
}

#[async_trait]
impl<DB: Database, T: StoredRecord> FindById<DB, T> for MemoryStore {
    async fn find_by_id(&self, workspace_id: Uuid, id: Uuid) -> Result<Option<T>, BoxError> {
        Faults::check(&self.faults.record_reads, "record read")?;
        Ok(T::table(self)
            .read()
            .get(&id)
            .filter(|item| item.get_workspace_id() == workspace_id)
            .cloned())
    }
}

#[async_trait]
impl<DB: Database, T: StoredRecord> Create<DB, T> for MemoryStore {
    async fn create(&self, item: &T) -> Result<T, BoxError> {
        Faults::check(&self.faults.record_writes, "record write")?;
        let mut table = T::table(self).write();
        if table.contains_key(&item.get_id()) {
            return Err(format!("duplicate id {}", item.get_id()).into());
        }
        table.insert(item.get_id(), item.clone());
        self.record_writes.fetch_add(1, Ordering::SeqCst);
        Ok(item.clone())
    }
}

#[async_trait]
impl<DB: Database, T: StoredRecord> Update<DB, T> for MemoryStore {
    async fn update(&self, item: &T) -> Result<T, BoxError> {
        Faults::check(&self.faults.record_writes, "record write")?;
        let mut table = T::table(self).write();
        match table.get_mut(&item.get_id()) {
            Some(existing) if existing.get_workspace_id() == item.get_workspace_id() => {
                *existing = item.clone();
                self.record_writes.fetch_add(1, Ordering::SeqCst);
                Ok(item.clone())
            }
            _ => Err(format!("no row for id {}", item.get_id()).into()),
        }
    }
}

#[async_trait]
impl<DB: Database, T: StoredLog> AppendLog<DB, T> for MemoryStore {
    async fn append(&self, entry: &T) -> Result<(), BoxError> {
        Faults::check(T::fault(self), "log append")?;
        T::log(self).write().push(entry.clone());
        Ok(())
    }
}

impl MemoryStore {
    fn matching_updates(
        &self,
        workspace_id: Uuid,
        entity_type: EntityType,
        record_id: Uuid,
        field: Option<&str>,
    ) -> Vec<UpdateLogModel> {
        let mut entries: Vec<UpdateLogModel> = self
            .update_logs
            .read()
            .iter()
            .filter(|e| e.workspace_id == workspace_id)
            .filter(|e| e.entity_type == entity_type && e.record_id == record_id)
            .filter(|e| field.map_or(true, |f| e.field_changed.as_str() == f))
            .cloned()
            .collect();
        // Stable sort keeps insertion order for entries written in the same instant
        entries.sort_by_key(|e| e.updated_at);
        entries
    }
}

#[async_trait]
impl<DB: Database> LoadHistory<DB> for MemoryStore {
    async fn load_history(
        &self,
        workspace_id: Uuid,
        entity_type: EntityType,
        record_id: Uuid,
        field: Option<&str>,
    ) -> Result<Vec<UpdateLogModel>, BoxError> {
        Faults::check(&self.faults.record_reads, "history read")?;
        Ok(self.matching_updates(workspace_id, entity_type, record_id, field))
    }
}

#[async_trait]
impl<DB: Database> LoadAudits<DB> for MemoryStore {
    async fn load_audits(
        &self,
        workspace_id: Uuid,
        entity_type: EntityType,
        record_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<UpdateLogModel>, BoxError> {
        Faults::check(&self.faults.record_reads, "audit read")?;
        let mut entries = self.matching_updates(workspace_id, entity_type, record_id, None);
        entries.reverse();
        Ok(page.slice(entries))
    }
}
