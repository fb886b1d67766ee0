use brokerage_core_api::{
    ApiResult, ListingField, ListingPatch, ListingStatus, NewListing, TrackedValue,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::Database;
use uuid::Uuid;
use validator::Validate;

use crate::models::listing::ListingModel;
use crate::models::update_log::UpdateLogModel;
use crate::repository::{Page, PageRequest};
use crate::service::record_tracker::{MutationOutcome, RecordTracker};
use crate::tracking::days_on_market::live_days_on_market;
use crate::tracking::price_history::{build_price_history_view, PricePoint};
use crate::tracking::timeline::{build_timeline, TimelineSegment};

/// Everything the listing detail page shows about a listing's past
#[derive(Debug, Clone, Serialize)]
pub struct ListingHistoryView {
    pub listing_id: Uuid,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
    pub days_on_market: Option<i64>,
    pub timeline: Vec<TimelineSegment>,
    pub price_history: Vec<PricePoint>,
}

pub struct ListingService<DB: Database> {
    tracker: RecordTracker<DB, ListingModel>,
}

impl<DB: Database> Clone for ListingService<DB> {
    fn clone(&self) -> Self {
        Self {
            tracker: self.tracker.clone(),
        }
    }
}

impl<DB: Database> ListingService<DB> {
    pub fn new(tracker: RecordTracker<DB, ListingModel>) -> Self {
        Self { tracker }
    }

    pub async fn create_listing(
        &self,
        workspace_id: Uuid,
        new: NewListing,
    ) -> ApiResult<MutationOutcome<ListingModel>> {
        new.validate()?;
        let at = Utc::now();
        let listing = ListingModel::create(workspace_id, new, self.tracker.current_actor(), at)?;
        self.tracker.create(listing, at).await
    }

    pub async fn update_listing(
        &self,
        workspace_id: Uuid,
        listing_id: Uuid,
        patch: ListingPatch,
    ) -> ApiResult<MutationOutcome<ListingModel>> {
        self.tracker.update(workspace_id, listing_id, &patch).await
    }

    pub async fn update_listing_field(
        &self,
        workspace_id: Uuid,
        listing_id: Uuid,
        field: ListingField,
        value: TrackedValue,
    ) -> ApiResult<MutationOutcome<ListingModel>> {
        self.tracker
            .update_field(workspace_id, listing_id, field, value)
            .await
    }

    /// Status timeline, live days on market and price history of a listing
    pub async fn listing_history(
        &self,
        workspace_id: Uuid,
        listing_id: Uuid,
    ) -> ApiResult<ListingHistoryView> {
        let listing = self.tracker.load(workspace_id, listing_id).await?;
        let status_changes = self
            .tracker
            .field_history(workspace_id, listing_id, ListingField::Status)
            .await?;
        let now = Utc::now();

        Ok(ListingHistoryView {
            listing_id,
            status: listing.status,
            created_at: listing.created_at,
            days_on_market: live_days_on_market(
                listing.status,
                listing.days_on_market,
                listing.status_changed_at,
                now,
            ),
            timeline: build_timeline(&status_changes, listing.status.as_str(), now),
            price_history: build_price_history_view(
                &listing.asking_price_history,
                listing.asking_price,
                listing.asking_price_since(),
            ),
        })
    }

    pub async fn audit_trail(
        &self,
        workspace_id: Uuid,
        listing_id: Uuid,
        page: PageRequest,
    ) -> ApiResult<Page<UpdateLogModel>> {
        self.tracker.audit_trail(workspace_id, listing_id, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use brokerage_core_api::{ActionType, ApiError};
    use rust_decimal::Decimal;
    use sqlx::Postgres;
    use tokio_test::{assert_err, assert_ok};

    use crate::service::actor::FixedActor;
    use crate::service::TrackingServices;
    use crate::testing::fixtures::{new_listing, sample_listing, OTHER_WORKSPACE_ID, WORKSPACE_ID};
    use crate::testing::MemoryStore;
    use crate::tracking::price_history::PriceDirection;

    type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

    fn services(store: &Arc<MemoryStore>) -> ListingService<Postgres> {
        TrackingServices::new(store.repositories::<Postgres>(), Arc::new(FixedActor(agent())))
            .listings
    }

    fn agent() -> Uuid {
        Uuid::from_u128(0xa9e1)
    }

    fn seeded(store: &Arc<MemoryStore>, status: ListingStatus) -> ListingModel {
        let listing = sample_listing(status);
        store.insert_listing(listing.clone());
        listing
    }

    fn price(value: i64) -> Option<Option<Decimal>> {
        Some(Some(Decimal::from(value)))
    }

    #[tokio::test]
    async fn test_create_seeds_status_entry_and_created_activity() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let outcome = services(&store)
            .create_listing(WORKSPACE_ID, new_listing(ListingStatus::Active))
            .await?;

        let listing = outcome.record;
        assert_eq!(listing.days_on_market, Some(0));
        assert_eq!(listing.status_changed_at, Some(listing.created_at));
        assert_eq!(listing.created_by, Some(agent()));

        let logs = store.update_logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].field_changed.as_str(), "status");
        assert_eq!(logs[0].old_value, None);
        assert_eq!(logs[0].new_value.as_deref(), Some("ACTIVE"));
        assert_eq!(logs[0].updated_at, listing.created_at);

        let activities = store.activity_logs();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].action_type, ActionType::Created);
        assert_eq!(activities[0].actor_id, Some(agent()));
        assert_eq!(outcome.audit.written, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_as_new_has_no_days_on_market() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let outcome = services(&store)
            .create_listing(WORKSPACE_ID, new_listing(ListingStatus::New))
            .await?;
        assert_eq!(outcome.record.days_on_market, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_listing_is_rejected_before_any_write() {
        let store = Arc::new(MemoryStore::new());
        let mut new = new_listing(ListingStatus::New);
        new.title = String::new();

        let result = services(&store).create_listing(WORKSPACE_ID, new).await;

        assert!(matches!(assert_err!(result), ApiError::ValidationError(_)));
        assert_eq!(store.record_writes(), 0);
        assert!(store.update_logs().is_empty());
    }

    #[tokio::test]
    async fn test_price_change_logs_and_accumulates_history() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let listing = seeded(&store, ListingStatus::Active);
        let service = services(&store);

        let patch = ListingPatch {
            asking_price: price(1_150_000),
            ..Default::default()
        };
        let outcome = service.update_listing(WORKSPACE_ID, listing.id, patch).await?;

        assert_eq!(outcome.changes.len(), 1);
        let updated = store.listing(listing.id).unwrap();
        assert_eq!(updated.asking_price, Some(Decimal::from(1_150_000)));
        assert_eq!(updated.asking_price_history.len(), 1);
        assert_eq!(updated.asking_price_history[0].price, Decimal::from(1_250_000));
        assert_eq!(updated.asking_price_history[0].changed_by, Some(agent()));

        let logs = store.update_logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].field_changed.as_str(), "asking_price");
        assert_eq!(logs[0].old_value.as_deref(), Some("1250000"));
        assert_eq!(logs[0].new_value.as_deref(), Some("1150000"));
        assert_eq!(logs[0].status.as_deref(), Some("ACTIVE"));
        assert_eq!(logs[0].updated_by, Some(agent()));
        Ok(())
    }

    #[tokio::test]
    async fn test_history_grows_only_on_real_price_changes() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let listing = seeded(&store, ListingStatus::Active);
        let service = services(&store);

        for value in [1_200_000, 1_200_000, 1_100_000, 1_000_000] {
            let patch = ListingPatch {
                asking_price: price(value),
                ..Default::default()
            };
            service.update_listing(WORKSPACE_ID, listing.id, patch).await?;
        }

        let updated = store.listing(listing.id).unwrap();
        let prices: Vec<Decimal> = updated.asking_price_history.iter().map(|e| e.price).collect();
        assert_eq!(
            prices,
            [1_250_000, 1_200_000, 1_100_000].map(Decimal::from).to_vec()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_setting_price_from_null_is_logged_without_history() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let mut listing = sample_listing(ListingStatus::New);
        listing.asking_price = None;
        store.insert_listing(listing.clone());

        let patch = ListingPatch {
            asking_price: price(900_000),
            ..Default::default()
        };
        services(&store)
            .update_listing(WORKSPACE_ID, listing.id, patch)
            .await?;

        assert!(store.listing(listing.id).unwrap().asking_price_history.is_empty());
        let logs = store.update_logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].old_value, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_repeating_an_update_writes_no_new_entries() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let listing = seeded(&store, ListingStatus::Active);
        let service = services(&store);
        let patch = ListingPatch {
            status: Some(ListingStatus::UnderOffer),
            zone: Some(Some("Palm Jumeirah".to_string())),
            is_featured: Some(true),
            ..Default::default()
        };

        let first = service.update_listing(WORKSPACE_ID, listing.id, patch.clone()).await?;
        let entries_after_first = store.update_logs().len();
        let second = service.update_listing(WORKSPACE_ID, listing.id, patch).await?;

        assert_eq!(first.changes.len(), 3);
        assert!(second.changes.is_empty());
        assert_eq!(store.update_logs().len(), entries_after_first);
        assert_eq!(store.activity_logs().len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_status_change_is_logged_with_new_status() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let listing = seeded(&store, ListingStatus::New);
        let patch = ListingPatch {
            status: Some(ListingStatus::Active),
            bedrooms: Some(Some(3)),
            ..Default::default()
        };

        let outcome = services(&store)
            .update_listing(WORKSPACE_ID, listing.id, patch)
            .await?;

        let updated = outcome.record;
        assert_eq!(updated.days_on_market, Some(0));
        assert_eq!(updated.status_changed_at, Some(updated.updated_at));

        let logs = store.update_logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].field_changed.as_str(), "status");
        assert_eq!(logs[0].status.as_deref(), Some("ACTIVE"));
        // Non-status changes carry the status from before the update
        assert_eq!(logs[1].field_changed.as_str(), "bedrooms");
        assert_eq!(logs[1].status.as_deref(), Some("NEW"));

        let actions: Vec<ActionType> = store.activity_logs().iter().map(|a| a.action_type).collect();
        assert_eq!(actions, vec![ActionType::StatusChanged, ActionType::Updated]);
        Ok(())
    }

    #[tokio::test]
    async fn test_reactivation_keeps_days_on_market_snapshot() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let mut listing = sample_listing(ListingStatus::Withdrawn);
        listing.days_on_market = Some(37);
        store.insert_listing(listing.clone());

        let patch = ListingPatch {
            status: Some(ListingStatus::Active),
            ..Default::default()
        };
        let outcome = services(&store)
            .update_listing(WORKSPACE_ID, listing.id, patch)
            .await?;

        assert_eq!(outcome.record.days_on_market, Some(37));
        Ok(())
    }

    #[tokio::test]
    async fn test_untracked_fields_are_saved_without_log_entries() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let listing = seeded(&store, ListingStatus::Active);
        let patch = ListingPatch {
            title: Some("Marina View 2BR, upgraded".to_string()),
            notes: Some(Some("Owner abroad until May".to_string())),
            ..Default::default()
        };

        let outcome = services(&store)
            .update_listing(WORKSPACE_ID, listing.id, patch)
            .await?;

        assert!(outcome.persisted);
        assert_eq!(store.listing(listing.id).unwrap().title, "Marina View 2BR, upgraded");
        assert!(store.update_logs().is_empty());
        assert!(store.activity_logs().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_new_photos_produce_upload_activity() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let listing = seeded(&store, ListingStatus::Active);
        let mut photos = listing.unit_photos.clone();
        photos.push("photos/kitchen.jpg".to_string());
        photos.push("photos/balcony.jpg".to_string());

        let patch = ListingPatch {
            unit_photos: Some(photos),
            ..Default::default()
        };
        services(&store)
            .update_listing(WORKSPACE_ID, listing.id, patch)
            .await?;

        let activities = store.activity_logs();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].action_type, ActionType::PhotoUploaded);
        assert_eq!(activities[0].metadata["photo_count"], 2);
        assert!(store.update_logs().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_single_field_update_with_same_value_writes_nothing() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let listing = seeded(&store, ListingStatus::Active);

        let outcome = services(&store)
            .update_listing_field(
                WORKSPACE_ID,
                listing.id,
                ListingField::AskingPrice,
                TrackedValue::Number(Decimal::new(125_000_000, 2)),
            )
            .await?;

        assert!(!outcome.persisted);
        assert_eq!(store.record_writes(), 0);
        assert!(store.update_logs().is_empty());
        assert!(store.activity_logs().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_single_field_update_compares_parsed_value() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let listing = seeded(&store, ListingStatus::Active);

        let outcome = services(&store)
            .update_listing_field(
                WORKSPACE_ID,
                listing.id,
                ListingField::AskingPrice,
                TrackedValue::Text("1250000.00".into()),
            )
            .await?;

        assert!(!outcome.persisted);
        assert_eq!(store.record_writes(), 0);
        assert_eq!(store.listing(listing.id).unwrap().updated_at, listing.updated_at);
        assert!(store.update_logs().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_single_field_update_applies_change() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let listing = seeded(&store, ListingStatus::Active);

        let outcome = services(&store)
            .update_listing_field(
                WORKSPACE_ID,
                listing.id,
                ListingField::Zone,
                TrackedValue::Text("Business Bay".into()),
            )
            .await?;

        assert!(outcome.persisted);
        assert_eq!(
            store.listing(listing.id).unwrap().zone.as_deref(),
            Some("Business Bay")
        );
        assert_eq!(store.update_logs().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_single_field_update_rejects_wrong_shape() {
        let store = Arc::new(MemoryStore::new());
        let listing = seeded(&store, ListingStatus::Active);
        let service = services(&store);

        let bad_flag = service
            .update_listing_field(
                WORKSPACE_ID,
                listing.id,
                ListingField::IsPublished,
                TrackedValue::Text("sometimes".into()),
            )
            .await;
        let photos = service
            .update_listing_field(
                WORKSPACE_ID,
                listing.id,
                ListingField::UnitPhotos,
                TrackedValue::Text("photos/new.jpg".into()),
            )
            .await;

        assert!(matches!(assert_err!(bad_flag), ApiError::ValidationError(_)));
        assert!(matches!(assert_err!(photos), ApiError::ValidationError(_)));
        assert_eq!(store.record_writes(), 0);
    }

    #[tokio::test]
    async fn test_missing_or_foreign_listing_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let listing = seeded(&store, ListingStatus::Active);
        let service = services(&store);
        let patch = ListingPatch {
            status: Some(ListingStatus::Sold),
            ..Default::default()
        };

        let missing = service
            .update_listing(WORKSPACE_ID, Uuid::new_v4(), patch.clone())
            .await;
        let foreign = service
            .update_listing(OTHER_WORKSPACE_ID, listing.id, patch)
            .await;

        assert!(matches!(assert_err!(missing), ApiError::NotFound(_)));
        assert!(matches!(assert_err!(foreign), ApiError::NotFound(_)));
        assert_eq!(store.record_writes(), 0);
        assert!(store.update_logs().is_empty());
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_block_update() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let listing = seeded(&store, ListingStatus::Active);
        store.faults().fail_update_logs(true);
        store.faults().fail_activity_logs(true);

        let patch = ListingPatch {
            status: Some(ListingStatus::Sold),
            ..Default::default()
        };
        let outcome = services(&store)
            .update_listing(WORKSPACE_ID, listing.id, patch)
            .await;

        let outcome = assert_ok!(outcome);
        assert_eq!(outcome.audit.failed, 2);
        assert_eq!(outcome.audit.written, 0);
        assert_eq!(store.listing(listing.id).unwrap().status, ListingStatus::Sold);
        Ok(())
    }

    #[tokio::test]
    async fn test_primary_write_failure_propagates_without_audit() {
        let store = Arc::new(MemoryStore::new());
        let listing = seeded(&store, ListingStatus::Active);
        store.faults().fail_record_writes(true);

        let patch = ListingPatch {
            status: Some(ListingStatus::Sold),
            ..Default::default()
        };
        let result = services(&store)
            .update_listing(WORKSPACE_ID, listing.id, patch)
            .await;

        assert!(matches!(assert_err!(result), ApiError::DatabaseError(_)));
        assert!(store.update_logs().is_empty());
        assert!(store.activity_logs().is_empty());
        assert_eq!(store.listing(listing.id).unwrap().status, ListingStatus::Active);
    }

    #[tokio::test]
    async fn test_listing_history_combines_timeline_and_prices() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let service = services(&store);
        let created = service
            .create_listing(WORKSPACE_ID, new_listing(ListingStatus::New))
            .await?
            .record;

        let activate = ListingPatch {
            status: Some(ListingStatus::Active),
            asking_price: price(1_300_000),
            ..Default::default()
        };
        service.update_listing(WORKSPACE_ID, created.id, activate).await?;

        let view = service.listing_history(WORKSPACE_ID, created.id).await?;

        assert_eq!(view.status, ListingStatus::Active);
        assert_eq!(view.days_on_market, Some(0));

        let statuses: Vec<&str> = view.timeline.iter().map(|s| s.status.as_str()).collect();
        assert_eq!(statuses, vec!["NEW", "ACTIVE"]);
        assert!(!view.timeline[0].is_ongoing);
        assert!(view.timeline[1].is_ongoing);

        assert_eq!(view.price_history.len(), 2);
        assert_eq!(view.price_history[1].price, Decimal::from(1_300_000));
        assert_eq!(view.price_history[1].direction, Some(PriceDirection::Up));
        assert!(view.price_history[1].is_current);
        Ok(())
    }

    #[tokio::test]
    async fn test_current_price_date_ignores_later_edits() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let service = services(&store);
        let listing = seeded(&store, ListingStatus::Active);

        let reprice = ListingPatch {
            asking_price: price(1_190_000),
            ..Default::default()
        };
        service.update_listing(WORKSPACE_ID, listing.id, reprice).await?;
        let before = service.listing_history(WORKSPACE_ID, listing.id).await?;

        let notes = ListingPatch {
            notes: Some(Some("Owner travelling until March".into())),
            status: Some(ListingStatus::UnderOffer),
            ..Default::default()
        };
        service.update_listing(WORKSPACE_ID, listing.id, notes).await?;
        let after = service.listing_history(WORKSPACE_ID, listing.id).await?;

        let repriced_at = store.listing(listing.id).unwrap().asking_price_history[0].date;
        let current_date = |view: &ListingHistoryView| {
            view.price_history
                .iter()
                .find(|point| point.is_current)
                .map(|point| point.date)
        };
        assert_eq!(current_date(&before), Some(repriced_at));
        assert_eq!(current_date(&after), Some(repriced_at));
        Ok(())
    }

    #[tokio::test]
    async fn test_audit_trail_is_newest_first() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let service = services(&store);
        let listing = service
            .create_listing(WORKSPACE_ID, new_listing(ListingStatus::New))
            .await?
            .record;
        for status in [ListingStatus::Active, ListingStatus::UnderOffer, ListingStatus::Sold] {
            let patch = ListingPatch {
                status: Some(status),
                ..Default::default()
            };
            service.update_listing(WORKSPACE_ID, listing.id, patch).await?;
        }

        let page = service
            .audit_trail(WORKSPACE_ID, listing.id, PageRequest::new(2, 0))
            .await?;

        assert_eq!(page.total, 4);
        assert!(page.has_more());
        let newest: Vec<Option<&str>> = page.items.iter().map(|e| e.new_value.as_deref()).collect();
        assert_eq!(newest, vec![Some("SOLD"), Some("UNDER_OFFER")]);
        Ok(())
    }
}
