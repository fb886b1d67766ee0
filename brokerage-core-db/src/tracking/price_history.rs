use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

use crate::models::price_history::PriceHistoryEntry;

/// Returns the history with the replaced price appended.
///
/// A listing that had no asking price has nothing to remember, so the
/// history comes back unchanged. Entries are never reordered or deduplicated.
pub fn append_price_history(
    old_price: Option<Decimal>,
    current: &[PriceHistoryEntry],
    changed_by: Option<Uuid>,
    at: DateTime<Utc>,
) -> Vec<PriceHistoryEntry> {
    let mut history = current.to_vec();
    if let Some(price) = old_price {
        history.push(PriceHistoryEntry {
            price,
            date: at,
            changed_by,
        });
    }
    history
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceDirection {
    Up,
    Down,
    Unchanged,
}

impl PriceDirection {
    fn of(delta: Decimal) -> Self {
        match delta.cmp(&Decimal::ZERO) {
            Ordering::Greater => PriceDirection::Up,
            Ordering::Less => PriceDirection::Down,
            Ordering::Equal => PriceDirection::Unchanged,
        }
    }
}

/// One row of the price history shown on a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: Decimal,
    pub date: DateTime<Utc>,
    pub changed_by: Option<Uuid>,
    pub change_from_previous: Option<Decimal>,
    pub direction: Option<PriceDirection>,
    pub is_current: bool,
}

/// Builds the chronological price view from the stored history plus the live
/// asking price, which closes the list as the current entry dated `as_of`,
/// the moment that price took effect.
///
/// Returns an empty view when fewer than two prices are known.
pub fn build_price_history_view(
    history: &[PriceHistoryEntry],
    current_price: Option<Decimal>,
    as_of: DateTime<Utc>,
) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = history
        .iter()
        .map(|entry| PricePoint {
            price: entry.price,
            date: entry.date,
            changed_by: entry.changed_by,
            change_from_previous: None,
            direction: None,
            is_current: false,
        })
        .collect();

    if let Some(price) = current_price {
        points.push(PricePoint {
            price,
            date: as_of,
            changed_by: None,
            change_from_previous: None,
            direction: None,
            is_current: true,
        });
    }

    if points.len() <= 1 {
        return Vec::new();
    }

    for i in 1..points.len() {
        let delta = points[i].price - points[i - 1].price;
        points[i].change_from_previous = Some(delta);
        points[i].direction = Some(PriceDirection::of(delta));
    }
    points
}
