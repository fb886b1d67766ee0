use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// # Documentation
/// One element of the asking price history embedded on a listing.
/// - `price` is the price that was replaced at `date`, never the price being set.
/// - The live `asking_price` on the listing is always newer than the last entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryEntry {
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub date: DateTime<Utc>,
    pub changed_by: Option<Uuid>,
}

/// Decodes a stored history document. Missing or malformed documents
/// read as an empty history.
pub fn price_history_from_json(value: Option<serde_json::Value>) -> Vec<PriceHistoryEntry> {
    value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_serializes_as_number() {
        let entry = PriceHistoryEntry {
            price: Decimal::new(125_000_050, 2),
            date: DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z").unwrap().with_timezone(&Utc),
            changed_by: None,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["price"], json!(1250000.5));
        assert_eq!(value["date"], json!("2024-03-01T10:00:00Z"));
    }

    #[test]
    fn test_malformed_history_reads_as_empty() {
        assert!(price_history_from_json(None).is_empty());
        assert!(price_history_from_json(Some(json!({"price": 1}))).is_empty());
        assert!(price_history_from_json(Some(json!(null))).is_empty());
        let history = price_history_from_json(Some(json!([
            {"price": 100, "date": "2024-01-01T00:00:00Z", "changed_by": null}
        ])));
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].price, Decimal::from(100));
    }
}
