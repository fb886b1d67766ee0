use brokerage_core_api::{RecordPatch, TrackedField, TrackedValue};

use crate::models::tracked_record::TrackedRecord;

/// A tracked field whose proposed value differs from the current one
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange<F> {
    pub field: F,
    pub old_value: TrackedValue,
    pub new_value: TrackedValue,
}

/// Diffs proposed values against the current snapshot.
///
/// Only fields listed in `tracked` are considered and the result follows the
/// order of `tracked`. Fields not present in `proposed` are skipped.
pub fn detect_changes<F, C>(current: C, proposed: &[(F, TrackedValue)], tracked: &[F]) -> Vec<FieldChange<F>>
where
    F: TrackedField,
    C: Fn(F) -> TrackedValue,
{
    tracked
        .iter()
        .filter_map(|&field| {
            let (_, new_value) = proposed.iter().find(|(f, _)| *f == field)?;
            let old_value = current(field);
            if old_value.same_as(new_value) {
                None
            } else {
                Some(FieldChange {
                    field,
                    old_value,
                    new_value: new_value.clone(),
                })
            }
        })
        .collect()
}

/// Tracked changes a patch would make to a record
pub fn detect_record_changes<R: TrackedRecord>(current: &R, patch: &R::Patch) -> Vec<FieldChange<R::Field>> {
    detect_changes(
        |field| current.tracked_value(field),
        &patch.proposed_values(),
        <R::Field as TrackedField>::TRACKED,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use brokerage_core_api::{ListingField, ListingPatch, ListingStatus};
    use rust_decimal::Decimal;

    use crate::testing::fixtures::sample_listing;

    fn current(field: ListingField) -> TrackedValue {
        match field {
            ListingField::Status => TrackedValue::Enum("ACTIVE".into()),
            ListingField::AskingPrice => TrackedValue::Number(Decimal::from(100)),
            ListingField::Bedrooms => TrackedValue::Integer(0),
            _ => TrackedValue::Null,
        }
    }

    #[test]
    fn test_changed_field_yields_one_change() {
        let proposed = vec![(ListingField::AskingPrice, TrackedValue::Number(Decimal::from(120)))];
        let changes = detect_changes(current, &proposed, ListingField::TRACKED);
        assert_eq!(
            changes,
            vec![FieldChange {
                field: ListingField::AskingPrice,
                old_value: TrackedValue::Number(Decimal::from(100)),
                new_value: TrackedValue::Number(Decimal::from(120)),
            }]
        );
    }

    #[test]
    fn test_equal_values_yield_nothing() {
        let proposed = vec![
            (ListingField::Status, TrackedValue::Enum("ACTIVE".into())),
            (ListingField::AskingPrice, TrackedValue::Number(Decimal::new(10000, 2))),
        ];
        assert!(detect_changes(current, &proposed, ListingField::TRACKED).is_empty());
    }

    #[test]
    fn test_clearing_zero_is_a_change() {
        let proposed = vec![(ListingField::Bedrooms, TrackedValue::Null)];
        let changes = detect_changes(current, &proposed, ListingField::TRACKED);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].old_value, TrackedValue::Integer(0));
        assert_eq!(changes[0].new_value, TrackedValue::Null);
    }

    #[test]
    fn test_untracked_fields_are_ignored() {
        let proposed = vec![
            (ListingField::Title, TrackedValue::Text("Sea view".into())),
            (ListingField::Notes, TrackedValue::Text("keys at desk".into())),
        ];
        assert!(detect_changes(current, &proposed, ListingField::TRACKED).is_empty());
    }

    #[test]
    fn test_output_follows_declaration_order() {
        let proposed = vec![
            (ListingField::IsFeatured, TrackedValue::Boolean(true)),
            (ListingField::Zone, TrackedValue::Text("Marina".into())),
            (ListingField::Status, TrackedValue::Enum("SOLD".into())),
        ];
        let fields: Vec<_> = detect_changes(current, &proposed, ListingField::TRACKED)
            .into_iter()
            .map(|c| c.field)
            .collect();
        assert_eq!(fields, vec![ListingField::Status, ListingField::Zone, ListingField::IsFeatured]);
    }

    #[test]
    fn test_record_changes_from_patch() {
        let listing = sample_listing(ListingStatus::New);
        let patch = ListingPatch {
            status: Some(ListingStatus::Active),
            title: Some("Renamed".to_string()),
            asking_price: Some(listing.asking_price),
            ..Default::default()
        };
        let changes = detect_record_changes(&listing, &patch);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field, ListingField::Status);
        assert_eq!(changes[0].old_value, TrackedValue::Enum("NEW".into()));
        assert_eq!(changes[0].new_value, TrackedValue::Enum("ACTIVE".into()));
    }
}
