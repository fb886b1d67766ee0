use std::fmt::Debug;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::ApiError;

/// A writable field of a record type.
///
/// `ALL` lists every writable field in declaration order; `TRACKED` is the
/// subset whose changes land in the update log, in the same order.
pub trait TrackedField: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];
    const TRACKED: &'static [Self];

    /// Column name, also written to `field_changed`
    fn column(self) -> &'static str;

    /// Human label used in activity descriptions
    fn label(self) -> &'static str;

    fn is_status(self) -> bool;

    fn is_tracked(self) -> bool {
        Self::TRACKED.contains(&self)
    }
}

macro_rules! record_fields {
    (
        $(#[$meta:meta])*
        $name:ident {
            tracked: [$($tracked:ident => ($tcol:literal, $tlabel:literal)),+ $(,)?],
            untracked: [$($untracked:ident => ($ucol:literal, $ulabel:literal)),* $(,)?],
            status: $status:ident $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($tracked,)+
            $($untracked,)*
        }

        impl TrackedField for $name {
            const ALL: &'static [Self] = &[$($name::$tracked,)+ $($name::$untracked,)*];
            const TRACKED: &'static [Self] = &[$($name::$tracked,)+];

            fn column(self) -> &'static str {
                match self {
                    $($name::$tracked => $tcol,)+
                    $($name::$untracked => $ucol,)*
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $($name::$tracked => $tlabel,)+
                    $($name::$untracked => $ulabel,)*
                }
            }

            fn is_status(self) -> bool {
                self == $name::$status
            }
        }

        impl FromStr for $name {
            type Err = ApiError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as TrackedField>::ALL
                    .iter()
                    .copied()
                    .find(|field| field.column() == s)
                    .ok_or_else(|| ApiError::ValidationError(format!(
                        "Unknown {} field: {s}",
                        stringify!($name)
                    )))
            }
        }
    };
}

record_fields! {
    /// Writable listing fields. Visibility flags close the tracked list.
    ListingField {
        tracked: [
            Status => ("status", "status"),
            AskingPrice => ("asking_price", "asking price"),
            RentalPrice => ("rental_price", "rental price"),
            Grade => ("grade", "grade"),
            ListingType => ("listing_type", "listing type"),
            PropertyType => ("property_type", "property type"),
            Bedrooms => ("bedrooms", "bedrooms"),
            Bathrooms => ("bathrooms", "bathrooms"),
            Size => ("size_sqm", "size"),
            Floor => ("floor", "floor"),
            Zone => ("zone", "zone"),
            IsPublished => ("is_published", "published"),
            ShowPrice => ("show_price", "show price"),
            IsFeatured => ("is_featured", "featured"),
            IsExclusive => ("is_exclusive", "exclusive"),
        ],
        untracked: [
            Title => ("title", "title"),
            UnitPhotos => ("unit_photos", "unit photos"),
            Notes => ("notes", "notes"),
        ],
        status: Status,
    }
}

record_fields! {
    ContactField {
        tracked: [
            FirstName => ("first_name", "first name"),
            LastName => ("last_name", "last name"),
            Email => ("email", "email"),
            Phone => ("phone", "phone"),
            ContactType => ("contact_type", "contact type"),
            Status => ("status", "status"),
            Source => ("source", "source"),
            BudgetMin => ("budget_min", "minimum budget"),
            BudgetMax => ("budget_max", "maximum budget"),
            PreferredZone => ("preferred_zone", "preferred zone"),
            AssignedAgent => ("assigned_agent_id", "assigned agent"),
        ],
        untracked: [
            Notes => ("notes", "notes"),
        ],
        status: Status,
    }
}
