use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Declares a closed set of SCREAMING_SNAKE_CASE codes shared by serde,
/// the postgres enum type and the audit log text representation.
macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $type_name:literal {
            $($variant:ident => $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
        #[cfg_attr(feature = "sqlx", sqlx(type_name = $type_name, rename_all = "SCREAMING_SNAKE_CASE"))]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ApiError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok($name::$variant),)+
                    _ => Err(ApiError::ValidationError(format!(
                        "Invalid {}: {s}",
                        stringify!($name)
                    ))),
                }
            }
        }
    };
}

code_enum! {
    /// Lifecycle of a listing. `Active` drives the live days-on-market figure.
    ListingStatus as "listing_status" {
        New => "NEW",
        Active => "ACTIVE",
        UnderOffer => "UNDER_OFFER",
        Reserved => "RESERVED",
        Sold => "SOLD",
        Rented => "RENTED",
        Withdrawn => "WITHDRAWN",
        Expired => "EXPIRED",
    }
}

code_enum! {
    ListingGrade as "listing_grade" {
        A => "A",
        B => "B",
        C => "C",
    }
}

code_enum! {
    /// Whether a unit is offered for sale, for rent, or both
    ListingType as "listing_type" {
        Sale => "SALE",
        Rent => "RENT",
        SaleAndRent => "SALE_AND_RENT",
    }
}

code_enum! {
    PropertyType as "property_type" {
        Apartment => "APARTMENT",
        Penthouse => "PENTHOUSE",
        Villa => "VILLA",
        Townhouse => "TOWNHOUSE",
        Office => "OFFICE",
        Retail => "RETAIL",
        Land => "LAND",
        Warehouse => "WAREHOUSE",
    }
}

code_enum! {
    ContactType as "contact_type" {
        Buyer => "BUYER",
        Seller => "SELLER",
        Tenant => "TENANT",
        Landlord => "LANDLORD",
        Investor => "INVESTOR",
        Developer => "DEVELOPER",
        Other => "OTHER",
    }
}

code_enum! {
    /// Lead qualification stage of a contact
    ContactStatus as "contact_status" {
        New => "NEW",
        Contacted => "CONTACTED",
        Qualified => "QUALIFIED",
        Negotiating => "NEGOTIATING",
        Converted => "CONVERTED",
        Lost => "LOST",
    }
}

code_enum! {
    /// Side of the transaction a deal represents
    DealSide as "deal_side" {
        Buy => "BUY",
        Sell => "SELL",
    }
}

code_enum! {
    /// Entity an activity or update log row points at
    EntityType as "entity_type" {
        Listing => "LISTING",
        Contact => "CONTACT",
        Deal => "DEAL",
    }
}

code_enum! {
    ActionType as "activity_action_type" {
        Created => "CREATED",
        Updated => "UPDATED",
        Archived => "ARCHIVED",
        Restored => "RESTORED",
        StatusChanged => "STATUS_CHANGED",
        StageChanged => "STAGE_CHANGED",
        PhotoUploaded => "PHOTO_UPLOADED",
    }
}
