pub mod contact_repository;
pub mod deal_repository;
pub mod listing_repository;

pub use contact_repository::ContactRepositoryImpl;
pub use deal_repository::DealRepositoryImpl;
pub use listing_repository::ListingRepositoryImpl;
