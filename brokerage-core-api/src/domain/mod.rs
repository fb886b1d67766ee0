pub mod contact_request;
pub mod enums;
pub mod field;
pub mod listing_request;
pub mod patch;
pub mod value;

pub use contact_request::*;
pub use enums::*;
pub use field::*;
pub use listing_request::*;
pub use patch::{deserialize_some, RecordPatch};
pub use value::*;
