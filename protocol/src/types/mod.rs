//! # Protocol Types
//!
//! The sub-objects operations are built from. Each renders itself in both
//! wire forms: `BinaryEncode` for the signed payload and serde for the
//! structured form.

pub mod account_options;
pub mod asset_amount;
pub mod authority;
pub mod extensions;
pub mod memo;
pub mod object_id;

pub use account_options::{AccountOptions, VoteId};
pub use asset_amount::AssetAmount;
pub use authority::Authority;
pub use extensions::Extensions;
pub use memo::Memo;
pub use object_id::ObjectId;
