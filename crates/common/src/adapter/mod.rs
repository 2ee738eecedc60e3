//! Bid adapter abstractions shared by every adapter implementation.
//!
//! - [`types`]: ad units, placements, normalized bids and sync instructions
//! - [`provider`]: the [`BidAdapter`] trait
//! - [`sizes`]: banner size parsing

pub mod provider;
pub mod sizes;
pub mod types;

pub use provider::BidAdapter;
pub use types::{
    AdUnit, MediaType, NormalizedBid, OriginalBid, Placement, ServerRequest, SyncOptions,
    UserSync,
};
