//! Trait definition for bid adapters.

use serde_json::Value;

use super::types::{
    AdUnit, MediaType, NormalizedBid, OriginalBid, Placement, ServerRequest, SyncOptions,
    UserSync,
};

/// Trait implemented by bid adapters plugged into the auction framework.
pub trait BidAdapter: Send + Sync {
    /// Bidder code the adapter is registered under (e.g. "r2b2").
    fn code(&self) -> &'static str;

    /// Alternative codes the adapter also answers to.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn supported_media_types(&self) -> &'static [MediaType];

    /// Check if this adapter supports a specific media type.
    fn supports_media_type(&self, media_type: &MediaType) -> bool {
        self.supported_media_types().contains(media_type)
    }

    /// Admission check the framework applies to each ad unit before building.
    fn is_bid_request_valid(&self, ad_unit: &AdUnit) -> bool;

    /// Build the single outbound request for one auction.
    ///
    /// Implementations must not fail: malformed ad units degrade to
    /// impressions without the affected fields.
    fn build_requests(&self, ad_units: &[AdUnit]) -> ServerRequest;

    /// Turn an untrusted server response into normalized bids.
    ///
    /// Malformed responses yield no bids rather than an error.
    fn interpret_response(&self, response: &Value, bids: &[OriginalBid]) -> Vec<NormalizedBid>;

    /// Build user-sync instructions from the placements of the last build.
    fn user_syncs(&self, options: &SyncOptions, placements: &[Placement]) -> Vec<UserSync>;
}
