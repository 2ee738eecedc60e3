//! The r2b2 bid adapter.
//!
//! - [`request`]: ad units to the `OpenRTB` bid request
//! - [`response`]: bid server response to normalized bids
//! - [`sync`]: user-sync instructions from placements
//!
//! Placements produced by a build are returned in the [`ServerRequest`] and
//! must be handed back to [`R2b2Adapter::user_syncs`] by the caller; the
//! adapter itself keeps no per-auction state.

pub mod request;
pub mod response;
pub mod sync;

use serde_json::Value;

use crate::adapter::provider::BidAdapter;
use crate::adapter::types::{
    AdUnit, MediaType, NormalizedBid, OriginalBid, Placement, ServerRequest, SyncOptions,
    UserSync,
};
use crate::constants::BIDDER_CODE;
use crate::settings::{AdapterSettings, Settings};

const SUPPORTED_MEDIA_TYPES: &[MediaType] = &[MediaType::Banner, MediaType::Video];

pub struct R2b2Adapter {
    config: AdapterSettings,
}

impl R2b2Adapter {
    #[must_use]
    pub fn new(config: AdapterSettings) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        log::info!(
            "Registering r2b2 bid adapter (bid_url={}, debug={})",
            settings.adapter.bid_url,
            settings.adapter.debug
        );
        Self::new(settings.adapter.clone())
    }
}

impl BidAdapter for R2b2Adapter {
    fn code(&self) -> &'static str {
        BIDDER_CODE
    }

    fn supported_media_types(&self) -> &'static [MediaType] {
        SUPPORTED_MEDIA_TYPES
    }

    fn is_bid_request_valid(&self, ad_unit: &AdUnit) -> bool {
        request::is_bid_request_valid(ad_unit)
    }

    fn build_requests(&self, ad_units: &[AdUnit]) -> ServerRequest {
        log::info!("r2b2: requesting bids for {} ad units", ad_units.len());
        request::build_request(ad_units, self.config.debug, &self.config.bid_url)
    }

    fn interpret_response(&self, response: &Value, bids: &[OriginalBid]) -> Vec<NormalizedBid> {
        response::interpret_response(response, bids)
    }

    fn user_syncs(&self, options: &SyncOptions, placements: &[Placement]) -> Vec<UserSync> {
        sync::user_syncs(options, &self.config.sync_url, placements)
    }
}
