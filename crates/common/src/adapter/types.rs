//! Core types exchanged between the auction framework and bid adapters.

use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::openrtb::OpenRtbRequest;

/// One ad slot of an auction, as handed to the adapter by the framework.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdUnit {
    /// Code of the adapter placing this slot (e.g. "r2b2").
    pub bidder: String,
    /// Slot identity; becomes the impression ID.
    pub ad_unit_code: String,
    /// Adapter params, kept verbatim for the impression ext.
    #[serde(default)]
    pub params: Option<Map<String, Value>>,
    /// Legacy `[[w, h], ...]` sizes. Kept as raw JSON so that one odd
    /// descriptor cannot fail the whole auction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Value>,
    #[serde(default)]
    pub media_types: Option<MediaTypes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaTypes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<BannerMediaType>,
    /// Adapter-defined video parameters, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Value>,
    #[serde(default, flatten)]
    pub other: Map<String, Value>,
}

impl MediaTypes {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.banner.is_none() && self.video.is_none() && self.other.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BannerMediaType {
    /// Any size-input form: `"300x250,728x90"`, `["300x250"]`, `[300, 250]`
    /// or `[[300, 250], [728, 90]]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Value>,
}

/// Targeting params of one ad unit reported to the sync endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Value>,
    #[serde(rename = "g", default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Value>,
    #[serde(rename = "p", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m: Option<Value>,
}

impl Placement {
    /// Projects the four placement keys out of an ad unit's params.
    #[must_use]
    pub fn from_params(params: Option<&Map<String, Value>>) -> Self {
        let field = |key: &str| params.and_then(|p| p.get(key)).cloned();
        Self {
            domain: field("d"),
            group: field("g"),
            position: field("p"),
            m: field("m"),
        }
    }
}

/// The framework's record of one bid request, matched positionally against
/// seat bids in the response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalBid {
    pub bid_id: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

/// Media type enumeration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Banner,
    Video,
}

/// Bid in the framework's normalized shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedBid {
    pub request_id: String,
    pub cpm: f64,
    pub width: u32,
    pub height: u32,
    pub creative_id: String,
    pub currency: String,
    pub net_revenue: bool,
    /// Seconds the bid stays valid.
    pub ttl: u32,
    /// Creative markup.
    pub ad: String,
    /// Win notice URL, for bids delivered by URL instead of markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ad_url: Option<String>,
    pub bidder_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub media_type: MediaType,
}

/// Outbound request description handed to the transport.
#[derive(Debug, Clone)]
pub struct ServerRequest {
    pub method: Method,
    pub url: String,
    pub data: OpenRtbRequest,
    /// Placements of this build, to be passed on to the sync step.
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOptions {
    #[serde(default)]
    pub iframe_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncType {
    Iframe,
}

/// Instruction for the host to load a user-sync URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSync {
    #[serde(rename = "type")]
    pub sync_type: SyncType,
    pub url: String,
}
