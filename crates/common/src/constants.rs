/// Bidder code registered with the auction framework.
pub const BIDDER_CODE: &str = "r2b2";

pub const DEFAULT_BID_URL: &str = "//hb.trackad.cz/openrtb2/bid";
pub const DEFAULT_SYNC_URL: &str = "//hb.trackad.cz/cookieSync";

/// Time budget in milliseconds the bid server is asked to honor.
pub const TMAX_MS: u64 = 1000;

pub const BID_CURRENCY: &str = "EUR";
pub const BID_TTL_SECONDS: u32 = 360;
pub const NET_REVENUE: bool = true;

/// Query parameter carrying the encoded placements on the sync URL.
pub const SYNC_PLACEMENTS_PARAM: &str = "p";
