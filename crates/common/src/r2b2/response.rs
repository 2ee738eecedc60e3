//! Bid server response to normalized bids.
//!
//! The response is untrusted. Structural problems with the envelope fail the
//! whole response; problems with a single seat's bid only skip that seat.

use error_stack::Report;
use serde_json::Value;

use crate::adapter::types::{MediaType, NormalizedBid, OriginalBid};
use crate::constants::{BIDDER_CODE, BID_CURRENCY, BID_TTL_SECONDS, NET_REVENUE};
use crate::error::AdapterError;
use crate::openrtb::Bid;

fn invalid(message: &str) -> Report<AdapterError> {
    Report::new(AdapterError::InvalidResponse {
        message: message.to_string(),
    })
}

/// Interprets `{ body: { seatbid: [ { bid: [...] }, ... ] } }`.
///
/// Seat `i` is paired with `bids[i]` and only its first bid is read.
///
/// # Errors
///
/// Returns [`AdapterError::InvalidResponse`] when the body is missing or not
/// an object, when `seatbid` is present but not an array, or when a seat is
/// not an object carrying a `bid` array.
pub fn try_interpret_response(
    response: &Value,
    bids: &[OriginalBid],
) -> Result<Vec<NormalizedBid>, Report<AdapterError>> {
    let body = response
        .get("body")
        .filter(|body| body.is_object())
        .ok_or_else(|| invalid("response body is missing or not an object"))?;

    let seatbids = match body.get("seatbid") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(seatbids)) => seatbids,
        Some(_) => return Err(invalid("seatbid is not an array")),
    };

    let mut normalized = Vec::new();
    for (index, seatbid) in seatbids.iter().enumerate() {
        let seat_bids = seatbid
            .get("bid")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid("seatbid entry has no bid array"))
            .map_err(|report| report.attach(format!("seat index {index}")))?;

        let Some(entry) = seat_bids.first() else {
            continue;
        };
        let Some(original) = bids.get(index) else {
            log::debug!("r2b2: no bid request at index {index}, skipping seat");
            continue;
        };
        let Some(bid) = Bid::from_json(entry) else {
            log::debug!("r2b2: skipping bid without price at index {index}");
            continue;
        };

        normalized.push(to_normalized_bid(bid, original));
    }

    Ok(normalized)
}

/// Same as [`try_interpret_response`], with any failure mapped to no bids.
#[must_use]
pub fn interpret_response(response: &Value, bids: &[OriginalBid]) -> Vec<NormalizedBid> {
    match try_interpret_response(response, bids) {
        Ok(normalized) => {
            log::info!("r2b2 returned {} bids", normalized.len());
            normalized
        }
        Err(report) => {
            log::warn!("r2b2: discarding bid response: {report:?}");
            Vec::new()
        }
    }
}

fn to_normalized_bid(bid: Bid, original: &OriginalBid) -> NormalizedBid {
    NormalizedBid {
        request_id: original.bid_id.clone(),
        cpm: bid.price,
        width: bid.w.unwrap_or_default(),
        height: bid.h.unwrap_or_default(),
        creative_id: bid.crid.unwrap_or_default(),
        currency: BID_CURRENCY.to_string(),
        net_revenue: NET_REVENUE,
        ttl: BID_TTL_SECONDS,
        ad: bid.adm.unwrap_or_default(),
        ad_url: bid.nurl,
        bidder_code: BIDDER_CODE.to_string(),
        transaction_id: original.transaction_id.clone(),
        // Video bids are not distinguished by the bid server.
        media_type: MediaType::Banner,
    }
}
