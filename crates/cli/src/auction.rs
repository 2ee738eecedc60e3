//! Auction commands: build a bid request, interpret a response, emit syncs.
//!
//! Inputs are JSON files in the auction framework's shapes. Results are
//! written to stdout as pretty-printed JSON.

use std::fs;
use std::path::Path;

use r2b2_common::adapter::{
    AdUnit, BidAdapter, NormalizedBid, OriginalBid, Placement, SyncOptions, UserSync,
};
use r2b2_common::openrtb::OpenRtbRequest;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;

/// Request description as handed to the transport.
#[derive(Debug, Serialize)]
pub struct BuildOutput {
    pub method: String,
    pub url: String,
    pub data: OpenRtbRequest,
    pub placements: Vec<Placement>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = fs::read_to_string(path).map_err(|e| CliError::read_input(path, e))?;
    serde_json::from_str(&content).map_err(|e| CliError::InvalidInput {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let output = serde_json::to_string_pretty(value).map_err(|e| CliError::Output {
        message: e.to_string(),
    })?;
    println!("{output}");
    Ok(())
}

/// Builds the bid request for the ad units in `ad_units_file`.
///
/// Ad units failing the adapter's validity check are dropped before building.
pub fn build(adapter: &dyn BidAdapter, ad_units_file: &Path) -> Result<BuildOutput, CliError> {
    let ad_units: Vec<AdUnit> = read_json(ad_units_file)?;

    let (valid, rejected): (Vec<AdUnit>, Vec<AdUnit>) = ad_units
        .into_iter()
        .partition(|unit| adapter.is_bid_request_valid(unit));
    for unit in &rejected {
        log::warn!(
            "Skipping ad unit {}: params d, g and p are required",
            unit.ad_unit_code
        );
    }

    let request = adapter.build_requests(&valid);
    Ok(BuildOutput {
        method: request.method.to_string(),
        url: request.url,
        data: request.data,
        placements: request.placements,
    })
}

/// Interprets a raw `{ "body": ... }` response against the original bids.
///
/// An unreadable response file is treated like a malformed response and
/// yields no bids.
pub fn interpret(
    adapter: &dyn BidAdapter,
    response_file: &Path,
    bids_file: &Path,
) -> Result<Vec<NormalizedBid>, CliError> {
    let bids: Vec<OriginalBid> = read_json(bids_file)?;
    let response: Value = match read_json(response_file) {
        Ok(response) => response,
        Err(e @ CliError::InvalidInput { .. }) => {
            log::warn!("{e}");
            Value::Null
        }
        Err(e) => return Err(e),
    };

    Ok(adapter.interpret_response(&response, &bids))
}

pub fn sync(
    adapter: &dyn BidAdapter,
    placements_file: &Path,
    iframe_enabled: bool,
) -> Result<Vec<UserSync>, CliError> {
    let placements: Vec<Placement> = read_json(placements_file)?;
    Ok(adapter.user_syncs(&SyncOptions { iframe_enabled }, &placements))
}

pub fn run_build(adapter: &dyn BidAdapter, ad_units_file: &Path) -> Result<(), CliError> {
    print_json(&build(adapter, ad_units_file)?)
}

pub fn run_interpret(
    adapter: &dyn BidAdapter,
    response_file: &Path,
    bids_file: &Path,
) -> Result<(), CliError> {
    print_json(&interpret(adapter, response_file, bids_file)?)
}

pub fn run_sync(
    adapter: &dyn BidAdapter,
    placements_file: &Path,
    iframe_enabled: bool,
) -> Result<(), CliError> {
    print_json(&sync(adapter, placements_file, iframe_enabled)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use r2b2_common::r2b2::R2b2Adapter;
    use r2b2_common::settings::AdapterSettings;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn adapter() -> R2b2Adapter {
        R2b2Adapter::new(AdapterSettings {
            bid_url: "https://bid.example.com/openrtb2/bid".to_string(),
            sync_url: "https://bid.example.com/cookieSync".to_string(),
            debug: false,
        })
    }

    fn write_json(value: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("should create temp file");
        file.write_all(value.to_string().as_bytes())
            .expect("should write JSON");
        file
    }

    #[test]
    fn build_skips_invalid_ad_units() {
        let file = write_json(&json!([
            {
                "bidder": "r2b2",
                "adUnitCode": "slot-1",
                "params": {"d": "example.com", "g": "news", "p": "top"},
                "sizes": [[300, 250]]
            },
            {
                "bidder": "r2b2",
                "adUnitCode": "slot-2",
                "params": {"d": "example.com"}
            }
        ]));

        let output = build(&adapter(), file.path()).expect("should build request");
        assert_eq!(output.method, "POST");
        assert_eq!(output.url, "https://bid.example.com/openrtb2/bid");
        assert_eq!(output.data.imp.len(), 1);
        assert_eq!(output.data.imp[0].id, "slot-1");
        assert_eq!(output.placements.len(), 1);
    }

    #[test]
    fn build_keeps_unit_with_null_sizes() {
        let file = write_json(&json!([
            {
                "bidder": "r2b2",
                "adUnitCode": "slot-1",
                "params": {"d": "example.com", "g": "news", "p": "top"},
                "sizes": [[300, 250]]
            },
            {
                "bidder": "r2b2",
                "adUnitCode": "slot-2",
                "params": {"d": "example.com", "g": "news", "p": "side"},
                "sizes": null
            }
        ]));

        let output = build(&adapter(), file.path()).expect("should build request");
        assert_eq!(output.data.imp.len(), 2);
        assert!(output.data.imp[0].banner.is_some());
        assert!(output.data.imp[1].banner.is_none());
        assert_eq!(output.placements.len(), 2);
    }

    #[test]
    fn build_reports_missing_input_file() {
        let err = build(&adapter(), Path::new("/nonexistent/units.json"))
            .expect_err("should fail for missing file");
        assert!(matches!(err, CliError::ReadInput { .. }));
    }

    #[test]
    fn build_rejects_non_list_input() {
        let file = write_json(&json!({"adUnitCode": "slot-1"}));
        let err = build(&adapter(), file.path()).expect_err("should reject object input");
        assert!(matches!(err, CliError::InvalidInput { .. }));
    }

    #[test]
    fn interpret_reads_response_and_bids() {
        let response = write_json(&json!({"body": {"seatbid": [
            {"bid": [{"price": 1.2, "w": 300, "h": 250, "crid": "c", "adm": "a"}]}
        ]}}));
        let bids = write_json(&json!([{"bidId": "x", "transactionId": "y"}]));

        let normalized =
            interpret(&adapter(), response.path(), bids.path()).expect("should interpret");
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].request_id, "x");
    }

    #[test]
    fn interpret_treats_unparsable_response_as_no_bids() {
        let mut response = NamedTempFile::new().expect("should create temp file");
        response
            .write_all(b"<html>bad gateway</html>")
            .expect("should write body");
        let bids = write_json(&json!([{"bidId": "x"}]));

        let normalized =
            interpret(&adapter(), response.path(), bids.path()).expect("should not fail");
        assert!(normalized.is_empty());
    }

    #[test]
    fn sync_respects_iframe_flag() {
        let placements = write_json(&json!([{"d": "example.com", "g": "news", "p": "top"}]));

        let syncs = sync(&adapter(), placements.path(), true).expect("should build syncs");
        assert_eq!(syncs.len(), 1);
        assert!(syncs[0]
            .url
            .starts_with("https://bid.example.com/cookieSync?p="));

        let syncs = sync(&adapter(), placements.path(), false).expect("should build syncs");
        assert!(syncs.is_empty());
    }
}
