//! User-sync URL construction.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use error_stack::{Report, ResultExt};
use serde::Serialize;

use crate::adapter::types::{SyncOptions, SyncType, UserSync};
use crate::constants::SYNC_PLACEMENTS_PARAM;
use crate::error::AdapterError;

/// Serializes `items` as compact JSON and base64-encodes the result.
///
/// # Errors
///
/// Returns [`AdapterError::Serialization`] if `items` cannot be encoded as
/// JSON.
pub fn encode_sync_payload<T: Serialize>(items: &[T]) -> Result<String, Report<AdapterError>> {
    let json = serde_json::to_string(items).change_context(AdapterError::Serialization {
        message: "Failed to serialize placements".to_string(),
    })?;
    Ok(BASE64.encode(json.as_bytes()))
}

/// Returns a single iframe sync pointing at `sync_url` when iframe syncing is
/// enabled, and nothing otherwise.
#[must_use]
pub fn user_syncs<T: Serialize>(
    options: &SyncOptions,
    sync_url: &str,
    placements: &[T],
) -> Vec<UserSync> {
    if !options.iframe_enabled {
        return Vec::new();
    }

    match encode_sync_payload(placements) {
        Ok(encoded) => vec![UserSync {
            sync_type: SyncType::Iframe,
            url: format!("{sync_url}?{SYNC_PLACEMENTS_PARAM}={encoded}"),
        }],
        Err(report) => {
            log::warn!("r2b2: skipping user sync: {report:?}");
            Vec::new()
        }
    }
}
