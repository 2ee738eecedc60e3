//! Banner size parsing.
//!
//! Ad units describe banner sizes either as legacy `[[w, h], ...]` pairs or
//! through `mediaTypes.banner.sizes`, which accepts several size-input forms.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::openrtb::Format;

static SIZE_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d+)x(\d+)$").expect("size pattern should compile"));

/// Parses a `"WxH"` size string.
#[must_use]
pub fn parse_size_string(size: &str) -> Option<Format> {
    let captures = SIZE_STRING.captures(size)?;
    let w = captures.get(1)?.as_str().parse().ok()?;
    let h = captures.get(2)?.as_str().parse().ok()?;
    Some(Format { w, h })
}

/// Parses any size-input form into formats, dropping entries that are not a
/// valid size.
///
/// Accepted forms:
/// - `"300x250,728x90"`: comma separated size strings
/// - `[300, 250]`: a single pair
/// - `[[300, 250], [728, 90]]` or `["300x250", "728x90"]`: a list of sizes
#[must_use]
pub fn parse_sizes_input(sizes: &Value) -> Vec<Format> {
    match sizes {
        Value::String(list) => list.split(',').filter_map(parse_size_string).collect(),
        Value::Array(items) => {
            if let Some(format) = pair_to_format(items) {
                return vec![format];
            }
            items
                .iter()
                .filter_map(|item| match item {
                    Value::Array(pair) => pair_to_format(pair),
                    Value::String(size) => parse_size_string(size),
                    _ => None,
                })
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Converts legacy `[w, h]` pairs, skipping entries that do not start with
/// two whole-number dimensions.
#[must_use]
pub fn formats_from_pairs(pairs: &[Value]) -> Vec<Format> {
    pairs
        .iter()
        .filter_map(|pair| match pair.as_array()?.as_slice() {
            [w, h, ..] => Some(Format {
                w: dimension(w)?,
                h: dimension(h)?,
            }),
            _ => None,
        })
        .collect()
}

fn pair_to_format(pair: &[Value]) -> Option<Format> {
    match pair {
        [w, h] => Some(Format {
            w: dimension(w)?,
            h: dimension(h)?,
        }),
        _ => None,
    }
}

fn dimension(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|v| u32::try_from(v).ok())
}
