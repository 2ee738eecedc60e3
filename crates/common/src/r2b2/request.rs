//! Ad units to `OpenRTB` bid request.

use std::collections::HashMap;

use http::Method;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::adapter::sizes::{formats_from_pairs, parse_sizes_input};
use crate::adapter::types::{AdUnit, MediaTypes, Placement, ServerRequest};
use crate::constants::TMAX_MS;
use crate::openrtb::{Banner, Imp, OpenRtbRequest, Source};

/// Where an ad unit's banner dimensions come from, resolved once per unit.
#[derive(Debug, Clone, Copy, PartialEq)]
enum BannerGeometry<'a> {
    None,
    /// Legacy `sizes` pairs, used only when `mediaTypes` is absent or empty.
    Pairs(&'a [Value]),
    /// `mediaTypes.banner.sizes`; overrides the legacy pairs.
    SizeList(&'a Value),
}

impl<'a> BannerGeometry<'a> {
    fn resolve(ad_unit: &'a AdUnit) -> Self {
        let size_list = ad_unit
            .media_types
            .as_ref()
            .and_then(|media_types| media_types.banner.as_ref())
            .and_then(|banner| banner.sizes.as_ref())
            .filter(|sizes| is_truthy(Some(*sizes)));
        if let Some(sizes) = size_list {
            return BannerGeometry::SizeList(sizes);
        }

        let media_types_empty = ad_unit
            .media_types
            .as_ref()
            .map_or(true, MediaTypes::is_empty);
        if !media_types_empty {
            return BannerGeometry::None;
        }

        // Anything but a non-empty list of pairs is treated as no sizes.
        match ad_unit.sizes.as_ref().and_then(Value::as_array) {
            Some(pairs) if !pairs.is_empty() && pairs.iter().all(Value::is_array) => {
                BannerGeometry::Pairs(pairs)
            }
            _ => BannerGeometry::None,
        }
    }

    fn into_banner(self) -> Option<Banner> {
        match self {
            BannerGeometry::None => None,
            BannerGeometry::Pairs(pairs) => Some(Banner {
                format: formats_from_pairs(pairs),
            }),
            BannerGeometry::SizeList(sizes) => Some(Banner {
                format: parse_sizes_input(sizes),
            }),
        }
    }
}

/// JavaScript truthiness over JSON values, as used by the framework's
/// param checks.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// An ad unit is eligible only when its params carry truthy `d`, `g` and `p`.
#[must_use]
pub fn is_bid_request_valid(ad_unit: &AdUnit) -> bool {
    ad_unit.params.as_ref().is_some_and(|params| {
        ["d", "g", "p"]
            .iter()
            .all(|key| is_truthy(params.get(*key)))
    })
}

fn to_imp(ad_unit: &AdUnit) -> Imp {
    let banner = BannerGeometry::resolve(ad_unit).into_banner();

    let video = ad_unit
        .media_types
        .as_ref()
        .and_then(|media_types| media_types.video.as_ref())
        .and_then(Value::as_object)
        .filter(|video| !video.is_empty())
        .cloned();

    let params = ad_unit.params.clone().unwrap_or_else(Map::new);
    let ext = HashMap::from([(ad_unit.bidder.clone(), Value::Object(params))]);

    Imp {
        id: ad_unit.ad_unit_code.clone(),
        ext,
        banner,
        video,
    }
}

/// Builds the bid request for one auction.
///
/// Impressions and placements keep the order of `ad_units`; the response is
/// later matched against it by index.
#[must_use]
pub fn build_request(ad_units: &[AdUnit], debug: bool, bid_url: &str) -> ServerRequest {
    let placements: Vec<Placement> = ad_units
        .iter()
        .map(|ad_unit| Placement::from_params(ad_unit.params.as_ref()))
        .collect();
    let imp: Vec<Imp> = ad_units.iter().map(to_imp).collect();

    let tid = Uuid::new_v4().to_string();
    let data = OpenRtbRequest {
        id: tid.clone(),
        source: Source { tid },
        tmax: TMAX_MS,
        imp,
        test: u8::from(debug),
    };

    log::debug!(
        "r2b2: built bid request {} with {} impressions",
        data.id,
        data.imp.len()
    );

    ServerRequest {
        method: Method::POST,
        url: bid_url.to_string(),
        data,
        placements,
    }
}
