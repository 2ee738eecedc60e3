use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Minimal subset of OpenRTB 2.x bid request sent to the bid server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenRtbRequest {
    /// Unique ID of the bid request; also used as the source transaction ID.
    pub id: String,
    pub source: Source,
    /// Maximum time in milliseconds the server may take to respond.
    pub tmax: u64,
    pub imp: Vec<Imp>,
    /// 1 marks the request as test traffic.
    pub test: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub tid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imp {
    pub id: String,
    /// Single entry keyed by bidder code holding that bidder's params.
    pub ext: HashMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub format: Vec<Format>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    pub w: u32,
    pub h: u32,
}

/// One bid entry of a seat, as the bid server sends it.
///
/// Only `price` is required; the other fields are kept when they carry a
/// usable type and left out otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bid {
    pub price: f64,
    pub w: Option<u32>,
    pub h: Option<u32>,
    /// Creative ID; numeric IDs are kept in their decimal form.
    pub crid: Option<String>,
    pub adm: Option<String>,
    pub nurl: Option<String>,
}

impl Bid {
    /// Reads a bid entry, returning `None` when it is not an object or has no
    /// numeric `price`.
    #[must_use]
    pub fn from_json(bid_obj: &Value) -> Option<Self> {
        let bid_obj = bid_obj.as_object()?;
        let price = bid_obj.get("price").and_then(Value::as_f64)?;

        let dimension = |key: &str| {
            bid_obj
                .get(key)
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
        };
        let text = |key: &str| {
            bid_obj
                .get(key)
                .and_then(Value::as_str)
                .map(ToString::to_string)
        };
        let crid = match bid_obj.get("crid") {
            Some(Value::String(crid)) => Some(crid.clone()),
            Some(Value::Number(crid)) => Some(crid.to_string()),
            _ => None,
        };

        Some(Self {
            price,
            w: dimension("w"),
            h: dimension("h"),
            crid,
            adm: text("adm"),
            nurl: text("nurl"),
        })
    }
}
