//! Raw response types for the Overpass interpreter.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level `[out:json]` envelope. Fields other than `elements` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// One element as returned by `out body;`.
///
/// `lat`/`lon` are optional because ways and relations carry no position of
/// their own.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}
