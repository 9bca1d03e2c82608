use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::tracking_item::TrackingItem;

/// One tracking record as returned by the document backend.
///
/// `key` and `parent` may be numbers or strings. Unknown fields are kept in
/// `extra`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingItemDto {
    pub key: Value,
    pub parent: Value,

    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub execute: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepted layouts of a tracking file: a bare array or `{ "tracking": [...] }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TrackingFileDto {
    List(Vec<TrackingItemDto>),
    Wrapped { tracking: Vec<TrackingItemDto> },
}

impl TrackingFileDto {
    pub fn into_items(self) -> Vec<TrackingItem> {
        let dtos = match self {
            TrackingFileDto::List(dtos) => dtos,
            TrackingFileDto::Wrapped { tracking } => tracking,
        };
        dtos.into_iter().map(TrackingItem::from).collect()
    }
}
