//! Saved assets and delete acknowledgements shared by the image, tts and video domains.

use chrono::{DateTime, NaiveDateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A saved asset as returned by `/api/{domain}/save` or listed by `/api/{domain}/saved`.
///
/// The backend's shape differs per domain, so only the common fields are typed
/// and everything else is kept in `extra`. Ids may arrive as numbers and
/// timestamps may lack a zone; neither fails the decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct SavedAsset {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "file_path")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default)]
    pub saved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "createdAt",
        deserialize_with = "lenient_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
    Other(Value),
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) => Some(s),
        Some(RawId::Number(n)) => Some(n.to_string()),
        Some(RawId::Other(_)) | None => None,
    })
}

/// RFC 3339, or a zone-less ISO timestamp read as UTC. Anything else is dropped.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let Some(raw) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let Some(text) = raw.as_str() else {
        return Ok(None);
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }
    Ok(NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc()))
}

/// A list of saved assets. Accepts a bare array or a `{"files": [...]}` /
/// `{"items": [...]}` wrapper.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SavedList {
    Bare(Vec<SavedAsset>),
    Files { files: Vec<SavedAsset> },
    Items { items: Vec<SavedAsset> },
}

impl SavedList {
    pub fn into_vec(self) -> Vec<SavedAsset> {
        match self {
            SavedList::Bare(v) => v,
            SavedList::Files { files } => files,
            SavedList::Items { items } => items,
        }
    }
}

/// Acknowledgement returned by `DELETE /api/{domain}/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DeleteAck {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "lenient_ack_id")]
    pub id: String,
}

fn lenient_ack_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient_id(deserializer)?.unwrap_or_default())
}

fn default_success() -> bool {
    true
}
