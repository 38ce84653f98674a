//! JSON document format: a surface snapshot plus the element list.

use crate::background::LoadTicket;
use crate::elements::Element;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Document errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Snapshot failed: {0}")]
    Snapshot(String),
}

/// The saved form of a session.
///
/// ```json
/// { "imageData": "data:image/png;base64,...", "elements": [ ... ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedDocument {
    /// Data URI of the whole surface at save time. Empty when absent.
    #[serde(default)]
    pub image_data: String,
    /// Elements in paint order. Required.
    pub elements: Vec<Element>,
}

impl SerializedDocument {
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A background image the host must decode after a document load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub ticket: LoadTicket,
    /// Data URI (or other source string) to decode.
    pub source: String,
}
