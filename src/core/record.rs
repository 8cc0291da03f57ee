//! Purpose: Turn one parsed JSON document into a normalized `ImageRecord`.
//! Exports: `ImageRecord`, `RecordDefaults`, `DEFAULTS`.
//! Role: Schema boundary between raw JSON and the conversion pipeline.
//! Invariants: `annotated_image` must be an object and `annotated_image.base64` a string.
//! Invariants: Optional fields that are absent or not strings take the `DEFAULTS` values.
//! Invariants: No base64 validation happens here; decoding owns that.
use serde_json::{Map, Value};

use crate::core::error::Error;

pub const ANNOTATED_IMAGE_KEY: &str = "annotated_image";
pub const BASE64_KEY: &str = "base64";

/// Values substituted for optional fields missing from a document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RecordDefaults {
    pub job_id: &'static str,
    pub filename: &'static str,
    pub mime: &'static str,
}

pub const DEFAULTS: RecordDefaults = RecordDefaults {
    job_id: "unknown_job",
    filename: "image",
    mime: "application/octet-stream",
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageRecord {
    pub job_id: String,
    pub filename: String,
    pub mime: String,
    pub base64_data: String,
}

impl ImageRecord {
    /// Extract a record from a document shaped like
    /// `{"job_id": .., "annotated_image": {"filename": .., "mime": .., "base64": ..}}`.
    pub fn from_json(payload: &Value) -> Result<Self, Error> {
        let annotated = payload
            .get(ANNOTATED_IMAGE_KEY)
            .and_then(Value::as_object)
            .ok_or_else(|| Error::missing_field(ANNOTATED_IMAGE_KEY))?;
        let base64_data = annotated
            .get(BASE64_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::missing_field(BASE64_KEY))?;

        Ok(Self {
            job_id: optional_str(payload.as_object(), "job_id", DEFAULTS.job_id),
            filename: optional_str(Some(annotated), "filename", DEFAULTS.filename),
            mime: optional_str(Some(annotated), "mime", DEFAULTS.mime),
            base64_data: base64_data.to_string(),
        })
    }
}

fn optional_str(object: Option<&Map<String, Value>>, key: &str, default: &str) -> String {
    object
        .and_then(|map| map.get(key))
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}
