// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The persisted JSON document format.
//!
//! The on-disk shape is stable across editor versions:
//!
//! ```json
//! { "events": [...], "periods": [...], "artists": [...],
//!   "settings": {...}, "version": "2.0" }
//! ```
//!
//! Loading is lenient: every top-level key is optional, missing lists default
//! to empty, and settings are merged field-by-field onto the current defaults
//! so old files survive schema growth. Parsing failures leave the data model
//! untouched — there is no partial import.

use serde::{Deserialize, Serialize};

use crate::item::{ArtistBar, EventCard, PeriodBar};
use crate::settings::{SettingsError, SettingsPatch};

/// Version tag written into exported documents.
pub const DOCUMENT_VERSION: &str = "2.0";

/// Error surfaced to the host's notification layer when persistence fails.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The file is not valid JSON or does not match the document shape.
    #[error("invalid timeline document: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document's settings merge to an unusable configuration.
    #[error("document settings are invalid: {0}")]
    Settings(#[from] SettingsError),
    /// The backing store refused the document, typically because image
    /// payloads pushed it past the browser storage quota. Recoverable: the
    /// in-memory model is unaffected and file export still works.
    #[error("storage quota exceeded; the document is too large to persist")]
    QuotaExceeded,
}

/// A parsed (or to-be-written) timeline document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineDocument {
    /// Event cards; empty when the key is missing.
    pub events: Vec<EventCard>,
    /// Period bars; empty when the key is missing.
    pub periods: Vec<PeriodBar>,
    /// Artist bars; empty when the key is missing.
    pub artists: Vec<ArtistBar>,
    /// Partial settings to merge onto the current ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsPatch>,
    /// Format version tag; absent in the oldest files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl TimelineDocument {
    /// Parses a document from JSON text.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{DOCUMENT_VERSION, TimelineDocument};

    #[test]
    fn missing_top_level_keys_default_to_empty() {
        let doc = TimelineDocument::from_json(r#"{"events": []}"#).unwrap();
        assert!(doc.events.is_empty());
        assert!(doc.periods.is_empty());
        assert!(doc.artists.is_empty());
        assert!(doc.settings.is_none());
        assert!(doc.version.is_none());

        let doc = TimelineDocument::from_json("{}").unwrap();
        assert!(doc.artists.is_empty());
    }

    #[test]
    fn corrupt_json_is_a_typed_error() {
        assert!(TimelineDocument::from_json("{not json").is_err());
        assert!(TimelineDocument::from_json(r#"{"events": 3}"#).is_err());
    }

    #[test]
    fn json_round_trip_preserves_the_document() {
        let json = r#"{
            "events": [{"id": 1, "name": "e", "year": "1969", "image": "data:", "y": 40}],
            "periods": [{"id": 2, "name": "p", "startYear": 1600, "endYear": 1750}],
            "artists": [{"id": 3, "name": "a", "birthYear": 1678, "deathYear": 1741}],
            "settings": {"startYear": -100},
            "version": "2.0"
        }"#;
        let doc = TimelineDocument::from_json(json).unwrap();
        assert_eq!(doc.events[0].year, 1969);
        assert_eq!(doc.version.as_deref(), Some(DOCUMENT_VERSION));

        let reparsed = TimelineDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, doc);
    }
}
