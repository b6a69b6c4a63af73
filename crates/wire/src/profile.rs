//! Establishment profile wire model.
//!
//! Responsibilities:
//! - Define the wire model for profile documents as exchanged with the
//!   directory frontend
//! - Parse with a best-effort field path on schema mismatches
//! - Keep unrelated envelope fields intact so a profile survives an amenity
//!   operation without losing data
//!
//! Notes:
//! - The four amenity lists are the only fields this engine rewrites
//! - Profile persistence belongs to the caller; this crate never touches
//!   storage

use crate::{WireError, WireResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four amenity lists carried by a profile document, in document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WireList {
    Services,
    Ambiance,
    InformationsPratiques,
    PaymentMethods,
}

impl WireList {
    /// All lists in document order.
    pub const ALL: [WireList; 4] = [
        WireList::Services,
        WireList::Ambiance,
        WireList::InformationsPratiques,
        WireList::PaymentMethods,
    ];

    /// The JSON field name of this list.
    pub fn field_name(self) -> &'static str {
        match self {
            WireList::Services => "services",
            WireList::Ambiance => "ambiance",
            WireList::InformationsPratiques => "informationsPratiques",
            WireList::PaymentMethods => "paymentMethods",
        }
    }
}

impl std::fmt::Display for WireList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Wire representation of an establishment profile document.
///
/// Only the amenity lists and a few envelope fields are modelled. Upstream
/// documents carry many unrelated fields (address, description, media and so
/// on); those are captured in `extra` rather than rejected, and serialised
/// back out unchanged.
///
/// The four lists are always serialised, even when empty, so a mutation
/// response states explicitly what each list now holds.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ProfileWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Establishment kind, e.g. `restaurant` or `bar`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub services: Vec<String>,

    #[serde(default)]
    pub ambiance: Vec<String>,

    #[serde(rename = "informationsPratiques", default)]
    pub informations_pratiques: Vec<String>,

    #[serde(rename = "paymentMethods", default)]
    pub payment_methods: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ProfileMetaWire>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Wire representation of profile metadata.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ProfileMetaWire {
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProfileWire {
    /// Borrow one amenity list.
    pub fn list(&self, list: WireList) -> &[String] {
        match list {
            WireList::Services => &self.services,
            WireList::Ambiance => &self.ambiance,
            WireList::InformationsPratiques => &self.informations_pratiques,
            WireList::PaymentMethods => &self.payment_methods,
        }
    }

    /// Mutably borrow one amenity list.
    pub fn list_mut(&mut self, list: WireList) -> &mut Vec<String> {
        match list {
            WireList::Services => &mut self.services,
            WireList::Ambiance => &mut self.ambiance,
            WireList::InformationsPratiques => &mut self.informations_pratiques,
            WireList::PaymentMethods => &mut self.payment_methods,
        }
    }

    /// Total number of amenity entries across the four lists.
    pub fn amenity_count(&self) -> usize {
        WireList::ALL.iter().map(|list| self.list(*list).len()).sum()
    }

    /// Parsed `meta.updatedAt` timestamp, when present and well-formed.
    pub fn updated_at_time(&self) -> Option<DateTime<Utc>> {
        self.meta
            .as_ref()
            .and_then(|meta| meta.updated_at.as_deref())
            .and_then(|s| s.parse::<DateTime<Utc>>().ok())
    }

    /// Stamp `meta.updatedAt` with `now`, creating `meta` when absent.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        let stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        match &mut self.meta {
            Some(meta) => meta.updated_at = Some(stamp),
            None => {
                self.meta = Some(ProfileMetaWire {
                    updated_at: Some(stamp),
                    ..ProfileMetaWire::default()
                });
            }
        }
    }
}

/// Profile document operations.
///
/// This is a zero-sized type used for namespacing profile parsing and
/// rendering. All methods are associated functions.
pub struct Profile;

impl Profile {
    /// Parse a profile document from JSON text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
    /// `services.2`) to the failing field when the document does not match
    /// the wire shape.
    ///
    /// # Arguments
    ///
    /// * `json_text` - JSON text expected to represent a profile document.
    ///
    /// # Returns
    ///
    /// Returns a [`ProfileWire`] with the amenity lists and envelope fields.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Translation`] if a modelled field has an
    /// unexpected type. Unknown envelope fields are not an error.
    pub fn parse(json_text: &str) -> WireResult<ProfileWire> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);
        match serde_path_to_error::deserialize::<_, ProfileWire>(&mut deserializer) {
            Ok(parsed) => Ok(parsed),
            Err(err) => Err(translation_error(err)),
        }
    }

    /// Parse a profile document from an already-decoded JSON value.
    ///
    /// Used by API handlers that receive the profile embedded in a larger
    /// request body.
    ///
    /// # Errors
    ///
    /// Same as [`Profile::parse`].
    pub fn from_value(value: serde_json::Value) -> WireResult<ProfileWire> {
        match serde_path_to_error::deserialize::<_, ProfileWire>(value) {
            Ok(parsed) => Ok(parsed),
            Err(err) => Err(translation_error(err)),
        }
    }

    /// Render a profile document as pretty JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`WireError`] if serialisation fails.
    pub fn render(profile: &ProfileWire) -> WireResult<String> {
        Ok(serde_json::to_string_pretty(profile)?)
    }

    /// Render a profile document as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`WireError`] if serialisation fails.
    pub fn to_value(profile: &ProfileWire) -> WireResult<serde_json::Value> {
        Ok(serde_json::to_value(profile)?)
    }
}

fn translation_error<E: std::fmt::Display>(err: serde_path_to_error::Error<E>) -> WireError {
    let path = err.path().to_string();
    let source = err.into_inner();
    let path = if path.is_empty() {
        "<root>"
    } else {
        path.as_str()
    };
    WireError::Translation(format!("profile schema mismatch at {path}: {source}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> &'static str {
        r#"{
  "id": "7f8a1e24-9be2-4c2e-9d6b-0a5c6c2f1a11",
  "name": "Chez Margaux",
  "type": "restaurant",
  "address": "12 rue des Lices, Angers",
  "services": ["Parking privé|parking", "Wifi gratuit"],
  "ambiance": ["Terrasse|ambiance"],
  "informationsPratiques": ["Ouvert 7j/7|horaires"],
  "paymentMethods": ["CB acceptée|cartes"],
  "meta": { "updatedAt": "2026-03-14T09:30:00Z" }
}"#
    }

    #[test]
    fn round_trips_sample_json() {
        let profile = Profile::parse(sample()).expect("parse profile");
        let output = Profile::render(&profile).expect("render profile");
        let reparsed = Profile::parse(&output).expect("reparse profile");
        assert_eq!(profile, reparsed);
    }

    #[test]
    fn tolerates_unrelated_envelope_fields() {
        let profile = Profile::parse(sample()).expect("parse profile");
        assert_eq!(
            profile.extra.get("address").and_then(|v| v.as_str()),
            Some("12 rue des Lices, Angers")
        );

        let output = Profile::render(&profile).expect("render profile");
        assert!(output.contains("rue des Lices"));
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let profile = Profile::parse(r#"{"name": "Le Zinc"}"#).expect("parse minimal profile");
        assert!(profile.services.is_empty());
        assert!(profile.payment_methods.is_empty());
        assert_eq!(profile.amenity_count(), 0);
    }

    #[test]
    fn renders_lists_even_when_empty() {
        let profile = Profile::parse(r#"{"name": "Le Zinc"}"#).expect("parse minimal profile");
        let output = Profile::render(&profile).expect("render profile");
        assert!(output.contains("\"services\""));
        assert!(output.contains("\"ambiance\""));
        assert!(output.contains("\"informationsPratiques\""));
        assert!(output.contains("\"paymentMethods\""));
    }

    #[test]
    fn rejects_wrong_list_types_with_a_path() {
        let err =
            Profile::parse(r#"{"services": "not a list"}"#).expect_err("should reject wrong type");
        match err {
            WireError::Translation(msg) => {
                assert!(msg.contains("services"));
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_profile_ids() {
        let err = Profile::parse(r#"{"id": "not-a-uuid"}"#).expect_err("should reject bad id");
        match err {
            WireError::Translation(msg) => {
                assert!(msg.contains("id"));
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn parses_updated_at_leniently() {
        let profile =
            Profile::parse(r#"{"meta": {"updatedAt": "pas une date"}}"#).expect("parse profile");
        assert!(profile.updated_at_time().is_none());
    }

    #[test]
    fn touch_stamps_the_metadata() {
        let mut profile = Profile::parse(r#"{"name": "Le Zinc"}"#).expect("parse profile");
        assert!(profile.updated_at_time().is_none());

        let now = "2026-03-14T09:30:00Z"
            .parse::<DateTime<Utc>>()
            .expect("timestamp");
        profile.touch(now);
        assert_eq!(profile.updated_at_time(), Some(now));
    }

    #[test]
    fn touch_preserves_other_metadata_fields() {
        let mut profile = Profile::parse(r#"{"meta": {"createdBy": "import"}}"#)
            .expect("parse profile");

        let now = "2026-03-14T09:30:00Z"
            .parse::<DateTime<Utc>>()
            .expect("timestamp");
        profile.touch(now);

        let meta = profile.meta.as_ref().expect("meta present");
        assert_eq!(
            meta.extra.get("createdBy").and_then(|v| v.as_str()),
            Some("import")
        );
        assert!(profile.updated_at_time().is_some());
    }
}
