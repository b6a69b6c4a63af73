//! Request and response types for the amenity REST API.
//!
//! Profiles travel as raw JSON values: the engine parses them itself so it
//! can keep unrelated envelope fields intact, and mutation responses carry
//! the rewritten document back in the same form.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Health check response.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Request to organise a profile's amenity lists.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct OrganizeReq {
    /// Establishment profile document.
    #[schema(value_type = Object)]
    pub profile: Value,
}

/// One sub-category bucket of the organised view.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct SubSectionRes {
    pub key: String,
    pub title: String,
    pub icon: String,
    pub labels: Vec<String>,
}

/// One main category section of the organised view.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MainSectionRes {
    pub key: String,
    pub title: String,
    pub icon: String,
    pub sub_categories: Vec<SubSectionRes>,
}

/// The organised view of a profile's amenities.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct OrganizeRes {
    pub sections: Vec<MainSectionRes>,
}

/// Request to add an amenity to a profile.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddAmenityReq {
    #[schema(value_type = Object)]
    pub profile: Value,
    /// Optional cross-check; the sub-category alone determines placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_category: Option<String>,
    pub sub_category: String,
    pub text: String,
}

/// Request to rewrite an existing amenity.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditAmenityReq {
    #[schema(value_type = Object)]
    pub profile: Value,
    pub sub_category: String,
    pub old_label: String,
    pub new_text: String,
}

/// Request to remove an amenity.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveAmenityReq {
    #[schema(value_type = Object)]
    pub profile: Value,
    pub sub_category: String,
    pub label: String,
}

/// Result of a mutation request.
///
/// `outcome` is one of `applied`, `removed`, `not-found`, `empty-text` or
/// `unknown-sub-category`. The profile is returned in all cases; it is only
/// rewritten when the outcome reports a change.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MutationRes {
    pub outcome: String,
    /// Sanitised text of the record the mutation touched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Sub-category of the record the mutation touched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[schema(value_type = Object)]
    pub profile: Value,
}

/// Request for amenity suggestions.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct SuggestionsReq {
    #[schema(value_type = Object)]
    pub profile: Value,
    /// Establishment kind override; defaults to the profile's `type` field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// One suggested amenity.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRes {
    pub label: String,
    pub main_category: String,
    pub sub_category: String,
}

/// Suggestions for one establishment.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
pub struct SuggestionsRes {
    pub suggestions: Vec<SuggestionRes>,
}
