//! Category catalogue support for the establishment directory.
//!
//! This crate owns the two-level scheme that amenity labels are organised
//! under: four fixed main categories, each holding sub-categories with
//! display metadata and classification keywords. It also owns the suggestion
//! tables keyed by establishment type.
//!
//! Record storage and mutation live in `e2s-core`. This crate handles
//! catalogue structure, label classification and catalogue file formats only.

pub mod builtin;
pub mod catalog;
pub mod classify;
pub mod keys;
pub mod suggestions;

use thiserror::Error;

/// Errors returned by the `e2s-taxonomy` catalogue crate.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("translation error: {0}")]
    Translation(String),

    #[error("invalid catalogue: {0}")]
    InvalidCatalog(String),
}

// Re-export facades
pub use catalog::Catalog;
pub use suggestions::Suggestions;

// Re-export public domain-level types
pub use catalog::{MainRubric, Placement, SubCategory, Taxonomy};
pub use classify::{classify, resolve_marker};
pub use keys::{MainCategory, Marker, SubKey};
pub use suggestions::{EstablishmentKind, SuggestionCatalog, SuggestionEntry};
