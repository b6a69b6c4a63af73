//! Wire/boundary support for establishment profile documents.
//!
//! This crate translates between the JSON profile documents the directory
//! frontend exchanges and the amenity lists the core engine works on:
//! - four flat amenity lists (`services`, `ambiance`, `informationsPratiques`,
//!   `paymentMethods`) holding raw `text|marker` entries
//! - a tolerant envelope for the unrelated profile fields that travel with
//!   them
//!
//! Category meaning lives in `e2s-taxonomy`; records and mutation live in
//! `e2s-core`. This crate handles document shape only.

pub mod profile;

// Re-export facades
pub use profile::Profile;

// Re-export public wire-level types
pub use profile::{ProfileMetaWire, ProfileWire, WireList};

/// Errors returned by the `e2s-wire` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`WireError`].
pub type WireResult<T> = Result<T, WireError>;
