//! # E2S Core
//!
//! Core business logic for the establishment amenity engine.
//!
//! This crate contains pure data operations over profile documents:
//! - Ingestion of the four wire amenity lists into one ordered record set
//! - Aggregation into the organised two-level view
//! - Add, edit and remove mutations reporting explicit outcomes
//! - Per-kind amenity suggestions
//!
//! **No API concerns**: HTTP servers and request/response types belong in `api-shared` and the
//! server binary.

pub mod config;
pub mod error;
pub mod interop;
pub mod mutations;
pub mod organize;
pub mod records;
pub mod suggest;

pub use config::{load_suggestions, load_taxonomy, CoreConfig};
pub use error::{AmenityError, AmenityResult};
pub use interop::{ingest, list_for, render_into};
pub use mutations::MutationOutcome;
pub use organize::{organize, MainSection, OrganizedView, SubSection};
pub use records::{AmenityRecord, AmenitySet, AmenityText};
pub use suggest::{suggest, Suggestion};

use chrono::Utc;
use e2s_taxonomy::{EstablishmentKind, SubKey};
use e2s_wire::ProfileWire;
use std::sync::Arc;

/// Profile-level amenity operations - no API concerns.
///
/// The service holds the resolved configuration behind an `Arc`, so clones
/// share the same validated catalogues and every call against one service
/// classifies identically.
#[derive(Clone)]
pub struct AmenityService {
    config: Arc<CoreConfig>,
}

impl AmenityService {
    /// Creates a new service over a resolved configuration.
    pub fn new(config: CoreConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Organise a profile's amenity lists into the two-level view.
    pub fn organize(&self, profile: &ProfileWire) -> OrganizedView {
        let set = interop::ingest(profile, self.config.taxonomy());
        organize::organize(&set, self.config.taxonomy())
    }

    /// Add an amenity under `sub`, rewriting the profile lists on success.
    pub fn add(&self, profile: &mut ProfileWire, sub: &SubKey, text: &str) -> MutationOutcome {
        let taxonomy = self.config.taxonomy();
        let mut set = interop::ingest(profile, taxonomy);
        let outcome = mutations::add(&mut set, taxonomy, sub, text);
        self.conclude(profile, &set, outcome)
    }

    /// Rewrite the amenity matching `sub` and `old_label`.
    pub fn edit(
        &self,
        profile: &mut ProfileWire,
        sub: &SubKey,
        old_label: &str,
        new_text: &str,
    ) -> MutationOutcome {
        let taxonomy = self.config.taxonomy();
        let mut set = interop::ingest(profile, taxonomy);
        let outcome = mutations::edit(&mut set, taxonomy, sub, old_label, new_text);
        self.conclude(profile, &set, outcome)
    }

    /// Remove the amenity matching `sub` and `label`.
    pub fn remove(&self, profile: &mut ProfileWire, sub: &SubKey, label: &str) -> MutationOutcome {
        let taxonomy = self.config.taxonomy();
        let mut set = interop::ingest(profile, taxonomy);
        let outcome = mutations::remove(&mut set, taxonomy, sub, label);
        self.conclude(profile, &set, outcome)
    }

    /// Suggestions for a profile, excluding amenities it already has.
    ///
    /// `kind` overrides the profile's own `type` field when given. An
    /// unknown or missing kind yields no suggestions rather than an error.
    pub fn suggest(&self, profile: &ProfileWire, kind: Option<&str>) -> Vec<Suggestion> {
        let raw_kind = kind.or(profile.kind.as_deref());
        let kind = match raw_kind.and_then(EstablishmentKind::from_key) {
            Some(kind) => kind,
            None => {
                tracing::debug!("No suggestion table for establishment kind {raw_kind:?}");
                return Vec::new();
            }
        };

        let set = interop::ingest(profile, self.config.taxonomy());
        suggest::suggest(
            kind,
            &set,
            self.config.taxonomy(),
            self.config.suggestions(),
        )
    }

    /// Write the mutated set back and stamp the profile, changing nothing
    /// when the mutation reported no change. Degraded outcomes are logged at
    /// the mutation site.
    fn conclude(
        &self,
        profile: &mut ProfileWire,
        set: &AmenitySet,
        outcome: MutationOutcome,
    ) -> MutationOutcome {
        if outcome.changed() {
            interop::render_into(set, profile);
            profile.touch(Utc::now());
        }
        outcome
    }
}
