//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Catalogue files are read and validated here, so request handling
//! never touches the filesystem or process-wide environment variables.

use crate::AmenityResult;
use e2s_taxonomy::{builtin, Catalog, SuggestionCatalog, Suggestions, Taxonomy};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    taxonomy: Taxonomy,
    suggestions: SuggestionCatalog,
}

impl CoreConfig {
    /// Create a new `CoreConfig` from already-validated catalogues.
    pub fn new(taxonomy: Taxonomy, suggestions: SuggestionCatalog) -> Self {
        Self {
            taxonomy,
            suggestions,
        }
    }

    /// Resolve the configuration from optional catalogue file overrides.
    ///
    /// Overrides are loaded and validated here; without them the built-in
    /// catalogues are used. The suggestion catalogue is always validated
    /// against the taxonomy it will run with.
    pub fn resolve(
        taxonomy_file: Option<PathBuf>,
        suggestions_file: Option<PathBuf>,
    ) -> AmenityResult<Self> {
        let taxonomy = match taxonomy_file {
            Some(path) => load_taxonomy(&path)?,
            None => builtin::taxonomy()?,
        };
        let suggestions = match suggestions_file {
            Some(path) => load_suggestions(&path, &taxonomy)?,
            None => builtin::suggestions(&taxonomy)?,
        };

        Ok(Self::new(taxonomy, suggestions))
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn suggestions(&self) -> &SuggestionCatalog {
        &self.suggestions
    }
}

/// Load and validate a taxonomy catalogue file.
pub fn load_taxonomy(path: &Path) -> AmenityResult<Taxonomy> {
    let text = std::fs::read_to_string(path)?;
    Ok(Catalog::parse(&text)?)
}

/// Load a suggestion catalogue file and validate it against `taxonomy`.
pub fn load_suggestions(path: &Path, taxonomy: &Taxonomy) -> AmenityResult<SuggestionCatalog> {
    let text = std::fs::read_to_string(path)?;
    Ok(Suggestions::parse(&text, taxonomy)?)
}
