//! Suggestion tables keyed by establishment type.
//!
//! Responsibilities:
//! - Define the domain-level [`SuggestionCatalog`] and its entries
//! - Define a strict wire model for suggestion YAML files
//! - Validate every entry against a taxonomy at construction, so suggestions
//!   always point at sub-categories that exist

use crate::catalog::Taxonomy;
use crate::keys::SubKey;
use crate::TaxonomyError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Public domain-level types
// ============================================================================

/// Establishment types that suggestion tables are keyed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EstablishmentKind {
    Restaurant,
    Bar,
    Cafe,
    Activite,
}

impl EstablishmentKind {
    /// All establishment kinds in catalogue order.
    pub const ALL: [EstablishmentKind; 4] = [
        EstablishmentKind::Restaurant,
        EstablishmentKind::Bar,
        EstablishmentKind::Cafe,
        EstablishmentKind::Activite,
    ];

    /// Convert to the profile `type` string.
    pub fn as_key(self) -> &'static str {
        match self {
            EstablishmentKind::Restaurant => "restaurant",
            EstablishmentKind::Bar => "bar",
            EstablishmentKind::Cafe => "cafe",
            EstablishmentKind::Activite => "activite",
        }
    }

    /// Parse from a profile `type` string.
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim() {
            "restaurant" => Some(EstablishmentKind::Restaurant),
            "bar" => Some(EstablishmentKind::Bar),
            "cafe" => Some(EstablishmentKind::Cafe),
            "activite" => Some(EstablishmentKind::Activite),
            _ => None,
        }
    }
}

impl std::fmt::Display for EstablishmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// One suggested amenity label and the sub-category it files under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestionEntry {
    pub label: String,
    pub sub: SubKey,
}

/// Suggested amenities per establishment type.
///
/// Entries are validated against a taxonomy at construction, so every
/// suggestion resolves to a real sub-category of the catalogue it was built
/// with. A kind without a table simply yields no suggestions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestionCatalog {
    tables: Vec<(EstablishmentKind, Vec<SuggestionEntry>)>,
}

impl SuggestionCatalog {
    /// Build a validated suggestion catalogue.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::InvalidCatalog` if a kind appears more than
    /// once, a label is blank, or an entry names a sub-category `taxonomy`
    /// does not contain.
    pub fn new(
        tables: Vec<(EstablishmentKind, Vec<SuggestionEntry>)>,
        taxonomy: &Taxonomy,
    ) -> Result<Self, TaxonomyError> {
        for required in EstablishmentKind::ALL {
            let count = tables.iter().filter(|(kind, _)| *kind == required).count();
            if count > 1 {
                return Err(TaxonomyError::InvalidCatalog(format!(
                    "suggestion table '{required}' appears more than once"
                )));
            }
        }

        for (kind, entries) in &tables {
            for entry in entries {
                if entry.label.trim().is_empty() {
                    return Err(TaxonomyError::InvalidCatalog(format!(
                        "suggestion table '{kind}' contains a blank label"
                    )));
                }
                if !taxonomy.contains_sub(&entry.sub) {
                    return Err(TaxonomyError::InvalidCatalog(format!(
                        "suggestion '{}' names unknown sub-category '{}'",
                        entry.label, entry.sub
                    )));
                }
            }
        }

        Ok(Self { tables })
    }

    /// All tables in catalogue order.
    pub fn tables(&self) -> &[(EstablishmentKind, Vec<SuggestionEntry>)] {
        &self.tables
    }

    /// Suggestions for one establishment type, in catalogue order.
    pub fn for_kind(&self, kind: EstablishmentKind) -> &[SuggestionEntry] {
        self.tables
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or(&[])
    }
}

// ============================================================================
// Public Suggestions operations
// ============================================================================

/// Suggestion file operations.
///
/// This is a zero-sized type used for namespacing suggestion file parsing
/// and rendering. All methods are associated functions.
pub struct Suggestions;

impl Suggestions {
    /// Parse suggestion tables from YAML text and validate them against
    /// `taxonomy`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError`] if the YAML does not match the wire schema,
    /// a table is keyed by an unknown establishment kind, or an entry fails
    /// [`SuggestionCatalog::new`] validation.
    pub fn parse(yaml_text: &str, taxonomy: &Taxonomy) -> Result<SuggestionCatalog, TaxonomyError> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, SuggestionsWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(TaxonomyError::Translation(format!(
                    "suggestions schema mismatch at {path}: {source}"
                )));
            }
        };

        wire_to_domain(wire, taxonomy)
    }

    /// Render suggestion tables as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError`] if serialisation fails.
    pub fn render(catalog: &SuggestionCatalog) -> Result<String, TaxonomyError> {
        let wire = domain_to_wire(catalog);
        serde_yaml::to_string(&wire).map_err(|e| {
            TaxonomyError::Translation(format!("Failed to serialise suggestions: {e}"))
        })
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of a suggestion tables file.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct SuggestionsWire {
    pub tables: BTreeMap<String, Vec<SuggestionEntryWire>>,
}

/// Wire representation of one suggestion entry.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct SuggestionEntryWire {
    pub label: String,
    pub sub: String,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

/// Convert wire format to the validated suggestion catalogue.
fn wire_to_domain(
    wire: SuggestionsWire,
    taxonomy: &Taxonomy,
) -> Result<SuggestionCatalog, TaxonomyError> {
    let mut raw = wire.tables;
    let mut tables = Vec::new();

    for kind in EstablishmentKind::ALL {
        if let Some(entries) = raw.remove(kind.as_key()) {
            let entries = entries
                .into_iter()
                .map(|entry| {
                    Ok(SuggestionEntry {
                        label: entry.label,
                        sub: SubKey::new(&entry.sub)?,
                    })
                })
                .collect::<Result<Vec<_>, TaxonomyError>>()?;
            tables.push((kind, entries));
        }
    }

    if let Some(unknown) = raw.keys().next() {
        return Err(TaxonomyError::Translation(format!(
            "unknown establishment kind '{unknown}'"
        )));
    }

    SuggestionCatalog::new(tables, taxonomy)
}

/// Convert a suggestion catalogue to wire format.
fn domain_to_wire(catalog: &SuggestionCatalog) -> SuggestionsWire {
    SuggestionsWire {
        tables: catalog
            .tables()
            .iter()
            .map(|(kind, entries)| {
                (
                    kind.as_key().to_owned(),
                    entries
                        .iter()
                        .map(|entry| SuggestionEntryWire {
                            label: entry.label.clone(),
                            sub: entry.sub.as_str().to_owned(),
                        })
                        .collect(),
                )
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;

    fn taxonomy() -> Taxonomy {
        builtin::taxonomy().expect("builtin taxonomy")
    }

    fn sample_yaml() -> &'static str {
        r#"tables:
  restaurant:
    - label: Terrasse ensoleillée
      sub: ambiance
    - label: Menu enfant
      sub: famille
  bar:
    - label: Happy hour
      sub: services
"#
    }

    #[test]
    fn round_trips_sample_yaml() {
        let taxonomy = taxonomy();
        let catalog = Suggestions::parse(sample_yaml(), &taxonomy).expect("parse suggestions");
        let output = Suggestions::render(&catalog).expect("render suggestions");
        let reparsed = Suggestions::parse(&output, &taxonomy).expect("reparse suggestions");
        assert_eq!(catalog, reparsed);
    }

    #[test]
    fn keeps_entry_order_within_a_table() {
        let catalog = Suggestions::parse(sample_yaml(), &taxonomy()).expect("parse suggestions");
        let entries = catalog.for_kind(EstablishmentKind::Restaurant);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].label, "Terrasse ensoleillée");
        assert_eq!(entries[1].label, "Menu enfant");
    }

    #[test]
    fn kinds_without_a_table_yield_no_entries() {
        let catalog = Suggestions::parse(sample_yaml(), &taxonomy()).expect("parse suggestions");
        assert!(catalog.for_kind(EstablishmentKind::Activite).is_empty());
    }

    #[test]
    fn rejects_unknown_establishment_kinds() {
        let input = sample_yaml().replace("  bar:", "  discotheque:");

        let err = Suggestions::parse(&input, &taxonomy()).expect_err("should reject unknown kind");
        match err {
            TaxonomyError::Translation(msg) => {
                assert!(msg.contains("discotheque"));
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_entries_with_unknown_sub_categories() {
        let input = sample_yaml().replace("sub: famille", "sub: jacuzzi");

        let err = Suggestions::parse(&input, &taxonomy()).expect_err("should reject unknown sub");
        match err {
            TaxonomyError::InvalidCatalog(msg) => {
                assert!(msg.contains("jacuzzi"));
            }
            other => panic!("expected InvalidCatalog error, got {other:?}"),
        }
    }

    #[test]
    fn strict_validation_rejects_unknown_keys() {
        let input = sample_yaml().replace("      sub: famille", "      sub: famille\n      extra: nope");

        let err = Suggestions::parse(&input, &taxonomy()).expect_err("should reject unknown key");
        match err {
            TaxonomyError::Translation(msg) => {
                assert!(msg.contains("extra"));
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }
}
