//! Suggested amenities for an establishment.

use crate::records::AmenitySet;
use e2s_taxonomy::{EstablishmentKind, MainCategory, SubKey, SuggestionCatalog, Taxonomy};
use e2s_types::sanitize;
use std::collections::HashSet;

/// One suggestion: a ready-to-add label and where it would be filed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub main: MainCategory,
    pub sub: SubKey,
}

/// Suggestions for `kind` that the establishment does not already offer.
///
/// The catalogue table is filtered against the labels already in `set`,
/// comparing sanitised forms case-sensitively, so a decorated catalogue
/// entry still matches the stored label. Entries whose sub-category is
/// missing from `taxonomy` are skipped with a warning. A kind without a
/// table yields nothing.
pub fn suggest(
    kind: EstablishmentKind,
    set: &AmenitySet,
    taxonomy: &Taxonomy,
    catalog: &SuggestionCatalog,
) -> Vec<Suggestion> {
    let existing: HashSet<&str> = set.records().iter().map(|r| r.text.as_str()).collect();

    let mut suggestions = Vec::new();
    for entry in catalog.for_kind(kind) {
        if existing.contains(sanitize(&entry.label).as_str()) {
            continue;
        }
        match taxonomy.placement_of(&entry.sub) {
            Some(placement) => suggestions.push(Suggestion {
                label: entry.label.clone(),
                main: placement.main,
                sub: placement.sub,
            }),
            None => {
                tracing::warn!(
                    "Suggestion '{}' names sub-category '{}' which is not in the catalogue, skipping",
                    entry.label,
                    entry.sub
                );
            }
        }
    }
    suggestions
}
