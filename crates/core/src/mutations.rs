//! Mutations over the amenity set.
//!
//! Responsibilities:
//! - Apply add, edit and remove operations against a validated taxonomy
//! - Report failures as outcomes instead of errors, so a missing target or a
//!   blank label never aborts the surrounding request
//!
//! Targets are normalised before matching: a recognised `|key` marker is
//! stripped and the text sanitised, so `✔ Wifi gratuit|wifi` finds the record
//! stored as `Wifi gratuit`.

use crate::interop::list_for;
use crate::records::{AmenityRecord, AmenitySet, AmenityText};
use e2s_taxonomy::{resolve_marker, SubKey, Taxonomy};
use e2s_types::{sanitize, CleanLabel, TextError};

/// What a mutation did to the set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The record was added or rewritten.
    Applied(AmenityRecord),
    /// The record was removed.
    Removed(AmenityRecord),
    /// No record matched the target sub-category and label.
    NotFound,
    /// The supplied text was empty once sanitised.
    EmptyText,
    /// The named sub-category is not in the catalogue.
    UnknownSubCategory(SubKey),
}

impl MutationOutcome {
    /// Whether the set was modified.
    pub fn changed(&self) -> bool {
        matches!(
            self,
            MutationOutcome::Applied(_) | MutationOutcome::Removed(_)
        )
    }

    /// Stable outcome name for logs and responses.
    pub fn kind(&self) -> &'static str {
        match self {
            MutationOutcome::Applied(_) => "applied",
            MutationOutcome::Removed(_) => "removed",
            MutationOutcome::NotFound => "not-found",
            MutationOutcome::EmptyText => "empty-text",
            MutationOutcome::UnknownSubCategory(_) => "unknown-sub-category",
        }
    }
}

/// Strip a recognised marker, leaving the raw text part.
fn strip_marker<'a>(label: &'a str, taxonomy: &Taxonomy) -> &'a str {
    match resolve_marker(label, taxonomy) {
        Some((text, _)) => text,
        None => label,
    }
}

/// Strip a recognised marker and sanitise, yielding the stored text form.
fn normalise(label: &str, taxonomy: &Taxonomy) -> String {
    sanitize(strip_marker(label, taxonomy))
}

/// Append a new amenity under `sub`.
///
/// The text is sanitised and any recognised marker is stripped; the placement
/// comes from `sub`, not from the text. The new record lands at the end of
/// the set, in the wire list of its main category.
pub fn add(set: &mut AmenitySet, taxonomy: &Taxonomy, sub: &SubKey, text: &str) -> MutationOutcome {
    let placement = match taxonomy.placement_of(sub) {
        Some(placement) => placement,
        None => return MutationOutcome::UnknownSubCategory(sub.clone()),
    };

    let text = match CleanLabel::new(strip_marker(text, taxonomy)) {
        Ok(text) => text,
        Err(TextError::Empty) => return MutationOutcome::EmptyText,
    };

    let record = AmenityRecord::new(text, placement.clone(), list_for(placement.main));
    set.push(record.clone());
    MutationOutcome::Applied(record)
}

/// Rewrite the text of the record matching `sub` and `old_label`.
///
/// The record keeps its slot, placement and source list.
pub fn edit(
    set: &mut AmenitySet,
    taxonomy: &Taxonomy,
    sub: &SubKey,
    old_label: &str,
    new_text: &str,
) -> MutationOutcome {
    let target = normalise(old_label, taxonomy);
    if target.is_empty() {
        return MutationOutcome::EmptyText;
    }
    let replacement = match CleanLabel::new(strip_marker(new_text, taxonomy)) {
        Ok(text) => text,
        Err(TextError::Empty) => return MutationOutcome::EmptyText,
    };

    let index = match set.position_of(sub, &target) {
        Some(index) => index,
        None => {
            tracing::warn!("No amenity '{target}' under '{sub}' to edit, leaving the set unchanged");
            return MutationOutcome::NotFound;
        }
    };
    match set.get_mut(index) {
        Some(record) => {
            record.text = AmenityText::Clean(replacement);
            MutationOutcome::Applied(record.clone())
        }
        None => MutationOutcome::NotFound,
    }
}

/// Remove the record matching `sub` and `label`.
pub fn remove(
    set: &mut AmenitySet,
    taxonomy: &Taxonomy,
    sub: &SubKey,
    label: &str,
) -> MutationOutcome {
    let target = normalise(label, taxonomy);
    if target.is_empty() {
        return MutationOutcome::EmptyText;
    }

    match set.position_of(sub, &target) {
        Some(index) => MutationOutcome::Removed(set.remove_at(index)),
        None => {
            tracing::warn!(
                "No amenity '{target}' under '{sub}' to remove, leaving the set unchanged"
            );
            MutationOutcome::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use e2s_taxonomy::{builtin, MainCategory};

    fn taxonomy() -> Taxonomy {
        builtin::taxonomy().expect("builtin taxonomy")
    }

    fn sub(key: &str) -> SubKey {
        SubKey::new(key).expect("valid sub key")
    }

    #[test]
    fn add_appends_at_the_end_of_the_set() {
        let taxonomy = taxonomy();
        let mut set = AmenitySet::new();
        add(&mut set, &taxonomy, &sub("parking"), "Parking couvert");
        let outcome = add(&mut set, &taxonomy, &sub("wifi"), "Wifi fibre");

        match outcome {
            MutationOutcome::Applied(record) => {
                assert_eq!(record.text.as_str(), "Wifi fibre");
                assert_eq!(record.placement.main, MainCategory::EquipementsServices);
            }
            other => panic!("expected Applied, got {other:?}"),
        }
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[1].text.as_str(), "Wifi fibre");
    }

    #[test]
    fn add_strips_icons_and_markers_from_the_text() {
        let taxonomy = taxonomy();
        let mut set = AmenitySet::new();
        let outcome = add(
            &mut set,
            &taxonomy,
            &sub("ambiance"),
            "🔥 Soirées à thème|ambiance",
        );

        match outcome {
            MutationOutcome::Applied(record) => {
                assert_eq!(record.text.as_str(), "Soirées à thème");
                assert_eq!(record.sub().as_str(), "ambiance");
            }
            other => panic!("expected Applied, got {other:?}"),
        }
    }

    #[test]
    fn add_reports_unknown_sub_categories_without_changing_the_set() {
        let taxonomy = taxonomy();
        let mut set = AmenitySet::new();
        let outcome = add(&mut set, &taxonomy, &sub("jacuzzi"), "Jacuzzi privatif");

        assert_eq!(outcome, MutationOutcome::UnknownSubCategory(sub("jacuzzi")));
        assert!(!outcome.changed());
        assert!(set.is_empty());
    }

    #[test]
    fn add_reports_empty_text_for_icon_only_labels() {
        let taxonomy = taxonomy();
        let mut set = AmenitySet::new();
        let outcome = add(&mut set, &taxonomy, &sub("wifi"), "✅ ");

        assert_eq!(outcome, MutationOutcome::EmptyText);
        assert!(set.is_empty());
    }

    #[test]
    fn edit_rewrites_text_in_place() {
        let taxonomy = taxonomy();
        let mut set = AmenitySet::new();
        add(&mut set, &taxonomy, &sub("parking"), "Parking gratuit");
        add(&mut set, &taxonomy, &sub("parking"), "Parking vélo");

        let outcome = edit(
            &mut set,
            &taxonomy,
            &sub("parking"),
            "Parking gratuit",
            "Parking payant",
        );

        match outcome {
            MutationOutcome::Applied(record) => assert_eq!(record.text.as_str(), "Parking payant"),
            other => panic!("expected Applied, got {other:?}"),
        }
        let texts: Vec<&str> = set.records().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["Parking payant", "Parking vélo"]);
    }

    #[test]
    fn edit_matches_decorated_targets() {
        let taxonomy = taxonomy();
        let mut set = AmenitySet::new();
        add(&mut set, &taxonomy, &sub("wifi"), "Wifi gratuit");

        let outcome = edit(
            &mut set,
            &taxonomy,
            &sub("wifi"),
            "✔ Wifi gratuit|wifi",
            "Wifi très haut débit",
        );

        assert!(outcome.changed());
        assert_eq!(set.records()[0].text.as_str(), "Wifi très haut débit");
    }

    #[test]
    fn edit_reports_not_found_without_changing_the_set() {
        let taxonomy = taxonomy();
        let mut set = AmenitySet::new();
        add(&mut set, &taxonomy, &sub("wifi"), "Wifi gratuit");
        let before = set.clone();

        let outcome = edit(&mut set, &taxonomy, &sub("wifi"), "Sauna", "Hammam");

        assert_eq!(outcome, MutationOutcome::NotFound);
        assert_eq!(set, before);
    }

    #[test]
    fn edit_rejects_blank_replacement_text() {
        let taxonomy = taxonomy();
        let mut set = AmenitySet::new();
        add(&mut set, &taxonomy, &sub("wifi"), "Wifi gratuit");
        let before = set.clone();

        let outcome = edit(&mut set, &taxonomy, &sub("wifi"), "Wifi gratuit", "  ");

        assert_eq!(outcome, MutationOutcome::EmptyText);
        assert_eq!(set, before);
    }

    #[test]
    fn remove_matches_only_within_the_named_sub_category() {
        let taxonomy = taxonomy();
        let mut set = AmenitySet::new();
        add(&mut set, &taxonomy, &sub("wifi"), "Wifi gratuit");
        let before = set.clone();

        let outcome = remove(&mut set, &taxonomy, &sub("parking"), "Wifi gratuit");
        assert_eq!(outcome, MutationOutcome::NotFound);
        assert_eq!(set, before);

        let outcome = remove(&mut set, &taxonomy, &sub("wifi"), "Wifi gratuit");
        match outcome {
            MutationOutcome::Removed(record) => assert_eq!(record.text.as_str(), "Wifi gratuit"),
            other => panic!("expected Removed, got {other:?}"),
        }
        assert!(set.is_empty());
    }

    #[test]
    fn remove_matches_marker_qualified_labels() {
        let taxonomy = taxonomy();
        let mut set = AmenitySet::new();
        add(&mut set, &taxonomy, &sub("services"), "Happy hour");

        let outcome = remove(&mut set, &taxonomy, &sub("services"), "✔ Happy hour|services");

        assert!(outcome.changed());
        assert!(set.is_empty());
    }

    #[test]
    fn remove_reports_empty_text_for_blank_targets() {
        let taxonomy = taxonomy();
        let mut set = AmenitySet::new();
        let outcome = remove(&mut set, &taxonomy, &sub("wifi"), "   ");

        assert_eq!(outcome, MutationOutcome::EmptyText);
    }
}
