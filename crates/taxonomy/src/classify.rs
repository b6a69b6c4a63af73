//! Placement of raw labels into the category scheme.
//!
//! Classification runs in three stages: a recognised `text|key` marker wins,
//! then lowercase keyword matching over the sanitised label, then the
//! catalogue's default placement. The result only depends on the label and
//! the injected taxonomy, so equal inputs always classify identically.

use crate::catalog::{Placement, Taxonomy};
use crate::keys::{Marker, SubKey};
use e2s_types::sanitize;

/// Split a recognised marker suffix off a raw wire entry.
///
/// The split happens at the last `|`. The suffix is recognised when it names
/// a sub-category of `taxonomy` or one of the legacy list markers; anything
/// else leaves the entry whole, so pipes inside ordinary text survive.
///
/// # Arguments
///
/// * `raw` - Raw wire entry, e.g. `Parking gratuit|parking`.
/// * `taxonomy` - The catalogue the suffix is resolved against.
///
/// # Returns
///
/// The text part (marker removed, not yet sanitised) and the placement the
/// marker resolves to, or `None` when no recognised marker is present.
pub fn resolve_marker<'a>(raw: &'a str, taxonomy: &Taxonomy) -> Option<(&'a str, Placement)> {
    let (text, suffix) = raw.rsplit_once('|')?;
    let key = suffix.trim();

    if let Ok(sub) = SubKey::new(key) {
        if let Some(placement) = taxonomy.placement_of(&sub) {
            return Some((text, placement));
        }
    }

    let marker = Marker::from_key(key)?;
    let placement = taxonomy.marker_placement(marker)?;
    Some((text, placement))
}

/// Classify a raw label into the category scheme.
///
/// A recognised marker is authoritative, whatever the text says. Unmarked
/// labels are sanitised, lowercased and scanned against the catalogue
/// keywords in catalogue order; the first matching sub-category wins.
///
/// # Arguments
///
/// * `raw` - Raw label text, possibly icon-decorated and marker-qualified.
/// * `taxonomy` - The catalogue to classify against.
///
/// # Returns
///
/// The placement for this label. Labels nothing claims land in the
/// catalogue's default placement, so every input classifies somewhere.
pub fn classify(raw: &str, taxonomy: &Taxonomy) -> Placement {
    if let Some((_, placement)) = resolve_marker(raw, taxonomy) {
        return placement;
    }

    let lowered = sanitize(raw).to_lowercase();
    for rubric in taxonomy.mains() {
        for sub in &rubric.subs {
            if sub.keywords.iter().any(|kw| lowered.contains(kw.as_str())) {
                return Placement {
                    main: rubric.category,
                    sub: sub.key.clone(),
                };
            }
        }
    }

    taxonomy.default_placement()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use crate::keys::MainCategory;

    fn taxonomy() -> Taxonomy {
        builtin::taxonomy().expect("builtin taxonomy")
    }

    #[test]
    fn sub_category_marker_pins_the_placement() {
        let taxonomy = taxonomy();

        let placement = classify("Terrasse|ambiance", &taxonomy);
        assert_eq!(placement.main, MainCategory::AmbianceSpecialites);
        assert_eq!(placement.sub.as_str(), "ambiance");

        let placement = classify("Parking couvert|parking", &taxonomy);
        assert_eq!(placement.main, MainCategory::EquipementsServices);
        assert_eq!(placement.sub.as_str(), "parking");
    }

    #[test]
    fn marker_wins_over_keywords_in_the_text() {
        let taxonomy = taxonomy();

        // "parking" would match a keyword, but the marker is authoritative.
        let placement = classify("Parking payant|wifi", &taxonomy);
        assert_eq!(placement.main, MainCategory::EquipementsServices);
        assert_eq!(placement.sub.as_str(), "wifi");
    }

    #[test]
    fn legacy_list_markers_resolve_to_the_general_sub_category() {
        let taxonomy = taxonomy();

        let placement = classify("Vestiaire|services", &taxonomy);
        assert_eq!(placement.main, MainCategory::EquipementsServices);
        assert_eq!(placement.sub.as_str(), "services");

        let placement = classify("Sur place uniquement|informations-pratiques", &taxonomy);
        assert_eq!(placement.main, MainCategory::InformationsPratiques);
        assert_eq!(placement.sub.as_str(), "infos");

        let placement = classify("Virement accepté|moyens-paiement", &taxonomy);
        assert_eq!(placement.main, MainCategory::MoyensPaiement);
        assert_eq!(placement.sub.as_str(), "paiement");
    }

    #[test]
    fn unrecognised_suffixes_fall_through_to_keywords() {
        let taxonomy = taxonomy();

        // "flechettes" is neither a sub-category nor a list marker, so the
        // whole entry goes through the keyword scan.
        let placement = classify("Concerts le samedi|flechettes", &taxonomy);
        assert_eq!(placement.main, MainCategory::AmbianceSpecialites);
        assert_eq!(placement.sub.as_str(), "musique");
    }

    #[test]
    fn keyword_fallback_is_case_insensitive() {
        let taxonomy = taxonomy();

        let placement = classify("Wifi gratuit", &taxonomy);
        assert_eq!(placement.main, MainCategory::EquipementsServices);
        assert_eq!(placement.sub.as_str(), "wifi");

        let placement = classify("PARKING couvert", &taxonomy);
        assert_eq!(placement.sub.as_str(), "parking");
    }

    #[test]
    fn leading_icons_do_not_affect_classification() {
        let taxonomy = taxonomy();

        let placement = classify("✅ Wifi gratuit", &taxonomy);
        assert_eq!(placement.sub.as_str(), "wifi");
    }

    #[test]
    fn unmatched_labels_land_in_the_default_bucket() {
        let taxonomy = taxonomy();

        let placement = classify("Quiz du jeudi", &taxonomy);
        assert_eq!(placement, taxonomy.default_placement());
        assert_eq!(placement.main, MainCategory::AmbianceSpecialites);
        assert_eq!(placement.sub.as_str(), "autres");
    }

    #[test]
    fn pipes_inside_ordinary_text_do_not_split() {
        let taxonomy = taxonomy();

        // The suffix "dessert offert" is not a valid key, so the pipe is
        // treated as text and the keyword scan sees the whole label.
        let placement = classify("Menu enfant | dessert offert", &taxonomy);
        assert_eq!(placement.main, MainCategory::EquipementsServices);
        assert_eq!(placement.sub.as_str(), "famille");
    }

    #[test]
    fn splits_on_the_last_pipe_only() {
        let taxonomy = taxonomy();

        let resolved = resolve_marker("Jazz | blues|musique", &taxonomy);
        match resolved {
            Some((text, placement)) => {
                assert_eq!(text, "Jazz | blues");
                assert_eq!(placement.sub.as_str(), "musique");
            }
            None => panic!("expected the trailing marker to resolve"),
        }
    }

    #[test]
    fn unmarked_entries_do_not_resolve_a_marker() {
        let taxonomy = taxonomy();
        assert!(resolve_marker("Terrasse", &taxonomy).is_none());
        assert!(resolve_marker("Terrasse|AMBIANCE", &taxonomy).is_none());
    }
}
