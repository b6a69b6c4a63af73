//! Translation between wire profiles and the domain amenity set.
//!
//! Responsibilities:
//! - Read the four wire lists into ordered, classified amenity records
//! - Write records back in canonical `text|sub` form so the placement
//!   survives the next ingestion without re-classification

use crate::records::{AmenityRecord, AmenitySet};
use e2s_taxonomy::{classify, resolve_marker, MainCategory, Taxonomy};
use e2s_types::{CleanLabel, TextError};
use e2s_wire::{ProfileWire, WireList};

/// The wire list a main category writes into.
pub fn list_for(category: MainCategory) -> WireList {
    match category {
        MainCategory::EquipementsServices => WireList::Services,
        MainCategory::AmbianceSpecialites => WireList::Ambiance,
        MainCategory::InformationsPratiques => WireList::InformationsPratiques,
        MainCategory::MoyensPaiement => WireList::PaymentMethods,
    }
}

/// Build the amenity set from a profile's four lists.
///
/// Lists are read in document order and entries keep their relative order. A
/// recognised marker pins the placement; unmarked entries go through the
/// keyword fallback. No entry is ever dropped: one that is empty once the
/// marker is stripped and the text sanitised becomes an opaque record under
/// its resolved placement (the default bucket when unmarked), logged for
/// operator visibility.
pub fn ingest(profile: &ProfileWire, taxonomy: &Taxonomy) -> AmenitySet {
    let mut set = AmenitySet::new();
    for list in WireList::ALL {
        for raw in profile.list(list) {
            let (text, placement) = match resolve_marker(raw, taxonomy) {
                Some((text, placement)) => (text, placement),
                None => (raw.as_str(), classify(raw, taxonomy)),
            };
            match CleanLabel::new(text) {
                Ok(text) => set.push(AmenityRecord::new(text, placement, list)),
                Err(TextError::Empty) => {
                    tracing::warn!(
                        "Amenity entry {raw:?} in list '{list}' sanitises to nothing, keeping it verbatim"
                    );
                    set.push(AmenityRecord::opaque(raw.clone(), placement, list));
                }
            }
        }
    }
    set
}

/// Write the amenity set back into a profile's four lists.
///
/// The lists are rebuilt wholesale. Each record goes back to the list it was
/// read from, so an entry stored under an unexpected list stays there; newly
/// added records carry the list of their main category. Labelled records are
/// written in canonical `text|sub` form, opaque records verbatim.
pub fn render_into(set: &AmenitySet, profile: &mut ProfileWire) {
    for list in WireList::ALL {
        profile.list_mut(list).clear();
    }
    for record in set.records() {
        let entry = match record.text.clean() {
            Some(text) => format!("{}|{}", text, record.sub()),
            None => record.text.as_str().to_owned(),
        };
        profile.list_mut(record.source).push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use e2s_taxonomy::builtin;
    use e2s_wire::Profile;

    fn taxonomy() -> Taxonomy {
        builtin::taxonomy().expect("builtin taxonomy")
    }

    fn profile(json: &str) -> ProfileWire {
        Profile::parse(json).expect("parse profile")
    }

    #[test]
    fn ingest_reads_lists_in_document_order() {
        let taxonomy = taxonomy();
        let profile = profile(
            r#"{
                "services": ["Parking gratuit", "Wifi fibre"],
                "ambiance": ["Terrasse ombragée"],
                "paymentMethods": ["Carte bancaire|cartes"]
            }"#,
        );

        let set = ingest(&profile, &taxonomy);
        let texts: Vec<&str> = set.records().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(
            texts,
            ["Parking gratuit", "Wifi fibre", "Terrasse ombragée", "Carte bancaire"]
        );

        let subs: Vec<&str> = set.records().iter().map(|r| r.sub().as_str()).collect();
        assert_eq!(subs, ["parking", "wifi", "ambiance", "cartes"]);
    }

    #[test]
    fn ingest_keeps_entries_that_sanitise_to_nothing() {
        let taxonomy = taxonomy();
        let mut profile = profile(r#"{"services": ["✅", "  ", "Vestiaire"]}"#);

        let set = ingest(&profile, &taxonomy);
        assert_eq!(set.len(), 3);
        assert!(set.records()[0].text.clean().is_none());
        assert_eq!(set.records()[0].placement, taxonomy.default_placement());
        assert_eq!(set.records()[2].text.as_str(), "Vestiaire");

        render_into(&set, &mut profile);
        assert_eq!(profile.services, ["✅", "  ", "Vestiaire|services"]);
    }

    #[test]
    fn marked_entries_with_empty_text_keep_their_marker_placement() {
        let taxonomy = taxonomy();
        let mut profile = profile(r#"{"ambiance": ["✅|ambiance"]}"#);

        let set = ingest(&profile, &taxonomy);
        assert_eq!(set.len(), 1);
        assert!(set.records()[0].text.clean().is_none());
        assert_eq!(set.records()[0].sub().as_str(), "ambiance");

        render_into(&set, &mut profile);
        assert_eq!(profile.ambiance, ["✅|ambiance"]);
    }

    #[test]
    fn ingest_keeps_the_source_list_of_misfiled_entries() {
        let taxonomy = taxonomy();
        let input = profile(r#"{"ambiance": ["Wifi gratuit"]}"#);

        let set = ingest(&input, &taxonomy);
        let record = &set.records()[0];
        assert_eq!(record.sub().as_str(), "wifi");
        assert_eq!(record.source, WireList::Ambiance);

        let mut out = profile("{}");
        render_into(&set, &mut out);
        assert!(out.services.is_empty());
        assert_eq!(out.ambiance, ["Wifi gratuit|wifi"]);
    }

    #[test]
    fn render_writes_canonical_marker_qualified_entries() {
        let taxonomy = taxonomy();
        let mut profile = profile(
            r#"{
                "services": ["✅ Wifi gratuit", "Vestiaire surveillé|services"],
                "informationsPratiques": ["Ouvert le dimanche"]
            }"#,
        );

        let set = ingest(&profile, &taxonomy);
        render_into(&set, &mut profile);
        assert_eq!(
            profile.services,
            ["Wifi gratuit|wifi", "Vestiaire surveillé|services"]
        );
        assert_eq!(profile.informations_pratiques, ["Ouvert le dimanche|horaires"]);
    }

    #[test]
    fn canonical_form_is_stable_across_round_trips() {
        let taxonomy = taxonomy();
        let mut profile = profile(
            r#"{
                "services": ["🔥 Happy hour", "Menu enfant"],
                "ambiance": ["Quiz du jeudi", "✅"]
            }"#,
        );

        let first = ingest(&profile, &taxonomy);
        render_into(&first, &mut profile);
        let second = ingest(&profile, &taxonomy);
        assert_eq!(first, second);
    }
}
