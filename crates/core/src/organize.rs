//! Aggregation of amenity records into the two-level display structure.

use crate::records::AmenitySet;
use e2s_taxonomy::{MainCategory, SubKey, Taxonomy};

/// One sub-category bucket with the labels filed under it, in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubSection {
    pub key: SubKey,
    pub title: String,
    pub icon: String,
    pub labels: Vec<String>,
}

/// One main category section with all of its sub-category buckets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MainSection {
    pub category: MainCategory,
    pub title: String,
    pub icon: String,
    pub subs: Vec<SubSection>,
}

/// The organised view of an establishment's amenities.
///
/// Every rubric and sub-category of the catalogue is present, empty or not,
/// in catalogue order. Consumers render the skeleton directly without
/// checking for missing buckets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrganizedView {
    sections: Vec<MainSection>,
}

impl OrganizedView {
    pub fn sections(&self) -> &[MainSection] {
        &self.sections
    }

    /// Labels filed under one sub-category, empty when the bucket is empty
    /// or unknown.
    pub fn labels(&self, main: MainCategory, sub: &str) -> &[String] {
        self.sections
            .iter()
            .find(|section| section.category == main)
            .and_then(|section| section.subs.iter().find(|s| s.key.as_str() == sub))
            .map(|s| s.labels.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of labels across all buckets.
    pub fn label_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|section| &section.subs)
            .map(|sub| sub.labels.len())
            .sum()
    }
}

/// Fold an amenity set into the organised view.
///
/// Buckets are created for the whole catalogue first, then records are dealt
/// into them in set order. A record whose sub-category is not in `taxonomy`
/// (it was classified against a different catalogue) is filed under the
/// default placement rather than dropped.
pub fn organize(set: &AmenitySet, taxonomy: &Taxonomy) -> OrganizedView {
    let mut sections: Vec<MainSection> = taxonomy
        .mains()
        .iter()
        .map(|rubric| MainSection {
            category: rubric.category,
            title: rubric.title.clone(),
            icon: rubric.icon.clone(),
            subs: rubric
                .subs
                .iter()
                .map(|sub| SubSection {
                    key: sub.key.clone(),
                    title: sub.title.clone(),
                    icon: sub.icon.clone(),
                    labels: Vec::new(),
                })
                .collect(),
        })
        .collect();

    let default = taxonomy.default_placement();
    for record in set.records() {
        let placement = if taxonomy.contains_sub(record.sub()) {
            record.placement.clone()
        } else {
            tracing::warn!(
                "Sub-category '{}' is not in the catalogue, filing '{}' under the default bucket",
                record.sub(),
                record.text
            );
            default.clone()
        };

        let slot = sections
            .iter_mut()
            .find(|section| section.category == placement.main)
            .and_then(|section| {
                section
                    .subs
                    .iter_mut()
                    .find(|sub| sub.key == placement.sub)
            });
        if let Some(sub) = slot {
            sub.labels.push(record.text.as_str().to_owned());
        }
    }

    OrganizedView { sections }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::AmenityRecord;
    use e2s_taxonomy::{builtin, Placement};
    use e2s_types::CleanLabel;
    use e2s_wire::WireList;

    fn taxonomy() -> Taxonomy {
        builtin::taxonomy().expect("builtin taxonomy")
    }

    fn record(text: &str, sub: &str, taxonomy: &Taxonomy) -> AmenityRecord {
        let key = SubKey::new(sub).expect("valid sub key");
        let placement = taxonomy.placement_of(&key).expect("known sub-category");
        AmenityRecord::new(
            CleanLabel::new(text).expect("valid label"),
            placement,
            WireList::Services,
        )
    }

    #[test]
    fn every_bucket_is_present_even_when_empty() {
        let taxonomy = taxonomy();
        let view = organize(&AmenitySet::new(), &taxonomy);

        assert_eq!(view.sections().len(), taxonomy.mains().len());
        for (section, rubric) in view.sections().iter().zip(taxonomy.mains()) {
            assert_eq!(section.category, rubric.category);
            assert_eq!(section.subs.len(), rubric.subs.len());
            assert!(section.subs.iter().all(|sub| sub.labels.is_empty()));
        }
        assert_eq!(view.label_count(), 0);
    }

    #[test]
    fn records_keep_insertion_order_within_their_bucket() {
        let taxonomy = taxonomy();
        let mut set = AmenitySet::new();
        set.push(record("Parking couvert", "parking", &taxonomy));
        set.push(record("Terrasse", "ambiance", &taxonomy));
        set.push(record("Parking vélo", "parking", &taxonomy));

        let view = organize(&set, &taxonomy);
        assert_eq!(
            view.labels(MainCategory::EquipementsServices, "parking"),
            ["Parking couvert", "Parking vélo"]
        );
        assert_eq!(
            view.labels(MainCategory::AmbianceSpecialites, "ambiance"),
            ["Terrasse"]
        );
        assert_eq!(view.label_count(), 3);
    }

    #[test]
    fn stale_sub_categories_fall_back_to_the_default_bucket() {
        let taxonomy = taxonomy();
        let mut set = AmenitySet::new();
        set.push(AmenityRecord::new(
            CleanLabel::new("Babyfoot").expect("valid label"),
            Placement {
                main: MainCategory::EquipementsServices,
                sub: SubKey::new("disparu").expect("valid key shape"),
            },
            WireList::Services,
        ));

        let view = organize(&set, &taxonomy);
        assert_eq!(
            view.labels(MainCategory::AmbianceSpecialites, "autres"),
            ["Babyfoot"]
        );
    }
}
