//! Built-in French catalogues.
//!
//! The directory ships with a ready-to-use category scheme and suggestion
//! tables, embedded as YAML and parsed through the same strict loaders as
//! operator-supplied catalogue files. Deployments override them with
//! `E2S_TAXONOMY_FILE` and `E2S_SUGGESTIONS_FILE`.

use crate::catalog::{Catalog, Taxonomy};
use crate::suggestions::{SuggestionCatalog, Suggestions};
use crate::TaxonomyError;

const TAXONOMY_YAML: &str = include_str!("builtin/taxonomy.yaml");
const SUGGESTIONS_YAML: &str = include_str!("builtin/suggestions.yaml");

/// The built-in category scheme.
pub fn taxonomy() -> Result<Taxonomy, TaxonomyError> {
    Catalog::parse(TAXONOMY_YAML)
}

/// The built-in suggestion tables, validated against `taxonomy`.
pub fn suggestions(taxonomy: &Taxonomy) -> Result<SuggestionCatalog, TaxonomyError> {
    Suggestions::parse(SUGGESTIONS_YAML, taxonomy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{MainCategory, SubKey};

    #[test]
    fn builtin_taxonomy_parses_and_validates() {
        let taxonomy = taxonomy().expect("builtin taxonomy");

        assert_eq!(taxonomy.mains().len(), 4);
        assert_eq!(
            taxonomy.mains()[0].category,
            MainCategory::EquipementsServices
        );

        let default = taxonomy.default_placement();
        assert_eq!(default.main, MainCategory::AmbianceSpecialites);
        assert_eq!(default.sub.as_str(), "autres");

        let parking = SubKey::new("parking").expect("key");
        let (rubric, _) = taxonomy.sub(&parking).expect("parking sub-category");
        assert_eq!(rubric.category, MainCategory::EquipementsServices);
    }

    #[test]
    fn builtin_suggestions_parse_for_every_kind() {
        let taxonomy = taxonomy().expect("builtin taxonomy");
        let catalog = suggestions(&taxonomy).expect("builtin suggestions");

        for kind in crate::suggestions::EstablishmentKind::ALL {
            assert!(
                !catalog.for_kind(kind).is_empty(),
                "no suggestions for {kind}"
            );
        }
    }
}
