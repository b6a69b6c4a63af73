//! Catalogue structure for the two-level category scheme.
//!
//! Responsibilities:
//! - Define the domain-level [`Taxonomy`] with its rubrics and sub-categories
//! - Define a strict wire model for catalogue YAML files
//! - Validate catalogue structure at construction, so every consumer can rely
//!   on the four rubrics being present and sub-category keys being unique

use crate::keys::{MainCategory, Marker, SubKey};
use crate::TaxonomyError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Public domain-level types
// ============================================================================

/// A resolved position in the category scheme: one main category and one of
/// its sub-categories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub main: MainCategory,
    pub sub: SubKey,
}

/// One sub-category under a main rubric.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubCategory {
    /// Stable catalogue key.
    pub key: SubKey,
    /// Display title.
    pub title: String,
    /// Display icon.
    pub icon: String,
    /// Keyword fragments used by the classification fallback, lowercase.
    pub keywords: Vec<String>,
}

/// One main category rubric and its sub-categories, in display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MainRubric {
    pub category: MainCategory,
    pub title: String,
    pub icon: String,
    /// Sub-category that legacy list-level markers resolve to.
    pub general: SubKey,
    pub subs: Vec<SubCategory>,
}

/// The full category scheme: the four main rubrics, their sub-categories and
/// the default placement for labels nothing else claims.
///
/// A `Taxonomy` is immutable once constructed and is injected into every
/// operation that needs it, so two calls against the same catalogue always
/// agree on where a label belongs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Taxonomy {
    mains: Vec<MainRubric>,
    default: Placement,
}

impl Taxonomy {
    /// Build a validated taxonomy.
    ///
    /// Keywords are trimmed and lowercased here so the classification
    /// fallback can compare without re-normalising.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::InvalidCatalog` if:
    /// - the four main categories are not each present exactly once,
    /// - a sub-category key appears under more than one rubric,
    /// - a rubric names a general sub-category it does not contain,
    /// - the default placement does not name an existing sub-category,
    /// - a title or keyword is blank.
    pub fn new(mains: Vec<MainRubric>, default: Placement) -> Result<Self, TaxonomyError> {
        for required in MainCategory::ALL {
            let count = mains.iter().filter(|r| r.category == required).count();
            if count != 1 {
                return Err(TaxonomyError::InvalidCatalog(format!(
                    "main category '{required}' must appear exactly once, found {count}"
                )));
            }
        }

        let mut mains = mains;
        let mut seen: HashSet<SubKey> = HashSet::new();
        for rubric in &mut mains {
            if rubric.title.trim().is_empty() {
                return Err(TaxonomyError::InvalidCatalog(format!(
                    "main category '{}' has a blank title",
                    rubric.category
                )));
            }
            for sub in &mut rubric.subs {
                if sub.title.trim().is_empty() {
                    return Err(TaxonomyError::InvalidCatalog(format!(
                        "sub-category '{}' has a blank title",
                        sub.key
                    )));
                }
                if !seen.insert(sub.key.clone()) {
                    return Err(TaxonomyError::InvalidCatalog(format!(
                        "sub-category key '{}' appears more than once",
                        sub.key
                    )));
                }
                for keyword in &mut sub.keywords {
                    let normalised = keyword.trim().to_lowercase();
                    if normalised.is_empty() {
                        return Err(TaxonomyError::InvalidCatalog(format!(
                            "sub-category '{}' has a blank keyword",
                            sub.key
                        )));
                    }
                    *keyword = normalised;
                }
            }
            if !rubric.subs.iter().any(|s| s.key == rubric.general) {
                return Err(TaxonomyError::InvalidCatalog(format!(
                    "main category '{}' names general sub-category '{}' which it does not contain",
                    rubric.category, rubric.general
                )));
            }
        }

        let taxonomy = Self { mains, default };
        match taxonomy.sub(&taxonomy.default.sub) {
            Some((rubric, _)) if rubric.category == taxonomy.default.main => Ok(taxonomy),
            Some((rubric, _)) => Err(TaxonomyError::InvalidCatalog(format!(
                "default placement names sub-category '{}' which belongs to '{}', not '{}'",
                taxonomy.default.sub, rubric.category, taxonomy.default.main
            ))),
            None => Err(TaxonomyError::InvalidCatalog(format!(
                "default placement names unknown sub-category '{}'",
                taxonomy.default.sub
            ))),
        }
    }

    /// Main rubrics in display order.
    pub fn mains(&self) -> &[MainRubric] {
        &self.mains
    }

    /// Look up the rubric of a main category.
    pub fn rubric(&self, category: MainCategory) -> Option<&MainRubric> {
        self.mains.iter().find(|r| r.category == category)
    }

    /// Look up a sub-category and its rubric by key.
    pub fn sub(&self, key: &SubKey) -> Option<(&MainRubric, &SubCategory)> {
        self.mains.iter().find_map(|rubric| {
            rubric
                .subs
                .iter()
                .find(|sub| &sub.key == key)
                .map(|sub| (rubric, sub))
        })
    }

    /// Whether `key` names a sub-category anywhere in the scheme.
    pub fn contains_sub(&self, key: &SubKey) -> bool {
        self.sub(key).is_some()
    }

    /// Placement of a sub-category key, if it exists.
    pub fn placement_of(&self, key: &SubKey) -> Option<Placement> {
        self.sub(key).map(|(rubric, sub)| Placement {
            main: rubric.category,
            sub: sub.key.clone(),
        })
    }

    /// Placement a legacy list marker resolves to: the general sub-category
    /// of the marker's main category.
    pub fn marker_placement(&self, marker: Marker) -> Option<Placement> {
        let rubric = self.rubric(marker.main_category())?;
        Some(Placement {
            main: rubric.category,
            sub: rubric.general.clone(),
        })
    }

    /// The default placement for labels nothing else claims.
    pub fn default_placement(&self) -> Placement {
        self.default.clone()
    }
}

// ============================================================================
// Public Catalog operations
// ============================================================================

/// Catalogue file operations.
///
/// This is a zero-sized type used for namespacing taxonomy file parsing and
/// rendering. All methods are associated functions.
pub struct Catalog;

impl Catalog {
    /// Parse a taxonomy catalogue from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
    /// `categories.1.subcategories.0.keywords`) to the failing field when the
    /// YAML does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError`] if:
    /// - the YAML does not match the catalogue wire schema,
    /// - any unknown keys are present (due to `#[serde(deny_unknown_fields)]`),
    /// - a key string is not a known main category or a valid sub key,
    /// - the resulting structure fails [`Taxonomy::new`] validation.
    pub fn parse(yaml_text: &str) -> Result<Taxonomy, TaxonomyError> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, TaxonomyWire>(deserializer) {
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
                    "taxonomy schema mismatch at {path}: {source}"
                )));
            }
        };

        wire_to_domain(wire)
    }

    /// Render a taxonomy catalogue as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError`] if serialisation fails.
    pub fn render(taxonomy: &Taxonomy) -> Result<String, TaxonomyError> {
        let wire = domain_to_wire(taxonomy);
        serde_yaml::to_string(&wire)
            .map_err(|e| TaxonomyError::Translation(format!("Failed to serialise taxonomy: {e}")))
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of a taxonomy catalogue file.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct TaxonomyWire {
    pub default: DefaultWire,
    pub categories: Vec<MainWire>,
}

/// Wire representation of the default placement.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct DefaultWire {
    pub main: String,
    pub sub: String,
}

/// Wire representation of one main rubric.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct MainWire {
    pub key: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,

    pub general: String,
    pub subcategories: Vec<SubWire>,
}

/// Wire representation of one sub-category.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct SubWire {
    pub key: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn parse_main_key(key: &str) -> Result<MainCategory, TaxonomyError> {
    MainCategory::from_key(key)
        .ok_or_else(|| TaxonomyError::Translation(format!("unknown main category key '{key}'")))
}

/// Convert wire format to the validated domain taxonomy.
fn wire_to_domain(wire: TaxonomyWire) -> Result<Taxonomy, TaxonomyError> {
    let default = Placement {
        main: parse_main_key(&wire.default.main)?,
        sub: SubKey::new(&wire.default.sub)?,
    };

    let mains = wire
        .categories
        .into_iter()
        .map(|category| {
            let subs = category
                .subcategories
                .into_iter()
                .map(|sub| {
                    Ok(SubCategory {
                        key: SubKey::new(&sub.key)?,
                        title: sub.title,
                        icon: sub.icon,
                        keywords: sub.keywords,
                    })
                })
                .collect::<Result<Vec<_>, TaxonomyError>>()?;

            Ok(MainRubric {
                category: parse_main_key(&category.key)?,
                title: category.title,
                icon: category.icon,
                general: SubKey::new(&category.general)?,
                subs,
            })
        })
        .collect::<Result<Vec<_>, TaxonomyError>>()?;

    Taxonomy::new(mains, default)
}

/// Convert a domain taxonomy to wire format.
fn domain_to_wire(taxonomy: &Taxonomy) -> TaxonomyWire {
    TaxonomyWire {
        default: DefaultWire {
            main: taxonomy.default.main.as_key().to_owned(),
            sub: taxonomy.default.sub.as_str().to_owned(),
        },
        categories: taxonomy
            .mains
            .iter()
            .map(|rubric| MainWire {
                key: rubric.category.as_key().to_owned(),
                title: rubric.title.clone(),
                icon: rubric.icon.clone(),
                general: rubric.general.as_str().to_owned(),
                subcategories: rubric
                    .subs
                    .iter()
                    .map(|sub| SubWire {
                        key: sub.key.as_str().to_owned(),
                        title: sub.title.clone(),
                        icon: sub.icon.clone(),
                        keywords: sub.keywords.clone(),
                    })
                    .collect(),
            })
            .collect(),
    }
}
