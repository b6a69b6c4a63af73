//! Identifier types for the category scheme.
//!
//! Main categories are a closed set: the four rubrics are structural, both
//! in the catalogue and on the wire, so they are an enum. Sub-categories are
//! open catalogue data and are identified by validated [`SubKey`] strings.

use crate::TaxonomyError;

/// The four fixed main categories every establishment profile is organised
/// under, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MainCategory {
    /// Equipment and services offered on site.
    EquipementsServices,
    /// Atmosphere and house specialities.
    AmbianceSpecialites,
    /// Practical information for visitors.
    InformationsPratiques,
    /// Accepted payment methods.
    MoyensPaiement,
}

impl MainCategory {
    /// All main categories in display order.
    pub const ALL: [MainCategory; 4] = [
        MainCategory::EquipementsServices,
        MainCategory::AmbianceSpecialites,
        MainCategory::InformationsPratiques,
        MainCategory::MoyensPaiement,
    ];

    /// Convert to the catalogue key string.
    pub fn as_key(self) -> &'static str {
        match self {
            MainCategory::EquipementsServices => "equipements-services",
            MainCategory::AmbianceSpecialites => "ambiance-specialites",
            MainCategory::InformationsPratiques => "informations-pratiques",
            MainCategory::MoyensPaiement => "moyens-paiement",
        }
    }

    /// Parse from a catalogue key string.
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "equipements-services" => Some(MainCategory::EquipementsServices),
            "ambiance-specialites" => Some(MainCategory::AmbianceSpecialites),
            "informations-pratiques" => Some(MainCategory::InformationsPratiques),
            "moyens-paiement" => Some(MainCategory::MoyensPaiement),
            _ => None,
        }
    }
}

impl std::fmt::Display for MainCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

impl serde::Serialize for MainCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_key())
    }
}

impl<'de> serde::Deserialize<'de> for MainCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MainCategory::from_key(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown main category key '{s}'"))
        })
    }
}

/// Legacy list-level markers carried in `text|marker` wire entries.
///
/// Before sub-category markers existed, entries were qualified with the name
/// of the list they belonged to. Each marker resolves to the general
/// sub-category of the matching main category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Services,
    Ambiance,
    InformationsPratiques,
    MoyensPaiement,
}

impl Marker {
    /// Convert to the wire marker string.
    pub fn as_key(self) -> &'static str {
        match self {
            Marker::Services => "services",
            Marker::Ambiance => "ambiance",
            Marker::InformationsPratiques => "informations-pratiques",
            Marker::MoyensPaiement => "moyens-paiement",
        }
    }

    /// Parse from a wire marker string.
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "services" => Some(Marker::Services),
            "ambiance" => Some(Marker::Ambiance),
            "informations-pratiques" => Some(Marker::InformationsPratiques),
            "moyens-paiement" => Some(Marker::MoyensPaiement),
            _ => None,
        }
    }

    /// The main category this marker resolves to.
    pub fn main_category(self) -> MainCategory {
        match self {
            Marker::Services => MainCategory::EquipementsServices,
            Marker::Ambiance => MainCategory::AmbianceSpecialites,
            Marker::InformationsPratiques => MainCategory::InformationsPratiques,
            Marker::MoyensPaiement => MainCategory::MoyensPaiement,
        }
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// A validated sub-category key.
///
/// Keys are lowercase kebab-case ASCII, as used in catalogue files and in
/// marker-qualified wire entries such as `Parking gratuit|parking`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubKey(String);

impl SubKey {
    /// Creates a new `SubKey` from the given input.
    ///
    /// The input is trimmed of surrounding whitespace and must be non-empty
    /// lowercase kebab-case.
    ///
    /// # Errors
    ///
    /// Returns `TaxonomyError::InvalidCatalog` when the key is blank or
    /// contains characters outside `a-z`, `0-9` and `-`.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TaxonomyError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaxonomyError::InvalidCatalog(
                "sub-category key cannot be empty".into(),
            ));
        }
        let valid = trimmed
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(TaxonomyError::InvalidCatalog(format!(
                "sub-category key '{trimmed}' must be lowercase kebab-case"
            )));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for SubKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for SubKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        SubKey::new(&s).map_err(serde::de::Error::custom)
    }
}
