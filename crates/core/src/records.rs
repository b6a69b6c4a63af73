use e2s_taxonomy::{Placement, SubKey};
use e2s_types::CleanLabel;
use e2s_wire::WireList;

/// The text of an amenity record.
///
/// Most records carry a sanitised label. A wire entry that sanitises to
/// nothing (icon-only or blank) is kept as opaque raw text instead: it still
/// counts, still renders back verbatim, and is never matched by mutations,
/// whose targets always sanitise to something.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AmenityText {
    Clean(CleanLabel),
    Opaque(String),
}

impl AmenityText {
    /// The text as shown in the organised view.
    pub fn as_str(&self) -> &str {
        match self {
            AmenityText::Clean(text) => text.as_str(),
            AmenityText::Opaque(raw) => raw.as_str(),
        }
    }

    /// The sanitised label, when the record has one.
    pub fn clean(&self) -> Option<&CleanLabel> {
        match self {
            AmenityText::Clean(text) => Some(text),
            AmenityText::Opaque(_) => None,
        }
    }
}

impl std::fmt::Display for AmenityText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single amenity entry after ingestion: display text, the sub-category it
/// is filed under and the envelope list it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmenityRecord {
    pub text: AmenityText,
    pub placement: Placement,
    pub source: WireList,
}

impl AmenityRecord {
    pub fn new(text: CleanLabel, placement: Placement, source: WireList) -> Self {
        Self {
            text: AmenityText::Clean(text),
            placement,
            source,
        }
    }

    /// A record for a wire entry that sanitises to nothing, kept verbatim.
    pub fn opaque(raw: String, placement: Placement, source: WireList) -> Self {
        Self {
            text: AmenityText::Opaque(raw),
            placement,
            source,
        }
    }

    pub fn sub(&self) -> &SubKey {
        &self.placement.sub
    }
}

/// The ordered collection of amenity records for one establishment.
///
/// Order is ingestion order and is preserved across mutations: edits keep
/// their slot, additions append, removals close the gap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AmenitySet {
    records: Vec<AmenityRecord>,
}

impl AmenitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: AmenityRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[AmenityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose sanitised text equals `text` within `sub`, if any.
    /// Opaque records have no sanitised text and never match.
    pub fn position_of(&self, sub: &SubKey, text: &str) -> Option<usize> {
        self.records.iter().position(|r| {
            r.placement.sub == *sub && r.text.clean().is_some_and(|t| t.as_str() == text)
        })
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut AmenityRecord> {
        self.records.get_mut(index)
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> AmenityRecord {
        self.records.remove(index)
    }
}
