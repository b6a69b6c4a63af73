/// Errors that can occur when creating validated label types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input was empty, or contained only icons and whitespace
    #[error("Label cannot be empty")]
    Empty,
}

/// Decorative icon glyphs that editors prepend to amenity labels.
///
/// The set covers the markers seen in real profile data: warning signs,
/// check marks, crosses, coloured circles, stars, flames, light bulbs,
/// targets and pins, plus the emoji variation selector that often trails
/// them.
fn is_icon_glyph(c: char) -> bool {
    matches!(
        c,
        '\u{26A0}'                    // warning sign
            | '\u{2705}'              // white heavy check mark
            | '\u{2714}'              // heavy check mark
            | '\u{2611}'              // ballot box with check
            | '\u{274C}'              // cross mark
            | '\u{2716}'              // heavy multiplication x
            | '\u{274E}'              // negative squared cross mark
            | '\u{1F534}'..='\u{1F535}' // red and blue circles
            | '\u{1F7E0}'..='\u{1F7E4}' // orange through brown circles
            | '\u{26AA}'..='\u{26AB}'   // white and black circles
            | '\u{2B50}'              // star
            | '\u{1F31F}'             // glowing star
            | '\u{2728}'              // sparkles
            | '\u{2605}'..='\u{2606}'   // black and white star
            | '\u{1F525}'             // fire
            | '\u{1F4A1}'             // light bulb
            | '\u{1F3AF}'             // direct hit
            | '\u{1F4CC}'..='\u{1F4CD}' // pushpins
            | '\u{FE0F}'              // variation selector-16
    )
}

/// Strips leading icon glyphs and surrounding whitespace from a label.
///
/// Only the leading run of glyphs is removed; icons inside or at the end of
/// the text are part of the label and stay. The function is total and
/// idempotent: any input maps to a deterministic output, and sanitising an
/// already-sanitised label returns it unchanged.
///
/// # Arguments
///
/// * `label` - Raw label text as found in profile lists or form input
///
/// # Returns
///
/// The label with leading icons removed and whitespace trimmed from both
/// ends. May be empty if the input held nothing else.
pub fn sanitize(label: &str) -> String {
    let mut rest = label.trim();
    while let Some(c) = rest.chars().next() {
        if !is_icon_glyph(c) {
            break;
        }
        rest = rest[c.len_utf8()..].trim_start();
    }
    rest.to_owned()
}

/// A label that has been sanitised and is guaranteed non-empty.
///
/// This type wraps a `String` produced by [`sanitize`] and ensures it
/// contains at least one character that is neither whitespace nor a leading
/// icon glyph. Record text and mutation input both go through this type, so
/// stored labels are always in their display form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CleanLabel(String);

impl CleanLabel {
    /// Creates a new `CleanLabel` from the given input.
    ///
    /// The input is sanitised with [`sanitize`]. If nothing remains, an
    /// error is returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(CleanLabel)` if the sanitised input is non-empty,
    /// or `Err(TextError::Empty)` if only icons and whitespace were given.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let cleaned = sanitize(input.as_ref());
        if cleaned.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(cleaned))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CleanLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CleanLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for CleanLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for CleanLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CleanLabel::new(&s).map_err(serde::de::Error::custom)
    }
}
