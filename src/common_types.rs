use rvstruct::ValueStruct;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ValueStruct)]
pub struct PluginName(String);

/// Language code as the pipeline receives it (`eng`, `kor`, `chi_sim`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ValueStruct)]
pub struct LanguageCode(String);

/// Language code of a concrete engine model (`en`, `korean`, `ch`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ValueStruct)]
pub struct EngineLanguage(String);

impl LanguageCode {
    pub const DEFAULT: &'static str = "eng";

    /// Languages written with the Western European characters of the
    /// standard PDF fonts, as pipeline codes and PaddleOCR codes.
    const STANDARD_FONT_LANGUAGES: [&'static str; 30] = [
        "eng", "en", "deu", "german", "fra", "french", "spa", "es", "por", "pt", "ita", "it",
        "nld", "nl", "nor", "no", "swe", "sv", "dan", "da", "fin", "fi", "lat", "la", "ind",
        "id", "msa", "ms", "est", "et",
    ];

    /// Splits a `-l` value like `eng+kor` into separate codes.
    pub fn parse_list(value: &str) -> Vec<LanguageCode> {
        value
            .split('+')
            .map(|code| code.trim())
            .filter(|code| !code.is_empty())
            .map(|code| LanguageCode(code.to_string()))
            .collect()
    }

    /// Whether a PDF text layer in this language can use the built-in Helvetica.
    pub fn fits_standard_font(&self) -> bool {
        Self::STANDARD_FONT_LANGUAGES.contains(&self.0.as_str())
    }
}

/// Axis-aligned box in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a box only if it has a positive area.
    pub fn non_degenerate(left: f32, top: f32, right: f32, bottom: f32) -> Option<Self> {
        if right <= left || bottom <= top {
            None
        } else {
            Some(Self::new(left, top, right, bottom))
        }
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Clamps to `[0, width] x [0, height]`, dropping boxes that collapse.
    pub fn clamp_to(&self, width: f32, height: f32) -> Option<BoundingBox> {
        Self::non_degenerate(
            self.left.clamp(0.0, width),
            self.top.clamp(0.0, height),
            self.right.clamp(0.0, width),
            self.bottom.clamp(0.0, height),
        )
    }

    pub fn is_within(&self, width: f32, height: f32) -> bool {
        self.left >= 0.0
            && self.top >= 0.0
            && self.right <= width
            && self.bottom <= height
            && self.right > self.left
            && self.bottom > self.top
    }
}

#[allow(unused_imports)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_list() {
        let codes = LanguageCode::parse_list("eng+kor");
        assert_eq!(
            codes,
            vec![
                LanguageCode::from("eng".to_string()),
                LanguageCode::from("kor".to_string())
            ]
        );
        assert!(LanguageCode::parse_list(" + ").is_empty());
    }

    #[test]
    fn test_standard_font_languages() {
        assert!(LanguageCode::from("eng".to_string()).fits_standard_font());
        assert!(LanguageCode::from("french".to_string()).fits_standard_font());
        assert!(!LanguageCode::from("kor".to_string()).fits_standard_font());
        assert!(!LanguageCode::from("chi_sim".to_string()).fits_standard_font());
        assert!(!LanguageCode::from("rus".to_string()).fits_standard_font());
        assert!(!LanguageCode::from("pol".to_string()).fits_standard_font());
    }

    #[test]
    fn test_clamp_to_page() {
        let bbox = BoundingBox::new(-5.0, 10.0, 700.0, 20.0);
        assert_eq!(
            bbox.clamp_to(612.0, 792.0),
            Some(BoundingBox::new(0.0, 10.0, 612.0, 20.0))
        );

        let outside = BoundingBox::new(650.0, 10.0, 700.0, 20.0);
        assert_eq!(outside.clamp_to(612.0, 792.0), None);
    }

    #[test]
    fn test_degenerate_boxes() {
        assert!(BoundingBox::non_degenerate(10.0, 10.0, 10.0, 20.0).is_none());
        assert!(BoundingBox::non_degenerate(10.0, 20.0, 30.0, 20.0).is_none());
        assert!(BoundingBox::non_degenerate(10.0, 10.0, 30.0, 20.0).is_some());
    }
}
