use crate::common_types::{EngineLanguage, LanguageCode};
use rvstruct::ValueStruct;

/// Pipeline language code -> PaddleOCR model language.
const LANG_MAP: [(&str, &str); 49] = [
    ("eng", "en"),
    ("kor", "korean"),
    ("chi_sim", "ch"),
    ("chi_tra", "chinese_cht"),
    ("jpn", "japan"),
    ("deu", "german"),
    ("fra", "french"),
    ("spa", "es"),
    ("por", "pt"),
    ("ita", "it"),
    ("rus", "ru"),
    ("ara", "ar"),
    ("hin", "hi"),
    ("vie", "vi"),
    ("tha", "th"),
    ("tur", "tr"),
    ("ukr", "uk"),
    ("pol", "pl"),
    ("nld", "nl"),
    ("nor", "no"),
    ("swe", "sv"),
    ("dan", "da"),
    ("fin", "fi"),
    ("hun", "hu"),
    ("ces", "cs"),
    ("ron", "ro"),
    ("bul", "bg"),
    ("hrv", "hr"),
    ("slk", "sk"),
    ("slv", "sl"),
    ("ell", "el"),
    ("heb", "he"),
    ("ind", "id"),
    ("msa", "ms"),
    ("tam", "ta"),
    ("tel", "te"),
    ("kan", "ka"),
    ("mar", "mr"),
    ("nep", "ne"),
    ("ben", "bn"),
    ("urd", "ur"),
    ("fas", "fa"),
    ("mya", "my"),
    ("khm", "km"),
    ("lao", "lo"),
    ("lat", "la"),
    ("est", "et"),
    ("lav", "lv"),
    ("lit", "lt"),
];

/// Maps a pipeline language code to a PaddleOCR language.
/// Codes that already name a PaddleOCR language are accepted as they are.
pub fn to_paddle_language(language: &LanguageCode) -> Option<EngineLanguage> {
    let code = language.value().as_str();
    LANG_MAP
        .iter()
        .find(|(source, target)| *source == code || *target == code)
        .map(|(_, target)| EngineLanguage::from(target.to_string()))
}

/// Pipeline language codes that map to the given PaddleOCR language.
pub fn from_paddle_language(language: &EngineLanguage) -> Vec<LanguageCode> {
    LANG_MAP
        .iter()
        .filter(|(_, target)| *target == language.value().as_str())
        .map(|(source, _)| LanguageCode::from(source.to_string()))
        .collect()
}
