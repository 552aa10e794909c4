//! Locale identifiers.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// A string that is not a locale identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid locale identifier '{0}': expected a language code such as \"pl\" or \"pl_PL\"")]
pub struct InvalidLocaleId(pub String);

/// Normalized locale identifier.
///
/// Always `ll` or `ll_RR`: the language subtag is lowercase, the region
/// subtag uppercase (or a three digit UN M.49 code). Both `-` and `_` are
/// accepted as separators on input, so `pl-pl`, `pl_PL` and `PL-PL` all
/// normalize to `pl_PL`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleId(String);

impl LocaleId {
    /// Parses and normalizes a locale identifier.
    pub fn parse(raw: &str) -> Result<Self, InvalidLocaleId> {
        let mut parts = raw.trim().split(['_', '-']);
        let language = parts.next().unwrap_or_default();
        let region = parts.next();

        if parts.next().is_some()
            || !is_language_subtag(language)
            || region.is_some_and(|region| !is_region_subtag(region))
        {
            return Err(InvalidLocaleId(raw.to_string()));
        }

        let mut id = language.to_ascii_lowercase();
        if let Some(region) = region {
            id.push('_');
            id.push_str(&region.to_ascii_uppercase());
        }
        Ok(Self(id))
    }

    /// Normalized form, e.g. `pl_PL`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Language subtag, e.g. `pl`.
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split_once('_').map_or(self.0.as_str(), |(language, _)| language)
    }

    /// Region subtag, e.g. `PL`.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.0.split_once('_').map(|(_, region)| region)
    }

    /// Whether the language subtag is a known language code.
    #[must_use]
    pub fn is_known_language(&self) -> bool {
        LANGUAGE_CODES.contains(self.language())
    }

    /// Detects a locale from a file path.
    ///
    /// Splits the path by '/' and '.' and searches backwards for a part that
    /// is a locale identifier with a known language. A part with a region
    /// wins over a bare language, so a file named like a language code
    /// inside a locale directory stays with that directory.
    ///
    /// # Examples
    /// - `locales/pl_PL/translations.jsonc` → `pl_PL`
    /// - `locales/pl_PL/ui.jsonc` → `pl_PL`
    /// - `locales/fr.json` → `fr`
    /// - `translations/de-DE/board.json` → `de_DE`
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let path_str = path.to_string_lossy();
        let candidates: Vec<Self> = path_str
            .split(['/', '\\', '.'])
            .rev()
            .filter_map(|part| Self::parse(part).ok())
            .filter(Self::is_known_language)
            .collect();

        let chosen = candidates.iter().position(|locale| locale.region().is_some()).unwrap_or(0);
        candidates.into_iter().nth(chosen)
    }
}

/// ISO 639-1 codes, plus the three-letter codes of languages without one
/// that ship in common locale sets.
static LANGUAGE_CODES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
        "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
        "cy", "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi",
        "fj", "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr",
        "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja",
        "jv", "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw",
        "ky", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml",
        "mn", "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv",
        "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro",
        "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr",
        "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr",
        "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi",
        "yo", "za", "zh", "zu", "ast", "ckb", "fil", "haw", "yue",
    ]
    .into_iter()
    .collect()
});

/// ISO 639 language subtag: two or three ASCII letters.
fn is_language_subtag(subtag: &str) -> bool {
    (2..=3).contains(&subtag.len()) && subtag.chars().all(|c| c.is_ascii_alphabetic())
}

/// ISO 3166 alpha-2 or UN M.49 numeric region subtag.
fn is_region_subtag(subtag: &str) -> bool {
    match subtag.len() {
        2 => subtag.chars().all(|c| c.is_ascii_alphabetic()),
        3 => subtag.chars().all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleId {
    type Err = InvalidLocaleId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocaleId {
    type Error = InvalidLocaleId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocaleId> for String {
    fn from(value: LocaleId) -> Self {
        value.0
    }
}

impl AsRef<str> for LocaleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("pl_PL", "pl_PL")]
    #[case("pl-pl", "pl_PL")]
    #[case("PL-PL", "pl_PL")]
    #[case(" fr ", "fr")]
    #[case("es_419", "es_419")]
    #[case("ast", "ast")]
    fn parse_normalizes(#[case] raw: &str, #[case] expected: &str) {
        let locale = LocaleId::parse(raw).unwrap();

        assert_eq!(locale.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("p")]
    #[case("polish")]
    #[case("pl_POL")]
    #[case("sr_Cyrl_BA")]
    #[case("translations")]
    #[case("pl_")]
    fn parse_rejects_invalid(#[case] raw: &str) {
        assert_that!(LocaleId::parse(raw), err(eq(&InvalidLocaleId(raw.to_string()))));
    }

    #[rstest]
    fn language_and_region() {
        let locale = LocaleId::parse("pt_BR").unwrap();

        assert_eq!(locale.language(), "pt");
        assert_eq!(locale.region(), Some("BR"));

        let bare = LocaleId::parse("de").unwrap();
        assert_eq!(bare.language(), "de");
        assert_eq!(bare.region(), None);
    }

    #[rstest]
    #[case("locales/pl_PL/translations.jsonc", Some("pl_PL"))]
    #[case("app/Locales/de-DE/translations.json", Some("de_DE"))]
    #[case("locales/fr.json", Some("fr"))]
    #[case("locales/translations.jsonc", None)]
    #[case("locales/pl_PL/app.json", Some("pl_PL"))]
    #[case("locales/pl_PL/ui.jsonc", Some("pl_PL"))]
    #[case("src/i18n/pl.json", Some("pl"))]
    #[case("web/app/ui.json", None)]
    fn from_path_detects_locale(#[case] path: &str, #[case] expected: Option<&str>) {
        let detected = LocaleId::from_path(Path::new(path));

        assert_eq!(detected.as_ref().map(LocaleId::as_str), expected);
    }

    #[rstest]
    fn deserializes_with_normalization() {
        let locale: LocaleId = serde_json::from_str(r#""pl-pl""#).unwrap();

        assert_eq!(locale.as_str(), "pl_PL");
        assert!(serde_json::from_str::<LocaleId>(r#""nope_nope""#).is_err());
    }
}
