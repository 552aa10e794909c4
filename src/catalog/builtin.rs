//! Locale tables compiled into the binary.

use crate::locale_id::LocaleId;

/// Source language of every key. Its table is always empty.
pub const SOURCE_LOCALE: &str = "en_US";

/// An embedded locale asset.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinLocale {
    /// Locale the asset translates into.
    pub locale: &'static str,
    /// Path of the asset in the source tree.
    pub origin: &'static str,
    /// Locale file text.
    pub text: &'static str,
}

/// Embedded assets, one per shipped locale.
static BUILTIN_LOCALES: &[BuiltinLocale] = &[BuiltinLocale {
    locale: "pl_PL",
    origin: "locales/pl_PL/translations.jsonc",
    text: include_str!("../../locales/pl_PL/translations.jsonc"),
}];

/// Embedded asset for `locale`, if one ships with the crate.
#[must_use]
pub fn builtin_locale(locale: &LocaleId) -> Option<&'static BuiltinLocale> {
    BUILTIN_LOCALES.iter().find(|builtin| builtin.locale == locale.as_str())
}

/// Locales with an embedded asset.
pub fn builtin_locales() -> impl Iterator<Item = LocaleId> {
    BUILTIN_LOCALES.iter().filter_map(|builtin| LocaleId::parse(builtin.locale).ok())
}

/// Whether `locale` is written in the language the keys are written in.
///
/// Such a locale needs no table: every key is its own translation.
#[must_use]
pub fn is_source_language(locale: &LocaleId) -> bool {
    LocaleId::parse(SOURCE_LOCALE).is_ok_and(|source| source.language() == locale.language())
}
