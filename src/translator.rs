//! Scoped locale context handed to rendering code.

use std::fmt::{
    self,
    Write as _,
};
use std::iter;
use std::sync::Arc;

use chrono::format::{
    Item,
    StrftimeItems,
};
use chrono::{
    DateTime,
    TimeZone,
};

use crate::catalog::{
    LocaleTable,
    TranslationEntry,
};
use crate::format::{
    Arg,
    Template,
};
use crate::locale_id::LocaleId;

/// Translates `key` with positional arguments.
///
/// ```
/// use board_locale::{Translator, load, t};
/// use std::sync::Arc;
///
/// let translator = Translator::new(Arc::new(load("pl_PL").unwrap()));
/// assert_eq!(t!(translator, "Column %d", 3), "Kolumna 3");
/// assert_eq!(t!(translator, "Save"), "Zapisz");
/// ```
#[macro_export]
macro_rules! t {
    ($translator:expr, $key:expr $(, $arg:expr)* $(,)?) => {
        $translator.translate($key, &[$($crate::format::Arg::from($arg)),*])
    };
}

/// The active locale table plus an optional default-locale table.
///
/// Lookup order: active table, default table, then the key itself.
/// Cheap to clone; tables are shared.
#[derive(Debug, Clone)]
pub struct Translator {
    /// Active locale.
    table: Arc<LocaleTable>,
    /// Default locale, consulted second.
    fallback: Option<Arc<LocaleTable>>,
}

impl Translator {
    /// Translator over `table` alone.
    #[must_use]
    pub const fn new(table: Arc<LocaleTable>) -> Self {
        Self { table, fallback: None }
    }

    /// Adds a default-locale table consulted after the active one.
    #[must_use]
    pub fn with_fallback(self, fallback: Arc<LocaleTable>) -> Self {
        Self { fallback: Some(fallback), ..self }
    }

    /// Active locale.
    #[must_use]
    pub fn locale(&self) -> &LocaleId {
        self.table.locale()
    }

    /// Active locale table.
    #[must_use]
    pub fn table(&self) -> &LocaleTable {
        &self.table
    }

    /// First usable entry for `key` in the active then the default table.
    fn resolve(&self, key: &str) -> Option<&TranslationEntry> {
        self.table.lookup(key).or_else(|| self.fallback.as_deref().and_then(|table| table.lookup(key)))
    }

    /// Raw translation of `key` from either table.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.resolve(key).map(TranslationEntry::value)
    }

    /// Translates `key` and substitutes `args`.
    #[must_use]
    pub fn translate(&self, key: &str, args: &[Arg<'_>]) -> String {
        self.resolve(key).map_or_else(|| Template::parse(key).render(args), |entry| entry.render(args))
    }

    /// Like [`Self::translate`], with every text argument HTML-escaped.
    ///
    /// The translation itself is trusted markup and is not escaped, so
    /// notification strings carrying links keep working.
    #[must_use]
    pub fn translate_html(&self, key: &str, args: &[Arg<'_>]) -> String {
        let escaped: Vec<Arg<'_>> = args.iter().map(Arg::html_escaped).collect();
        self.translate(key, &escaped)
    }

    /// Formats a number with the locale's separators.
    ///
    /// Reads `number.decimals`, `number.decimals_separator` and
    /// `number.thousands_separator` from the tables, defaulting to 2, `.`
    /// and `,`.
    #[must_use]
    pub fn number(&self, value: f64) -> String {
        let decimals = self
            .get("number.decimals")
            .and_then(|decimals| decimals.trim().parse::<usize>().ok())
            .unwrap_or(2);
        let decimal_separator = self.get("number.decimals_separator").unwrap_or(".");
        let thousands_separator = self.get("number.thousands_separator").unwrap_or(",");

        group_digits(&round_half_away_from_zero(value, decimals), decimal_separator, thousands_separator)
    }

    /// Renders a date with a translated date template.
    ///
    /// `format_key` is a strftime template in the source language (e.g.
    /// `%B %e, %Y`); its translation reorders the conversions for the
    /// locale, and month and day names come from the locale's calendar
    /// data. A template chrono cannot parse is returned unrendered.
    #[must_use]
    pub fn datetime<Tz>(&self, format_key: &str, datetime: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let template = self.get(format_key).unwrap_or(format_key);
        let locale = self.chrono_locale();

        let items: Vec<Item<'_>> = StrftimeItems::new_with_locale(template, locale).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            tracing::warn!(template, "Invalid date template");
            return template.to_string();
        }

        let mut rendered = String::new();
        if write!(rendered, "{}", datetime.format_localized_with_items(items.iter(), locale)).is_err() {
            tracing::warn!(template, "Failed to render date template");
            return template.to_string();
        }
        rendered
    }

    /// chrono calendar data for the active locale, POSIX when unknown.
    fn chrono_locale(&self) -> chrono::Locale {
        chrono::Locale::try_from(self.locale().as_str()).unwrap_or(chrono::Locale::POSIX)
    }
}

/// Formats `value` with exactly `decimals` fraction digits.
///
/// Rounds the shortest decimal form of `value` half away from zero, so
/// `0.125` at two decimals is `0.13`. Negative zero prints without a sign.
fn round_half_away_from_zero(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let shortest = value.abs().to_string();
    let (integer, fraction) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));
    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction.bytes().chain(iter::repeat(b'0')).take(decimals))
        .collect();

    if fraction.as_bytes().get(decimals).is_some_and(|digit| *digit >= b'5') {
        match digits.iter().rposition(|digit| *digit != b'9') {
            Some(position) => {
                for digit in digits.iter_mut().skip(position) {
                    *digit = if *digit == b'9' { b'0' } else { digit.saturating_add(1) };
                }
            }
            None => {
                digits.iter_mut().for_each(|digit| *digit = b'0');
                digits.insert(0, b'1');
            }
        }
    }

    let negative = value.is_sign_negative() && digits.iter().any(|digit| *digit != b'0');
    let (integer, fraction) = digits.split_at(digits.len().saturating_sub(decimals));

    let mut out = String::with_capacity(digits.len().saturating_add(2));
    if negative {
        out.push('-');
    }
    out.extend(integer.iter().copied().map(char::from));
    if !fraction.is_empty() {
        out.push('.');
        out.extend(fraction.iter().copied().map(char::from));
    }
    out
}

/// Inserts thousands separators into a formatted decimal number and swaps
/// its decimal point.
fn group_digits(formatted: &str, decimal_separator: &str, thousands_separator: &str) -> String {
    let (sign, unsigned) =
        formatted.strip_prefix('-').map_or(("", formatted), |rest| ("-", rest));
    let (integer, fraction) =
        unsigned.split_once('.').map_or((unsigned, None), |(integer, fraction)| (integer, Some(fraction)));

    let mut out = String::from(sign);
    let digits = integer.chars().count();
    for (position, digit) in integer.chars().enumerate() {
        if position > 0 && (digits - position) % 3 == 0 {
            out.push_str(thousands_separator);
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push_str(decimal_separator);
        out.push_str(fraction);
    }
    out
}
