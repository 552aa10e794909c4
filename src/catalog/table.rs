//! Locale tables and key lookup.

use std::collections::{
    BTreeSet,
    HashMap,
};

use crate::format::{
    Arg,
    Placeholder,
    Template,
};
use crate::input::locale_file::LocaleFile;
use crate::locale_id::LocaleId;

/// A canonical phrase and its localized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    /// Source-language phrase.
    key: String,
    /// Translation, empty when not yet translated.
    value: String,
    /// `value` parsed once at load time.
    template: Template,
}

impl TranslationEntry {
    /// Entry for `key`, parsing `value` as a template.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let template = Template::parse(&value);
        Self { key: key.into(), value, template }
    }

    /// Source-language phrase.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Raw translation text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// An empty value means "not yet translated".
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Placeholders of the translation, in order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.template.placeholders()
    }

    /// Renders the translation with `args`.
    #[must_use]
    pub fn render(&self, args: &[Arg<'_>]) -> String {
        self.template.render(args)
    }
}

/// The translations of one locale.
///
/// Built once, then shared read-only. Keys are the canonical English
/// phrases, so a missing translation degrades to the key itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTable {
    /// Locale of every entry.
    locale: LocaleId,
    /// Active entries by key.
    entries: HashMap<String, TranslationEntry>,
    /// Keys known to the asset but commented out, never active entries.
    pending: BTreeSet<String>,
}

impl LocaleTable {
    /// Empty table for `locale`.
    #[must_use]
    pub fn new(locale: LocaleId) -> Self {
        Self { locale, entries: HashMap::new(), pending: BTreeSet::new() }
    }

    /// Builds a table from key/value pairs. Later pairs override earlier ones.
    #[must_use]
    pub fn from_entries<K, V>(locale: LocaleId, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new(locale);
        for (key, value) in entries {
            table.insert(key.into(), value.into());
        }
        table
    }

    /// Overlays a parsed locale file onto this table.
    pub(crate) fn apply(&mut self, file: LocaleFile) {
        for (key, value) in file.entries {
            if let Some(previous) = self.insert(key, value) {
                tracing::debug!(
                    locale = %self.locale,
                    key = previous.key(),
                    origin = %file.origin,
                    "Translation overridden"
                );
            }
        }
        for key in file.pending {
            if !self.entries.contains_key(&key) {
                self.pending.insert(key);
            }
        }
    }

    /// Inserts an entry, clearing a pending mark for its key.
    fn insert(&mut self, key: String, value: String) -> Option<TranslationEntry> {
        self.pending.remove(&key);
        let entry = TranslationEntry::new(key.clone(), value);
        self.entries.insert(key, entry)
    }

    /// Locale of this table.
    #[must_use]
    pub const fn locale(&self) -> &LocaleId {
        &self.locale
    }

    /// Entry for `key`, including not-yet-translated (empty) ones.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&TranslationEntry> {
        self.entries.get(key)
    }

    /// Entry for `key` when it holds a usable translation.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&TranslationEntry> {
        self.entry(key).filter(|entry| !entry.is_empty())
    }

    /// Raw translation of `key`; `None` for absent or empty entries.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.lookup(key).map(TranslationEntry::value)
    }

    /// Whether `key` has a usable translation.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Resolves `key` and substitutes `args` positionally.
    ///
    /// Absent and empty translations fall back to the key, which is itself
    /// a valid template in the source language.
    #[must_use]
    pub fn translate(&self, key: &str, args: &[Arg<'_>]) -> String {
        self.lookup(key).map_or_else(|| Template::parse(key).render(args), |entry| entry.render(args))
    }

    /// Every active entry, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = &TranslationEntry> {
        self.entries.values()
    }

    /// Active keys, sorted.
    #[must_use]
    pub fn keys(&self) -> BTreeSet<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Commented-out keys, sorted.
    #[must_use]
    pub const fn pending(&self) -> &BTreeSet<String> {
        &self.pending
    }

    /// Every key this table knows about: active, empty and pending.
    #[must_use]
    pub fn known_keys(&self) -> BTreeSet<String> {
        self.entries.keys().chain(&self.pending).cloned().collect()
    }

    /// Number of active entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no active entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Translates `key` with `table`. See [`LocaleTable::translate`].
#[must_use]
pub fn translate(table: &LocaleTable, key: &str, args: &[Arg<'_>]) -> String {
    table.translate(key, args)
}
