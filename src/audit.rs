//! Translation completeness reports.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::{
    LocaleTable,
    TranslationEntry,
};
use crate::format::{
    Placeholder,
    Template,
};
use crate::locale_id::LocaleId;

/// An entry whose translation uses different conversions than its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderMismatch {
    /// Phrase whose translation disagrees.
    pub key: String,
    /// Conversions in the key, e.g. `"ds"` for `%d ... %s`, sorted.
    pub expected: String,
    /// Conversions in the translation, sorted.
    pub found: String,
}

/// How much of a locale is translated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    /// Audited locale.
    pub locale: LocaleId,
    /// Entries with a non-empty translation.
    pub translated: usize,
    /// Active entries with an empty value.
    pub empty: Vec<String>,
    /// Commented-out keys plus reference keys the table does not know.
    pub pending: Vec<String>,
    /// Entries whose conversions differ from their key.
    pub placeholder_mismatches: Vec<PlaceholderMismatch>,
}

impl CompletenessReport {
    /// Every key counted by the report.
    #[must_use]
    pub fn total(&self) -> usize {
        self.translated + self.empty.len() + self.pending.len()
    }

    /// No empty, pending or mismatched entries.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.empty.is_empty() && self.pending.is_empty() && self.placeholder_mismatches.is_empty()
    }

    /// Translated share of all keys, rounded down. An empty locale is 100.
    #[must_use]
    pub fn completion_percent(&self) -> usize {
        match self.total() {
            0 => 100,
            total => self.translated * 100 / total,
        }
    }
}

/// Audits `table`, optionally against the key set of a reference locale.
#[must_use]
pub fn audit(table: &LocaleTable, reference: Option<&BTreeSet<String>>) -> CompletenessReport {
    let mut translated = 0;
    let mut empty = Vec::new();
    let mut placeholder_mismatches = Vec::new();

    for entry in table.entries() {
        if entry.is_empty() {
            empty.push(entry.key().to_string());
            continue;
        }
        translated += 1;

        if let Some(mismatch) = placeholder_mismatch(entry) {
            placeholder_mismatches.push(mismatch);
        }
    }

    let mut pending: BTreeSet<String> = table.pending().clone();
    if let Some(reference) = reference {
        pending.extend(reference.iter().filter(|key| table.entry(key).is_none()).cloned());
    }

    empty.sort();
    placeholder_mismatches.sort_by(|a, b| a.key.cmp(&b.key));

    let report = CompletenessReport {
        locale: table.locale().clone(),
        translated,
        empty,
        pending: pending.into_iter().collect(),
        placeholder_mismatches,
    };
    tracing::debug!(
        locale = %report.locale,
        translated = report.translated,
        pending = report.pending.len(),
        mismatches = report.placeholder_mismatches.len(),
        "Audited locale"
    );
    report
}

/// Mismatch report for `entry`, if its conversions differ from the key's.
fn placeholder_mismatch(entry: &TranslationEntry) -> Option<PlaceholderMismatch> {
    let expected = conversion_signature(Template::parse(entry.key()).placeholders());
    let found = conversion_signature(entry.placeholders());

    (expected != found).then(|| PlaceholderMismatch { key: entry.key().to_string(), expected, found })
}

/// Sorted conversion characters, e.g. `"ds"`.
fn conversion_signature<'a>(placeholders: impl Iterator<Item = &'a Placeholder>) -> String {
    let mut conversions: Vec<char> =
        placeholders.map(|placeholder| placeholder.conversion.as_char()).collect();
    conversions.sort_unstable();
    conversions.into_iter().collect()
}
