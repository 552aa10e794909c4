//! Locale table construction from embedded and on-disk assets.

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::path::PathBuf;

use super::LocaleError;
use super::builtin::{
    self,
    SOURCE_LOCALE,
};
use super::table::LocaleTable;
use crate::config::FileMatcher;
use crate::discovery::{
    DiscoveredLocaleFile,
    discover_locale_files,
};
use crate::input::LocaleFile;
use crate::locale_id::LocaleId;

/// Knows where each locale's data lives and builds tables from it.
///
/// A table is the embedded asset (if enabled and shipped) overlaid with
/// every registered file for the locale, in registration order.
#[derive(Debug, Clone)]
pub struct LocaleLoader {
    /// Whether embedded assets are consulted.
    builtin: bool,
    /// On-disk files per locale, applied in order after the asset.
    files: BTreeMap<LocaleId, Vec<PathBuf>>,
}

impl Default for LocaleLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl LocaleLoader {
    /// Loader over the embedded assets only.
    #[must_use]
    pub const fn new() -> Self {
        Self { builtin: true, files: BTreeMap::new() }
    }

    /// Disables the embedded assets.
    #[must_use]
    pub fn without_builtin(mut self) -> Self {
        self.builtin = false;
        self
    }

    /// Registers an on-disk locale file.
    #[must_use]
    pub fn with_file(mut self, locale: LocaleId, path: impl Into<PathBuf>) -> Self {
        self.files.entry(locale).or_default().push(path.into());
        self
    }

    /// Registers discovered files in path order.
    #[must_use]
    pub fn with_discovered(self, files: Vec<DiscoveredLocaleFile>) -> Self {
        files.into_iter().fold(self, |loader, file| loader.with_file(file.locale, file.path))
    }

    /// Builds a loader over the files `matcher` finds in its workspace.
    ///
    /// `builtin` decides whether the embedded assets take part.
    #[must_use]
    pub fn from_matcher(matcher: &FileMatcher, builtin: bool) -> Self {
        let files = discover_locale_files(matcher);
        tracing::debug!(
            root = %matcher.workspace_root().display(),
            count = files.len(),
            "Discovered locale files"
        );

        let loader = if builtin { Self::new() } else { Self::new().without_builtin() };
        loader.with_discovered(files)
    }

    /// Locales this loader can build, including the source language.
    #[must_use]
    pub fn available(&self) -> BTreeSet<LocaleId> {
        let mut locales: BTreeSet<LocaleId> = self.files.keys().cloned().collect();
        if self.builtin {
            locales.extend(builtin::builtin_locales());
        }
        locales.extend(LocaleId::parse(SOURCE_LOCALE).ok());
        locales
    }

    /// Files registered for `locale`.
    #[must_use]
    pub fn files(&self, locale: &LocaleId) -> &[PathBuf] {
        self.files.get(locale).map(Vec::as_slice).unwrap_or_default()
    }

    /// Builds the table for `locale`.
    ///
    /// # Errors
    /// - `NotFound` when no asset exists and the locale is not the source
    ///   language
    /// - Any read or parse failure of a contributing asset
    pub fn load(&self, locale: &LocaleId) -> Result<LocaleTable, LocaleError> {
        let mut table = LocaleTable::new(locale.clone());
        let mut found = false;

        if self.builtin
            && let Some(asset) = builtin::builtin_locale(locale)
        {
            table.apply(LocaleFile::parse(asset.text, asset.origin)?);
            found = true;
        }

        for path in self.files(locale) {
            table.apply(LocaleFile::read(path)?);
            found = true;
        }

        if !found {
            if builtin::is_source_language(locale) {
                tracing::debug!(%locale, "Source language locale, keys are used as-is");
                return Ok(table);
            }
            return Err(LocaleError::NotFound(locale.clone()));
        }

        tracing::debug!(
            %locale,
            entries = table.len(),
            pending = table.pending().len(),
            "Loaded locale table"
        );
        Ok(table)
    }
}

/// Loads `locale_id` from the embedded assets.
///
/// # Errors
/// - `InvalidLocaleId` for a malformed identifier
/// - `NotFound` when no table ships for the locale
pub fn load(locale_id: &str) -> Result<LocaleTable, LocaleError> {
    LocaleLoader::new().load(&LocaleId::parse(locale_id)?)
}
