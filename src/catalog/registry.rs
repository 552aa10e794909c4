//! Process-wide cache of loaded locale tables.

use std::collections::HashMap;
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
};

use super::LocaleError;
use super::loader::LocaleLoader;
use super::table::LocaleTable;
use crate::locale_id::LocaleId;
use crate::translator::Translator;

/// Load-on-first-use cache of locale tables.
///
/// Each locale is built at most once, even under concurrent first access:
/// a miss on the shared read path is re-checked under the write lock before
/// the table is built.
#[derive(Debug)]
pub struct LocaleRegistry {
    /// Source of tables on a cache miss.
    loader: LocaleLoader,
    /// Locale consulted after the requested one.
    default_locale: LocaleId,
    /// Tables built so far.
    tables: RwLock<HashMap<LocaleId, Arc<LocaleTable>>>,
}

impl LocaleRegistry {
    /// Empty registry over `loader`.
    #[must_use]
    pub fn new(loader: LocaleLoader, default_locale: LocaleId) -> Self {
        Self { loader, default_locale, tables: RwLock::new(HashMap::new()) }
    }

    /// Locale every translator falls back to.
    #[must_use]
    pub const fn default_locale(&self) -> &LocaleId {
        &self.default_locale
    }

    /// Loader used on cache misses.
    #[must_use]
    pub const fn loader(&self) -> &LocaleLoader {
        &self.loader
    }

    /// Returns the table for `locale`, building it on first use.
    ///
    /// Failed loads are not cached, so a later call retries.
    pub fn get(&self, locale: &LocaleId) -> Result<Arc<LocaleTable>, LocaleError> {
        if let Some(table) = self.tables.read().unwrap_or_else(PoisonError::into_inner).get(locale) {
            return Ok(Arc::clone(table));
        }

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = tables.get(locale) {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(self.loader.load(locale)?);
        tables.insert(locale.clone(), Arc::clone(&table));
        drop(tables);

        tracing::debug!(%locale, "Cached locale table");
        Ok(table)
    }

    /// Translator for `locale`, falling back to the default locale.
    ///
    /// An unknown locale is not an error here: it is logged and the default
    /// locale's translator is returned instead. Likewise a default locale
    /// that cannot be loaded only drops the fallback.
    ///
    /// # Errors
    /// - Neither the requested nor the default locale can be loaded
    /// - The requested locale exists but its data is broken
    pub fn translator(&self, locale: &LocaleId) -> Result<Translator, LocaleError> {
        let fallback = self.get(&self.default_locale);
        if *locale == self.default_locale {
            return fallback.map(Translator::new);
        }

        match (self.get(locale), fallback) {
            (Ok(table), Ok(fallback)) => Ok(Translator::new(table).with_fallback(fallback)),
            (Ok(table), Err(e)) => {
                tracing::warn!(
                    %locale,
                    default = %self.default_locale,
                    error = %e,
                    "Default locale unavailable, translating without fallback"
                );
                Ok(Translator::new(table))
            }
            (Err(LocaleError::NotFound(missing)), Ok(fallback)) => {
                tracing::warn!(
                    locale = %missing,
                    default = %self.default_locale,
                    "Locale not found, using default locale"
                );
                Ok(Translator::new(fallback))
            }
            (Err(LocaleError::NotFound(_)), Err(e)) | (Err(e), _) => Err(e),
        }
    }

    /// Locales currently cached, sorted.
    #[must_use]
    pub fn loaded(&self) -> Vec<LocaleId> {
        let mut locales: Vec<_> =
            self.tables.read().unwrap_or_else(PoisonError::into_inner).keys().cloned().collect();
        locales.sort();
        locales
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::thread;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::format::Arg;
    use crate::test_utils::write_locale_file;

    fn locale(id: &str) -> LocaleId {
        LocaleId::parse(id).unwrap()
    }

    #[fixture]
    fn registry() -> LocaleRegistry {
        LocaleRegistry::new(LocaleLoader::new(), locale("en_US"))
    }

    #[rstest]
    fn get_caches_tables(registry: LocaleRegistry) {
        let first = registry.get(&locale("pl_PL")).unwrap();
        let second = registry.get(&locale("pl_PL")).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.loaded(), vec![locale("pl_PL")]);
    }

    #[rstest]
    fn concurrent_first_access_builds_once(registry: LocaleRegistry) {
        let pl = locale("pl_PL");

        let tables: Vec<Arc<LocaleTable>> = thread::scope(|scope| {
            let handles: Vec<_> =
                (0..8).map(|_| scope.spawn(|| registry.get(&pl).unwrap())).collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).collect()
        });

        for table in &tables {
            assert!(Arc::ptr_eq(table, &tables[0]));
        }
    }

    #[rstest]
    fn missing_locale_is_not_cached(registry: LocaleRegistry) {
        assert!(matches!(registry.get(&locale("fr_FR")), Err(LocaleError::NotFound(_))));
        assert!(registry.loaded().is_empty());
    }

    #[rstest]
    fn translator_for_missing_locale_uses_default(registry: LocaleRegistry) {
        let translator = registry.translator(&locale("fr_FR")).unwrap();

        assert_eq!(translator.locale().as_str(), "en_US");
        assert_eq!(translator.translate("Save", &[]), "Save");
    }

    #[rstest]
    fn translator_chains_default_locale() {
        let temp_dir = TempDir::new().unwrap();
        let german = write_locale_file(
            temp_dir.path(),
            "locales/de_DE/translations.json",
            r#"{"Save": "Speichern", "Search": "Suchen"}"#,
        );
        let loader = LocaleLoader::new().with_file(locale("de_DE"), german);
        let registry = LocaleRegistry::new(loader, locale("de_DE"));

        let translator = registry.translator(&locale("pl_PL")).unwrap();

        assert_eq!(translator.translate("Save", &[]), "Zapisz");
        assert_eq!(translator.translate("Column %d", &[Arg::from(2)]), "Kolumna 2");
        assert_eq!(translator.translate("Search", &[]), "Suchen");
        assert_eq!(
            translator.translate("Do you really want to remove this task: \"%s\"?", &[Arg::from("Fix")]),
            "Do you really want to remove this task: \"Fix\"?"
        );
        assert_that!(registry.loaded(), elements_are![eq(&locale("de_DE")), eq(&locale("pl_PL"))]);
    }

    #[rstest]
    fn translator_without_default_keeps_requested_locale() {
        let registry = LocaleRegistry::new(LocaleLoader::new(), locale("fr_FR"));

        let translator = registry.translator(&locale("pl_PL")).unwrap();

        assert_eq!(translator.locale().as_str(), "pl_PL");
        assert_eq!(translator.translate("Save", &[]), "Zapisz");
        assert_eq!(translator.translate("Unknown phrase", &[]), "Unknown phrase");
        assert_eq!(registry.loaded(), vec![locale("pl_PL")]);
    }

    #[rstest]
    #[case::requested_missing("de_DE")]
    #[case::requested_is_default("fr_FR")]
    fn translator_fails_when_nothing_loads(#[case] requested: &str) {
        let registry = LocaleRegistry::new(LocaleLoader::new(), locale("fr_FR"));

        let result = registry.translator(&locale(requested));

        assert!(matches!(result, Err(LocaleError::NotFound(missing)) if missing == locale("fr_FR")));
    }
}
