//! Locale file discovery in a workspace.

use std::path::PathBuf;

use ignore::WalkBuilder;

use crate::config::FileMatcher;
use crate::locale_id::LocaleId;

/// A locale file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredLocaleFile {
    /// Locale named by the file's path.
    pub locale: LocaleId,
    /// Absolute path of the file.
    pub path: PathBuf,
}

/// Walks the matcher's workspace root and returns every locale file, sorted
/// by path.
///
/// `.gitignore` rules are honored. Matching files whose path names no
/// locale are skipped.
#[must_use]
pub fn discover_locale_files(matcher: &FileMatcher) -> Vec<DiscoveredLocaleFile> {
    let workspace_root = matcher.workspace_root();
    let mut found = Vec::new();

    for result in WalkBuilder::new(workspace_root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(workspace_root) else {
            continue;
        };
        if !matcher.is_locale_file_relative(relative_path) {
            continue;
        }

        let Some(locale) = LocaleId::from_path(relative_path) else {
            tracing::debug!(path = %path.display(), "No locale in path, skipping");
            continue;
        };

        found.push(DiscoveredLocaleFile { locale, path: path.to_path_buf() });
    }

    found.sort_by(|a, b| a.path.cmp(&b.path));
    found
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::config::{
        LocaleFilesConfig,
        LocaleSettings,
    };
    use crate::test_utils::write_locale_file;

    fn relative(temp_dir: &TempDir, files: &[DiscoveredLocaleFile]) -> Vec<(String, String)> {
        files
            .iter()
            .map(|file| {
                let path = file.path.strip_prefix(temp_dir.path()).unwrap();
                (file.locale.to_string(), path.to_string_lossy().replace('\\', "/"))
            })
            .collect()
    }

    #[rstest]
    fn discovers_matching_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        write_locale_file(temp_dir.path(), "plugins/gantt/locales/pl_PL/translations.json", "{}");
        write_locale_file(temp_dir.path(), "locales/pl_PL/translations.jsonc", "{}");
        write_locale_file(temp_dir.path(), "locales/de_DE/translations.json", "{}");
        write_locale_file(temp_dir.path(), "locales/de_DE/readme.json", "{}");
        write_locale_file(temp_dir.path(), "target/locales/fr_FR/translations.json", "{}");

        let matcher =
            FileMatcher::new(temp_dir.path().to_path_buf(), &LocaleSettings::default()).unwrap();
        let files = discover_locale_files(&matcher);

        assert_eq!(
            relative(&temp_dir, &files),
            vec![
                ("de_DE".to_string(), "locales/de_DE/translations.json".to_string()),
                ("pl_PL".to_string(), "locales/pl_PL/translations.jsonc".to_string()),
                ("pl_PL".to_string(), "plugins/gantt/locales/pl_PL/translations.json".to_string()),
            ]
        );
    }

    #[rstest]
    fn skips_files_without_locale() {
        let temp_dir = TempDir::new().unwrap();
        write_locale_file(temp_dir.path(), "i18n/polish.json", "{}");
        write_locale_file(temp_dir.path(), "i18n/pl.json", "{}");

        let settings = LocaleSettings {
            locale_files: LocaleFilesConfig {
                include_patterns: vec!["i18n/*.json".to_string()],
                exclude_patterns: vec![],
            },
            ..LocaleSettings::default()
        };
        let matcher = FileMatcher::new(temp_dir.path().to_path_buf(), &settings).unwrap();
        let files = discover_locale_files(&matcher);

        assert_that!(files, len(eq(1)));
        assert_eq!(relative(&temp_dir, &files), vec![("pl".to_string(), "i18n/pl.json".to_string())]);
    }

    #[rstest]
    fn file_named_like_a_code_stays_with_its_directory() {
        let temp_dir = TempDir::new().unwrap();
        write_locale_file(temp_dir.path(), "locales/pl_PL/app.json", "{}");
        write_locale_file(temp_dir.path(), "locales/pl_PL/ui.jsonc", "{}");

        let settings = LocaleSettings {
            locale_files: LocaleFilesConfig {
                include_patterns: vec!["locales/*/*.{json,jsonc}".to_string()],
                exclude_patterns: vec![],
            },
            ..LocaleSettings::default()
        };
        let matcher = FileMatcher::new(temp_dir.path().to_path_buf(), &settings).unwrap();

        assert_eq!(
            relative(&temp_dir, &discover_locale_files(&matcher)),
            vec![
                ("pl_PL".to_string(), "locales/pl_PL/app.json".to_string()),
                ("pl_PL".to_string(), "locales/pl_PL/ui.jsonc".to_string()),
            ]
        );
    }

    #[rstest]
    fn empty_workspace_finds_nothing() {
        let temp_dir = TempDir::new().unwrap();

        let matcher =
            FileMatcher::new(temp_dir.path().to_path_buf(), &LocaleSettings::default()).unwrap();

        assert!(discover_locale_files(&matcher).is_empty());
    }
}
