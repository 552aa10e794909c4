//! Glob matcher for locale files.

use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::LocaleSettings;

/// A configured glob pattern does not compile.
#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    /// Bad entry in `localeFiles.includePatterns`.
    #[error("Invalid locale file pattern '{pattern}': {source}")]
    InvalidLocaleFilePattern {
        /// Offending pattern.
        pattern: String,
        /// globset's reason.
        #[source]
        source: globset::Error,
    },

    /// Bad entry in `excludePatterns` or `localeFiles.excludePatterns`.
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        /// Offending pattern.
        pattern: String,
        /// globset's reason.
        #[source]
        source: globset::Error,
    },

    /// The compiled patterns could not be combined.
    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches workspace paths against the configured locale file patterns.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    /// Root that relative paths are resolved against.
    workspace_root: PathBuf,
    /// `excludePatterns`.
    exclude_set: GlobSet,
    /// `localeFiles.includePatterns`.
    locale_set: GlobSet,
    /// `localeFiles.excludePatterns`.
    locale_exclude_set: GlobSet,
}

impl FileMatcher {
    /// Compiles the pattern lists of `settings`.
    pub fn new(workspace_root: PathBuf, settings: &LocaleSettings) -> Result<Self, MatcherError> {
        let exclude_set = Self::build_glob_set(&settings.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        let locale_set =
            Self::build_glob_set(&settings.locale_files.include_patterns, |pattern, source| {
                MatcherError::InvalidLocaleFilePattern { pattern, source }
            })?;

        let locale_exclude_set =
            Self::build_glob_set(&settings.locale_files.exclude_patterns, |pattern, source| {
                MatcherError::InvalidExcludePattern { pattern, source }
            })?;

        Ok(Self { workspace_root, exclude_set, locale_set, locale_exclude_set })
    }

    /// Compiles `patterns`, reporting the first bad one through `make_error`.
    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Root the matcher was built for.
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Returns true if the path matches `localeFiles.includePatterns` but
    /// neither `excludePatterns` nor `localeFiles.excludePatterns`.
    #[must_use]
    pub fn is_locale_file_relative(&self, relative_path: &Path) -> bool {
        self.locale_set.is_match(relative_path)
            && !self.exclude_set.is_match(relative_path)
            && !self.locale_exclude_set.is_match(relative_path)
    }
}
