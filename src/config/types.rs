use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale_id::LocaleId;

/// One invalid settings field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "localeFiles.includePatterns[0]")
    pub field_path: String,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    /// Error for `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Failure to load workspace settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings parsed but are invalid.
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The settings file could not be read.
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The settings file is not valid JSON.
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// One numbered line per error.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Workspace settings read from `.board-locale.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleSettings {
    /// Locale used when the requested one has no table, and as the second
    /// lookup step for every translator.
    pub default_locale: String,

    /// Whether the tables compiled into the binary take part in loading.
    pub builtin_locales: bool,

    /// Which files hold translations.
    pub locale_files: LocaleFilesConfig,

    /// Paths never walked, whatever the locale file patterns say.
    pub exclude_patterns: Vec<String>,
}

/// Locale file patterns, relative to the workspace root.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleFilesConfig {
    /// Globs a locale file must match.
    pub include_patterns: Vec<String>,
    /// Globs excluded even when included.
    pub exclude_patterns: Vec<String>,
}

impl LocaleSettings {
    /// Parsed `defaultLocale`.
    ///
    /// # Errors
    /// - `defaultLocale` is not a locale identifier
    pub fn default_locale_id(&self) -> Result<LocaleId, ValidationError> {
        LocaleId::parse(&self.default_locale)
            .map_err(|e| ValidationError::new("defaultLocale", e.to_string()))
    }

    /// # Errors
    /// - Invalid default locale
    /// - Required pattern list is empty
    /// - Invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.default_locale_id() {
            errors.push(ValidationError::new(
                e.field_path,
                format!("{}. Example: \"pl_PL\"", e.message),
            ));
        }

        if self.locale_files.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "localeFiles.includePatterns",
                "At least one pattern is required. Example: [\"**/locales/*/translations.json\"]",
            ));
        }

        validate_globs(&mut errors, "localeFiles.includePatterns", &self.locale_files.include_patterns);
        validate_globs(&mut errors, "localeFiles.excludePatterns", &self.locale_files.exclude_patterns);
        validate_globs(&mut errors, "excludePatterns", &self.exclude_patterns);

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Pushes an error for each pattern globset rejects.
fn validate_globs(errors: &mut Vec<ValidationError>, field: &str, patterns: &[String]) {
    for (index, pattern) in patterns.iter().enumerate() {
        if let Err(e) = globset::Glob::new(pattern) {
            errors.push(ValidationError::new(
                format!("{field}[{index}]"),
                format!("Invalid glob pattern '{pattern}': {e}"),
            ));
        }
    }
}

impl Default for LocaleFilesConfig {
    fn default() -> Self {
        Self {
            include_patterns: vec!["**/locales/*/translations.{json,jsonc}".to_string()],
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            default_locale: "en_US".to_string(),
            builtin_locales: true,
            locale_files: LocaleFilesConfig::default(),
            exclude_patterns: vec!["target/**".to_string(), "node_modules/**".to_string()],
        }
    }
}
