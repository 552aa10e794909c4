//! Locale loading errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::locale_id::{
    InvalidLocaleId,
    LocaleId,
};

/// Failure to produce a locale table.
///
/// None of these is fatal to a host: `NotFound` in particular is expected
/// to be answered by falling back to the default locale.
#[derive(Error, Debug)]
pub enum LocaleError {
    /// No builtin asset or discovered file for the locale.
    #[error("No translation table found for locale '{0}'")]
    NotFound(LocaleId),

    /// The requested locale id is malformed.
    #[error(transparent)]
    InvalidLocaleId(#[from] InvalidLocaleId),

    /// A discovered file could not be read.
    #[error("Failed to read locale file '{}': {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The text is not JSON with comments.
    #[error("Failed to parse locale data '{origin}': {message}")]
    Parse { origin: String, message: String },

    /// The root value is not an object.
    #[error("Locale data '{origin}' must be a JSON object mapping phrases to translations")]
    NotAnObject { origin: String },

    /// A translation is a number, array or other non-string.
    #[error("Translation of '{key}' in '{origin}' is not a string")]
    NonStringValue { origin: String, key: String },

    /// The same key appears twice in one file.
    #[error("Duplicate key '{key}' in '{origin}'")]
    DuplicateKey { origin: String, key: String },
}
