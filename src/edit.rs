//! Format-preserving edits of locale file text.
//!
//! Comments, ordering and indentation of untouched entries are kept, so
//! translators can review the result as a small diff.

use jsonc_parser::ParseOptions;
use jsonc_parser::cst::{
    CstInputValue,
    CstRootNode,
};
use thiserror::Error;

use crate::input::locale_file::lines_with_pending_keys;

/// Failure to edit locale file text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    /// The text is not JSON with comments.
    #[error("Failed to parse locale file: {0}")]
    Parse(String),

    /// The root value is an array, string or other non-object.
    #[error("Locale file root is not an object")]
    NotAnObject,
}

/// Sets the translation of `key`, appending it when absent.
///
/// A commented-out line for the same key is dropped, so the key moves from
/// pending to translated.
///
/// # Errors
/// - The text is not valid JSON with comments
/// - The root value is not an object
pub fn set_entry(text: &str, key: &str, value: &str) -> Result<String, EditError> {
    let text = strip_pending_line(text, key);
    let root = parse(&text)?;
    let object = root.object_value().ok_or(EditError::NotAnObject)?;

    if let Some(prop) = object.get(key) {
        prop.set_value(CstInputValue::String(value.to_string()));
    } else {
        object.append(key, CstInputValue::String(value.to_string()));
    }

    tracing::debug!(key, "Set locale entry");
    Ok(root.to_string())
}

/// Removes the entry for `key`.
///
/// Returns `None` when the key has no active entry.
///
/// # Errors
/// - The text is not valid JSON with comments
/// - The root value is not an object
pub fn remove_entry(text: &str, key: &str) -> Result<Option<String>, EditError> {
    let root = parse(text)?;
    let object = root.object_value().ok_or(EditError::NotAnObject)?;

    let Some(prop) = object.get(key) else {
        return Ok(None);
    };
    prop.remove();

    tracing::debug!(key, "Removed locale entry");
    Ok(Some(root.to_string()))
}

/// Parses `text` into an editable syntax tree.
fn parse(text: &str) -> Result<CstRootNode, EditError> {
    CstRootNode::parse(text, &ParseOptions::default()).map_err(|e| EditError::Parse(e.to_string()))
}

/// Drops the `//` line commenting out `key`, if any.
fn strip_pending_line(text: &str, key: &str) -> String {
    lines_with_pending_keys(text)
        .into_iter()
        .filter(|(_, pending)| pending.as_deref() != Some(key))
        .map(|(line, _)| line)
        .collect()
}
