//! Item file loading shared by the layout commands.
//!
//! Item files are JSONC: either a bare array of items or an object with an
//! `items` array. Ids may be strings or numbers.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{MasonryError, MasonryResult};
use crate::masonry::filter_by_category;
use crate::masonry::state::{Item, validate_items};

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemFile {
    List(Vec<Item>),
    Wrapped { items: Vec<Item> },
}

/// Expands a leading `~` in a user-supplied path.
#[must_use]
pub fn expand_path(raw: &str) -> PathBuf { PathBuf::from(shellexpand::tilde(raw).as_ref()) }

/// Parses items from JSONC text and validates them.
///
/// # Errors
///
/// Returns `MasonryError::ParseError` for malformed input and
/// `MasonryError::InvalidItem` when validation fails.
pub fn parse_items(source: &str) -> MasonryResult<Vec<Item>> {
    let reader = json_comments::StripComments::new(source.as_bytes());
    let items = match serde_json::from_reader(reader)? {
        ItemFile::List(items) | ItemFile::Wrapped { items } => items,
    };
    validate_items(&items)?;
    Ok(items)
}

/// Loads items from a file, optionally narrowed to one category.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_items(raw_path: &str, category: Option<&str>) -> MasonryResult<Vec<Item>> {
    let path = expand_path(raw_path);
    let source = fs::read_to_string(&path).map_err(|err| {
        MasonryError::IoError(format!("cannot read {}: {err}", path.display()))
    })?;

    let items = parse_items(&source)?;
    tracing::debug!(path = %path.display(), count = items.len(), "masonry: loaded items");

    Ok(match category {
        Some(category) => filter_by_category(&items, category),
        None => items,
    })
}
