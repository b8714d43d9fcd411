//! Version fields inside the config document.
//!
//! Uses `toml_edit` so that only the version values change; comments, key
//! order and whitespace in the rest of the document are left as they were.

use toml_edit::{value, DocumentMut, Item};

/// Dotted paths of the version fields kept in sync with the release
pub const VERSION_FIELDS: [&[&str]; 2] = [&["project", "version"], &["tool", "poetry", "version"]];

/// Sets every present version field in `doc` to `version`.
///
/// Each field is handled independently; a missing table or key is skipped.
/// The value's surrounding whitespace and trailing comment are kept.
///
/// # Returns
/// The dotted names of the fields that were found and set.
pub fn set_version_fields(doc: &mut DocumentMut, version: &str) -> Vec<String> {
    let mut updated = Vec::new();

    for field in VERSION_FIELDS {
        if let Some(item) = lookup_mut(doc.as_item_mut(), field) {
            replace_keeping_decor(item, version);
            updated.push(field.join("."));
        }
    }

    updated
}

fn lookup_mut<'a>(root: &'a mut Item, path: &[&str]) -> Option<&'a mut Item> {
    let mut item = root;
    for key in path {
        item = item.as_table_like_mut()?.get_mut(key)?;
    }
    item.is_value().then_some(item)
}

fn replace_keeping_decor(item: &mut Item, version: &str) {
    let decor = item.as_value().map(|v| v.decor().clone());
    *item = value(version);
    if let (Some(decor), Some(new)) = (decor, item.as_value_mut()) {
        *new.decor_mut() = decor;
    }
}
