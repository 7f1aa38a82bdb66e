//! Suggestion filtering.

use crate::catalog::Catalog;
use crate::selection::Selection;

/// Case-insensitive substring match, an empty query matches everything
pub fn matches(item: &str, query: &str) -> bool {
    query.is_empty() || item.to_lowercase().contains(&query.to_lowercase())
}

/// Catalog items that are not selected yet and contain the query, in catalog order
///
/// This is a pure function: the same inputs always give the same output.
pub fn filter(catalog: &Catalog, selection: &Selection, query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    let res: Vec<String> = catalog
        .names()
        .filter(|item| !selection.contains(item))
        .filter(|item| query.is_empty() || item.to_lowercase().contains(&query))
        .map(str::to_owned)
        .collect();
    trace!("filter {query:?}: {}/{} suggestions", res.len(), catalog.len());
    res
}
