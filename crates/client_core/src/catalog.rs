//! Helpers over a loaded catalog: counting, flattening, and the "latest" and
//! "most viewed" shortlists shown when no script is selected.

use std::collections::HashSet;

use shared::domain::{Category, ScriptRecord};

pub fn total_scripts(categories: &[Category]) -> usize {
    categories.iter().map(|category| category.items().len()).sum()
}

/// Scripts in catalog order. A script listed under several categories appears once.
pub fn flatten_scripts(categories: &[Category]) -> Vec<&ScriptRecord> {
    let mut seen = HashSet::new();
    categories
        .iter()
        .flat_map(|category| category.items())
        .filter(|script| seen.insert(script.title.as_str()))
        .collect()
}

pub fn find_script<'a>(categories: &'a [Category], title: &str) -> Option<&'a ScriptRecord> {
    categories
        .iter()
        .flat_map(|category| category.items())
        .find(|script| script.title == title)
}

pub fn category_of<'a>(categories: &'a [Category], title: &str) -> Option<&'a Category> {
    categories
        .iter()
        .find(|category| category.contains_title(title))
}

/// Newest first by creation time; scripts without a parseable timestamp sort last.
pub fn latest_scripts(categories: &[Category], limit: usize) -> Vec<&ScriptRecord> {
    let mut scripts = flatten_scripts(categories);
    scripts.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    scripts.truncate(limit);
    scripts
}

pub fn most_viewed_scripts(categories: &[Category]) -> Vec<&ScriptRecord> {
    flatten_scripts(categories)
        .into_iter()
        .filter(|script| script.is_most_viewed)
        .collect()
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
