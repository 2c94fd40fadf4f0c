//! Script browser state: search term, accordion expansion, selection highlight
//! and the logo display preference.

use client_core::catalog;
use shared::domain::{title_contains, Category, ScriptRecord};

/// Storage key for the logo preference; the value is a JSON boolean.
pub const SHOW_LOGOS_STORAGE_KEY: &str = "showLogos";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccordionMode {
    /// At most one category open; clicking the open one collapses it.
    Single,
    /// Any number of categories open. Used while a search is active.
    Multiple,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Exactly one script matches; the caller should navigate to it.
    AutoSelected(String),
    NoUniqueMatch,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchHint {
    ClearWithEscape,
    HideLogos,
    ShowLogos,
}

impl SearchHint {
    pub fn label(self) -> &'static str {
        match self {
            SearchHint::ClearWithEscape => "Press 'Esc' to clear the search",
            SearchHint::HideLogos => "Hide Logos",
            SearchHint::ShowLogos => "Show Logos",
        }
    }
}

#[derive(Debug)]
pub struct FilteredCategory<'a> {
    pub category: &'a Category,
    pub scripts: Vec<&'a ScriptRecord>,
}

#[derive(Debug, Clone)]
pub struct ScriptBrowserState {
    categories: Vec<Category>,
    loaded: bool,
    search_term: String,
    expanded: Vec<String>,
    selected: Option<String>,
    show_logos: bool,
}

impl ScriptBrowserState {
    pub fn new(show_logos: bool) -> Self {
        Self {
            categories: Vec::new(),
            loaded: false,
            search_term: String::new(),
            expanded: Vec::new(),
            selected: None,
            show_logos,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn set_catalog(&mut self, categories: Vec<Category>) -> SearchOutcome {
        self.categories = categories;
        self.loaded = true;
        self.refresh_search()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search(&mut self, term: impl Into<String>) -> SearchOutcome {
        let term = term.into();
        if term == self.search_term {
            return SearchOutcome::Unchanged;
        }
        self.search_term = term;
        self.refresh_search()
    }

    pub fn clear_search(&mut self) -> SearchOutcome {
        self.set_search(String::new())
    }

    pub fn is_searching(&self) -> bool {
        !self.search_term.is_empty()
    }

    fn refresh_search(&mut self) -> SearchOutcome {
        let needle = self.search_term.to_lowercase();
        self.expanded = if needle.is_empty() {
            Vec::new()
        } else {
            self.filtered()
                .iter()
                .map(|entry| entry.category.name.clone())
                .collect()
        };

        let unique = {
            // Every listing counts: a script filed under two categories is two matches.
            let mut matching = self
                .categories
                .iter()
                .flat_map(Category::items)
                .filter(|script| title_contains(&script.title, &needle));
            match (matching.next(), matching.next()) {
                (Some(only), None) => Some(only.title.clone()),
                _ => None,
            }
        };
        match unique {
            Some(title) => {
                self.select(&title);
                SearchOutcome::AutoSelected(title)
            }
            None => {
                self.selected = None;
                SearchOutcome::NoUniqueMatch
            }
        }
    }

    /// Categories with at least one matching script, each narrowed to its matches.
    pub fn filtered(&self) -> Vec<FilteredCategory<'_>> {
        let needle = self.search_term.to_lowercase();
        self.categories
            .iter()
            .filter_map(|category| {
                let scripts: Vec<_> = category
                    .items()
                    .iter()
                    .filter(|script| title_contains(&script.title, &needle))
                    .collect();
                (!scripts.is_empty()).then_some(FilteredCategory { category, scripts })
            })
            .collect()
    }

    pub fn accordion_mode(&self) -> AccordionMode {
        if self.is_searching() {
            AccordionMode::Multiple
        } else {
            AccordionMode::Single
        }
    }

    pub fn is_expanded(&self, name: &str) -> bool {
        match self.accordion_mode() {
            AccordionMode::Single => self.expanded.first().is_some_and(|open| open == name),
            AccordionMode::Multiple => self.expanded.iter().any(|open| open == name),
        }
    }

    pub fn toggle_category(&mut self, name: &str) {
        match self.accordion_mode() {
            AccordionMode::Single => {
                if self.is_expanded(name) {
                    self.expanded.clear();
                } else {
                    self.expanded = vec![name.to_string()];
                }
            }
            AccordionMode::Multiple => {
                if let Some(pos) = self.expanded.iter().position(|open| open == name) {
                    self.expanded.remove(pos);
                } else {
                    self.expanded.push(name.to_string());
                }
            }
        }
    }

    /// Highlights `title` and opens the category that lists it. Unknown titles only highlight.
    pub fn select(&mut self, title: &str) {
        self.selected = Some(title.to_string());
        let Some(category) = catalog::category_of(&self.categories, title) else {
            return;
        };
        let name = category.name.clone();
        match self.accordion_mode() {
            AccordionMode::Single => self.expanded = vec![name],
            AccordionMode::Multiple => {
                if !self.expanded.contains(&name) {
                    self.expanded.push(name);
                }
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, title: &str) -> bool {
        self.selected.as_deref() == Some(title)
    }

    pub fn contains_title(&self, title: &str) -> bool {
        catalog::find_script(&self.categories, title).is_some()
    }

    pub fn total_scripts(&self) -> usize {
        catalog::total_scripts(&self.categories)
    }

    pub fn show_logos(&self) -> bool {
        self.show_logos
    }

    pub fn toggle_logos(&mut self) -> bool {
        self.show_logos = !self.show_logos;
        self.show_logos
    }

    pub fn search_hint(&self) -> SearchHint {
        if self.is_searching() {
            SearchHint::ClearWithEscape
        } else if self.show_logos {
            SearchHint::HideLogos
        } else {
            SearchHint::ShowLogos
        }
    }
}

pub fn encode_show_logos(show_logos: bool) -> String {
    serde_json::to_string(&show_logos).unwrap_or_else(|_| "true".to_string())
}

/// Missing or unparseable values mean logos are shown.
pub fn decode_show_logos(stored: Option<&str>) -> bool {
    stored
        .and_then(|raw| serde_json::from_str::<bool>(raw).ok())
        .unwrap_or(true)
}

#[cfg(test)]
#[path = "tests/browser_tests.rs"]
mod tests;
