//! Left panel: search box, category accordion and script rows.

use eframe::egui;

use crate::controller::browser::{ScriptBrowserState, SearchHint};
use crate::ui::widgets::{self, LogoCache, LOGO_SIZE};

pub const SEARCH_PLACEHOLDER: &str = "Type '/' to search";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserAction {
    Search(String),
    ClearSearch,
    ToggleCategory(String),
    OpenScript(String),
    ToggleLogos,
}

struct ScriptRow {
    title: String,
    logo: String,
    selected: bool,
    most_viewed: bool,
    item_type: shared::domain::ItemType,
}

struct CategoryRow {
    name: String,
    count: usize,
    expanded: bool,
    scripts: Vec<ScriptRow>,
}

fn snapshot(state: &ScriptBrowserState) -> Vec<CategoryRow> {
    state
        .filtered()
        .into_iter()
        .map(|entry| {
            let name = entry.category.name.clone();
            CategoryRow {
                expanded: state.is_expanded(&name),
                count: entry.category.items().len(),
                scripts: entry
                    .scripts
                    .iter()
                    .map(|script| ScriptRow {
                        title: script.title.clone(),
                        logo: script.logo.clone(),
                        selected: state.is_selected(&script.title),
                        most_viewed: script.is_most_viewed,
                        item_type: script.item_type.clone(),
                    })
                    .collect(),
                name,
            }
        })
        .collect()
}

pub fn show_browser_panel(
    ui: &mut egui::Ui,
    state: &ScriptBrowserState,
    search_input: &mut String,
    focus_search: bool,
    logos: &mut LogoCache,
) -> Vec<BrowserAction> {
    let mut actions = Vec::new();

    ui.heading("Categories");
    ui.label(
        egui::RichText::new(format!("{} Total scripts", state.total_scripts())).weak(),
    );
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        let clear_width = if search_input.is_empty() { 0.0 } else { 24.0 };
        let response = ui.add(
            egui::TextEdit::singleline(search_input)
                .id_salt("script_search")
                .hint_text(SEARCH_PLACEHOLDER)
                .desired_width(ui.available_width() - clear_width),
        );
        if focus_search {
            response.request_focus();
        }
        if response.changed() {
            actions.push(BrowserAction::Search(search_input.clone()));
        }
        if !search_input.is_empty() && ui.small_button("✕").clicked() {
            actions.push(BrowserAction::ClearSearch);
        }
    });

    match state.search_hint() {
        SearchHint::ClearWithEscape => {
            ui.label(egui::RichText::new(SearchHint::ClearWithEscape.label()).small().weak());
        }
        hint => {
            if ui.small_button(hint.label()).clicked() {
                actions.push(BrowserAction::ToggleLogos);
            }
        }
    }
    ui.separator();

    if !state.is_loaded() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading catalog...");
        });
        return actions;
    }

    let rows = snapshot(state);
    if rows.is_empty() {
        ui.label(egui::RichText::new("No scripts match your search.").weak());
        return actions;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for row in &rows {
                let arrow = if row.expanded { "▼" } else { "▶" };
                ui.horizontal(|ui| {
                    let header = ui.selectable_label(
                        row.expanded,
                        egui::RichText::new(format!("{arrow} {}", row.name)).strong(),
                    );
                    if header.clicked() {
                        actions.push(BrowserAction::ToggleCategory(row.name.clone()));
                    }
                    widgets::count_badge(ui, row.count);
                });
                if !row.expanded {
                    continue;
                }
                ui.indent(("category", row.name.as_str()), |ui| {
                    for script in &row.scripts {
                        show_script_row(ui, script, state.show_logos(), logos, &mut actions);
                    }
                });
            }
        });

    actions
}

fn show_script_row(
    ui: &mut egui::Ui,
    script: &ScriptRow,
    show_logos: bool,
    logos: &mut LogoCache,
    actions: &mut Vec<BrowserAction>,
) {
    ui.horizontal(|ui| {
        if show_logos {
            match logos.texture(&script.logo) {
                Some(texture) => widgets::logo_image(ui, &texture, LOGO_SIZE),
                None => {
                    ui.add_space(LOGO_SIZE + ui.spacing().item_spacing.x);
                }
            }
        }
        if ui
            .selectable_label(script.selected, script.title.as_str())
            .clicked()
        {
            actions.push(BrowserAction::OpenScript(script.title.clone()));
        }
        if script.most_viewed {
            ui.label(egui::RichText::new("★").color(egui::Color32::GOLD))
                .on_hover_text("Most viewed");
        }
        widgets::item_type_badge(ui, &script.item_type);
    });
}

#[cfg(test)]
#[path = "tests/browser_tests.rs"]
mod tests;
