//! Plain-text and JSON views of catalog data for the terminal.

use serde::Serialize;
use shared::domain::{Category, ResourceDefaults, ScriptRecord};

/// Compact summary used by the listing subcommands' `--json` output.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ScriptSummary<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub item_type: String,
    pub category: Option<&'a str>,
    pub date_added: Option<String>,
}

pub fn summarize<'a>(script: &'a ScriptRecord, category: Option<&'a str>) -> ScriptSummary<'a> {
    ScriptSummary {
        id: script.id.as_str(),
        title: &script.title,
        item_type: script.item_type.label().to_string(),
        category,
        date_added: script
            .date_added()
            .map(|date| date.format("%Y-%m-%d").to_string()),
    }
}

fn badge(script: &ScriptRecord) -> String {
    let label = script.item_type.label();
    match (script.item_type.shows_badge(), label.is_empty()) {
        (true, false) => format!(" [{label}]"),
        _ => String::new(),
    }
}

fn star(script: &ScriptRecord) -> &'static str {
    if script.is_most_viewed {
        " ★"
    } else {
        ""
    }
}

pub fn script_line(script: &ScriptRecord) -> String {
    format!("{}{}{}", script.title, badge(script), star(script))
}

/// `name (count)` headers, each followed by indented script lines.
/// The count is the category's full size, even when `scripts` is a filtered subset.
pub fn category_listing(entries: &[(&Category, Vec<&ScriptRecord>)]) -> String {
    let mut out = String::new();
    for (category, scripts) in entries {
        out.push_str(&format!("{} ({})\n", category.name, category.items().len()));
        for script in scripts {
            out.push_str(&format!("  {}\n", script_line(script)));
        }
    }
    out
}

fn resources(out: &mut String, heading: &str, resources: &ResourceDefaults) {
    out.push_str(&format!(
        "{heading}: CPU {} | RAM {} | HDD {}\n",
        resources.cpu, resources.ram, resources.hdd
    ));
}

pub fn script_detail(script: &ScriptRecord) -> String {
    let mut out = format!("{}\n", script_line(script));
    if let Some(date) = script.date_added() {
        out.push_str(&format!("Date added: {}\n", date.format("%Y-%m-%d")));
    }
    if let Some(defaults) = script.default_resources() {
        resources(&mut out, "Default settings", &defaults);
    }
    if let Some(alpine) = script.alpine_resources() {
        resources(&mut out, "Default Alpine settings", &alpine);
    }
    if script.port != 0 {
        out.push_str(&format!("Default Port: {}\n", script.port));
    }
    for (label, url) in [
        ("Website", &script.website),
        ("Documentation", &script.documentation),
        ("Post Install", &script.post_install),
    ] {
        if !url.is_empty() {
            out.push_str(&format!("{label}: {url}\n"));
        }
    }
    if !script.description.is_empty() {
        out.push_str(&format!("\n{}\n", script.description));
    }
    for alert in script.alerts() {
        out.push_str(&format!("! {alert}\n"));
    }

    out.push_str(&format!("\nHow to {}\n", script.install_verb()));
    if !script.install_command.is_empty() {
        out.push_str(&format!("  {}\n", script.install_command));
    }
    if script.has_alpine_script && !script.alpine_script.is_empty() {
        out.push_str(&format!("Alpine:\n  {}\n", script.alpine_script));
    }
    out
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
