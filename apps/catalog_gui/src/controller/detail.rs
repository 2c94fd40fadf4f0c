//! Script detail panel state and the content model the renderer draws from.

use shared::domain::{ResourceDefaults, ScriptRecord};

use crate::backend_bridge::commands::BackendCommand;

/// Logical window width at or below which the layout switches to compact mode.
pub const COMPACT_WIDTH: f32 = 640.0;

pub const COPY_INSTALL_LABEL: &str = "Copy install command";

/// Shown above every install button.
pub const COPY_HINT: &str = "click to copy";

pub fn is_compact(width: f32) -> bool {
    width <= COMPACT_WIDTH
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailStatus {
    Idle,
    Loading,
    Loaded(Box<ScriptRecord>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallTab {
    #[default]
    Default,
    Alpine,
}

#[derive(Debug, Clone)]
pub struct ScriptDetailState {
    requested: Option<String>,
    status: DetailStatus,
    install_tab: InstallTab,
}

impl Default for ScriptDetailState {
    fn default() -> Self {
        Self {
            requested: None,
            status: DetailStatus::Idle,
            install_tab: InstallTab::Default,
        }
    }
}

impl ScriptDetailState {
    /// Returns the load command, or `None` when `key` is already shown or in flight.
    pub fn open(&mut self, key: &str) -> Option<BackendCommand> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        let already_current = self.requested.as_deref() == Some(key)
            && matches!(self.status, DetailStatus::Loading | DetailStatus::Loaded(_));
        if already_current {
            return None;
        }
        self.requested = Some(key.to_string());
        self.status = DetailStatus::Loading;
        Some(BackendCommand::LoadScript {
            key: key.to_string(),
        })
    }

    /// Responses for anything but the current request are dropped.
    pub fn apply_loaded(&mut self, key: &str, record: ScriptRecord) -> bool {
        if self.requested.as_deref() != Some(key) {
            return false;
        }
        self.status = DetailStatus::Loaded(Box::new(record));
        self.install_tab = InstallTab::Default;
        true
    }

    pub fn apply_failed(&mut self, key: &str, message: impl Into<String>) -> bool {
        if self.requested.as_deref() != Some(key) {
            return false;
        }
        self.status = DetailStatus::Failed(message.into());
        true
    }

    pub fn close(&mut self) {
        self.requested = None;
        self.status = DetailStatus::Idle;
        self.install_tab = InstallTab::Default;
    }

    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    pub fn status(&self) -> &DetailStatus {
        &self.status
    }

    pub fn record(&self) -> Option<&ScriptRecord> {
        match &self.status {
            DetailStatus::Loaded(record) => Some(record.as_ref()),
            _ => None,
        }
    }

    pub fn install_tab(&self) -> InstallTab {
        self.install_tab
    }

    pub fn set_install_tab(&mut self, tab: InstallTab) {
        self.install_tab = tab;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    /// Backtick-quoted span, rendered as a copy button.
    Code(String),
}

/// Splits on backtick pairs. An unpaired backtick stays in the surrounding text.
pub fn segment_text(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut push = |segment: Segment| {
        let empty = match &segment {
            Segment::Text(s) | Segment::Code(s) => s.is_empty(),
        };
        if !empty {
            segments.push(segment);
        }
    };

    let mut rest = text;
    loop {
        let Some(open) = rest.find('`') else {
            push(Segment::Text(rest.to_string()));
            break;
        };
        let after_open = &rest[open + 1..];
        let Some(len) = after_open.find('`') else {
            push(Segment::Text(rest.to_string()));
            break;
        };
        push(Segment::Text(rest[..open].to_string()));
        push(Segment::Code(after_open[..len].to_string()));
        rest = &after_open[len + 1..];
    }
    segments
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    Command,
    Port,
    InstallCommand,
    Link,
}

impl CopyKind {
    pub fn label(self) -> &'static str {
        match self {
            CopyKind::Command => "command",
            CopyKind::Port => "port",
            CopyKind::InstallCommand => "install command",
            CopyKind::Link => "link",
        }
    }

    pub fn toast(self) -> String {
        format!("Copied {} to clipboard", self.label())
    }
}

pub fn install_button_label(command: &str, compact: bool) -> String {
    if compact || command.is_empty() {
        COPY_INSTALL_LABEL.to_string()
    } else {
        command.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    pub label: &'static str,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTabContent {
    pub lines: Vec<String>,
    pub command: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSection {
    pub heading: String,
    pub default_tab: InstallTabContent,
    pub alpine_tab: Option<InstallTabContent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptDetailView {
    pub title: String,
    pub logo: String,
    pub date_added: Option<String>,
    pub default_resources: Option<ResourceDefaults>,
    pub alpine_resources: Option<ResourceDefaults>,
    pub port: Option<u32>,
    pub links: Vec<ExternalLink>,
    pub description: Vec<Segment>,
    pub alerts: Vec<Vec<Segment>>,
    pub install: InstallSection,
}

impl ScriptDetailView {
    /// Port and external links. Compact layouts leave both out.
    pub fn quick_facts(&self, compact: bool) -> (Option<u32>, &[ExternalLink]) {
        if compact {
            (None, &[])
        } else {
            (self.port, &self.links)
        }
    }
}

pub fn describe(record: &ScriptRecord) -> ScriptDetailView {
    let links = [
        ("Website", &record.website),
        ("Documentation", &record.documentation),
        ("Post Install", &record.post_install),
    ]
    .into_iter()
    .filter(|(_, url)| !url.is_empty())
    .map(|(label, url)| ExternalLink {
        label,
        url: url.clone(),
    })
    .collect();

    ScriptDetailView {
        title: record.title.clone(),
        logo: record.logo.clone(),
        date_added: record
            .date_added()
            .map(|date| date.format("%Y-%m-%d").to_string()),
        default_resources: record.default_resources(),
        alpine_resources: record.alpine_resources(),
        port: (record.port != 0).then_some(record.port),
        links,
        description: segment_text(&record.description),
        alerts: record.alerts().into_iter().map(segment_text).collect(),
        install: install_section(record),
    }
}

fn install_section(record: &ScriptRecord) -> InstallSection {
    let title = &record.title;
    let kind = record.item_type.label();

    let mut default_lines = Vec::new();
    if !record.item_type.is_empty() {
        default_lines.push(format!(
            "To create a new Proxmox VE {title} {kind}, run the command below in the Proxmox VE Shell."
        ));
        if record.is_updateable {
            default_lines.push(format!(
                "To Update {title}, run the command below (or type update) in the LXC Console."
            ));
        }
    }

    let alpine_tab = record.has_alpine_script.then(|| InstallTabContent {
        lines: vec![
            format!(
                "As an alternative option, you can use Alpine Linux and the {title} package to create a {title} {kind} container with faster creation time and minimal system resource usage."
            ),
            format!(
                "To create a new Proxmox VE Alpine-{title} {kind}, run the command below in the Proxmox VE Shell"
            ),
        ],
        command: record.alpine_script.clone(),
    });

    InstallSection {
        heading: format!("How to {}", record.install_verb()),
        default_tab: InstallTabContent {
            lines: default_lines,
            command: record.install_command.clone(),
        },
        alpine_tab,
    }
}

#[cfg(test)]
#[path = "tests/detail_tests.rs"]
mod tests;
