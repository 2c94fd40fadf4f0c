//! Central panel: the selected script, or the latest additions when nothing is open.

use eframe::egui;

use crate::controller::detail::{
    describe, install_button_label, CopyKind, DetailStatus, InstallTab, InstallTabContent,
    ScriptDetailState, Segment, COPY_HINT,
};
use crate::ui::widgets::{self, LogoCache};
use shared::domain::ResourceDefaults;

const DETAIL_LOGO_SIZE: f32 = 64.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailAction {
    Close,
    Retry,
    OpenScript(String),
    SetInstallTab(InstallTab),
    Copy { kind: CopyKind, value: String },
}

/// One entry of the "Latest scripts" list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestEntry {
    pub title: String,
    pub logo: String,
    pub date_added: Option<String>,
}

pub fn show_detail_panel(
    ui: &mut egui::Ui,
    detail: &ScriptDetailState,
    latest: &[LatestEntry],
    show_logos: bool,
    compact: bool,
    logos: &mut LogoCache,
) -> Vec<DetailAction> {
    let mut actions = Vec::new();
    match detail.status() {
        DetailStatus::Idle => show_latest(ui, latest, show_logos, logos, &mut actions),
        DetailStatus::Loading => {
            panel_header(ui, &mut actions);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Loading {}...", detail.requested().unwrap_or_default()));
            });
        }
        DetailStatus::Failed(message) => {
            panel_header(ui, &mut actions);
            ui.colored_label(ui.visuals().error_fg_color, message);
            if ui.button("Retry").clicked() {
                actions.push(DetailAction::Retry);
            }
        }
        DetailStatus::Loaded(record) => {
            panel_header(ui, &mut actions);
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    show_record(ui, record, detail.install_tab(), compact, logos, &mut actions);
                });
        }
    }
    actions
}

fn panel_header(ui: &mut egui::Ui, actions: &mut Vec<DetailAction>) {
    ui.horizontal(|ui| {
        ui.heading("Selected script");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("✕").on_hover_text("Close").clicked() {
                actions.push(DetailAction::Close);
            }
        });
    });
    ui.add_space(8.0);
}

fn show_latest(
    ui: &mut egui::Ui,
    latest: &[LatestEntry],
    show_logos: bool,
    logos: &mut LogoCache,
    actions: &mut Vec<DetailAction>,
) {
    ui.heading("Latest scripts");
    ui.add_space(8.0);
    if latest.is_empty() {
        ui.label(egui::RichText::new("Select a script to see its details.").weak());
        return;
    }
    for entry in latest {
        ui.horizontal(|ui| {
            if show_logos {
                if let Some(texture) = logos.texture(&entry.logo) {
                    widgets::logo_image(ui, &texture, widgets::LOGO_SIZE * 2.0);
                }
            }
            ui.vertical(|ui| {
                if ui.link(egui::RichText::new(&entry.title).strong()).clicked() {
                    actions.push(DetailAction::OpenScript(entry.title.clone()));
                }
                if let Some(date) = &entry.date_added {
                    ui.label(egui::RichText::new(format!("Date added: {date}")).small().weak());
                }
            });
        });
        ui.add_space(4.0);
    }
}

fn show_record(
    ui: &mut egui::Ui,
    record: &shared::domain::ScriptRecord,
    install_tab: InstallTab,
    compact: bool,
    logos: &mut LogoCache,
    actions: &mut Vec<DetailAction>,
) {
    let view = describe(record);

    ui.horizontal(|ui| {
        if let Some(texture) = logos.texture(&view.logo) {
            widgets::logo_image(ui, &texture, DETAIL_LOGO_SIZE);
        }
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(&view.title).heading().strong());
            if let Some(date) = &view.date_added {
                ui.label(egui::RichText::new(format!("Date added: {date}")).weak());
            }
            ui.horizontal(|ui| {
                if let Some(resources) = &view.default_resources {
                    resource_block(ui, "Default settings", resources);
                }
                if let Some(resources) = &view.alpine_resources {
                    resource_block(ui, "Default Alpine settings", resources);
                }
            });
        });
    });

    let (port, links) = view.quick_facts(compact);
    if let Some(port) = port {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Default Port:").strong());
            if widgets::copy_button(ui, &port.to_string()) {
                actions.push(DetailAction::Copy {
                    kind: CopyKind::Port,
                    value: port.to_string(),
                });
            }
        });
    }
    if !links.is_empty() {
        ui.horizontal_wrapped(|ui| {
            for link in links {
                ui.hyperlink_to(link.label, &link.url);
            }
        });
    }

    ui.separator();
    ui.label(egui::RichText::new("Description").strong());
    segments(ui, &view.description, actions);

    for alert in &view.alerts {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().warn_fg_color.gamma_multiply(0.12))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label("⚠");
                    segments(ui, alert, actions);
                });
            });
    }

    ui.separator();
    ui.label(egui::RichText::new(&view.install.heading).strong());
    let content = match (&view.install.alpine_tab, install_tab) {
        (Some(alpine), InstallTab::Alpine) => alpine,
        _ => &view.install.default_tab,
    };
    if view.install.alpine_tab.is_some() {
        ui.horizontal(|ui| {
            let mut selected = install_tab;
            ui.selectable_value(&mut selected, InstallTab::Default, "Default");
            ui.selectable_value(&mut selected, InstallTab::Alpine, "Alpine Linux");
            if selected != install_tab {
                actions.push(DetailAction::SetInstallTab(selected));
            }
        });
    }
    install_tab_content(ui, content, compact, actions);
}

fn resource_block(ui: &mut egui::Ui, heading: &str, resources: &ResourceDefaults) {
    ui.vertical(|ui| {
        ui.label(egui::RichText::new(heading).strong());
        for (label, value) in [
            ("CPU", &resources.cpu),
            ("RAM", &resources.ram),
            ("HDD", &resources.hdd),
        ] {
            ui.label(egui::RichText::new(format!("{label}: {value}")).small().weak());
        }
    });
}

fn install_tab_content(
    ui: &mut egui::Ui,
    content: &InstallTabContent,
    compact: bool,
    actions: &mut Vec<DetailAction>,
) {
    for line in &content.lines {
        ui.label(line);
    }
    ui.add_space(6.0);
    ui.label(egui::RichText::new(COPY_HINT).small().weak());
    let label = install_button_label(&content.command, compact);
    if widgets::copy_button(ui, &label) {
        actions.push(DetailAction::Copy {
            kind: CopyKind::InstallCommand,
            value: content.command.clone(),
        });
    }
}

fn segments(ui: &mut egui::Ui, parts: &[Segment], actions: &mut Vec<DetailAction>) {
    ui.horizontal_wrapped(|ui| {
        for part in parts {
            match part {
                Segment::Text(text) => {
                    ui.label(text);
                }
                Segment::Code(code) => {
                    if widgets::copy_button(ui, code) {
                        actions.push(DetailAction::Copy {
                            kind: CopyKind::Command,
                            value: code.clone(),
                        });
                    }
                }
            }
        }
    });
}
