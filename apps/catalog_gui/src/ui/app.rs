//! The eframe application shell: event intake, shortcuts, layout and persistence.

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    browser::{encode_show_logos, ScriptBrowserState, SearchOutcome, SHOW_LOGOS_STORAGE_KEY},
    detail::{is_compact, CopyKind, ScriptDetailState},
    events::{UiError, UiErrorContext, UiEvent},
    location::ScriptLocation,
    orchestration::dispatch_backend_command,
    shortcuts::{take_shortcuts, ShortcutAction},
};
use crate::ui::panels::{
    browser::{show_browser_panel, BrowserAction},
    detail::{show_detail_panel, DetailAction, LatestEntry},
};
use crate::ui::widgets::{write_clipboard_text, LogoCache, Toast};

#[derive(Debug, Clone)]
pub struct StartupOptions {
    pub show_logos: bool,
    /// Deep link or bare script id/title to open on launch.
    pub link: Option<String>,
    pub latest_limit: usize,
    pub backend_label: String,
}

pub struct CatalogGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    browser: ScriptBrowserState,
    detail: ScriptDetailState,
    location: ScriptLocation,
    search_input: String,
    focus_search: bool,
    logos: LogoCache,
    toast: Toast,
    status: String,
    status_banner: Option<String>,
    latest_limit: usize,
    backend_label: String,
}

impl CatalogGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        options: StartupOptions,
    ) -> Self {
        let location = options
            .link
            .as_deref()
            .map(ScriptLocation::parse)
            .unwrap_or_default();
        let mut app = Self {
            cmd_tx,
            ui_rx,
            browser: ScriptBrowserState::new(options.show_logos),
            detail: ScriptDetailState::default(),
            location: ScriptLocation::default(),
            search_input: String::new(),
            focus_search: false,
            logos: LogoCache::default(),
            toast: Toast::default(),
            status: "Loading catalog...".to_string(),
            status_banner: None,
            latest_limit: options.latest_limit,
            backend_label: options.backend_label,
        };
        app.dispatch(BackendCommand::LoadCatalog);
        match location.script().map(str::to_string) {
            Some(key) => {
                app.location = location;
                app.open_script(&key);
            }
            None => app.location = location,
        }
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    pub fn browser(&self) -> &ScriptBrowserState {
        &self.browser
    }

    pub fn detail(&self) -> &ScriptDetailState {
        &self.detail
    }

    pub fn location(&self) -> &ScriptLocation {
        &self.location
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn open_script(&mut self, key: &str) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        if self.browser.contains_title(key) {
            self.browser.select(key);
        }
        self.location = self.location.with_script(key);
        if let Some(cmd) = self.detail.open(key) {
            tracing::info!(script = %key, "opening script");
            self.dispatch(cmd);
        }
    }

    pub fn close_script(&mut self) {
        self.detail.close();
        self.browser.clear_selection();
        self.location = self.location.without_script();
    }

    pub fn set_search(&mut self, term: &str) {
        self.search_input = term.to_string();
        let outcome = self.browser.set_search(term);
        self.apply_search_outcome(outcome);
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        let outcome = self.browser.clear_search();
        self.apply_search_outcome(outcome);
    }

    fn apply_search_outcome(&mut self, outcome: SearchOutcome) {
        if let SearchOutcome::AutoSelected(title) = outcome {
            self.open_script(&title);
        }
    }

    pub fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => self.report_error(&err),
                UiEvent::CatalogLoaded(categories) => {
                    let outcome = self.browser.set_catalog(categories);
                    self.status = format!(
                        "Loaded {} scripts from {}",
                        self.browser.total_scripts(),
                        self.backend_label
                    );
                    self.status_banner = None;
                    if let Some(title) = self.detail.record().map(|record| record.title.clone()) {
                        self.browser.select(&title);
                    }
                    self.apply_search_outcome(outcome);
                }
                UiEvent::ScriptLoaded { key, record } => {
                    let title = record.title.clone();
                    if self.detail.apply_loaded(&key, record) {
                        self.browser.select(&title);
                    } else {
                        tracing::debug!(script = %key, "dropping stale script response");
                    }
                }
                UiEvent::ScriptFailed { key, error } => {
                    if !self.detail.apply_failed(&key, error.display_message()) {
                        tracing::debug!(script = %key, "dropping stale script failure");
                    }
                }
                UiEvent::LogoLoaded { url, image } => {
                    self.logos.insert_loaded(ctx, url, &image);
                }
                UiEvent::LogoFailed { url, reason } => {
                    tracing::debug!(url = %url, "logo unavailable: {reason}");
                    self.logos.mark_failed(url);
                }
            }
        }
    }

    fn report_error(&mut self, err: &UiError) {
        self.status = err.display_message();
        if matches!(
            err.context(),
            UiErrorContext::LoadCatalog | UiErrorContext::BackendStartup
        ) {
            self.status_banner = Some(self.status.clone());
        }
    }

    fn copy(&mut self, ctx: &egui::Context, kind: CopyKind, value: &str) {
        match write_clipboard_text(value) {
            Ok(()) => {
                let now = ctx.input(|input| input.time);
                self.toast.show_message(kind.toast(), now);
            }
            Err(err) => {
                tracing::warn!("clipboard write failed: {err}");
                self.report_error(&UiError::from_message(UiErrorContext::Clipboard, err));
            }
        }
    }

    fn apply_shortcuts(&mut self, ctx: &egui::Context) {
        let actions = ctx.input_mut(|input| take_shortcuts(&mut input.events));
        for action in actions {
            match action {
                ShortcutAction::FocusSearch => self.focus_search = true,
                ShortcutAction::ClearSearch => {
                    if self.browser.is_searching() {
                        self.clear_search();
                    }
                }
            }
        }
    }

    fn toggle_logos(&mut self, frame: &mut eframe::Frame) {
        let show = self.browser.toggle_logos();
        if let Some(storage) = frame.storage_mut() {
            storage.set_string(SHOW_LOGOS_STORAGE_KEY, encode_show_logos(show));
        }
    }

    fn latest_entries(&self) -> Vec<LatestEntry> {
        client_core::catalog::latest_scripts(self.browser.categories(), self.latest_limit)
            .into_iter()
            .map(|script| LatestEntry {
                title: script.title.clone(),
                logo: script.logo.clone(),
                date_added: script
                    .date_added()
                    .map(|date| date.format("%Y-%m-%d").to_string()),
            })
            .collect()
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        let mut copy_link = false;
        let mut reload = false;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Location").weak());
                ui.label(egui::RichText::new(self.location.to_url()).monospace());
                if ui.small_button("Copy link").clicked() {
                    copy_link = true;
                }
                if ui.small_button("Reload").clicked() {
                    reload = true;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&self.status).small().weak());
                });
            });
            if let Some(banner) = self.status_banner.clone() {
                ui.horizontal(|ui| {
                    ui.colored_label(ui.visuals().error_fg_color, banner);
                    if ui.small_button("Dismiss").clicked() {
                        self.status_banner = None;
                    }
                });
            }
        });

        if copy_link {
            let link = self.location.to_url();
            self.copy(ctx, CopyKind::Link, &link);
        }
        if reload {
            self.logos.forget_failures();
            self.status = "Reloading catalog...".to_string();
            self.dispatch(BackendCommand::LoadCatalog);
        }
    }

    fn apply_browser_actions(&mut self, actions: Vec<BrowserAction>, frame: &mut eframe::Frame) {
        for action in actions {
            match action {
                BrowserAction::Search(term) => self.set_search(&term),
                BrowserAction::ClearSearch => self.clear_search(),
                BrowserAction::ToggleCategory(name) => self.browser.toggle_category(&name),
                BrowserAction::OpenScript(title) => self.open_script(&title),
                BrowserAction::ToggleLogos => self.toggle_logos(frame),
            }
        }
    }

    fn apply_detail_actions(&mut self, ctx: &egui::Context, actions: Vec<DetailAction>) {
        for action in actions {
            match action {
                DetailAction::Close => self.close_script(),
                DetailAction::Retry => {
                    if let Some(key) = self.detail.requested().map(str::to_string) {
                        self.open_script(&key);
                    }
                }
                DetailAction::OpenScript(title) => self.open_script(&title),
                DetailAction::SetInstallTab(tab) => self.detail.set_install_tab(tab),
                DetailAction::Copy { kind, value } => self.copy(ctx, kind, &value),
            }
        }
    }

    fn dispatch_logo_requests(&mut self) {
        for url in self.logos.take_requests() {
            self.dispatch(BackendCommand::FetchLogo { url });
        }
    }
}

impl eframe::App for CatalogGuiApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);
        self.apply_shortcuts(ctx);

        let compact = is_compact(ctx.screen_rect().width());
        self.show_top_bar(ctx);

        let focus_search = std::mem::take(&mut self.focus_search);
        let browser_actions = egui::SidePanel::left("script_browser")
            .resizable(true)
            .default_width(if compact { 220.0 } else { 320.0 })
            .show(ctx, |ui| {
                show_browser_panel(
                    ui,
                    &self.browser,
                    &mut self.search_input,
                    focus_search,
                    &mut self.logos,
                )
            })
            .inner;
        self.apply_browser_actions(browser_actions, frame);

        let latest = self.latest_entries();
        let detail_actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                show_detail_panel(
                    ui,
                    &self.detail,
                    &latest,
                    self.browser.show_logos(),
                    compact,
                    &mut self.logos,
                )
            })
            .inner;
        self.apply_detail_actions(ctx, detail_actions);

        self.dispatch_logo_requests();
        self.toast.draw(ctx);
        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(
            SHOW_LOGOS_STORAGE_KEY,
            encode_show_logos(self.browser.show_logos()),
        );
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
