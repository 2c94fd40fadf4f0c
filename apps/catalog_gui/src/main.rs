mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use client_core::{load_settings, open_backend, CatalogSettings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    browser::{decode_show_logos, SHOW_LOGOS_STORAGE_KEY},
    events::UiEvent,
};
use crate::ui::{CatalogGuiApp, StartupOptions};

#[derive(Parser, Debug)]
#[command(name = "script-browser", about = "Browse and search the script catalog")]
struct Args {
    /// Deep link (`...?id=<id or title>`) or a bare record id/title to open on launch.
    link: Option<String>,
    #[arg(long)]
    backend_url: Option<String>,
    /// Browse an exported catalog JSON file instead of the backend.
    #[arg(long)]
    catalog_file: Option<PathBuf>,
    #[arg(long)]
    page_size: Option<u32>,
}

impl Args {
    fn apply_to(&self, settings: &mut CatalogSettings) {
        if let Some(url) = &self.backend_url {
            settings.backend_url = url.clone();
        }
        if let Some(page_size) = self.page_size.filter(|size| *size > 0) {
            settings.page_size = page_size;
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    args.apply_to(&mut settings);
    let opened = open_backend(&settings, args.catalog_file.as_deref())
        .context("failed to open the script catalog")?;

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, opened.backend);

    let link = args.link.clone();
    let latest_limit = settings.latest_limit;
    let backend_label = opened.label;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Script Browser")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Script Browser",
        options,
        Box::new(move |cc| {
            let stored = cc
                .storage
                .and_then(|storage| storage.get_string(SHOW_LOGOS_STORAGE_KEY));
            Ok(Box::new(CatalogGuiApp::new(
                cmd_tx,
                ui_rx,
                StartupOptions {
                    show_logos: decode_show_logos(stored.as_deref()),
                    link,
                    latest_limit,
                    backend_label,
                },
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("GUI exited with an error: {err}"))
}
