//! Runtime bridge between UI command queue and the catalog backend.

use std::{sync::Arc, thread};

use client_core::CatalogBackend;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{LogoImage, UiError, UiErrorContext, UiEvent};

/// Largest logo edge kept after decoding. The detail panel draws logos at 64px.
pub const LOGO_MAX_DIMENSION: u32 = 64;

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    backend: Arc<dyn CatalogBackend>,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
            // One task per command; completion order is not preserved.
            while let Ok(cmd) = cmd_rx.recv() {
                let backend = Arc::clone(&backend);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let command = cmd.name();
                    let event = handle_command(backend.as_ref(), cmd).await;
                    if ui_tx.send(event).is_err() {
                        tracing::debug!(command, "ui receiver dropped; discarding result");
                    }
                });
            }
            tracing::info!("command queue closed; backend worker exiting");
        });
    });
}

pub async fn handle_command(backend: &dyn CatalogBackend, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::LoadCatalog => match backend.list_categories().await {
            Ok(categories) => {
                tracing::info!(categories = categories.len(), "catalog loaded");
                UiEvent::CatalogLoaded(categories)
            }
            Err(err) => {
                tracing::warn!("catalog load failed: {err}");
                UiEvent::Error(UiError::from_catalog_error(UiErrorContext::LoadCatalog, &err))
            }
        },
        BackendCommand::LoadScript { key } => match backend.resolve_script(&key).await {
            Ok(record) => UiEvent::ScriptLoaded { key, record },
            Err(err) => {
                tracing::warn!(key = %key, "script load failed: {err}");
                UiEvent::ScriptFailed {
                    error: UiError::from_catalog_error(UiErrorContext::LoadScript, &err),
                    key,
                }
            }
        },
        BackendCommand::FetchLogo { url } => {
            let decoded = match backend.fetch_bytes(&url).await {
                Ok(bytes) => decode_logo(&bytes),
                Err(err) => Err(format!("failed to download logo: {err}")),
            };
            match decoded {
                Ok(image) => UiEvent::LogoLoaded { url, image },
                Err(reason) => {
                    tracing::debug!(url = %url, "{reason}");
                    UiEvent::LogoFailed { url, reason }
                }
            }
        }
    }
}

pub fn decode_logo(bytes: &[u8]) -> Result<LogoImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = dynamic
        .thumbnail(LOGO_MAX_DIMENSION, LOGO_MAX_DIMENSION)
        .to_rgba8();
    Ok(LogoImage {
        width: resized.width() as usize,
        height: resized.height() as usize,
        rgba: resized.into_raw(),
    })
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
