//! Backend-to-UI events and error modeling for the catalog GUI controller.

use client_core::CatalogError;
use shared::domain::{Category, ScriptRecord};

/// Decoded RGBA pixels for a script logo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub enum UiEvent {
    Info(String),
    Error(UiError),
    CatalogLoaded(Vec<Category>),
    ScriptLoaded {
        key: String,
        record: ScriptRecord,
    },
    ScriptFailed {
        key: String,
        error: UiError,
    },
    LogoLoaded {
        url: String,
        image: LogoImage,
    },
    LogoFailed {
        url: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    NotFound,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadCatalog,
    LoadScript,
    LoadLogo,
    Clipboard,
    General,
}

pub fn classify_catalog_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("backend worker startup failure") {
        "Backend worker startup failure; verify the local app environment and relaunch.".to_string()
    } else if lower.contains("failed to connect")
        || lower.contains("connection refused")
        || lower.contains("error sending request")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Catalog backend unreachable; check the backend URL/network and press Reload.".to_string()
    } else {
        format!("Catalog error: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("not found") || message_lower.contains("404") {
            UiErrorCategory::NotFound
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("request failed")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_catalog_error(context: UiErrorContext, err: &CatalogError) -> Self {
        let category = match err {
            CatalogError::Transport(_) => UiErrorCategory::Transport,
            CatalogError::InvalidUrl(_) | CatalogError::Decode(_) => UiErrorCategory::Validation,
            err if err.is_not_found() => UiErrorCategory::NotFound,
            _ => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    /// Text for the status banner.
    pub fn display_message(&self) -> String {
        match (self.context, self.category) {
            (UiErrorContext::LoadScript, UiErrorCategory::NotFound) => {
                "That script is not in the catalog.".to_string()
            }
            (UiErrorContext::LoadCatalog | UiErrorContext::BackendStartup, _) => {
                classify_catalog_failure(&self.message)
            }
            _ => format!("{}: {}", err_label(self.category), self.message),
        }
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::NotFound => "Not found",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
