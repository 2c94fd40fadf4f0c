use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::error::CatalogError;

pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub backend_url: String,
    pub categories_collection: String,
    pub scripts_collection: String,
    /// Optional backend sort expression for categories, e.g. `order` or `-created`.
    pub category_sort: String,
    pub page_size: u32,
    pub request_timeout_secs: u64,
    pub latest_limit: usize,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:8090".into(),
            categories_collection: "categories".into(),
            scripts_collection: "proxmox_scripts".into(),
            category_sort: String::new(),
            page_size: 200,
            request_timeout_secs: 15,
            latest_limit: 6,
        }
    }
}

/// Defaults, then `catalog.toml` (or `$CATALOG_CONFIG`), then environment overrides.
pub fn load_settings() -> CatalogSettings {
    let path = std::env::var("CATALOG_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut settings = load_settings_file(&path);
    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

pub fn load_settings_file(path: &Path) -> CatalogSettings {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return CatalogSettings::default(),
    };
    match toml::from_str::<CatalogSettings>(&raw) {
        Ok(settings) => settings,
        Err(err) => {
            warn!(path = %path.display(), "ignoring unreadable catalog config: {err}");
            CatalogSettings::default()
        }
    }
}

pub fn apply_env_overrides(settings: &mut CatalogSettings, lookup: impl Fn(&str) -> Option<String>) {
    let first = |names: &[&str]| {
        names
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.trim().is_empty())
    };

    if let Some(v) = first(&["APP__BACKEND_URL", "CATALOG_BACKEND_URL"]) {
        settings.backend_url = v;
    }
    if let Some(v) = first(&["APP__CATEGORIES_COLLECTION", "CATALOG_CATEGORIES_COLLECTION"]) {
        settings.categories_collection = v;
    }
    if let Some(v) = first(&["APP__SCRIPTS_COLLECTION", "CATALOG_SCRIPTS_COLLECTION"]) {
        settings.scripts_collection = v;
    }
    if let Some(v) = first(&["APP__CATEGORY_SORT", "CATALOG_CATEGORY_SORT"]) {
        settings.category_sort = v;
    }
    if let Some(v) = first(&["APP__PAGE_SIZE", "CATALOG_PAGE_SIZE"]) {
        match v.trim().parse::<u32>() {
            Ok(parsed) if parsed > 0 => settings.page_size = parsed,
            _ => warn!(value = %v, "ignoring invalid page size override"),
        }
    }
    if let Some(v) = first(&["APP__TIMEOUT_SECS", "CATALOG_TIMEOUT_SECS"]) {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(_) => warn!(value = %v, "ignoring invalid timeout override"),
        }
    }
}

/// Trims, drops trailing slashes and assumes `http://` when no scheme is given.
pub fn normalize_backend_url(raw: &str) -> Result<String, CatalogError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(CatalogError::InvalidUrl(raw.to_string()));
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };
    let parsed = Url::parse(&candidate).map_err(|_| CatalogError::InvalidUrl(raw.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(CatalogError::InvalidUrl(raw.to_string()));
    }
    Ok(candidate)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
