use std::{path::Path, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Category, ScriptRecord},
    error::{ApiException, ErrorCode},
    protocol::ListResult,
};
use tracing::{debug, info, warn};
use url::Url;

pub mod catalog;
pub mod config;
pub mod error;

pub use config::{load_settings, CatalogSettings};
pub use error::CatalogError;

/// Read access to the script catalog, whatever serves it.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError>;
    /// `key` is a record id or, failing that, an exact script title.
    async fn resolve_script(&self, key: &str) -> Result<ScriptRecord, CatalogError>;
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, CatalogError>;
}

#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base: Url,
    settings: CatalogSettings,
}

impl CatalogClient {
    pub fn new(settings: CatalogSettings) -> Result<Self, CatalogError> {
        let normalized = config::normalize_backend_url(&settings.backend_url)?;
        // Url::join treats the last segment as a file unless it ends with a slash.
        let base = Url::parse(&format!("{normalized}/"))
            .map_err(|_| CatalogError::InvalidUrl(settings.backend_url.clone()))?;
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs.max(1)))
            .user_agent(concat!("script-catalog/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base,
            settings,
        })
    }

    pub fn backend_url(&self) -> &Url {
        &self.base
    }

    fn records_url(&self, collection: &str) -> Result<Url, CatalogError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(["api", "collections", collection, "records"]);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        debug!(%url, "catalog: GET");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.path().to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let source = ApiException::from_response(
                status.as_u16(),
                &body,
                status.canonical_reason().unwrap_or("error"),
            );
            warn!(%url, status = status.as_u16(), "catalog: request rejected: {}", source.message);
            return Err(CatalogError::Backend {
                status: status.as_u16(),
                source,
            });
        }
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Every category with its scripts expanded, walking all pages in backend order.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let page_size = self.settings.page_size.max(1).to_string();
        let mut categories = Vec::new();
        let mut page: u32 = 1;
        loop {
            let mut url = self.records_url(&self.settings.categories_collection)?;
            {
                let mut query = url.query_pairs_mut();
                query
                    .append_pair("expand", "items")
                    .append_pair("page", &page.to_string())
                    .append_pair("perPage", &page_size);
                if !self.settings.category_sort.is_empty() {
                    query.append_pair("sort", &self.settings.category_sort);
                }
            }
            let result: ListResult<Category> = self.get_json(url).await?;
            let more = result.has_more_after(page) && !result.items.is_empty();
            categories.extend(result.items);
            if !more {
                break;
            }
            page += 1;
        }
        info!(
            categories = categories.len(),
            scripts = catalog::total_scripts(&categories),
            "catalog: loaded categories"
        );
        Ok(categories)
    }

    pub async fn get_script(&self, id: &str) -> Result<ScriptRecord, CatalogError> {
        let mut url = self.records_url(&self.settings.scripts_collection)?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.base.to_string()))?
            .push(id);
        self.get_json(url).await.map_err(|err| {
            if err.is_not_found() {
                CatalogError::NotFound(format!("{}/{id}", self.settings.scripts_collection))
            } else {
                err
            }
        })
    }

    pub async fn find_script_by_title(&self, title: &str) -> Result<ScriptRecord, CatalogError> {
        let mut url = self.records_url(&self.settings.scripts_collection)?;
        url.query_pairs_mut()
            .append_pair("filter", &title_filter(title))
            .append_pair("perPage", "1");
        let result: ListResult<ScriptRecord> = self.get_json(url).await?;
        result.items.into_iter().next().ok_or_else(|| {
            CatalogError::NotFound(format!(
                "{} titled '{title}'",
                self.settings.scripts_collection
            ))
        })
    }

    pub async fn resolve_script(&self, key: &str) -> Result<ScriptRecord, CatalogError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CatalogError::NotFound("empty script key".to_string()));
        }
        match self.get_script(key).await {
            Err(err) if err.is_not_found() => {
                debug!(script = %key, "catalog: no record with that id, trying title");
                self.find_script_by_title(key).await
            }
            other => other,
        }
    }

    /// Relative URLs resolve against the backend base.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let url = self
            .base
            .join(url)
            .map_err(|_| CatalogError::InvalidUrl(url.to_string()))?;
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Backend {
                status: status.as_u16(),
                source: ApiException::new(
                    ErrorCode::from_status(status.as_u16()),
                    format!("fetching {url}"),
                ),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl CatalogBackend for CatalogClient {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        CatalogClient::list_categories(self).await
    }

    async fn resolve_script(&self, key: &str) -> Result<ScriptRecord, CatalogError> {
        CatalogClient::resolve_script(self, key).await
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        CatalogClient::fetch_bytes(self, url).await
    }
}

/// Backend filter expression matching one exact title.
pub fn title_filter(title: &str) -> String {
    let escaped = title.replace('\\', "\\\\").replace('\'', "\\'");
    format!("(title='{escaped}')")
}

/// A catalog held in memory, e.g. loaded from an exported JSON file.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    categories: Vec<Category>,
}

impl StaticCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Accepts either a bare category array or a backend list page.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let categories = match serde_json::from_str::<Vec<Category>>(raw) {
            Ok(categories) => categories,
            Err(_) => serde_json::from_str::<ListResult<Category>>(raw)?.items,
        };
        Ok(Self::new(categories))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }
}

#[async_trait]
impl CatalogBackend for StaticCatalog {
    async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.clone())
    }

    async fn resolve_script(&self, key: &str) -> Result<ScriptRecord, CatalogError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CatalogError::NotFound("empty script key".to_string()));
        }
        let scripts = || self.categories.iter().flat_map(|category| category.items());
        scripts()
            .find(|script| script.id.as_str() == key)
            .or_else(|| scripts().find(|script| script.title == key))
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(key.to_string()))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        if let Some(path) = url.strip_prefix("file://") {
            return std::fs::read(path).map_err(|source| CatalogError::Io {
                path: path.to_string(),
                source,
            });
        }
        Err(CatalogError::NotFound(format!("no offline copy of {url}")))
    }
}

/// An opened backend plus a short description for status lines.
pub struct OpenedBackend {
    pub backend: Arc<dyn CatalogBackend>,
    pub label: String,
}

/// Uses the exported catalog at `catalog_file` when given, otherwise the HTTP backend.
pub fn open_backend(
    settings: &CatalogSettings,
    catalog_file: Option<&Path>,
) -> Result<OpenedBackend, CatalogError> {
    if let Some(path) = catalog_file {
        let catalog = StaticCatalog::from_json_file(path)?;
        info!(path = %path.display(), "using offline catalog file");
        return Ok(OpenedBackend {
            backend: Arc::new(catalog),
            label: path.display().to_string(),
        });
    }
    let client = CatalogClient::new(settings.clone())?;
    let label = client.backend_url().as_str().trim_end_matches('/').to_string();
    info!(backend = %label, "using catalog backend");
    Ok(OpenedBackend {
        backend: Arc::new(client),
        label,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
