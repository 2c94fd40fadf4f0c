use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a collection listing as returned by the document backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> ListResult<T> {
    /// Whether a page after `requested_page` exists. The echoed `page` is ignored.
    /// A negative `total_pages` means the backend skipped the count; trust the page size then.
    pub fn has_more_after(&self, requested_page: u32) -> bool {
        if self.total_pages >= 0 {
            i64::from(requested_page) < self.total_pages
        } else {
            self.per_page > 0 && self.items.len() as u32 >= self.per_page
        }
    }
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}
