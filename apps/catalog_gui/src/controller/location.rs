//! Deep links of the form `<base>?id=<record id or title>`.

use url::{form_urlencoded, Url};

pub const DEFAULT_LOCATION_BASE: &str = "catalog://scripts";
const SCRIPT_QUERY_KEY: &str = "id";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptLocation {
    /// `None` means [`DEFAULT_LOCATION_BASE`].
    base: Option<Url>,
    script: Option<String>,
}

impl ScriptLocation {
    /// Accepts a full link (`https://host/scripts?id=Docker`) or a bare id/title.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::default();
        }
        match Url::parse(text) {
            Ok(url) if url.has_host() || url.scheme() == "catalog" => {
                let script = url
                    .query_pairs()
                    .find(|(key, _)| key == SCRIPT_QUERY_KEY)
                    .map(|(_, value)| value.trim().to_string())
                    .filter(|value| !value.is_empty());
                let mut base = url;
                base.set_query(None);
                base.set_fragment(None);
                Self {
                    base: Some(base),
                    script,
                }
            }
            _ => Self {
                base: None,
                script: Some(text.to_string()),
            },
        }
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn with_script(&self, key: &str) -> Self {
        let key = key.trim();
        Self {
            base: self.base.clone(),
            script: (!key.is_empty()).then(|| key.to_string()),
        }
    }

    pub fn without_script(&self) -> Self {
        Self {
            base: self.base.clone(),
            script: None,
        }
    }

    pub fn to_url(&self) -> String {
        match (&self.base, &self.script) {
            (Some(base), Some(script)) => {
                let mut url = base.clone();
                url.query_pairs_mut().append_pair(SCRIPT_QUERY_KEY, script);
                url.to_string()
            }
            (Some(base), None) => base.to_string(),
            (None, Some(script)) => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair(SCRIPT_QUERY_KEY, script)
                    .finish();
                format!("{DEFAULT_LOCATION_BASE}?{query}")
            }
            (None, None) => DEFAULT_LOCATION_BASE.to_string(),
        }
    }
}

impl std::fmt::Display for ScriptLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_url())
    }
}

#[cfg(test)]
#[path = "tests/location_tests.rs"]
mod tests;
