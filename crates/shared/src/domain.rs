use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(RecordId);
id_newtype!(CollectionId);

/// Kind of guest a script provisions. Drives the badge next to each script row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemType {
    Vm,
    Lxc,
    /// Blank `item_type`: tools and helpers run directly on the host.
    #[default]
    Misc,
    Other(String),
}

impl ItemType {
    pub fn label(&self) -> &str {
        match self {
            ItemType::Vm => "VM",
            ItemType::Lxc => "LXC",
            ItemType::Misc => "",
            ItemType::Other(raw) => raw,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ItemType::Misc)
    }

    /// Unknown kinds get no badge at all; `Misc` gets a blank one to keep rows aligned.
    pub fn shows_badge(&self) -> bool {
        !matches!(self, ItemType::Other(_))
    }
}

impl From<String> for ItemType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "VM" => ItemType::Vm,
            "LXC" => ItemType::Lxc,
            "" => ItemType::Misc,
            _ => ItemType::Other(value),
        }
    }
}

impl From<ItemType> for String {
    fn from(value: ItemType) -> Self {
        value.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDefaults {
    pub cpu: String,
    pub ram: String,
    pub hdd: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptRecord {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub logo: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub created: String,
    #[serde(default, deserialize_with = "lenient_item_type")]
    pub item_type: ItemType,
    #[serde(default, deserialize_with = "lenient_port")]
    pub port: u32,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub documentation: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub post_install: String,
    #[serde(rename = "installCommand", default, deserialize_with = "lenient_text")]
    pub install_command: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub default_cpu: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub default_ram: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub default_hdd: String,
    #[serde(rename = "hasAlpineScript", default, deserialize_with = "lenient_flag")]
    pub has_alpine_script: bool,
    #[serde(rename = "alpineScript", default, deserialize_with = "lenient_text")]
    pub alpine_script: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub alpine_default_cpu: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub alpine_default_ram: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub alpine_default_hdd: String,
    #[serde(rename = "isUpdateable", default, deserialize_with = "lenient_flag")]
    pub is_updateable: bool,
    #[serde(rename = "isMostViewed", default, deserialize_with = "lenient_flag")]
    pub is_most_viewed: bool,
    #[serde(default, deserialize_with = "lenient_text")]
    pub alert1: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub alert2: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub alert3: String,
}

impl ScriptRecord {
    /// Case-insensitive substring match on the title. An empty term matches every script.
    pub fn matches(&self, term: &str) -> bool {
        title_contains(&self.title, &term.to_lowercase())
    }

    pub fn default_resources(&self) -> Option<ResourceDefaults> {
        let cpu = self.default_cpu.trim();
        if cpu.is_empty() || cpu == "0" {
            return None;
        }
        Some(ResourceDefaults {
            cpu: self.default_cpu.clone(),
            ram: self.default_ram.clone(),
            hdd: self.default_hdd.clone(),
        })
    }

    pub fn alpine_resources(&self) -> Option<ResourceDefaults> {
        self.has_alpine_script.then(|| ResourceDefaults {
            cpu: self.alpine_default_cpu.clone(),
            ram: self.alpine_default_ram.clone(),
            hdd: self.alpine_default_hdd.clone(),
        })
    }

    /// Follow-up alerts only render underneath a primary one.
    pub fn alerts(&self) -> Vec<&str> {
        if self.alert1.is_empty() {
            return Vec::new();
        }
        [&self.alert1, &self.alert2, &self.alert3]
            .into_iter()
            .filter(|alert| !alert.is_empty())
            .map(String::as_str)
            .collect()
    }

    pub fn created_at(&self) -> Option<NaiveDateTime> {
        parse_backend_timestamp(&self.created)
    }

    pub fn date_added(&self) -> Option<NaiveDate> {
        self.created_at().map(|created| created.date()).or_else(|| {
            self.created
                .get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
    }

    pub fn install_verb(&self) -> &'static str {
        if self.item_type.is_empty() {
            "use"
        } else {
            "install"
        }
    }
}

/// `needle_lower` must already be lowercased.
pub fn title_contains(title: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || title.to_lowercase().contains(needle_lower)
}

/// Backend timestamps look like `2024-05-02 10:20:30.123Z`; RFC 3339 is accepted too.
pub fn parse_backend_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    let without_zone = raw.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(without_zone, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(without_zone, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryExpand {
    #[serde(default)]
    pub items: Vec<ScriptRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: RecordId,
    #[serde(rename = "collectionId", default)]
    pub collection_id: CollectionId,
    #[serde(rename = "catagoryName", default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expand: Option<CategoryExpand>,
}

impl Category {
    pub fn new(name: impl Into<String>, items: Vec<ScriptRecord>) -> Self {
        let name = name.into();
        Self {
            id: RecordId(name.to_lowercase().replace(' ', "-")),
            collection_id: CollectionId::default(),
            name,
            expand: Some(CategoryExpand { items }),
        }
    }

    pub fn items(&self) -> &[ScriptRecord] {
        self.expand
            .as_ref()
            .map(|expand| expand.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.items().iter().any(|script| script.title == title)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

fn lenient_item_type<'de, D>(deserializer: D) -> Result<ItemType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(ItemType::from)
        .unwrap_or_default())
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_port<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|port| u32::try_from(port).ok())
            .unwrap_or(0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
