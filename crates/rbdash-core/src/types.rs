//! Domain types shared by every dashboard crate
//!
//! Records arrive from the backend as JSON. Deserialization is deliberately
//! lenient: unknown statuses, numeric versions and empty strings must not
//! fail the whole collection.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

/// Build/deploy status of an app.
///
/// Anything other than the three known values is preserved verbatim in
/// [`AppStatus::Other`] so new backend statuses still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppStatus {
    Active,
    Building,
    Error,
    Other(String),
}

impl AppStatus {
    /// The literal status value as sent by the backend
    pub fn as_str(&self) -> &str {
        match self {
            AppStatus::Active => "active",
            AppStatus::Building => "building",
            AppStatus::Error => "error",
            AppStatus::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for AppStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => AppStatus::Active,
            "building" => AppStatus::Building,
            "error" => AppStatus::Error,
            _ => AppStatus::Other(value),
        }
    }
}

impl From<&str> for AppStatus {
    fn from(value: &str) -> Self {
        AppStatus::from(value.to_string())
    }
}

impl From<AppStatus> for String {
    fn from(value: AppStatus) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for AppStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One application owned by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    /// Opaque, stable identifier (unique within one fetched collection)
    pub id: String,

    /// Machine/slug name
    pub name: String,

    /// Optional human label; empty means "not set"
    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    pub status: AppStatus,

    /// `s3://bucket/key` reference or a plain HTTP(S) URL
    #[serde(default, deserialize_with = "empty_as_none")]
    pub logo: Option<String>,

    /// ISO-8601 timestamp, display only
    pub created_at: String,

    /// Host/path of the production target, without scheme
    #[serde(default, deserialize_with = "empty_as_none")]
    pub production_url: Option<String>,

    /// Published production version; `None` means reserved but unpublished
    #[serde(default, deserialize_with = "version_string")]
    pub prod_version: Option<String>,
}

impl App {
    /// Card title: `display_name` when non-empty, otherwise `name`
    pub fn title(&self) -> &str {
        match self.display_name.as_deref() {
            Some(display) if !display.is_empty() => display,
            _ => &self.name,
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Versions come back as strings from some endpoints and as integers from
/// others. A zero or empty version counts as "never published".
fn version_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
