use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_AVATAR: &str = "/default-avatar.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileId {
    Number(i64),
    Text(String),
}

/// Locally cached snapshot of the signed-in user.
///
/// Fields the backend sends beyond the known ones are kept in `extra`, so a
/// read-modify-write through the store never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<ProfileId>,
    #[serde(default, deserialize_with = "lenient_required_text")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_required_text")]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub latitude: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_coordinate",
        skip_serializing_if = "Option::is_none"
    )]
    pub longitude: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// The cached profile is merged from untyped backend payloads, so every JSON
// shape has to read back. Scalars are stringified; null, arrays and objects
// read as absent.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_text))
}

fn lenient_required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<ProfileId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => Some(match n.as_i64() {
            Some(id) => ProfileId::Number(id),
            None => ProfileId::Text(n.to_string()),
        }),
        Some(other) => scalar_text(other).map(ProfileId::Text),
        None => None,
    })
}

// Decimal columns come back from the backend as strings.
fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

impl UserProfile {
    /// Two-letter badge shown when there is no avatar image.
    pub fn initials(&self) -> String {
        let initials: String = self.username.chars().take(2).collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials.to_uppercase()
        }
    }

    pub fn avatar_or_default(&self) -> &str {
        self.avatar
            .as_deref()
            .filter(|avatar| !avatar.is_empty())
            .unwrap_or(DEFAULT_AVATAR)
    }

    pub fn has_location(&self) -> bool {
        self.location
            .as_deref()
            .map(|location| !location.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Partial profile for `SessionStore::save_user`. Only the fields that are
/// `Some` are written; everything else in the cached profile is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ProfileId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    pub fn avatar(avatar: impl Into<String>) -> Self {
        Self {
            avatar: Some(avatar.into()),
            ..Self::default()
        }
    }

    pub fn location(location: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            location: Some(location.into()),
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Self::default()
        }
    }
}
