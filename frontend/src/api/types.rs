use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleLoginRequest {
    /// Google ID token from the sign-in button.
    pub token: String,
}

/// Body of both the password and the Google login responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Confirmation; the backend checks it again.
    pub password2: String,
    /// Optional free-text address, sent empty when left blank.
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdateRequest {
    pub username: String,
    pub phone: String,
    pub location: String,
}

pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;

/// Image picked in a form, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl AvatarUpload {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.bytes.len() > MAX_AVATAR_BYTES {
            return Err(ApiError::validation("File size should be less than 5MB"));
        }
        if !self.mime.starts_with("image/") {
            return Err(ApiError::validation("Please select a valid image file"));
        }
        Ok(())
    }

    /// `data:` URI shown (and cached) until the backend returns a URL.
    pub fn preview_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdateResponse {
    #[serde(default)]
    pub user: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationUpdateRequest {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub display_name: Option<String>,
}

use leptos::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            error: "Unauthorized. Please login again.".to_string(),
            code: "UNAUTHORIZED".to_string(),
            details: None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.code == "UNAUTHORIZED"
    }

    /// Per-field messages from a `{"field": ["msg", ...]}` body, sorted by
    /// field name. `message`/`detail` and non-text values are skipped.
    pub fn field_errors(&self) -> Vec<(String, Vec<String>)> {
        let Some(fields) = self.details.as_ref().and_then(Value::as_object) else {
            return Vec::new();
        };
        fields
            .iter()
            .filter(|(field, _)| !matches!(field.as_str(), "message" | "detail"))
            .filter_map(|(field, value)| {
                let messages: Vec<String> = match value {
                    Value::String(text) => vec![text.clone()],
                    Value::Array(items) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect(),
                    _ => Vec::new(),
                };
                (!messages.is_empty()).then(|| (field.clone(), messages))
            })
            .collect()
    }

    /// Messages for one form field, empty when it has none.
    pub fn errors_for(&self, field: &str) -> Vec<String> {
        self.field_errors()
            .into_iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages)
            .unwrap_or_default()
    }

    /// Turns a non-success response body into a user-facing error.
    ///
    /// A `message` (or `detail`) string wins; otherwise field errors such as
    /// `{"username": ["taken"]}` are flattened and joined; otherwise
    /// `fallback` is used.
    pub fn from_response(status: u16, body: &Value, fallback: &str) -> Self {
        if status == 401 {
            return Self::unauthorized();
        }
        let message = ["message", "detail"]
            .iter()
            .find_map(|key| body.get(key).and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| flatten_field_errors(body));
        Self::with_status(status, body, message, fallback)
    }

    /// Sign-in variant of [`ApiError::from_response`]: only the backend's
    /// `message` is shown. Field errors and a 401 both read as `fallback`,
    /// so a failed sign-in never hints at which credential was wrong.
    pub fn from_message_response(status: u16, body: &Value, fallback: &str) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self::with_status(status, body, message, fallback)
    }

    fn with_status(status: u16, body: &Value, message: Option<String>, fallback: &str) -> Self {
        Self {
            error: message.unwrap_or_else(|| fallback.to_string()),
            code: format!("HTTP_{}", status),
            details: (!body.is_null()).then(|| body.clone()),
        }
    }
}

fn flatten_field_errors(body: &Value) -> Option<String> {
    let fields = body.as_object()?;
    let mut parts = Vec::new();
    for value in fields.values() {
        match value {
            Value::String(text) => parts.push(text.clone()),
            Value::Array(items) => parts.extend(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string),
            ),
            _ => {}
        }
    }
    let joined = parts.join(" ");
    (!joined.trim().is_empty()).then_some(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn auth_response_tolerates_missing_parts() {
        let response: AuthResponse = serde_json::from_value(json!({ "access": "a" })).unwrap();
        assert_eq!(response.access.as_deref(), Some("a"));
        assert!(response.refresh.is_none());
        assert!(response.user.is_none());
    }

    fn avatar(mime: &str, len: usize) -> AvatarUpload {
        AvatarUpload {
            file_name: "rex.png".into(),
            mime: mime.into(),
            bytes: vec![0; len],
        }
    }

    #[test]
    fn avatar_validation_limits_size_and_type() {
        assert!(avatar("image/png", 1024).validate().is_ok());
        assert_eq!(
            avatar("image/png", MAX_AVATAR_BYTES + 1)
                .validate()
                .unwrap_err()
                .error,
            "File size should be less than 5MB"
        );
        assert_eq!(
            avatar("application/pdf", 10).validate().unwrap_err().code,
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn avatar_preview_is_a_data_uri() {
        let upload = AvatarUpload {
            file_name: "a.gif".into(),
            mime: "image/gif".into(),
            bytes: b"GIF".to_vec(),
        };
        assert_eq!(upload.preview_data_uri(), "data:image/gif;base64,R0lG");
    }

    #[test]
    fn message_field_wins() {
        let err = ApiError::from_response(
            400,
            &json!({ "message": "Account disabled", "email": ["bad"] }),
            "Invalid username or password",
        );
        assert_eq!(err.error, "Account disabled");
        assert_eq!(err.code, "HTTP_400");
        assert!(err.details.is_some());
    }

    #[test]
    fn field_errors_are_flattened() {
        let err = ApiError::from_response(
            400,
            &json!({ "username": ["This username is taken."], "phone": "Too long." }),
            "Failed to update profile",
        );
        assert!(err.error.contains("This username is taken."));
        assert!(err.error.contains("Too long."));
    }

    #[test]
    fn fallback_used_when_body_is_unhelpful() {
        let err = ApiError::from_response(500, &Value::Null, "Failed to update profile");
        assert_eq!(err.error, "Failed to update profile");
        assert!(err.details.is_none());

        let err = ApiError::from_response(400, &json!({ "errors": [] }), "Login failed");
        assert_eq!(err.error, "Login failed");
    }

    #[test]
    fn message_only_mapping_ignores_field_errors_and_401() {
        let err = ApiError::from_message_response(
            400,
            &json!({ "email": ["Enter a valid email address."] }),
            "Invalid username or password",
        );
        assert_eq!(err.error, "Invalid username or password");
        assert_eq!(err.code, "HTTP_400");

        let err = ApiError::from_message_response(
            401,
            &json!({ "detail": "No active account" }),
            "Invalid username or password",
        );
        assert_eq!(err.error, "Invalid username or password");
        assert!(!err.is_unauthorized());

        let err = ApiError::from_message_response(403, &json!({ "message": "Banned" }), "x");
        assert_eq!(err.error, "Banned");
    }

    #[test]
    fn field_errors_keep_their_field_names() {
        let err = ApiError::from_response(
            400,
            &json!({
                "username": ["A user with that username already exists."],
                "password": "This password is too common.",
                "message": "ignored",
                "non_text": 3
            }),
            "Registration failed",
        );
        assert_eq!(
            err.errors_for("username"),
            vec!["A user with that username already exists.".to_string()]
        );
        assert_eq!(
            err.errors_for("password"),
            vec!["This password is too common.".to_string()]
        );
        assert!(err.errors_for("message").is_empty());
        assert!(err.errors_for("non_text").is_empty());
        assert_eq!(err.field_errors().len(), 2);
        assert!(ApiError::unknown("x").field_errors().is_empty());
    }

    #[test]
    fn unauthorized_status_maps_to_relogin_message() {
        let err = ApiError::from_response(401, &json!({ "detail": "expired" }), "x");
        assert!(err.is_unauthorized());
        assert_eq!(err.error, "Unauthorized. Please login again.");
    }
}
