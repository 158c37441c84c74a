use crate::api::{ApiError, RegisterRequest};
use leptos::*;
use serde_json::json;

/// A successful sign-up clears the form after this long.
pub const RESET_DELAY_MS: u32 = 2_000;

pub const PASSWORDS_DIFFER: &str = "Passwords do not match.";
pub const FIX_ERRORS: &str = "Fix the errors and try again.";
pub const NETWORK_ERROR: &str = "Network error. Make sure the backend is running.";

/// Order in which field errors are looked at; also the order of the form.
pub const FIELD_ORDER: [&str; 6] = ["username", "email", "password", "password2", "address", "avatar"];

#[derive(Clone, Copy)]
pub struct RegisterFormState {
    pub username: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub password2: RwSignal<String>,
    pub address: RwSignal<String>,
    pub show_password: RwSignal<bool>,
    pub show_password2: RwSignal<bool>,
}

impl Default for RegisterFormState {
    fn default() -> Self {
        Self {
            username: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
            password2: create_rw_signal(String::new()),
            address: create_rw_signal(String::new()),
            show_password: create_rw_signal(false),
            show_password2: create_rw_signal(false),
        }
    }
}

impl RegisterFormState {
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.get_untracked().trim().to_string(),
            email: self.email.get_untracked().trim().to_string(),
            password: self.password.get_untracked(),
            password2: self.password2.get_untracked(),
            address: self.address.get_untracked().trim().to_string(),
        }
    }

    pub fn reset(&self) {
        for field in [self.username, self.email, self.password, self.password2, self.address] {
            field.set(String::new());
        }
    }
}

/// Local check before anything is sent. Everything else is the backend's
/// call and comes back as field errors.
pub fn validate_registration(request: &RegisterRequest) -> Result<(), ApiError> {
    if request.password != request.password2 {
        let mut err = ApiError::validation(FIX_ERRORS);
        err.details = Some(json!({ "password2": [PASSWORDS_DIFFER] }));
        return Err(err);
    }
    Ok(())
}

/// Banner text for a failed sign-up.
pub fn failure_message(err: &ApiError) -> String {
    if err.code == "REQUEST_FAILED" {
        NETWORK_ERROR.to_string()
    } else {
        err.error.clone()
    }
}

/// First field in form order that has an error.
pub fn first_invalid_field(err: &ApiError) -> Option<&'static str> {
    FIELD_ORDER
        .into_iter()
        .find(|field| !err.errors_for(field).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(password: &str, password2: &str) -> RegisterRequest {
        RegisterRequest {
            username: "bella".into(),
            email: "bella@example.com".into(),
            password: password.into(),
            password2: password2.into(),
            address: String::new(),
        }
    }

    #[test]
    fn mismatched_passwords_are_a_confirmation_error() {
        assert!(validate_registration(&request("secret123", "secret123")).is_ok());

        let err = validate_registration(&request("secret123", "secret124")).unwrap_err();
        assert_eq!(err.error, FIX_ERRORS);
        assert_eq!(err.errors_for("password2"), vec![PASSWORDS_DIFFER.to_string()]);
        assert_eq!(first_invalid_field(&err), Some("password2"));
    }

    #[test]
    fn first_invalid_field_follows_form_order() {
        let err = ApiError::from_response(
            400,
            &json!({ "address": ["Too long."], "email": ["Taken."] }),
            "x",
        );
        assert_eq!(first_invalid_field(&err), Some("email"));
        assert_eq!(first_invalid_field(&ApiError::unknown("x")), None);
    }

    #[test]
    fn network_failures_get_their_own_message() {
        assert_eq!(
            failure_message(&ApiError::request_failed("Request failed: refused")),
            NETWORK_ERROR
        );
        assert_eq!(failure_message(&ApiError::unknown("boom")), "boom");
    }
}
