use reqwest::multipart::Form;

use super::{
    client::{ensure_success_with, parse_json_with, send, ApiClient},
    profile::avatar_part,
    types::{ApiError, AuthResponse, AvatarUpload, GoogleLoginRequest, LoginRequest, RegisterRequest},
};

pub const REGISTRATION_FAILED: &str = "Registration failed. Fix the errors.";

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint("/login/").await;
        let response = send(self.http_client().post(&url).json(request)).await?;
        parse_json_with(
            response,
            "Invalid username or password",
            ApiError::from_message_response,
        )
        .await
    }

    pub async fn google_login(&self, credential: &str) -> Result<AuthResponse, ApiError> {
        let url = self.endpoint("/google-login/").await;
        let body = GoogleLoginRequest {
            token: credential.to_string(),
        };
        let response = send(self.http_client().post(&url).json(&body)).await?;
        parse_json_with(response, "Google login failed", ApiError::from_message_response).await
    }

    /// Creates an account. Every text field is sent, empty or not; the
    /// avatar part only when one was picked. The response body is not used.
    /// On failure the field errors stay in `details` for the form.
    pub async fn register(
        &self,
        request: &RegisterRequest,
        avatar: Option<&AvatarUpload>,
    ) -> Result<(), ApiError> {
        let url = self.endpoint("/register/").await;
        let mut form = Form::new()
            .text("username", request.username.clone())
            .text("email", request.email.clone())
            .text("password", request.password.clone())
            .text("password2", request.password2.clone())
            .text("address", request.address.clone());
        if let Some(avatar) = avatar {
            form = form.part("avatar", avatar_part(avatar)?);
        }
        let response = send(self.http_client().post(&url).multipart(form)).await?;
        ensure_success_with(response, REGISTRATION_FAILED, ApiError::from_message_response).await?;
        Ok(())
    }
}
