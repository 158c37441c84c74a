use reqwest::multipart::{Form, Part};

use super::{
    client::{ensure_success, parse_json, send, ApiClient},
    types::{
        ApiError, AvatarUpload, LocationUpdateRequest, ProfileUpdateRequest,
        ProfileUpdateResponse, ReverseGeocodeResponse,
    },
};

pub(super) fn avatar_part(avatar: &AvatarUpload) -> Result<Part, ApiError> {
    Part::bytes(avatar.bytes.clone())
        .file_name(avatar.file_name.clone())
        .mime_str(&avatar.mime)
        .map_err(|e| ApiError::validation(format!("Invalid image type: {}", e)))
}

impl ApiClient {
    /// Sent as multipart form data so an avatar image can ride along.
    pub async fn update_profile(
        &self,
        token: &str,
        request: &ProfileUpdateRequest,
        avatar: Option<&AvatarUpload>,
    ) -> Result<ProfileUpdateResponse, ApiError> {
        let url = self.endpoint("/profile/update/").await;
        let mut form = Form::new()
            .text("username", request.username.clone())
            .text("phone", request.phone.clone())
            .text("location", request.location.clone());
        if let Some(avatar) = avatar {
            form = form.part("avatar", avatar_part(avatar)?);
        }
        let response = send(
            self.http_client()
                .put(&url)
                .bearer_auth(token)
                .multipart(form),
        )
        .await?;
        parse_json(response, "Failed to update profile").await
    }

    pub async fn update_location(
        &self,
        token: &str,
        request: &LocationUpdateRequest,
    ) -> Result<(), ApiError> {
        let url = self.endpoint("/user/update-location/").await;
        let response = send(self.http_client().put(&url).bearer_auth(token).json(request)).await?;
        ensure_success(response, "Failed to save location").await?;
        Ok(())
    }

    /// Human-readable address for a coordinate pair, via the geocoder.
    pub async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ReverseGeocodeResponse, ApiError> {
        let url = format!("{}/reverse", self.geocoder_url());
        let request = self.http_client().get(&url).query(&[
            ("format", "json".to_string()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
        ]);
        let response = send(request).await?;
        parse_json(response, "Failed to look up address").await
    }
}
