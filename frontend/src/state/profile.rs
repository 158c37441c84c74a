use crate::{
    api::{ApiClient, ApiError, AvatarUpload, LocationUpdateRequest, ProfileUpdateRequest},
    session::{ProfileUpdate, SessionStore},
    state::auth::use_session_store,
};
use leptos::*;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSubmission {
    pub form: ProfileUpdateRequest,
    pub avatar: Option<AvatarUpload>,
}

/// Sends the profile form and folds the outcome into the cached profile in
/// one write: form fields first, then whatever the backend echoed back.
/// A freshly picked avatar the backend did not return a URL for is kept as
/// its `data:` preview until the next login refreshes it.
pub async fn update_profile_request(
    submission: ProfileSubmission,
    api: &ApiClient,
    store: &SessionStore,
) -> Result<(), ApiError> {
    if let Some(avatar) = &submission.avatar {
        avatar.validate()?;
    }
    let token = store.get_token().ok_or_else(ApiError::unauthorized)?;
    let response = api
        .update_profile(&token, &submission.form, submission.avatar.as_ref())
        .await?;

    let mut patch = match serde_json::to_value(&submission.form) {
        Ok(Value::Object(fields)) => fields,
        _ => Map::new(),
    };
    let returned_avatar = response
        .user
        .as_ref()
        .and_then(|user| user.get("avatar"))
        .and_then(Value::as_str)
        .map(|avatar| !avatar.is_empty())
        .unwrap_or(false);
    if let Some(user) = response.user {
        patch.extend(user);
    }
    if let (Some(avatar), false) = (&submission.avatar, returned_avatar) {
        patch.insert("avatar".into(), Value::from(avatar.preview_data_uri()));
    }
    store.save_user(&patch);
    Ok(())
}

/// Records where the user is. The cached profile is updated first; the
/// backend copy is best effort and only attempted with a token.
pub async fn save_location_request(
    latitude: f64,
    longitude: f64,
    api: &ApiClient,
    store: &SessionStore,
) -> String {
    let location = match api.reverse_geocode(latitude, longitude).await {
        Ok(found) => found.display_name,
        Err(err) => {
            log::warn!("Failed to get address: {}", err);
            None
        }
    }
    .unwrap_or_else(|| format!("{}, {}", latitude, longitude));

    store.save_user(&ProfileUpdate::location(location.clone(), latitude, longitude));

    if let Some(token) = store.get_token() {
        let request = LocationUpdateRequest {
            location: location.clone(),
            latitude,
            longitude,
        };
        if let Err(err) = api.update_location(&token, &request).await {
            log::warn!("Failed to save location: {}", err);
        }
    }
    location
}

pub fn use_profile_update_action() -> Action<ProfileSubmission, Result<(), ApiError>> {
    let store = use_session_store();
    let api = use_context::<ApiClient>().unwrap_or_default();

    create_action(move |submission: &ProfileSubmission| {
        let submission = submission.clone();
        let api = api.clone();
        let store = store.clone();
        async move { update_profile_request(submission, &api, &store).await }
    })
}
