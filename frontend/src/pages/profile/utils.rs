use crate::{api::ProfileUpdateRequest, session::UserProfile};
use leptos::*;

/// Wait before sending an expired session back to the login page.
pub const RELOGIN_DELAY_MS: u32 = 1_500;

/// Form values taken from the cached profile.
pub fn seed_request(user: Option<&UserProfile>) -> ProfileUpdateRequest {
    let Some(user) = user else {
        return ProfileUpdateRequest::default();
    };
    ProfileUpdateRequest {
        username: user.username.clone(),
        phone: user.phone.clone().unwrap_or_default(),
        location: user.location.clone().unwrap_or_default(),
    }
}

pub fn validate_profile(request: &ProfileUpdateRequest) -> Result<(), String> {
    if request.username.trim().is_empty() {
        return Err("Username is required".into());
    }
    Ok(())
}

#[derive(Clone, Copy)]
pub struct ProfileFormState {
    pub username: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub location: RwSignal<String>,
}

impl ProfileFormState {
    pub fn new(seed: ProfileUpdateRequest) -> Self {
        Self {
            username: create_rw_signal(seed.username),
            phone: create_rw_signal(seed.phone),
            location: create_rw_signal(seed.location),
        }
    }

    pub fn to_request(&self) -> ProfileUpdateRequest {
        ProfileUpdateRequest {
            username: self.username.get_untracked().trim().to_string(),
            phone: self.phone.get_untracked().trim().to_string(),
            location: self.location.get_untracked().trim().to_string(),
        }
    }
}
