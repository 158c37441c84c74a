use leptos::*;

/// Pause between a successful login and the next screen.
pub const REDIRECT_DELAY_MS: u32 = 800;
pub const LOCATION_SAVED_DELAY_MS: u32 = 1_000;

#[derive(Clone, Copy)]
pub struct LoginFormState {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub remember: RwSignal<bool>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
            remember: create_rw_signal(false),
        }
    }
}

impl LoginFormState {
    pub fn reset_password(&self) {
        self.password.set(String::new());
    }
}

pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Please fill in all fields".into());
    }
    Ok(())
}
