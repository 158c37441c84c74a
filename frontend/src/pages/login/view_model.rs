use super::{
    repository,
    utils::{LoginFormState, LOCATION_SAVED_DELAY_MS, REDIRECT_DELAY_MS},
};
use crate::{
    api::{ApiClient, ApiError, LoginRequest},
    components::status::StatusMessages,
    state::auth::{self, use_session_store, LoginOutcome},
    utils::navigation::{current_search, go_to, redirect_target},
};
use gloo_timers::future::TimeoutFuture;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub status: StatusMessages,
    pub show_location_prompt: RwSignal<bool>,
    pub login_action: Action<(LoginRequest, bool), Result<LoginOutcome, ApiError>>,
    pub google_action: Action<String, Result<LoginOutcome, ApiError>>,
    pub location_action: Action<(), Result<String, String>>,
}

pub fn use_login_view_model() -> LoginViewModel {
    let form = LoginFormState::default();
    let status = StatusMessages::new();
    let show_location_prompt = create_rw_signal(false);
    let login_action = auth::use_login_action();
    let google_action = auth::use_google_login_action();

    let store = use_session_store();
    let api = use_context::<ApiClient>().unwrap_or_default();
    let location_action = create_action(move |_: &()| {
        let api = api.clone();
        let store = store.clone();
        async move { repository::save_current_location(&api, &store).await }
    });

    create_effect(move |_| {
        if let Some(result) = login_action.value().get() {
            handle_login_result(result, "Login successful!", form, status, show_location_prompt);
        }
    });
    create_effect(move |_| {
        if let Some(result) = google_action.value().get() {
            handle_login_result(result, "Google login successful!", form, status, show_location_prompt);
        }
    });
    create_effect(move |_| {
        if let Some(result) = location_action.value().get() {
            show_location_prompt.set(false);
            match result {
                Ok(_) => status.success("Location saved!"),
                Err(err) => status.failure(err),
            }
            spawn_local(async move {
                TimeoutFuture::new(LOCATION_SAVED_DELAY_MS).await;
                go_to(&redirect_target(&current_search()));
            });
        }
    });

    LoginViewModel {
        form,
        status,
        show_location_prompt,
        login_action,
        google_action,
        location_action,
    }
}

fn handle_login_result(
    result: Result<LoginOutcome, ApiError>,
    success: &str,
    form: LoginFormState,
    status: StatusMessages,
    show_location_prompt: RwSignal<bool>,
) {
    match result {
        Ok(outcome) => {
            form.reset_password();
            status.success(success);
            spawn_local(async move {
                TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                if outcome.needs_location {
                    show_location_prompt.set(true);
                } else {
                    go_to(&redirect_target(&current_search()));
                }
            });
        }
        Err(err) => status.failure(err.error),
    }
}

pub fn skip_location() {
    go_to(&redirect_target(&current_search()));
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::{helpers::provide_logged_out_store, ssr::with_runtime};

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            provide_logged_out_store();
            let vm = use_login_view_model();
            assert!(vm.status.error.get_untracked().is_none());
            assert!(vm.status.message.get_untracked().is_none());
            assert!(vm.form.email.get_untracked().is_empty());
            assert!(!vm.form.remember.get_untracked());
            assert!(!vm.show_location_prompt.get_untracked());
        });
    }
}
