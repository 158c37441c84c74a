use super::utils::{seed_request, ProfileFormState, RELOGIN_DELAY_MS};
use crate::{
    api::{ApiError, AvatarUpload},
    components::status::StatusMessages,
    session::SessionStore,
    state::{
        auth::{use_auth, use_session_store},
        profile::{use_profile_update_action, ProfileSubmission},
    },
    utils::{
        file::read_avatar,
        navigation::{go_to, login_redirect_url},
    },
};
use gloo_timers::future::TimeoutFuture;
use leptos::*;

#[derive(Clone, Copy)]
pub struct ProfileViewModel {
    pub form: ProfileFormState,
    pub status: StatusMessages,
    pub avatar_preview: RwSignal<String>,
    pub selected_avatar: RwSignal<Option<AvatarUpload>>,
    pub update_action: Action<ProfileSubmission, Result<(), ApiError>>,
    pub avatar_action: Action<web_sys::File, Result<AvatarUpload, ApiError>>,
    store: StoredValue<SessionStore>,
}

impl ProfileViewModel {
    pub fn has_token(&self) -> bool {
        self.store.with_value(|store| store.get_token().is_some())
    }
}

pub fn use_profile_view_model() -> ProfileViewModel {
    let auth = use_auth();
    let user = auth.get_untracked().user;
    let form = ProfileFormState::new(seed_request(user.as_ref()));
    let status = StatusMessages::new();
    let avatar_preview = create_rw_signal(
        user.as_ref()
            .map(|user| user.avatar_or_default().to_string())
            .unwrap_or_else(|| crate::session::DEFAULT_AVATAR.to_string()),
    );
    let selected_avatar = create_rw_signal(None::<AvatarUpload>);
    let update_action = use_profile_update_action();
    let avatar_action = create_action(|file: &web_sys::File| read_avatar(file.clone()));
    let store = store_value(use_session_store());

    create_effect(move |_| {
        if let Some(result) = avatar_action.value().get() {
            match result {
                Ok(upload) => {
                    avatar_preview.set(upload.preview_data_uri());
                    selected_avatar.set(Some(upload));
                }
                Err(err) => status.failure(err.error),
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = update_action.value().get() {
            match result {
                Ok(()) => {
                    selected_avatar.set(None);
                    if let Some(user) = auth.get_untracked().user {
                        avatar_preview.set(user.avatar_or_default().to_string());
                    }
                    status.success("Profile updated successfully!");
                }
                Err(err) => {
                    let unauthorized = err.is_unauthorized();
                    status.failure(err.error);
                    if unauthorized {
                        spawn_local(async move {
                            TimeoutFuture::new(RELOGIN_DELAY_MS).await;
                            go_to(&login_redirect_url("/profile"));
                        });
                    }
                }
            }
        }
    });

    ProfileViewModel {
        form,
        status,
        avatar_preview,
        selected_avatar,
        update_action,
        avatar_action,
        store,
    }
}
