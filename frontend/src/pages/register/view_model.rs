use super::utils::{
    failure_message, first_invalid_field, validate_registration, RegisterFormState, RESET_DELAY_MS,
};
use crate::{
    api::{ApiError, AvatarUpload},
    components::status::StatusMessages,
    state::auth::{use_register_action, RegistrationSubmission},
    utils::file::read_avatar,
};
use gloo_timers::future::TimeoutFuture;
use leptos::*;

#[derive(Clone, Copy)]
pub struct RegisterViewModel {
    pub form: RegisterFormState,
    pub status: StatusMessages,
    /// Errors from the last attempt, local or from the backend.
    pub errors: RwSignal<Option<ApiError>>,
    pub selected_avatar: RwSignal<Option<AvatarUpload>>,
    pub register_action: Action<RegistrationSubmission, Result<(), ApiError>>,
    pub avatar_action: Action<web_sys::File, Result<AvatarUpload, ApiError>>,
}

impl RegisterViewModel {
    pub fn field_errors(&self, field: &str) -> Vec<String> {
        self.errors
            .with(|errors| errors.as_ref().map(|err| err.errors_for(field)))
            .unwrap_or_default()
    }

    /// Editing a field hides the errors shown for it.
    pub fn clear_field(&self, field: &str) {
        self.errors.update(|errors| {
            if let Some(details) = errors
                .as_mut()
                .and_then(|err| err.details.as_mut())
                .and_then(|details| details.as_object_mut())
            {
                details.remove(field);
            }
        });
    }

    pub fn remove_avatar(&self) {
        self.selected_avatar.set(None);
    }

    pub fn submit(&self) {
        if self.register_action.pending().get_untracked() {
            return;
        }
        let request = self.form.to_request();
        if let Err(err) = validate_registration(&request) {
            self.fail(err);
            return;
        }
        self.status.clear();
        self.errors.set(None);
        self.register_action.dispatch(RegistrationSubmission {
            form: request,
            avatar: self.selected_avatar.get_untracked(),
        });
    }

    fn fail(&self, err: ApiError) {
        self.status.failure(failure_message(&err));
        if let Some(field) = first_invalid_field(&err) {
            focus_field(field);
        }
        self.errors.set(Some(err));
    }
}

pub fn use_register_view_model() -> RegisterViewModel {
    let form = RegisterFormState::default();
    let status = StatusMessages::new();
    let errors = create_rw_signal(None::<ApiError>);
    let selected_avatar = create_rw_signal(None::<AvatarUpload>);
    let register_action = use_register_action();
    let avatar_action = create_action(|file: &web_sys::File| read_avatar(file.clone()));

    let vm = RegisterViewModel {
        form,
        status,
        errors,
        selected_avatar,
        register_action,
        avatar_action,
    };

    create_effect(move |_| {
        if let Some(result) = avatar_action.value().get() {
            match result {
                Ok(upload) => {
                    vm.clear_field("avatar");
                    selected_avatar.set(Some(upload));
                }
                Err(err) => status.failure(err.error),
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = register_action.value().get() {
            match result {
                Ok(()) => {
                    errors.set(None);
                    status.success("Registration successful!");
                    spawn_local(async move {
                        TimeoutFuture::new(RESET_DELAY_MS).await;
                        form.reset();
                        selected_avatar.set(None);
                    });
                }
                Err(err) => vm.fail(err),
            }
        }
    });

    vm
}

fn focus_field(field: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let input = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(&format!("register-{}", field)))
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(input) = input {
            let _ = input.focus();
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = field;
}
