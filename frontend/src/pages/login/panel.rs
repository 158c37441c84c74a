use crate::{
    api::LoginRequest,
    components::status::StatusBanner,
    config,
    pages::login::{
        components::{form::LoginForm, google::GoogleSignIn, location_prompt::LocationPrompt},
        utils,
        view_model::{skip_location, use_login_view_model},
    },
};
use leptos::{ev::SubmitEvent, Callback, *};
use leptos_meta::Title;

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let form = vm.form;
    let status = vm.status;
    let login_action = vm.login_action;
    let pending = login_action.pending();
    let google_action = vm.google_action;
    let location_action = vm.location_action;

    let handle_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email = form.email.get_untracked();
        let password = form.password.get_untracked();
        if let Err(msg) = utils::validate_credentials(&email, &password) {
            status.failure(msg);
            return;
        }
        status.clear();
        login_action.dispatch((
            LoginRequest {
                email: email.trim().to_string(),
                password,
            },
            form.remember.get_untracked(),
        ));
    });
    let on_google_credential = Callback::new(move |credential: String| {
        status.clear();
        google_action.dispatch(credential);
    });
    let on_allow_location = Callback::new(move |_: ()| location_action.dispatch(()));
    let on_skip_location = Callback::new(move |_: ()| skip_location());

    view! {
        <Title text="Sign In | Happy Pets"/>
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-6">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">"Welcome back"</h2>
                    <p class="mt-2 text-center text-sm text-fg-muted">"Sign in to Happy Pets"</p>
                </div>
                <StatusBanner status=status/>
                <LoginForm form=form pending=pending on_submit=handle_submit/>
                {config::google_client_id().map(|client_id| {
                    view! {
                        <div class="text-center text-sm text-fg-muted">"or"</div>
                        <GoogleSignIn client_id=client_id on_credential=on_google_credential/>
                    }
                })}
                <p class="text-center text-sm text-fg-muted">
                    "New here? "
                    <a href="/register" class="font-medium text-action-primary-bg">"Join Now"</a>
                </p>
            </div>
        </div>
        <Show when=move || vm.show_location_prompt.get()>
            <LocationPrompt
                pending=location_action.pending()
                on_allow=on_allow_location
                on_skip=on_skip_location
            />
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::LoginPanel;
    use crate::test_support::{helpers::provide_logged_out_store, ssr::render_to_string};
    use leptos::*;

    #[test]
    fn login_panel_renders_form_and_remember_me() {
        let html = render_to_string(move || {
            provide_logged_out_store();
            view! { <LoginPanel/> }
        });
        assert!(html.contains("Remember me"));
        assert!(html.contains("Sign In"));
        assert!(!html.contains("Share your location?"));
        assert!(!html.contains("g_id_onload"));
    }
}
