use crate::{
    components::{layout::Layout, status::StatusBanner},
    pages::profile::{
        components::{avatar::AvatarPicker, form::ProfileForm},
        utils::validate_profile,
        view_model::use_profile_view_model,
    },
    state::{auth::use_auth, profile::ProfileSubmission},
    utils::navigation::{go_to, login_redirect_url},
};
use leptos::{ev::SubmitEvent, Callback, *};
use leptos_meta::Title;

#[component]
pub fn ProfilePanel() -> impl IntoView {
    let vm = use_profile_view_model();
    let auth = use_auth();
    let email = Signal::derive(move || {
        auth.get()
            .user
            .map(|user| user.email)
            .unwrap_or_default()
    });
    let update_action = vm.update_action;
    let pending = update_action.pending();

    let handle_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        if !vm.has_token() {
            go_to(&login_redirect_url("/profile"));
            return;
        }
        let form = vm.form.to_request();
        if let Err(msg) = validate_profile(&form) {
            vm.status.failure(msg);
            return;
        }
        vm.status.clear();
        update_action.dispatch(ProfileSubmission {
            form,
            avatar: vm.selected_avatar.get_untracked(),
        });
    });
    let on_file = Callback::new(move |file: web_sys::File| vm.avatar_action.dispatch(file));

    view! {
        <Title text="My Profile | Happy Pets"/>
        <Layout>
            <div class="max-w-xl mx-auto bg-surface-elevated shadow rounded-lg p-6 space-y-6">
                <h2 class="text-2xl font-bold text-fg">"My Profile"</h2>
                <StatusBanner status=vm.status/>
                <AvatarPicker preview=vm.avatar_preview on_file=on_file/>
                <ProfileForm form=vm.form email=email pending=pending on_submit=handle_submit/>
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::ProfilePanel;
    use crate::test_support::{helpers::provide_logged_in_store, ssr::render_to_string};
    use leptos::*;

    #[test]
    fn profile_panel_prefills_cached_profile() {
        let html = render_to_string(move || {
            provide_logged_in_store();
            view! { <ProfilePanel/> }
        });
        assert!(html.contains("My Profile"));
        assert!(html.contains("Save Changes"));
        assert!(html.contains("http://host/media/avatars/bella.png"));
    }
}
