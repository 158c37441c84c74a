use crate::{
    components::status::StatusBanner,
    pages::register::{components::form::RegisterForm, view_model::use_register_view_model},
};
use leptos::{ev::SubmitEvent, Callback, *};
use leptos_meta::Title;

#[component]
pub fn RegisterPanel() -> impl IntoView {
    let vm = use_register_view_model();
    let pending = vm.register_action.pending();

    let handle_submit = Callback::new(move |ev: SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    });

    view! {
        <Title text="Join | Happy Pets"/>
        <div class="min-h-screen flex items-center justify-center bg-surface py-12 px-4 sm:px-6 lg:px-8">
            <div class="max-w-md w-full space-y-6">
                <div>
                    <h2 class="mt-6 text-center text-3xl font-extrabold text-fg">
                        "Join the Happy Pets Family"
                    </h2>
                    <p class="mt-2 text-center text-sm text-fg-muted">
                        "Create an account to connect with fellow pet lovers!"
                    </p>
                </div>
                <StatusBanner status=vm.status/>
                <RegisterForm vm=vm pending=pending on_submit=handle_submit/>
                <p class="text-center text-sm text-fg-muted">
                    "Already have an account? "
                    <a href="/login" class="font-medium text-action-primary-bg">"Login here"</a>
                </p>
            </div>
        </div>
    }
}
