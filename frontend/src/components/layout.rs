use crate::components::{navbar::Navbar, sidebar::Sidebar};
use leptos::*;

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let (sidebar_open, set_sidebar_open) = create_signal(false);
    let close_sidebar = Callback::new(move |_: ()| set_sidebar_open.set(false));
    view! {
        <div class="min-h-screen bg-surface">
            <Navbar/>
            <button
                type="button"
                class="md:hidden fixed bottom-4 left-4 rounded-full p-3 shadow bg-action-primary-bg text-action-primary-text"
                on:click=move |_| set_sidebar_open.update(|open| *open = !*open)
                aria-expanded=move || sidebar_open.get()
            >
                <span class="sr-only">"Menu"</span>
                "☰"
            </button>
            <Sidebar open=sidebar_open on_close=close_sidebar/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                {children()}
            </main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <p class="text-sm">{message}</p>
        </div>
    }
}
