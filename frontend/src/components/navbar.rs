use crate::{
    session::UserProfile,
    state::auth::{use_auth, use_logout},
    utils::navigation::go_to,
};
use leptos::*;

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let logout = use_logout();
    let (menu_open, set_menu_open) = create_signal(false);
    let user = create_memo(move |_| auth.get().user);
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);

    let on_logout = move |_| {
        set_menu_open.set(false);
        logout.call(());
        go_to("/");
    };
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);

    view! {
        <nav class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <a href="/" class="flex items-center text-xl font-semibold text-fg">
                        "Happy Pets"
                    </a>
                    <div class="hidden md:flex space-x-4">
                        <a href="/" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                            "Home"
                        </a>
                    </div>
                    <Show
                        when=move || is_authenticated.get()
                        fallback=|| {
                            view! {
                                <div class="flex items-center space-x-2">
                                    <a href="/login" class="px-4 py-2 text-sm font-medium rounded-md border border-border text-fg">
                                        "Sign In"
                                    </a>
                                    <a href="/register" class="px-4 py-2 text-sm font-medium rounded-md text-action-primary-text bg-action-primary-bg">
                                        "Join Now"
                                    </a>
                                </div>
                            }
                        }
                    >
                        <div class="relative">
                            <button
                                type="button"
                                class="flex items-center rounded-full"
                                on:click=toggle_menu
                                aria-expanded=move || menu_open.get()
                                aria-controls="user-menu"
                            >
                                {move || user.get().map(|user| view! { <UserAvatar user=user /> })}
                            </button>
                            <Show when=move || menu_open.get()>
                                <div id="user-menu" class="absolute right-0 mt-2 w-56 rounded-md shadow-lg bg-surface-elevated border border-border">
                                    <div class="px-4 py-3">
                                        <p class="text-sm font-medium text-fg">
                                            {move || display_name(user.get().as_ref())}
                                        </p>
                                        <p class="text-sm text-fg-muted truncate">
                                            {move || user.get().map(|user| user.email).unwrap_or_default()}
                                        </p>
                                    </div>
                                    <a
                                        href="/profile"
                                        class="block px-4 py-2 text-sm text-fg hover:bg-action-ghost-bg-hover"
                                        on:click=move |_| set_menu_open.set(false)
                                    >
                                        "My Profile"
                                    </a>
                                    <button
                                        type="button"
                                        class="block w-full text-left px-4 py-2 text-sm text-status-error-text hover:bg-action-ghost-bg-hover"
                                        on:click=on_logout
                                    >
                                        "Sign Out"
                                    </button>
                                </div>
                            </Show>
                        </div>
                    </Show>
                </div>
            </div>
        </nav>
    }
}

/// Avatar image when one is cached, otherwise the initials badge.
#[component]
fn UserAvatar(user: UserProfile) -> impl IntoView {
    match user.avatar.clone().filter(|avatar| !avatar.is_empty()) {
        Some(src) => view! {
            <img src=src alt="avatar" class="h-9 w-9 rounded-full object-cover"/>
        }
        .into_view(),
        None => view! {
            <div class="h-9 w-9 rounded-full flex items-center justify-center bg-action-primary-bg text-action-primary-text text-sm font-semibold">
                {user.initials()}
            </div>
        }
        .into_view(),
    }
}

fn display_name(user: Option<&UserProfile>) -> String {
    user.map(|user| user.username.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("User")
        .to_string()
}
