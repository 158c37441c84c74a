use crate::{
    state::auth::{use_auth, use_logout},
    utils::navigation::{go_to, login_redirect_url},
};
use leptos::*;

/// Drawer with the user card and account links.
#[component]
pub fn Sidebar(
    #[prop(into)] open: MaybeSignal<bool>,
    #[prop(optional)] on_close: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth();
    let logout = use_logout();
    let navigate = move |path: String| {
        if let Some(on_close) = on_close {
            on_close.call(());
        }
        go_to(&path);
    };
    let on_profile = move |_| navigate(profile_target(auth.get_untracked().is_authenticated));
    let on_logout = move |_| {
        logout.call(());
        navigate("/".to_string());
    };

    view! {
        <aside class=move || if open.get() { "sidebar open" } else { "sidebar" }>
            <div class="p-4 border-b border-border">
                {move || match auth.get().user {
                    Some(user) => view! {
                        <div class="flex items-center space-x-3">
                            <img
                                src=user.avatar_or_default().to_string()
                                alt="avatar"
                                class="h-12 w-12 rounded-full object-cover"
                            />
                            <div>
                                <h4 class="font-semibold text-fg">{user.username.clone()}</h4>
                                <p class="text-sm text-fg-muted">{user.email.clone()}</p>
                            </div>
                        </div>
                    }
                    .into_view(),
                    None => view! { <h4 class="font-semibold text-fg">"Welcome, Guest!"</h4> }.into_view(),
                }}
            </div>
            <nav class="flex flex-col p-2 space-y-1">
                <button class="sidebar-item" on:click=move |_| navigate("/".to_string())>
                    "Home"
                </button>
                <Show
                    when=move || auth.get().user.is_some()
                    fallback=move || {
                        view! {
                            <button class="sidebar-item" on:click=move |_| navigate("/login".to_string())>
                                "Login"
                            </button>
                        }
                    }
                >
                    <button class="sidebar-item" on:click=on_profile>
                        "My Profile"
                    </button>
                    <button class="sidebar-item text-status-error-text" on:click=on_logout>
                        "Logout"
                    </button>
                </Show>
            </nav>
        </aside>
    }
}

/// A cached profile without tokens still routes through the login page.
fn profile_target(is_authenticated: bool) -> String {
    if is_authenticated {
        "/profile".to_string()
    } else {
        login_redirect_url("/profile")
    }
}
