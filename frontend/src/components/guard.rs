use crate::{
    state::auth::use_auth,
    utils::navigation::{current_path, go_to, login_redirect_url},
};
use leptos::*;

/// Renders `children` only for a signed-in user. Anyone else is sent to the
/// login page with the current path as the `redirect` target.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    create_effect(move |_| {
        if is_authenticated.get() {
            return;
        }
        let path = current_path().unwrap_or_else(|| "/".to_string());
        go_to(&login_redirect_url(&path));
    });
    view! {
        <Show when=move || should_render_children(is_authenticated.get())>
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool) -> bool {
    is_authenticated
}

#[cfg(test)]
mod tests {
    use super::should_render_children;

    #[test]
    fn guard_blocks_until_authenticated() {
        assert!(!should_render_children(false));
        assert!(should_render_children(true));
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::RequireAuth;
    use crate::test_support::helpers::{
        logged_in_store, provide_logged_in_store, provide_logged_out_store, provide_store,
    };
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn require_auth_renders_children_when_authenticated() {
        let html = render_to_string(move || {
            provide_logged_in_store();
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_hides_children_when_unauthenticated() {
        let html = render_to_string(move || {
            provide_logged_out_store();
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn require_auth_needs_a_token_not_just_a_cached_user() {
        let html = render_to_string(move || {
            let store = logged_in_store();
            store.logout();
            store.save_user(&serde_json::json!({ "username": "bella" }));
            provide_store(store);
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
    }
}
