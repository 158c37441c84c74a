use crate::{components::layout::Layout, state::auth::use_auth};
use leptos::*;
use leptos_meta::Title;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let greeting = move || {
        auth.get()
            .user
            .filter(|_| auth.get().is_authenticated)
            .map(|user| format!("Welcome back, {}!", user.username))
            .unwrap_or_else(|| "Everything your pet needs, in one place.".to_string())
    };
    view! {
        <Title text="Happy Pets"/>
        <Layout>
            <div class="py-12 text-center">
                <h1 class="text-4xl font-extrabold text-fg sm:text-5xl">"Happy Pets"</h1>
                <p class="mt-3 max-w-md mx-auto text-base text-fg-muted sm:text-lg">{greeting}</p>
                <Show when=move || !auth.get().is_authenticated>
                    <div class="mt-6 flex justify-center space-x-3">
                        <a href="/login" class="px-8 py-3 rounded-md text-action-primary-text bg-action-primary-bg">
                            "Get Started"
                        </a>
                    </div>
                </Show>
            </div>
        </Layout>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::HomePage;
    use crate::test_support::{
        helpers::{provide_logged_in_store, provide_logged_out_store},
        ssr::render_to_string,
    };
    use leptos::*;

    #[test]
    fn home_greets_signed_in_user() {
        let html = render_to_string(move || {
            provide_logged_in_store();
            view! { <HomePage/> }
        });
        assert!(html.contains("Welcome back, bella!"));
        assert!(!html.contains("Get Started"));
    }

    #[test]
    fn home_invites_guests_to_sign_in() {
        let html = render_to_string(move || {
            provide_logged_out_store();
            view! { <HomePage/> }
        });
        assert!(html.contains("Get Started"));
    }
}
