use crate::pages::login::utils::LoginFormState;
use leptos::{ev::SubmitEvent, *};
use web_sys::HtmlInputElement;

#[component]
pub fn LoginForm(
    form: LoginFormState,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<SubmitEvent>,
) -> impl IntoView {
    view! {
        <form class="mt-8 space-y-6" on:submit=move |ev| on_submit.call(ev)>
            <div class="space-y-4">
                <div>
                    <label for="email" class="block text-sm font-medium text-fg">"Email"</label>
                    <input
                        id="email"
                        name="email"
                        type="email"
                        autocomplete="email"
                        class="mt-1 block w-full px-3 py-2 border border-border rounded-md text-fg"
                        placeholder="you@example.com"
                        prop:value=form.email
                        on:input=move |ev| form.email.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label for="password" class="block text-sm font-medium text-fg">"Password"</label>
                    <input
                        id="password"
                        name="password"
                        type="password"
                        autocomplete="current-password"
                        class="mt-1 block w-full px-3 py-2 border border-border rounded-md text-fg"
                        prop:value=form.password
                        on:input=move |ev| form.password.set(event_target_value(&ev))
                    />
                </div>
                <label class="remember-me flex items-center space-x-2 text-sm text-fg-muted">
                    <input
                        type="checkbox"
                        prop:checked=form.remember
                        on:change=move |ev| {
                            let target = event_target::<HtmlInputElement>(&ev);
                            form.remember.set(target.checked());
                        }
                    />
                    <span>"Remember me"</span>
                </label>
            </div>
            <button
                type="submit"
                disabled=move || pending.get()
                class="w-full flex justify-center py-2 px-4 rounded-md text-sm font-medium text-action-primary-text bg-action-primary-bg disabled:opacity-50"
            >
                {move || if pending.get() { "Signing in..." } else { "Sign In" }}
            </button>
        </form>
    }
}
