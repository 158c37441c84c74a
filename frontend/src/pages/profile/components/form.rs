use crate::pages::profile::utils::ProfileFormState;
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn ProfileForm(
    form: ProfileFormState,
    #[prop(into)] email: Signal<String>,
    #[prop(into)] pending: Signal<bool>,
    on_submit: Callback<SubmitEvent>,
) -> impl IntoView {
    let field = "mt-1 block w-full px-3 py-2 border border-border rounded-md text-fg";
    view! {
        <form class="space-y-4" on:submit=move |ev| on_submit.call(ev)>
            <div>
                <label for="username" class="block text-sm font-medium text-fg">"Username"</label>
                <input
                    id="username"
                    name="username"
                    type="text"
                    class=field
                    prop:value=form.username
                    on:input=move |ev| form.username.set(event_target_value(&ev))
                />
            </div>
            <div>
                <label for="email" class="block text-sm font-medium text-fg">"Email"</label>
                <input id="email" type="email" class=field prop:value=email disabled/>
            </div>
            <div>
                <label for="phone" class="block text-sm font-medium text-fg">"Phone"</label>
                <input
                    id="phone"
                    name="phone"
                    type="tel"
                    class=field
                    prop:value=form.phone
                    on:input=move |ev| form.phone.set(event_target_value(&ev))
                />
            </div>
            <div>
                <label for="location" class="block text-sm font-medium text-fg">"Location"</label>
                <input
                    id="location"
                    name="location"
                    type="text"
                    class=field
                    prop:value=form.location
                    on:input=move |ev| form.location.set(event_target_value(&ev))
                />
            </div>
            <button
                type="submit"
                disabled=move || pending.get()
                class="w-full py-2 px-4 rounded-md text-sm font-medium text-action-primary-text bg-action-primary-bg disabled:opacity-50"
            >
                {move || if pending.get() { "Saving..." } else { "Save Changes" }}
            </button>
        </form>
    }
}
