use leptos::*;

/// Offered once after login when the backend has no location on file.
#[component]
pub fn LocationPrompt(
    #[prop(into)] pending: Signal<bool>,
    on_allow: Callback<()>,
    on_skip: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="location-modal-overlay fixed inset-0 flex items-center justify-center bg-black/40">
            <div class="location-modal max-w-sm rounded-lg bg-surface-elevated p-6 shadow-lg">
                <h3 class="text-lg font-semibold text-fg">"Share your location?"</h3>
                <p class="mt-2 text-sm text-fg-muted">
                    "We'd like to access your location to show nearby pet spas, vets and parks."
                </p>
                <div class="location-modal-actions mt-4 flex justify-end space-x-2">
                    <button
                        type="button"
                        class="px-4 py-2 text-sm rounded-md border border-border text-fg"
                        on:click=move |_| on_skip.call(())
                    >
                        "Not now"
                    </button>
                    <button
                        type="button"
                        class="px-4 py-2 text-sm rounded-md text-action-primary-text bg-action-primary-bg disabled:opacity-50"
                        disabled=move || pending.get()
                        on:click=move |_| on_allow.call(())
                    >
                        {move || if pending.get() { "Locating..." } else { "Allow" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
