use gloo_timers::future::TimeoutFuture;
use leptos::*;

/// Status messages disappear after this long.
pub const MESSAGE_TIMEOUT_MS: u32 = 4_000;

/// Success and error banners that clear themselves.
#[derive(Clone, Copy)]
pub struct StatusMessages {
    pub message: RwSignal<Option<String>>,
    pub error: RwSignal<Option<String>>,
    generation: StoredValue<u64>,
}

impl StatusMessages {
    pub fn new() -> Self {
        Self {
            message: create_rw_signal(None),
            error: create_rw_signal(None),
            generation: store_value(0),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.error.set(None);
        self.message.set(Some(text.into()));
        self.clear_later();
    }

    pub fn failure(&self, text: impl Into<String>) {
        self.message.set(None);
        self.error.set(Some(text.into()));
        self.clear_later();
    }

    pub fn clear(&self) {
        self.message.set(None);
        self.error.set(None);
    }

    // A newer message restarts the countdown.
    fn clear_later(&self) {
        self.generation.update_value(|generation| *generation += 1);
        let scheduled = self.generation.get_value();
        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(MESSAGE_TIMEOUT_MS).await;
            if this.generation.get_value() == scheduled {
                this.clear();
            }
        });
    }
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn StatusBanner(status: StatusMessages) -> impl IntoView {
    view! {
        <Show when=move || status.error.get().is_some()>
            <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded">
                {move || status.error.get().unwrap_or_default()}
            </div>
        </Show>
        <Show when=move || status.message.get().is_some()>
            <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded">
                {move || status.message.get().unwrap_or_default()}
            </div>
        </Show>
    }
}
