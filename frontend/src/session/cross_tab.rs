//! Second notification channel: the browser `storage` event.
//!
//! The platform raises it only in *other* tabs of the same origin and only
//! for `localStorage` writes, so it complements (never replaces) the
//! in-process [`ChangeNotifier`](super::ChangeNotifier). Observers that care
//! about the session register both.

use super::store::SESSION_KEYS;

/// What a `storage` event reported, reduced to what the filter needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    /// `None` when the other tab called `clear()`.
    pub key: Option<String>,
    /// Whether the event came from the durable (`localStorage`) area.
    pub durable: bool,
}

impl StorageChange {
    pub fn affects_session(&self) -> bool {
        if !self.durable {
            return false;
        }
        match self.key.as_deref() {
            None => true,
            Some(key) => SESSION_KEYS.contains(&key),
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use super::StorageChange;
    use crate::utils::storage as storage_utils;
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::{StorageEvent, Window};

    /// `storage` event registration on `window`. Removed on drop.
    pub struct CrossTabListener {
        window: Window,
        closure: Closure<dyn FnMut(StorageEvent)>,
    }

    impl CrossTabListener {
        pub fn attach(on_change: impl Fn() + 'static) -> Option<Self> {
            let window = storage_utils::window().ok()?;
            let durable: Option<JsValue> = storage_utils::local_storage().ok().map(Into::into);
            let closure = Closure::wrap(Box::new(move |event: StorageEvent| {
                let area: Option<JsValue> = event.storage_area().map(Into::into);
                let change = StorageChange {
                    key: event.key(),
                    durable: matches!((&area, &durable), (Some(a), Some(d)) if a == d),
                };
                if change.affects_session() {
                    on_change();
                }
            }) as Box<dyn FnMut(StorageEvent)>);
            if let Err(err) = window
                .add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref())
            {
                log::warn!("Failed to listen for storage events: {:?}", err);
                return None;
            }
            Some(Self { window, closure })
        }
    }

    impl Drop for CrossTabListener {
        fn drop(&mut self) {
            let _ = self.window.remove_event_listener_with_callback(
                "storage",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::CrossTabListener;

/// Off the browser there are no other tabs; attaching yields nothing.
#[cfg(not(target_arch = "wasm32"))]
pub struct CrossTabListener;

#[cfg(not(target_arch = "wasm32"))]
impl CrossTabListener {
    pub fn attach(_on_change: impl Fn() + 'static) -> Option<Self> {
        None
    }
}
