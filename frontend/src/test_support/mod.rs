#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::session::SessionStore;
    use leptos::*;
    use serde_json::{json, Value};

    pub const TEST_ORIGIN: &str = "http://host";

    pub fn sample_user() -> Value {
        json!({
            "id": 7,
            "username": "bella",
            "email": "bella@example.com",
            "avatar": "/media/avatars/bella.png",
            "phone": "555-0101",
            "location": "Pune"
        })
    }

    pub fn logged_in_store() -> SessionStore {
        let store = SessionStore::in_memory(TEST_ORIGIN);
        store.save_tokens(Some("access-token"), Some("refresh-token"), true);
        store.save_user(&sample_user());
        store
    }

    /// Puts `store` in context the way `AuthProvider` does.
    pub fn provide_store(store: SessionStore) -> SessionStore {
        provide_context(store.clone());
        store
    }

    pub fn provide_logged_in_store() -> SessionStore {
        provide_store(logged_in_store())
    }

    pub fn provide_logged_out_store() -> SessionStore {
        provide_store(SessionStore::in_memory(TEST_ORIGIN))
    }
}
