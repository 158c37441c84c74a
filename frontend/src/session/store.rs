use std::rc::Rc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{
    cross_tab::CrossTabListener,
    notify::{ChangeNotifier, Subscription},
    profile::UserProfile,
    storage::{MemoryStorage, Scope, StorageArea},
};
use crate::config;

pub const ACCESS_KEY: &str = "access";
pub const REFRESH_KEY: &str = "refresh";
pub const USER_KEY: &str = "user";
pub const SESSION_KEYS: [&str; 3] = [ACCESS_KEY, REFRESH_KEY, USER_KEY];

/// Authentication state and cached profile, mirrored across the durable
/// and session storage scopes.
///
/// Reads try durable, then session. Tokens are written to the one scope
/// picked by "remember me"; the profile is written to both. Every mutation
/// raises the change notification, which all clones share.
///
/// No operation fails: storage and decoding problems are logged and read
/// back as absence.
#[derive(Clone)]
pub struct SessionStore {
    durable: Rc<dyn StorageArea>,
    session: Rc<dyn StorageArea>,
    notifier: ChangeNotifier,
    backend_origin: Rc<str>,
}

impl SessionStore {
    pub fn new(
        durable: Rc<dyn StorageArea>,
        session: Rc<dyn StorageArea>,
        backend_origin: impl Into<String>,
    ) -> Self {
        let backend_origin: String = backend_origin.into();
        Self {
            durable,
            session,
            notifier: ChangeNotifier::new(),
            backend_origin: backend_origin.into(),
        }
    }

    pub fn in_memory(backend_origin: impl Into<String>) -> Self {
        Self::new(
            Rc::new(MemoryStorage::new()),
            Rc::new(MemoryStorage::new()),
            backend_origin,
        )
    }

    /// Store over `localStorage`/`sessionStorage`, falling back to memory
    /// when the browser refuses storage access (e.g. disabled cookies).
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        use super::storage::BrowserStorage;
        use crate::utils::storage as storage_utils;

        let origin = config::backend_origin(&config::api_base_url());
        match (storage_utils::local_storage(), storage_utils::session_storage()) {
            (Ok(durable), Ok(session)) => Self::new(
                Rc::new(BrowserStorage::new(durable)),
                Rc::new(BrowserStorage::new(session)),
                origin,
            ),
            (Err(err), _) | (_, Err(err)) => {
                log::warn!("Browser storage unavailable, session will not persist: {}", err);
                Self::in_memory(origin)
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn browser() -> Self {
        Self::in_memory(config::backend_origin(&config::api_base_url()))
    }

    pub fn backend_origin(&self) -> &str {
        &self.backend_origin
    }

    /// Registers an observer of the in-process change signal.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.notifier.subscribe(listener)
    }

    pub fn subscriber_count(&self) -> usize {
        self.notifier.subscriber_count()
    }

    /// Registers `listener` on both channels: the in-process change signal
    /// and, in the browser, the cross-tab `storage` event (which only fires
    /// for durable writes made by other tabs).
    pub fn observe(&self, listener: impl Fn() + Clone + 'static) -> SessionObserver {
        SessionObserver {
            _subscription: self.notifier.subscribe(listener.clone()),
            _cross_tab: CrossTabListener::attach(listener),
        }
    }

    pub fn save_tokens(&self, access: Option<&str>, refresh: Option<&str>, remember: bool) {
        let scope = Scope::from_remember(remember);
        if let Some(access) = access {
            self.write(scope, ACCESS_KEY, access);
        }
        if let Some(refresh) = refresh {
            self.write(scope, REFRESH_KEY, refresh);
        }
        self.notifier.notify();
    }

    /// Shallow-merges `patch` into the cached profile and writes the result
    /// to both scopes. Empty or non-object patches are ignored.
    pub fn save_user<P: Serialize + ?Sized>(&self, patch: &P) {
        let patch = match serde_json::to_value(patch) {
            Ok(Value::Object(map)) if !map.is_empty() => map,
            Ok(_) => return,
            Err(err) => {
                log::warn!("Ignoring unserializable profile update: {}", err);
                return;
            }
        };

        let mut merged = self.cached_user_fields().unwrap_or_default();
        merged.extend(patch);
        normalize_avatar(&mut merged, &self.backend_origin);

        let text = Value::Object(merged).to_string();
        self.write(Scope::Durable, USER_KEY, &text);
        self.write(Scope::Session, USER_KEY, &text);
        self.notifier.notify();
    }

    pub fn get_user(&self) -> Option<UserProfile> {
        let raw = self.read(USER_KEY)?;
        match serde_json::from_str::<Option<UserProfile>>(&raw) {
            Ok(user) => user,
            Err(err) => {
                log::warn!("Discarding malformed cached user: {}", err);
                None
            }
        }
    }

    pub fn get_token(&self) -> Option<String> {
        self.read(ACCESS_KEY)
    }

    pub fn get_refresh_token(&self) -> Option<String> {
        self.read(REFRESH_KEY)
    }

    /// Requires both a cached user and an access token.
    pub fn is_logged_in(&self) -> bool {
        self.get_user().is_some() && self.get_token().is_some()
    }

    pub fn logout(&self) {
        for scope in Scope::READ_ORDER {
            let area = self.area(scope);
            for key in SESSION_KEYS {
                if let Err(err) = area.remove_item(key) {
                    log::error!("Failed to clear {:?} session state: {}", scope, err);
                }
            }
        }
        self.notifier.notify();
    }

    fn area(&self, scope: Scope) -> &dyn StorageArea {
        match scope {
            Scope::Durable => self.durable.as_ref(),
            Scope::Session => self.session.as_ref(),
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        Scope::READ_ORDER.into_iter().find_map(|scope| {
            match self.area(scope).get_item(key) {
                Ok(value) => value.filter(|value| !value.is_empty()),
                Err(err) => {
                    log::warn!("Failed to read {:?} session state: {}", scope, err);
                    None
                }
            }
        })
    }

    fn write(&self, scope: Scope, key: &str, value: &str) {
        if let Err(err) = self.area(scope).set_item(key, value) {
            log::error!("Failed to persist {:?} session state: {}", scope, err);
        }
    }

    fn cached_user_fields(&self) -> Option<Map<String, Value>> {
        let raw = self.read(USER_KEY)?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => None,
            Err(err) => {
                log::warn!("Replacing malformed cached user: {}", err);
                None
            }
        }
    }
}

/// Both channel registrations of one mounted observer; dropping it
/// unsubscribes from each.
pub struct SessionObserver {
    _subscription: Subscription,
    _cross_tab: Option<CrossTabListener>,
}

fn normalize_avatar(fields: &mut Map<String, Value>, backend_origin: &str) {
    if let Some(Value::String(avatar)) = fields.get_mut("avatar") {
        if avatar.starts_with('/') {
            *avatar = format!("{}{}", backend_origin, avatar);
        }
    }
}
