//! Client-side session: tokens and the cached user profile, persisted to
//! browser storage and broadcast to every mounted observer.

mod cross_tab;
mod notify;
mod profile;
mod storage;
mod store;

pub use cross_tab::{CrossTabListener, StorageChange};
pub use notify::{ChangeNotifier, Subscription};
pub use profile::{ProfileId, ProfileUpdate, UserProfile, DEFAULT_AVATAR};
pub use storage::{BrowserStorage, MemoryStorage, Scope, StorageArea, StorageError};
pub use store::{SessionObserver, SessionStore, ACCESS_KEY, REFRESH_KEY, SESSION_KEYS, USER_KEY};
