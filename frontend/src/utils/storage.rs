use web_sys::{Storage, Window};

use crate::session::StorageError;

pub fn window() -> Result<Window, StorageError> {
    web_sys::window().ok_or(StorageError::Unavailable("window"))
}

pub fn local_storage() -> Result<Storage, StorageError> {
    window()?
        .local_storage()
        .map_err(|_| StorageError::Unavailable("localStorage"))?
        .ok_or(StorageError::Unavailable("localStorage"))
}

pub fn session_storage() -> Result<Storage, StorageError> {
    window()?
        .session_storage()
        .map_err(|_| StorageError::Unavailable("sessionStorage"))?
        .ok_or(StorageError::Unavailable("sessionStorage"))
}
