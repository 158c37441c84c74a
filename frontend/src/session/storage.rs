use std::{cell::RefCell, collections::HashMap, rc::Rc};

use thiserror::Error;
use web_sys::Storage;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("{0} is not available")]
    Unavailable(&'static str),
    #[error("failed to {op} `{key}`: {message}")]
    Access {
        op: &'static str,
        key: String,
        message: String,
    },
}

impl StorageError {
    fn access(op: &'static str, key: &str, err: wasm_bindgen::JsValue) -> Self {
        Self::Access {
            op,
            key: key.to_string(),
            message: format!("{:?}", err),
        }
    }
}

/// Where a write lands. Reads never take a scope; they always try
/// durable first and fall back to session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Survives restarts, shared by every tab of the origin.
    Durable,
    /// Cleared when the tab closes.
    Session,
}

impl Scope {
    pub fn from_remember(remember: bool) -> Self {
        if remember {
            Scope::Durable
        } else {
            Scope::Session
        }
    }

    pub const READ_ORDER: [Scope; 2] = [Scope::Durable, Scope::Session];
}

/// One key/value storage area, shaped after the Web Storage API.
pub trait StorageArea {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// `localStorage` / `sessionStorage` backed area.
#[derive(Clone)]
pub struct BrowserStorage {
    inner: Storage,
}

impl BrowserStorage {
    pub fn new(inner: Storage) -> Self {
        Self { inner }
    }

    pub fn raw(&self) -> &Storage {
        &self.inner
    }
}

impl StorageArea for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::access("read", key, e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::access("write", key, e))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner
            .remove_item(key)
            .map_err(|e| StorageError::access("remove", key, e))
    }
}

/// In-process area used off the browser and in tests. Clones share the
/// same map, so a test can keep a handle and inspect or clear one scope.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&self) {
        self.items.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl StorageArea for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remember_flag_selects_scope() {
        assert_eq!(Scope::from_remember(true), Scope::Durable);
        assert_eq!(Scope::from_remember(false), Scope::Session);
        assert_eq!(Scope::READ_ORDER[0], Scope::Durable);
    }

    #[test]
    fn memory_storage_clones_share_items() {
        let area = MemoryStorage::new();
        let handle = area.clone();
        area.set_item("access", "tok").unwrap();
        assert_eq!(handle.get_item("access").unwrap().as_deref(), Some("tok"));

        handle.remove_item("access").unwrap();
        assert!(area.get_item("access").unwrap().is_none());

        area.set_item("user", "{}").unwrap();
        handle.clear();
        assert!(area.is_empty());
    }

    #[test]
    fn storage_error_messages_name_the_key() {
        let err = StorageError::Access {
            op: "write",
            key: "user".into(),
            message: "QuotaExceededError".into(),
        };
        assert_eq!(err.to_string(), "failed to write `user`: QuotaExceededError");
        assert_eq!(
            StorageError::Unavailable("localStorage").to_string(),
            "localStorage is not available"
        );
    }
}
