use gloo_storage::errors::StorageError as GlooStorageError;
use gloo_storage::{LocalStorage, Storage};
use std::cell::RefCell;
use tracing::{info, warn};

use crate::services::client::Session;
use crate::services::errors::StorageError;

/// localStorage key holding the signed-in session
pub const SESSION_STORAGE_KEY: &str = "portal_session";

/// Explicit load/save/clear over wherever the session is persisted
pub trait SessionStore {
    fn load(&self) -> Result<Option<Session>, StorageError>;
    fn save(&self, session: &Session) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Session persisted in the browser's localStorage
pub struct LocalSessionStore {
    storage_key: String,
}

impl LocalSessionStore {
    pub fn new(storage_key: &str) -> Self {
        Self {
            storage_key: storage_key.to_string(),
        }
    }
}

impl Default for LocalSessionStore {
    fn default() -> Self {
        Self::new(SESSION_STORAGE_KEY)
    }
}

impl SessionStore for LocalSessionStore {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        match LocalStorage::get::<Session>(&self.storage_key) {
            Ok(session) => Ok(Some(session)),
            Err(GlooStorageError::KeyNotFound(_)) => Ok(None),
            Err(GlooStorageError::SerdeError(e)) => {
                // Written by an older build or edited by hand
                warn!("Discarding unreadable stored session: {}", e);
                LocalStorage::delete(&self.storage_key);
                Ok(None)
            }
            Err(GlooStorageError::JsError(e)) => Err(StorageError::BackendUnavailable {
                backend: format!("localStorage ({})", e),
            }),
        }
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        LocalStorage::set(&self.storage_key, session).map_err(|e| {
            StorageError::OperationFailed {
                operation: "save session".to_string(),
                reason: format!("{:?}", e),
            }
        })?;
        info!("Session stored for user {}", session.user.id);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        LocalStorage::delete(&self.storage_key);
        info!("Session cleared");
        Ok(())
    }
}

/// Session kept in memory as its serialized form, mirroring localStorage.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: RefCell<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: &Session) -> Self {
        let store = Self::new();
        // serializing a plain record cannot fail
        *store.slot.borrow_mut() = serde_json::to_string(session).ok();
        store
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        match self.slot.borrow().as_deref() {
            Some(json) => serde_json::from_str(json).map(Some).map_err(|e| {
                StorageError::OperationFailed {
                    operation: "load session".to_string(),
                    reason: e.to_string(),
                }
            }),
            None => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        let json = serde_json::to_string(session).map_err(|e| StorageError::OperationFailed {
            operation: "save session".to_string(),
            reason: e.to_string(),
        })?;
        *self.slot.borrow_mut() = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}
