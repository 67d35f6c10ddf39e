//! Session context shared by every component that needs the signed-in user.

use dioxus::prelude::*;
use std::rc::Rc;

use super::store::{LocalSessionStore, SessionStore};
use crate::console_warn;
use crate::services::client::Session;
use crate::services::errors::StorageError;

/// Reactive view of the persisted session plus the store behind it.
///
/// Writes go to the store first and then to the signal, so every component
/// reading the signal re-renders with what was actually persisted.
#[derive(Clone)]
pub struct SessionContext {
    session: Signal<Option<Session>>,
    store: Rc<dyn SessionStore>,
}

impl SessionContext {
    pub fn new(store: Rc<dyn SessionStore>, session: Signal<Option<Session>>) -> Self {
        Self { session, store }
    }

    pub fn current(&self) -> Option<Session> {
        self.session.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.session
            .read()
            .as_ref()
            .map(Session::is_admin)
            .unwrap_or(false)
    }

    pub fn signal(&self) -> Signal<Option<Session>> {
        self.session
    }
}

impl SessionStore for SessionContext {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        let loaded = self.store.load()?;
        let mut session = self.session;
        session.set(loaded.clone());
        Ok(loaded)
    }

    fn save(&self, value: &Session) -> Result<(), StorageError> {
        self.store.save(value)?;
        let mut session = self.session;
        session.set(Some(value.clone()));
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut session = self.session;
        session.set(None);
        self.store.clear()
    }
}

/// Get the session context provided by [`SessionProvider`].
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}

/// Provides the session context, loaded once from localStorage on mount.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let store = use_hook(|| Rc::new(LocalSessionStore::default()) as Rc<dyn SessionStore>);
    let initial_store = store.clone();
    let session = use_signal(move || match initial_store.load() {
        Ok(session) => session,
        Err(e) => {
            console_warn!("[Session] Could not read stored session: {}", e);
            None
        }
    });

    use_context_provider(|| SessionContext::new(store, session));

    rsx! {
        {children}
    }
}
