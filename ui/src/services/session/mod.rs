pub mod context;
pub mod store;

pub use context::{use_session, SessionContext, SessionProvider};
pub use store::{LocalSessionStore, MemorySessionStore, SessionStore, SESSION_STORAGE_KEY};
