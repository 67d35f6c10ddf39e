//! Infrastructure Services
//!
//! - **client**: portal API trait, reqwest client and wire records
//! - **session**: persisted session store and the shared session context
//! - **config**: portal configuration and defaults
//! - **errors**: the user-facing error taxonomy
//!
//! The services are WASM-first, using browser APIs and async traits
//! without Send bounds.

pub mod client;
pub mod config;
pub mod errors;
pub mod session;
