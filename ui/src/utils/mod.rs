//! Utility Functions and Cross-Cutting Concerns
//!
//! - **console_macros**: WASM-compatible logging macros for browser console output
//! - **platform**: page navigation helpers
//! - **validation**: email and password checks with their feedback styling

pub mod console_macros;
pub mod platform;
pub mod validation;

pub use platform::*;
pub use validation::*;
