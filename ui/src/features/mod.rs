//! Screen-level behavior kept free of rendering: validation, flows against
//! the portal API, settings form state and the rich-text document model.

pub mod auth;
pub mod editor;
pub mod header;
pub mod settings;
