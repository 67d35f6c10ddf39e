pub mod pages;
pub mod portal_app;

pub use pages::*;
pub use portal_app::*;
