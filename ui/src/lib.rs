//! Browser UI of the news portal administration: site settings, sign-in and
//! registration, the site header and the rich-text editor.

pub mod app;
pub use app::{HomePage, LoginPage, PortalApp, RegisterPage, SettingsPage};

pub mod components;
pub mod features;
pub mod services;
pub mod utils;
