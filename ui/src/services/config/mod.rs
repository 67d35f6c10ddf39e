mod portal_config;

use dioxus::prelude::*;
use gloo_storage::{LocalStorage, Storage};

use crate::console_warn;

pub use portal_config::*;

use std::sync::OnceLock;

static GLOBAL_CONFIG: OnceLock<PortalConfig> = OnceLock::new();

/// Get the global configuration, initialized once from compiled defaults
/// plus any localStorage override. Components read it through
/// [`use_portal_config`] instead.
pub fn get_global_config() -> PortalConfig {
    GLOBAL_CONFIG.get_or_init(load_config).clone()
}

/// Configuration provided by `PortalApp`.
pub fn use_portal_config() -> PortalConfig {
    use_context::<PortalConfig>()
}

fn load_config() -> PortalConfig {
    match LocalStorage::get::<String>(CONFIG_STORAGE_KEY) {
        Ok(json) => match PortalConfig::from_override_json(&json) {
            Ok(config) => config,
            Err(e) => {
                console_warn!("Ignoring configuration override: {}", e);
                PortalConfig::default()
            }
        },
        Err(_) => PortalConfig::default(),
    }
}
