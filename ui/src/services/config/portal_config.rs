//! Portal configuration
//!
//! Groups the API address, upload ceilings, UI timings and editor limits in
//! one serializable record. Defaults are compiled in; the API address can be
//! overridden at build time (`PORTAL_API_URL`) and any field at runtime via a
//! `portal_config` JSON entry in localStorage.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

pub const DEFAULT_USER_AGENT: &str = concat!("news-portal-admin/", env!("CARGO_PKG_VERSION"));

/// Key under which a JSON override of the configuration may be stored.
pub const CONFIG_STORAGE_KEY: &str = "portal_config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub api: ApiConfig,
    pub uploads: UploadConfig,
    pub ui: UiConfig,
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base address every request path is joined to
    pub base_url: String,
    /// Client identification sent with every request
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub logo_max_bytes: u64,
    pub favicon_max_bytes: u64,
    pub allowed_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long success/error flash messages stay visible
    pub flash_timeout_ms: u32,
    /// Delay between a successful login/registration and the redirect
    pub redirect_delay_ms: u32,
    /// Vertical scroll offset past which the header condenses
    pub scroll_threshold_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub history_limit: usize,
    pub max_image_bytes: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            uploads: UploadConfig::default(),
            ui: UiConfig::default(),
            editor: EditorConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("PORTAL_API_URL")
                .unwrap_or(DEFAULT_API_BASE_URL)
                .to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            logo_max_bytes: 2 * 1024 * 1024,  // 2MB
            favicon_max_bytes: 512 * 1024,    // 512KB
            allowed_types: [
                "image/jpeg",
                "image/png",
                "image/gif",
                "image/webp",
                "image/svg+xml",
                "image/x-icon",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            flash_timeout_ms: 3000,
            redirect_delay_ms: 1500,
            scroll_threshold_px: 50.0,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: 100,
            max_image_bytes: 5 * 1024 * 1024, // 5MB
        }
    }
}

impl PortalConfig {
    /// Apply a JSON override on top of the defaults. Missing fields keep
    /// their default values.
    pub fn from_override_json(json: &str) -> Result<Self, String> {
        let config: PortalConfig =
            serde_json::from_str(json).map_err(|e| format!("Invalid config override: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api.base_url.trim().is_empty() {
            return Err("api.base_url must not be empty".to_string());
        }

        if self.api.user_agent.trim().is_empty() {
            return Err("api.user_agent must not be empty".to_string());
        }

        if self.uploads.logo_max_bytes == 0 || self.uploads.favicon_max_bytes == 0 {
            return Err("upload size limits must be greater than 0".to_string());
        }

        if self.uploads.allowed_types.is_empty() {
            return Err("uploads.allowed_types must not be empty".to_string());
        }

        if self.editor.history_limit == 0 {
            return Err("editor.history_limit must be greater than 0".to_string());
        }

        if self.editor.max_image_bytes == 0 {
            return Err("editor.max_image_bytes must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl UploadConfig {
    pub fn allows(&self, mime: &str) -> bool {
        self.allowed_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(mime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PortalConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.uploads.logo_max_bytes > config.uploads.favicon_max_bytes);
        assert!(config.uploads.allows("image/PNG"));
        assert!(!config.uploads.allows("application/pdf"));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config =
            PortalConfig::from_override_json(r#"{"api":{"base_url":"https://cms.example.com/api"}}"#)
                .unwrap();
        assert_eq!(config.api.base_url, "https://cms.example.com/api");
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_invalid_override_rejected() {
        assert!(PortalConfig::from_override_json(r#"{"api":{"base_url":"  "}}"#).is_err());
        assert!(PortalConfig::from_override_json(r#"{"editor":{"history_limit":0}}"#).is_err());
        assert!(PortalConfig::from_override_json("not json").is_err());
    }

    #[test]
    fn test_zero_image_limit_rejected() {
        let error =
            PortalConfig::from_override_json(r#"{"editor":{"max_image_bytes":0}}"#).unwrap_err();
        assert!(error.contains("max_image_bytes"));
        assert!(PortalConfig::from_override_json(r#"{"uploads":{"logo_max_bytes":0}}"#).is_err());
    }

    #[test]
    fn test_user_agent_defaults_and_overrides() {
        assert!(PortalConfig::default()
            .api
            .user_agent
            .starts_with("news-portal-admin/"));

        let config = PortalConfig::from_override_json(r#"{"api":{"user_agent":"desk/2"}}"#).unwrap();
        assert_eq!(config.api.user_agent, "desk/2");
        assert_eq!(config.api.base_url, ApiConfig::default().base_url);

        assert!(PortalConfig::from_override_json(r#"{"api":{"user_agent":""}}"#).is_err());
    }
}
