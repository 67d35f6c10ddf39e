use serde::{Deserialize, Serialize};

/// Uniform response envelope returned by every portal endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Editable site-wide configuration record
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SiteSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    // General
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub favicon_url: Option<String>,

    // Contact
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub address: String,

    // Social
    #[serde(default)]
    pub facebook_url: String,
    #[serde(default)]
    pub twitter_url: String,
    #[serde(default)]
    pub instagram_url: String,

    // SEO
    #[serde(default)]
    pub meta_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub meta_keywords: String,

    // Advanced
    #[serde(default)]
    pub analytics_id: String,
    #[serde(default)]
    pub copyright_text: String,
    #[serde(default)]
    pub maintenance_mode: bool,
}

/// Public, unauthenticated subset of the site settings shown in the header
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PublicSiteInfo {
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn is_elevated(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// Signed-in identity persisted between page loads
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.user.role.is_elevated()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Payload of a successful login envelope
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginPayload {
    pub token: String,
    pub user: User,
}

impl From<LoginPayload> for Session {
    fn from(payload: LoginPayload) -> Self {
        Session {
            token: payload.token,
            user: payload.user,
        }
    }
}

/// Payload of a successful upload envelope
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UploadPayload {
    pub url: String,
}
