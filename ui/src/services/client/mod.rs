// Client-side access to the portal service
//
// - api: the `PortalApi` trait every flow is written against
// - portal_client: reqwest implementation with bearer-token support
// - types: envelope, settings, session and request records

pub mod api;
pub mod portal_client;
pub mod types;

#[cfg(test)]
pub mod recording;

pub use api::PortalApi;
pub use portal_client::PortalClient;
pub use types::{
    ApiEnvelope, LoginPayload, LoginRequest, PublicSiteInfo, RegisterRequest, Session,
    SiteSettings, UploadPayload, User, UserRole,
};
