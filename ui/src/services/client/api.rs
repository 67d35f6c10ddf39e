use async_trait::async_trait;

use super::types::*;
use crate::features::settings::{AssetKind, UploadFile};
use crate::services::errors::{PortalError, PortalResult};

/// Every call the UI makes against the portal service
///
/// Implementations return the decoded envelope; a transport failure (no
/// response at all) is the only `Err` they produce. Interpreting the
/// `success` flag is left to callers via [`ApiEnvelope::into_result`].
#[async_trait(?Send)]
pub trait PortalApi {
    async fn fetch_settings(&self) -> PortalResult<ApiEnvelope<SiteSettings>>;

    async fn create_settings(
        &self,
        settings: &SiteSettings,
    ) -> PortalResult<ApiEnvelope<SiteSettings>>;

    async fn update_settings(
        &self,
        id: i64,
        settings: &SiteSettings,
    ) -> PortalResult<ApiEnvelope<SiteSettings>>;

    async fn upload_asset(
        &self,
        kind: AssetKind,
        file: &UploadFile,
    ) -> PortalResult<ApiEnvelope<UploadPayload>>;

    async fn fetch_public_info(&self) -> PortalResult<ApiEnvelope<PublicSiteInfo>>;

    async fn login(&self, request: &LoginRequest) -> PortalResult<ApiEnvelope<LoginPayload>>;

    async fn register(&self, request: &RegisterRequest) -> PortalResult<ApiEnvelope<User>>;
}

impl<T> ApiEnvelope<T> {
    /// Map `success == false` to a service error carrying the message verbatim.
    pub fn into_result(self) -> PortalResult<(String, Option<T>)> {
        if self.success {
            Ok((self.message, self.data))
        } else if self.message.trim().is_empty() {
            Err(PortalError::Service("Request failed".to_string()))
        } else {
            Err(PortalError::Service(self.message))
        }
    }

    /// Like [`into_result`](Self::into_result) but also requires a payload.
    pub fn into_data(self) -> PortalResult<T> {
        match self.into_result()? {
            (_, Some(data)) => Ok(data),
            (_, None) => Err(PortalError::InvalidResponse(
                "response envelope carried no data".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_envelope_keeps_message() {
        let envelope: ApiEnvelope<User> = ApiEnvelope::failure("Invalid email or password");
        match envelope.into_result() {
            Err(PortalError::Service(message)) => assert_eq!(message, "Invalid email or password"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_failed_envelope_without_message() {
        let envelope: ApiEnvelope<User> = ApiEnvelope::failure("");
        assert_eq!(
            envelope.into_result().unwrap_err().user_message(),
            "Request failed"
        );
    }

    #[test]
    fn test_into_data_requires_payload() {
        let empty: ApiEnvelope<UploadPayload> = ApiEnvelope::ok("Uploaded", None);
        assert!(matches!(
            empty.into_data(),
            Err(PortalError::InvalidResponse(_))
        ));

        let full = ApiEnvelope::ok(
            "Uploaded",
            Some(UploadPayload {
                url: "/media/logo.png".to_string(),
            }),
        );
        assert_eq!(full.into_data().unwrap().url, "/media/logo.png");
    }
}
