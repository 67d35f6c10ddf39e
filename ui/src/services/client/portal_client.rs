use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{multipart, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{error, info, instrument, warn};

use super::api::PortalApi;
use super::types::*;
use crate::features::settings::{AssetKind, UploadFile};
use crate::services::config::ApiConfig;
use crate::services::errors::{PortalError, PortalResult};

/// HTTP client for the portal service
///
/// Holds the base address and, once a session exists, the bearer token that
/// is attached to every authenticated request.
#[derive(Clone)]
pub struct PortalClient {
    pub(crate) http_client: Client,
    base_url: String,
    user_agent: String,
    token: Option<String>,
}

impl PortalClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http_client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            token: None,
        }
    }

    /// Client carrying the token of `session`, or an anonymous one.
    pub fn for_session(config: &ApiConfig, session: Option<&Session>) -> Self {
        let client = Self::new(config);
        match session {
            Some(session) => client.with_token(session.token.clone()),
            None => client,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request builder with the bearer header attached when a token is held.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.public_request(method, path);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Request builder that never carries credentials.
    pub(crate) fn public_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, self.endpoint(path))
            .header(USER_AGENT, &self.user_agent)
    }

    async fn send_envelope<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &str,
    ) -> PortalResult<ApiEnvelope<T>> {
        let response = builder.send().await.inspect_err(|e| {
            error!("{} failed before a response was received: {}", operation, e);
        })?;

        let status = response.status();
        let body = response.text().await?;
        decode_envelope(operation, status, &body)
    }
}

/// Classify a response. A parsable envelope wins whatever the status, so
/// service messages reach the user verbatim; otherwise a 2xx body is
/// malformed and anything else is described by its status.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    operation: &str,
    status: StatusCode,
    body: &str,
) -> PortalResult<ApiEnvelope<T>> {
    match serde_json::from_str::<ApiEnvelope<T>>(body) {
        Ok(envelope) => {
            if !envelope.success {
                warn!("{} rejected by service ({}): {}", operation, status, envelope.message);
            }
            Ok(envelope)
        }
        Err(e) if status.is_success() => {
            error!("{} returned a malformed envelope: {}", operation, e);
            Err(PortalError::InvalidResponse(e.to_string()))
        }
        Err(_) => Err(PortalError::Service(status_message(operation, status))),
    }
}

fn status_message(operation: &str, status: StatusCode) -> String {
    match status {
        // A 401 from the sign-in call means the credentials, not a session.
        StatusCode::UNAUTHORIZED if operation == "login" => {
            "Invalid email or password".to_string()
        }
        StatusCode::UNAUTHORIZED => "Your session has expired, please log in again".to_string(),
        StatusCode::FORBIDDEN => "You are not allowed to perform this action".to_string(),
        StatusCode::PAYLOAD_TOO_LARGE => "The file is too large".to_string(),
        status => format!("Request failed with status {}", status.as_u16()),
    }
}

#[async_trait(?Send)]
impl PortalApi for PortalClient {
    #[instrument(skip(self), err)]
    async fn fetch_settings(&self) -> PortalResult<ApiEnvelope<SiteSettings>> {
        self.send_envelope(self.request(Method::GET, "/settings"), "fetch_settings")
            .await
    }

    #[instrument(skip(self, settings), err)]
    async fn create_settings(
        &self,
        settings: &SiteSettings,
    ) -> PortalResult<ApiEnvelope<SiteSettings>> {
        info!("Creating site settings");
        self.send_envelope(
            self.request(Method::POST, "/settings").json(settings),
            "create_settings",
        )
        .await
    }

    #[instrument(skip(self, settings), err)]
    async fn update_settings(
        &self,
        id: i64,
        settings: &SiteSettings,
    ) -> PortalResult<ApiEnvelope<SiteSettings>> {
        info!("Updating site settings {}", id);
        self.send_envelope(
            self.request(Method::PUT, &format!("/settings/{}", id))
                .json(settings),
            "update_settings",
        )
        .await
    }

    #[instrument(skip(self, file), fields(file = %file.name, size = file.size()), err)]
    async fn upload_asset(
        &self,
        kind: AssetKind,
        file: &UploadFile,
    ) -> PortalResult<ApiEnvelope<UploadPayload>> {
        let part = multipart::Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)
            .map_err(|e| PortalError::Validation(format!("Invalid file type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        self.send_envelope(
            self.request(Method::POST, kind.upload_path()).multipart(form),
            "upload_asset",
        )
        .await
    }

    #[instrument(skip(self), err)]
    async fn fetch_public_info(&self) -> PortalResult<ApiEnvelope<PublicSiteInfo>> {
        self.send_envelope(
            self.public_request(Method::GET, "/settings/public"),
            "fetch_public_info",
        )
        .await
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn login(&self, request: &LoginRequest) -> PortalResult<ApiEnvelope<LoginPayload>> {
        self.send_envelope(
            self.public_request(Method::POST, "/auth/login").json(request),
            "login",
        )
        .await
    }

    #[instrument(skip(self, request), fields(email = %request.email), err)]
    async fn register(&self, request: &RegisterRequest) -> PortalResult<ApiEnvelope<User>> {
        self.send_envelope(
            self.public_request(Method::POST, "/auth/register")
                .json(request),
            "register",
        )
        .await
    }
}
