//! In-memory [`PortalApi`] that records calls, for flow tests.

use async_trait::async_trait;
use std::cell::RefCell;

use super::api::PortalApi;
use super::types::*;
use crate::features::settings::{AssetKind, UploadFile};
use crate::services::errors::{PortalError, PortalResult};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    FetchSettings,
    CreateSettings(SiteSettings),
    UpdateSettings(i64, SiteSettings),
    UploadAsset(AssetKind, String),
    FetchPublicInfo,
    Login(LoginRequest),
    Register(RegisterRequest),
}

/// Canned responses; `None` simulates a transport failure.
#[derive(Default)]
pub struct RecordingApi {
    pub calls: RefCell<Vec<RecordedCall>>,
    pub settings: Option<ApiEnvelope<SiteSettings>>,
    pub upload: Option<ApiEnvelope<UploadPayload>>,
    pub public_info: Option<ApiEnvelope<PublicSiteInfo>>,
    pub login: Option<ApiEnvelope<LoginPayload>>,
    pub register: Option<ApiEnvelope<User>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.borrow_mut().push(call);
    }
}

fn canned<T: Clone>(response: &Option<ApiEnvelope<T>>) -> PortalResult<ApiEnvelope<T>> {
    response
        .clone()
        .ok_or_else(|| PortalError::Network("connection refused".to_string()))
}

/// Echo the submitted record back, assigning an id on create.
fn echo(
    response: &Option<ApiEnvelope<SiteSettings>>,
    settings: &SiteSettings,
    id: i64,
) -> PortalResult<ApiEnvelope<SiteSettings>> {
    match response {
        Some(envelope) if !envelope.success => Ok(envelope.clone()),
        Some(_) => Ok(ApiEnvelope::ok(
            "Settings saved",
            Some(SiteSettings {
                id: Some(id),
                ..settings.clone()
            }),
        )),
        None => Err(PortalError::Network("connection refused".to_string())),
    }
}

#[async_trait(?Send)]
impl PortalApi for RecordingApi {
    async fn fetch_settings(&self) -> PortalResult<ApiEnvelope<SiteSettings>> {
        self.record(RecordedCall::FetchSettings);
        canned(&self.settings)
    }

    async fn create_settings(
        &self,
        settings: &SiteSettings,
    ) -> PortalResult<ApiEnvelope<SiteSettings>> {
        self.record(RecordedCall::CreateSettings(settings.clone()));
        echo(&self.settings, settings, 1)
    }

    async fn update_settings(
        &self,
        id: i64,
        settings: &SiteSettings,
    ) -> PortalResult<ApiEnvelope<SiteSettings>> {
        self.record(RecordedCall::UpdateSettings(id, settings.clone()));
        echo(&self.settings, settings, id)
    }

    async fn upload_asset(
        &self,
        kind: AssetKind,
        file: &UploadFile,
    ) -> PortalResult<ApiEnvelope<UploadPayload>> {
        self.record(RecordedCall::UploadAsset(kind, file.name.clone()));
        canned(&self.upload)
    }

    async fn fetch_public_info(&self) -> PortalResult<ApiEnvelope<PublicSiteInfo>> {
        self.record(RecordedCall::FetchPublicInfo);
        canned(&self.public_info)
    }

    async fn login(&self, request: &LoginRequest) -> PortalResult<ApiEnvelope<LoginPayload>> {
        self.record(RecordedCall::Login(request.clone()));
        canned(&self.login)
    }

    async fn register(&self, request: &RegisterRequest) -> PortalResult<ApiEnvelope<User>> {
        self.record(RecordedCall::Register(request.clone()));
        canned(&self.register)
    }
}
