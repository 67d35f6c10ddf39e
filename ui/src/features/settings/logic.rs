use tracing::{info, instrument};

use super::upload::{validate_upload, AssetKind, UploadFile};
use crate::services::client::{PortalApi, SiteSettings};
use crate::services::config::UploadConfig;
use crate::services::errors::{PortalError, PortalResult};

/// Fetch the configuration record. An empty payload means no record has
/// been created yet.
#[instrument(skip_all, err)]
pub async fn load_settings(api: &dyn PortalApi) -> PortalResult<SiteSettings> {
    let (_, data) = api.fetch_settings().await?.into_result()?;
    Ok(data.unwrap_or_default())
}

/// Create the record when it has no id yet, otherwise update it by id.
#[instrument(skip_all, fields(id = ?settings.id), err)]
pub async fn save_settings(
    api: &dyn PortalApi,
    settings: &SiteSettings,
) -> PortalResult<(String, SiteSettings)> {
    let envelope = match settings.id {
        None => api.create_settings(settings).await?,
        Some(id) => api.update_settings(id, settings).await?,
    };
    let (message, saved) = envelope.into_result()?;
    let saved = saved.unwrap_or_else(|| settings.clone());
    info!("Settings saved (id: {:?})", saved.id);

    let message = if message.is_empty() {
        "Settings saved successfully".to_string()
    } else {
        message
    };
    Ok((message, saved))
}

/// Validate type and size locally, then upload. Returns the service
/// message and the stored asset URL.
#[instrument(skip(api, config), err)]
pub async fn upload_asset(
    api: &dyn PortalApi,
    config: &UploadConfig,
    kind: AssetKind,
    file: &UploadFile,
) -> PortalResult<(String, String)> {
    validate_upload(kind, file, config)?;

    let (message, payload) = api.upload_asset(kind, file).await?.into_result()?;
    let payload = payload.ok_or_else(|| {
        PortalError::InvalidResponse("upload succeeded without a file URL".to_string())
    })?;
    info!("Uploaded {} to {}", kind.label(), payload.url);

    let message = if message.is_empty() {
        format!("The {} was uploaded", kind.label())
    } else {
        message
    };
    Ok((message, payload.url))
}
