use std::fmt;
use thiserror::Error;

use crate::services::config::UploadConfig;

/// The two image fields of the settings record that accept uploads
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    /// Primary image, larger ceiling
    Logo,
    /// Secondary image, smaller ceiling
    Favicon,
}

impl AssetKind {
    pub fn upload_path(&self) -> &'static str {
        match self {
            AssetKind::Logo => "/settings/upload/logo",
            AssetKind::Favicon => "/settings/upload/favicon",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Logo => "logo",
            AssetKind::Favicon => "favicon",
        }
    }

    pub fn max_bytes(&self, config: &UploadConfig) -> u64 {
        match self {
            AssetKind::Logo => config.logo_max_bytes,
            AssetKind::Favicon => config.favicon_max_bytes,
        }
    }
}

/// A file picked in the browser, read fully into memory
#[derive(Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl UploadFile {
    /// The browser's file engine does not report a MIME type, so it is
    /// inferred from the extension.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = mime_from_name(&name)
            .unwrap_or("application/octet-stream")
            .to_string();
        Self { name, mime, bytes }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

pub fn mime_from_name(name: &str) -> Option<&'static str> {
    let extension = name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "ico" => Some("image/x-icon"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UploadError {
    #[error("Unsupported file type {mime}; please choose a JPEG, PNG, GIF, WebP, SVG or ICO image")]
    UnsupportedType { mime: String },

    #[error("File is too large ({}); the {kind} must be at most {}", format_bytes(*size), format_bytes(*max))]
    TooLarge { kind: &'static str, size: u64, max: u64 },

    #[error("The selected file is empty")]
    EmptyFile,
}

/// Client-side checks run before any upload request is issued.
pub fn validate_upload(
    kind: AssetKind,
    file: &UploadFile,
    config: &UploadConfig,
) -> Result<(), UploadError> {
    if !config.allows(&file.mime) {
        return Err(UploadError::UnsupportedType {
            mime: file.mime.clone(),
        });
    }

    if file.bytes.is_empty() {
        return Err(UploadError::EmptyFile);
    }

    let max = kind.max_bytes(config);
    if file.size() > max {
        return Err(UploadError::TooLarge {
            kind: kind.label(),
            size: file.size(),
            max,
        });
    }

    Ok(())
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    if bytes >= MB {
        let whole = bytes / MB;
        let tenth = (bytes % MB) * 10 / MB;
        if tenth == 0 {
            format!("{} MB", whole)
        } else {
            format!("{}.{} MB", whole, tenth)
        }
    } else if bytes >= KB {
        format!("{} KB", bytes / KB)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: usize) -> UploadFile {
        UploadFile::new(name, vec![0u8; size])
    }

    #[test]
    fn test_mime_inferred_from_extension() {
        assert_eq!(file("Logo.PNG", 1).mime, "image/png");
        assert_eq!(file("photo.jpeg", 1).mime, "image/jpeg");
        assert_eq!(file("favicon.ico", 1).mime, "image/x-icon");
        assert_eq!(file("README", 1).mime, "application/octet-stream");
    }

    #[test]
    fn test_disallowed_types_rejected() {
        let config = UploadConfig::default();
        for name in ["brief.pdf", "scan.tiff", "archive.zip", "noextension"] {
            let result = validate_upload(AssetKind::Logo, &file(name, 10), &config);
            assert!(
                matches!(result, Err(UploadError::UnsupportedType { .. })),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_per_field_ceilings() {
        let config = UploadConfig::default();
        let at_favicon_limit = file("icon.png", config.favicon_max_bytes as usize);
        let over_favicon_limit = file("icon.png", config.favicon_max_bytes as usize + 1);

        assert!(validate_upload(AssetKind::Favicon, &at_favicon_limit, &config).is_ok());
        assert!(matches!(
            validate_upload(AssetKind::Favicon, &over_favicon_limit, &config),
            Err(UploadError::TooLarge { kind: "favicon", .. })
        ));
        // the same file fits under the larger logo ceiling
        assert!(validate_upload(AssetKind::Logo, &over_favicon_limit, &config).is_ok());

        let over_logo_limit = file("logo.webp", config.logo_max_bytes as usize + 1);
        assert!(validate_upload(AssetKind::Logo, &over_logo_limit, &config).is_err());
    }

    #[test]
    fn test_empty_file_rejected() {
        let config = UploadConfig::default();
        assert_eq!(
            validate_upload(AssetKind::Logo, &file("logo.png", 0), &config),
            Err(UploadError::EmptyFile)
        );
    }

    #[test]
    fn test_error_messages_are_readable() {
        let error = UploadError::TooLarge {
            kind: "logo",
            size: 3 * 1024 * 1024 + 512 * 1024,
            max: 2 * 1024 * 1024,
        };
        assert_eq!(
            error.to_string(),
            "File is too large (3.5 MB); the logo must be at most 2 MB"
        );
        assert_eq!(format_bytes(512 * 1024), "512 KB");
        assert_eq!(format_bytes(12), "12 bytes");
    }
}
