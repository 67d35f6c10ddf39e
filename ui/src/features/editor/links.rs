use thiserror::Error;
use url::Url;

use crate::features::settings::{format_bytes, mime_from_name};

/// Failures shown inline next to the editor; they never leave the widget.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditorError {
    #[error("Please enter a valid http or https link")]
    InvalidLink(String),

    #[error("Only JPEG, PNG, GIF, WebP, SVG and ICO images can be inserted")]
    UnsupportedImage(String),

    #[error("Image is too large ({}); the maximum is {}", format_bytes(*size), format_bytes(*max))]
    ImageTooLarge { size: u64, max: u64 },

    #[error("Tables must have between 1 and {max} rows and columns")]
    InvalidTableSize { max: usize },
}

/// Validate a link typed into the link prompt and return its canonical form.
pub fn normalize_link(input: &str) -> Result<String, EditorError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EditorError::InvalidLink(input.to_string()));
    }

    let bare_www = trimmed
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("www."));
    let candidate = if bare_www {
        format!("https://{}", trimmed)
    } else {
        trimmed.to_string()
    };

    let url = Url::parse(&candidate).map_err(|_| EditorError::InvalidLink(input.to_string()))?;
    let has_host = url.host_str().is_some_and(|host| !host.is_empty());
    if !matches!(url.scheme(), "http" | "https") || !has_host {
        return Err(EditorError::InvalidLink(input.to_string()));
    }

    Ok(url.to_string())
}

/// Hrefs that survive paste and parsing of stored markup.
pub fn is_safe_href(href: &str) -> bool {
    match Url::parse(href.trim()) {
        Ok(url) => match url.scheme() {
            "http" | "https" => url.host_str().is_some(),
            "mailto" => true,
            _ => false,
        },
        Err(_) => false,
    }
}

pub(crate) fn is_safe_image_src(src: &str) -> bool {
    let lowered = src.trim_start().to_ascii_lowercase();
    lowered.starts_with("data:image/")
        || lowered.starts_with("https://")
        || lowered.starts_with("http://")
}

/// Encode a locally picked image as a `data:` URL after checking its type
/// and size.
pub fn image_data_url(
    name: &str,
    bytes: &[u8],
    allowed: impl Fn(&str) -> bool,
    max_bytes: u64,
) -> Result<String, EditorError> {
    use base64::Engine;

    let mime = mime_from_name(name)
        .filter(|mime| mime.starts_with("image/") && allowed(mime))
        .ok_or_else(|| EditorError::UnsupportedImage(name.to_string()))?;

    let size = bytes.len() as u64;
    if size > max_bytes {
        return Err(EditorError::ImageTooLarge {
            size,
            max: max_bytes,
        });
    }

    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", mime, encoded))
}
