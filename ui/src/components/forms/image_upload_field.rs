use dioxus::prelude::*;

use crate::console_warn;
use crate::features::settings::{format_bytes, AssetKind, UploadFile};
use crate::services::config::use_portal_config;

#[derive(Props, PartialEq, Clone)]
pub struct ImageUploadFieldProps {
    pub kind: AssetKind,
    pub current_url: Option<String>,
    #[props(default)]
    pub uploading: bool,
    #[props(default)]
    pub disabled: bool,
    pub on_file: EventHandler<UploadFile>,
}

/// File picker with a preview of the stored image. Reading the file is done
/// here; validation and the upload itself belong to the caller.
#[component]
pub fn ImageUploadField(props: ImageUploadFieldProps) -> Element {
    let uploads = use_portal_config().uploads;
    let kind = props.kind;
    let on_file = props.on_file;
    let input_id = format!("upload-{}", kind.label());
    let title = match kind {
        AssetKind::Logo => "Logo",
        AssetKind::Favicon => "Favicon",
    };
    let limit = format_bytes(kind.max_bytes(&uploads));

    rsx! {
        div {
            class: "upload-field",

            label { class: "input-label", r#for: "{input_id}", "{title}" }

            if let Some(url) = props.current_url.as_ref().filter(|url| !url.is_empty()) {
                div {
                    class: "upload-preview",
                    img { src: "{url}", alt: "Current {kind.label()}" }
                }
            } else {
                div { class: "upload-preview upload-preview-empty", "No {kind.label()} uploaded" }
            }

            input {
                id: "{input_id}",
                r#type: "file",
                accept: "image/*",
                disabled: props.disabled || props.uploading,
                onchange: move |evt: FormEvent| {
                    let Some(engine) = evt.files() else {
                        return;
                    };
                    let Some(name) = engine.files().into_iter().next() else {
                        return;
                    };
                    spawn(async move {
                        match engine.read_file(&name).await {
                            Some(bytes) => on_file.call(UploadFile::new(name, bytes)),
                            None => console_warn!("[Upload] Could not read {}", name),
                        }
                    });
                }
            }

            p {
                class: "upload-hint",
                if props.uploading {
                    "Uploading..."
                } else {
                    "JPEG, PNG, GIF, WebP, SVG or ICO, up to {limit}"
                }
            }
        }
    }
}
