use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::components::display::{FlashMessage, LoadingIndicator};
use crate::components::editor::RichTextEditor;
use crate::components::forms::ImageUploadField;
use crate::components::input::{InputType, ValidatedInput, ValidatedTextArea};
use crate::features::settings::{
    save_settings, upload_asset, AssetKind, Flash, SettingsAction, SettingsField, SettingsState,
    SettingsTab, UploadFile,
};
use crate::services::client::PortalClient;
use crate::services::config::use_portal_config;
use crate::services::session::use_session;
use crate::{console_error, console_info};

#[derive(Props, PartialEq, Clone)]
pub struct SettingsFormProps {
    pub state: Signal<SettingsState>,
    pub dispatch: EventHandler<SettingsAction>,
}

#[component]
pub fn SettingsForm(props: SettingsFormProps) -> Element {
    let state = props.state;
    let dispatch = props.dispatch;
    let session = use_session().signal();
    let config = use_portal_config();
    let flash_timeout_ms = config.ui.flash_timeout_ms;
    let api = config.api.clone();

    // Each new flash restarts the dismiss timer; a stale timer carries an
    // old sequence number and is ignored by the reducer.
    let flash_seq = use_memo(move || state.read().flash_seq);
    use_effect(move || {
        let seq = flash_seq();
        if state.peek().flash.is_none() {
            return;
        }
        spawn(async move {
            TimeoutFuture::new(flash_timeout_ms).await;
            dispatch.call(SettingsAction::DismissFlash(seq));
        });
    });

    let on_submit = move |event: FormEvent| {
        event.prevent_default();
        if state.peek().is_busy() {
            return;
        }

        let settings = state.peek().settings.clone();
        let session = session.peek().clone();
        let api = api.clone();
        dispatch.call(SettingsAction::SetSaving(true));
        spawn(async move {
            let client = PortalClient::for_session(&api, session.as_ref());
            match save_settings(&client, &settings).await {
                Ok((message, saved)) => {
                    console_info!("[Settings] Saved record {:?}", saved.id);
                    dispatch.call(SettingsAction::Saved(saved, message));
                }
                Err(e) => {
                    console_error!("[Settings] Save failed: {}", e);
                    dispatch.call(SettingsAction::SetSaving(false));
                    dispatch.call(SettingsAction::ShowFlash(Flash::Error(e.user_message())));
                }
            }
        });
    };

    let upload = use_callback(move |(kind, file): (AssetKind, UploadFile)| {
        let session = session.peek().clone();
        let config = config.clone();
        dispatch.call(SettingsAction::SetUploading(Some(kind)));
        spawn(async move {
            let client = PortalClient::for_session(&config.api, session.as_ref());
            match upload_asset(&client, &config.uploads, kind, &file).await {
                Ok((message, url)) => {
                    dispatch.call(SettingsAction::AssetUploaded(kind, url, message));
                }
                Err(e) => {
                    console_error!("[Settings] {} upload failed: {}", kind.label(), e);
                    dispatch.call(SettingsAction::SetUploading(None));
                    dispatch.call(SettingsAction::ShowFlash(Flash::Error(e.user_message())));
                }
            }
        });
    });

    if state().is_loading {
        return rsx! {
            LoadingIndicator { message: "Loading settings...".to_string() }
        };
    }

    let current = state();
    let active_tab = current.active_tab;

    rsx! {
        form {
            class: "settings-form",
            novalidate: true,
            onsubmit: on_submit,

            FlashMessage {
                flash: current.flash.clone(),
                on_dismiss: move |_| dispatch.call(SettingsAction::DismissFlash(state.peek().flash_seq))
            }

            nav {
                class: "settings-tabs",
                role: "tablist",
                for tab in SettingsTab::ALL {
                    button {
                        key: "{tab.label()}",
                        r#type: "button",
                        role: "tab",
                        class: if tab == active_tab { "settings-tab active" } else { "settings-tab" },
                        "aria-selected": tab == active_tab,
                        onclick: move |_| dispatch.call(SettingsAction::SelectTab(tab)),
                        "{tab.label()}"
                    }
                }
            }

            div {
                class: "settings-panel",
                role: "tabpanel",

                for field in active_tab.fields().iter().copied() {
                    SettingsFieldInput {
                        key: "{field.label()}",
                        field,
                        value: field.get(&current.settings).to_string(),
                        disabled: current.is_saving,
                        on_change: move |value: String| dispatch.call(SettingsAction::SetField(field, value))
                    }
                }

                if active_tab == SettingsTab::General {
                    div {
                        class: "upload-row",
                        ImageUploadField {
                            kind: AssetKind::Logo,
                            current_url: current.settings.logo_url.clone(),
                            uploading: current.uploading == Some(AssetKind::Logo),
                            disabled: current.is_busy(),
                            on_file: move |file: UploadFile| upload.call((AssetKind::Logo, file))
                        }
                        ImageUploadField {
                            kind: AssetKind::Favicon,
                            current_url: current.settings.favicon_url.clone(),
                            uploading: current.uploading == Some(AssetKind::Favicon),
                            disabled: current.is_busy(),
                            on_file: move |file: UploadFile| upload.call((AssetKind::Favicon, file))
                        }
                    }
                }

                if active_tab == SettingsTab::Advanced {
                    div {
                        class: "input-section",
                        label { class: "input-label", "Copyright text" }
                        RichTextEditor {
                            value: current.settings.copyright_text.clone(),
                            placeholder: "© Your Newsroom. All rights reserved.".to_string(),
                            on_change: move |html: String| dispatch.call(SettingsAction::SetCopyright(html))
                        }
                    }

                    div {
                        class: "input-section checkbox-section",
                        label {
                            class: "checkbox-label",
                            input {
                                r#type: "checkbox",
                                checked: current.settings.maintenance_mode,
                                disabled: current.is_saving,
                                onchange: move |evt: FormEvent| {
                                    dispatch.call(SettingsAction::SetMaintenance(evt.checked()))
                                }
                            }
                            " Maintenance mode"
                        }
                        p {
                            class: "input-hint",
                            "Visitors see a maintenance notice while this is enabled."
                        }
                    }
                }
            }

            div {
                class: "button-section",
                button {
                    class: "submit-button",
                    r#type: "submit",
                    disabled: current.is_busy(),
                    if current.is_saving {
                        "Saving..."
                    } else if current.is_new() {
                        "Create settings"
                    } else {
                        "Save settings"
                    }
                }
            }
        }
    }
}

#[derive(Props, PartialEq, Clone)]
struct SettingsFieldInputProps {
    field: SettingsField,
    value: String,
    disabled: bool,
    on_change: EventHandler<String>,
}

#[component]
fn SettingsFieldInput(props: SettingsFieldInputProps) -> Element {
    let field = props.field;
    let id = format!("settings-{:?}", field).to_lowercase();

    rsx! {
        div {
            class: "input-section",
            label { class: "input-label", r#for: "{id}", "{field.label()}" }
            if field.is_multiline() {
                ValidatedTextArea {
                    id: id.clone(),
                    value: props.value.clone(),
                    placeholder: field.placeholder().to_string(),
                    disabled: props.disabled,
                    on_change: props.on_change
                }
            } else {
                ValidatedInput {
                    id: id.clone(),
                    value: props.value.clone(),
                    placeholder: field.placeholder().to_string(),
                    input_type: InputType::from_html(field.input_type()),
                    disabled: props.disabled,
                    on_change: props.on_change
                }
            }
        }
    }
}
