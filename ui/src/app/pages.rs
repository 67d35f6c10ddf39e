//! Route targets. Each page is a thin wrapper that owns page-level state and
//! hands it to the form components.

use dioxus::prelude::*;

use crate::components::forms::{LoginForm, RegisterForm, SettingsForm};
use crate::features::settings::{load_settings, SettingsAction, SettingsState};
use crate::services::client::PortalClient;
use crate::services::config::use_portal_config;
use crate::services::session::use_session;
use crate::{console_error, console_info};

#[component]
pub fn HomePage() -> Element {
    let session = use_session();

    rsx! {
        section {
            class: "page home-page",
            h1 { "Newsroom administration" }
            match session.current() {
                Some(current) if current.is_admin() => rsx! {
                    p { "Signed in as {current.user.name}." }
                    a { class: "submit-button", href: "/admin/settings", "Open site settings" }
                },
                Some(current) => rsx! {
                    p { "Signed in as {current.user.name}. Site settings are limited to administrators." }
                },
                None => rsx! {
                    p { "Sign in to manage the portal." }
                    a { class: "submit-button", href: "/login", "Sign in" }
                },
            }
        }
    }
}

#[component]
pub fn LoginPage() -> Element {
    rsx! {
        section {
            class: "page auth-page",
            LoginForm {}
        }
    }
}

#[component]
pub fn RegisterPage() -> Element {
    rsx! {
        section {
            class: "page auth-page",
            RegisterForm {}
        }
    }
}

/// Settings editor, only rendered for administrators.
#[component]
pub fn SettingsPage() -> Element {
    let session = use_session();

    if !session.is_admin() {
        return rsx! {
            section {
                class: "page access-denied",
                h1 { "Site settings" }
                p { "You need an administrator account to change site settings." }
                if !session.is_authenticated() {
                    a { class: "submit-button", href: "/login", "Sign in" }
                }
            }
        };
    }

    rsx! {
        SettingsEditor {}
    }
}

#[component]
fn SettingsEditor() -> Element {
    let session = use_session().signal();
    let api = use_portal_config().api;
    let mut state = use_signal(SettingsState::default);

    // Dispatch function for actions - using in-place reduction to preserve Dioxus Signal reactivity
    let dispatch = EventHandler::new(move |action: SettingsAction| {
        state.with_mut(|s| {
            s.reduce_in_place(action);
        });
    });

    use_hook(move || {
        let session = session.peek().clone();
        spawn(async move {
            let client = PortalClient::for_session(&api, session.as_ref());
            match load_settings(&client).await {
                Ok(settings) => {
                    console_info!("[Settings] Loaded record {:?}", settings.id);
                    dispatch.call(SettingsAction::Loaded(settings));
                }
                Err(e) => {
                    console_error!("[Settings] Could not load settings: {}", e);
                    dispatch.call(SettingsAction::LoadFailed(e.user_message()));
                }
            }
        });
    });

    rsx! {
        section {
            class: "page settings-page",
            h1 { "Site settings" }
            SettingsForm { state, dispatch }
        }
    }
}
