//! Sign-in form: validates locally, submits once, stores the session and
//! redirects home.

use dioxus::prelude::*;

use crate::components::display::LoadingIndicator;
use crate::components::input::{
    EmailValidationFeedback, FormError, InputType, ValidatedInput,
};
use crate::features::auth::{self, get_login_validation_message, LoginForm as LoginFields};
use crate::services::client::PortalClient;
use crate::services::config::use_portal_config;
use crate::services::session::use_session;
use crate::utils::{
    email_validation_class, email_validation_style, redirect_after, validate_email,
};
use crate::{console_info, console_warn};

#[component]
pub fn LoginForm() -> Element {
    let session = use_session();
    let config = use_portal_config();
    let mut fields = use_signal(LoginFields::default);
    let mut error = use_signal(|| None::<String>);
    let mut success = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let on_submit = move |event: FormEvent| {
        event.prevent_default();
        if submitting() {
            return;
        }

        let form = fields();
        if let Some(message) = get_login_validation_message(&form) {
            error.set(Some(message));
            return;
        }

        error.set(None);
        submitting.set(true);
        let session = session.clone();
        let config = config.clone();
        spawn(async move {
            let client = PortalClient::new(&config.api);
            match auth::login(&client, &session, &form).await {
                Ok(outcome) => {
                    console_info!("[Login] Signed in as {}", outcome.session.user.email);
                    success.set(Some(outcome.message));
                    redirect_after("/", config.ui.redirect_delay_ms).await;
                }
                Err(e) => {
                    console_warn!("[Login] Sign-in failed: {}", e);
                    error.set(Some(e.user_message()));
                    submitting.set(false);
                }
            }
        });
    };

    let email_validation = validate_email(&fields().email);

    rsx! {
        form {
            class: "auth-form login-form",
            novalidate: true,
            onsubmit: on_submit,

            h2 { class: "form-title", "Sign in" }

            div {
                class: "input-section",
                label { class: "input-label", r#for: "login-email", "Email" }
                ValidatedInput {
                    id: "login-email".to_string(),
                    value: fields().email,
                    placeholder: "you@example.com".to_string(),
                    input_type: InputType::Email,
                    input_class: email_validation_class(&email_validation).to_string(),
                    input_style: email_validation_style(&email_validation).to_string(),
                    autocomplete: Some("email".to_string()),
                    disabled: submitting(),
                    on_change: move |value: String| fields.with_mut(|f| f.email = value)
                }
                EmailValidationFeedback { validation: email_validation }
            }

            div {
                class: "input-section",
                label { class: "input-label", r#for: "login-password", "Password" }
                ValidatedInput {
                    id: "login-password".to_string(),
                    value: fields().password,
                    placeholder: "Your password".to_string(),
                    input_type: InputType::Password,
                    autocomplete: Some("current-password".to_string()),
                    disabled: submitting(),
                    on_change: move |value: String| fields.with_mut(|f| f.password = value)
                }
            }

            div {
                class: "button-section",
                button {
                    class: "submit-button",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }

            if submitting() && success().is_none() {
                LoadingIndicator { message: "Contacting the portal...".to_string() }
            }

            if let Some(message) = success() {
                div { class: "form-success", role: "status", "✓ {message}" }
            }

            FormError { message: error() }

            p {
                class: "form-switch",
                "No account yet? "
                a { href: "/register", "Register" }
            }
        }
    }
}
