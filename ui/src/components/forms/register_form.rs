//! Account registration. A successful registration does not sign the user
//! in; it sends them to the login page.

use dioxus::prelude::*;

use crate::components::display::LoadingIndicator;
use crate::components::input::{
    EmailValidationFeedback, FormError, InputType, PasswordValidationFeedback, ValidatedInput,
};
use crate::features::auth::{self, get_register_validation_message, RegisterForm as RegisterFields};
use crate::services::client::PortalClient;
use crate::services::config::use_portal_config;
use crate::utils::{
    email_validation_class, email_validation_style, redirect_after, validate_email,
    password_validation_class, password_validation_style, validate_passwords,
};
use crate::{console_info, console_warn};

#[component]
pub fn RegisterForm() -> Element {
    let config = use_portal_config();
    let mut fields = use_signal(RegisterFields::default);
    let mut error = use_signal(|| None::<String>);
    let mut success = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let on_submit = move |event: FormEvent| {
        event.prevent_default();
        if submitting() {
            return;
        }

        let form = fields();
        if let Some(message) = get_register_validation_message(&form) {
            error.set(Some(message));
            return;
        }

        error.set(None);
        submitting.set(true);
        let config = config.clone();
        spawn(async move {
            let client = PortalClient::new(&config.api);
            match auth::register(&client, &form).await {
                Ok(message) => {
                    console_info!("[Register] Account created for {}", form.email);
                    success.set(Some(message));
                    redirect_after("/login", config.ui.redirect_delay_ms).await;
                }
                Err(e) => {
                    console_warn!("[Register] Registration failed: {}", e);
                    error.set(Some(e.user_message()));
                    submitting.set(false);
                }
            }
        });
    };

    let password_validation = {
        let form = fields();
        validate_passwords(&form.password, &form.password_confirm)
    };

    let email_validation = validate_email(&fields().email);

    rsx! {
        form {
            class: "auth-form register-form",
            novalidate: true,
            onsubmit: on_submit,

            h2 { class: "form-title", "Create an account" }

            div {
                class: "input-section",
                label { class: "input-label", r#for: "register-name", "Name" }
                ValidatedInput {
                    id: "register-name".to_string(),
                    value: fields().name,
                    placeholder: "Your full name".to_string(),
                    input_type: InputType::Text,
                    autocomplete: Some("name".to_string()),
                    disabled: submitting(),
                    on_change: move |value: String| fields.with_mut(|f| f.name = value)
                }
            }

            div {
                class: "input-section",
                label { class: "input-label", r#for: "register-email", "Email" }
                ValidatedInput {
                    id: "register-email".to_string(),
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
                label { class: "input-label", r#for: "register-password", "Password" }
                ValidatedInput {
                    id: "register-password".to_string(),
                    value: fields().password,
                    placeholder: "At least 8 characters".to_string(),
                    input_type: InputType::Password,
                    autocomplete: Some("new-password".to_string()),
                    disabled: submitting(),
                    on_change: move |value: String| fields.with_mut(|f| f.password = value)
                }
            }

            div {
                class: "input-section",
                label { class: "input-label", r#for: "register-confirm", "Confirm password" }
                ValidatedInput {
                    id: "register-confirm".to_string(),
                    value: fields().password_confirm,
                    placeholder: "Repeat the password".to_string(),
                    input_type: InputType::Password,
                    input_class: password_validation_class(&password_validation).to_string(),
                    input_style: password_validation_style(&password_validation).to_string(),
                    autocomplete: Some("new-password".to_string()),
                    disabled: submitting(),
                    on_change: move |value: String| fields.with_mut(|f| f.password_confirm = value)
                }
                PasswordValidationFeedback { validation: password_validation }
            }

            div {
                class: "button-section",
                button {
                    class: "submit-button",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Creating account..." } else { "Register" }
                }
            }

            if submitting() && success().is_none() {
                LoadingIndicator { message: "Creating your account...".to_string() }
            }

            if let Some(message) = success() {
                div { class: "form-success", role: "status", "✓ {message}" }
            }

            FormError { message: error() }

            p {
                class: "form-switch",
                "Already registered? "
                a { href: "/login", "Sign in" }
            }
        }
    }
}
