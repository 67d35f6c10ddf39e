use crate::utils::validation::{EmailValidation, PasswordValidation};
use dioxus::prelude::*;

const VALID_STYLE: &str = "color: #10b981; background-color: #d1fae5; border: 1px solid #10b981; padding: 8px; border-radius: 4px; margin-top: 4px;";
const INVALID_STYLE: &str = "color: #ef4444; background-color: #fef2f2; border: 1px solid #ef4444; padding: 8px; border-radius: 4px; margin-top: 4px;";

#[derive(Props, PartialEq, Clone)]
pub struct PasswordValidationFeedbackProps {
    pub validation: PasswordValidation,
}

#[component]
pub fn PasswordValidationFeedback(props: PasswordValidationFeedbackProps) -> Element {
    match props.validation {
        PasswordValidation::Match => rsx! {
            div {
                class: "validation-feedback match",
                style: VALID_STYLE,
                "✓ Passwords match"
            }
        },
        PasswordValidation::NoMatch => rsx! {
            div {
                class: "validation-feedback no-match",
                style: INVALID_STYLE,
                "⚠ Passwords do not match"
            }
        },
        PasswordValidation::None => rsx! {},
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct EmailValidationFeedbackProps {
    pub validation: EmailValidation,
}

#[component]
pub fn EmailValidationFeedback(props: EmailValidationFeedbackProps) -> Element {
    match props.validation {
        EmailValidation::Valid => rsx! {
            div {
                class: "validation-feedback valid",
                style: VALID_STYLE,
                "✓ Valid email address"
            }
        },
        EmailValidation::Invalid => rsx! {
            div {
                class: "validation-feedback invalid",
                style: INVALID_STYLE,
                "⚠ Please enter a valid email address"
            }
        },
        EmailValidation::None => rsx! {},
    }
}

/// Form-level error shown under the submit button
#[derive(Props, PartialEq, Clone)]
pub struct FormErrorProps {
    pub message: Option<String>,
}

#[component]
pub fn FormError(props: FormErrorProps) -> Element {
    match props.message {
        Some(message) => rsx! {
            div {
                class: "validation-feedback form-error",
                role: "alert",
                style: INVALID_STYLE,
                "⚠ {message}"
            }
        },
        None => rsx! {},
    }
}
