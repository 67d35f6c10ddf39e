use crate::services::client::{LoginRequest, RegisterRequest};
use crate::services::errors::PortalError;
use crate::utils::validation::{is_valid_email, MIN_PASSWORD_LENGTH};

/// Raw contents of the login form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Raw contents of the registration form
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Gets the first user-facing problem with the login form, if any
pub fn get_login_validation_message(form: &LoginForm) -> Option<String> {
    email_message(&form.email).or_else(|| {
        if form.password.is_empty() {
            Some("Password is required".to_string())
        } else {
            None
        }
    })
}

/// Gets the first user-facing problem with the registration form, if any
pub fn get_register_validation_message(form: &RegisterForm) -> Option<String> {
    if form.name.trim().is_empty() {
        return Some("Name is required".to_string());
    }

    if let Some(message) = email_message(&form.email) {
        return Some(message);
    }

    if form.password.is_empty() {
        return Some("Password is required".to_string());
    }

    if form.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Some(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }

    if form.password != form.password_confirm {
        return Some("Passwords do not match".to_string());
    }

    None
}

fn email_message(email: &str) -> Option<String> {
    if email.trim().is_empty() {
        Some("Email is required".to_string())
    } else if !is_valid_email(email) {
        Some("Please enter a valid email address".to_string())
    } else {
        None
    }
}

/// Turns a valid login form into its request; otherwise a validation error.
pub fn validate_login(form: &LoginForm) -> Result<LoginRequest, PortalError> {
    match get_login_validation_message(form) {
        Some(message) => Err(PortalError::Validation(message)),
        None => Ok(LoginRequest {
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        }),
    }
}

/// Turns a valid registration form into its request; otherwise a validation error.
pub fn validate_registration(form: &RegisterForm) -> Result<RegisterRequest, PortalError> {
    match get_register_validation_message(form) {
        Some(message) => Err(PortalError::Validation(message)),
        None => Ok(RegisterRequest {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_registration() -> RegisterForm {
        RegisterForm {
            name: "Test Reporter".to_string(),
            email: "reporter@example.com".to_string(),
            password: "testpassword123".to_string(),
            password_confirm: "testpassword123".to_string(),
        }
    }

    #[test]
    fn test_validate_login() {
        let mut form = LoginForm::default();
        assert_eq!(
            get_login_validation_message(&form).as_deref(),
            Some("Email is required")
        );

        form.email = "not-an-email".to_string();
        form.password = "whatever".to_string();
        assert_eq!(
            get_login_validation_message(&form).as_deref(),
            Some("Please enter a valid email address")
        );

        form.email = " desk@example.com ".to_string();
        form.password.clear();
        assert_eq!(
            get_login_validation_message(&form).as_deref(),
            Some("Password is required")
        );

        form.password = "x".to_string();
        let request = validate_login(&form).unwrap();
        assert_eq!(request.email, "desk@example.com");
    }

    #[test]
    fn test_validate_registration_complete() {
        let request = validate_registration(&complete_registration()).unwrap();
        assert_eq!(request.name, "Test Reporter");
    }

    #[test]
    fn test_registration_rules_in_order() {
        let mut form = complete_registration();
        form.name = "   ".to_string();
        assert_eq!(
            get_register_validation_message(&form).as_deref(),
            Some("Name is required")
        );

        let mut form = complete_registration();
        form.email = "reporter@".to_string();
        assert_eq!(
            get_register_validation_message(&form).as_deref(),
            Some("Please enter a valid email address")
        );

        let mut form = complete_registration();
        form.password = "short".to_string();
        form.password_confirm = "short".to_string();
        assert_eq!(
            get_register_validation_message(&form).as_deref(),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn test_mismatched_confirmation_blocks_registration() {
        let mut form = complete_registration();
        form.password_confirm = "different123".to_string();
        assert!(matches!(
            validate_registration(&form),
            Err(PortalError::Validation(message)) if message == "Passwords do not match"
        ));
    }
}
