//! Field-level checks shared by the login, registration and settings forms.

/// Minimum accepted password length for new accounts
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmailValidation {
    None,
    Valid,
    Invalid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordValidation {
    None,
    Match,
    NoMatch,
}

/// Exactly one `@`, a non-empty local part, and a dotted domain whose
/// labels are all non-empty.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let local_part = parts[0];
    let domain_part = parts[1];

    !local_part.is_empty()
        && domain_part.contains('.')
        && domain_part.split('.').all(|label| !label.is_empty())
}

pub fn validate_email(email: &str) -> EmailValidation {
    if email.trim().is_empty() {
        EmailValidation::None
    } else if is_valid_email(email) {
        EmailValidation::Valid
    } else {
        EmailValidation::Invalid
    }
}

pub fn validate_passwords(password: &str, confirm: &str) -> PasswordValidation {
    if password.is_empty() && confirm.is_empty() {
        PasswordValidation::None
    } else if password == confirm && !password.is_empty() {
        PasswordValidation::Match
    } else {
        PasswordValidation::NoMatch
    }
}

pub fn password_validation_class(validation: &PasswordValidation) -> &'static str {
    match validation {
        PasswordValidation::Match => "input-field input-valid",
        PasswordValidation::NoMatch => "input-field input-invalid",
        _ => "input-field",
    }
}

pub fn password_validation_style(validation: &PasswordValidation) -> &'static str {
    match validation {
        PasswordValidation::Match => "border: 2px solid #10b981; background-color: #f0fdf4;",
        PasswordValidation::NoMatch => "border: 2px solid #ef4444; background-color: #fef2f2;",
        _ => "",
    }
}

pub fn email_validation_class(validation: &EmailValidation) -> &'static str {
    match validation {
        EmailValidation::Valid => "input-field input-valid",
        EmailValidation::Invalid => "input-field input-invalid",
        _ => "input-field",
    }
}

pub fn email_validation_style(validation: &EmailValidation) -> &'static str {
    match validation {
        EmailValidation::Valid => "border: 2px solid #10b981; background-color: #f0fdf4;",
        EmailValidation::Invalid => "border: 2px solid #ef4444; background-color: #fef2f2;",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("editor@example.com"));
        assert!(is_valid_email("  desk.chief@news.co.uk "));
        assert!(is_valid_email("a+tag@sub.example.org"));
    }

    #[test]
    fn test_malformed_emails() {
        for email in [
            "not-an-email",
            "no-domain@",
            "@example.com",
            "user@localhost",
            "user@@example.com",
            "a@b@example.com",
            "user@.com",
            "user@example.",
            "user@exa..mple.com",
            "us er@example.com",
        ] {
            assert!(!is_valid_email(email), "{} should be rejected", email);
        }
    }

    #[test]
    fn test_live_feedback_states() {
        assert_eq!(validate_email(""), EmailValidation::None);
        assert_eq!(validate_email("x"), EmailValidation::Invalid);
        assert_eq!(validate_email("x@y.z"), EmailValidation::Valid);

        assert_eq!(validate_passwords("", ""), PasswordValidation::None);
        assert_eq!(validate_passwords("secret12", "secret12"), PasswordValidation::Match);
        assert_eq!(validate_passwords("secret12", "secret13"), PasswordValidation::NoMatch);
        assert_eq!(validate_passwords("", "secret12"), PasswordValidation::NoMatch);
    }
}
