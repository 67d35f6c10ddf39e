use tracing::{info, instrument};

use super::form_validation::{validate_login, validate_registration, LoginForm, RegisterForm};
use crate::services::client::{PortalApi, Session};
use crate::services::errors::{PortalError, PortalResult};
use crate::services::session::SessionStore;

/// Outcome of a successful login: the service message and the stored session
#[derive(Clone, Debug, PartialEq)]
pub struct LoginOutcome {
    pub message: String,
    pub session: Session,
}

/// Validate, submit once, and persist the returned session.
///
/// Validation failures return before any request is issued.
#[instrument(skip_all, err)]
pub async fn login(
    api: &dyn PortalApi,
    sessions: &dyn SessionStore,
    form: &LoginForm,
) -> PortalResult<LoginOutcome> {
    let request = validate_login(form)?;
    let (message, payload) = api.login(&request).await?.into_result()?;
    let session: Session = payload
        .ok_or_else(|| PortalError::InvalidResponse("login succeeded without a token".to_string()))?
        .into();

    sessions.save(&session)?;
    info!("User {} logged in", session.user.id);

    Ok(LoginOutcome {
        message: if message.is_empty() {
            "Login successful".to_string()
        } else {
            message
        },
        session,
    })
}

/// Validate and submit a registration. No session is created.
#[instrument(skip_all, err)]
pub async fn register(api: &dyn PortalApi, form: &RegisterForm) -> PortalResult<String> {
    let request = validate_registration(form)?;
    let (message, _) = api.register(&request).await?.into_result()?;
    info!("Registration accepted for {}", request.email);

    Ok(if message.is_empty() {
        "Registration successful, please log in".to_string()
    } else {
        message
    })
}

/// Drop the persisted session. No server round trip.
pub fn logout(sessions: &dyn SessionStore) -> PortalResult<()> {
    sessions.clear()?;
    info!("User logged out");
    Ok(())
}
