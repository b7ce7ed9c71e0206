//! Auth store: login/logout, local token inspection and live validation.
//!
//! The token lives in localStorage (see `storage`); an expired token is
//! indistinguishable from an absent one.  Authentication failures are always
//! user-visible - an alert presentation plus a redirect to the login route -
//! while plain transport failures below this layer propagate raw.

use crate::constants::LOGIN_ROUTE;
use crate::error::ApiError;
use crate::models::{AuthPostBody, AuthResponse};
use crate::network::ApiClient;
use crate::presentation;
use crate::router;
use crate::storage;
use crate::utils;

/// POST credentials; persist the returned token on success.
///
/// A 401 envelope surfaces the server message as an alert and fails with
/// [`ApiError::InvalidCredentials`]; nothing is persisted in that case.
pub async fn login(username: &str, totp: &str) -> Result<bool, ApiError> {
    let env = ApiClient::login(&AuthPostBody {
        username: username.to_string(),
        totp: totp.to_string(),
    })
    .await?;
    persist_login(env)
}

fn persist_login(env: crate::models::ApiEnvelope<AuthResponse>) -> Result<bool, ApiError> {
    if env.status == 401 {
        presentation::alert(env.message.as_deref().unwrap_or(""));
        return Err(ApiError::InvalidCredentials);
    }

    let auth = env.data.ok_or_else(|| {
        ApiError::Transport(format!(
            "auth/login responded without a token (status {})",
            env.status
        ))
    })?;
    storage::write_token(&auth).map_err(ApiError::from)?;
    Ok(true)
}

/// Persisted token, or `None` when absent or expired.
///
/// An `exp_at` that does not parse as a date is not "strictly before now",
/// so such a token is returned unchanged rather than dropped.
pub fn get_local_token() -> Option<AuthResponse> {
    let token = storage::read_token()?;
    match utils::parse_date_ms(&token.exp_at) {
        Some(exp_ms) if exp_ms < utils::now_ms() => None,
        _ => Some(token),
    }
}

/// Bearer string of a valid local token.
///
/// With `redirect` the missing-token case raises an alert, forces navigation
/// to the login route and fails with [`ApiError::InvalidToken`]; without it
/// the caller gets a silent `None` (used for non-fatal background calls).
pub fn get_token(redirect: bool) -> Result<Option<String>, ApiError> {
    match get_local_token() {
        Some(token) => Ok(Some(token.token)),
        None if redirect => {
            presentation::alert("Invalid Token");
            router::push(LOGIN_ROUTE);
            Err(ApiError::InvalidToken)
        }
        None => Ok(None),
    }
}

/// Validate the current token against the server.  A transport failure
/// clears the persisted token; a non-200 envelope only reports invalid.
pub async fn check_token() -> bool {
    if get_local_token().is_none() {
        return false;
    }
    evaluate_check(ApiClient::check_auth().await)
}

fn evaluate_check(round_trip: Result<crate::models::ApiEnvelope<serde_json::Value>, ApiError>) -> bool {
    match round_trip {
        Ok(env) => env.status == 200,
        Err(_) => {
            storage::clear_token();
            false
        }
    }
}

pub fn logout() {
    storage::clear_token();
    router::push(LOGIN_ROUTE);
}
