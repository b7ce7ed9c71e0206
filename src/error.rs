//! Error taxonomy for the network/auth layer.
//!
//! Only three things can actually fail out of the client core: the transport
//! itself, a rejected login, and a guarded call without a usable token.
//! Malformed response bodies are *not* errors - the client core downgrades
//! them to a synthetic envelope instead (see `network::api_client`).

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The fetch itself rejected (network unreachable, CORS, aborted...).
    #[error("network request failed: {0}")]
    Transport(String),

    /// Login rejected by the server (401 on `auth/login`).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A guarded call found no valid local token.
    #[error("invalid token")]
    InvalidToken,
}

impl From<JsValue> for ApiError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        ApiError::Transport(msg)
    }
}
