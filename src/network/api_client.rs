//! HTTP client core plus the thin per-resource wrappers.
//!
//! Every call funnels through [`ApiClient::request`], which normalizes the
//! response into an [`ApiEnvelope`] and never fails on HTTP status alone.
//! A body that does not decode is replaced by a synthetic envelope built
//! from the raw status line; only a rejected fetch reaches the caller as an
//! error.  Credential rotation rides on responses out-of-band: whenever both
//! `Refresh-Token` and `Refresh-Token-Expired` headers are present the
//! persisted token is silently overwritten, whatever the call's own outcome.

use serde::de::DeserializeOwned;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::auth;
use crate::constants::{REFRESH_TOKEN_EXPIRED_HEADER, REFRESH_TOKEN_HEADER};
use crate::error::ApiError;
use crate::models::{
    ApiEnvelope, AuthPostBody, AuthResponse, DnsProvider, DnsProviderCreateRequest, Log, UserInfo,
    Website, WebsiteCreateRequest,
};
use crate::storage;

/// REST client for the dashboard API.
pub struct ApiClient;

impl ApiClient {
    fn api_base_url() -> String {
        super::get_api_base_url()
    }

    /// One round-trip to the API.  `path` is relative to the `/api` prefix and
    /// may carry its own query string.  `with_auth` attaches the bearer token
    /// when one is locally available; an absent token sends the request
    /// unauthenticated and lets the server (or the route guard) reject it.
    pub async fn request<T: DeserializeOwned>(
        method: &str,
        path: &str,
        body: Option<&str>,
        with_auth: bool,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let url = format!("{}/{}", Self::api_base_url(), path);

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new().map_err(ApiError::from)?;
        if with_auth {
            if let Some(token) = auth::get_token(false)? {
                headers
                    .append("Authorization", &format!("Bearer {}", token))
                    .map_err(ApiError::from)?;
            }
        }
        if let Some(data) = body {
            opts.set_body(&JsValue::from_str(data));
            headers
                .append("Content-Type", "application/json")
                .map_err(ApiError::from)?;
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(&url, &opts).map_err(ApiError::from)?;
        let window =
            web_sys::window().ok_or_else(|| ApiError::Transport("no global window".into()))?;

        // A rejected fetch is the one failure callers see raw.
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(ApiError::from)?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| ApiError::Transport("fetch returned a non-Response value".into()))?;

        rotate_token_from_headers(&resp);

        let status = resp.status();
        let status_text = resp.status_text();
        let text = match resp.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };

        Ok(envelope_from_body(status, &status_text, &text))
    }

    // -------------------------------------------------------------------
    // Auth endpoints (consumed by the auth store, not directly by pages)
    // -------------------------------------------------------------------

    pub async fn login(body: &AuthPostBody) -> Result<ApiEnvelope<AuthResponse>, ApiError> {
        let json = serde_json::to_string(body).map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::request("POST", "auth/login", Some(&json), false).await
    }

    /// Live token validation round-trip (`GET auth`), status only.
    pub async fn check_auth() -> Result<ApiEnvelope<Value>, ApiError> {
        Self::request("GET", "auth", None, true).await
    }

    /// Raw user-info lookup.  Callers go through `user_cache::get_user_info`
    /// which adds caching and request coalescing on top.
    pub async fn fetch_user_info(user_id: &str) -> Result<UserInfo, ApiError> {
        let path = format!(
            "auth/info?user_id={}",
            js_sys::encode_uri_component(user_id)
        );
        let env = Self::request("GET", &path, None, true).await?;
        data_or_transport(env, "auth/info")
    }

    // -------------------------------------------------------------------
    // Websites
    // -------------------------------------------------------------------

    pub async fn create_website(website: &WebsiteCreateRequest) -> Result<Website, ApiError> {
        let json =
            serde_json::to_string(website).map_err(|e| ApiError::Transport(e.to_string()))?;
        let env = Self::request("POST", "websites/create", Some(&json), true).await?;
        data_or_transport(env, "websites/create")
    }

    pub async fn get_websites() -> Result<Vec<Website>, ApiError> {
        let env = Self::request("GET", "websites", None, true).await?;
        data_or_transport(env, "websites")
    }

    // -------------------------------------------------------------------
    // Logs
    // -------------------------------------------------------------------

    pub async fn get_log_total() -> Result<u64, ApiError> {
        let env = Self::request("GET", "logs/total", None, true).await?;
        data_or_transport(env, "logs/total")
    }

    /// One page of the audit log, newest-first order preserved as returned.
    pub async fn fetch_log(limit: u32, page: u32) -> Result<Vec<Log>, ApiError> {
        let path = format!("logs/page?limit={}&page={}", limit, page);
        let env = Self::request("GET", &path, None, true).await?;
        data_or_transport(env, "logs/page")
    }

    // -------------------------------------------------------------------
    // DNS providers
    // -------------------------------------------------------------------

    /// Returns the whole envelope so callers can show the server message on
    /// a non-200 status.
    pub async fn create_dns_provider(
        provider: &DnsProviderCreateRequest,
    ) -> Result<ApiEnvelope<Value>, ApiError> {
        let json =
            serde_json::to_string(provider).map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::request("POST", "dnsproviders/create", Some(&json), true).await
    }

    pub async fn dns_provider_total() -> Result<u64, ApiError> {
        let env = Self::request("GET", "dnsproviders/total", None, true).await?;
        data_or_transport(env, "dnsproviders/total")
    }

    pub async fn fetch_dns_providers(page: u32, size: u32) -> Result<Vec<DnsProvider>, ApiError> {
        let path = format!("dnsproviders/page?page={}&size={}", page, size);
        let env = Self::request("GET", &path, None, true).await?;
        data_or_transport(env, "dnsproviders/page")
    }
}

/// Decode a response body into the envelope, falling back to a synthetic one
/// built from the status line.  Parsing problems never propagate.
///
/// Decoding runs in two phases: the envelope itself first, then the typed
/// `data` inside it.  A body that is a valid envelope whose `data` does not
/// fit `T` keeps the server's status and message and only drops the payload.
pub(crate) fn envelope_from_body<T: DeserializeOwned>(
    status: u16,
    status_text: &str,
    body: &str,
) -> ApiEnvelope<T> {
    let Ok(raw) = serde_json::from_str::<ApiEnvelope<Value>>(body) else {
        return ApiEnvelope::synthetic(status, status_text);
    };
    ApiEnvelope {
        status: raw.status,
        message: raw.message,
        data: raw.data.and_then(|v| serde_json::from_value(v).ok()),
    }
}

/// Out-of-band credential rotation: both refresh headers present -> replace
/// the persisted token, regardless of the response status.
fn rotate_token_from_headers(resp: &Response) {
    let headers = resp.headers();
    let token = headers.get(REFRESH_TOKEN_HEADER).ok().flatten();
    let exp_at = headers.get(REFRESH_TOKEN_EXPIRED_HEADER).ok().flatten();
    if let (Some(token), Some(exp_at)) = (token, exp_at) {
        if let Err(e) = storage::write_token(&AuthResponse { token, exp_at }) {
            web_sys::console::error_1(
                &format!("failed to persist rotated token: {:?}", e).into(),
            );
        }
    }
}

fn data_or_transport<T>(env: ApiEnvelope<T>, what: &str) -> Result<T, ApiError> {
    env.data.ok_or_else(|| {
        ApiError::Transport(format!(
            "{} responded without data (status {})",
            what, env.status
        ))
    })
}


#[cfg(test)]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::ResponseInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn response_with_headers(pairs: &[(&str, &str)], status: u16) -> Response {
        let headers = Headers::new().unwrap();
        for (k, v) in pairs {
            headers.append(k, v).unwrap();
        }
        let init = ResponseInit::new();
        init.set_status(status);
        init.set_headers(&headers.into());
        Response::new_with_opt_str_and_init(None, &init).unwrap()
    }

    #[wasm_bindgen_test]
    fn both_refresh_headers_rotate_the_stored_token() {
        storage::clear_token();
        // Rotation rides on any response, a failing one included.
        let resp = response_with_headers(
            &[
                (REFRESH_TOKEN_HEADER, "abc"),
                (REFRESH_TOKEN_EXPIRED_HEADER, "2030-01-01"),
            ],
            500,
        );
        rotate_token_from_headers(&resp);
        let token = storage::read_token().unwrap();
        assert_eq!(token.token, "abc");
        assert_eq!(token.exp_at, "2030-01-01");
        storage::clear_token();
    }

    #[wasm_bindgen_test]
    fn single_refresh_header_does_not_rotate() {
        storage::clear_token();
        let resp = response_with_headers(&[(REFRESH_TOKEN_HEADER, "abc")], 200);
        rotate_token_from_headers(&resp);
        assert!(storage::read_token().is_none());
    }
}
