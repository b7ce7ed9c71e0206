pub mod api_client;
pub mod user_cache;

pub use api_client::ApiClient;

/// Base URL for all API calls - same origin, under `/api`.
pub(crate) fn get_api_base_url() -> String {
    if let Some(window) = web_sys::window() {
        if let Ok(origin) = window.location().origin() {
            return format!("{}/api", origin);
        }
    }
    // Headless contexts (unit tests) fall back to a relative path.
    "/api".to_string()
}
