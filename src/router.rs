//! Route table, navigation and the client-side auth guard.
//!
//! Every target except `/login` is gated by a live `check_token()` round
//! trip before it is entered.  The guard is advisory only - the API
//! re-validates the bearer on every call - so a stale history entry can at
//! worst flash the login page.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;

use crate::auth;
use crate::constants::LOGIN_ROUTE;
use crate::pages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Overview,
    Settings,
    Websites,
    Certificates,
    Logs,
    DnsProviders,
}

/// Resolve a location path to a page.  Unknown paths fall through to the
/// dashboard overview, mirroring the catch-all dashboard route.
pub fn resolve(path: &str) -> Page {
    match path.trim_end_matches('/') {
        "/login" => Page::Login,
        "/settings" => Page::Settings,
        "/websites" => Page::Websites,
        "/websites/certificates" => Page::Certificates,
        "/logs" => Page::Logs,
        "/dnsproviders" => Page::DnsProviders,
        _ => Page::Overview,
    }
}

pub fn requires_auth(path: &str) -> bool {
    resolve(path) != Page::Login
}

/// Navigate to `path`: run the guard, push a history entry for the final
/// target and render it.  Fire-and-forget; the guard's network round trip
/// happens off the caller's stack.
pub fn push(path: &str) {
    let path = path.to_string();
    spawn_local(async move {
        let target = guarded_target(path).await;
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&target));
            }
        }
        pages::render(&target);
    });
}

/// Wire up popstate handling and render the initial location.
pub fn init_router() {
    if let Some(window) = web_sys::window() {
        let cb = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(move |_| {
            render_current();
        });
        let _ = window.add_event_listener_with_callback("popstate", cb.as_ref().unchecked_ref());
        cb.forget();
    }
    render_current();
}

async fn guarded_target(path: String) -> String {
    if requires_auth(&path) && !auth::check_token().await {
        LOGIN_ROUTE.to_string()
    } else {
        path
    }
}

fn render_current() {
    let path = current_path();
    spawn_local(async move {
        let target = guarded_target(path).await;
        pages::render(&target);
    });
}

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_paths_resolve() {
        assert_eq!(resolve("/login"), Page::Login);
        assert_eq!(resolve("/settings"), Page::Settings);
        assert_eq!(resolve("/websites"), Page::Websites);
        assert_eq!(resolve("/websites/certificates"), Page::Certificates);
        assert_eq!(resolve("/logs"), Page::Logs);
        assert_eq!(resolve("/dnsproviders"), Page::DnsProviders);
    }

    #[test]
    fn unknown_paths_fall_through_to_overview() {
        assert_eq!(resolve("/"), Page::Overview);
        assert_eq!(resolve(""), Page::Overview);
        assert_eq!(resolve("/nonsense/deep/path"), Page::Overview);
    }

    #[test]
    fn only_login_is_public() {
        assert!(!requires_auth("/login"));
        assert!(!requires_auth("/login/"));
        assert!(requires_auth("/"));
        assert!(requires_auth("/websites"));
        assert!(requires_auth("/anything-else"));
    }
}
