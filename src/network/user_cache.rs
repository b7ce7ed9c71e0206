//! Memoized, request-coalescing user-info lookup.
//!
//! User records are small and effectively immutable, so resolved values are
//! kept for the lifetime of the page with no eviction.  Concurrent lookups
//! for the same id share a single underlying request: the first caller
//! registers a `js_sys::Promise` in the pending map *synchronously* before
//! the fetch body runs, later callers await that same promise, and the entry
//! is removed unconditionally once the fetch settles so a failure never
//! wedges the key.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

use crate::error::ApiError;
use crate::models::UserInfo;
use crate::network::ApiClient;

thread_local! {
    static USER_INFOS: RefCell<HashMap<String, UserInfo>> = RefCell::new(HashMap::new());
    static PENDING: RefCell<HashMap<String, js_sys::Promise>> = RefCell::new(HashMap::new());
}

/// Cached `GET auth/info` lookup.  At most one network call is ever in
/// flight per `user_id`; all concurrent callers resolve to the same value.
pub async fn get_user_info(user_id: &str) -> Result<UserInfo, ApiError> {
    let id = user_id.to_string();
    lookup(user_id, async move { ApiClient::fetch_user_info(&id).await }).await
}

async fn lookup<F>(user_id: &str, fetch: F) -> Result<UserInfo, ApiError>
where
    F: Future<Output = Result<UserInfo, ApiError>> + 'static,
{
    if let Some(cached) = USER_INFOS.with(|c| c.borrow().get(user_id).cloned()) {
        return Ok(cached);
    }

    if let Some(pending) = PENDING.with(|p| p.borrow().get(user_id).cloned()) {
        return await_shared(pending).await;
    }

    let key = user_id.to_string();
    let promise = future_to_promise(async move {
        let result = fetch.await;
        // Cleared on success *and* failure, otherwise the key stays wedged.
        PENDING.with(|p| {
            p.borrow_mut().remove(&key);
        });
        match result {
            Ok(info) => {
                USER_INFOS.with(|c| c.borrow_mut().insert(key, info.clone()));
                serde_wasm_bindgen::to_value(&info).map_err(|e| JsValue::from_str(&e.to_string()))
            }
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    });

    // Registered before the promise is first polled (polling happens on a
    // microtask), so a second caller arriving in the same tick coalesces.
    PENDING.with(|p| p.borrow_mut().insert(user_id.to_string(), promise.clone()));

    await_shared(promise).await
}

async fn await_shared(promise: js_sys::Promise) -> Result<UserInfo, ApiError> {
    let value = JsFuture::from(promise).await.map_err(ApiError::from)?;
    serde_wasm_bindgen::from_value(value).map_err(|e| ApiError::Transport(e.to_string()))
}
