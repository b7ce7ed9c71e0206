//! localStorage access for the two durable keys this frontend owns:
//! `"token"` (serialized `AuthResponse`) and `"dark"` (`"true"`/`"false"`).

use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::constants::{DARK_STORAGE_KEY, TOKEN_STORAGE_KEY};
use crate::models::AuthResponse;

fn local_storage() -> Option<Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Read and parse the persisted token.  Returns `None` when the key is
/// absent or the stored JSON no longer parses (a stale value from an older
/// build is treated as no token at all).
pub fn read_token() -> Option<AuthResponse> {
    let storage = local_storage()?;
    let raw = storage.get_item(TOKEN_STORAGE_KEY).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

pub fn write_token(token: &AuthResponse) -> Result<(), JsValue> {
    let storage = local_storage().ok_or_else(|| JsValue::from_str("no localStorage"))?;
    let raw = serde_json::to_string(token).map_err(|e| JsValue::from_str(&e.to_string()))?;
    storage.set_item(TOKEN_STORAGE_KEY, &raw)
}

pub fn clear_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_STORAGE_KEY);
    }
}

/// Stored dark-mode preference; `None` when the user never chose one.
pub fn read_dark_preference() -> Option<bool> {
    let storage = local_storage()?;
    let raw = storage.get_item(DARK_STORAGE_KEY).ok().flatten()?;
    Some(raw == "true")
}

pub fn write_dark_preference(dark: bool) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(DARK_STORAGE_KEY, if dark { "true" } else { "false" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn token_round_trip() {
        clear_token();
        assert!(read_token().is_none());

        let token = AuthResponse {
            token: "jwt-abc".into(),
            exp_at: "2030-01-01T00:00:00Z".into(),
        };
        write_token(&token).unwrap();
        assert_eq!(read_token(), Some(token));

        clear_token();
        assert!(read_token().is_none());
    }

    #[wasm_bindgen_test]
    fn unparseable_stored_token_reads_as_none() {
        let storage = local_storage().unwrap();
        storage.set_item(TOKEN_STORAGE_KEY, "{not json").unwrap();
        assert!(read_token().is_none());
        clear_token();
    }

    #[wasm_bindgen_test]
    fn dark_preference_round_trip() {
        write_dark_preference(true);
        assert_eq!(read_dark_preference(), Some(true));
        write_dark_preference(false);
        assert_eq!(read_dark_preference(), Some(false));
    }
}
