//! Small time helpers shared across the frontend.

use wasm_bindgen::JsValue;

/// Current timestamp in **milliseconds** since UNIX epoch.
///
/// JS `Date` is used because it is available in browser/WASM without pulling
/// a clock source of our own.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Parse a datetime string (ISO-8601 or anything else `Date` accepts) into
/// milliseconds since epoch.  Returns `None` when the string is not a date.
pub fn parse_date_ms(value: &str) -> Option<f64> {
    let date = js_sys::Date::new(&JsValue::from_str(value));
    let ms = date.get_time();
    if ms.is_nan() {
        None
    } else {
        Some(ms)
    }
}

// wasm-bindgen tests ----------------------------------------------------------
