use wasm_bindgen::prelude::*;

pub mod auth;
pub mod constants;
pub mod dialog;
pub mod error;
pub mod models;
pub mod network;
pub mod pages;
pub mod presentation;
pub mod router;
pub mod storage;
pub mod theme;
pub mod utils;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    // Apply the persisted (or system) theme before anything renders.
    theme::init_theme();

    // Wire up navigation and render the initial route; the router's guard
    // sends unauthenticated visitors to the login page.
    router::init_router();

    Ok(())
}
