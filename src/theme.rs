//! Dark-mode preference store.
//!
//! The stored `"dark"` key wins; without one the system
//! `prefers-color-scheme` media query decides, and system changes are only
//! followed while no stored preference exists.  The active choice is applied
//! by toggling the `dark` class on the document element.

use std::cell::Cell;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::MediaQueryListEvent;

use crate::storage;

thread_local! {
    static DARK: Cell<bool> = Cell::new(false);
}

pub fn init_theme() {
    let dark = storage::read_dark_preference().unwrap_or_else(system_prefers_dark);
    set_dark(dark);
    watch_system_preference();
}

pub fn toggle_dark() {
    set_dark(true);
}

pub fn toggle_light() {
    set_dark(false);
}

pub fn is_dark() -> bool {
    DARK.with(|d| d.get())
}

fn set_dark(dark: bool) {
    DARK.with(|d| d.set(dark));
    storage::write_dark_preference(dark);
    apply(dark);
}

fn apply(dark: bool) {
    if let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        let _ = root.class_list().toggle_with_force("dark", dark);
    }
}

fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn watch_system_preference() {
    let Some(mq) = web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
    else {
        return;
    };
    let cb = Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |e: MediaQueryListEvent| {
        if storage::read_dark_preference().is_none() {
            DARK.with(|d| d.set(e.matches()));
            apply(e.matches());
        }
    });
    let _ = mq.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref());
    cb.forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn toggles_persist_and_apply_the_class() {
        let document = web_sys::window().unwrap().document().unwrap();
        let root = document.document_element().unwrap();

        toggle_dark();
        assert!(is_dark());
        assert_eq!(storage::read_dark_preference(), Some(true));
        assert!(root.class_list().contains("dark"));

        toggle_light();
        assert!(!is_dark());
        assert_eq!(storage::read_dark_preference(), Some(false));
        assert!(!root.class_list().contains("dark"));
    }
}
