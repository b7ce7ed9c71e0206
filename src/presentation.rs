//! Presentation (toast) registry.
//!
//! Each entry is armed with a `setTimeout` auto-dismiss when it is created
//! and rendered into a `#presentation-root` container.  Removal cancels the
//! pending timer, so an early explicit dismiss cannot be followed by a
//! second removal when the timer fires; removing an unknown id is a no-op.

use std::cell::RefCell;

use uuid::Uuid;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element};

use crate::constants::DEFAULT_FADE_OUT_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationKind {
    Success,
    Alert,
}

#[derive(Debug, Clone)]
pub struct PresentationEntry {
    pub id: Uuid,
    pub message: String,
    pub kind: PresentationKind,
    pub fade_out: u32,
    task_id: Option<i32>,
}

thread_local! {
    static PRESENTATIONS: RefCell<Vec<PresentationEntry>> = RefCell::new(Vec::new());
}

pub fn success(message: &str) -> Uuid {
    add_presentation(message, PresentationKind::Success, None)
}

pub fn alert(message: &str) -> Uuid {
    add_presentation(message, PresentationKind::Alert, None)
}

/// Queue a notice; it dismisses itself after `fade_out` (default 5 s) unless
/// removed earlier.  Returns the id used for explicit removal.
pub fn add_presentation(message: &str, kind: PresentationKind, fade_out: Option<u32>) -> Uuid {
    let fade_out = fade_out.unwrap_or(DEFAULT_FADE_OUT_MS);
    let id = Uuid::new_v4();

    let task_id = web_sys::window().and_then(|window| {
        let cb = Closure::once_into_js(move || remove_presentation(id));
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.unchecked_ref(),
                fade_out as i32,
            )
            .ok()
    });

    PRESENTATIONS.with(|p| {
        p.borrow_mut().push(PresentationEntry {
            id,
            message: message.to_string(),
            kind,
            fade_out,
            task_id,
        })
    });

    render(id, message, kind);
    id
}

/// Remove a notice and cancel its auto-dismiss timer.  Idempotent.
pub fn remove_presentation(id: Uuid) {
    let removed = PRESENTATIONS.with(|p| {
        let mut list = p.borrow_mut();
        list.iter()
            .position(|e| e.id == id)
            .map(|idx| list.remove(idx))
    });
    let Some(entry) = removed else { return };

    if let Some(window) = web_sys::window() {
        if let Some(task_id) = entry.task_id {
            window.clear_timeout_with_handle(task_id);
        }
        if let Some(el) = window
            .document()
            .and_then(|d| d.get_element_by_id(&dom_id(id)))
        {
            el.remove();
        }
    }
}

/// Snapshot of the live notices, newest last.
pub fn presentations() -> Vec<PresentationEntry> {
    PRESENTATIONS.with(|p| p.borrow().clone())
}

fn dom_id(id: Uuid) -> String {
    format!("presentation-{}", id)
}

// ---------------------------------------------------------------------------
// DOM rendering
// ---------------------------------------------------------------------------

fn render(id: Uuid, message: &str, kind: PresentationKind) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(root) = ensure_root(&document) else {
        return;
    };

    let Ok(el) = document.create_element("div") else {
        return;
    };
    el.set_id(&dom_id(id));
    el.set_class_name(match kind {
        PresentationKind::Success => "presentation presentation-success",
        PresentationKind::Alert => "presentation presentation-alert",
    });
    el.set_text_content(Some(message));

    // Newest on top.
    let _ = root.prepend_with_node_1(&el);
    ensure_styles(&document);
}

fn ensure_root(document: &Document) -> Option<Element> {
    if let Some(el) = document.get_element_by_id("presentation-root") {
        return Some(el);
    }
    let root = document.create_element("div").ok()?;
    root.set_id("presentation-root");
    root.set_class_name("presentation-root");
    document.body()?.append_child(&root).ok()?;
    Some(root)
}

fn ensure_styles(document: &Document) {
    if document.get_element_by_id("presentation-styles").is_some() {
        return;
    }

    let css = "
.presentation-root{position:fixed;top:16px;right:16px;display:flex;flex-direction:column;gap:8px;z-index:9999}
.presentation{padding:10px 16px;border-radius:4px;color:#fff;box-shadow:0 2px 4px rgba(0,0,0,.1)}
.presentation-success{background:#16a34a}
.presentation-alert{background:#dc2626}
";

    if let Ok(style) = document.create_element("style") {
        style.set_id("presentation-styles");
        style.set_text_content(Some(css));
        if let Some(head) = document.query_selector("head").ok().flatten() {
            let _ = head.append_child(&style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn contains(id: Uuid) -> bool {
        presentations().iter().any(|e| e.id == id)
    }

    #[wasm_bindgen_test]
    fn explicit_removal_is_idempotent() {
        let id = success("saved");
        assert!(contains(id));

        remove_presentation(id);
        assert!(!contains(id));

        // Second removal of the same id is a no-op.
        remove_presentation(id);
        assert!(!contains(id));
    }

    #[wasm_bindgen_test]
    async fn timer_auto_dismisses() {
        let id = add_presentation("brief", PresentationKind::Alert, Some(10));
        assert!(contains(id));
        TimeoutFuture::new(60).await;
        assert!(!contains(id));
    }

    #[wasm_bindgen_test]
    async fn early_removal_cancels_the_timer() {
        let keeper = add_presentation("stays", PresentationKind::Success, Some(10_000));
        let id = add_presentation("gone early", PresentationKind::Alert, Some(20));
        remove_presentation(id);
        assert!(!contains(id));

        // Let the cancelled timer's slot pass; nothing else may disappear.
        TimeoutFuture::new(80).await;
        assert!(contains(keeper));
        remove_presentation(keeper);
    }

    #[wasm_bindgen_test]
    fn renders_and_cleans_up_dom_nodes() {
        let document = web_sys::window().unwrap().document().unwrap();
        let id = alert("bad credentials");
        assert!(document.get_element_by_id(&dom_id(id)).is_some());
        remove_presentation(id);
        assert!(document.get_element_by_id(&dom_id(id)).is_none());
    }
}
