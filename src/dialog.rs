//! Modal dialog registry.
//!
//! Entries progress `created (out = false)` -> `marked out (exit animation
//! running)` -> `purged from the registry` after a fixed 225 ms grace delay.
//! Cancel/confirm signals are gated by per-dialog suppress flags; calling
//! [`remove_dialog`] directly always wins.

use std::cell::{Cell, RefCell};

use gloo_timers::future::TimeoutFuture;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

use crate::constants::DIALOG_PURGE_DELAY_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogOptions {
    pub prevent_cancel: bool,
    pub prevent_confirm: bool,
}

impl Default for DialogOptions {
    // Confirm is suppressed by default: a dialog owner must opt in before a
    // confirm signal may close it.
    fn default() -> Self {
        Self {
            prevent_cancel: false,
            prevent_confirm: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DialogEntry {
    /// Monotonic, process-wide.
    pub id: u32,
    /// Opaque handle naming the UI component to mount.
    pub component: String,
    pub props: Option<Value>,
    pub options: DialogOptions,
    pub out: bool,
}

thread_local! {
    static DIALOGS: RefCell<Vec<DialogEntry>> = RefCell::new(Vec::new());
    static NEXT_ID: Cell<u32> = Cell::new(0);
}

pub fn add_dialog(component: &str, props: Option<Value>, options: Option<DialogOptions>) -> u32 {
    let id = NEXT_ID.with(|n| {
        let id = n.get();
        n.set(id + 1);
        id
    });
    DIALOGS.with(|d| {
        d.borrow_mut().push(DialogEntry {
            id,
            component: component.to_string(),
            props,
            options: options.unwrap_or_default(),
            out: false,
        })
    });
    id
}

/// Mark the dialog `out` and purge it after the exit-animation grace delay.
/// Unknown ids and dialogs already on their way out are no-ops.
pub fn remove_dialog(id: u32) {
    let marked = DIALOGS.with(|d| {
        let mut list = d.borrow_mut();
        match list.iter_mut().find(|e| e.id == id) {
            Some(entry) if !entry.out => {
                entry.out = true;
                true
            }
            _ => false,
        }
    });
    if !marked {
        return;
    }

    spawn_local(async move {
        TimeoutFuture::new(DIALOG_PURGE_DELAY_MS).await;
        DIALOGS.with(|d| d.borrow_mut().retain(|e| e.id != id));
    });
}

/// Removal triggered by a cancel signal (backdrop click, Escape).
pub fn remove_dialog_from_cancel(id: u32) {
    let allowed = DIALOGS.with(|d| {
        d.borrow()
            .iter()
            .find(|e| e.id == id)
            .map(|e| !e.options.prevent_cancel)
    });
    if allowed == Some(true) {
        remove_dialog(id);
    }
}

/// Removal triggered by a confirm signal (primary button).
pub fn remove_dialog_from_confirm(id: u32) {
    let allowed = DIALOGS.with(|d| {
        d.borrow()
            .iter()
            .find(|e| e.id == id)
            .map(|e| !e.options.prevent_confirm)
    });
    if allowed == Some(true) {
        remove_dialog(id);
    }
}

/// Snapshot of the registry, including entries still animating out.
pub fn dialogs() -> Vec<DialogEntry> {
    DIALOGS.with(|d| d.borrow().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn entry(id: u32) -> Option<DialogEntry> {
        dialogs().into_iter().find(|e| e.id == id)
    }

    #[wasm_bindgen_test]
    fn ids_are_monotonic() {
        let a = add_dialog("confirm-delete", None, None);
        let b = add_dialog("create-website", None, None);
        assert!(b > a);
        remove_dialog(a);
        remove_dialog(b);
    }

    #[wasm_bindgen_test]
    async fn removal_marks_out_then_purges() {
        let id = add_dialog("confirm-delete", None, None);
        assert!(!entry(id).unwrap().out);

        remove_dialog(id);
        // Still registered during the exit animation, but marked out.
        assert!(entry(id).unwrap().out);

        TimeoutFuture::new(DIALOG_PURGE_DELAY_MS + 75).await;
        assert!(entry(id).is_none());

        // Removing again after the purge is a no-op.
        remove_dialog(id);
        assert!(entry(id).is_none());
    }

    #[wasm_bindgen_test]
    async fn double_removal_is_a_no_op() {
        let id = add_dialog("confirm-delete", None, None);
        remove_dialog(id);
        remove_dialog(id);
        assert!(entry(id).unwrap().out);
        TimeoutFuture::new(DIALOG_PURGE_DELAY_MS + 75).await;
        assert!(entry(id).is_none());
    }

    #[wasm_bindgen_test]
    async fn cancel_and_confirm_respect_suppress_flags() {
        // Defaults: cancel allowed, confirm suppressed.
        let id = add_dialog("create-website", None, None);
        remove_dialog_from_confirm(id);
        assert!(!entry(id).unwrap().out, "default blocks confirm");
        remove_dialog_from_cancel(id);
        assert!(entry(id).unwrap().out, "default allows cancel");

        let locked = add_dialog(
            "progress",
            None,
            Some(DialogOptions {
                prevent_cancel: true,
                prevent_confirm: true,
            }),
        );
        remove_dialog_from_cancel(locked);
        remove_dialog_from_confirm(locked);
        assert!(!entry(locked).unwrap().out);

        // Direct removal ignores both flags.
        remove_dialog(locked);
        assert!(entry(locked).unwrap().out);

        TimeoutFuture::new(DIALOG_PURGE_DELAY_MS + 75).await;
        assert!(entry(id).is_none());
        assert!(entry(locked).is_none());
    }

    #[wasm_bindgen_test]
    fn props_and_component_are_kept() {
        let id = add_dialog(
            "create-website",
            Some(serde_json::json!({"host": "example.com"})),
            None,
        );
        let e = entry(id).unwrap();
        assert_eq!(e.component, "create-website");
        assert_eq!(e.props.unwrap()["host"], "example.com");
        remove_dialog(id);
    }
}
