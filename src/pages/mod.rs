//! Minimal page renderers.
//!
//! Layout and styling are deliberately bare; these exist so every store and
//! API module has a real consumer.  Each page builds its DOM synchronously
//! and fills data in from a spawned fetch.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlInputElement};

use crate::dialog;
use crate::network::{user_cache, ApiClient};
use crate::presentation;
use crate::router::{self, Page};
use crate::theme;
use crate::{auth, error::ApiError};

/// Render the page for `path` into the `#app` container.
pub fn render(path: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(root) = ensure_app_root(&document) else {
        return;
    };
    root.set_inner_html("");

    let page = router::resolve(path);
    let result = match page {
        Page::Login => render_login(&document, &root),
        _ => render_dashboard(&document, &root, page),
    };
    if let Err(e) = result {
        web_sys::console::error_1(&format!("failed to render {}: {:?}", path, e).into());
    }
}

fn ensure_app_root(document: &Document) -> Option<Element> {
    if let Some(el) = document.get_element_by_id("app") {
        return Some(el);
    }
    let root = document.create_element("div").ok()?;
    root.set_id("app");
    document.body()?.append_child(&root).ok()?;
    Some(root)
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

fn render_login(document: &Document, root: &Element) -> Result<(), JsValue> {
    let form = document.create_element("div")?;
    form.set_class_name("login-form");

    let username: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    username.set_id("login-username");
    username.set_placeholder("Username");

    let totp: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    totp.set_id("login-totp");
    totp.set_placeholder("TOTP code");

    let button = document.create_element("button")?;
    button.set_id("login-submit");
    button.set_text_content(Some("Sign in"));

    form.append_child(&username)?;
    form.append_child(&totp)?;
    form.append_child(&button)?;
    root.append_child(&form)?;

    let on_click = Closure::<dyn FnMut()>::new(move || {
        let username = username.value();
        let totp = totp.value();
        spawn_local(async move {
            match auth::login(&username, &totp).await {
                Ok(_) => router::push("/"),
                // Invalid credentials already queued their own alert.
                Err(ApiError::InvalidCredentials) => {}
                Err(e) => {
                    presentation::alert(&e.to_string());
                }
            }
        });
    });
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    Ok(())
}

// ---------------------------------------------------------------------------
// Dashboard shell + sections
// ---------------------------------------------------------------------------

fn render_dashboard(document: &Document, root: &Element, page: Page) -> Result<(), JsValue> {
    render_nav(document, root)?;

    let section = document.create_element("div")?;
    section.set_id("page-content");
    root.append_child(&section)?;

    match page {
        Page::Websites => render_websites(document, &section)?,
        Page::Logs => render_logs(document, &section)?,
        Page::DnsProviders => render_dns_providers(document, &section)?,
        Page::Settings => render_settings(document, &section)?,
        // Overview and the certificates placeholder share the websites view.
        _ => render_websites(document, &section)?,
    }
    Ok(())
}

fn render_nav(document: &Document, root: &Element) -> Result<(), JsValue> {
    let nav = document.create_element("nav")?;
    for (label, path) in [
        ("Websites", "/websites"),
        ("Logs", "/logs"),
        ("DNS providers", "/dnsproviders"),
        ("Settings", "/settings"),
    ] {
        let link = document.create_element("button")?;
        link.set_text_content(Some(label));
        let on_click = Closure::<dyn FnMut()>::new(move || router::push(path));
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        nav.append_child(&link)?;
    }
    root.append_child(&nav)?;
    Ok(())
}

fn render_websites(document: &Document, section: &Element) -> Result<(), JsValue> {
    let list = document.create_element("ul")?;
    list.set_id("website-list");
    section.append_child(&list)?;

    spawn_local(async move {
        match ApiClient::get_websites().await {
            Ok(websites) => {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let Some(list) = document.get_element_by_id("website-list") else {
                    return;
                };
                for site in websites {
                    if let Ok(row) = document.create_element("li") {
                        let name = site.name.unwrap_or_else(|| site.hosts.join(", "));
                        row.set_text_content(Some(&format!(
                            "{} ({} backends)",
                            name,
                            site.backends.len()
                        )));
                        let _ = list.append_child(&row);
                    }
                }
            }
            Err(e) => {
                web_sys::console::error_1(&format!("failed to load websites: {}", e).into());
            }
        }
    });
    Ok(())
}

fn render_logs(document: &Document, section: &Element) -> Result<(), JsValue> {
    let total = document.create_element("p")?;
    total.set_id("log-total");
    section.append_child(&total)?;

    let list = document.create_element("ul")?;
    list.set_id("log-list");
    section.append_child(&list)?;

    spawn_local(async move {
        if let Ok(count) = ApiClient::get_log_total().await {
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("log-total"))
            {
                el.set_text_content(Some(&format!("{} entries", count)));
            }
        }

        match ApiClient::fetch_log(20, 1).await {
            Ok(logs) => {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let Some(list) = document.get_element_by_id("log-list") else {
                    return;
                };
                for log in logs {
                    // Same user over and over collapses into one lookup.
                    let who = match user_cache::get_user_info(&log.user_id).await {
                        Ok(user) => user.username,
                        Err(_) => log.user_id.clone(),
                    };
                    if let Ok(row) = document.create_element("li") {
                        row.set_text_content(Some(&format!(
                            "{} {} [{}] {}",
                            log.created_at.to_rfc3339(),
                            who,
                            log.address,
                            log.display_content()
                        )));
                        let _ = list.append_child(&row);
                    }
                }
            }
            Err(e) => {
                web_sys::console::error_1(&format!("failed to load logs: {}", e).into());
            }
        }
    });
    Ok(())
}

fn render_dns_providers(document: &Document, section: &Element) -> Result<(), JsValue> {
    let total = document.create_element("p")?;
    total.set_id("dnsprovider-total");
    section.append_child(&total)?;

    let list = document.create_element("ul")?;
    list.set_id("dnsprovider-list");
    section.append_child(&list)?;

    spawn_local(async move {
        if let Ok(count) = ApiClient::dns_provider_total().await {
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("dnsprovider-total"))
            {
                el.set_text_content(Some(&format!("{} providers", count)));
            }
        }

        match ApiClient::fetch_dns_providers(1, 20).await {
            Ok(providers) => {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let Some(list) = document.get_element_by_id("dnsprovider-list") else {
                    return;
                };
                for p in providers {
                    if let Ok(row) = document.create_element("li") {
                        row.set_text_content(Some(&format!(
                            "{} ({}) - {}",
                            p.name,
                            p.provider_type,
                            p.domains.join(", ")
                        )));
                        let _ = list.append_child(&row);
                    }
                }
            }
            Err(e) => {
                web_sys::console::error_1(&format!("failed to load dns providers: {}", e).into());
            }
        }
    });
    Ok(())
}

fn render_settings(document: &Document, section: &Element) -> Result<(), JsValue> {
    let dark_btn = document.create_element("button")?;
    dark_btn.set_text_content(Some(if theme::is_dark() {
        "Switch to light mode"
    } else {
        "Switch to dark mode"
    }));
    let on_theme = Closure::<dyn FnMut()>::new(move || {
        if theme::is_dark() {
            theme::toggle_light();
        } else {
            theme::toggle_dark();
        }
        router::push("/settings");
    });
    dark_btn.add_event_listener_with_callback("click", on_theme.as_ref().unchecked_ref())?;
    on_theme.forget();
    section.append_child(&dark_btn)?;

    let logout_btn = document.create_element("button")?;
    logout_btn.set_id("logout-button");
    logout_btn.set_text_content(Some("Log out"));
    let on_logout = Closure::<dyn FnMut()>::new(move || {
        confirm_logout_dialog();
    });
    logout_btn.add_event_listener_with_callback("click", on_logout.as_ref().unchecked_ref())?;
    on_logout.forget();
    section.append_child(&logout_btn)?;

    Ok(())
}

/// Confirmation dialog in front of logout.  Confirm must be explicitly
/// allowed since the registry suppresses it by default.
fn confirm_logout_dialog() {
    let id = dialog::add_dialog(
        "confirm-logout",
        None,
        Some(dialog::DialogOptions {
            prevent_cancel: false,
            prevent_confirm: false,
        }),
    );

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(modal) = document.create_element("div") else {
        return;
    };
    modal.set_id(&format!("dialog-{}", id));
    modal.set_class_name("dialog");
    modal.set_text_content(Some("Log out of the dashboard?"));

    let wire = |label: &str, confirm: bool| -> Result<Element, JsValue> {
        let btn = document.create_element("button")?;
        btn.set_text_content(Some(label));
        let on_click = Closure::<dyn FnMut()>::new(move || {
            if confirm {
                dialog::remove_dialog_from_confirm(id);
                auth::logout();
            } else {
                dialog::remove_dialog_from_cancel(id);
            }
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(&format!("dialog-{}", id)))
            {
                el.remove();
            }
        });
        btn.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
        Ok(btn)
    };

    if let (Ok(cancel), Ok(confirm)) = (wire("Cancel", false), wire("Log out", true)) {
        let _ = modal.append_child(&cancel);
        let _ = modal.append_child(&confirm);
    }
    if let Some(body) = document.body() {
        let _ = body.append_child(&modal);
    }
}
