//! DOM-side helpers for the workspace: toast notifications, file
//! downloads through object URLs, the print window, and the browser
//! clock/confirm shims.

use wasm_bindgen::JsCast;
use web_sys::{HtmlAnchorElement, HtmlElement};

/// Displays a temporary notification at the bottom of the screen. The
/// toast removes itself after a few seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Today's date from the browser clock, `YYYY-MM-DD`.
pub fn today_string() -> String {
    let now = js_sys::Date::new_0();
    format!(
        "{:04}-{:02}-{:02}",
        now.get_full_year(),
        now.get_month() + 1,
        now.get_date()
    )
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

fn text_blob(content: &str, mime: &str) -> Option<web_sys::Blob> {
    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(content));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    web_sys::Blob::new_with_str_sequence_and_options(&parts, &options).ok()
}

/// Offers `content` as a file download via a temporary object URL on an
/// invisible anchor element.
pub fn download_file(file_name: &str, mime: &str, content: &str) {
    let Some(url) = text_blob(content, mime)
        .and_then(|blob| web_sys::Url::create_object_url_with_blob(&blob).ok())
    else {
        show_toast("Could not prepare the download.");
        return;
    };
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let (Ok(anchor), Some(body)) = (document.create_element("a"), document.body()) {
            let anchor: HtmlAnchorElement = anchor.unchecked_into();
            anchor.set_href(&url);
            anchor.set_download(file_name);
            if body.append_child(&anchor).is_ok() {
                anchor.click();
                body.remove_child(&anchor).ok();
            }
        }
    }
    web_sys::Url::revoke_object_url(&url).ok();
}

/// Opens a standalone HTML document in a new tab; the document carries its
/// own print trigger.
pub fn open_print_window(html: &str) {
    let Some(url) = text_blob(html, "text/html")
        .and_then(|blob| web_sys::Url::create_object_url_with_blob(&blob).ok())
    else {
        show_toast("Could not open the print view.");
        return;
    };
    let opened = web_sys::window()
        .and_then(|w| w.open_with_url_and_target(&url, "_blank").ok())
        .flatten()
        .is_some();
    if !opened {
        show_toast("The browser blocked the print window. Allow pop-ups and retry.");
    }
    // The new tab holds its own reference; the URL can be dropped after a
    // grace period.
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(10_000).await;
        web_sys::Url::revoke_object_url(&url).ok();
    });
}
