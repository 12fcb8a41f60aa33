//! Browser side effects: file downloads and clipboard writes

use std::future::Future;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlElement, HtmlTextAreaElement};

fn document() -> Result<web_sys::Document, String> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "No document available".to_string())
}

/// Click a synthetic anchor so the browser saves `url` as `file_name`
pub fn trigger_download(url: &str, file_name: &str) -> Result<(), String> {
    let document = document()?;
    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create link: {:?}", e))?;
    anchor
        .set_attribute("href", url)
        .and_then(|_| anchor.set_attribute("download", file_name))
        .map_err(|e| format!("Failed to set link attributes: {:?}", e))?;

    let anchor: HtmlElement = anchor
        .dyn_into()
        .map_err(|_| "Link is not an HTML element".to_string())?;
    anchor.click();
    Ok(())
}

/// Which clipboard path succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    Clipboard,
    ExecCommand,
}

/// Try `primary`, then `fallback`. Fails only when both do.
pub async fn copy_with_fallback<P, Fut, F>(
    text: &str,
    primary: P,
    fallback: F,
) -> Result<CopyMethod, String>
where
    P: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<(), String>>,
    F: FnOnce(&str) -> Result<(), String>,
{
    match primary(text.to_string()).await {
        Ok(()) => Ok(CopyMethod::Clipboard),
        Err(primary_err) => {
            tracing::warn!(error = %primary_err, "Clipboard API failed, trying execCommand");
            fallback(text)
                .map(|()| CopyMethod::ExecCommand)
                .map_err(|_| "Could not copy to clipboard".to_string())
        }
    }
}

/// `navigator.clipboard.writeText`
pub async fn write_async_clipboard(text: String) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "No window available".to_string())?;
    let promise = window.navigator().clipboard().write_text(&text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("Clipboard write rejected: {:?}", e))
}

/// Legacy copy through a hidden textarea and `document.execCommand("copy")`
#[allow(deprecated)]
pub fn write_exec_command(text: &str) -> Result<(), String> {
    let document = document()?;
    let body = document.body().ok_or_else(|| "No document body".to_string())?;

    let textarea: HtmlTextAreaElement = document
        .create_element("textarea")
        .map_err(|e| format!("Failed to create textarea: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Element is not a textarea".to_string())?;
    textarea.set_value(text);
    let _ = textarea.style().set_property("position", "fixed");
    let _ = textarea.style().set_property("opacity", "0");

    body.append_child(&textarea)
        .map_err(|e| format!("Failed to attach textarea: {:?}", e))?;
    textarea.select();

    let copied = document
        .dyn_into::<HtmlDocument>()
        .map_err(|_| "Document is not an HTML document".to_string())
        .and_then(|doc| {
            doc.exec_command("copy")
                .map_err(|e| format!("execCommand failed: {:?}", e))
        });
    let _ = body.remove_child(&textarea);

    match copied? {
        true => Ok(()),
        false => Err("execCommand copy was refused".to_string()),
    }
}

/// Copy text to the clipboard, falling back to the legacy path.
/// Resolves to the method used.
#[wasm_bindgen(js_name = copyText)]
pub async fn copy_text(text: String) -> Result<String, JsValue> {
    let method = copy_with_fallback(&text, write_async_clipboard, write_exec_command)
        .await
        .map_err(|e| JsValue::from_str(&e))?;
    Ok(match method {
        CopyMethod::Clipboard => "clipboard",
        CopyMethod::ExecCommand => "execCommand",
    }
    .to_string())
}

/// Link to `tool` on the current page: the page URL without its fragment,
/// with `#tool` appended
pub fn share_link(page_url: &str, tool: &str) -> String {
    let base = page_url.split('#').next().unwrap_or(page_url);
    match tool.trim() {
        "" => base.to_string(),
        tool => format!("{}#{}", base, tool),
    }
}

/// Copy a link to `tool` on this page. Resolves to the copied link.
#[wasm_bindgen(js_name = copyShareLink)]
pub async fn copy_share_link(tool: String) -> Result<String, JsValue> {
    let href = web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window available"))?
        .location()
        .href()?;
    let link = share_link(&href, &tool);
    copy_with_fallback(&link, write_async_clipboard, write_exec_command)
        .await
        .map_err(|e| JsValue::from_str(&e))?;
    Ok(link)
}
