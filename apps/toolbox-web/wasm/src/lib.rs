//! WASM bindings for the browser toolbox
//!
//! State for the PDF tools lives in Rust sessions; calculators are plain
//! functions over `calc_core`. JavaScript handles DOM events and hands over
//! file bytes.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { MergeSession, ReorderSession, numberToWords, copyText } from './pkg/toolbox_wasm.js';
//!
//! await init();
//!
//! // Merge
//! const merge = new MergeSession();
//! merge.addFile("a.pdf", bytesA);
//! merge.addFile("b.pdf", bytesB);
//! merge.moveFile(1, 0);
//! merge.execute();          // object URL of the result
//! merge.download();
//!
//! // Reorder
//! const reorder = new ReorderSession();
//! reorder.loadFile(bytes);
//! reorder.applyCustomOrder("3, 1, 2");
//! reorder.execute("reordered.pdf");
//!
//! // Calculators
//! await copyText(numberToWords("100000", "indian"));
//! ```

pub mod artifact;
pub mod browser;
pub mod busy;
pub mod calculators;
pub mod files;
pub mod merge_session;
pub mod reorder_session;
pub mod validation;

#[cfg(test)]
mod test_support;

use wasm_bindgen::prelude::*;

pub use calculators::RandomNumbers;
pub use merge_session::MergeSession;
pub use reorder_session::ReorderSession;
pub use validation::PdfInfo;

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Quick validation check for a PDF file
/// Returns Ok(()) if valid, Err with message if not
#[wasm_bindgen]
pub fn quick_validate(bytes: &[u8]) -> Result<(), JsValue> {
    validation::quick_validate(bytes).map_err(|e| JsValue::from_str(&e))
}

/// Get detailed PDF info without creating a session
#[wasm_bindgen]
pub fn get_pdf_info(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let info = validation::validate_pdf(bytes).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&info)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Get page count from PDF bytes (convenience function)
#[wasm_bindgen]
pub fn get_page_count(bytes: &[u8]) -> Result<u32, JsValue> {
    pdfpages_core::get_page_count(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Format bytes as human-readable string
#[wasm_bindgen]
pub fn format_bytes(bytes: usize) -> String {
    files::format_bytes(bytes)
}
