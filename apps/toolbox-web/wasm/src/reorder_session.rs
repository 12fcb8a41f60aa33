//! Reorder tool session
//!
//! One loaded document and a page order that the user edits by moving
//! pages, reversing, or typing a custom sequence.

use crate::artifact::{ArtifactSlot, BrowserUrls, UrlRegistry};
use crate::browser::trigger_download;
use crate::busy::BusyFlag;
use crate::merge_session::report_progress;
use crate::validation::{validate_pdf, PdfInfo};
use pdfpages_core::{parse_custom_order, reorder_document, PageOrder, DEFAULT_REORDER_NAME};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

const LOAD_FAILED: &str = "Could not open this PDF. Please check the file and try again.";
const REORDER_FAILED: &str = "Failed to reorder pages. Please try again.";

struct LoadedDocument {
    bytes: Vec<u8>,
    info: PdfInfo,
}

/// Stateful reorder session
#[wasm_bindgen]
#[derive(Default)]
pub struct ReorderSession {
    document: Option<LoadedDocument>,
    order: PageOrder,
    busy: BusyFlag,
    output: ArtifactSlot,
    progress_callback: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl ReorderSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback signature: (current: number, total: number, message: string) => void
    #[wasm_bindgen(js_name = setProgressCallback)]
    pub fn set_progress_callback(&mut self, callback: js_sys::Function) {
        self.progress_callback = Some(callback);
    }

    /// Load a document, replacing any previous one. Resets the order to the
    /// document's own page order and discards earlier output.
    #[wasm_bindgen(js_name = loadFile)]
    pub fn load_file(&mut self, bytes: &[u8]) -> Result<JsValue, JsValue> {
        let info = self
            .load_file_internal(&mut BrowserUrls, bytes)
            .map_err(|e| JsValue::from_str(&e))?;
        serde_wasm_bindgen::to_value(&info)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = getPageCount)]
    pub fn get_page_count(&self) -> u32 {
        self.document.as_ref().map_or(0, |d| d.info.page_count)
    }

    /// Current order as 1-based page numbers
    #[wasm_bindgen(js_name = getOrder)]
    pub fn get_order(&self) -> Vec<u32> {
        self.order.iter().map(|&i| i as u32 + 1).collect()
    }

    /// Move the page at position `from` to position `to`
    #[wasm_bindgen(js_name = movePage)]
    pub fn move_page(&mut self, from: usize, to: usize) -> Result<(), JsValue> {
        self.order
            .move_item(from, to)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = movePageUp)]
    pub fn move_page_up(&mut self, index: usize) -> Result<(), JsValue> {
        self.order
            .move_up(index)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = movePageDown)]
    pub fn move_page_down(&mut self, index: usize) -> Result<(), JsValue> {
        self.order
            .move_down(index)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn reverse(&mut self) {
        self.order.reverse();
    }

    /// Replace the order with a comma-separated list of 1-based page numbers
    #[wasm_bindgen(js_name = applyCustomOrder)]
    pub fn apply_custom_order(&mut self, input: &str) -> Result<(), JsValue> {
        self.apply_custom_order_internal(input)
            .map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = resetOrder)]
    pub fn reset_order(&mut self) {
        self.order = PageOrder::identity(self.get_page_count() as usize);
    }

    #[wasm_bindgen(js_name = canExecute)]
    pub fn can_execute(&self) -> bool {
        self.document.is_some() && !self.busy.is_busy()
    }

    #[wasm_bindgen(js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Write the pages out in the current order and publish the result.
    /// Returns the object URL of the new PDF.
    pub fn execute(&mut self, file_name: Option<String>) -> Result<String, JsValue> {
        let file_name = file_name.unwrap_or_else(|| DEFAULT_REORDER_NAME.to_string());
        self.execute_internal(&mut BrowserUrls, &file_name)
            .map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = getResultUrl)]
    pub fn get_result_url(&self) -> Option<String> {
        self.output.current().map(|a| a.url.clone())
    }

    pub fn download(&self) -> Result<(), JsValue> {
        let artifact = self
            .output
            .current()
            .ok_or_else(|| JsValue::from_str("Nothing to download yet"))?;
        trigger_download(&artifact.url, &artifact.file_name).map_err(|e| JsValue::from_str(&e))
    }

    pub fn clear(&mut self) {
        self.clear_internal(&mut BrowserUrls);
    }
}

impl ReorderSession {
    fn load_file_internal(
        &mut self,
        urls: &mut impl UrlRegistry,
        bytes: &[u8],
    ) -> Result<PdfInfo, String> {
        let info = validate_pdf(bytes).map_err(|e| {
            warn!(error = %e, "Rejected PDF for reordering");
            LOAD_FAILED.to_string()
        })?;

        debug!(pages = info.page_count, "Loaded PDF for reordering");
        self.order = PageOrder::identity(info.page_count as usize);
        self.output.clear(urls);
        self.document = Some(LoadedDocument {
            bytes: bytes.to_vec(),
            info: info.clone(),
        });
        Ok(info)
    }

    fn apply_custom_order_internal(&mut self, input: &str) -> Result<(), String> {
        let page_count = self.get_page_count() as usize;
        if page_count == 0 {
            return Err("Please select a PDF file first".to_string());
        }
        self.order = parse_custom_order(input, page_count).map_err(|e| e.to_string())?;
        Ok(())
    }

    fn execute_internal(
        &mut self,
        urls: &mut impl UrlRegistry,
        file_name: &str,
    ) -> Result<String, String> {
        let Some(_guard) = self.busy.begin() else {
            return Err("Reordering is already in progress".to_string());
        };
        let document = self
            .document
            .as_ref()
            .ok_or_else(|| "Please select a PDF file first".to_string())?;

        report_progress(&self.progress_callback, 0, 100, "Reordering pages...");

        let output = reorder_document(&document.bytes, &self.order).map_err(|e| {
            if e.is_validation() {
                e.to_string()
            } else {
                warn!(error = %e, "Reorder failed");
                REORDER_FAILED.to_string()
            }
        })?;

        let url = self.output.replace(urls, output, file_name)?.url.clone();
        report_progress(&self.progress_callback, 100, 100, "Complete");

        Ok(url)
    }

    fn clear_internal(&mut self, urls: &mut impl UrlRegistry) {
        self.document = None;
        self.order.clear();
        self.output.clear(urls);
    }
}
