//! Merge tool session
//!
//! Holds the uploaded files, the user's file order and the last merged
//! output. JavaScript only forwards DOM events and file bytes.

use crate::artifact::{ArtifactSlot, BrowserUrls, UrlRegistry};
use crate::browser::trigger_download;
use crate::busy::BusyFlag;
use crate::files::{FileId, FileList, FileSummary};
use crate::validation::validate_pdf;
use pdfpages_core::{merge_documents, OrderSequence, DEFAULT_MERGE_NAME, MIN_MERGE_DOCUMENTS};
use tracing::warn;
use wasm_bindgen::prelude::*;

const MERGE_FAILED: &str =
    "Failed to merge PDFs. Please make sure every file is a valid, unprotected PDF and try again.";

/// Stateful merge session
#[wasm_bindgen]
#[derive(Default)]
pub struct MergeSession {
    files: FileList,
    order: OrderSequence<FileId>,
    busy: BusyFlag,
    output: ArtifactSlot,
    progress_callback: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl MergeSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a progress callback function
    /// Callback signature: (current: number, total: number, message: string) => void
    #[wasm_bindgen(js_name = setProgressCallback)]
    pub fn set_progress_callback(&mut self, callback: js_sys::Function) {
        self.progress_callback = Some(callback);
    }

    /// Add a file at the end of the order. Files that fail to parse are kept
    /// (with an error) so the user can see and remove them.
    #[wasm_bindgen(js_name = addFile)]
    pub fn add_file(&mut self, name: &str, bytes: &[u8]) -> Result<JsValue, JsValue> {
        let summary = self.add_file_internal(name, bytes);
        serde_wasm_bindgen::to_value(&summary)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = removeFile)]
    pub fn remove_file(&mut self, id: FileId) -> bool {
        self.order.remove(id) && self.files.remove(id).is_some()
    }

    /// Move the file at position `from` to position `to`
    #[wasm_bindgen(js_name = moveFile)]
    pub fn move_file(&mut self, from: usize, to: usize) -> Result<(), JsValue> {
        self.order
            .move_item(from, to)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = moveUp)]
    pub fn move_up(&mut self, index: usize) -> Result<(), JsValue> {
        self.order
            .move_up(index)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = moveDown)]
    pub fn move_down(&mut self, index: usize) -> Result<(), JsValue> {
        self.order
            .move_down(index)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Files in merge order
    #[wasm_bindgen(js_name = getFiles)]
    pub fn get_files(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.summaries())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = getFileCount)]
    pub fn get_file_count(&self) -> usize {
        self.order.len()
    }

    /// Pages across every file whose page count is known
    #[wasm_bindgen(js_name = getTotalPageCount)]
    pub fn get_total_page_count(&self) -> u32 {
        self.order
            .iter()
            .filter_map(|id| self.files.get(*id))
            .filter_map(|f| f.page_count())
            .sum()
    }

    #[wasm_bindgen(js_name = canExecute)]
    pub fn can_execute(&self) -> bool {
        self.order.len() >= MIN_MERGE_DOCUMENTS && !self.busy.is_busy()
    }

    #[wasm_bindgen(js_name = isBusy)]
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Merge the files in order and publish the result.
    /// Returns the object URL of the merged PDF.
    pub fn execute(&mut self, file_name: Option<String>) -> Result<String, JsValue> {
        let file_name = file_name.unwrap_or_else(|| DEFAULT_MERGE_NAME.to_string());
        self.execute_internal(&mut BrowserUrls, &file_name)
            .map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = getResultUrl)]
    pub fn get_result_url(&self) -> Option<String> {
        self.output.current().map(|a| a.url.clone())
    }

    /// Save the last merge output through the browser
    pub fn download(&self) -> Result<(), JsValue> {
        let artifact = self
            .output
            .current()
            .ok_or_else(|| JsValue::from_str("Nothing to download yet"))?;
        trigger_download(&artifact.url, &artifact.file_name).map_err(|e| JsValue::from_str(&e))
    }

    /// Drop every file and release the output URL
    pub fn clear(&mut self) {
        self.clear_internal(&mut BrowserUrls);
    }
}

impl MergeSession {
    fn add_file_internal(&mut self, name: &str, bytes: &[u8]) -> FileSummary {
        let outcome = validate_pdf(bytes).map(|info| info.page_count);
        if let Err(e) = &outcome {
            warn!(file = name, error = %e, "Added file could not be parsed");
        }

        let file = self.files.add(name, bytes.to_vec());
        file.resolve(outcome);
        self.order.push(file.id);
        file.summary()
    }

    fn summaries(&self) -> Vec<FileSummary> {
        self.order
            .iter()
            .filter_map(|id| self.files.get(*id))
            .map(|f| f.summary())
            .collect()
    }

    fn execute_internal(
        &mut self,
        urls: &mut impl UrlRegistry,
        file_name: &str,
    ) -> Result<String, String> {
        let Some(_guard) = self.busy.begin() else {
            return Err("A merge is already in progress".to_string());
        };

        if let Some(file) = self
            .order
            .iter()
            .filter_map(|id| self.files.get(*id))
            .find(|f| f.parse_error().is_some())
        {
            return Err(format!(
                "Cannot merge \"{}\": {}. Remove it and try again.",
                file.name,
                file.parse_error().unwrap_or_default()
            ));
        }

        let total = self.order.len();
        report_progress(&self.progress_callback, 0, 100, "Preparing documents...");

        let sources: Vec<&[u8]> = self
            .order
            .iter()
            .filter_map(|id| self.files.get(*id))
            .map(|f| f.bytes())
            .collect();

        report_progress(
            &self.progress_callback,
            10,
            100,
            &format!("Merging {} documents...", total),
        );

        let merged = merge_documents(&sources).map_err(|e| {
            if e.is_validation() {
                e.to_string()
            } else {
                warn!(error = %e, "Merge failed");
                MERGE_FAILED.to_string()
            }
        })?;

        report_progress(&self.progress_callback, 90, 100, "Finalizing...");
        let url = self.output.replace(urls, merged, file_name)?.url.clone();
        report_progress(&self.progress_callback, 100, 100, "Complete");

        Ok(url)
    }

    fn clear_internal(&mut self, urls: &mut impl UrlRegistry) {
        self.files.clear();
        self.order.clear();
        self.output.clear(urls);
    }
}

/// Report progress to the JavaScript callback, if one is set
pub(crate) fn report_progress(
    callback: &Option<js_sys::Function>,
    current: u32,
    total: u32,
    message: &str,
) {
    if let Some(callback) = callback {
        let this = JsValue::null();
        let _ = callback.call3(
            &this,
            &JsValue::from(current),
            &JsValue::from(total),
            &JsValue::from_str(message),
        );
    }
}
