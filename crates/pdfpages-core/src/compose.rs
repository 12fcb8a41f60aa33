//! Page-order composition
//!
//! Merge concatenates whole documents in the order the user arranged them.
//! Reorder writes one document's pages out in a permuted order. Both build
//! a fresh document through a `DocumentCodec` and only return bytes once
//! every step succeeded.

use crate::codec::{DocumentCodec, LopdfCodec};
use crate::error::PdfPagesError;
use crate::order::PageOrder;
use tracing::{info, warn};

/// Minimum number of documents a merge accepts
pub const MIN_MERGE_DOCUMENTS: usize = 2;

/// Download name for merge output
pub const DEFAULT_MERGE_NAME: &str = "merged.pdf";

/// Download name for reorder output
pub const DEFAULT_REORDER_NAME: &str = "reordered.pdf";

/// Merge documents with the given codec.
///
/// 1. Reject fewer than two sources before loading anything
/// 2. Load every source (any parse failure aborts the merge)
/// 3. Copy each source's pages, in source order, into a new document
/// 4. Serialize
pub fn merge_with<C, S>(codec: &C, sources: &[S]) -> Result<Vec<u8>, PdfPagesError>
where
    C: DocumentCodec,
    S: AsRef<[u8]>,
{
    if sources.len() < MIN_MERGE_DOCUMENTS {
        warn!(documents = sources.len(), "Merge rejected: not enough documents");
        return Err(PdfPagesError::NotEnoughDocuments {
            required: MIN_MERGE_DOCUMENTS,
            actual: sources.len(),
        });
    }

    let mut loaded = Vec::with_capacity(sources.len());
    for (i, bytes) in sources.iter().enumerate() {
        let doc = codec.load(bytes.as_ref()).map_err(|e| match e {
            PdfPagesError::ParseError(msg) => {
                PdfPagesError::ParseError(format!("document {}: {}", i + 1, msg))
            }
            other => other,
        })?;
        loaded.push(doc);
    }

    let mut dest = codec.create()?;
    let mut total_pages = 0;
    for source in &loaded {
        let count = codec.page_count(source);
        let indices: Vec<usize> = (0..count).collect();
        codec.copy_pages(source, &indices, &mut dest)?;
        total_pages += count;
    }

    let output = codec.save(dest)?;
    info!(
        documents = loaded.len(),
        pages = total_pages,
        output_bytes = output.len(),
        "Merged PDF documents"
    );
    Ok(output)
}

/// Reorder one document's pages with the given codec.
///
/// `order` holds 0-based page indices and must be a permutation of every
/// page in the document.
pub fn reorder_with<C>(codec: &C, bytes: &[u8], order: &PageOrder) -> Result<Vec<u8>, PdfPagesError>
where
    C: DocumentCodec,
{
    let source = codec.load(bytes)?;
    let page_count = codec.page_count(&source);

    if !order.is_permutation_of(page_count) {
        warn!(
            page_count,
            order_len = order.len(),
            "Reorder rejected: order is not a permutation of the document's pages"
        );
        return Err(PdfPagesError::InvalidOrder(format!(
            "Order must list each of the {} pages exactly once",
            page_count
        )));
    }

    let mut dest = codec.create()?;
    codec.copy_pages(&source, order.as_slice(), &mut dest)?;

    let output = codec.save(dest)?;
    info!(
        pages = page_count,
        output_bytes = output.len(),
        "Reordered PDF pages"
    );
    Ok(output)
}

/// Merge PDFs into one using lopdf
pub fn merge_documents<S: AsRef<[u8]>>(documents: &[S]) -> Result<Vec<u8>, PdfPagesError> {
    merge_with(&LopdfCodec, documents)
}

/// Reorder a PDF's pages using lopdf
pub fn reorder_document(bytes: &[u8], order: &PageOrder) -> Result<Vec<u8>, PdfPagesError> {
    reorder_with(&LopdfCodec, bytes, order)
}
