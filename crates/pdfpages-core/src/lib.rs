//! PDF page merge and reorder operations
//!
//! This crate provides client-side page composition on top of lopdf.
//!
//! - `merge_documents`: concatenate two or more PDFs in a chosen file order
//! - `reorder_document`: write one PDF's pages out in a new order
//! - `OrderSequence` / `PageOrder`: the user-arranged order, kept apart from
//!   the files and pages it refers to
//!
//! The PDF library sits behind `DocumentCodec`, so the composition logic in
//! `compose` works with any implementation of it.

pub mod codec;
pub mod compose;
pub mod error;
pub mod order;

pub use codec::{DocumentCodec, LopdfCodec};
pub use compose::{
    merge_documents, merge_with, reorder_document, reorder_with, DEFAULT_MERGE_NAME,
    DEFAULT_REORDER_NAME, MIN_MERGE_DOCUMENTS,
};
pub use error::PdfPagesError;
pub use order::{parse_custom_order, OrderSequence, PageOrder};

/// Parse PDF bytes and return page count
pub fn get_page_count(bytes: &[u8]) -> Result<u32, PdfPagesError> {
    let codec = LopdfCodec;
    let doc = codec.load(bytes)?;
    Ok(codec.page_count(&doc) as u32)
}
