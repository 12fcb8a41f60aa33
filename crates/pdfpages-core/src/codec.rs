//! Document codec seam
//!
//! Page composition needs exactly four things from a PDF library: load a
//! document, create an empty one, copy pages between documents and
//! serialize the result. `DocumentCodec` names those capabilities so the
//! merge and reorder algorithms don't depend on a particular library.

use crate::error::PdfPagesError;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashSet;
use tracing::debug;

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

pub trait DocumentCodec {
    type Document;

    /// Parse a document from bytes
    fn load(&self, bytes: &[u8]) -> Result<Self::Document, PdfPagesError>;

    /// Create an empty document with no pages
    fn create(&self) -> Result<Self::Document, PdfPagesError>;

    /// Number of pages in a loaded document
    fn page_count(&self, doc: &Self::Document) -> usize;

    /// Append the pages at `indices` (0-based) of `source` to `dest`, in the
    /// order given
    fn copy_pages(
        &self,
        source: &Self::Document,
        indices: &[usize],
        dest: &mut Self::Document,
    ) -> Result<(), PdfPagesError>;

    /// Serialize a document back to bytes
    fn save(&self, doc: Self::Document) -> Result<Vec<u8>, PdfPagesError>;
}

/// `DocumentCodec` backed by lopdf
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfCodec;

impl DocumentCodec for LopdfCodec {
    type Document = Document;

    fn load(&self, bytes: &[u8]) -> Result<Document, PdfPagesError> {
        Document::load_mem(bytes).map_err(|e| PdfPagesError::ParseError(e.to_string()))
    }

    fn create(&self) -> Result<Document, PdfPagesError> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let pages = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Count", Object::Integer(0)),
            ("Kids", Object::Array(Vec::new())),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]);
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        Ok(doc)
    }

    fn page_count(&self, doc: &Document) -> usize {
        doc.get_pages().len()
    }

    /// The algorithm:
    /// 1. Resolve inherited attributes of the selected pages in the source
    /// 2. Import every source object with an id offset so nothing collides
    /// 3. Write the resolved attributes onto the imported pages and
    ///    re-parent them under the destination page tree
    /// 4. Append the page references to the destination `Kids`
    ///
    /// Objects that end up unreachable are dropped by `save`.
    fn copy_pages(
        &self,
        source: &Document,
        indices: &[usize],
        dest: &mut Document,
    ) -> Result<(), PdfPagesError> {
        let source_pages: Vec<ObjectId> = source.get_pages().into_values().collect();

        let mut selected = Vec::with_capacity(indices.len());
        for &index in indices {
            let page_id = *source_pages
                .get(index)
                .ok_or(PdfPagesError::PageOutOfRange {
                    index,
                    page_count: source_pages.len(),
                })?;
            selected.push((page_id, inherited_attributes(source, page_id)));
        }

        let id_offset = dest.max_id;
        for (old_id, object) in source.objects.iter() {
            let new_id = (old_id.0 + id_offset, old_id.1);
            dest.objects
                .insert(new_id, remap_object_refs(object.clone(), id_offset));
        }
        dest.max_id = dest.max_id.max(source.max_id + id_offset);

        let pages_id = page_tree_root(dest)?;
        let mut new_refs = Vec::with_capacity(selected.len());
        for (old_id, attributes) in selected {
            let new_id = (old_id.0 + id_offset, old_id.1);
            let page = dest
                .objects
                .get_mut(&new_id)
                .and_then(|o| o.as_dict_mut().ok())
                .ok_or_else(|| PdfPagesError::OperationError("Invalid page dictionary".into()))?;

            for (key, value) in attributes {
                page.set(key, remap_object_refs(value, id_offset));
            }
            page.set("Parent", Object::Reference(pages_id));
            new_refs.push(new_id);
        }

        debug!(
            copied = new_refs.len(),
            id_offset, "Copied pages into destination document"
        );

        append_kids(dest, pages_id, new_refs)
    }

    fn save(&self, mut doc: Document) -> Result<Vec<u8>, PdfPagesError> {
        doc.prune_objects();
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| PdfPagesError::SerializationError(format!("Failed to save PDF: {}", e)))?;
        Ok(buffer)
    }
}

/// Collect inheritable attributes the page doesn't set itself, nearest
/// ancestor first
fn inherited_attributes(doc: &Document, page_id: ObjectId) -> Vec<(Vec<u8>, Object)> {
    let Ok(page) = doc.get_dictionary(page_id) else {
        return Vec::new();
    };

    let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
        .iter()
        .copied()
        .filter(|key| !page.has(key))
        .collect();
    let mut found = Vec::new();
    let mut visited = HashSet::new();
    let mut parent = page.get(b"Parent").and_then(|p| p.as_reference()).ok();

    while let Some(node_id) = parent {
        if missing.is_empty() || !visited.insert(node_id) {
            break;
        }
        let Ok(node) = doc.get_dictionary(node_id) else {
            break;
        };
        missing.retain(|key| match node.get(key) {
            Ok(value) => {
                found.push((key.to_vec(), value.clone()));
                false
            }
            Err(_) => true,
        });
        parent = node.get(b"Parent").and_then(|p| p.as_reference()).ok();
    }

    found
}

/// Recursively remap object references in an object
fn remap_object_refs(obj: Object, offset: u32) -> Object {
    match obj {
        Object::Reference(id) => Object::Reference((id.0 + offset, id.1)),
        Object::Array(arr) => Object::Array(
            arr.into_iter()
                .map(|o| remap_object_refs(o, offset))
                .collect(),
        ),
        Object::Dictionary(mut dict) => {
            for (_, value) in dict.iter_mut() {
                *value = remap_object_refs(value.clone(), offset);
            }
            Object::Dictionary(dict)
        }
        Object::Stream(mut stream) => {
            for (_, value) in stream.dict.iter_mut() {
                *value = remap_object_refs(value.clone(), offset);
            }
            Object::Stream(stream)
        }
        other => other,
    }
}

/// Find the root `Pages` node through the trailer's catalog
fn page_tree_root(doc: &Document) -> Result<ObjectId, PdfPagesError> {
    let catalog_id = doc
        .trailer
        .get(b"Root")
        .and_then(|root| root.as_reference())
        .map_err(|_| PdfPagesError::OperationError("No Root in trailer".into()))?;

    let catalog = doc
        .get_dictionary(catalog_id)
        .map_err(|_| PdfPagesError::OperationError("Invalid catalog".into()))?;

    catalog
        .get(b"Pages")
        .and_then(|pages| pages.as_reference())
        .map_err(|_| PdfPagesError::OperationError("No Pages in catalog".into()))
}

/// Append page references to the root `Kids` array and update `Count`
fn append_kids(
    doc: &mut Document,
    pages_id: ObjectId,
    page_refs: Vec<ObjectId>,
) -> Result<(), PdfPagesError> {
    let Some(Object::Dictionary(ref mut pages_dict)) = doc.objects.get_mut(&pages_id) else {
        return Err(PdfPagesError::OperationError(
            "Invalid pages dictionary".into(),
        ));
    };

    let mut kids = match pages_dict.get(b"Kids") {
        Ok(Object::Array(existing)) => existing.clone(),
        _ => Vec::new(),
    };
    kids.extend(page_refs.into_iter().map(Object::Reference));

    pages_dict.set("Count", Object::Integer(kids.len() as i64));
    pages_dict.set("Kids", Object::Array(kids));

    Ok(())
}
