//! Ordering sequences for files and pages
//!
//! The order the user sees is kept apart from the underlying file or page
//! list, so moving an item never touches the items themselves.

use crate::error::PdfPagesError;
use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;

/// An ordered sequence of unique identifiers.
///
/// Every mutation keeps the sequence free of duplicates. Whether each id
/// refers to a live item is the owner's responsibility: remove the id here
/// whenever the item goes away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSequence<Id> {
    ids: Vec<Id>,
}

impl<Id> Default for OrderSequence<Id> {
    fn default() -> Self {
        Self { ids: Vec::new() }
    }
}

impl<Id: Copy + Eq + Hash> OrderSequence<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sequence from ids, rejecting duplicates
    pub fn from_ids(ids: Vec<Id>) -> Result<Self, PdfPagesError> {
        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(*id) {
                return Err(PdfPagesError::InvalidOrder(
                    "duplicate entry in order".to_string(),
                ));
            }
        }
        Ok(Self { ids })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[Id] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id> {
        self.ids.iter()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.ids.contains(&id)
    }

    pub fn position(&self, id: Id) -> Option<usize> {
        self.ids.iter().position(|&x| x == id)
    }

    /// Append an id at the end. Returns false if it is already present.
    pub fn push(&mut self, id: Id) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove an id. Returns false if it was not present.
    pub fn remove(&mut self, id: Id) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.ids.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Move the item at `from` so that it ends up at position `to`
    /// (remove and reinsert).
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), PdfPagesError> {
        let len = self.ids.len();
        if from >= len || to >= len {
            return Err(PdfPagesError::InvalidOrder(format!(
                "move {} -> {} is out of bounds (length {})",
                from, to, len
            )));
        }
        if from != to {
            let id = self.ids.remove(from);
            self.ids.insert(to, id);
        }
        Ok(())
    }

    /// Move one position towards the front. No-op at the front.
    pub fn move_up(&mut self, index: usize) -> Result<(), PdfPagesError> {
        if index == 0 {
            return self.check_index(index);
        }
        self.move_item(index, index - 1)
    }

    /// Move one position towards the back. No-op at the back.
    pub fn move_down(&mut self, index: usize) -> Result<(), PdfPagesError> {
        self.check_index(index)?;
        if index + 1 == self.ids.len() {
            return Ok(());
        }
        self.move_item(index, index + 1)
    }

    pub fn reverse(&mut self) {
        self.ids.reverse();
    }

    fn check_index(&self, index: usize) -> Result<(), PdfPagesError> {
        if index < self.ids.len() {
            Ok(())
        } else {
            Err(PdfPagesError::InvalidOrder(format!(
                "index {} is out of bounds (length {})",
                index,
                self.ids.len()
            )))
        }
    }
}

/// Page order over 0-based page indices
pub type PageOrder = OrderSequence<usize>;

impl OrderSequence<usize> {
    /// Original document order: `[0, 1, ..., page_count - 1]`
    pub fn identity(page_count: usize) -> Self {
        Self {
            ids: (0..page_count).collect(),
        }
    }

    /// Whether this order is exactly a permutation of `[0, page_count)`
    pub fn is_permutation_of(&self, page_count: usize) -> bool {
        if self.ids.len() != page_count {
            return false;
        }
        // No duplicates by construction, so in-range is enough
        self.ids.iter().all(|&i| i < page_count)
    }
}

/// Parse a custom page order like "3, 1, 2" (1-based page numbers).
///
/// The list must name every page of the document exactly once. Returns the
/// order as 0-based indices.
pub fn parse_custom_order(input: &str, page_count: usize) -> Result<PageOrder, PdfPagesError> {
    let expected = || {
        PdfPagesError::InvalidOrder(format!(
            "Order must list each of the {} pages exactly once",
            page_count
        ))
    };

    let mut pages = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let page: usize = part
            .parse()
            .map_err(|_| PdfPagesError::InvalidOrder(format!("Invalid page: {}", part)))?;
        if page == 0 || page > page_count {
            return Err(expected());
        }
        pages.push(page - 1);
    }

    if pages.len() != page_count {
        return Err(expected());
    }

    OrderSequence::from_ids(pages).map_err(|_| expected())
}
