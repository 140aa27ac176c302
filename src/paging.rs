//! Fixed-size client-side pagination
//!
//! The resource and plan pages fetch the whole list and page through it
//! locally, five items at a time. Pages are 1-based.

use serde::Serialize;

/// Items per page on every list view
pub const PAGE_SIZE: usize = 5;

/// Number of pages needed for `len` items
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// Items shown on 1-based page `page`. Out-of-range pages are empty.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// One page of a list, with what the pager controls need
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<'a, T> Page<'a, T> {
    pub fn new(items: &'a [T], page: usize) -> Self {
        Self {
            items: page_slice(items, page),
            page,
            total_pages: total_pages(items.len()),
            total_items: items.len(),
        }
    }

    /// Pager controls are only rendered for multi-page lists
    pub fn show_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
