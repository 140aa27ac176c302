//! List-page state: shape validation, ordering, pagination and local removal
//!
//! Lists are never cached between loads and deletions are applied locally
//! only after the server confirmed them.

use serde_json::Value;

use crate::paging::{total_pages, Page};
use crate::storage::{CuratedResource, Note, PdfDocument, StudyPlan};

/// Anything addressed by `_id`
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for CuratedResource {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for StudyPlan {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Note {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for PdfDocument {
    fn id(&self) -> &str {
        &self.id
    }
}

fn non_empty_str(value: &Value, key: &str) -> bool {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(|s| !s.is_empty())
        .unwrap_or(false)
}

/// Keep entries with a non-empty `_id`, a non-empty `topic` and an array
/// `resources`. A body without a `resources` array yields nothing.
pub fn validate_resources(body: &Value) -> Vec<Value> {
    let Some(entries) = body.get("resources").and_then(Value::as_array) else {
        tracing::error!("Invalid resources data structure");
        return Vec::new();
    };

    let valid: Vec<Value> = entries
        .iter()
        .filter(|entry| {
            non_empty_str(entry, "_id")
                && non_empty_str(entry, "topic")
                && entry.get("resources").map(Value::is_array).unwrap_or(false)
        })
        .cloned()
        .collect();

    if valid.len() != entries.len() {
        tracing::warn!(
            dropped = entries.len() - valid.len(),
            "Dropped malformed resource entries"
        );
    }
    valid
}

/// Newest first, using `_id` order in place of creation time
pub fn sort_plans(plans: &mut [StudyPlan]) {
    plans.sort_by(|a, b| b.id.cmp(&a.id));
}

/// Drop exactly the item with `id`, keeping the rest in order.
/// Returns whether anything was removed.
pub fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

/// One list page's state
#[derive(Debug, Clone)]
pub struct ListState<T> {
    items: Vec<T>,
    page: usize,
    loading: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            loading: true,
        }
    }
}

impl<T: Identified> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list after a fetch; a failed fetch empties it
    pub fn load(&mut self, items: Option<Vec<T>>) {
        self.items = items.unwrap_or_default();
        self.loading = false;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_page(&self) -> Page<'_, T> {
        Page::new(&self.items, self.page)
    }

    /// Move to a page, clamped to the valid range
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, total_pages(self.items.len()).max(1));
    }

    /// Apply a confirmed deletion
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = remove_by_id(&mut self.items, id);
        // Stay on a page that still has items
        let last = total_pages(self.items.len()).max(1);
        if self.page > last {
            self.page = last;
        }
        removed
    }
}
