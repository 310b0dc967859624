//! Paginated list results.

/// Opaque handle used to fetch the page following a list result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor(String);

impl PageCursor {
    /// Wraps a backend-specific cursor value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw cursor value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of a list call.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Items on this page, in tracker order.
    pub items: Vec<T>,

    /// Cursor for the next page, if the tracker reported one.
    pub next: Option<PageCursor>,
}

impl<T> Page<T> {
    /// Creates a page that has no successor.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    /// Returns true if another page can be fetched.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.next.is_some()
    }
}
