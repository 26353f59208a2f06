//! Offset pagination shared by listings and search.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Bounds applied when resolving client-supplied paging parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: usize,
    pub max_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(number: usize, size: usize) -> Self {
        Self {
            number,
            size: size.max(1),
        }
    }

    /// Resolve 1-based client paging parameters.
    ///
    /// Page numbers below 1 become 1, sizes below 1 fall back to the default
    /// size and sizes above the maximum are capped.
    pub fn from_client(number: Option<i64>, size: Option<i64>, limits: PageLimits) -> Self {
        let number = number.unwrap_or(1).max(1) - 1;
        let size = match size {
            Some(size) if size >= 1 => (size as u64).min(limits.max_size as u64) as usize,
            _ => limits.default_size,
        };
        Self::new(number as usize, size)
    }

    pub fn offset(&self) -> usize {
        self.number.saturating_mul(self.size)
    }

    /// Slice an already ordered result set down to this page.
    pub fn apply<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len() as u64;
        let content = items.into_iter().skip(self.offset()).take(self.size).collect();
        Page::new(content, self, total)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// Paging metadata as rendered to clients (page number is 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: usize,
    pub size: usize,
}

/// One page of results plus the total count of the filtered set.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.size as u64;
        Self {
            content,
            meta: PageMeta {
                total_elements,
                total_pages: total_elements.div_ceil(size),
                number: request.number + 1,
                size: request.size,
            },
        }
    }

    pub fn total_elements(&self) -> u64 {
        self.meta.total_elements
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
