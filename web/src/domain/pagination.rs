//! Feed pagination
//!
//! Page-number arithmetic shared by every feed. Pages are 1-based; a missing,
//! malformed or non-positive page parameter resolves to the first page and a
//! number past the end clamps to the last page. An empty collection still has
//! one (empty) page.

use serde::Serialize;

/// Posts shown per feed page
pub const PAGE_SIZE: u64 = 10;

/// Page-number arithmetic over a collection of `count` items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    count: u64,
    per_page: u64,
}

impl Paginator {
    pub fn new(count: u64, per_page: u64) -> Self {
        Self {
            count,
            per_page: per_page.max(1),
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Total number of pages, never less than one
    pub fn num_pages(&self) -> u64 {
        self.count.div_ceil(self.per_page).max(1)
    }

    /// Resolve a raw `page` query value to a valid page number
    pub fn page_number(&self, raw: Option<&str>) -> u64 {
        let requested = raw.and_then(parse_page).filter(|n| *n >= 1).unwrap_or(1);
        requested.min(self.num_pages())
    }

    /// Offset of the first item on `number`
    pub fn offset(&self, number: u64) -> u64 {
        (number.max(1) - 1) * self.per_page
    }

    /// Slice an already ordered collection
    #[cfg(test)]
    pub fn paginate<T>(items: Vec<T>, raw: Option<&str>, per_page: u64) -> Page<T> {
        let paginator = Paginator::new(items.len() as u64, per_page);
        let number = paginator.page_number(raw);
        let page_items = items
            .into_iter()
            .skip(paginator.offset(number) as usize)
            .take(paginator.per_page() as usize)
            .collect();
        Page::new(page_items, number, &paginator)
    }
}

/// Parse a positive integer page value. Digit strings too large for `u64`
/// saturate so that they still clamp to the last page.
fn parse_page(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}

/// One page of a feed
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub number: u64,
    pub num_pages: u64,
    /// Total items across all pages
    pub count: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, number: u64, paginator: &Paginator) -> Self {
        Self {
            items,
            number,
            num_pages: paginator.num_pages(),
            count: paginator.count(),
        }
    }

    /// The single empty page of an empty collection
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            number: 1,
            num_pages: 1,
            count: 0,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn next_page_number(&self) -> Option<u64> {
        self.has_next().then(|| self.number + 1)
    }

    pub fn previous_page_number(&self) -> Option<u64> {
        self.has_previous().then(|| self.number - 1)
    }
}
