//! Page-number pagination with forgiving page resolution.
//!
//! Page numbers arrive as raw query-string values. Garbage never produces an
//! error: a value that is not an integer falls back to the first page and an
//! out-of-range number is clamped to the last page.

use serde::Serialize;

/// Number of posts shown per listing page.
pub const POSTS_PER_PAGE: u64 = 3;

/// Splits `count` items into pages of `per_page`.
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

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Total number of pages. An empty collection still has one (empty) page.
    pub fn num_pages(&self) -> u64 {
        self.count.div_ceil(self.per_page).max(1)
    }

    /// Resolve a raw `page` parameter to a valid 1-based page number.
    pub fn resolve(&self, raw: Option<&str>) -> u64 {
        let Some(raw) = raw else {
            return 1;
        };

        let num_pages = self.num_pages();
        match parse_page_number(raw) {
            None => 1,
            Some(PageNumber::OutOfRange) => num_pages,
            Some(PageNumber::Valid(n)) => match u64::try_from(n) {
                Ok(n) if (1..=num_pages).contains(&n) => n,
                _ => num_pages,
            },
        }
    }

    /// Offset of the first item on page `number`.
    pub fn offset(&self, number: u64) -> u64 {
        number.saturating_sub(1) * self.per_page
    }

    /// Wrap a slice of items fetched for page `number`.
    pub fn page<T>(&self, number: u64, items: Vec<T>) -> Page<T> {
        let num_pages = self.num_pages();
        Page {
            items,
            number,
            num_pages,
            count: self.count,
            has_previous: number > 1,
            has_next: number < num_pages,
            previous_page_number: (number > 1).then(|| number - 1),
            next_page_number: (number < num_pages).then(|| number + 1),
        }
    }
}

/// Page numbers are integers only; `"3.0"` is not a page number.
///
/// Integers too large for `i64` still count as numbers, so they clamp to the
/// last page instead of falling back to the first.
enum PageNumber {
    Valid(i64),
    OutOfRange,
}

fn parse_page_number(raw: &str) -> Option<PageNumber> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(PageNumber::Valid(n));
    }

    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .then_some(PageNumber::OutOfRange)
}

/// One page of results, shaped for templates.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<u64>,
    pub next_page_number: Option<u64>,
}

impl<T> Page<T> {
    /// Convert the items while keeping page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            has_previous: self.has_previous,
            has_next: self.has_next,
            previous_page_number: self.previous_page_number,
            next_page_number: self.next_page_number,
        }
    }
}
