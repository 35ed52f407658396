//! Windowing over the in-memory jobs snapshot: fixed-size pages and the
//! inclusive day bounds used by the date filter.

use chrono::{DateTime, NaiveDate, Utc};

pub const PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Compute the slice of a snapshot of `total` records shown for a requested
/// 1-based page. Out-of-range pages clamp into `[1, total_pages]`; an empty
/// snapshot yields page 1 with navigation disabled in both directions.
pub fn paginate(total: usize, requested_page: usize) -> PageWindow {
    let total_pages = total.div_ceil(PAGE_SIZE);
    let page = requested_page.clamp(1, total_pages.max(1));
    let start = (page - 1) * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(total);
    PageWindow {
        page,
        total_pages,
        start,
        end,
        has_prev: page > 1,
        has_next: page < total_pages,
    }
}

/// Expand optional filter dates into the inclusive `[T00:00:00, T23:59:59]`
/// range the review flow queries with.
pub fn day_bounds(
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let lower = from.map(|d| d.and_hms_opt(0, 0, 0).expect("valid time").and_utc());
    let upper = to.map(|d| d.and_hms_opt(23, 59, 59).expect("valid time").and_utc());
    (lower, upper)
}
