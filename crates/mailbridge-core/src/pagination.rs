//! Newest-first pages over an oldest-first store.
//!
//! The mail store indexes a mailbox from 1 (oldest) to `total` (newest).
//! Callers ask for `limit` messages after skipping `offset` of the newest,
//! so the window is computed from the top of the index range down and the
//! fetched rows are reversed afterwards.

/// Hard ceiling on page size.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Default page size when the caller does not give one.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Inclusive, 1-based index range to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRange {
    /// First index (oldest message of the page).
    pub start: u32,
    /// Last index (newest message of the page).
    pub end: u32,
}

impl IndexRange {
    /// Number of indexes covered.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.end - self.start + 1
    }

    /// Always false; a range covers at least one index.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        false
    }
}

/// Computed window for one page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Range to fetch, or `None` when the page is empty.
    pub range: Option<IndexRange>,
    /// Page size after clamping to [`MAX_PAGE_SIZE`].
    pub limit: u32,
    /// Whether a strictly older message exists past this page.
    pub has_more: bool,
}

/// Clamps a requested page size to [`MAX_PAGE_SIZE`].
#[must_use]
pub fn effective_limit(limit: u32) -> u32 {
    limit.min(MAX_PAGE_SIZE)
}

/// Computes the index window for `limit` messages after skipping the
/// `offset` newest of `total`.
#[must_use]
pub fn paginate(total: u32, offset: u32, limit: u32) -> Page {
    let limit = effective_limit(limit);
    let empty = Page {
        range: None,
        limit,
        has_more: false,
    };

    if total == 0 {
        return empty;
    }

    let (total_i, offset_i, limit_i) = (i64::from(total), i64::from(offset), i64::from(limit));
    let end = (total_i - offset_i).max(1);
    let start = (total_i - offset_i - limit_i + 1).max(1);

    if offset >= total || start > end {
        return empty;
    }

    // Both bounds lie in 1..=total here.
    let range = IndexRange {
        start: u32::try_from(start).unwrap_or(1),
        end: u32::try_from(end).unwrap_or(total),
    };

    Page {
        range: Some(range),
        limit,
        has_more: offset_i + limit_i < total_i,
    }
}
