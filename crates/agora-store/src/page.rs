//! Keyset pagination engine
//!
//! Cursor-based paging over newest-first collections keyed by a
//! monotonically comparable id: fetch `limit + 1` rows ordered descending,
//! filtered to `key < cursor`; when the extra row shows up, its key becomes
//! the next cursor. No offsets, so concurrent inserts can neither skip nor
//! duplicate rows across a forward sweep.

use serde::{Deserialize, Serialize};

/// Hard ceiling on page sizes
pub const MAX_PAGE_SIZE: u32 = 100;
/// Page size used when the caller does not pick one
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// A page request: how many rows, and where the previous page stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest<K> {
    /// Maximum rows to return; clamped to `1..=MAX_PAGE_SIZE`
    pub limit: u32,
    /// Exclusive upper bound from the previous page, absent on the first
    pub cursor: Option<K>,
}

impl<K> PageRequest<K> {
    /// First page with the given limit
    #[inline]
    #[must_use]
    pub fn first(limit: u32) -> Self {
        Self {
            limit,
            cursor: None,
        }
    }

    /// Continuation page after `cursor`
    #[inline]
    #[must_use]
    pub fn after(limit: u32, cursor: K) -> Self {
        Self {
            limit,
            cursor: Some(cursor),
        }
    }

    /// Limit clamped into `1..=MAX_PAGE_SIZE`
    #[inline]
    #[must_use]
    pub fn clamped_limit(&self) -> usize {
        self.limit.clamp(1, MAX_PAGE_SIZE) as usize
    }
}

impl<K> Default for PageRequest<K> {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the cursor for the next one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T, K> {
    /// Rows in the requested order, never more than the clamped limit
    pub items: Vec<T>,
    /// Cursor for the next page; absent when this page is the last
    pub next_cursor: Option<K>,
}

impl<T, K> Page<T, K> {
    /// An empty terminal page
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }

    /// Transform every item while keeping the cursor
    ///
    /// Services use this to enrich stored rows into view types without
    /// re-deriving pagination state.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U, K> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }

}

/// Cut an over-fetched row set into a page
///
/// `rows` must already be ordered descending by key and filtered to
/// `key < cursor`; callers fetch up to `limit + 1` rows. When the extra row
/// is present it is dropped and its key becomes the next cursor, exactly
/// the handoff the next `PageRequest::after` expects.
#[must_use]
pub fn keyset<T, K: Copy>(mut rows: Vec<T>, limit: usize, key: impl Fn(&T) -> K) -> Page<T, K> {
    if rows.len() > limit {
        rows.truncate(limit + 1);
        let overflow = rows.pop().map(|row| key(&row));
        Page {
            items: rows,
            next_cursor: overflow,
        }
    } else {
        Page {
            items: rows,
            next_cursor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn under_limit_has_no_cursor() {
        let page = keyset(vec![9u32, 8, 7], 5, |n| *n);
        assert_eq!(page.items, vec![9, 8, 7]);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn exactly_limit_has_no_cursor() {
        let page = keyset(vec![9u32, 8, 7], 3, |n| *n);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn overflow_row_becomes_cursor() {
        let page = keyset(vec![9u32, 8, 7, 6], 3, |n| *n);
        assert_eq!(page.items, vec![9, 8, 7]);
        assert_eq!(page.next_cursor, Some(6));
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(PageRequest::<u32>::first(0).clamped_limit(), 1);
        assert_eq!(PageRequest::<u32>::first(500).clamped_limit(), 100);
        assert_eq!(PageRequest::<u32>::first(50).clamped_limit(), 50);
    }

    #[test]
    fn map_preserves_cursor() {
        let page = keyset(vec![3u32, 2, 1, 0], 3, |n| *n).map(|n| n.to_string());
        assert_eq!(page.items, vec!["3", "2", "1"]);
        assert_eq!(page.next_cursor, Some(0));
    }

    // Sweeping a descending collection page by page yields every row
    // exactly once, in order, for any collection size and page size.
    proptest! {
        #[test]
        fn full_sweep_is_lossless(total in 0usize..400, limit in 1usize..100) {
            let rows: Vec<u64> = (0..total as u64).rev().collect();

            let mut seen = Vec::new();
            let mut cursor: Option<u64> = None;
            loop {
                let window: Vec<u64> = rows
                    .iter()
                    .copied()
                    .filter(|k| cursor.map_or(true, |c| *k < c))
                    .take(limit + 1)
                    .collect();
                let page = keyset(window, limit, |k| *k);
                prop_assert!(page.items.len() <= limit);
                seen.extend(page.items);
                match page.next_cursor {
                    Some(next) => cursor = Some(next),
                    None => break,
                }
            }

            prop_assert_eq!(seen, rows);
        }
    }
}
