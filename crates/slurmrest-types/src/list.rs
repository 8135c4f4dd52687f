//! List results, pagination and client-side filtering.

use serde::{Deserialize, Serialize};

/// One page of a list call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub items: Vec<T>,

    /// Records matching the filter before pagination.
    pub total: usize,
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T> ListResult<T> {
    /// Paginate an already filtered list.
    pub fn paginate(items: Vec<T>, page: Page) -> Self {
        let total = items.len();
        Self {
            items: page.apply(items),
            total,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Limit/offset pair. A limit of 0 means no limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: usize,
    pub offset: usize,
}

impl Page {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Apply to the final ordered list. An offset past the end yields an
    /// empty vec.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        if self.offset >= items.len() {
            return Vec::new();
        }
        let rest = items.into_iter().skip(self.offset);
        if self.limit == 0 {
            rest.collect()
        } else {
            rest.take(self.limit).collect()
        }
    }
}

/// Client-side predicate shared by every list path.
///
/// Versions that push a filter to the query string still run `matches` on
/// the response, so both paths return the same ordered subset.
pub trait ListFilter<T> {
    fn matches(&self, item: &T) -> bool;

    fn page(&self) -> Page;

    /// Filter then paginate.
    fn apply(&self, items: Vec<T>) -> ListResult<T> {
        let filtered: Vec<T> = items.into_iter().filter(|i| self.matches(i)).collect();
        ListResult::paginate(filtered, self.page())
    }
}

/// Outcome of a create call for entities without a dedicated response type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResponse {
    /// Name or id of the created record.
    pub id: String,
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten() -> Vec<u32> {
        (0..10).collect()
    }

    #[test]
    fn test_page_offset_and_limit() {
        assert_eq!(Page::new(3, 5).apply(ten()), vec![5, 6, 7]);
    }

    #[test]
    fn test_page_offset_past_end() {
        assert!(Page::new(3, 10).apply(ten()).is_empty());
        assert!(Page::new(0, 42).apply(ten()).is_empty());
    }

    #[test]
    fn test_page_zero_limit_is_unlimited() {
        assert_eq!(Page::new(0, 0).apply(ten()).len(), 10);
        assert_eq!(Page::new(0, 8).apply(ten()), vec![8, 9]);
    }

    #[test]
    fn test_paginate_keeps_total() {
        let result = ListResult::paginate(ten(), Page::new(2, 0));
        assert_eq!(result.items, vec![0, 1]);
        assert_eq!(result.total, 10);
    }

    struct Even;

    impl ListFilter<u32> for Even {
        fn matches(&self, item: &u32) -> bool {
            item % 2 == 0
        }

        fn page(&self) -> Page {
            Page::new(2, 1)
        }
    }

    #[test]
    fn test_filter_then_paginate() {
        let result = Even.apply(ten());
        assert_eq!(result.items, vec![2, 4]);
        assert_eq!(result.total, 5);
    }
}
