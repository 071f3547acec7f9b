// src/pagination.rs
//
// Server-side counterpart of the list screens' pager: a fixed page size,
// page count derived from the filtered total, previous/next availability.
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub search: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub page_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    /// Converts the page's items (rows to response DTOs) keeping the meta.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            page_count: self.page_count,
            has_prev: self.has_prev,
            has_next: self.has_next,
        }
    }
}

/// Slices `items` to the requested page window. Page numbers are 1-based and
/// clamped to the valid range; an empty set still reports one (empty) page.
pub fn paginate<T>(items: Vec<T>, page: Option<usize>, per_page: Option<usize>) -> Paginated<T> {
    let per_page = per_page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE_SIZE);
    let total = items.len();
    let page_count = total.div_ceil(per_page).max(1);
    let page = page.filter(|p| *p > 0).unwrap_or(1).min(page_count);

    let start = (page - 1) * per_page;
    let items: Vec<T> = items
        .into_iter()
        .skip(start)
        .take(per_page)
        .collect();

    Paginated {
        items,
        total,
        page,
        per_page,
        page_count,
        has_prev: page > 1,
        has_next: page < page_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn page_count_is_ceil_of_total_over_page_size() {
        assert_eq!(paginate(nums(25), Some(1), Some(10)).page_count, 3);
        assert_eq!(paginate(nums(30), Some(1), Some(10)).page_count, 3);
        assert_eq!(paginate(nums(31), Some(1), Some(10)).page_count, 4);
        assert_eq!(paginate(nums(1), Some(1), Some(10)).page_count, 1);
    }

    #[test]
    fn prev_disabled_exactly_on_first_page() {
        let first = paginate(nums(25), Some(1), Some(10));
        assert!(!first.has_prev);
        assert!(first.has_next);

        let middle = paginate(nums(25), Some(2), Some(10));
        assert!(middle.has_prev);
        assert!(middle.has_next);
    }

    #[test]
    fn next_disabled_exactly_on_last_page() {
        let last = paginate(nums(25), Some(3), Some(10));
        assert!(last.has_prev);
        assert!(!last.has_next);
    }

    #[test]
    fn slices_the_requested_window() {
        let page = paginate(nums(25), Some(2), Some(10));
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());

        let tail = paginate(nums(25), Some(3), Some(10));
        assert_eq!(tail.items, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn out_of_range_page_clamps_to_last() {
        let page = paginate(nums(25), Some(99), Some(10));
        assert_eq!(page.page, 3);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn empty_set_is_a_single_empty_page() {
        let page = paginate(Vec::<usize>::new(), None, None);
        assert_eq!(page.total, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_count, 1);
        assert!(!page.has_prev);
        assert!(!page.has_next);
    }

    #[test]
    fn defaults_apply_when_params_missing() {
        let page = paginate(nums(25), None, None);
        assert_eq!(page.per_page, DEFAULT_PAGE_SIZE);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 10);
    }
}
