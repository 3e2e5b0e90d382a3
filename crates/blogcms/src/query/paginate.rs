use serde::Serialize;

/// Most numbered buttons a pagination bar shows at once.
pub const PAGE_WINDOW: usize = 5;

/// A 1-based page number and a page size. Both are clamped to at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn first(limit: usize) -> Self {
        Self::new(1, limit)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub limit: usize,
    pub has_next: bool,
    pub has_prev: bool,
    /// 1-based index of the first item on this page, 0 when the page is empty.
    pub start_index: usize,
    /// 1-based index of the last item on this page, 0 when the page is empty.
    pub end_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Slices `[(page-1)*limit, page*limit)` out of `items`.
///
/// A page past the end yields an empty slice, never an error.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total_items = items.len();
    let limit = request.limit();
    let current_page = request.page();
    let total_pages = total_items.div_ceil(limit);
    let offset = (current_page - 1).saturating_mul(limit);

    let items: Vec<T> = items.into_iter().skip(offset).take(limit).collect();
    let (start_index, end_index) = if items.is_empty() {
        (0, 0)
    } else {
        (offset + 1, offset + items.len())
    };

    Page {
        items,
        pagination: Pagination {
            current_page,
            total_pages,
            total_items,
            limit,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
            start_index,
            end_index,
        },
    }
}

/// Page numbers shown around `current`: up to [`PAGE_WINDOW`] of them, starting
/// two before the current page.
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    let start = current.saturating_sub(2).max(1);
    let end = total_pages.min(start + PAGE_WINDOW - 1);
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    #[test]
    fn test_seven_items_three_per_page() {
        let sizes: Vec<usize> = (1..=3)
            .map(|p| paginate(numbers(7), PageRequest::new(p, 3)).items.len())
            .collect();
        assert_eq!(sizes, vec![3, 3, 1]);

        let last = paginate(numbers(7), PageRequest::new(3, 3));
        assert_eq!(last.items, vec![7]);
        assert!(!last.pagination.has_next);
        assert!(last.pagination.has_prev);
        assert_eq!(last.pagination.start_index, 7);
        assert_eq!(last.pagination.end_index, 7);
        assert_eq!(last.pagination.total_pages, 3);
    }

    #[test]
    fn test_first_page_metadata() {
        let first = paginate(numbers(7), PageRequest::new(1, 3));
        assert_eq!(first.pagination.start_index, 1);
        assert_eq!(first.pagination.end_index, 3);
        assert!(first.pagination.has_next);
        assert!(!first.pagination.has_prev);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let page = paginate(numbers(7), PageRequest::new(9, 3));
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 3);
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_prev);
        assert_eq!((page.pagination.start_index, page.pagination.end_index), (0, 0));
    }

    #[test]
    fn test_empty_collection() {
        let page = paginate(Vec::<usize>::new(), PageRequest::new(1, 6));
        assert_eq!(page.pagination.total_pages, 0);
        assert!(!page.pagination.has_next);
        assert!(!page.pagination.has_prev);
    }

    #[test]
    fn test_request_is_clamped() {
        let req = PageRequest::new(0, 0);
        assert_eq!((req.page(), req.limit()), (1, 1));
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(6, 10), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(10, 10), vec![8, 9, 10]);
        assert_eq!(page_window(2, 3), vec![1, 2, 3]);
    }
}
