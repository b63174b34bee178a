//! Pagination window over an already filtered and ordered list.
//!
//! [`paginate`] is a pure function: the same list, page size and requested
//! page always produce the same window. Out-of-range requests are clamped.

/// The visible slice of a result list plus page metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow<'a, T> {
    pub items: &'a [T],
    /// 1-based, always within `1..=total_pages`.
    pub current_page: usize,
    /// At least 1, even for an empty list.
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<'a, T> PageWindow<'a, T> {
    pub fn is_first(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last(&self) -> bool {
        self.current_page == self.total_pages
    }

    /// Index of the first item of this window within the full list.
    pub fn start_index(&self) -> usize {
        (self.current_page - 1) * self.page_size
    }
}

/// Number of pages needed for `len` items: `max(1, ceil(len / page_size))`.
///
/// A page size of 0 is read as 1.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// Clamps a requested page into `1..=total_pages`.
pub fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

/// Maps `(items, page_size, requested_page)` to the visible window.
///
/// ```
/// use vitrine_seeker::paginate;
///
/// let items: Vec<u32> = (1..=25).collect();
/// let page = paginate(&items, 24, 2);
/// assert_eq!(page.items, &[25]);
/// assert_eq!(page.total_pages, 2);
/// assert!(!page.has_next);
///
/// // Page 0 and pages past the end are clamped, never an error.
/// assert_eq!(paginate(&items, 24, 0).current_page, 1);
/// assert_eq!(paginate(&items, 24, 9).current_page, 2);
/// ```
pub fn paginate<T>(items: &[T], page_size: usize, requested_page: usize) -> PageWindow<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);
    let current_page = clamp_page(requested_page, total_pages);
    let start = ((current_page - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());

    PageWindow {
        items: &items[start..end],
        current_page,
        total_pages,
        total_items: items.len(),
        page_size,
        has_next: current_page < total_pages,
        has_previous: current_page > 1,
    }
}
