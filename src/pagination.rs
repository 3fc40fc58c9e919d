use std::ops::RangeInclusive;

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Page numbers shown on each side of the current page in the selector.
const WINDOW_RADIUS: usize = 2;

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Items on the 1-based `page`, clipped to the list bounds.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Page numbers for the selector: at most five, centred on `current`.
pub fn page_window(current: usize, total: usize) -> RangeInclusive<usize> {
    let start = current.saturating_sub(WINDOW_RADIUS).max(1);
    let end = current.saturating_add(WINDOW_RADIUS).min(total);
    start..=end
}

/// "Showing X to Y of Z" plus navigation button state for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub page: usize,
    pub total_pages: usize,
    pub total_records: usize,
    pub showing_start: usize,
    pub showing_end: usize,
}

impl PageBounds {
    pub fn new(page: usize, page_size: usize, total_records: usize) -> Self {
        let start = page.saturating_sub(1).saturating_mul(page_size);
        let end = start.saturating_add(page_size).min(total_records);
        let showing_start = if start < total_records { start + 1 } else { 0 };

        Self {
            page,
            total_pages: total_pages(total_records, page_size),
            total_records,
            showing_start,
            showing_end: if showing_start == 0 { 0 } else { end },
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.total_pages > 0 && self.page < self.total_pages
    }

    pub fn window(&self) -> RangeInclusive<usize> {
        page_window(self.page, self.total_pages)
    }
}
