use std::ops::Range;

pub const HOURLY_PAGE_SIZE: usize = 5;

/// Page cursor over the hourly strip. Moving past either end is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HourlyPager {
    page: usize,
    total: usize,
}

impl HourlyPager {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self { page: 0, total }
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(HOURLY_PAGE_SIZE)
    }

    fn last_page(&self) -> usize {
        self.page_count().saturating_sub(1)
    }

    /// Jumps to `page`, clamped to the valid range.
    pub fn go_to(&mut self, page: usize) {
        self.page = page.min(self.last_page());
    }

    pub fn next(&mut self) {
        self.go_to(self.page.saturating_add(1));
    }

    pub fn prev(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    /// Index range of entries on the current page.
    #[must_use]
    pub fn visible(&self) -> Range<usize> {
        let start = (self.page * HOURLY_PAGE_SIZE).min(self.total);
        let end = (start + HOURLY_PAGE_SIZE).min(self.total);
        start..end
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.visible().end < self.total
    }

    #[must_use]
    pub fn slice<'a, T>(&self, entries: &'a [T]) -> &'a [T] {
        let range = self.visible();
        entries
            .get(range.start..range.end.min(entries.len()))
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_of_a_full_day() {
        let mut pager = HourlyPager::new(24);
        assert_eq!(pager.page_count(), 5);
        pager.go_to(4);
        assert_eq!(pager.visible(), 20..24);
        assert!(!pager.has_next());
        assert!(pager.has_prev());
    }

    #[test]
    fn navigation_stops_at_both_ends() {
        let mut pager = HourlyPager::new(24);
        pager.prev();
        assert_eq!(pager.page(), 0);
        assert!(!pager.has_prev());
        for _ in 0..10 {
            pager.next();
        }
        assert_eq!(pager.page(), 4);
        pager.go_to(99);
        assert_eq!(pager.page(), 4);
    }

    #[test]
    fn empty_strip_has_single_empty_page() {
        let mut pager = HourlyPager::new(0);
        pager.next();
        assert_eq!(pager.page(), 0);
        assert_eq!(pager.visible(), 0..0);
        assert!(!pager.has_next());
    }

    #[test]
    fn slice_returns_current_page_items() {
        let hours: Vec<u32> = (0..12).collect();
        let mut pager = HourlyPager::new(hours.len());
        pager.next();
        assert_eq!(pager.slice(&hours), &[5, 6, 7, 8, 9]);
        pager.next();
        assert_eq!(pager.slice(&hours), &[10, 11]);
    }
}
