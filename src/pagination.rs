//! Page index tracking and the visible page-number window

use std::ops::RangeInclusive;

/// How many numbered page buttons are shown at once
pub const PAGE_WINDOW: u32 = 3;

/// Current/total page state. `current` is always within `[1, total]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: u32,
    total: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { current: 1, total: 1 }
    }
}

impl Pagination {
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        Self {
            current: current.clamp(1, total),
            total,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Accept a page-change request. Returns false (state untouched) for
    /// page 0 or pages beyond the known total.
    pub fn request(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total {
            return false;
        }
        self.current = page;
        true
    }

    /// Update the total from a listing response, clamping `current` if the
    /// collection shrank under us.
    pub fn set_total(&mut self, total: u32) {
        self.total = total.max(1);
        if self.current > self.total {
            self.current = self.total;
        }
    }

    /// The numbered buttons to render: a window of up to [`PAGE_WINDOW`]
    /// pages centered on `current`, shifted (not shrunk) at the boundaries.
    pub fn window(&self) -> RangeInclusive<u32> {
        let width = PAGE_WINDOW.min(self.total);
        let start = self
            .current
            .saturating_sub(PAGE_WINDOW / 2)
            .max(1)
            .min(self.total - width + 1);
        start..=start + width - 1
    }

    pub fn on_first(&self) -> bool {
        self.current == 1
    }

    pub fn on_last(&self) -> bool {
        self.current == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_vec(p: Pagination) -> Vec<u32> {
        p.window().collect()
    }

    #[test]
    fn window_centers_on_current_page() {
        assert_eq!(window_vec(Pagination::new(3, 5)), vec![2, 3, 4]);
    }

    #[test]
    fn window_shifts_at_first_page() {
        let p = Pagination::new(1, 5);
        assert_eq!(window_vec(p), vec![1, 2, 3]);
        assert!(p.on_first());
        assert!(!p.on_last());
    }

    #[test]
    fn window_shifts_at_last_page() {
        let p = Pagination::new(42, 42);
        assert_eq!(window_vec(p), vec![40, 41, 42]);
        assert!(p.on_last());
    }

    #[test]
    fn window_never_exceeds_total() {
        assert_eq!(window_vec(Pagination::new(1, 1)), vec![1]);
        assert_eq!(window_vec(Pagination::new(2, 2)), vec![1, 2]);
    }

    #[test]
    fn window_stays_in_bounds_for_all_pages() {
        for total in 1..=10 {
            for current in 1..=total {
                let w: Vec<u32> = Pagination::new(current, total).window().collect();
                assert!(w.len() as u32 <= PAGE_WINDOW);
                assert!(w.contains(&current));
                assert!(*w.first().unwrap() >= 1);
                assert!(*w.last().unwrap() <= total);
            }
        }
    }

    #[test]
    fn request_accepts_valid_pages() {
        let mut p = Pagination::new(1, 5);
        assert!(p.request(4));
        assert_eq!(p.current(), 4);
    }

    #[test]
    fn request_rejects_out_of_range() {
        let mut p = Pagination::new(2, 5);
        assert!(!p.request(6));
        assert!(!p.request(0));
        assert_eq!(p.current(), 2);
    }

    #[test]
    fn set_total_clamps_current() {
        let mut p = Pagination::new(5, 5);
        p.set_total(3);
        assert_eq!(p.current(), 3);
        assert_eq!(p.total(), 3);
    }

    #[test]
    fn new_clamps_restored_page() {
        let p = Pagination::new(0, 5);
        assert_eq!(p.current(), 1);
    }
}
