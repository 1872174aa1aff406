use std::ops::Range;

use crate::config::SWIPE_THRESHOLD_PX;

/// One entry of a rendered pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayToken {
    Page(u32),
    Ellipsis,
}

/// Computes the pager buttons for `current_page` out of `total_pages`.
///
/// Returns an empty sequence when there is at most one page; callers should
/// not render a pager in that case. A `current_page` outside
/// `1..=total_pages` is clamped first.
pub fn compute(current_page: u32, total_pages: u32, window_size: u32) -> Vec<DisplayToken> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let current = current_page.clamp(1, total_pages);
    let window_start = current.saturating_sub(window_size).max(2);
    let window_end = current.saturating_add(window_size).min(total_pages - 1);

    let mut pages = Vec::new();
    pages.push(1);
    pages.extend(window_start..=window_end);
    pages.push(total_pages);

    let mut tokens = Vec::with_capacity(pages.len() + 2);
    let mut previous: Option<u32> = None;
    for page in pages {
        if let Some(prev) = previous {
            if page - prev >= 2 {
                tokens.push(DisplayToken::Ellipsis);
            }
        }
        tokens.push(DisplayToken::Page(page));
        previous = Some(page);
    }
    tokens
}

/// Number of pages needed for `item_count` items, `ceil(item_count / page_size)`.
pub fn total_pages(item_count: usize, page_size: usize) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(item_count.div_ceil(page_size)).unwrap_or(u32::MAX)
}

/// Index range of the items shown on `page` (1-based), clipped to `len`.
pub fn page_bounds(page: u32, page_size: usize, len: usize) -> Range<usize> {
    let first = (page.max(1) as usize - 1).saturating_mul(page_size).min(len);
    let last = first.saturating_add(page_size).min(len);
    first..last
}

/// 1-based serial number of `row` (0-based, within the page) on `page`.
pub fn serial_number(page: u32, page_size: usize, row: usize) -> usize {
    (page.max(1) as usize - 1) * page_size + row + 1
}

/// Where the current page sits relative to the ends of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Previous is disabled. A single-page list reports this state too.
    AtFirstPage,
    /// Next is disabled.
    AtLastPage,
    Interior,
}

/// Direction a finished swipe asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeIntent {
    Next,
    Prev,
    None,
}

/// Touch-start position, kept only until the matching touch-end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeGesture {
    start_x: f64,
}

impl SwipeGesture {
    pub fn begin(start_x: f64) -> Self {
        Self { start_x }
    }

    /// Consumes the gesture. A leftward drag longer than the threshold means
    /// "next page", a rightward one "previous page".
    pub fn finish(self, end_x: f64) -> SwipeIntent {
        let distance = self.start_x - end_x;
        if distance > SWIPE_THRESHOLD_PX {
            SwipeIntent::Next
        } else if distance < -SWIPE_THRESHOLD_PX {
            SwipeIntent::Prev
        } else {
            SwipeIntent::None
        }
    }
}

/// Current page of a list view.
///
/// Invariant: `1 <= current_page <= max(total_pages, 1)`. Every mutator
/// returns `true` only when the page actually changed, so callers can skip
/// re-rendering on no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationController {
    current_page: u32,
    total_pages: u32,
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(0)
    }
}

impl PaginationController {
    pub fn new(total_pages: u32) -> Self {
        Self {
            current_page: 1,
            total_pages,
        }
    }

    /// Restores a controller from state held elsewhere, clamping `current_page`.
    pub fn with_state(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page: current_page.clamp(1, total_pages.max(1)),
            total_pages,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Replaces the page count after the underlying list changed and pulls the
    /// current page back inside the new range.
    pub fn set_total_pages(&mut self, total_pages: u32) -> bool {
        self.total_pages = total_pages;
        let clamped = self.current_page.clamp(1, total_pages.max(1));
        let changed = clamped != self.current_page;
        self.current_page = clamped;
        changed
    }

    /// Jumps to `page`, clamped into `1..=total_pages`. Does nothing when the
    /// list has no pages.
    pub fn go_to(&mut self, page: i64) -> bool {
        if self.total_pages == 0 {
            return false;
        }
        let target = page.clamp(1, i64::from(self.total_pages)) as u32;
        if target == self.current_page {
            return false;
        }
        self.current_page = target;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(i64::from(self.current_page) + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.go_to(i64::from(self.current_page) - 1)
    }

    pub fn can_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn boundary(&self) -> Boundary {
        if !self.can_prev() {
            Boundary::AtFirstPage
        } else if !self.can_next() {
            Boundary::AtLastPage
        } else {
            Boundary::Interior
        }
    }

    pub fn apply(&mut self, intent: SwipeIntent) -> bool {
        match intent {
            SwipeIntent::Next => self.next(),
            SwipeIntent::Prev => self.prev(),
            SwipeIntent::None => false,
        }
    }

    /// Applies a completed touch gesture.
    pub fn interpret_swipe(&mut self, start_x: f64, end_x: f64) -> bool {
        self.apply(SwipeGesture::begin(start_x).finish(end_x))
    }

    pub fn tokens(&self, window_size: u32) -> Vec<DisplayToken> {
        compute(self.current_page, self.total_pages, window_size)
    }
}

#[cfg(test)]
mod tests {
    use super::DisplayToken::{Ellipsis, Page};
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_page_has_no_pager() {
        assert!(compute(1, 1, 1).is_empty());
        assert!(compute(1, 1, 2).is_empty());
        assert!(compute(1, 0, 1).is_empty());
    }

    #[test]
    fn two_pages_are_both_anchors() {
        assert_eq!(compute(1, 2, 1), vec![Page(1), Page(2)]);
        assert_eq!(compute(2, 2, 1), vec![Page(1), Page(2)]);
    }

    #[test]
    fn window_in_the_middle_gets_both_ellipses() {
        assert_eq!(
            compute(5, 10, 1),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn wider_window() {
        assert_eq!(
            compute(5, 10, 2),
            vec![
                Page(1),
                Ellipsis,
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Page(7),
                Ellipsis,
                Page(10)
            ]
        );
    }

    #[test]
    fn no_ellipsis_on_the_side_of_an_edge_page() {
        assert_eq!(compute(1, 10, 1), vec![Page(1), Page(2), Ellipsis, Page(10)]);
        assert_eq!(compute(10, 10, 1), vec![Page(1), Ellipsis, Page(9), Page(10)]);
    }

    #[test]
    fn adjacent_window_merges_with_anchor() {
        assert_eq!(compute(3, 5, 1), vec![Page(1), Page(2), Page(3), Page(4), Page(5)]);
    }

    #[test]
    fn out_of_range_current_page_is_clamped() {
        assert_eq!(compute(0, 5, 1), compute(1, 5, 1));
        assert_eq!(compute(42, 5, 1), compute(5, 5, 1));
    }

    #[test]
    fn page_math() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 0);
        assert_eq!(page_bounds(1, 10, 25), 0..10);
        assert_eq!(page_bounds(3, 10, 25), 20..25);
        assert_eq!(page_bounds(4, 10, 25), 25..25);
        assert_eq!(serial_number(2, 7, 0), 8);
    }

    #[test]
    fn go_to_clamps() {
        let mut pager = PaginationController::new(8);
        pager.go_to(0);
        assert_eq!(pager.current_page(), 1);
        pager.go_to(8 + 5);
        assert_eq!(pager.current_page(), 8);
        pager.go_to(-3);
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn go_to_without_pages_is_a_noop() {
        let mut pager = PaginationController::new(0);
        assert!(!pager.go_to(4));
        assert!(!pager.next());
        assert_eq!(pager.current_page(), 1);
    }

    #[test]
    fn go_to_current_reports_no_change() {
        let mut pager = PaginationController::with_state(3, 6);
        assert!(!pager.go_to(3));
        assert_eq!(pager.current_page(), 3);
    }

    #[test]
    fn next_and_prev_stop_at_the_ends() {
        let mut pager = PaginationController::new(2);
        assert_eq!(pager.boundary(), Boundary::AtFirstPage);
        assert!(!pager.prev());
        assert!(pager.next());
        assert_eq!(pager.boundary(), Boundary::AtLastPage);
        assert!(!pager.next());
        assert_eq!(pager.current_page(), 2);

        let pager = PaginationController::with_state(2, 3);
        assert_eq!(pager.boundary(), Boundary::Interior);
    }

    #[test]
    fn swipe_left_advances_and_right_goes_back() {
        let mut pager = PaginationController::with_state(2, 5);
        assert!(pager.interpret_swipe(100.0, 40.0));
        assert_eq!(pager.current_page(), 3);
        assert!(pager.interpret_swipe(40.0, 100.0));
        assert_eq!(pager.current_page(), 2);
        assert!(!pager.interpret_swipe(60.0, 50.0));
        assert_eq!(pager.current_page(), 2);
    }

    #[test]
    fn swipe_exactly_at_threshold_is_ignored() {
        assert_eq!(SwipeGesture::begin(100.0).finish(50.0), SwipeIntent::None);
        assert_eq!(SwipeGesture::begin(50.0).finish(100.0), SwipeIntent::None);
    }

    #[test]
    fn shrinking_list_pulls_page_back() {
        let mut pager = PaginationController::with_state(3, 3);
        assert!(pager.set_total_pages(2));
        assert_eq!(pager.current_page(), 2);
        assert!(pager.set_total_pages(0));
        assert_eq!(pager.current_page(), 1);
        assert!(!pager.set_total_pages(4));
    }

    proptest! {
        #[test]
        fn current_page_always_shown(total in 2u32..500, window in 1u32..3) {
            let tokens = compute(total, total, window);
            prop_assert!(tokens.contains(&Page(total)));
            for current in [1, total / 2 + 1, total] {
                prop_assert!(compute(current, total, window).contains(&Page(current)));
            }
        }

        #[test]
        fn ellipsis_only_marks_real_gaps(current in 0u32..600, total in 0u32..500, window in 1u32..3) {
            let tokens = compute(current, total, window);
            for pair in tokens.windows(2) {
                prop_assert!(!(pair[0] == Ellipsis && pair[1] == Ellipsis));
            }
            for triple in tokens.windows(3) {
                if let [Page(a), Ellipsis, Page(b)] = triple {
                    prop_assert!(b - a >= 2);
                }
            }
            for pair in tokens.windows(2) {
                if let [Page(a), Page(b)] = pair {
                    prop_assert_eq!(b - a, 1);
                }
            }
        }

        #[test]
        fn pages_are_ascending_and_anchored(current in 1u32..600, total in 2u32..500, window in 1u32..3) {
            let pages: Vec<u32> = compute(current, total, window)
                .into_iter()
                .filter_map(|t| match t {
                    Page(n) => Some(n),
                    Ellipsis => None,
                })
                .collect();
            prop_assert_eq!(pages.first().copied(), Some(1));
            prop_assert_eq!(pages.last().copied(), Some(total));
            prop_assert!(pages.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn controller_stays_in_range(total in 0u32..100, moves in proptest::collection::vec(-200i64..200, 0..20)) {
            let mut pager = PaginationController::new(total);
            for target in moves {
                pager.go_to(target);
                prop_assert!(pager.current_page() >= 1);
                prop_assert!(pager.current_page() <= total.max(1));
            }
        }
    }
}
