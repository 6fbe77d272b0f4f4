//! List view state: the current page of characters and how fetch results
//! are folded into it.
//!
//! Kept free of egui/tokio types so the request/apply flow is testable
//! without a UI context. The [`App`](crate::app::App) owns one of these and
//! wires it to the runtime.

use crate::pagination::Pagination;
use crate::types::{Character, FetchOutcome, FetchResult, ViewState};
use tracing::{debug, warn};

pub struct ListView {
    pub characters: Vec<Character>,
    pub pagination: Pagination,
    pub state: ViewState,
    /// What the view showed before the in-flight request; restored when a
    /// fetch fails outright so the display stays stale-but-consistent.
    settled_state: ViewState,
    /// Token of the most recently dispatched fetch. Only a result carrying
    /// this token may be applied; anything older lost the race and is dropped.
    fetch_seq: u64,
}

impl ListView {
    /// `initial_page` is the page restored from settings; the real total is
    /// unknown until the first response, so it is provisionally trusted.
    pub fn new(initial_page: u32) -> Self {
        Self {
            characters: Vec::new(),
            pagination: Pagination::new(initial_page, initial_page),
            state: ViewState::Idle,
            settled_state: ViewState::Idle,
            fetch_seq: 0,
        }
    }

    /// Request a page change. Out-of-range pages are a no-op returning None.
    /// On accept, moves to Loading and returns the token the caller must
    /// attach to the one fetch it dispatches for this request.
    pub fn request_page(&mut self, page: u32) -> Option<u64> {
        if !self.pagination.request(page) {
            debug!(page, total = self.pagination.total(), "Page out of range, ignoring");
            return None;
        }
        if self.state != ViewState::Loading {
            self.settled_state = self.state;
        }
        self.state = ViewState::Loading;
        self.fetch_seq += 1;
        Some(self.fetch_seq)
    }

    /// Fold a completed fetch into the view. Returns true if the result was
    /// current and applied, false if it was stale and dropped.
    pub fn apply(&mut self, result: FetchResult) -> bool {
        if result.token != self.fetch_seq {
            debug!(
                page = result.page,
                token = result.token,
                latest = self.fetch_seq,
                "Dropping stale fetch result"
            );
            return false;
        }

        match result.outcome {
            FetchOutcome::Page(page) => {
                self.pagination.set_total(page.info.pages);
                self.characters = page.results;
                self.state = if self.characters.is_empty() {
                    ViewState::Empty
                } else {
                    ViewState::Loaded
                };
                debug!(
                    page = result.page,
                    count = self.characters.len(),
                    total_pages = self.pagination.total(),
                    "Page applied"
                );
            }
            FetchOutcome::NotFound => {
                // Past the end of the collection: show an empty grid, keep
                // the previously known total.
                warn!(page = result.page, "Page not found");
                self.characters.clear();
                self.state = ViewState::Empty;
            }
            FetchOutcome::Failed(err) => {
                // Keep whatever was on screen, including its display state.
                warn!(page = result.page, error = %err, "Page fetch failed, keeping current view");
                self.state = self.settled_state;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CharacterPage, PageInfo};

    fn character(id: u32) -> Character {
        Character {
            id,
            name: format!("Character {id}"),
            image: format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
        }
    }

    fn page_result(token: u64, page: u32, total: u32, ids: &[u32]) -> FetchResult {
        FetchResult {
            token,
            page,
            outcome: FetchOutcome::Page(CharacterPage {
                info: PageInfo { pages: total },
                results: ids.iter().copied().map(character).collect(),
            }),
        }
    }

    /// A view that has already loaded one page of a 5-page collection.
    fn loaded_view() -> ListView {
        let mut view = ListView::new(1);
        let token = view.request_page(1).unwrap();
        assert!(view.apply(page_result(token, 1, 5, &[1, 2, 3])));
        view
    }

    #[test]
    fn starts_idle_on_restored_page() {
        let view = ListView::new(3);
        assert_eq!(view.state, ViewState::Idle);
        assert_eq!(view.pagination.current(), 3);
        assert!(view.characters.is_empty());
    }

    #[test]
    fn valid_request_loads_and_dispatches_once() {
        let mut view = loaded_view();
        let token = view.request_page(4).expect("page 4 of 5 is valid");
        assert_eq!(view.pagination.current(), 4);
        assert_eq!(view.state, ViewState::Loading);
        // A repeat of the same token is not handed out again
        assert_ne!(view.request_page(4), Some(token));
    }

    #[test]
    fn request_beyond_total_is_noop() {
        let mut view = loaded_view();
        assert!(view.request_page(6).is_none());
        assert_eq!(view.pagination.current(), 1);
        assert_eq!(view.state, ViewState::Loaded);
        assert_eq!(view.characters.len(), 3);
    }

    #[test]
    fn successful_page_replaces_records_and_total() {
        let mut view = loaded_view();
        let token = view.request_page(2).unwrap();
        assert!(view.apply(page_result(token, 2, 6, &[4, 5])));
        assert_eq!(view.state, ViewState::Loaded);
        assert_eq!(view.characters.len(), 2);
        assert_eq!(view.characters[0].id, 4);
        assert_eq!(view.pagination.total(), 6);
    }

    #[test]
    fn not_found_empties_grid_and_keeps_total() {
        let mut view = loaded_view();
        let token = view.request_page(5).unwrap();
        assert!(view.apply(FetchResult {
            token,
            page: 5,
            outcome: FetchOutcome::NotFound,
        }));
        assert_eq!(view.state, ViewState::Empty);
        assert!(view.characters.is_empty());
        assert_eq!(view.pagination.total(), 5);
    }

    #[test]
    fn other_failure_preserves_view() {
        let mut view = loaded_view();
        let token = view.request_page(2).unwrap();
        assert!(view.apply(FetchResult {
            token,
            page: 2,
            outcome: FetchOutcome::Failed("connection reset".into()),
        }));
        // Stale but consistent: records, total, and display state untouched
        assert_eq!(view.characters.len(), 3);
        assert_eq!(view.pagination.total(), 5);
        assert_eq!(view.state, ViewState::Loaded);
    }

    #[test]
    fn first_load_failure_does_not_stay_loading() {
        let mut view = ListView::new(1);
        let token = view.request_page(1).unwrap();
        assert!(view.apply(FetchResult {
            token,
            page: 1,
            outcome: FetchOutcome::Failed("connection refused".into()),
        }));
        assert_eq!(view.state, ViewState::Idle);
    }

    #[test]
    fn failure_after_empty_restores_empty() {
        let mut view = loaded_view();
        let token = view.request_page(5).unwrap();
        assert!(view.apply(FetchResult {
            token,
            page: 5,
            outcome: FetchOutcome::NotFound,
        }));
        assert_eq!(view.state, ViewState::Empty);

        let token = view.request_page(2).unwrap();
        assert_eq!(view.state, ViewState::Loading);
        assert!(view.apply(FetchResult {
            token,
            page: 2,
            outcome: FetchOutcome::Failed("timeout".into()),
        }));
        assert_eq!(view.state, ViewState::Empty);
    }

    #[test]
    fn stale_result_is_dropped() {
        let mut view = loaded_view();
        let old_token = view.request_page(2).unwrap();
        let new_token = view.request_page(3).unwrap();

        // Page 3 wins the race and lands first
        assert!(view.apply(page_result(new_token, 3, 5, &[7, 8])));
        // Page 2 straggles in afterwards and must not overwrite it
        assert!(!view.apply(page_result(old_token, 2, 5, &[4, 5])));
        assert_eq!(view.characters[0].id, 7);
        assert_eq!(view.pagination.current(), 3);
    }

    #[test]
    fn empty_result_list_goes_empty() {
        let mut view = loaded_view();
        let token = view.request_page(2).unwrap();
        assert!(view.apply(page_result(token, 2, 5, &[])));
        assert_eq!(view.state, ViewState::Empty);
    }
}
