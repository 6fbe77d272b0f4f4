//! Page fetch dispatch and application
//!
//! Every dispatch carries a sequence token from the list view and a
//! cancellation token; a newer request cancels the one in flight, and the
//! reducer drops anything that still slips through out of order. Completed
//! results cross back to the UI thread through `fetch_slot`.

use super::App;
use crate::constants::API_BASE_URL;
use crate::types::{CharacterPage, FetchOutcome, FetchResult, ViewState};
use eframe::egui;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

async fn fetch_page(client: &reqwest::Client, url: &str) -> FetchOutcome {
    match client.get(url).send().await {
        Ok(response) if response.status() == reqwest::StatusCode::NOT_FOUND => {
            FetchOutcome::NotFound
        }
        Ok(response) if response.status().is_success() => {
            match response.json::<CharacterPage>().await {
                Ok(page) => FetchOutcome::Page(page),
                Err(e) => FetchOutcome::Failed(format!("invalid response body: {e}")),
            }
        }
        Ok(response) => FetchOutcome::Failed(format!("HTTP {}", response.status())),
        Err(e) => FetchOutcome::Failed(e.to_string()),
    }
}

/// Park a completed fetch for the UI thread. A task that resolved just
/// before being cancelled can land after its successor, so a result never
/// replaces a newer one still waiting in the slot.
fn store_result(slot: &Mutex<Option<FetchResult>>, result: FetchResult) {
    let mut slot = slot.lock().unwrap();
    match slot.as_ref() {
        Some(held) if held.token >= result.token => {
            debug!(
                token = result.token,
                held = held.token,
                "Discarding outdated fetch result"
            );
        }
        _ => *slot = Some(result),
    }
}

impl App {
    /// Handle a page-change request from the pagination bar. Out-of-range
    /// pages never dispatch; accepted ones persist the new page (the
    /// desktop stand-in for writing `?page=` into a shareable URL) and
    /// start exactly one fetch.
    pub fn request_page(&mut self, ctx: &egui::Context, page: u32) {
        let Some(token) = self.list.request_page(page) else {
            return;
        };
        self.save_settings();
        self.spawn_fetch(ctx, page, token);
    }

    pub(crate) fn spawn_fetch(&mut self, ctx: &egui::Context, page: u32, token: u64) {
        if let Some(superseded) = self.cancel_token.take() {
            superseded.cancel();
        }
        let cancel = CancellationToken::new();
        self.cancel_token = Some(cancel.clone());

        let url = format!("{}/character?page={}", API_BASE_URL, page);
        let slot = self.fetch_slot.clone();
        let client = self.client.clone();
        let ctx = ctx.clone();

        debug!(page, token, url = %url, "Dispatching page fetch");

        self.runtime.spawn(async move {
            let outcome = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(page, token, "Fetch superseded, cancelled");
                    return;
                }
                outcome = fetch_page(&client, &url) => outcome,
            };
            store_result(&slot, FetchResult { token, page, outcome });
            ctx.request_repaint();
        });
    }

    /// Apply a completed fetch, if one is waiting in the slot. Called once
    /// per frame from the update loop.
    pub fn poll_fetch(&mut self, ctx: &egui::Context) {
        let result = self.fetch_slot.lock().unwrap().take();
        if let Some(result) = result {
            if self.list.apply(result) && self.list.state == ViewState::Loaded {
                self.prefetch_portraits(ctx);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::store_result;
    use crate::types::{FetchOutcome, FetchResult};
    use std::sync::Mutex;

    fn result(token: u64, page: u32) -> FetchResult {
        FetchResult {
            token,
            page,
            outcome: FetchOutcome::NotFound,
        }
    }

    #[test]
    fn straggler_cannot_clobber_newer_result() {
        let slot = Mutex::new(None);
        store_result(&slot, result(2, 3));
        // The superseded fetch resolved before its cancellation landed
        store_result(&slot, result(1, 2));

        let held = slot.lock().unwrap();
        let held = held.as_ref().unwrap();
        assert_eq!(held.token, 2);
        assert_eq!(held.page, 3);
    }

    #[test]
    fn newer_result_replaces_undrained_one() {
        let slot = Mutex::new(None);
        store_result(&slot, result(1, 2));
        store_result(&slot, result(2, 3));

        assert_eq!(slot.lock().unwrap().as_ref().unwrap().token, 2);
    }

    #[test]
    fn empty_slot_accepts_any_result() {
        let slot = Mutex::new(None);
        store_result(&slot, result(1, 2));
        assert_eq!(slot.lock().unwrap().as_ref().unwrap().token, 1);
    }
}
