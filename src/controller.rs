use std::sync::Arc;
use std::time::Duration;

use crate::data_models::{Mode, NotificationKind, SearchRequest, SearchResponse, UiState};
use crate::error::SearchResult;
use crate::notify::Notifier;
use crate::render::{render_error, render_results};
use crate::transport::SearchBackend;
use crate::view::SearchView;

pub const SEARCH_OK_MESSAGE: &str = "Search completed successfully!";
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed";

/// Turns user intent into one outbound search and renders exactly one
/// outcome.
pub struct SearchController<B: SearchBackend, V: SearchView> {
    backend: B,
    view: Arc<V>,
    notifier: Notifier<V>,
    state: UiState,
}

/// Holds the view in its busy state. Dropping it restores the idle state, so
/// cleanup also runs when the search future is dropped or panics.
struct BusyGuard<'a, V: SearchView> {
    view: &'a V,
    busy: &'a mut bool,
}

impl<'a, V: SearchView> BusyGuard<'a, V> {
    fn engage(view: &'a V, busy: &'a mut bool, label: &str) -> BusyGuard<'a, V> {
        *busy = true;
        view.set_trigger_enabled(false);
        view.show_busy(label);
        BusyGuard { view, busy }
    }
}

impl<V: SearchView> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        *self.busy = false;
        self.view.set_trigger_enabled(true);
        self.view.hide_busy();
    }
}

impl<B: SearchBackend, V: SearchView> SearchController<B, V> {
    pub fn new(backend: B, view: Arc<V>) -> Self {
        let notifier = Notifier::new(view.clone());
        Self::with_notifier(backend, view, notifier)
    }

    pub fn with_notify_delay(backend: B, view: Arc<V>, delay: Duration) -> Self {
        let notifier = Notifier::with_delay(view.clone(), delay);
        Self::with_notifier(backend, view, notifier)
    }

    fn with_notifier(backend: B, view: Arc<V>, notifier: Notifier<V>) -> Self {
        let state = UiState::default();
        view.set_mode_active(state.mode);
        view.set_trigger_enabled(true);
        view.hide_busy();
        Self {
            backend,
            view,
            notifier,
            state,
        }
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.view.set_mode_active(mode);
        log::info!("mode changed to: {mode}");
    }

    /// Reads the question from the view and runs one search with the current
    /// mode. The outcome is rendered into the view and also returned.
    pub async fn submit_query(&mut self) -> SearchResult<SearchResponse> {
        let mode = self.state.mode;
        let request = match SearchRequest::new(&self.view.question(), mode) {
            Ok(request) => request,
            Err(e) => {
                self.notifier.notify(e.to_string(), NotificationKind::Error).await;
                return Err(e);
            }
        };

        let _busy = BusyGuard::engage(&*self.view, &mut self.state.busy, mode.busy_label());
        self.view.set_results("");

        match self.backend.search(&request).await {
            Ok(response) => {
                log::info!(
                    "search answered with {} source(s) (mode: {mode})",
                    response.sources.len()
                );
                self.view.set_results(&render_results(&response, mode));
                self.notifier
                    .notify(SEARCH_OK_MESSAGE, NotificationKind::Success)
                    .await;
                Ok(response)
            }
            Err(e) => {
                log::error!("search failed (mode: {mode}), error: {:#}", e);
                self.view.set_results(&render_error(&e.to_string()));
                self.notifier
                    .notify(SEARCH_FAILED_MESSAGE, NotificationKind::Error)
                    .await;
                Err(e)
            }
        }
    }
}
