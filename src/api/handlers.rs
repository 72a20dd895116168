use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use crate::controller::SearchController;
use crate::error::SearchError;
use crate::transport::SearchBackend;
use crate::view::CapturedView;

use super::AppState;
use super::models::{UiSearchRequest, UiSearchResponse, UiStatus};

/// Runs one search through a fresh controller bound to an in-memory view and
/// returns what that view ended up showing.
pub async fn search_handler<B>(
    State(state): State<Arc<AppState<B>>>,
    Json(request): Json<UiSearchRequest>,
) -> (StatusCode, Json<UiSearchResponse>)
where
    B: SearchBackend + 'static,
{
    let start = Instant::now();

    let view = Arc::new(CapturedView::with_question(request.question));
    let mut controller =
        SearchController::with_notify_delay(state.backend.clone(), view.clone(), state.notify_delay);
    controller.set_mode(request.mode);

    let outcome = controller.submit_query().await;
    let snapshot = view.snapshot();
    let notification = snapshot.notification.map(|(_, n)| n);

    let (code, status) = match &outcome {
        Ok(_) => (StatusCode::OK, UiStatus::Success),
        Err(SearchError::EmptyQuestion) => (StatusCode::BAD_REQUEST, UiStatus::Error),
        Err(_) => (StatusCode::OK, UiStatus::Error),
    };

    log::info!(
        "ui search settled with {:?} in {}ms",
        status,
        start.elapsed().as_millis()
    );

    (
        code,
        Json(UiSearchResponse {
            status,
            results_html: snapshot.results_html,
            notification,
        }),
    )
}
