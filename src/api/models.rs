use serde::{Deserialize, Serialize};

use crate::data_models::{Mode, Notification};

#[derive(Debug, Deserialize, Serialize)]
pub struct UiSearchRequest {
    pub question: String,
    #[serde(default)]
    pub mode: Mode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiStatus {
    Success,
    Error,
}

/// What the page should display once the search settles.
#[derive(Debug, Deserialize, Serialize)]
pub struct UiSearchResponse {
    pub status: UiStatus,
    pub results_html: String,
    pub notification: Option<Notification>,
}
