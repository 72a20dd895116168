use std::sync::{Mutex, MutexGuard};

use crate::data_models::{Mode, Notification};

use super::SearchView;

/// Snapshot of everything a [`CapturedView`] has been told to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedState {
    pub question: String,
    pub active_mode: Mode,
    pub trigger_enabled: bool,
    /// `Some(label)` while the busy indicator is shown.
    pub busy_label: Option<String>,
    pub results_html: String,
    pub notification: Option<(u64, Notification)>,
    /// Every notification ever shown, oldest first.
    pub notification_log: Vec<Notification>,
    /// Every label the busy indicator has shown, oldest first.
    pub busy_log: Vec<String>,
}

impl Default for CapturedState {
    fn default() -> Self {
        CapturedState {
            question: String::new(),
            active_mode: Mode::default(),
            trigger_enabled: true,
            busy_label: None,
            results_html: String::new(),
            notification: None,
            notification_log: Vec::new(),
            busy_log: Vec::new(),
        }
    }
}

/// In-memory view. The web front-end renders one per request and the tests
/// inspect it directly.
#[derive(Debug, Default)]
pub struct CapturedView {
    state: Mutex<CapturedState>,
}

impl CapturedView {
    pub fn new() -> CapturedView {
        CapturedView::default()
    }

    pub fn with_question(question: impl Into<String>) -> CapturedView {
        let view = CapturedView::default();
        view.set_question(question);
        view
    }

    pub fn set_question(&self, question: impl Into<String>) {
        self.lock().question = question.into();
    }

    pub fn snapshot(&self) -> CapturedState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, CapturedState> {
        // A panic elsewhere must not make the view unreadable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SearchView for CapturedView {
    fn question(&self) -> String {
        self.lock().question.clone()
    }

    fn set_mode_active(&self, mode: Mode) {
        self.lock().active_mode = mode;
    }

    fn set_trigger_enabled(&self, enabled: bool) {
        self.lock().trigger_enabled = enabled;
    }

    fn show_busy(&self, label: &str) {
        let mut state = self.lock();
        state.busy_label = Some(label.to_string());
        state.busy_log.push(label.to_string());
    }

    fn hide_busy(&self) {
        self.lock().busy_label = None;
    }

    fn set_results(&self, html: &str) {
        self.lock().results_html = html.to_string();
    }

    fn show_notification(&self, id: u64, notification: &Notification) {
        let mut state = self.lock();
        state.notification = Some((id, notification.clone()));
        state.notification_log.push(notification.clone());
    }

    fn remove_notification(&self, id: u64) {
        let mut state = self.lock();
        if matches!(&state.notification, Some((shown, _)) if *shown == id) {
            state.notification = None;
        }
    }
}
