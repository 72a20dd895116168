use std::sync::Mutex;

use html2text::from_read;

use crate::data_models::{Mode, Notification, NotificationKind};

use super::SearchView;

/// Renders to the terminal. Results go to stdout as plain text; busy labels
/// and notifications go to stderr so they never mix with piped output.
pub struct TerminalView {
    input: Mutex<String>,
    width: usize,
}

impl TerminalView {
    pub fn new(width: usize) -> TerminalView {
        TerminalView {
            input: Mutex::new(String::new()),
            width,
        }
    }

    /// Stands in for typing into the question box.
    pub fn set_question(&self, question: impl Into<String>) {
        *self.input.lock().unwrap_or_else(|e| e.into_inner()) = question.into();
    }

    fn html_to_text(&self, html: &str) -> String {
        match from_read(html.as_bytes(), self.width) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("could not convert results to text: {:#}", e);
                html.to_string()
            }
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        TerminalView::new(80)
    }
}

impl SearchView for TerminalView {
    fn question(&self) -> String {
        self.input.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_mode_active(&self, mode: Mode) {
        let marks: Vec<String> = Mode::ALL
            .iter()
            .map(|m| {
                if *m == mode {
                    format!("[{m}]")
                } else {
                    format!(" {m} ")
                }
            })
            .collect();
        eprintln!("mode: {}", marks.join(" "));
    }

    fn set_trigger_enabled(&self, _enabled: bool) {}

    fn show_busy(&self, label: &str) {
        eprintln!("{label}");
    }

    fn hide_busy(&self) {}

    fn set_results(&self, html: &str) {
        if html.is_empty() {
            return;
        }
        println!("{}", self.html_to_text(html));
    }

    fn show_notification(&self, id: u64, notification: &Notification) {
        let tag = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        eprintln!("[{tag}] {}", notification.message);
        log::debug!("notification {id} shown");
    }

    fn remove_notification(&self, id: u64) {
        log::debug!("notification {id} dismissed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_models::{SearchResponse, Source};
    use crate::render::render_results;

    #[test]
    fn test_question_buffer() {
        let view = TerminalView::default();
        assert_eq!(view.question(), "");
        view.set_question("why is the sky blue");
        assert_eq!(view.question(), "why is the sky blue");
    }

    #[test]
    fn test_results_convert_to_text() {
        let view = TerminalView::new(100);
        let response = SearchResponse {
            answer: "**Rust** is a language".to_string(),
            sources: vec![Source::new(Some("Rust"), "https://www.rust-lang.org", None)],
        };
        let text = view.html_to_text(&render_results(&response, Mode::Quick));
        assert!(text.contains("Rust"));
        assert!(text.contains("is a language"));
        assert!(text.contains("1. Rust"));
        assert!(!text.contains("<div"));
    }
}
