use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Search strategy. Passed through to the backend unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Single pass over search snippets.
    #[default]
    Quick,
    /// Crawls the result pages before answering.
    Deep,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Quick, Mode::Deep];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Quick => "quick",
            Mode::Deep => "deep",
        }
    }

    /// Label for the busy indicator while a search in this mode is running.
    pub fn busy_label(&self) -> &'static str {
        match self {
            Mode::Deep => "Crawling web pages...",
            Mode::Quick => "Searching...",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quick" => Ok(Mode::Quick),
            "deep" => Ok(Mode::Deep),
            other => Err(SearchError::InvalidMode(other.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub question: String,
    pub mode: Mode,
}

impl SearchRequest {
    /// Builds a request from raw user input. The question is trimmed and must
    /// not be empty afterwards.
    pub fn new(question: &str, mode: Mode) -> Result<SearchRequest, SearchError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(SearchError::EmptyQuestion);
        }
        Ok(SearchRequest {
            question: question.to_string(),
            mode,
        })
    }
}

/// A cited web result.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Source {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl Source {
    pub fn new(title: Option<&str>, url: &str, snippet: Option<&str>) -> Source {
        Source {
            title: title.map(str::to_string),
            url: url.to_string(),
            snippet: snippet.map(str::to_string),
        }
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => "Untitled",
        }
    }

    pub fn snippet(&self) -> Option<&str> {
        self.snippet.as_deref().filter(|s| !s.is_empty())
    }
}

/// Normalized answer, identical for every transport.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState {
    pub mode: Mode,
    pub busy: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Success => "status-success",
            NotificationKind::Error => "status-error",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Notification {
        Notification {
            message: message.into(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_defaults_to_quick() {
        assert_eq!(Mode::default(), Mode::Quick);
        assert_eq!(UiState::default().mode, Mode::Quick);
        assert!(!UiState::default().busy);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("deep".parse::<Mode>().unwrap(), Mode::Deep);
        assert_eq!(" Quick ".parse::<Mode>().unwrap(), Mode::Quick);
        assert_eq!(
            "broad".parse::<Mode>(),
            Err(SearchError::InvalidMode("broad".to_string()))
        );
    }

    #[test]
    fn test_busy_label() {
        assert_eq!(Mode::Deep.busy_label(), "Crawling web pages...");
        assert_eq!(Mode::Quick.busy_label(), "Searching...");
    }

    #[test]
    fn test_request_trims_question() {
        let req = SearchRequest::new("  what is rust?\n", Mode::Deep).unwrap();
        assert_eq!(req.question, "what is rust?");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"question": "what is rust?", "mode": "deep"})
        );
    }

    #[test]
    fn test_request_rejects_blank_question() {
        assert_eq!(
            SearchRequest::new(" \t\n ", Mode::Quick),
            Err(SearchError::EmptyQuestion)
        );
        assert_eq!(SearchRequest::new("", Mode::Deep), Err(SearchError::EmptyQuestion));
    }

    #[test]
    fn test_source_optional_fields() {
        let src: Source = serde_json::from_str(r#"{"url": "https://a.example"}"#).unwrap();
        assert_eq!(src.display_title(), "Untitled");
        assert_eq!(src.snippet(), None);

        let src: Source =
            serde_json::from_str(r#"{"title": "", "url": "https://a.example", "snippet": null}"#)
                .unwrap();
        assert_eq!(src.display_title(), "Untitled");
        assert_eq!(src.snippet(), None);

        assert!(serde_json::from_str::<Source>(r#"{"title": "no url"}"#).is_err());
    }
}
