#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use search_assistant::data_models::{SearchRequest, SearchResponse, Source};
use search_assistant::error::SearchResult;
use search_assistant::transport::SearchBackend;

/// Backend double: records every request and plays back scripted replies.
/// Once the script runs out it answers with [`sample_response`].
pub struct FakeBackend {
    requests: Mutex<Vec<SearchRequest>>,
    replies: Mutex<VecDeque<SearchResult<SearchResponse>>>,
    delay: Duration,
}

impl FakeBackend {
    pub fn new() -> FakeBackend {
        FakeBackend {
            requests: Mutex::new(Vec::new()),
            replies: Mutex::new(VecDeque::new()),
            delay: Duration::ZERO,
        }
    }

    pub fn replying(reply: SearchResult<SearchResponse>) -> FakeBackend {
        FakeBackend::new().then(reply)
    }

    pub fn then(self, reply: SearchResult<SearchResponse>) -> FakeBackend {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> FakeBackend {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl SearchBackend for FakeBackend {
    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(sample_response()));
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        reply
    }
}

pub fn sample_response() -> SearchResponse {
    SearchResponse {
        answer: "**Hi** there\nfriend".to_string(),
        sources: vec![
            Source::new(
                Some("Rust Book"),
                "https://doc.rust-lang.org/book/",
                Some("The Rust Programming Language"),
            ),
            Source::new(None, "https://example.com/untitled", None),
        ],
    }
}
