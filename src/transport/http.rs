use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;

use crate::data_models::{SearchRequest, SearchResponse, Source};
use crate::error::{FALLBACK_ERROR_MESSAGE, SearchError, SearchResult};

use super::{SearchBackend, build_client};

/// Talks to a search service exposing `POST /search`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct SuccessBody {
    answer: String,
    #[serde(default)]
    sources: Option<Vec<Source>>,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> SearchResult<HttpBackend> {
        Ok(HttpBackend {
            client: build_client(timeout)?,
            endpoint: format!("{}/search", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SearchBackend for HttpBackend {
    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchResponse> {
        log::info!(
            "POST {} (mode: {}, question: {:?})",
            self.endpoint,
            request.mode,
            request.question
        );

        let res = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        normalize_response(status, &body)
    }
}

/// Turns a raw `/search` reply into the normalized response or the error the
/// user should see.
pub fn normalize_response(status: StatusCode, body: &str) -> SearchResult<SearchResponse> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if status.is_success() => {
            return Err(SearchError::MalformedResponse(e.to_string()));
        }
        Err(_) => {
            log::warn!("search backend returned {status} with a non-JSON body");
            return Err(SearchError::Application(FALLBACK_ERROR_MESSAGE.to_string()));
        }
    };

    let reported_success = value.get("status").and_then(Value::as_str) == Some("success");
    if !status.is_success() || !reported_success {
        return Err(SearchError::Application(failure_message(&value)));
    }

    let body: SuccessBody =
        serde_json::from_value(value).map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

    Ok(SearchResponse {
        answer: body.answer,
        sources: body.sources.unwrap_or_default(),
    })
}

/// `detail` first, then `answer`, then the generic fallback. The backend
/// wraps its whole error body in `detail` when it fails with HTTP 500, so an
/// object-valued `detail` is searched the same way.
fn failure_message(value: &Value) -> String {
    let non_empty_str = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    match value.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => return detail.clone(),
        Some(detail @ Value::Object(_)) => {
            if let Some(msg) = non_empty_str(detail.get("detail"))
                .or_else(|| non_empty_str(detail.get("answer")))
            {
                return msg;
            }
        }
        _ => {}
    }

    non_empty_str(value.get("answer")).unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}
