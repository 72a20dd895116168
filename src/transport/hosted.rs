use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::data_models::{SearchRequest, SearchResponse, Source};
use crate::error::{FALLBACK_ERROR_MESSAGE, SearchError, SearchResult};

use super::{SearchBackend, build_client};

/// Name of the remote function the hosted app exposes.
pub const SEARCH_FN: &str = "search_fn";

/// Client for a hosted inference app (Gradio-style queue API). The app is
/// contacted once on [`HostedBackend::connect`] to learn its API prefix, then
/// every search is a two step call: submit, then read the event stream.
#[derive(Debug, Clone)]
pub struct HostedBackend {
    client: reqwest::Client,
    call_url: String,
}

#[derive(Debug, Deserialize)]
struct AppConfig {
    #[serde(default)]
    api_prefix: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventHandle {
    event_id: String,
}

impl HostedBackend {
    pub async fn connect(base_url: &str, timeout: Option<Duration>) -> SearchResult<HostedBackend> {
        let client = build_client(timeout)?;
        let base = base_url.trim_end_matches('/');

        let config: AppConfig = client
            .get(format!("{base}/config"))
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| SearchError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| SearchError::Transport(format!("unreadable app config: {e}")))?;

        let prefix = config.api_prefix.unwrap_or_default();
        let prefix = prefix.trim_end_matches('/');
        log::info!("connected to hosted app {base} (api prefix: {prefix:?})");

        Ok(HostedBackend {
            client,
            call_url: format!("{base}{prefix}/call/{SEARCH_FN}"),
        })
    }

    pub fn call_url(&self) -> &str {
        &self.call_url
    }
}

impl SearchBackend for HostedBackend {
    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchResponse> {
        log::info!(
            "calling {} (mode: {}, question: {:?})",
            SEARCH_FN,
            request.mode,
            request.question
        );

        // Keyword arguments go positionally, in the function's parameter order.
        let payload = json!({ "data": [request.question, request.mode] });
        let handle: EventHandle = self
            .client
            .post(&self.call_url)
            .json(&payload)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| SearchError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?;

        let stream = self
            .client
            .get(format!("{}/{}", self.call_url, handle.event_id))
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| SearchError::Transport(e.to_string()))?
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        normalize_prediction(parse_event_stream(&stream)?)
    }
}

/// Finds the terminal event in a server-sent event body. `complete` yields
/// its data; `error` becomes an application error.
pub fn parse_event_stream(body: &str) -> SearchResult<Value> {
    let mut event: Option<&str> = None;

    for line in body.lines() {
        let line = line.trim_end_matches('\r');
        if let Some(name) = line.strip_prefix("event:") {
            event = Some(name.trim());
        } else if let Some(data) = line.strip_prefix("data:") {
            let data = data.trim();
            match event {
                Some("complete") => {
                    return serde_json::from_str(data)
                        .map_err(|e| SearchError::MalformedResponse(e.to_string()));
                }
                Some("error") => {
                    let message = serde_json::from_str::<Value>(data)
                        .ok()
                        .and_then(|v| v.as_str().map(str::to_string))
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
                    return Err(SearchError::Application(message));
                }
                _ => {}
            }
        } else if line.is_empty() {
            event = None;
        }
    }

    Err(SearchError::MalformedResponse(
        "event stream ended without a result".to_string(),
    ))
}

/// Element 0 is the answer, element 1 the sources list.
pub fn normalize_prediction(data: Value) -> SearchResult<SearchResponse> {
    let Value::Array(mut items) = data else {
        return Err(SearchError::MalformedResponse(
            "expected a result tuple".to_string(),
        ));
    };
    if items.is_empty() {
        return Err(SearchError::MalformedResponse("empty result tuple".to_string()));
    }

    let sources = if items.len() > 1 {
        items.swap_remove(1)
    } else {
        Value::Null
    };
    let answer = match items.swap_remove(0) {
        Value::String(answer) => answer,
        other => {
            return Err(SearchError::MalformedResponse(format!(
                "answer is not a string: {other}"
            )));
        }
    };
    let sources: Vec<Source> = match sources {
        Value::Null => Vec::new(),
        other => serde_json::from_value(other)
            .map_err(|e| SearchError::MalformedResponse(e.to_string()))?,
    };

    Ok(SearchResponse { answer, sources })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_complete_event() {
        let body = "event: generating\ndata: null\n\nevent: complete\ndata: [\"hi\", []]\n\n";
        assert_eq!(parse_event_stream(body).unwrap(), json!(["hi", []]));
    }

    #[test]
    fn test_parse_error_event() {
        let body = "event: error\r\ndata: \"Space is sleeping\"\r\n\r\n";
        assert_eq!(
            parse_event_stream(body),
            Err(SearchError::Application("Space is sleeping".to_string()))
        );
        assert_eq!(
            parse_event_stream("event: error\ndata: null\n\n"),
            Err(SearchError::Application("An error occurred".to_string()))
        );
    }

    #[test]
    fn test_parse_stream_without_result() {
        assert!(matches!(
            parse_event_stream("event: heartbeat\ndata: null\n\n"),
            Err(SearchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_data_without_event_is_ignored() {
        let body = "data: [\"orphan\"]\n\nevent: complete\ndata: [\"ok\"]\n";
        assert_eq!(parse_event_stream(body).unwrap(), json!(["ok"]));
    }

    #[test]
    fn test_normalize_prediction() {
        let data = json!([
            "answer text",
            [{"title": "A", "url": "https://a.example", "snippet": "s"}, {"url": "https://b.example"}]
        ]);
        let res = normalize_prediction(data).unwrap();
        assert_eq!(res.answer, "answer text");
        assert_eq!(res.sources.len(), 2);
        assert_eq!(res.sources[1].display_title(), "Untitled");

        let res = normalize_prediction(json!(["only answer"])).unwrap();
        assert!(res.sources.is_empty());
        let res = normalize_prediction(json!(["answer", null])).unwrap();
        assert!(res.sources.is_empty());
    }

    #[test]
    fn test_normalize_prediction_rejects_bad_shapes() {
        assert!(normalize_prediction(json!({"answer": "x"})).is_err());
        assert!(normalize_prediction(json!([])).is_err());
        assert!(normalize_prediction(json!([1, []])).is_err());
        assert!(normalize_prediction(json!(["x", "not a list"])).is_err());
    }
}
