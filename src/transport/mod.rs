use std::future::Future;
use std::sync::Arc;

use crate::config::{Config, TransportKind};
use crate::data_models::{SearchRequest, SearchResponse};
use crate::error::SearchResult;

pub mod hosted;
pub mod http;

pub use hosted::HostedBackend;
pub use http::HttpBackend;

/// The external collaborator that turns a question into an answer. Every
/// adapter normalizes its wire format into [`SearchResponse`].
pub trait SearchBackend: Send + Sync {
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = SearchResult<SearchResponse>> + Send;
}

impl<B: SearchBackend> SearchBackend for Arc<B> {
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = SearchResult<SearchResponse>> + Send {
        (**self).search(request)
    }
}

/// The transport chosen at start-up. Only one is ever used per process.
pub enum Backend {
    Http(HttpBackend),
    Hosted(HostedBackend),
}

impl Backend {
    pub async fn from_config(config: &Config) -> SearchResult<Backend> {
        match config.transport {
            TransportKind::Http => Ok(Backend::Http(HttpBackend::new(
                &config.backend_url,
                config.timeout,
            )?)),
            TransportKind::Hosted => Ok(Backend::Hosted(
                HostedBackend::connect(&config.hosted_url, config.timeout).await?,
            )),
        }
    }
}

impl SearchBackend for Backend {
    async fn search(&self, request: &SearchRequest) -> SearchResult<SearchResponse> {
        match self {
            Backend::Http(backend) => backend.search(request).await,
            Backend::Hosted(backend) => backend.search(request).await,
        }
    }
}

pub(crate) fn build_client(
    timeout: Option<std::time::Duration>,
) -> SearchResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}
