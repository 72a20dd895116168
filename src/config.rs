use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::SearchError;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        transport: get_env_or_default("SEARCH_TRANSPORT", "http")
            .parse()
            .unwrap_or_else(|e| panic!("Invalid SEARCH_TRANSPORT: {e}")),
        backend_url: get_env_or_default("SEARCH_BACKEND_URL", "http://localhost:5000"),
        hosted_url: get_env_or_default(
            "SEARCH_HOSTED_URL",
            "https://praneshjs-aisearchonlyapp.hf.space/",
        ),
        timeout: get_optional_secs("SEARCH_TIMEOUT_SECS"),
        bind_addr: get_env_or_default("UI_BIND_ADDR", "127.0.0.1:8000"),
        static_dir: get_env_or_default("UI_STATIC_DIR", "static"),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    pub transport: TransportKind,
    pub backend_url: String,
    pub hosted_url: String,
    pub timeout: Option<Duration>,
    pub bind_addr: String,
    pub static_dir: String,
}

/// Which collaborator answers searches. Exactly one is used per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// `POST <backend>/search` with a JSON body.
    Http,
    /// Hosted inference app exposing `search_fn`.
    Hosted,
}

impl FromStr for TransportKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(TransportKind::Http),
            "hosted" => Ok(TransportKind::Hosted),
            other => Err(SearchError::InvalidTransport(other.to_string())),
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_optional_secs(key: &str) -> Option<Duration> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => panic!("{key} must be a whole number of seconds, got {raw:?}"),
    }
}
