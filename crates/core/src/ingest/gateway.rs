use futures::future::join_all;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One upstream endpoint to fetch. Each source carries its own timeout so a
/// slow provider cannot stretch the deadline of the others.
#[derive(Debug, Clone)]
pub struct SourceRequest {
    pub name: &'static str,
    pub url: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
}

impl SourceRequest {
    pub fn new(name: &'static str, url: String) -> Self {
        Self {
            name,
            url,
            headers: HeaderMap::new(),
            query: Vec::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Outcome of a single upstream call. Timeouts, connection errors, non-2xx
/// statuses and malformed bodies all collapse into `Unavailable`; nothing
/// exception-shaped crosses this boundary.
#[derive(Debug, Clone)]
pub enum ProviderResponse {
    Payload(Value),
    Unavailable(String),
}

impl ProviderResponse {
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Payload(v) => Some(v),
            Self::Unavailable(_) => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Self::Payload(_) => None,
            Self::Unavailable(reason) => Some(reason),
        }
    }
}

/// Fetch every source concurrently, best effort. Returns one response per
/// source in input order; the join waits for the slowest member, bounded by
/// that member's own timeout. No retries.
pub async fn fetch_all(http: &reqwest::Client, sources: Vec<SourceRequest>) -> Vec<ProviderResponse> {
    join_all(sources.into_iter().map(|source| fetch_one(http, source))).await
}

async fn fetch_one(http: &reqwest::Client, source: SourceRequest) -> ProviderResponse {
    let res = http
        .get(&source.url)
        .headers(source.headers.clone())
        .query(&source.query)
        .timeout(source.timeout)
        .send()
        .await;

    let res = match res {
        Ok(res) => res,
        Err(err) => {
            tracing::warn!(source = source.name, error = %err, "source request failed");
            return ProviderResponse::Unavailable(format!("{}: request failed: {err}", source.name));
        }
    };

    let status = res.status();
    if !status.is_success() {
        tracing::warn!(source = source.name, http_status = %status, "source returned non-success status");
        return ProviderResponse::Unavailable(format!("{}: HTTP {status}", source.name));
    }

    match res.json::<Value>().await {
        Ok(body) => ProviderResponse::Payload(body),
        Err(err) => {
            tracing::warn!(source = source.name, error = %err, "source body is not valid JSON");
            ProviderResponse::Unavailable(format!("{}: malformed body: {err}", source.name))
        }
    }
}
