use crate::config::Settings;
use crate::ingest::gateway::{self, SourceRequest, DEFAULT_TIMEOUT_SECS};
use crate::ingest::normalize;
use crate::ingest::sportsdata::host_of;
use crate::ingest::types::OddsSnapshot;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://odds-api1.p.rapidapi.com";

const ODDS_PATH: &str = "/odds";
const SPORT_KEY: &str = "basketball_nba";

/// RapidAPI odds feed: one request for the main markets (spreads and
/// moneylines arrive together) and one for totals.
#[derive(Debug, Clone)]
pub struct OddsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl OddsClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.odds_api_key.clone();
        if api_key.is_none() {
            tracing::warn!("ODDS_API_KEY not set; odds sources will report unavailable");
        }

        let base_url = settings
            .odds_api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = std::env::var("ODDS_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .build()
            .context("failed to build odds http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub async fn fetch_odds(&self) -> Result<OddsSnapshot> {
        let sources = vec![
            self.source("odds_spreads", &[("sport", SPORT_KEY)])?,
            self.source("odds_totals", &[("sport", SPORT_KEY), ("markets", "totals")])?,
        ];
        let responses = gateway::fetch_all(&self.http, sources).await;
        Ok(normalize::normalize_odds(&responses))
    }

    fn source(&self, name: &'static str, query: &[(&str, &str)]) -> Result<SourceRequest> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), ODDS_PATH);
        let mut source = SourceRequest::new(name, url);
        source.headers = self.headers()?;
        source.query = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        source.timeout = self.timeout;
        Ok(source)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            headers.insert("X-RapidAPI-Key", HeaderValue::from_str(api_key)?);
            headers.insert("X-RapidAPI-Host", HeaderValue::from_str(host_of(&self.base_url))?);
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_key: Option<&str>) -> Settings {
        Settings {
            sports_api_key: None,
            odds_api_key: api_key.map(str::to_string),
            gemini_api_key: None,
            sentry_dsn: None,
            sports_api_base_url: None,
            odds_api_base_url: Some("https://odds.example.test".to_string()),
            gemini_base_url: None,
        }
    }

    #[test]
    fn builds_spreads_and_totals_requests() {
        let client = OddsClient::from_settings(&settings(Some("odds-key"))).unwrap();

        let spreads = client.source("odds_spreads", &[("sport", SPORT_KEY)]).unwrap();
        assert_eq!(spreads.url, "https://odds.example.test/odds");
        assert_eq!(
            spreads.query,
            vec![("sport".to_string(), "basketball_nba".to_string())]
        );

        let totals = client
            .source("odds_totals", &[("sport", SPORT_KEY), ("markets", "totals")])
            .unwrap();
        assert_eq!(totals.query.len(), 2);
        assert_eq!(totals.headers.get("X-RapidAPI-Host").unwrap(), "odds.example.test");
    }
}
