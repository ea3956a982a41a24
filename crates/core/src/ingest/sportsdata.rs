use crate::config::Settings;
use crate::ingest::gateway::{self, SourceRequest, DEFAULT_TIMEOUT_SECS};
use crate::ingest::normalize;
use crate::ingest::types::LeagueSnapshot;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://nba-api-free-data.p.rapidapi.com";

const GAMES_PATH: &str = "/nba-games-today";
const TEAMS_PATH: &str = "/nba-team-list";
const PLAYER_STATS_PATH: &str = "/nba-player-stats";

/// RapidAPI NBA feed: games today, team list and player stats, fetched as one
/// concurrent unit and merged into a `LeagueSnapshot`.
#[derive(Debug, Clone)]
pub struct SportsDataClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl SportsDataClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.sports_api_key.clone();
        if api_key.is_none() {
            tracing::warn!("SPORTS_API_KEY not set; NBA data sources will report unavailable");
        }

        let base_url = settings
            .sports_api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = std::env::var("SPORTS_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .build()
            .context("failed to build sports data http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub async fn fetch_snapshot(&self) -> Result<LeagueSnapshot> {
        let sources = vec![
            self.source("nba_games", GAMES_PATH)?,
            self.source("nba_teams", TEAMS_PATH)?,
            self.source("nba_player_stats", PLAYER_STATS_PATH)?,
        ];
        let responses = gateway::fetch_all(&self.http, sources).await;
        Ok(normalize::normalize_league(&responses))
    }

    fn source(&self, name: &'static str, path: &str) -> Result<SourceRequest> {
        let mut source = SourceRequest::new(name, self.url(path));
        source.headers = self.headers()?;
        source.timeout = self.timeout;
        Ok(source)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
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

/// RapidAPI expects the bare host in `X-RapidAPI-Host`.
pub(crate) fn host_of(base_url: &str) -> &str {
    let without_scheme = base_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(base_url);
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .trim_end_matches('/')
}
