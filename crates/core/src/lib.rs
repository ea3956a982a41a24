pub mod domain;
pub mod ingest;
pub mod llm;

pub mod config {
    /// All credentials are optional: a missing key degrades the matching
    /// upstream into "unavailable" responses instead of failing startup.
    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sports_api_key: Option<String>,
        pub odds_api_key: Option<String>,
        pub gemini_api_key: Option<String>,
        pub sentry_dsn: Option<String>,
        pub sports_api_base_url: Option<String>,
        pub odds_api_base_url: Option<String>,
        pub gemini_base_url: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                sports_api_key: std::env::var("SPORTS_API_KEY").ok(),
                odds_api_key: std::env::var("ODDS_API_KEY").ok(),
                gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                sports_api_base_url: std::env::var("SPORTS_API_BASE_URL").ok(),
                odds_api_base_url: std::env::var("ODDS_API_BASE_URL").ok(),
                gemini_base_url: std::env::var("GEMINI_BASE_URL").ok(),
            })
        }
    }
}
