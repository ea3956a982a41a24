pub mod error;
pub mod gemini;
pub mod prompt;

use crate::ingest::types::{LeagueSnapshot, OddsSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Confidence attached to the canned response when the model call fails.
pub const FAILURE_CONFIDENCE: f64 = 0.3;

#[derive(Debug, Clone, Copy)]
pub enum Provider {
    Gemini,
}

#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> Provider;

    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceCounts {
    pub games_available: usize,
    pub odds_available: usize,
    pub stats_available: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub response: String,
    pub confidence_score: f64,
    pub data_sources: DataSourceCounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything the prompt is composed from, borrowed for one request.
#[derive(Debug, Clone)]
pub struct AnalysisRequest<'a> {
    pub user_message: &'a str,
    pub league: &'a LeagueSnapshot,
    pub odds: &'a OddsSnapshot,
    pub context: Option<&'a Value>,
}

/// Run the model over the composed prompt. Never fails: any model error is
/// absorbed into a canned low-confidence response that still references the
/// user's question.
pub async fn analyze(client: &dyn LlmClient, request: &AnalysisRequest<'_>) -> AiAnalysis {
    let data_sources = DataSourceCounts {
        games_available: request.league.games.len(),
        odds_available: request.odds.spreads.len(),
        stats_available: request.league.player_stats.len(),
    };

    let prompt_text = prompt::build_prompt(request);

    match client.generate(&prompt_text).await {
        Ok(response) => AiAnalysis {
            response,
            confidence_score: prompt::confidence_score(request.league, request.odds),
            data_sources,
            error: None,
        },
        Err(err) => {
            tracing::warn!(
                provider = ?client.provider(),
                error = %err,
                "model call failed; returning degraded analysis"
            );
            AiAnalysis {
                response: fallback_response(request.user_message),
                confidence_score: FAILURE_CONFIDENCE,
                data_sources,
                error: Some(format!("{err:#}")),
            }
        }
    }
}

pub fn fallback_response(user_message: &str) -> String {
    format!(
        "I'm analyzing your question about '{user_message}'. While I'm having technical \
         difficulties with my advanced analysis engine, I can provide you with fundamental \
         NBA betting insights based on my knowledge base."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    struct FixedClient(Result<String, String>);

    #[async_trait::async_trait]
    impl LlmClient for FixedClient {
        fn provider(&self) -> Provider {
            Provider::Gemini
        }

        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(detail) => Err(anyhow::anyhow!("{detail}")),
            }
        }
    }

    fn league(games: usize, stats: usize) -> LeagueSnapshot {
        LeagueSnapshot {
            games: (0..games).map(|i| json!({"id": i})).collect(),
            teams: Vec::new(),
            player_stats: (0..stats).map(|i| json!({"id": i})).collect(),
            last_updated: Utc::now(),
            error: None,
        }
    }

    fn odds(spreads: usize) -> OddsSnapshot {
        OddsSnapshot {
            spreads: (0..spreads).map(|i| json!({"id": i})).collect(),
            totals: Vec::new(),
            moneylines: Vec::new(),
            last_updated: Utc::now(),
            error: None,
        }
    }

    #[tokio::test]
    async fn success_passes_model_text_through_with_scored_confidence() {
        let client = FixedClient(Ok("Bet responsibly.".to_string()));
        let league = league(2, 1);
        let odds = odds(1);
        let request = AnalysisRequest {
            user_message: "who wins tonight?",
            league: &league,
            odds: &odds,
            context: None,
        };

        let analysis = analyze(&client, &request).await;
        assert_eq!(analysis.response, "Bet responsibly.");
        assert!((analysis.confidence_score - 1.0).abs() < 1e-9);
        assert_eq!(analysis.data_sources.games_available, 2);
        assert_eq!(analysis.data_sources.odds_available, 1);
        assert_eq!(analysis.data_sources.stats_available, 1);
        assert!(analysis.error.is_none());
    }

    #[tokio::test]
    async fn failure_yields_canned_response_and_fixed_confidence() {
        let client = FixedClient(Err("quota exceeded".to_string()));
        let league = league(0, 0);
        let odds = odds(0);
        let request = AnalysisRequest {
            user_message: "parlay advice please",
            league: &league,
            odds: &odds,
            context: None,
        };

        let analysis = analyze(&client, &request).await;
        assert_eq!(analysis.response, fallback_response("parlay advice please"));
        assert!(analysis.response.contains("parlay advice please"));
        assert_eq!(analysis.confidence_score, FAILURE_CONFIDENCE);
        assert!(analysis.error.as_deref().unwrap().contains("quota exceeded"));
    }
}
