use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use courtside_core::domain::analysis::{self, TeamAnalysis};
use courtside_core::domain::recommendation::{self, Recommendation};
use courtside_core::domain::teams;
use courtside_core::ingest::oddsapi::OddsClient;
use courtside_core::ingest::sportsdata::SportsDataClient;
use courtside_core::ingest::types::{LeagueSnapshot, OddsSnapshot};
use courtside_core::llm::gemini::GeminiClient;
use courtside_core::llm::{self, AnalysisRequest, LlmClient};

const RESPONSE_ITEMS_LIMIT: usize = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = courtside_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let state = AppState {
        sports: SportsDataClient::from_settings(&settings)?,
        odds: OddsClient::from_settings(&settings)?,
        llm: Arc::new(GeminiClient::from_settings(&settings)?),
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(root))
        .route("/api/teams", get(get_teams))
        .route("/api/comprehensive-data", get(get_comprehensive_data))
        .route("/api/team-analysis/:team_code", get(get_team_analysis))
        .route("/api/chat", post(chat))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    sports: SportsDataClient,
    odds: OddsClient,
    llm: Arc<dyn LlmClient>,
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Courtside NBA betting analysis API is running!",
        "features": [
            "Comprehensive NBA data integration",
            "AI analysis with Gemini",
            "Multi-source betting odds",
            "Team performance analytics",
            "Confidence scoring",
            "Rule-based recommendations",
        ],
        "status": "success",
    }))
}

async fn get_teams() -> Json<Value> {
    Json(json!({ "teams": teams::team_table() }))
}

#[derive(Debug, Serialize)]
struct ComprehensiveData {
    nba_data: LeagueSnapshot,
    odds_data: OddsSnapshot,
    summary: DataSummary,
}

#[derive(Debug, Serialize)]
struct DataSummary {
    games_today: usize,
    teams_tracked: usize,
    players_tracked: usize,
    betting_markets: usize,
    last_updated: chrono::DateTime<Utc>,
}

async fn get_comprehensive_data(
    State(state): State<AppState>,
) -> Result<Json<ComprehensiveData>, ApiError> {
    let (league, odds) = tokio::join!(state.sports.fetch_snapshot(), state.odds.fetch_odds());
    let league = league.map_err(ApiError::from)?;
    let odds = odds.map_err(ApiError::from)?;

    let summary = DataSummary {
        games_today: league.games.len(),
        teams_tracked: league.teams.len(),
        players_tracked: league.player_stats.len(),
        betting_markets: odds.spreads.len(),
        last_updated: Utc::now(),
    };

    Ok(Json(ComprehensiveData {
        nba_data: league,
        odds_data: odds,
        summary,
    }))
}

async fn get_team_analysis(
    State(state): State<AppState>,
    Path(team_code): Path<String>,
) -> Result<Json<TeamAnalysis>, ApiError> {
    let league = state.sports.fetch_snapshot().await?;
    Ok(Json(analysis::analyze_team_performance(&team_code, &league)))
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    message: String,
    user_id: String,
    #[serde(default)]
    #[allow(dead_code)]
    session_id: Option<String>,
    #[serde(default)]
    context: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
    recommendations: Vec<Recommendation>,
    games: Vec<Value>,
    odds: Vec<Value>,
    analysis: AnalysisSummary,
    confidence_score: f64,
}

#[derive(Debug, Serialize)]
struct AnalysisSummary {
    data_quality: DataQuality,
    market_overview: MarketOverview,
}

#[derive(Debug, Serialize)]
struct DataQuality {
    games_available: usize,
    odds_available: usize,
    confidence_score: f64,
}

#[derive(Debug, Serialize)]
struct MarketOverview {
    total_games: usize,
    betting_markets: usize,
    last_updated: chrono::DateTime<Utc>,
}

async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatMessage>,
) -> Result<Json<ChatResponse>, ApiError> {
    Ok(Json(process_chat(&state, body).await?))
}

/// The aggregation sequence for one user query. This is the only place a
/// failure becomes fatal to the request; everything below degrades in place.
async fn process_chat(state: &AppState, body: ChatMessage) -> anyhow::Result<ChatResponse> {
    tracing::info!(user_id = %body.user_id, "running chat aggregation");

    let league = state.sports.fetch_snapshot().await?;
    let odds = state.odds.fetch_odds().await?;

    let request = AnalysisRequest {
        user_message: &body.message,
        league: &league,
        odds: &odds,
        context: body.context.as_ref(),
    };
    let ai = llm::analyze(state.llm.as_ref(), &request).await;

    let recommendations = recommendation::build_recommendations(&body.message, &league, &odds, &ai);

    let analysis = AnalysisSummary {
        data_quality: DataQuality {
            games_available: league.games.len(),
            odds_available: odds.spreads.len(),
            confidence_score: ai.confidence_score,
        },
        market_overview: MarketOverview {
            total_games: league.games.len(),
            betting_markets: odds.spreads.len(),
            last_updated: league.last_updated,
        },
    };

    Ok(ChatResponse {
        confidence_score: ai.confidence_score,
        response: ai.response,
        recommendations,
        games: league.games.into_iter().take(RESPONSE_ITEMS_LIMIT).collect(),
        odds: odds.spreads.into_iter().take(RESPONSE_ITEMS_LIMIT).collect(),
        analysis,
    })
}

/// 500 boundary: captures to sentry and embeds the underlying message in the
/// response detail.
struct ApiError(anyhow::Error);

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        sentry_anyhow::capture_anyhow(&self.0);
        tracing::error!(error = %self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": format!("Error processing request: {:#}", self.0) })),
        )
            .into_response()
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &courtside_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
