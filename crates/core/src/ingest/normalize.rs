use crate::ingest::gateway::ProviderResponse;
use crate::ingest::types::{LeagueSnapshot, OddsSnapshot};
use chrono::Utc;
use serde_json::Value;

/// Expected order: games feed, team list, player stats.
pub fn normalize_league(responses: &[ProviderResponse]) -> LeagueSnapshot {
    LeagueSnapshot {
        games: extract_list(responses.first(), "games"),
        teams: extract_list(responses.get(1), "teams"),
        player_stats: extract_list(responses.get(2), "players"),
        last_updated: Utc::now(),
        error: error_if_all_failed(responses),
    }
}

/// Expected order: main odds markets, totals. The main payload carries both
/// spreads and moneylines.
pub fn normalize_odds(responses: &[ProviderResponse]) -> OddsSnapshot {
    let spreads = extract_list(responses.first(), "data");
    OddsSnapshot {
        moneylines: spreads.clone(),
        spreads,
        totals: extract_list(responses.get(1), "data"),
        last_updated: Utc::now(),
        error: error_if_all_failed(responses),
    }
}

fn extract_list(response: Option<&ProviderResponse>, key: &str) -> Vec<Value> {
    response
        .and_then(ProviderResponse::payload)
        .and_then(|body| body.get(key))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// A degraded snapshot is still a valid snapshot; the error string is
/// informational and only set when no source produced a payload.
fn error_if_all_failed(responses: &[ProviderResponse]) -> Option<String> {
    if responses.is_empty() || responses.iter().any(|r| r.payload().is_some()) {
        return None;
    }
    responses
        .iter()
        .find_map(ProviderResponse::unavailable_reason)
        .map(str::to_string)
}
