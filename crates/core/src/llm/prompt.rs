use crate::ingest::types::{LeagueSnapshot, OddsSnapshot};
use crate::llm::AnalysisRequest;
use serde_json::Value;

const GAMES_IN_PROMPT: usize = 3;
const SPREADS_IN_PROMPT: usize = 2;

/// Confidence derived from which data sources came back non-empty. Base 0.5,
/// terms are non-negative, so only the upper bound needs clamping.
pub fn confidence_score(league: &LeagueSnapshot, odds: &OddsSnapshot) -> f64 {
    let mut score: f64 = 0.5;
    if !league.games.is_empty() {
        score += 0.2;
    }
    if !odds.spreads.is_empty() {
        score += 0.2;
    }
    if !league.player_stats.is_empty() {
        score += 0.1;
    }
    score.min(1.0)
}

/// One prompt string: persona, data-availability counts, slices of the live
/// data, user context, the literal question, and the output contract.
pub fn build_prompt(request: &AnalysisRequest<'_>) -> String {
    let league = request.league;
    let odds = request.odds;

    let games_block = serialize_slice(&league.games, GAMES_IN_PROMPT, "No games today");
    let spreads_block = serialize_slice(&odds.spreads, SPREADS_IN_PROMPT, "No spreads available");

    let previous_messages = request
        .context
        .and_then(|c| c.get("previous_messages"))
        .map(Value::to_string)
        .unwrap_or_else(|| "None".to_string());
    let favorite_team = request
        .context
        .and_then(|c| c.get("favorite_team"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| "None specified".to_string());

    [
        "You are an elite NBA betting analyst with 15+ years of experience. You have access to real-time data and advanced analytics.".to_string(),
        String::new(),
        "CURRENT NBA DATA:".to_string(),
        format!("- Games Today: {} games scheduled", league.games.len()),
        format!("- Available Spreads: {} games", odds.spreads.len()),
        format!("- Available Totals: {} games", odds.totals.len()),
        format!("- Player Stats Available: {} players tracked", league.player_stats.len()),
        format!("- Data Last Updated: {}", league.last_updated.to_rfc3339()),
        String::new(),
        "DETAILED GAME INFORMATION:".to_string(),
        games_block,
        String::new(),
        "BETTING ODDS SUMMARY:".to_string(),
        spreads_block,
        String::new(),
        "USER CONTEXT:".to_string(),
        format!("- Previous conversation: {previous_messages}"),
        format!("- User preferences: {favorite_team}"),
        String::new(),
        format!("USER QUESTION: \"{}\"", request.user_message),
        String::new(),
        "ANALYSIS REQUIREMENTS:".to_string(),
        "1. Provide data-driven insights based on the actual NBA data above".to_string(),
        "2. Include specific betting recommendations with confidence levels".to_string(),
        "3. Mention key factors like injuries, rest days, historical matchups".to_string(),
        "4. Provide risk assessment for different bet types".to_string(),
        "5. Include specific numbers and statistics when available".to_string(),
        "6. Be conversational but authoritative".to_string(),
        "7. If no live data, focus on general strategy and team analysis".to_string(),
        String::new(),
        "RESPONSE FORMAT:".to_string(),
        "- Start with a direct answer to their question".to_string(),
        "- Include 2-3 specific betting insights".to_string(),
        "- End with actionable advice".to_string(),
        "- Keep under 400 words but make every word valuable".to_string(),
        String::new(),
        "Remember: You're not just giving opinions, you're providing professional betting analysis.".to_string(),
    ]
    .join("\n")
}

fn serialize_slice(items: &[Value], limit: usize, empty_text: &str) -> String {
    if items.is_empty() {
        return empty_text.to_string();
    }
    let slice = &items[..items.len().min(limit)];
    serde_json::to_string_pretty(slice).unwrap_or_else(|_| empty_text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn league(games: usize, stats: usize) -> LeagueSnapshot {
        LeagueSnapshot {
            games: (0..games).map(|i| json!({"id": i})).collect(),
            teams: Vec::new(),
            player_stats: (0..stats).map(|i| json!({"id": i})).collect(),
            last_updated: Utc::now(),
            error: None,
        }
    }

    fn odds(spreads: usize, totals: usize) -> OddsSnapshot {
        OddsSnapshot {
            spreads: (0..spreads).map(|i| json!({"spread": i})).collect(),
            totals: (0..totals).map(|i| json!({"total": i})).collect(),
            moneylines: Vec::new(),
            last_updated: Utc::now(),
            error: None,
        }
    }

    #[test]
    fn confidence_spans_half_to_one() {
        assert_eq!(confidence_score(&league(0, 0), &odds(0, 0)), 0.5);
        assert!((confidence_score(&league(1, 0), &odds(0, 0)) - 0.7).abs() < 1e-9);
        assert!((confidence_score(&league(1, 1), &odds(1, 0)) - 1.0).abs() < 1e-9);

        for (g, s, p) in [(0, 0, 0), (1, 0, 0), (0, 1, 0), (1, 1, 1)] {
            let score = confidence_score(&league(g, p), &odds(s, 0));
            assert!((0.5..=1.0).contains(&score));
        }
    }

    #[test]
    fn prompt_embeds_counts_and_question() {
        let league = league(4, 2);
        let odds = odds(3, 1);
        let request = AnalysisRequest {
            user_message: "Should I take the under?",
            league: &league,
            odds: &odds,
            context: None,
        };

        let prompt = build_prompt(&request);
        assert!(prompt.contains("- Games Today: 4 games scheduled"));
        assert!(prompt.contains("- Available Spreads: 3 games"));
        assert!(prompt.contains("- Available Totals: 1 games"));
        assert!(prompt.contains("- Player Stats Available: 2 players tracked"));
        assert!(prompt.contains("USER QUESTION: \"Should I take the under?\""));
    }

    #[test]
    fn absent_context_renders_explicit_placeholders() {
        let league = league(0, 0);
        let odds = odds(0, 0);
        let request = AnalysisRequest {
            user_message: "hi",
            league: &league,
            odds: &odds,
            context: None,
        };

        let prompt = build_prompt(&request);
        assert!(prompt.contains("- Previous conversation: None"));
        assert!(prompt.contains("- User preferences: None specified"));
        assert!(prompt.contains("No games today"));
        assert!(prompt.contains("No spreads available"));
    }

    #[test]
    fn context_fields_are_rendered_when_present() {
        let league = league(0, 0);
        let odds = odds(0, 0);
        let context = json!({
            "previous_messages": ["who covers tonight?"],
            "favorite_team": "LAL",
        });
        let request = AnalysisRequest {
            user_message: "hi",
            league: &league,
            odds: &odds,
            context: Some(&context),
        };

        let prompt = build_prompt(&request);
        assert!(prompt.contains("who covers tonight?"));
        assert!(prompt.contains("- User preferences: LAL"));
    }

    #[test]
    fn prompt_slices_games_and_spreads() {
        let league = league(5, 0);
        let odds = odds(4, 0);
        let request = AnalysisRequest {
            user_message: "hi",
            league: &league,
            odds: &odds,
            context: None,
        };

        let prompt = build_prompt(&request);
        // First three games serialized, fourth left out.
        assert!(prompt.contains("\"id\": 2"));
        assert!(!prompt.contains("\"id\": 3"));
        // First two spreads serialized, third left out.
        assert!(prompt.contains("\"spread\": 1"));
        assert!(!prompt.contains("\"spread\": 2"));
    }
}
