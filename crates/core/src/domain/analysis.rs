use crate::domain::teams;
use crate::ingest::types::{game_team_abbreviations, LeagueSnapshot};
use serde::Serialize;
use serde_json::Value;

pub const RECENT_GAMES_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct TeamAnalysis {
    pub team_name: String,
    pub conference: String,
    pub division: String,
    pub recent_games: Vec<Value>,
    pub betting_trends: BettingTrends,
    pub key_factors: Vec<String>,
    pub injury_concerns: Vec<String>,
    pub betting_recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BettingTrends {
    pub ats_record: String,
    pub over_under_record: String,
    pub home_away_split: String,
}

impl Default for BettingTrends {
    fn default() -> Self {
        Self {
            ats_record: "N/A".to_string(),
            over_under_record: "N/A".to_string(),
            home_away_split: "N/A".to_string(),
        }
    }
}

/// Games involving the team, case-insensitive on either side's abbreviation,
/// truncated to the first matches in snapshot order.
pub fn filter_team_games(team_code: &str, snapshot: &LeagueSnapshot) -> Vec<Value> {
    snapshot
        .games
        .iter()
        .filter(|game| {
            let (home, away) = game_team_abbreviations(game);
            matches_code(home, team_code) || matches_code(away, team_code)
        })
        .take(RECENT_GAMES_LIMIT)
        .cloned()
        .collect()
}

fn matches_code(abbr: Option<&str>, team_code: &str) -> bool {
    abbr.is_some_and(|a| a.eq_ignore_ascii_case(team_code))
}

/// An unknown team code yields placeholder fields, never an error.
pub fn analyze_team_performance(team_code: &str, snapshot: &LeagueSnapshot) -> TeamAnalysis {
    let meta = teams::find_team(team_code);

    TeamAnalysis {
        team_name: meta.map_or("Unknown Team", |m| m.name).to_string(),
        conference: meta.map_or("Unknown", |m| m.conference).to_string(),
        division: meta.map_or("Unknown", |m| m.division).to_string(),
        recent_games: filter_team_games(team_code, snapshot),
        betting_trends: BettingTrends::default(),
        key_factors: key_factors_for(team_code)
            .iter()
            .map(|s| s.to_string())
            .collect(),
        injury_concerns: Vec::new(),
        betting_recommendation: "NEUTRAL".to_string(),
    }
}

fn key_factors_for(team_code: &str) -> &'static [&'static str] {
    match team_code.to_ascii_uppercase().as_str() {
        "LAL" => &[
            "LeBron James age and rest management",
            "Anthony Davis injury history",
            "Strong home court advantage",
            "Public betting favorite - often overvalued",
        ],
        "GSW" => &[
            "Three-point shooting variance",
            "Stephen Curry's shooting form",
            "Home court advantage at Chase Center",
            "Back-to-back game performance",
        ],
        "BOS" => &[
            "Strong defensive rating",
            "Jayson Tatum consistency",
            "Home court advantage",
            "Depth and rotation management",
        ],
        _ => &[
            "Recent form and momentum",
            "Home vs away performance",
            "Key player availability",
            "Historical matchup trends",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn game(home: &str, away: &str) -> Value {
        json!({
            "home_team": {"abbreviation": home},
            "away_team": {"abbreviation": away},
        })
    }

    fn snapshot_with_games(games: Vec<Value>) -> LeagueSnapshot {
        LeagueSnapshot {
            games,
            teams: Vec::new(),
            player_stats: Vec::new(),
            last_updated: Utc::now(),
            error: None,
        }
    }

    #[test]
    fn filters_by_either_side_case_insensitively() {
        let snapshot = snapshot_with_games(vec![
            game("LAL", "BOS"),
            game("GSW", "lal"),
            game("MIA", "NYK"),
        ]);

        let games = filter_team_games("lAl", &snapshot);
        assert_eq!(games.len(), 2);
        let games = filter_team_games("MIA", &snapshot);
        assert_eq!(games.len(), 1);
        assert!(filter_team_games("SAS", &snapshot).is_empty());
    }

    #[test]
    fn truncates_to_first_five_matches_in_snapshot_order() {
        let games = (0..8)
            .map(|i| {
                json!({
                    "home_team": {"abbreviation": "LAL"},
                    "away_team": {"abbreviation": "BOS"},
                    "seq": i,
                })
            })
            .collect();
        let snapshot = snapshot_with_games(games);

        let filtered = filter_team_games("LAL", &snapshot);
        assert_eq!(filtered.len(), RECENT_GAMES_LIMIT);
        assert_eq!(filtered[0]["seq"], 0);
        assert_eq!(filtered[4]["seq"], 4);
    }

    #[test]
    fn unknown_team_resolves_to_placeholders() {
        let snapshot = snapshot_with_games(Vec::new());
        let analysis = analyze_team_performance("XYZ", &snapshot);
        assert_eq!(analysis.team_name, "Unknown Team");
        assert_eq!(analysis.conference, "Unknown");
        assert_eq!(analysis.division, "Unknown");
        assert_eq!(analysis.betting_recommendation, "NEUTRAL");
        // Generic key factors still apply.
        assert_eq!(analysis.key_factors.len(), 4);
    }

    #[test]
    fn known_team_gets_its_specific_factors() {
        let snapshot = snapshot_with_games(vec![game("GSW", "PHX")]);
        let analysis = analyze_team_performance("gsw", &snapshot);
        assert_eq!(analysis.team_name, "Golden State Warriors");
        assert_eq!(analysis.recent_games.len(), 1);
        assert!(analysis.key_factors[0].contains("Three-point"));
        assert_eq!(analysis.betting_trends.ats_record, "N/A");
    }
}
