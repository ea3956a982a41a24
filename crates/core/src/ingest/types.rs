use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Best-effort merge of the NBA data feeds. Every collection is always
/// present; a failed source leaves its field empty rather than absent, so
/// downstream code never null-checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub games: Vec<Value>,
    pub teams: Vec<Value>,
    pub player_stats: Vec<Value>,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Best-effort merge of the betting-odds feeds. Same always-present
/// invariant as `LeagueSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsSnapshot {
    pub spreads: Vec<Value>,
    pub totals: Vec<Value>,
    pub moneylines: Vec<Value>,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Game records stay provider-shaped; the only fields this service relies on
/// are the nested home/away team abbreviations.
pub fn game_team_abbreviations(game: &Value) -> (Option<&str>, Option<&str>) {
    let abbr = |side: &str| {
        game.get(side)
            .and_then(|team| team.get("abbreviation"))
            .and_then(Value::as_str)
    };
    (abbr("home_team"), abbr("away_team"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_nested_team_abbreviations() {
        let game = json!({
            "home_team": {"abbreviation": "LAL", "full_name": "Los Angeles Lakers"},
            "away_team": {"abbreviation": "BOS", "full_name": "Boston Celtics"},
            "status": "scheduled"
        });
        assert_eq!(game_team_abbreviations(&game), (Some("LAL"), Some("BOS")));
    }

    #[test]
    fn tolerates_missing_or_oddly_shaped_teams() {
        let game = json!({"home_team": {"name": "Lakers"}, "away_team": "BOS"});
        assert_eq!(game_team_abbreviations(&game), (None, None));
        assert_eq!(game_team_abbreviations(&json!({})), (None, None));
    }
}
