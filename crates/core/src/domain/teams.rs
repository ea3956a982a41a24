use serde::Serialize;
use std::collections::BTreeMap;

/// Process-wide read-only team metadata; never mutated after initialization.
#[derive(Debug, Clone, Copy)]
pub struct TeamMeta {
    pub code: &'static str,
    pub name: &'static str,
    pub conference: &'static str,
    pub division: &'static str,
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
}

pub const NBA_TEAMS: &[TeamMeta] = &[
    TeamMeta { code: "ATL", name: "Atlanta Hawks", conference: "East", division: "Southeast", primary_color: "#E03A3E", secondary_color: "#C1D32F" },
    TeamMeta { code: "BOS", name: "Boston Celtics", conference: "East", division: "Atlantic", primary_color: "#007A33", secondary_color: "#BA9653" },
    TeamMeta { code: "BKN", name: "Brooklyn Nets", conference: "East", division: "Atlantic", primary_color: "#000000", secondary_color: "#FFFFFF" },
    TeamMeta { code: "CHA", name: "Charlotte Hornets", conference: "East", division: "Southeast", primary_color: "#1D1160", secondary_color: "#00F5FF" },
    TeamMeta { code: "CHI", name: "Chicago Bulls", conference: "East", division: "Central", primary_color: "#CE1141", secondary_color: "#000000" },
    TeamMeta { code: "CLE", name: "Cleveland Cavaliers", conference: "East", division: "Central", primary_color: "#860038", secondary_color: "#FDBB30" },
    TeamMeta { code: "DAL", name: "Dallas Mavericks", conference: "West", division: "Southwest", primary_color: "#00538C", secondary_color: "#002B5E" },
    TeamMeta { code: "DEN", name: "Denver Nuggets", conference: "West", division: "Northwest", primary_color: "#0E2240", secondary_color: "#FEC524" },
    TeamMeta { code: "DET", name: "Detroit Pistons", conference: "East", division: "Central", primary_color: "#C8102E", secondary_color: "#1D42BA" },
    TeamMeta { code: "GSW", name: "Golden State Warriors", conference: "West", division: "Pacific", primary_color: "#1D428A", secondary_color: "#FFC72C" },
    TeamMeta { code: "HOU", name: "Houston Rockets", conference: "West", division: "Southwest", primary_color: "#CE1141", secondary_color: "#000000" },
    TeamMeta { code: "IND", name: "Indiana Pacers", conference: "East", division: "Central", primary_color: "#002D62", secondary_color: "#FDBB30" },
    TeamMeta { code: "LAC", name: "LA Clippers", conference: "West", division: "Pacific", primary_color: "#1D428A", secondary_color: "#C8102E" },
    TeamMeta { code: "LAL", name: "Los Angeles Lakers", conference: "West", division: "Pacific", primary_color: "#552583", secondary_color: "#FDB927" },
    TeamMeta { code: "MEM", name: "Memphis Grizzlies", conference: "West", division: "Southwest", primary_color: "#5D76A9", secondary_color: "#12173F" },
    TeamMeta { code: "MIA", name: "Miami Heat", conference: "East", division: "Southeast", primary_color: "#98002E", secondary_color: "#F9A01B" },
    TeamMeta { code: "MIL", name: "Milwaukee Bucks", conference: "East", division: "Central", primary_color: "#00471B", secondary_color: "#EEE1C6" },
    TeamMeta { code: "MIN", name: "Minnesota Timberwolves", conference: "West", division: "Northwest", primary_color: "#0C2340", secondary_color: "#236192" },
    TeamMeta { code: "NOP", name: "New Orleans Pelicans", conference: "West", division: "Southwest", primary_color: "#0C2340", secondary_color: "#C8102E" },
    TeamMeta { code: "NYK", name: "New York Knicks", conference: "East", division: "Atlantic", primary_color: "#006BB6", secondary_color: "#F58426" },
    TeamMeta { code: "OKC", name: "Oklahoma City Thunder", conference: "West", division: "Northwest", primary_color: "#007AC1", secondary_color: "#EF3B24" },
    TeamMeta { code: "ORL", name: "Orlando Magic", conference: "East", division: "Southeast", primary_color: "#0077C0", secondary_color: "#C4CED4" },
    TeamMeta { code: "PHI", name: "Philadelphia 76ers", conference: "East", division: "Atlantic", primary_color: "#006BB6", secondary_color: "#ED174C" },
    TeamMeta { code: "PHX", name: "Phoenix Suns", conference: "West", division: "Pacific", primary_color: "#1D1160", secondary_color: "#E56020" },
    TeamMeta { code: "POR", name: "Portland Trail Blazers", conference: "West", division: "Northwest", primary_color: "#E03A3E", secondary_color: "#000000" },
    TeamMeta { code: "SAC", name: "Sacramento Kings", conference: "West", division: "Pacific", primary_color: "#5A2D81", secondary_color: "#63727A" },
    TeamMeta { code: "SAS", name: "San Antonio Spurs", conference: "West", division: "Southwest", primary_color: "#C4CED4", secondary_color: "#000000" },
    TeamMeta { code: "TOR", name: "Toronto Raptors", conference: "East", division: "Atlantic", primary_color: "#CE1141", secondary_color: "#000000" },
    TeamMeta { code: "UTA", name: "Utah Jazz", conference: "West", division: "Northwest", primary_color: "#002B5C", secondary_color: "#00471B" },
    TeamMeta { code: "WAS", name: "Washington Wizards", conference: "East", division: "Southeast", primary_color: "#002B5C", secondary_color: "#E31837" },
];

pub fn find_team(code: &str) -> Option<&'static TeamMeta> {
    let code = code.trim();
    NBA_TEAMS.iter().find(|team| team.code.eq_ignore_ascii_case(code))
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamEntry {
    pub name: &'static str,
    pub colors: TeamColors,
    pub conference: &'static str,
    pub division: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamColors {
    pub primary: &'static str,
    pub secondary: &'static str,
}

/// Serializable code -> metadata mapping for the teams endpoint.
pub fn team_table() -> BTreeMap<&'static str, TeamEntry> {
    NBA_TEAMS
        .iter()
        .map(|team| {
            (
                team.code,
                TeamEntry {
                    name: team.name,
                    colors: TeamColors {
                        primary: team.primary_color,
                        secondary: team.secondary_color,
                    },
                    conference: team.conference,
                    division: team.division,
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_team("lal").map(|t| t.name), Some("Los Angeles Lakers"));
        assert_eq!(find_team(" GSW ").map(|t| t.name), Some("Golden State Warriors"));
        assert!(find_team("XYZ").is_none());
    }

    #[test]
    fn table_covers_all_thirty_teams() {
        let table = team_table();
        assert_eq!(table.len(), 30);
        assert_eq!(table["BOS"].conference, "East");
        assert_eq!(table["BOS"].colors.primary, "#007A33");
    }
}
