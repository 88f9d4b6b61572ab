use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `GET /matches?dateFrom=..&dateTo=..`
#[derive(Debug, Clone, Deserialize)]
pub struct MatchesResponse {
    #[serde(default)]
    pub matches: Vec<ApiMatch>,
}

/// A single fixture as returned by football-data.org
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMatch {
    pub utc_date: DateTime<Utc>,
    /// "SCHEDULED" | "TIMED" | "IN_PLAY" | "PAUSED" | "FINISHED" | "POSTPONED" | ...
    pub status: String,
    pub competition: ApiCompetition,
    pub area: ApiArea,
    pub home_team: ApiTeam,
    pub away_team: ApiTeam,
    #[serde(default)]
    pub score: ApiScore,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCompetition {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiArea {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTeam {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
}

impl ApiTeam {
    /// Short name when the API has one, full name otherwise.
    pub fn display_name(&self) -> String {
        self.short_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("TBD")
            .to_string()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiScore {
    #[serde(default)]
    pub full_time: GoalPair,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct GoalPair {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

/// `GET /competitions/{code}/standings`
#[derive(Debug, Clone, Deserialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub standings: Vec<StandingsTable>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandingsTable {
    #[serde(default)]
    pub table: Vec<StandingsRow>,
}

/// `GET /competitions/{code}/scorers`
#[derive(Debug, Clone, Deserialize)]
pub struct ScorersResponse {
    #[serde(default)]
    pub scorers: Vec<ScorerRow>,
}

// ── Pass-through rows ─────────────────────────────────────────────────────────
//
// Standings and scorer rows are stored in the snapshot exactly as the API sent
// them. Fields the page does not read are kept in `extra`. Every field the page
// does read is optional, so one row with a null cell still decodes and the
// rest of its table survives.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TeamRef {
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsRow {
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub team: Option<TeamRef>,
    #[serde(default)]
    pub played_games: Option<u32>,
    #[serde(default)]
    pub won: Option<u32>,
    #[serde(default)]
    pub draw: Option<u32>,
    #[serde(default)]
    pub lost: Option<u32>,
    #[serde(default)]
    pub points: Option<i32>,
    #[serde(default)]
    pub goals_for: Option<u32>,
    #[serde(default)]
    pub goals_against: Option<u32>,
    #[serde(default)]
    pub goal_difference: Option<i32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StandingsRow {
    pub fn team_name(&self) -> &str {
        self.team.as_ref().map_or("", TeamRef::display_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerRow {
    #[serde(default)]
    pub player: Option<PlayerRef>,
    #[serde(default)]
    pub team: Option<TeamRef>,
    #[serde(default)]
    pub goals: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScorerRow {
    pub fn player_name(&self) -> &str {
        self.player
            .as_ref()
            .and_then(|p| p.name.as_deref())
            .unwrap_or("")
    }

    pub fn team_name(&self) -> &str {
        self.team.as_ref().map_or("", TeamRef::display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_decodes_football_data_shape() {
        let raw = json!({
            "id": 1,
            "utcDate": "2024-03-02T15:00:00Z",
            "status": "FINISHED",
            "competition": { "name": "Premier League", "code": "PL" },
            "area": { "name": "England" },
            "homeTeam": { "name": "Arsenal FC", "shortName": "Arsenal" },
            "awayTeam": { "name": "Chelsea FC", "shortName": null },
            "score": { "fullTime": { "home": 2, "away": 1 } }
        });
        let m: ApiMatch = serde_json::from_value(raw).unwrap();
        assert_eq!(m.competition.code.as_deref(), Some("PL"));
        assert_eq!(m.home_team.display_name(), "Arsenal");
        assert_eq!(m.away_team.display_name(), "Chelsea FC");
        assert_eq!(m.score.full_time.home, Some(2));
        assert_eq!(m.score.full_time.away, Some(1));
    }

    #[test]
    fn test_match_missing_competition_is_an_error() {
        let raw = json!({
            "utcDate": "2024-03-02T15:00:00Z",
            "status": "SCHEDULED",
            "area": { "name": "England" },
            "homeTeam": { "shortName": "Arsenal" },
            "awayTeam": { "shortName": "Chelsea" }
        });
        assert!(serde_json::from_value::<ApiMatch>(raw).is_err());
    }

    #[test]
    fn test_standings_row_keeps_unknown_fields() {
        let raw = json!({
            "position": 1,
            "team": { "id": 57, "name": "Arsenal FC", "shortName": "Arsenal", "crest": "x.png" },
            "playedGames": 10,
            "form": "W,W,D",
            "won": 7, "draw": 2, "lost": 1, "points": 23,
            "goalsFor": 20, "goalsAgainst": 8, "goalDifference": 12
        });
        let row: StandingsRow = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(row.team_name(), "Arsenal");
        assert_eq!(row.extra.get("form"), Some(&json!("W,W,D")));
        assert_eq!(
            row.team.as_ref().and_then(|t| t.extra.get("crest")),
            Some(&json!("x.png"))
        );

        let back = serde_json::to_value(&row).unwrap();
        assert_eq!(back["playedGames"], json!(10));
        assert_eq!(back["form"], json!("W,W,D"));
        assert_eq!(back["team"]["id"], json!(57));
    }

    #[test]
    fn test_scorer_row_decodes() {
        let raw = json!({
            "player": { "id": 1, "name": "Erling Haaland" },
            "team": { "shortName": "Man City" },
            "playedMatches": 9,
            "goals": 11,
            "assists": null
        });
        let row: ScorerRow = serde_json::from_value(raw).unwrap();
        assert_eq!(row.player_name(), "Erling Haaland");
        assert_eq!(row.team_name(), "Man City");
        assert_eq!(row.goals, Some(11));
    }

    #[test]
    fn test_null_cells_stay_in_their_row() {
        let raw = json!({ "standings": [{ "table": [
            { "position": 1, "team": { "shortName": "Arsenal" }, "points": 30, "goalDifference": 20 },
            { "position": 2, "team": null, "points": null, "goalDifference": null, "won": null }
        ]}]});
        let resp: StandingsResponse = serde_json::from_value(raw).unwrap();
        let table = &resp.standings[0].table;
        assert_eq!(table.len(), 2);
        assert_eq!(table[1].position, Some(2));
        assert_eq!(table[1].points, None);
        assert_eq!(table[1].team_name(), "");

        let raw = json!({ "scorers": [
            { "player": { "name": "Erling Haaland" }, "team": { "shortName": "Man City" }, "goals": 11 },
            { "player": { "name": null }, "team": null, "goals": null }
        ]});
        let resp: ScorersResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(resp.scorers.len(), 2);
        assert_eq!(resp.scorers[1].player_name(), "");
        assert_eq!(resp.scorers[1].goals, None);
    }
}
