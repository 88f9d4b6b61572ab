use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::models::{ScorerRow, StandingsRow};

/// A competition with per-league standings and scorers endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Competition {
    /// football-data.org competition code, used in endpoint paths
    pub code: &'static str,
    pub name: &'static str,
}

pub const PREMIER_LEAGUE: Competition = Competition { code: "PL", name: "Premier League" };
pub const LA_LIGA: Competition = Competition { code: "PD", name: "La Liga" };
pub const BUNDESLIGA: Competition = Competition { code: "BL1", name: "Bundesliga" };
pub const SERIE_A: Competition = Competition { code: "SA", name: "Serie A" };
pub const LIGUE_1: Competition = Competition { code: "FL1", name: "Ligue 1" };

/// Every competition whose league data can be fetched.
pub static COMPETITIONS: [Competition; 5] = [PREMIER_LEAGUE, LA_LIGA, BUNDESLIGA, SERIE_A, LIGUE_1];

impl Competition {
    /// Case-insensitive lookup by competition code.
    pub fn by_code(code: &str) -> Option<&'static Competition> {
        COMPETITIONS.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn endpoint_path(&self, kind: LeagueDataKind) -> String {
        format!("competitions/{}/{}", self.code, kind)
    }
}

/// Which per-league list to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeagueDataKind {
    Standings,
    Scorers,
}

impl LeagueDataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeagueDataKind::Standings => "standings",
            LeagueDataKind::Scorers => "scorers",
        }
    }
}

impl fmt::Display for LeagueDataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeagueDataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standings" => Ok(LeagueDataKind::Standings),
            "scorers" => Ok(LeagueDataKind::Scorers),
            other => Err(format!("unknown league data kind: {}", other)),
        }
    }
}

/// Result of one per-league fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LeagueData {
    /// First table of the competition standings
    Standings(Vec<StandingsRow>),
    Scorers(Vec<ScorerRow>),
}

impl LeagueData {
    pub fn empty(kind: LeagueDataKind) -> Self {
        match kind {
            LeagueDataKind::Standings => LeagueData::Standings(Vec::new()),
            LeagueDataKind::Scorers => LeagueData::Scorers(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LeagueData::Standings(rows) => rows.len(),
            LeagueData::Scorers(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_standings(self) -> Vec<StandingsRow> {
        match self {
            LeagueData::Standings(rows) => rows,
            LeagueData::Scorers(_) => Vec::new(),
        }
    }

    pub fn into_scorers(self) -> Vec<ScorerRow> {
        match self {
            LeagueData::Scorers(rows) => rows,
            LeagueData::Standings(_) => Vec::new(),
        }
    }
}
