use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::football_data::models::{ScorerRow, StandingsRow};

/// Everything the news page shows, produced by one refresh and cached as a
/// whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Every match in the window, before the competition allow-list
    pub total_matches: usize,
    /// Premier League matches in the window
    pub pl_count: usize,
    /// `YYYY-MM-DD`
    pub date_from: String,
    pub date_to: String,
    /// e.g. "March 02"
    pub date_from_display: String,
    /// e.g. "March 05, 2024"
    pub date_to_display: String,
    /// e.g. "Tuesday, March 05, 2024 at 18:30"
    pub current_time_ist: String,
    pub leagues: Vec<LeagueGroup>,
    pub pl_standings: Vec<StandingsRow>,
    pub la_liga_standings: Vec<StandingsRow>,
    pub pl_scorers: Vec<ScorerRow>,
    pub la_liga_scorers: Vec<ScorerRow>,
}

/// Matches of one competition in one area, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueGroup {
    /// "{competition} ({area})", e.g. "La Liga (Spain)"
    pub name: String,
    pub url: String,
    pub count: usize,
    pub matches: Vec<MatchView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub home_team: String,
    pub away_team: String,
    /// Local kickoff as "dd-mm HH:MM"
    pub date_time: String,
    /// Local kickoff, used for ordering
    #[serde(rename = "datetime_obj")]
    pub kickoff: DateTime<FixedOffset>,
    pub status: MatchStatus,
    pub status_icon: String,
    /// Only set for finished matches
    pub score_home: Option<u32>,
    pub score_away: Option<u32>,
}

/// Match status, stored as the upstream string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchStatus {
    Finished,
    InPlay,
    Scheduled,
    Postponed,
    Cancelled,
    /// Any status without its own glyph ("TIMED", "PAUSED", "AWARDED", ...)
    Unknown(String),
}

impl MatchStatus {
    pub fn glyph(&self) -> &'static str {
        match self {
            MatchStatus::Finished => "✅",
            MatchStatus::InPlay => "🔴",
            MatchStatus::Scheduled => "⏰",
            MatchStatus::Postponed => "⏸️",
            MatchStatus::Cancelled => "❌",
            MatchStatus::Unknown(_) => "❓",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MatchStatus::Finished => "FINISHED",
            MatchStatus::InPlay => "IN_PLAY",
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Postponed => "POSTPONED",
            MatchStatus::Cancelled => "CANCELLED",
            MatchStatus::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for MatchStatus {
    fn from(s: &str) -> Self {
        match s {
            "FINISHED" => MatchStatus::Finished,
            "IN_PLAY" | "LIVE" => MatchStatus::InPlay,
            "SCHEDULED" => MatchStatus::Scheduled,
            "POSTPONED" => MatchStatus::Postponed,
            "CANCELLED" => MatchStatus::Cancelled,
            other => MatchStatus::Unknown(other.to_string()),
        }
    }
}

impl From<String> for MatchStatus {
    fn from(s: String) -> Self {
        MatchStatus::from(s.as_str())
    }
}

impl From<MatchStatus> for String {
    fn from(status: MatchStatus) -> Self {
        status.as_str().to_string()
    }
}
