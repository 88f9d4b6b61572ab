use async_trait::async_trait;
use chrono::NaiveDate;

use super::competitions::{Competition, LeagueData, LeagueDataKind};
use super::models::ApiMatch;
use crate::error::UpstreamError;

/// Source of match, standings and scorer data.
#[async_trait]
pub trait FootballApi: Send + Sync {
    /// All matches kicking off between `date_from` and `date_to` (inclusive).
    async fn fetch_matches(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<ApiMatch>, UpstreamError>;

    /// Standings or scorers for one competition.
    async fn fetch_league(
        &self,
        competition: &Competition,
        kind: LeagueDataKind,
    ) -> Result<LeagueData, UpstreamError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
