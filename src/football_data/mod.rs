pub mod client;
pub mod competitions;
pub mod models;
pub mod provider;

#[cfg(test)]
pub mod testing;

pub use client::FootballDataClient;
pub use competitions::{Competition, LeagueData, LeagueDataKind};
pub use provider::FootballApi;

use tracing::warn;

/// Best-effort league fetch: any upstream failure is logged and collapsed to
/// an empty list, so a missing table never blocks the rest of the page.
pub async fn fetch_league_or_empty(
    api: &dyn FootballApi,
    competition: &Competition,
    kind: LeagueDataKind,
) -> LeagueData {
    match api.fetch_league(competition, kind).await {
        Ok(data) => data,
        Err(e) => {
            warn!(
                "{} {} unavailable from {}: {}",
                competition.name,
                kind,
                api.name(),
                e
            );
            LeagueData::empty(kind)
        }
    }
}
