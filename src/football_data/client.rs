use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::competitions::{Competition, LeagueData, LeagueDataKind};
use super::models::{ApiMatch, MatchesResponse, ScorersResponse, StandingsResponse};
use super::provider::FootballApi;
use crate::error::UpstreamError;

/// Client for the football-data.org v4 REST API.
///
/// Every call sleeps for a fixed delay first, which keeps a refresh under the
/// free tier's request-rate cap without any shared limiter state.
#[derive(Clone)]
pub struct FootballDataClient {
    http: Client,
    /// Base URL for overriding in tests
    base_url: String,
    api_token: String,
    /// Sleep before each standings / scorers call
    league_delay: Duration,
    /// Sleep before the match-window call
    matches_delay: Duration,
}

impl FootballDataClient {
    pub fn new(
        base_url: &str,
        api_token: &str,
        league_delay: Duration,
        matches_delay: Duration,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(FootballDataClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
            league_delay,
            matches_delay,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<T, UpstreamError> {
        let endpoint = format!("{}/{}", self.base_url, path);
        debug!("GET {} {:?}", endpoint, query);

        let resp = self
            .http
            .get(&endpoint)
            .query(query)
            .header("X-Auth-Token", &self.api_token)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(UpstreamError::Status { endpoint, status });
        }

        resp.json::<T>()
            .await
            .map_err(|source| UpstreamError::Decode { endpoint, source })
    }
}

#[async_trait]
impl FootballApi for FootballDataClient {
    fn name(&self) -> &str {
        "football-data.org"
    }

    async fn fetch_matches(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> std::result::Result<Vec<ApiMatch>, UpstreamError> {
        tokio::time::sleep(self.matches_delay).await;

        let query = [
            ("dateFrom", date_from.format("%Y-%m-%d").to_string()),
            ("dateTo", date_to.format("%Y-%m-%d").to_string()),
        ];
        let resp: MatchesResponse = self.get_json("matches", &query).await?;
        debug!(
            "Fetched {} matches between {} and {}",
            resp.matches.len(),
            date_from,
            date_to
        );
        Ok(resp.matches)
    }

    async fn fetch_league(
        &self,
        competition: &Competition,
        kind: LeagueDataKind,
    ) -> std::result::Result<LeagueData, UpstreamError> {
        tokio::time::sleep(self.league_delay).await;

        let path = competition.endpoint_path(kind);
        let data = match kind {
            LeagueDataKind::Standings => {
                let resp: StandingsResponse = self.get_json(&path, &[]).await?;
                let table = resp
                    .standings
                    .into_iter()
                    .next()
                    .map(|s| s.table)
                    .unwrap_or_default();
                LeagueData::Standings(table)
            }
            LeagueDataKind::Scorers => {
                let resp: ScorersResponse = self.get_json(&path, &[]).await?;
                LeagueData::Scorers(resp.scorers)
            }
        };
        debug!("Fetched {} {} rows for {}", data.len(), kind, competition.name);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::football_data::competitions::{LA_LIGA, PREMIER_LEAGUE, SERIE_A};
    use crate::football_data::fetch_league_or_empty;
    use crate::football_data::testing::FakeUpstream;
    use serde_json::json;
    use std::time::Instant;

    fn client_with_delays(base_url: &str, league: Duration, matches: Duration) -> FootballDataClient {
        FootballDataClient::new(base_url, "secret-token", league, matches, Duration::from_secs(5))
            .unwrap()
    }

    fn client(base_url: &str) -> FootballDataClient {
        FootballDataClient::new(
            base_url,
            "secret-token",
            Duration::ZERO,
            Duration::ZERO,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_matches_sends_window_and_token() {
        let upstream = FakeUpstream::start().await;
        upstream.respond(
            "/matches",
            200,
            json!({ "matches": [{
                "utcDate": "2024-03-02T15:00:00Z",
                "status": "SCHEDULED",
                "competition": { "name": "Premier League", "code": "PL" },
                "area": { "name": "England" },
                "homeTeam": { "shortName": "Arsenal" },
                "awayTeam": { "shortName": "Chelsea" }
            }]}),
        );

        let from = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let matches = client(&upstream.base_url()).fetch_matches(from, to).await.unwrap();
        assert_eq!(matches.len(), 1);

        let requests = upstream.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/matches");
        assert_eq!(
            requests[0].query.as_deref(),
            Some("dateFrom=2024-02-28&dateTo=2024-03-02")
        );
        assert_eq!(requests[0].token.as_deref(), Some("secret-token"));
    }

    #[tokio::test]
    async fn test_fetch_matches_server_error() {
        let upstream = FakeUpstream::start().await;
        upstream.respond("/matches", 500, json!({ "message": "boom" }));

        let day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let err = client(&upstream.base_url())
            .fetch_matches(day, day)
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Status { status, .. } if status == StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_fetch_matches_malformed_body() {
        let upstream = FakeUpstream::start().await;
        upstream.respond("/matches", 200, json!({ "matches": [{ "status": "FINISHED" }] }));

        let day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let err = client(&upstream.base_url())
            .fetch_matches(day, day)
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_fetch_standings_takes_first_table() {
        let upstream = FakeUpstream::start().await;
        upstream.respond(
            "/competitions/PL/standings",
            200,
            json!({ "standings": [
                { "type": "TOTAL", "table": [
                    { "position": 1, "team": { "shortName": "Arsenal" }, "points": 30 },
                    { "position": 2, "team": { "shortName": "Liverpool" }, "points": 28 }
                ]},
                { "type": "HOME", "table": [
                    { "position": 1, "team": { "shortName": "Chelsea" }, "points": 15 }
                ]}
            ]}),
        );

        let data = client(&upstream.base_url())
            .fetch_league(&PREMIER_LEAGUE, LeagueDataKind::Standings)
            .await
            .unwrap();
        let rows = data.into_standings();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].team_name(), "Arsenal");
        assert_eq!(rows[1].points, Some(28));
    }

    #[tokio::test]
    async fn test_fetch_standings_without_tables_is_empty() {
        let upstream = FakeUpstream::start().await;
        upstream.respond("/competitions/PD/standings", 200, json!({ "standings": [] }));

        let data = client(&upstream.base_url())
            .fetch_league(&LA_LIGA, LeagueDataKind::Standings)
            .await
            .unwrap();
        assert_eq!(data, LeagueData::Standings(vec![]));
    }

    #[tokio::test]
    async fn test_fetch_scorers() {
        let upstream = FakeUpstream::start().await;
        upstream.respond(
            "/competitions/SA/scorers",
            200,
            json!({ "scorers": [
                { "player": { "name": "Lautaro Martínez" }, "team": { "shortName": "Inter" }, "goals": 12 }
            ]}),
        );

        let data = client(&upstream.base_url())
            .fetch_league(&SERIE_A, LeagueDataKind::Scorers)
            .await
            .unwrap();
        let rows = data.into_scorers();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].player_name(), "Lautaro Martínez");
        assert_eq!(rows[0].goals, Some(12));
    }

    #[tokio::test]
    async fn test_fetch_league_not_found() {
        let upstream = FakeUpstream::start().await;

        let err = client(&upstream.base_url())
            .fetch_league(&PREMIER_LEAGUE, LeagueDataKind::Scorers)
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Status { status, .. } if status == StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr))
            .fetch_league(&PREMIER_LEAGUE, LeagueDataKind::Standings)
            .await
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_null_cell_keeps_whole_table() {
        let upstream = FakeUpstream::start().await;
        upstream.respond(
            "/competitions/PL/standings",
            200,
            json!({ "standings": [{ "table": [
                { "position": 1, "team": { "shortName": "Arsenal" }, "points": 30, "goalDifference": 18 },
                { "position": 2, "team": { "shortName": "Liverpool" }, "points": 28, "goalDifference": null }
            ]}]}),
        );
        upstream.respond(
            "/competitions/PL/scorers",
            200,
            json!({ "scorers": [
                { "player": { "name": "Erling Haaland" }, "team": { "shortName": "Man City" }, "goals": 14 },
                { "player": { "name": null }, "team": { "shortName": "Arsenal" }, "goals": 9 }
            ]}),
        );
        let api = client(&upstream.base_url());

        let rows = fetch_league_or_empty(&api, &PREMIER_LEAGUE, LeagueDataKind::Standings)
            .await
            .into_standings();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].goal_difference, None);
        assert_eq!(rows[1].team_name(), "Liverpool");

        let rows = fetch_league_or_empty(&api, &PREMIER_LEAGUE, LeagueDataKind::Scorers)
            .await
            .into_scorers();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].goals, Some(9));
    }

    #[tokio::test]
    async fn test_league_call_waits_for_delay() {
        let upstream = FakeUpstream::start().await;
        upstream.respond("/competitions/PD/scorers", 200, json!({ "scorers": [] }));
        let delay = Duration::from_millis(200);
        let api = client_with_delays(&upstream.base_url(), delay, Duration::ZERO);

        let started = Instant::now();
        api.fetch_league(&LA_LIGA, LeagueDataKind::Scorers).await.unwrap();

        let requests = upstream.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].received_at.duration_since(started) >= delay);
    }

    #[tokio::test]
    async fn test_matches_call_waits_for_its_own_delay() {
        let upstream = FakeUpstream::start().await;
        upstream.respond("/matches", 200, json!({ "matches": [] }));
        let delay = Duration::from_millis(300);
        let api = client_with_delays(&upstream.base_url(), Duration::ZERO, delay);

        let day = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let started = Instant::now();
        api.fetch_matches(day, day).await.unwrap();

        let requests = upstream.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].received_at.duration_since(started) >= delay);
    }
}
