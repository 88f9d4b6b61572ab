//! Cache-or-refresh pipeline behind the news page.
//!
//! A request either reuses a fresh cached snapshot or runs a full refresh:
//! match window → Premier League / La Liga tables and scorers → grouping →
//! cache write. Upstream calls are made one after another, each behind the
//! client's fixed delay.

pub mod grouping;
pub mod window;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::{CacheSnapshot, CacheStore};
use crate::config::FailurePolicy;
use crate::error::UpstreamError;
use crate::football_data::competitions::{LA_LIGA, PREMIER_LEAGUE};
use crate::football_data::models::ApiMatch;
use crate::football_data::{
    fetch_league_or_empty, Competition, FootballApi, LeagueData, LeagueDataKind,
};
use grouping::group_matches;
use window::DateWindow;

pub struct MatchAggregator {
    api: Arc<dyn FootballApi>,
    cache: CacheStore,
    lookback_days: u32,
    failure_policy: FailurePolicy,
    /// Serialises refreshes so concurrent cache misses hit the API once
    refresh_lock: Mutex<()>,
    /// On-demand league data, held for the cache TTL. The lock is held across
    /// the upstream call so concurrent requests share one fetch.
    league_cache: Mutex<HashMap<(&'static str, LeagueDataKind), (Instant, LeagueData)>>,
}

struct Refreshed {
    snapshot: CacheSnapshot,
    /// The match window failed and was replaced by an empty list
    matches_missing: bool,
}

/// Standings and scorers carried by the snapshot.
#[derive(Debug)]
struct LeagueTables {
    pl_standings: LeagueData,
    la_liga_standings: LeagueData,
    pl_scorers: LeagueData,
    la_liga_scorers: LeagueData,
}

impl MatchAggregator {
    pub fn new(
        api: Arc<dyn FootballApi>,
        cache: CacheStore,
        lookback_days: u32,
        failure_policy: FailurePolicy,
    ) -> Self {
        MatchAggregator {
            api,
            cache,
            lookback_days,
            failure_policy,
            refresh_lock: Mutex::new(()),
            league_cache: Mutex::new(HashMap::new()),
        }
    }

    /// The current snapshot: the cached one while fresh, otherwise a new one
    /// fetched from the API and written back to the cache.
    ///
    /// A failed refresh returns the error and leaves the cache file untouched.
    pub async fn get_football_data(&self) -> Result<CacheSnapshot> {
        debug!("Checking cache validity");
        if let Some(snapshot) = self.cached().await {
            info!("Using cached data");
            return Ok(snapshot);
        }

        let _guard = self.refresh_lock.lock().await;
        // Another request may have refreshed while we waited
        if let Some(snapshot) = self.cached().await {
            info!("Using data refreshed by a concurrent request");
            return Ok(snapshot);
        }

        info!("Cache miss - fetching fresh data from {}", self.api.name());
        let refreshed = self.build_snapshot(Utc::now()).await?;
        if refreshed.matches_missing {
            warn!("Serving snapshot without matches; not caching it");
        } else {
            self.cache.save(&refreshed.snapshot).await;
        }
        Ok(refreshed.snapshot)
    }

    /// Build a new snapshot for the window ending at `now`. Does not touch
    /// the cache.
    async fn build_snapshot(&self, now: DateTime<Utc>) -> Result<Refreshed> {
        let window = DateWindow::ending_at(now, self.lookback_days);
        let (matches, matches_missing) = match self.fetch_matches(&window).await? {
            Some(matches) => (matches, false),
            None => (Vec::new(), true),
        };

        let tables = LeagueTables {
            pl_standings: self.league(&PREMIER_LEAGUE, LeagueDataKind::Standings).await?,
            la_liga_standings: self.league(&LA_LIGA, LeagueDataKind::Standings).await?,
            pl_scorers: self.league(&PREMIER_LEAGUE, LeagueDataKind::Scorers).await?,
            la_liga_scorers: self.league(&LA_LIGA, LeagueDataKind::Scorers).await?,
        };

        let snapshot = assemble_snapshot(&window, &matches, tables);
        info!(
            "Refreshed snapshot: {} matches, {} league groups",
            snapshot.total_matches,
            snapshot.leagues.len()
        );
        Ok(Refreshed {
            snapshot,
            matches_missing,
        })
    }

    /// Standings or scorers for any configured competition, under the
    /// configured failure policy. Successful fetches are reused for the cache
    /// TTL; failures are not remembered.
    pub async fn competition_data(
        &self,
        competition: &Competition,
        kind: LeagueDataKind,
    ) -> Result<LeagueData, UpstreamError> {
        let mut cached = self.league_cache.lock().await;
        let key = (competition.code, kind);
        if let Some((fetched_at, data)) = cached.get(&key) {
            if fetched_at.elapsed() < self.cache.ttl() {
                debug!("Using cached {} {}", competition.name, kind);
                return Ok(data.clone());
            }
        }

        match self.api.fetch_league(competition, kind).await {
            Ok(data) => {
                cached.insert(key, (Instant::now(), data.clone()));
                Ok(data)
            }
            Err(e) if self.failure_policy == FailurePolicy::Hard => Err(e),
            Err(e) => {
                warn!("{} {} unavailable: {}", competition.name, kind, e);
                Ok(LeagueData::empty(kind))
            }
        }
    }

    async fn cached(&self) -> Option<CacheSnapshot> {
        if !self.cache.is_valid().await {
            return None;
        }
        self.cache.load().await
    }

    /// `None` when the soft policy swallowed a failed match-window call.
    async fn fetch_matches(&self, window: &DateWindow) -> Result<Option<Vec<ApiMatch>>> {
        match self.api.fetch_matches(window.date_from, window.date_to).await {
            Ok(matches) => Ok(Some(matches)),
            Err(e) if self.failure_policy == FailurePolicy::Soft => {
                warn!("Match window unavailable, showing no matches: {}", e);
                Ok(None)
            }
            Err(e) => Err(e).with_context(|| {
                format!(
                    "failed to fetch matches from {} to {}",
                    window.date_from_param(),
                    window.date_to_param()
                )
            }),
        }
    }

    async fn league(
        &self,
        competition: &Competition,
        kind: LeagueDataKind,
    ) -> Result<LeagueData, UpstreamError> {
        match self.failure_policy {
            FailurePolicy::Hard => self.api.fetch_league(competition, kind).await,
            FailurePolicy::Mixed | FailurePolicy::Soft => {
                Ok(fetch_league_or_empty(self.api.as_ref(), competition, kind).await)
            }
        }
    }
}

fn assemble_snapshot(
    window: &DateWindow,
    matches: &[ApiMatch],
    tables: LeagueTables,
) -> CacheSnapshot {
    let pl_count = matches
        .iter()
        .filter(|m| m.competition.code.as_deref() == Some(PREMIER_LEAGUE.code))
        .count();

    CacheSnapshot {
        total_matches: matches.len(),
        pl_count,
        date_from: window.date_from_param(),
        date_to: window.date_to_param(),
        date_from_display: window.date_from_display(),
        date_to_display: window.date_to_display(),
        current_time_ist: window.current_time_display(),
        leagues: group_matches(matches),
        pl_standings: tables.pl_standings.into_standings(),
        la_liga_standings: tables.la_liga_standings.into_standings(),
        pl_scorers: tables.pl_scorers.into_scorers(),
        la_liga_scorers: tables.la_liga_scorers.into_scorers(),
    }
}
