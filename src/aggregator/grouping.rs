use std::collections::HashMap;
use url::Url;

use super::window::to_local;
use crate::cache::{LeagueGroup, MatchStatus, MatchView};
use crate::football_data::models::ApiMatch;

/// Competitions shown on the page, by upstream name.
pub const ALLOWED_COMPETITIONS: [&str; 6] = [
    "Premier League",
    "Primera Division",
    "Serie A",
    "Ligue 1",
    "Bundesliga",
    "UEFA Champions League",
];

/// Group order; anything not listed follows alphabetically.
pub const POPULARITY_ORDER: [&str; 8] = [
    "Premier League",
    "La Liga",
    "Bundesliga",
    "Serie A",
    "Ligue 1",
    "UEFA Champions League",
    "UEFA Europa League",
    "MLS",
];

const SEARCH_URL: &str = "https://www.google.com/search";

/// Name shown for an upstream competition name.
pub fn display_name(competition: &str) -> &str {
    match competition {
        "Primera Division" => "La Liga",
        other => other,
    }
}

/// "{display name} ({area})" for allowed competitions, `None` otherwise.
pub fn league_label(m: &ApiMatch) -> Option<String> {
    let competition = m.competition.name.as_str();
    if !ALLOWED_COMPETITIONS.contains(&competition) {
        return None;
    }
    Some(format!("{} ({})", display_name(competition), m.area.name))
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum GroupRank<'a> {
    Ranked(usize),
    Unranked(&'a str),
}

fn group_rank(label: &str) -> GroupRank<'_> {
    let competition = label.split(" (").next().unwrap_or(label);
    match POPULARITY_ORDER.iter().position(|name| *name == competition) {
        Some(index) => GroupRank::Ranked(index),
        None => GroupRank::Unranked(label),
    }
}

fn search_url(label: &str) -> String {
    Url::parse_with_params(SEARCH_URL, &[("q", label)])
        .map(String::from)
        .unwrap_or_else(|_| SEARCH_URL.to_string())
}

pub fn match_view(m: &ApiMatch) -> MatchView {
    let kickoff = to_local(m.utc_date);
    let status = MatchStatus::from(m.status.as_str());
    let (score_home, score_away) = if status == MatchStatus::Finished {
        (m.score.full_time.home, m.score.full_time.away)
    } else {
        (None, None)
    };
    MatchView {
        home_team: m.home_team.display_name(),
        away_team: m.away_team.display_name(),
        date_time: kickoff.format("%d-%m %H:%M").to_string(),
        kickoff,
        status_icon: status.glyph().to_string(),
        status,
        score_home,
        score_away,
    }
}

/// Bucket allowed matches by league label, order the buckets by popularity
/// and each bucket's matches newest first.
pub fn group_matches(matches: &[ApiMatch]) -> Vec<LeagueGroup> {
    // Insertion-ordered buckets keep ties in first-seen order
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<&ApiMatch>)> = Vec::new();
    for m in matches {
        let Some(label) = league_label(m) else {
            continue;
        };
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            buckets.push((label, Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(m);
    }

    buckets.sort_by(|(a, _), (b, _)| group_rank(a).cmp(&group_rank(b)));

    buckets
        .into_iter()
        .map(|(name, bucket)| {
            let mut views: Vec<MatchView> = bucket.into_iter().map(match_view).collect();
            views.sort_by(|a, b| b.kickoff.cmp(&a.kickoff));
            LeagueGroup {
                url: search_url(&name),
                count: views.len(),
                name,
                matches: views,
            }
        })
        .collect()
}
