//! Server-side rendering of the news page.

use crate::cache::{CacheSnapshot, LeagueGroup, MatchStatus};
use crate::football_data::models::{ScorerRow, StandingsRow};

/// Rows shown per standings table and scorer list.
const TOP_N: usize = 5;

/// Render the full "The Football Times" page for a snapshot.
pub fn render_news_page(snapshot: &CacheSnapshot) -> String {
    let mut body = String::new();

    for league in snapshot.leagues.iter().filter(|l| !l.matches.is_empty()) {
        body.push_str(&league_section(league));
    }

    body.push_str(&standings_section("Premier League Table", &snapshot.pl_standings));
    body.push_str(&standings_section("La Liga Table", &snapshot.la_liga_standings));
    body.push_str(&scorers_section("Premier League Top Scorers", &snapshot.pl_scorers));
    body.push_str(&scorers_section("La Liga Top Scorers", &snapshot.la_liga_scorers));

    PAGE_HTML
        .replace("{{current_time}}", &escape(&snapshot.current_time_ist))
        .replace("{{total_matches}}", &snapshot.total_matches.to_string())
        .replace("{{sections}}", &body)
}

fn league_section(league: &LeagueGroup) -> String {
    let rows: String = league
        .matches
        .iter()
        .map(|m| {
            let score = match (&m.status, m.score_home, m.score_away) {
                (MatchStatus::Finished, Some(home), Some(away)) => format!("{}-{}", home, away),
                (MatchStatus::Finished, _, _) => "-".to_string(),
                _ => "vs".to_string(),
            };
            format!(
                r#"
          <tr>
            <td class="match-time">{}</td>
            <td class="status-icon">{}</td>
            <td class="match-teams">{} vs {}</td>
            <td class="match-score">{}</td>
          </tr>"#,
                escape(&m.date_time),
                escape(&m.status_icon),
                escape(&m.home_team),
                escape(&m.away_team),
                score
            )
        })
        .collect();

    format!(
        r#"
    <div class="matches-section">
      <div class="section-header"><a href="{}">{} Results</a></div>
      <table class="matches-table">
        <thead>
          <tr><th class="match-time">Time</th><th class="status-icon"></th><th class="match-teams">Match</th><th class="match-score">Score</th></tr>
        </thead>
        <tbody>{}
        </tbody>
      </table>
    </div>"#,
        escape(&league.url),
        escape(&league.name),
        rows
    )
}

fn standings_section(title: &str, table: &[StandingsRow]) -> String {
    if table.is_empty() {
        return String::new();
    }
    let rows: String = table
        .iter()
        .take(TOP_N)
        .map(|row| {
            format!(
                r#"
          <tr>
            <td class="pos">{}</td>
            <td class="team">{}</td>
            <td class="stats">{}</td>
            <td class="stats">{}</td>
            <td class="stats">{}</td>
            <td class="stats">{}</td>
            <td class="stats">{}</td>
            <td class="stats">{}</td>
            <td class="stats">{}</td>
            <td class="stats"><strong>{}</strong></td>
          </tr>"#,
                cell(row.position),
                escape(row.team_name()),
                cell(row.played_games),
                cell(row.won),
                cell(row.draw),
                cell(row.lost),
                cell(row.goals_for),
                cell(row.goals_against),
                cell(row.goal_difference),
                cell(row.points)
            )
        })
        .collect();

    format!(
        r#"
    <div class="standings-section">
      <div class="section-header">{}</div>
      <table class="standings-table">
        <thead>
          <tr><th class="pos">Pos</th><th class="team">Team</th><th class="stats">P</th><th class="stats">W</th><th class="stats">D</th><th class="stats">L</th><th class="stats">GF</th><th class="stats">GA</th><th class="stats">GD</th><th class="stats">Pts</th></tr>
        </thead>
        <tbody>{}
        </tbody>
      </table>
    </div>"#,
        escape(title),
        rows
    )
}

fn scorers_section(title: &str, scorers: &[ScorerRow]) -> String {
    if scorers.is_empty() {
        return String::new();
    }
    let items: String = scorers
        .iter()
        .take(TOP_N)
        .enumerate()
        .map(|(i, scorer)| {
            format!(
                r#"
        <li class="scorer-item">
          <div class="scorer-info">
            <div class="scorer-pos">{}</div>
            <div>
              <div class="scorer-name">{}</div>
              <div class="scorer-team">{}</div>
            </div>
          </div>
          <div class="scorer-goals">{}</div>
        </li>"#,
                i + 1,
                escape(scorer.player_name()),
                escape(scorer.team_name()),
                cell(scorer.goals)
            )
        })
        .collect();

    format!(
        r#"
    <div class="scorers-section">
      <div class="section-header">{}</div>
      <ul class="scorers-list">{}
      </ul>
    </div>"#,
        escape(title),
        items
    )
}

/// A numeric table cell; missing values render blank.
fn cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Minimal HTML escaping for text and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>The Football Times</title>
<link href="https://fonts.googleapis.com/css2?family=Cinzel:wght@400;600;700&family=Cinzel+Decorative:wght@700&display=swap" rel="stylesheet">
<style>
  body { font-family: 'Cinzel', 'Times New Roman', serif; max-width: 800px; margin: 0 auto; padding: 20px; background: #f5f1e8; color: #2c1810; line-height: 1.4; }
  .header { text-align: center; border-bottom: 3px double #000; margin-bottom: 20px; padding-bottom: 15px; }
  .masthead { font-family: 'Cinzel Decorative', serif; font-size: 42px; font-weight: bold; margin: 0; text-transform: uppercase; letter-spacing: 3px; text-shadow: 1px 1px 2px rgba(0,0,0,0.3); }
  .date-line { font-size: 12px; text-transform: uppercase; margin: 5px 0 15px 0; letter-spacing: 2px; font-weight: 600; }
  .stats-line { font-size: 14px; font-style: italic; margin: 10px 0; }
  .matches-section, .standings-section, .scorers-section { background: #fff; border: 2px solid #000; padding: 15px; margin-bottom: 25px; break-inside: avoid; }
  .section-header { font-size: 20px; font-weight: bold; text-transform: uppercase; border-bottom: 2px solid #000; padding-bottom: 5px; margin-bottom: 15px; letter-spacing: 2px; }
  .section-header a { color: inherit; text-decoration: none; }
  table { width: 100%; border-collapse: collapse; font-size: 12px; }
  th, td { padding: 6px 8px; text-align: left; border-bottom: 1px dotted #ccc; }
  th { font-weight: bold; border-bottom: 2px solid #000; font-size: 11px; text-transform: uppercase; letter-spacing: 1px; }
  .pos, .stats, .status-icon, .match-score { text-align: center; }
  .match-time { text-align: center; width: 80px; font-family: monospace; color: #666; }
  .match-teams { font-weight: bold; }
  .match-score { width: 60px; font-weight: bold; }
  .scorers-list { list-style: none; padding: 0; margin: 0; }
  .scorer-item { padding: 8px 0; border-bottom: 1px dotted #ccc; display: flex; justify-content: space-between; align-items: center; font-size: 13px; }
  .scorer-item:last-child { border-bottom: none; }
  .scorer-info { display: flex; align-items: center; }
  .scorer-pos { width: 25px; font-weight: bold; text-align: center; }
  .scorer-name { font-weight: bold; margin-right: 10px; }
  .scorer-team { color: #666; font-size: 11px; }
  .scorer-goals { font-weight: bold; font-size: 14px; }
  .footer { text-align: center; margin-top: 30px; font-size: 10px; color: #888; border-top: 1px solid #ccc; padding-top: 10px; }
</style>
</head>
<body>
  <div class="header">
    <h1 class="masthead">The Football Times</h1>
    <div class="date-line">{{current_time}} IST</div>
    <div class="stats-line">{{total_matches}} total matches reported</div>
  </div>
  <div class="columns">{{sections}}
  </div>
  <div class="footer">THE FOOTBALL TIMES &bull; Sports Department &bull; Powered by Football-Data.org &bull; All times in IST</div>
</body>
</html>
"#;
