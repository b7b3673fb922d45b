//! Text and CSV rendering of standings and fixtures.

use std::fmt::Write as _;
use tourney::registry::{Match, MatchState, Registry, Slot};
use tourney::standings::{KnockoutStatus, TeamStanding};

const STANDINGS_HEADER: [&str; 11] = [
    "rank", "team", "played", "won", "drawn", "lost", "gf", "ga", "gd", "points", "status",
];
const FIXTURES_HEADER: [&str; 8] = [
    "match_id", "round", "home", "away", "score", "status", "date", "venue",
];

/// Standings as an aligned text table
pub fn standings_table(table: &[TeamStanding]) -> String {
    let rows: Vec<Vec<String>> = table.iter().map(standing_row).collect();
    render_table(&STANDINGS_HEADER, &rows)
}

/// Standings as CSV with a header row
pub fn standings_csv(table: &[TeamStanding]) -> String {
    let rows: Vec<Vec<String>> = table.iter().map(standing_row).collect();
    render_csv(&STANDINGS_HEADER, &rows)
}

/// Fixtures as an aligned text table
pub fn fixtures_table(registry: &Registry, matches: &[&Match]) -> String {
    let rows: Vec<Vec<String>> = matches.iter().map(|m| fixture_row(registry, m)).collect();
    render_table(&FIXTURES_HEADER, &rows)
}

/// Fixtures as CSV with a header row
pub fn fixtures_csv(registry: &Registry, matches: &[&Match]) -> String {
    let rows: Vec<Vec<String>> = matches.iter().map(|m| fixture_row(registry, m)).collect();
    render_csv(&FIXTURES_HEADER, &rows)
}

fn standing_row(s: &TeamStanding) -> Vec<String> {
    let status = match s.progress.map(|p| p.status) {
        None => String::new(),
        Some(KnockoutStatus::Advancing) => "advancing".to_string(),
        Some(KnockoutStatus::Eliminated) => "eliminated".to_string(),
        Some(KnockoutStatus::Champion) => "champion".to_string(),
    };
    vec![
        s.rank.to_string(),
        s.team_name.clone(),
        s.stats.matches_played.to_string(),
        s.stats.wins.to_string(),
        s.stats.draws.to_string(),
        s.stats.losses.to_string(),
        s.stats.goals_for.to_string(),
        s.stats.goals_against.to_string(),
        format!("{:+}", s.goal_difference),
        s.stats.points.to_string(),
        status,
    ]
}

fn fixture_row(registry: &Registry, m: &Match) -> Vec<String> {
    let score = m
        .score
        .map(|s| format!("{}-{}", s.home, s.away))
        .unwrap_or_default();
    let status = match m.state {
        MatchState::Scheduled => "scheduled",
        MatchState::Completed => "completed",
    };
    vec![
        m.id.to_string(),
        m.round.to_string(),
        slot_label(registry, &m.home),
        slot_label(registry, &m.away),
        score,
        status.to_string(),
        m.date.map(|d| d.to_string()).unwrap_or_default(),
        m.venue.clone().unwrap_or_default(),
    ]
}

fn slot_label(registry: &Registry, slot: &Slot) -> String {
    match slot {
        Slot::Team(id) => registry
            .team(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|_| id.to_string()),
        Slot::WinnerOf(id) => format!("winner of {id}"),
    }
}

fn render_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = header.iter().map(|h| h.to_uppercase()).collect();
    write_aligned(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_aligned(&mut out, &rule, &widths);
    for row in rows {
        write_aligned(&mut out, row, &widths);
    }
    out
}

fn write_aligned(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

fn render_csv(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", header.join(","));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| csv_field(c)).collect();
        let _ = writeln!(out, "{}", cells.join(","));
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourney::fixtures;
    use tourney::ids::SequentialIds;
    use tourney::registry::{TeamStats, TournamentFormat};
    use tourney::standings::StandingEntry;
    use tourney::{TeamId, results, standings};

    fn sample_table() -> Vec<TeamStanding> {
        let mut stats = TeamStats::default();
        stats.record(2, 0);
        standings::rank(vec![
            StandingEntry {
                team_id: TeamId::new("a"),
                team_name: "Lions, North".to_string(),
                stats,
                progress: None,
            },
            StandingEntry {
                team_id: TeamId::new("b"),
                team_name: "Tigers".to_string(),
                stats: TeamStats::default(),
                progress: None,
            },
        ])
    }

    #[test]
    fn test_csv_escapes_commas() {
        let csv = standings_csv(&sample_table());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "rank,team,played,won,drawn,lost,gf,ga,gd,points,status");
        assert_eq!(lines[1], "1,\"Lions, North\",1,1,0,0,2,0,+2,3,");
        assert_eq!(lines[2], "2,Tigers,0,0,0,0,0,0,+0,0,");
    }

    #[test]
    fn test_table_is_aligned() {
        let text = standings_table(&sample_table());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("RANK"));
        assert!(lines[1].starts_with("----"));
        assert!(lines[2].contains("Lions, North"));
    }

    #[test]
    fn test_fixture_rows_name_pending_slots() {
        let mut registry = tourney::Registry::new(SequentialIds::new());
        let cup = registry.create_tournament("Cup", TournamentFormat::Knockout);
        for name in ["A", "B", "C", "D"] {
            let team = registry.create_team(name, "coach", "555");
            registry.register_team(&cup, &team).unwrap();
        }
        let matches = fixtures::generate(&mut registry, &cup).unwrap();
        results::record_result(&mut registry, &matches[0].id, 3, 1).unwrap();

        let stored = registry.matches_for(&cup).unwrap();
        let csv = fixtures_csv(&registry, &stored);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains(",A,B,3-1,completed,"));
        assert!(lines[3].contains(",A,winner of "));
    }
}
