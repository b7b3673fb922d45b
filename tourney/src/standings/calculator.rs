//! Ranking of teams within a tournament.

use super::models::{KnockoutProgress, KnockoutStatus, StandingEntry, TeamStanding};
use crate::errors::TournamentResult;
use crate::ids::{TeamId, TournamentId};
use crate::registry::{Match, Registry, TeamStats, TournamentFormat};
use std::cmp::Ordering;

/// Compute the standings table of a tournament.
///
/// Pure read of the registry; calling it repeatedly without intervening
/// results yields identical output.
///
/// Round-robin rows are ordered by points, goal difference and goals scored
/// (all descending). Knockout rows are ordered by furthest round reached
/// first, then by the same criteria. Remaining ties keep registration order,
/// and every row gets its own rank.
pub fn compute_standings(
    registry: &Registry,
    tournament_id: &TournamentId,
) -> TournamentResult<Vec<TeamStanding>> {
    let tournament = registry.tournament(tournament_id)?;
    let matches = registry.matches_for(tournament_id)?;

    let mut entries = Vec::with_capacity(tournament.team_ids.len());
    for team_id in &tournament.team_ids {
        let team = registry.team(team_id)?;
        let progress = match tournament.format {
            TournamentFormat::RoundRobin => None,
            TournamentFormat::Knockout => Some(knockout_progress(&matches, team_id)),
        };
        entries.push(StandingEntry {
            team_id: team_id.clone(),
            team_name: team.name.clone(),
            stats: tournament.stats_for(team_id),
            progress,
        });
    }

    Ok(rank(entries))
}

/// Order entries (given in registration order) and assign ranks
pub fn rank(mut entries: Vec<StandingEntry>) -> Vec<TeamStanding> {
    // sort_by is stable: full ties keep registration order
    entries.sort_by(|a, b| compare_progress(a, b).then_with(|| compare_stats(&a.stats, &b.stats)));

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| TeamStanding {
            rank: i + 1,
            goal_difference: entry.stats.goal_difference(),
            team_id: entry.team_id,
            team_name: entry.team_name,
            stats: entry.stats,
            progress: entry.progress,
        })
        .collect()
}

/// Points, then goal difference, then goals scored; better record first
pub fn compare_stats(a: &TeamStats, b: &TeamStats) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

fn compare_progress(a: &StandingEntry, b: &StandingEntry) -> Ordering {
    let round = |e: &StandingEntry| e.progress.map_or(0, |p| p.furthest_round);
    round(b).cmp(&round(a))
}

fn knockout_progress(matches: &[&Match], team_id: &TeamId) -> KnockoutProgress {
    let final_round = matches.iter().map(|m| m.round).max().unwrap_or(0);
    let furthest_round = matches
        .iter()
        .filter(|m| m.involves(team_id))
        .map(|m| m.round)
        .max()
        .unwrap_or(0);

    let eliminated = matches.iter().any(|m| m.loser() == Some(team_id));
    let champion = matches
        .iter()
        .any(|m| m.advances_to.is_none() && m.winner() == Some(team_id));

    if champion {
        KnockoutProgress {
            furthest_round: final_round + 1,
            status: KnockoutStatus::Champion,
        }
    } else {
        KnockoutProgress {
            furthest_round,
            status: if eliminated {
                KnockoutStatus::Eliminated
            } else {
                KnockoutStatus::Advancing
            },
        }
    }
}

/// Winner of a finished knockout tournament
pub fn champion(registry: &Registry, tournament_id: &TournamentId) -> TournamentResult<Option<TeamId>> {
    let tournament = registry.tournament(tournament_id)?;
    if tournament.format != TournamentFormat::Knockout {
        return Ok(None);
    }
    Ok(registry
        .matches_for(tournament_id)?
        .into_iter()
        .find(|m| m.advances_to.is_none())
        .and_then(|m| m.winner().cloned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(points: u32, goals_for: u32, goals_against: u32) -> TeamStats {
        TeamStats {
            points,
            goals_for,
            goals_against,
            ..TeamStats::default()
        }
    }

    fn entry(name: &str, stats: TeamStats) -> StandingEntry {
        StandingEntry {
            team_id: TeamId::new(name),
            team_name: name.to_string(),
            stats,
            progress: None,
        }
    }

    fn names(table: &[TeamStanding]) -> Vec<&str> {
        table.iter().map(|s| s.team_name.as_str()).collect()
    }

    #[test]
    fn test_points_first() {
        let table = rank(vec![entry("a", stats(3, 1, 0)), entry("b", stats(6, 2, 2))]);
        assert_eq!(names(&table), vec!["b", "a"]);
        assert_eq!(table[0].rank, 1);
        assert_eq!(table[1].rank, 2);
    }

    #[test]
    fn test_goal_difference_then_goals_for() {
        let table = rank(vec![
            entry("a", stats(3, 1, 1)),
            entry("b", stats(3, 5, 3)),
            entry("c", stats(3, 3, 1)),
        ]);
        // b and c both +2; c scored fewer
        assert_eq!(names(&table), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_full_tie_keeps_registration_order() {
        let table = rank(vec![
            entry("x", stats(1, 1, 1)),
            entry("y", stats(1, 1, 1)),
            entry("z", stats(1, 1, 1)),
        ]);
        assert_eq!(names(&table), vec!["x", "y", "z"]);
        assert_eq!(table.iter().map(|s| s.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_progress_beats_record() {
        let mut early = entry("early", stats(3, 9, 0));
        early.progress = Some(KnockoutProgress {
            furthest_round: 1,
            status: KnockoutStatus::Eliminated,
        });
        let mut late = entry("late", stats(3, 1, 0));
        late.progress = Some(KnockoutProgress {
            furthest_round: 2,
            status: KnockoutStatus::Advancing,
        });

        let table = rank(vec![early, late]);
        assert_eq!(names(&table), vec!["late", "early"]);
    }

    #[test]
    fn test_goal_difference_exposed() {
        let table = rank(vec![entry("a", stats(0, 1, 4))]);
        assert_eq!(table[0].goal_difference, -3);
    }
}
