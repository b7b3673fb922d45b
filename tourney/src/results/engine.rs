//! Result recording.

use crate::errors::{TournamentError, TournamentResult};
use crate::ids::{MatchId, TeamId, TournamentId};
use crate::registry::{Match, MatchState, Registry, Score, Slot, TeamStats, TournamentFormat};
use log::{debug, info, warn};

/// Record the final score of a scheduled match.
///
/// Every check runs before anything is written, so a failed call leaves the
/// registry untouched. On success the match is completed, both teams'
/// tournament and overall aggregates are updated and, in a knockout, the
/// winner is written into the next-round slot.
///
/// # Errors
///
/// * `MatchNotFound` if the match does not exist
/// * `AlreadyRecorded` if the match is already completed
/// * `InvalidScore` for negative or out of range goals, including goals
///   that would overflow either team's aggregates
/// * `MatchNotReady` if a knockout slot is still waiting on an earlier round
/// * `DrawNotAllowedInKnockout` for a level knockout score
pub fn record_result(
    registry: &mut Registry,
    match_id: &MatchId,
    home_goals: i64,
    away_goals: i64,
) -> TournamentResult<Match> {
    let m = registry.get_match(match_id)?;
    if m.state == MatchState::Completed {
        warn!("Rejected second result for match {}", match_id);
        return Err(TournamentError::AlreadyRecorded(match_id.clone()));
    }

    let score = validate_score(home_goals, away_goals)?;

    let (Some(home), Some(away)) = (m.home_team().cloned(), m.away_team().cloned()) else {
        return Err(TournamentError::MatchNotReady(match_id.clone()));
    };

    let tournament_id = m.tournament_id.clone();
    let format = registry.tournament(&tournament_id)?.format;
    if format == TournamentFormat::Knockout && score.home == score.away {
        return Err(TournamentError::DrawNotAllowedInKnockout(match_id.clone()));
    }

    let advances_to = m.advances_to.clone();
    if let Some(next) = &advances_to {
        registry.get_match(&next.match_id)?;
    }
    let home_totals = next_aggregates(registry, &tournament_id, &home, score.home, score.away)?
        .ok_or_else(|| invalid_score(home_goals, away_goals))?;
    let away_totals = next_aggregates(registry, &tournament_id, &away, score.away, score.home)?
        .ok_or_else(|| invalid_score(home_goals, away_goals))?;

    // Validation done; apply.
    let m = registry.match_mut(match_id)?;
    m.state = MatchState::Completed;
    m.score = Some(score);
    let updated = m.clone();

    apply_aggregates(registry, &tournament_id, &home, home_totals)?;
    apply_aggregates(registry, &tournament_id, &away, away_totals)?;

    if let (Some(next), Some(winner)) = (advances_to, updated.winner().cloned()) {
        let next_match = registry.match_mut(&next.match_id)?;
        *next_match.slot_mut(next.side) = Slot::Team(winner.clone());
        debug!(
            "Team {} advances to match {} (round {})",
            winner, next.match_id, next_match.round
        );
    }

    info!(
        "Recorded {}-{} for match {} in tournament {}",
        score.home, score.away, match_id, tournament_id
    );
    Ok(updated)
}

/// Scheduled matches of a tournament whose participants are both known
pub fn playable_matches<'a>(
    registry: &'a Registry,
    tournament_id: &TournamentId,
) -> TournamentResult<Vec<&'a Match>> {
    Ok(registry
        .matches_for(tournament_id)?
        .into_iter()
        .filter(|m| m.state == MatchState::Scheduled && m.is_ready())
        .collect())
}

fn invalid_score(home_goals: i64, away_goals: i64) -> TournamentError {
    TournamentError::InvalidScore {
        home: home_goals,
        away: away_goals,
    }
}

fn validate_score(home_goals: i64, away_goals: i64) -> TournamentResult<Score> {
    Ok(Score {
        home: u32::try_from(home_goals).map_err(|_| invalid_score(home_goals, away_goals))?,
        away: u32::try_from(away_goals).map_err(|_| invalid_score(home_goals, away_goals))?,
    })
}

/// Tournament and overall aggregates of a team after this result, or `None`
/// if either would overflow
fn next_aggregates(
    registry: &Registry,
    tournament_id: &TournamentId,
    team_id: &TeamId,
    goals_for: u32,
    goals_against: u32,
) -> TournamentResult<Option<(TeamStats, TeamStats)>> {
    let in_tournament = registry
        .tournament(tournament_id)?
        .stats_for(team_id)
        .with_result(goals_for, goals_against);
    let overall = registry
        .team(team_id)?
        .stats
        .with_result(goals_for, goals_against);
    Ok(in_tournament.zip(overall))
}

fn apply_aggregates(
    registry: &mut Registry,
    tournament_id: &TournamentId,
    team_id: &TeamId,
    (in_tournament, overall): (TeamStats, TeamStats),
) -> TournamentResult<()> {
    registry
        .tournament_mut(tournament_id)?
        .stats
        .insert(team_id.clone(), in_tournament);
    registry.team_mut(team_id)?.stats = overall;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::ids::SequentialIds;

    fn setup(format: TournamentFormat, n: usize) -> (Registry, TournamentId, Vec<TeamId>, Vec<Match>) {
        let mut reg = Registry::new(SequentialIds::new());
        let t = reg.create_tournament("Test", format);
        let teams: Vec<_> = (0..n)
            .map(|i| {
                let id = reg.create_team(&format!("Team {i}"), "coach", "555");
                reg.register_team(&t, &id).unwrap();
                id
            })
            .collect();
        let matches = fixtures::generate(&mut reg, &t).unwrap();
        (reg, t, teams, matches)
    }

    #[test]
    fn test_home_win_updates_both_teams() {
        let (mut reg, t, _, matches) = setup(TournamentFormat::RoundRobin, 2);
        let m = &matches[0];
        let updated = record_result(&mut reg, &m.id, 3, 0).unwrap();
        assert_eq!(updated.state, MatchState::Completed);
        assert_eq!(updated.score, Some(Score { home: 3, away: 0 }));

        let home = m.home_team().unwrap();
        let away = m.away_team().unwrap();
        let tournament = reg.tournament(&t).unwrap();
        assert_eq!(tournament.stats_for(home).points, 3);
        assert_eq!(tournament.stats_for(away).losses, 1);
        assert_eq!(reg.team(home).unwrap().stats.goals_for, 3);
        assert_eq!(reg.team(away).unwrap().stats.goals_against, 3);
    }

    #[test]
    fn test_negative_score_rejected_without_changes() {
        let (mut reg, t, teams, matches) = setup(TournamentFormat::RoundRobin, 2);
        assert_eq!(
            record_result(&mut reg, &matches[0].id, -1, 2),
            Err(TournamentError::InvalidScore { home: -1, away: 2 })
        );
        assert_eq!(reg.get_match(&matches[0].id).unwrap().state, MatchState::Scheduled);
        assert_eq!(
            reg.tournament(&t).unwrap().stats_for(&teams[0]),
            TeamStats::default()
        );
    }

    #[test]
    fn test_oversized_score_rejected() {
        let (mut reg, _, _, matches) = setup(TournamentFormat::RoundRobin, 2);
        assert!(matches!(
            record_result(&mut reg, &matches[0].id, i64::from(u32::MAX) + 1, 0),
            Err(TournamentError::InvalidScore { .. })
        ));
    }

    #[test]
    fn test_goal_overflow_rejected_without_changes() {
        let (mut reg, t, _, matches) = setup(TournamentFormat::RoundRobin, 3);
        let max = i64::from(u32::MAX);
        record_result(&mut reg, &matches[0].id, max, max).unwrap();

        // Find the next fixture sharing a team with the first one
        let first = &matches[0];
        let next = matches[1..]
            .iter()
            .find(|m| {
                m.involves(first.home_team().unwrap()) || m.involves(first.away_team().unwrap())
            })
            .unwrap();
        let before = reg.tournament(&t).unwrap().clone();

        assert_eq!(
            record_result(&mut reg, &next.id, 1, 1),
            Err(TournamentError::InvalidScore { home: 1, away: 1 })
        );
        assert_eq!(reg.get_match(&next.id).unwrap().state, MatchState::Scheduled);
        assert_eq!(reg.get_match(&next.id).unwrap().score, None);
        assert_eq!(reg.tournament(&t).unwrap(), &before);
    }

    #[test]
    fn test_unknown_match() {
        let (mut reg, _, _, _) = setup(TournamentFormat::RoundRobin, 2);
        assert_eq!(
            record_result(&mut reg, &MatchId::new("missing"), 1, 0),
            Err(TournamentError::MatchNotFound(MatchId::new("missing")))
        );
    }

    #[test]
    fn test_pending_knockout_match_not_ready() {
        let (mut reg, _, _, matches) = setup(TournamentFormat::Knockout, 4);
        let final_match = &matches[2];
        assert_eq!(
            record_result(&mut reg, &final_match.id, 1, 0),
            Err(TournamentError::MatchNotReady(final_match.id.clone()))
        );
    }

    #[test]
    fn test_knockout_winner_fills_next_slot() {
        let (mut reg, t, teams, matches) = setup(TournamentFormat::Knockout, 4);
        record_result(&mut reg, &matches[0].id, 0, 1).unwrap();

        let final_match = reg.get_match(&matches[2].id).unwrap();
        assert_eq!(final_match.home, Slot::Team(teams[1].clone()));
        assert!(!final_match.is_ready());

        record_result(&mut reg, &matches[1].id, 4, 2).unwrap();
        let final_match = reg.get_match(&matches[2].id).unwrap();
        assert_eq!(final_match.away, Slot::Team(teams[2].clone()));
        assert!(final_match.is_ready());

        let playable = playable_matches(&reg, &t).unwrap();
        assert_eq!(playable.len(), 1);
        assert_eq!(playable[0].id, matches[2].id);
    }

    #[test]
    fn test_round_robin_draw_allowed() {
        let (mut reg, t, _, matches) = setup(TournamentFormat::RoundRobin, 3);
        let m = &matches[0];
        record_result(&mut reg, &m.id, 2, 2).unwrap();
        let stats = reg.tournament(&t).unwrap().stats_for(m.home_team().unwrap());
        assert_eq!((stats.draws, stats.points), (1, 1));
    }
}
