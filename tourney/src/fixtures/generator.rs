//! Turns a tournament's registered field into stored fixtures.

use super::knockout::{self, Entrant};
use super::round_robin;
use crate::errors::{TournamentError, TournamentResult};
use crate::ids::{EntityKind, MatchId, TeamId, TournamentId};
use crate::registry::{
    Advancement, Match, MatchState, Registry, Side, Slot, TournamentFormat,
};
use log::{debug, info};
use std::collections::HashSet;

/// Generate and store the fixtures of a tournament.
///
/// Teams are taken in registration order. Once this succeeds the registered
/// field is frozen until [`clear_fixtures`] is called.
///
/// # Errors
///
/// * `AlreadyScheduled` if fixtures already exist
/// * `InvalidTournamentState` for fewer than two (or duplicate) teams
pub fn generate(
    registry: &mut Registry,
    tournament_id: &TournamentId,
) -> TournamentResult<Vec<Match>> {
    let tournament = registry.tournament(tournament_id)?;
    if tournament.fixtures_generated {
        return Err(TournamentError::AlreadyScheduled(tournament_id.clone()));
    }

    let team_ids = tournament.team_ids.clone();
    let format = tournament.format;
    validate_field(&team_ids)?;

    let matches = match format {
        TournamentFormat::RoundRobin => build_round_robin(registry, tournament_id, &team_ids),
        TournamentFormat::Knockout => build_knockout(registry, tournament_id, &team_ids)?,
    };

    let match_ids: Vec<MatchId> = matches.iter().map(|m| m.id.clone()).collect();
    for m in &matches {
        registry.matches.insert(m.id.clone(), m.clone());
    }

    let tournament = registry.tournament_mut(tournament_id)?;
    tournament.match_ids = match_ids;
    tournament.fixtures_generated = true;

    info!(
        "Generated {} {} fixtures for {} teams in tournament {}",
        matches.len(),
        format,
        team_ids.len(),
        tournament_id
    );
    Ok(matches)
}

/// Void every fixture of a tournament and reset its aggregates.
///
/// Per-tournament aggregates are also taken back out of each team's overall
/// totals. Registration is unfrozen afterwards.
pub fn clear_fixtures(registry: &mut Registry, tournament_id: &TournamentId) -> TournamentResult<()> {
    let tournament = registry.tournament(tournament_id)?;
    let match_ids = tournament.match_ids.clone();
    let earned: Vec<_> = tournament
        .stats
        .iter()
        .map(|(team_id, stats)| (team_id.clone(), *stats))
        .collect();

    for match_id in &match_ids {
        registry.matches.remove(match_id);
    }
    for (team_id, stats) in &earned {
        if let Some(team) = registry.teams.get_mut(team_id) {
            team.stats.subtract(stats);
        }
    }

    let tournament = registry.tournament_mut(tournament_id)?;
    tournament.match_ids.clear();
    tournament.fixtures_generated = false;
    for stats in tournament.stats.values_mut() {
        stats.reset();
    }

    info!(
        "Cleared {} fixtures of tournament {}",
        match_ids.len(),
        tournament_id
    );
    Ok(())
}

/// Void existing fixtures and generate a fresh set
pub fn regenerate(
    registry: &mut Registry,
    tournament_id: &TournamentId,
) -> TournamentResult<Vec<Match>> {
    clear_fixtures(registry, tournament_id)?;
    generate(registry, tournament_id)
}

fn validate_field(team_ids: &[TeamId]) -> TournamentResult<()> {
    if team_ids.len() < 2 {
        return Err(TournamentError::InvalidTournamentState(format!(
            "at least 2 teams required, have {}",
            team_ids.len()
        )));
    }

    let unique: HashSet<_> = team_ids.iter().collect();
    if unique.len() != team_ids.len() {
        return Err(TournamentError::InvalidTournamentState(
            "registered teams must be unique".to_string(),
        ));
    }

    Ok(())
}

fn new_match(
    id: MatchId,
    tournament_id: &TournamentId,
    round: u32,
    home: Slot,
    away: Slot,
) -> Match {
    Match {
        id,
        tournament_id: tournament_id.clone(),
        round,
        home,
        away,
        state: MatchState::Scheduled,
        date: None,
        venue: None,
        score: None,
        advances_to: None,
    }
}

fn build_round_robin(
    registry: &mut Registry,
    tournament_id: &TournamentId,
    team_ids: &[TeamId],
) -> Vec<Match> {
    round_robin::schedule(team_ids)
        .into_iter()
        .map(|pairing| {
            let id = registry.next_id(EntityKind::Match);
            new_match(
                id,
                tournament_id,
                pairing.round,
                Slot::Team(pairing.home),
                Slot::Team(pairing.away),
            )
        })
        .collect()
}

/// Materialise the whole bracket. First-round pairings with a bye produce no
/// match; the bye holder is written straight into its second-round slot.
fn build_knockout(
    registry: &mut Registry,
    tournament_id: &TournamentId,
    team_ids: &[TeamId],
) -> TournamentResult<Vec<Match>> {
    let plan = knockout::plan(team_ids);

    // positions[r][p]: match id at bracket position p of round r + 1
    let mut positions: Vec<Vec<Option<MatchId>>> = Vec::with_capacity(plan.rounds as usize);
    positions.push(
        plan.first_round
            .iter()
            .map(|(_, away)| match away {
                Entrant::Bye => None,
                Entrant::Team(_) => Some(registry.next_id(EntityKind::Match)),
            })
            .collect(),
    );
    for round in 2..=plan.rounds {
        positions.push(
            (0..plan.positions_in_round(round))
                .map(|_| Some(registry.next_id(EntityKind::Match)))
                .collect(),
        );
    }

    let advancement = |round_idx: usize, position: usize| -> Option<Advancement> {
        let next = positions.get(round_idx + 1)?;
        let match_id = next.get(position / 2)?.clone()?;
        let side = if position % 2 == 0 { Side::Home } else { Side::Away };
        Some(Advancement { match_id, side })
    };

    let mut matches = Vec::new();

    for (position, (home, away)) in plan.first_round.iter().enumerate() {
        let (Some(id), Entrant::Team(home), Entrant::Team(away)) =
            (positions[0][position].clone(), home, away)
        else {
            continue;
        };
        let mut m = new_match(
            id,
            tournament_id,
            1,
            Slot::Team(home.clone()),
            Slot::Team(away.clone()),
        );
        m.advances_to = advancement(0, position);
        matches.push(m);
    }

    for round_idx in 1..positions.len() {
        for position in 0..positions[round_idx].len() {
            let Some(id) = positions[round_idx][position].clone() else {
                continue;
            };
            let previous = &positions[round_idx - 1];
            let home = feeder_slot(&plan.first_round, previous, round_idx, 2 * position)?;
            let away = feeder_slot(&plan.first_round, previous, round_idx, 2 * position + 1)?;
            let mut m = new_match(id, tournament_id, round_idx as u32 + 1, home, away);
            m.advances_to = advancement(round_idx, position);
            matches.push(m);
        }
    }

    debug!(
        "Knockout bracket of size {} with {} byes over {} rounds",
        plan.size,
        plan.bye_count(),
        plan.rounds
    );
    Ok(matches)
}

/// Slot fed by `feeder` of the previous round. A first-round bye pairing
/// feeds its team directly.
fn feeder_slot(
    first_round: &[(Entrant, Entrant)],
    previous: &[Option<MatchId>],
    round_idx: usize,
    feeder: usize,
) -> TournamentResult<Slot> {
    if let Some(Some(match_id)) = previous.get(feeder) {
        return Ok(Slot::WinnerOf(match_id.clone()));
    }
    match first_round.get(feeder) {
        Some((Entrant::Team(team), Entrant::Bye)) if round_idx == 1 => Ok(Slot::Team(team.clone())),
        _ => Err(TournamentError::InvalidTournamentState(format!(
            "bracket position {feeder} of round {round_idx} has no feeder"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    fn setup(format: TournamentFormat, n: usize) -> (Registry, TournamentId, Vec<TeamId>) {
        let mut reg = Registry::new(SequentialIds::new());
        let t = reg.create_tournament("Test", format);
        let teams: Vec<_> = (0..n)
            .map(|i| {
                let id = reg.create_team(&format!("Team {i}"), "coach", "555");
                reg.register_team(&t, &id).unwrap();
                id
            })
            .collect();
        (reg, t, teams)
    }

    #[test]
    fn test_round_robin_stores_matches() {
        let (mut reg, t, _) = setup(TournamentFormat::RoundRobin, 4);
        let matches = generate(&mut reg, &t).unwrap();
        assert_eq!(matches.len(), 6);
        assert_eq!(reg.matches_for(&t).unwrap().len(), 6);
        assert!(reg.tournament(&t).unwrap().fixtures_generated);
        assert!(matches.iter().all(|m| m.advances_to.is_none()));
    }

    #[test]
    fn test_generate_twice_fails() {
        let (mut reg, t, _) = setup(TournamentFormat::RoundRobin, 3);
        generate(&mut reg, &t).unwrap();
        assert_eq!(
            generate(&mut reg, &t),
            Err(TournamentError::AlreadyScheduled(t.clone()))
        );
    }

    #[test]
    fn test_single_team_rejected() {
        let (mut reg, t, _) = setup(TournamentFormat::Knockout, 1);
        assert!(matches!(
            generate(&mut reg, &t),
            Err(TournamentError::InvalidTournamentState(_))
        ));
        assert!(!reg.tournament(&t).unwrap().fixtures_generated);
    }

    #[test]
    fn test_registration_frozen_after_generation() {
        let (mut reg, t, _) = setup(TournamentFormat::RoundRobin, 2);
        generate(&mut reg, &t).unwrap();
        let late = reg.create_team("Late", "c", "1");
        assert_eq!(
            reg.register_team(&t, &late),
            Err(TournamentError::RegistrationFrozen(t.clone()))
        );
    }

    #[test]
    fn test_clear_fixtures_unfreezes() {
        let (mut reg, t, _) = setup(TournamentFormat::RoundRobin, 3);
        let first = generate(&mut reg, &t).unwrap();
        clear_fixtures(&mut reg, &t).unwrap();
        assert!(reg.matches_for(&t).unwrap().is_empty());
        assert!(reg.get_match(&first[0].id).is_err());

        let late = reg.create_team("Late", "c", "1");
        reg.register_team(&t, &late).unwrap();
        assert_eq!(generate(&mut reg, &t).unwrap().len(), 6);
    }

    #[test]
    fn test_knockout_skeleton_four_teams() {
        let (mut reg, t, teams) = setup(TournamentFormat::Knockout, 4);
        let matches = generate(&mut reg, &t).unwrap();
        assert_eq!(matches.len(), 3);

        let final_match = &matches[2];
        assert_eq!(final_match.round, 2);
        assert_eq!(final_match.home, Slot::WinnerOf(matches[0].id.clone()));
        assert_eq!(final_match.away, Slot::WinnerOf(matches[1].id.clone()));
        assert!(final_match.advances_to.is_none());

        assert_eq!(matches[0].home_team(), Some(&teams[0]));
        assert_eq!(matches[0].away_team(), Some(&teams[1]));
        assert_eq!(
            matches[1].advances_to,
            Some(Advancement {
                match_id: final_match.id.clone(),
                side: Side::Away
            })
        );
    }

    #[test]
    fn test_knockout_bye_goes_straight_to_round_two() {
        let (mut reg, t, teams) = setup(TournamentFormat::Knockout, 3);
        let matches = generate(&mut reg, &t).unwrap();
        assert_eq!(matches.len(), 2);

        let semi = &matches[0];
        assert_eq!(semi.round, 1);
        assert_eq!(semi.home_team(), Some(&teams[1]));
        assert_eq!(semi.away_team(), Some(&teams[2]));

        let final_match = &matches[1];
        assert_eq!(final_match.round, 2);
        assert_eq!(final_match.home, Slot::Team(teams[0].clone()));
        assert_eq!(final_match.away, Slot::WinnerOf(semi.id.clone()));
    }

    #[test]
    fn test_knockout_match_count_is_teams_minus_one() {
        for n in 2..=17 {
            let (mut reg, t, _) = setup(TournamentFormat::Knockout, n);
            let matches = generate(&mut reg, &t).unwrap();
            assert_eq!(matches.len(), n - 1, "n = {n}");
            assert_eq!(
                matches.iter().filter(|m| m.advances_to.is_none()).count(),
                1,
                "exactly one final for n = {n}"
            );
        }
    }
}
