//! In-memory registry of teams, players, tournaments and matches.

use super::models::{
    Match, MatchState, NewPlayer, Player, Team, TeamStats, Tournament, TournamentFormat,
};
use crate::errors::{TournamentError, TournamentResult};
use crate::ids::{
    EntityId, EntityKind, IdGenerator, MatchId, PlayerId, TeamId, TournamentId, UuidIds,
};
use chrono::{Local, NaiveDate};
use log::{debug, info};
use std::collections::{BTreeMap, HashMap};

/// Owns every entity record. Core services borrow it; callers control its
/// lifetime.
pub struct Registry {
    pub(crate) teams: HashMap<TeamId, Team>,
    pub(crate) team_order: Vec<TeamId>,
    pub(crate) players: HashMap<PlayerId, Player>,
    pub(crate) tournaments: HashMap<TournamentId, Tournament>,
    pub(crate) tournament_order: Vec<TournamentId>,
    pub(crate) matches: HashMap<MatchId, Match>,
    ids: Box<dyn IdGenerator>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("teams", &self.teams.len())
            .field("players", &self.players.len())
            .field("tournaments", &self.tournaments.len())
            .field("matches", &self.matches.len())
            .finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(UuidIds)
    }
}

impl Registry {
    /// Create an empty registry minting ids from `ids`
    pub fn new(ids: impl IdGenerator + 'static) -> Self {
        Self {
            teams: HashMap::new(),
            team_order: Vec::new(),
            players: HashMap::new(),
            tournaments: HashMap::new(),
            tournament_order: Vec::new(),
            matches: HashMap::new(),
            ids: Box::new(ids),
        }
    }

    /// Swap the id source, e.g. after restoring a snapshot
    pub fn set_id_generator(&mut self, ids: impl IdGenerator + 'static) {
        self.ids = Box::new(ids);
    }

    pub(crate) fn next_id(&mut self, kind: EntityKind) -> EntityId {
        self.ids.next_id(kind)
    }

    // Teams

    /// Register a new team, dated today
    pub fn create_team(&mut self, name: &str, coach: &str, contact: &str) -> TeamId {
        self.create_team_on(name, coach, contact, Local::now().date_naive())
    }

    /// Register a new team with an explicit registration date
    pub fn create_team_on(
        &mut self,
        name: &str,
        coach: &str,
        contact: &str,
        registered_on: NaiveDate,
    ) -> TeamId {
        let id = self.next_id(EntityKind::Team);
        let team = Team {
            id: id.clone(),
            name: name.to_string(),
            coach: coach.to_string(),
            contact: contact.to_string(),
            players: Vec::new(),
            registered_on,
            stats: TeamStats::default(),
        };

        self.teams.insert(id.clone(), team);
        self.team_order.push(id.clone());
        info!("Created team {} ({})", name, id);
        id
    }

    pub fn team(&self, team_id: &TeamId) -> TournamentResult<&Team> {
        self.teams
            .get(team_id)
            .ok_or_else(|| TournamentError::TeamNotFound(team_id.clone()))
    }

    pub(crate) fn team_mut(&mut self, team_id: &TeamId) -> TournamentResult<&mut Team> {
        self.teams
            .get_mut(team_id)
            .ok_or_else(|| TournamentError::TeamNotFound(team_id.clone()))
    }

    /// All teams in creation order
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.team_order.iter().filter_map(|id| self.teams.get(id))
    }

    /// Find a team by case-insensitive name
    pub fn find_team_by_name(&self, name: &str) -> Option<&Team> {
        self.teams().find(|t| t.name.eq_ignore_ascii_case(name))
    }

    // Players

    /// Add a player to a team's squad
    pub fn add_player(&mut self, team_id: &TeamId, player: NewPlayer) -> TournamentResult<PlayerId> {
        let team = self.team(team_id)?;
        let duplicate = team
            .players
            .iter()
            .filter_map(|pid| self.players.get(pid))
            .any(|p| p.jersey_number == player.jersey_number);
        if duplicate {
            return Err(TournamentError::DuplicateJerseyNumber(player.jersey_number));
        }

        let id = self.next_id(EntityKind::Player);
        self.players.insert(
            id.clone(),
            Player {
                id: id.clone(),
                name: player.name,
                age: player.age,
                position: player.position,
                jersey_number: player.jersey_number,
                contact: player.contact,
            },
        );
        self.team_mut(team_id)?.players.push(id.clone());
        debug!("Added player {} to team {}", id, team_id);
        Ok(id)
    }

    /// Remove a player from a team's squad
    pub fn remove_player(&mut self, team_id: &TeamId, player_id: &PlayerId) -> TournamentResult<()> {
        let team = self.team_mut(team_id)?;
        let before = team.players.len();
        team.players.retain(|pid| pid != player_id);
        if team.players.len() == before {
            return Err(TournamentError::PlayerNotFound(player_id.clone()));
        }
        self.players.remove(player_id);
        Ok(())
    }

    pub fn player(&self, player_id: &PlayerId) -> TournamentResult<&Player> {
        self.players
            .get(player_id)
            .ok_or_else(|| TournamentError::PlayerNotFound(player_id.clone()))
    }

    /// Squad of a team in joining order
    pub fn players_of(&self, team_id: &TeamId) -> TournamentResult<Vec<&Player>> {
        let team = self.team(team_id)?;
        Ok(team
            .players
            .iter()
            .filter_map(|pid| self.players.get(pid))
            .collect())
    }

    // Tournaments

    pub fn create_tournament(&mut self, name: &str, format: TournamentFormat) -> TournamentId {
        let id = self.next_id(EntityKind::Tournament);
        let tournament = Tournament {
            id: id.clone(),
            name: name.to_string(),
            format,
            team_ids: Vec::new(),
            match_ids: Vec::new(),
            fixtures_generated: false,
            stats: BTreeMap::new(),
            created_on: Local::now().date_naive(),
        };

        self.tournaments.insert(id.clone(), tournament);
        self.tournament_order.push(id.clone());
        info!("Created {} tournament {} ({})", format, name, id);
        id
    }

    pub fn tournament(&self, tournament_id: &TournamentId) -> TournamentResult<&Tournament> {
        self.tournaments
            .get(tournament_id)
            .ok_or_else(|| TournamentError::TournamentNotFound(tournament_id.clone()))
    }

    pub(crate) fn tournament_mut(
        &mut self,
        tournament_id: &TournamentId,
    ) -> TournamentResult<&mut Tournament> {
        self.tournaments
            .get_mut(tournament_id)
            .ok_or_else(|| TournamentError::TournamentNotFound(tournament_id.clone()))
    }

    /// All tournaments in creation order
    pub fn tournaments(&self) -> impl Iterator<Item = &Tournament> {
        self.tournament_order
            .iter()
            .filter_map(|id| self.tournaments.get(id))
    }

    /// Add a team to a tournament's field
    pub fn register_team(
        &mut self,
        tournament_id: &TournamentId,
        team_id: &TeamId,
    ) -> TournamentResult<()> {
        self.team(team_id)?;
        let tournament = self.tournament_mut(tournament_id)?;

        if tournament.fixtures_generated {
            return Err(TournamentError::RegistrationFrozen(tournament_id.clone()));
        }
        if tournament.is_registered(team_id) {
            return Err(TournamentError::DuplicateRegistration {
                tournament: tournament_id.clone(),
                team: team_id.clone(),
            });
        }

        tournament.team_ids.push(team_id.clone());
        tournament.stats.insert(team_id.clone(), TeamStats::default());
        debug!("Registered team {} in tournament {}", team_id, tournament_id);
        Ok(())
    }

    /// Withdraw a team before fixtures are generated
    pub fn unregister_team(
        &mut self,
        tournament_id: &TournamentId,
        team_id: &TeamId,
    ) -> TournamentResult<()> {
        let tournament = self.tournament_mut(tournament_id)?;

        if tournament.fixtures_generated {
            return Err(TournamentError::RegistrationFrozen(tournament_id.clone()));
        }
        if !tournament.is_registered(team_id) {
            return Err(TournamentError::TeamNotFound(team_id.clone()));
        }

        tournament.team_ids.retain(|id| id != team_id);
        tournament.stats.remove(team_id);
        Ok(())
    }

    /// Registered teams in registration order
    pub fn list_registered_team_ids(
        &self,
        tournament_id: &TournamentId,
    ) -> TournamentResult<Vec<TeamId>> {
        Ok(self.tournament(tournament_id)?.team_ids.clone())
    }

    // Matches

    pub fn get_match(&self, match_id: &MatchId) -> TournamentResult<&Match> {
        self.matches
            .get(match_id)
            .ok_or_else(|| TournamentError::MatchNotFound(match_id.clone()))
    }

    pub(crate) fn match_mut(&mut self, match_id: &MatchId) -> TournamentResult<&mut Match> {
        self.matches
            .get_mut(match_id)
            .ok_or_else(|| TournamentError::MatchNotFound(match_id.clone()))
    }

    /// Fixtures of a tournament in generation order
    pub fn matches_for(&self, tournament_id: &TournamentId) -> TournamentResult<Vec<&Match>> {
        let tournament = self.tournament(tournament_id)?;
        Ok(tournament
            .match_ids
            .iter()
            .filter_map(|id| self.matches.get(id))
            .collect())
    }

    /// Set date and venue of a match that has not been played yet
    pub fn schedule_match(
        &mut self,
        match_id: &MatchId,
        date: NaiveDate,
        venue: &str,
    ) -> TournamentResult<()> {
        let m = self.match_mut(match_id)?;
        if m.state == MatchState::Completed {
            return Err(TournamentError::AlreadyRecorded(match_id.clone()));
        }
        m.date = Some(date);
        m.venue = Some(venue.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    fn registry() -> Registry {
        Registry::new(SequentialIds::new())
    }

    fn player(jersey_number: u32) -> NewPlayer {
        NewPlayer {
            name: format!("Player {jersey_number}"),
            age: 24,
            position: "Midfielder".to_string(),
            jersey_number,
            contact: "555-0100".to_string(),
        }
    }

    #[test]
    fn test_create_and_get_team() {
        let mut reg = registry();
        let id = reg.create_team("Lions", "Coach L", "555-0001");
        let team = reg.team(&id).unwrap();
        assert_eq!(team.name, "Lions");
        assert_eq!(team.stats, TeamStats::default());
        assert!(reg.find_team_by_name("lions").is_some());
    }

    #[test]
    fn test_missing_team() {
        let reg = registry();
        assert_eq!(
            reg.team(&TeamId::new("nope")),
            Err(TournamentError::TeamNotFound(TeamId::new("nope")))
        );
    }

    #[test]
    fn test_duplicate_jersey_rejected() {
        let mut reg = registry();
        let team = reg.create_team("Lions", "Coach", "555");
        reg.add_player(&team, player(10)).unwrap();
        assert_eq!(
            reg.add_player(&team, player(10)),
            Err(TournamentError::DuplicateJerseyNumber(10))
        );
        assert_eq!(reg.players_of(&team).unwrap().len(), 1);
    }

    #[test]
    fn test_remove_player() {
        let mut reg = registry();
        let team = reg.create_team("Lions", "Coach", "555");
        let p = reg.add_player(&team, player(7)).unwrap();
        reg.remove_player(&team, &p).unwrap();
        assert!(reg.players_of(&team).unwrap().is_empty());
        assert!(matches!(
            reg.remove_player(&team, &p),
            Err(TournamentError::PlayerNotFound(_))
        ));
    }

    #[test]
    fn test_register_preserves_order_and_rejects_duplicates() {
        let mut reg = registry();
        let t = reg.create_tournament("Cup", TournamentFormat::RoundRobin);
        let a = reg.create_team("A", "c", "1");
        let b = reg.create_team("B", "c", "2");
        reg.register_team(&t, &b).unwrap();
        reg.register_team(&t, &a).unwrap();

        assert_eq!(reg.list_registered_team_ids(&t).unwrap(), vec![b.clone(), a]);
        assert!(matches!(
            reg.register_team(&t, &b),
            Err(TournamentError::DuplicateRegistration { .. })
        ));
    }

    #[test]
    fn test_register_unknown_team() {
        let mut reg = registry();
        let t = reg.create_tournament("Cup", TournamentFormat::Knockout);
        assert!(matches!(
            reg.register_team(&t, &TeamId::new("ghost")),
            Err(TournamentError::TeamNotFound(_))
        ));
    }

    #[test]
    fn test_unregister_team() {
        let mut reg = registry();
        let t = reg.create_tournament("Cup", TournamentFormat::RoundRobin);
        let a = reg.create_team("A", "c", "1");
        reg.register_team(&t, &a).unwrap();
        reg.unregister_team(&t, &a).unwrap();
        assert!(reg.list_registered_team_ids(&t).unwrap().is_empty());
    }
}
