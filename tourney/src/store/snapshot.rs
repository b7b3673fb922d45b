//! Serializable image of a registry.

use super::errors::{StoreError, StoreResult};
use crate::ids::IdGenerator;
use crate::registry::{Match, Player, Registry, Team, Tournament};
use serde::{Deserialize, Serialize};

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Every record of a registry, in creation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub tournaments: Vec<Tournament>,
    pub matches: Vec<Match>,
}

impl Snapshot {
    /// Copy the registry's records
    pub fn capture(registry: &Registry) -> Self {
        let teams: Vec<Team> = registry.teams().cloned().collect();
        let players = teams
            .iter()
            .flat_map(|t| t.players.iter())
            .filter_map(|pid| registry.players.get(pid).cloned())
            .collect();
        let tournaments: Vec<Tournament> = registry.tournaments().cloned().collect();
        let matches = tournaments
            .iter()
            .flat_map(|t| t.match_ids.iter())
            .filter_map(|mid| registry.matches.get(mid).cloned())
            .collect();

        Self {
            version: SNAPSHOT_VERSION,
            teams,
            players,
            tournaments,
            matches,
        }
    }

    /// Rebuild a registry that mints new ids from `ids`
    pub fn restore(self, ids: impl IdGenerator + 'static) -> StoreResult<Registry> {
        if self.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let mut registry = Registry::new(ids);
        for team in self.teams {
            registry.team_order.push(team.id.clone());
            registry.teams.insert(team.id.clone(), team);
        }
        for player in self.players {
            registry.players.insert(player.id.clone(), player);
        }
        for tournament in self.tournaments {
            registry.tournament_order.push(tournament.id.clone());
            registry.tournaments.insert(tournament.id.clone(), tournament);
        }
        for m in self.matches {
            registry.matches.insert(m.id.clone(), m);
        }
        Ok(registry)
    }
}
