//! Thread-safe handle over a registry.
//!
//! Mutating operations (`generate`, `record_result`, `clear_fixtures`) take the
//! write lock for their whole duration. Standings are computed under the read
//! lock, so they always reflect a consistent set of aggregates.

use crate::errors::{TournamentError, TournamentResult};
use crate::fixtures;
use crate::ids::{MatchId, TournamentId};
use crate::registry::{Match, Registry};
use crate::results;
use crate::standings::{self, TeamStanding};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable, shareable registry handle
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn read(&self) -> TournamentResult<RwLockReadGuard<'_, Registry>> {
        self.inner.read().map_err(|_| TournamentError::LockPoisoned)
    }

    pub fn write(&self) -> TournamentResult<RwLockWriteGuard<'_, Registry>> {
        self.inner.write().map_err(|_| TournamentError::LockPoisoned)
    }

    pub fn generate(&self, tournament_id: &TournamentId) -> TournamentResult<Vec<Match>> {
        fixtures::generate(&mut *self.write()?, tournament_id)
    }

    pub fn clear_fixtures(&self, tournament_id: &TournamentId) -> TournamentResult<()> {
        fixtures::clear_fixtures(&mut *self.write()?, tournament_id)
    }

    pub fn record_result(
        &self,
        match_id: &MatchId,
        home_goals: i64,
        away_goals: i64,
    ) -> TournamentResult<Match> {
        results::record_result(&mut *self.write()?, match_id, home_goals, away_goals)
    }

    pub fn compute_standings(
        &self,
        tournament_id: &TournamentId,
    ) -> TournamentResult<Vec<TeamStanding>> {
        standings::compute_standings(&*self.read()?, tournament_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::registry::TournamentFormat;
    use std::thread;

    #[test]
    fn test_concurrent_results_are_all_applied() {
        let mut reg = Registry::new(SequentialIds::new());
        let t = reg.create_tournament("League", TournamentFormat::RoundRobin);
        for i in 0..6 {
            let team = reg.create_team(&format!("T{i}"), "c", "1");
            reg.register_team(&t, &team).unwrap();
        }
        let shared = SharedRegistry::new(reg);
        let matches = shared.generate(&t).unwrap();

        let handles: Vec<_> = matches
            .into_iter()
            .map(|m| {
                let shared = shared.clone();
                thread::spawn(move || shared.record_result(&m.id, 1, 0).unwrap())
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let table = shared.compute_standings(&t).unwrap();
        let played: u32 = table.iter().map(|s| s.stats.matches_played).sum();
        assert_eq!(played, 30);
        assert!(table.iter().all(|s| s.stats.is_consistent()));
    }
}
