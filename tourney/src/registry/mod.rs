//! Entity registry: teams, players, tournaments and matches.
//!
//! The registry is a passive data holder. It hands out ids, enforces
//! registration rules (unique teams, jersey numbers, frozen fields once
//! fixtures exist) and lets the fixture, results and standings services look
//! records up by id.
//!
//! ## Example
//!
//! ```
//! use tourney::registry::{Registry, TournamentFormat};
//! use tourney::ids::SequentialIds;
//!
//! let mut registry = Registry::new(SequentialIds::new());
//! let lions = registry.create_team("Lions", "A. Coach", "555-0101");
//! let cup = registry.create_tournament("Spring Cup", TournamentFormat::Knockout);
//! registry.register_team(&cup, &lions).unwrap();
//!
//! assert_eq!(registry.list_registered_team_ids(&cup).unwrap(), vec![lions]);
//! ```

pub mod manager;
pub mod models;

pub use manager::Registry;
pub use models::{
    Advancement, Match, MatchOutcome, MatchState, NewPlayer, POINTS_PER_DRAW, POINTS_PER_WIN,
    Player, Score, Side, Slot, Team, TeamStats, Tournament, TournamentFormat,
};
