//! # Tourney
//!
//! Fixture generation, result recording and standings for sports tournaments.
//!
//! Teams register into a tournament; the fixture generator turns the
//! registered field into a deterministic schedule; the results engine applies
//! scores and keeps aggregates up to date; the standings calculator ranks the
//! field on demand.
//!
//! ## Core Modules
//!
//! - [`registry`]: Teams, players, tournaments and matches
//! - [`fixtures`]: Round-robin (circle method) and knockout bracket generation
//! - [`results`]: Atomic result recording and knockout advancement
//! - [`standings`]: Points table and knockout progress ranking
//! - [`store`]: Versioned JSON snapshots, backup and restore
//! - [`service`]: Lock-guarded handle for concurrent callers
//!
//! ## Example
//!
//! ```
//! use tourney::ids::SequentialIds;
//! use tourney::registry::{Registry, TournamentFormat};
//! use tourney::{fixtures, results, standings};
//!
//! let mut registry = Registry::new(SequentialIds::new());
//! let league = registry.create_tournament("Sunday League", TournamentFormat::RoundRobin);
//! for name in ["Lions", "Tigers", "Bears"] {
//!     let team = registry.create_team(name, "coach", "555-0100");
//!     registry.register_team(&league, &team).unwrap();
//! }
//!
//! let matches = fixtures::generate(&mut registry, &league).unwrap();
//! results::record_result(&mut registry, &matches[0].id, 2, 1).unwrap();
//!
//! let table = standings::compute_standings(&registry, &league).unwrap();
//! assert_eq!(table[0].stats.points, 3);
//! ```

pub mod errors;
pub mod fixtures;
pub mod ids;
pub mod registry;
pub mod results;
pub mod service;
pub mod standings;
pub mod store;

pub use errors::{TournamentError, TournamentResult};
pub use ids::{EntityId, IdGenerator, MatchId, PlayerId, SequentialIds, TeamId, TournamentId, UuidIds};
pub use registry::{Match, Registry, Team, TeamStats, Tournament, TournamentFormat};
pub use service::SharedRegistry;
pub use standings::TeamStanding;
