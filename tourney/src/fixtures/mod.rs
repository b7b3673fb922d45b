//! Fixture generation for round-robin and knockout tournaments.
//!
//! Generation is deterministic: the same registration order always yields
//! the same fixtures in the same order (given a deterministic id source).
//!
//! - Round-robin uses the circle method, producing `n * (n - 1) / 2` matches
//!   over `n - 1` rounds (`n` rounds when `n` is odd).
//! - Knockout pads the field to a power of two with byes and pre-creates the
//!   whole bracket. Later-round matches hold [`Slot::WinnerOf`](crate::registry::Slot)
//!   placeholders that the results engine fills in.
//!
//! ## Example
//!
//! ```
//! use tourney::fixtures;
//! use tourney::ids::SequentialIds;
//! use tourney::registry::{Registry, TournamentFormat};
//!
//! let mut registry = Registry::new(SequentialIds::new());
//! let league = registry.create_tournament("League", TournamentFormat::RoundRobin);
//! for name in ["A", "B", "C", "D"] {
//!     let team = registry.create_team(name, "coach", "555");
//!     registry.register_team(&league, &team).unwrap();
//! }
//!
//! let matches = fixtures::generate(&mut registry, &league).unwrap();
//! assert_eq!(matches.len(), 6);
//! ```

pub mod generator;
pub mod knockout;
pub mod round_robin;

pub use generator::{clear_fixtures, generate, regenerate};
pub use knockout::{BracketPlan, Entrant};
pub use round_robin::Pairing;
