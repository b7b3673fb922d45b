//! Standings calculator.
//!
//! Rank assignment: rows are numbered 1, 2, 3, ... by sorted position. Teams
//! level on every criterion do not share a rank; registration order decides.

pub mod calculator;
pub mod models;

pub use calculator::{champion, compare_stats, compute_standings, rank};
pub use models::{KnockoutProgress, KnockoutStatus, StandingEntry, TeamStanding};
