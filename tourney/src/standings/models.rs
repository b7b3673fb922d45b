//! Standings table rows.

use crate::ids::TeamId;
use crate::registry::TeamStats;
use serde::{Deserialize, Serialize};

/// Where a team stands in a knockout bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutStatus {
    /// Still in the bracket
    Advancing,
    /// Lost a match
    Eliminated,
    /// Won the final
    Champion,
}

/// Bracket progress of a knockout participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KnockoutProgress {
    /// Latest round the team has a slot in; the champion gets one past the
    /// final, teams without fixtures get 0
    pub furthest_round: u32,
    pub status: KnockoutStatus,
}

/// Input row for ranking: a registered team and its aggregates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingEntry {
    pub team_id: TeamId,
    pub team_name: String,
    pub stats: TeamStats,
    pub progress: Option<KnockoutProgress>,
}

/// One ranked row of a standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    /// 1-based position; strictly increasing, never shared
    pub rank: usize,
    pub team_id: TeamId,
    pub team_name: String,
    pub stats: TeamStats,
    pub goal_difference: i64,
    /// Present for knockout tournaments
    pub progress: Option<KnockoutProgress>,
}
