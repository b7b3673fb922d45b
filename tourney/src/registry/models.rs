//! Team, player, tournament and match records.

use crate::ids::{MatchId, PlayerId, TeamId, TournamentId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Points awarded for a win
pub const POINTS_PER_WIN: u32 = 3;
/// Points awarded for a draw
pub const POINTS_PER_DRAW: u32 = 1;

/// A squad member. Only membership is tracked by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub age: u32,
    /// Playing position
    pub position: String,
    /// Unique within a team
    pub jersey_number: u32,
    /// Contact phone number
    pub contact: String,
}

/// Player details supplied on registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub name: String,
    pub age: u32,
    pub position: String,
    pub jersey_number: u32,
    pub contact: String,
}

/// Aggregate match statistics for a team.
///
/// `points == 3 * wins + draws` always holds for values produced by
/// [`TeamStats::record`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamStats {
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
}

impl TeamStats {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// Fold one completed match into the aggregates.
    ///
    /// Returns `false` and leaves the aggregates untouched if any counter
    /// would overflow.
    pub fn record(&mut self, goals_for: u32, goals_against: u32) -> bool {
        match self.with_result(goals_for, goals_against) {
            Some(updated) => {
                *self = updated;
                true
            }
            None => false,
        }
    }

    /// Aggregates after one more completed match, or `None` on overflow
    pub fn with_result(&self, goals_for: u32, goals_against: u32) -> Option<TeamStats> {
        let mut next = *self;
        next.matches_played = next.matches_played.checked_add(1)?;
        next.goals_for = next.goals_for.checked_add(goals_for)?;
        next.goals_against = next.goals_against.checked_add(goals_against)?;

        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => {
                next.wins = next.wins.checked_add(1)?;
                next.points = next.points.checked_add(POINTS_PER_WIN)?;
            }
            std::cmp::Ordering::Equal => {
                next.draws = next.draws.checked_add(1)?;
                next.points = next.points.checked_add(POINTS_PER_DRAW)?;
            }
            std::cmp::Ordering::Less => next.losses = next.losses.checked_add(1)?,
        }
        Some(next)
    }

    /// Remove another set of aggregates previously folded into these.
    pub fn subtract(&mut self, other: &TeamStats) {
        self.matches_played = self.matches_played.saturating_sub(other.matches_played);
        self.wins = self.wins.saturating_sub(other.wins);
        self.draws = self.draws.saturating_sub(other.draws);
        self.losses = self.losses.saturating_sub(other.losses);
        self.goals_for = self.goals_for.saturating_sub(other.goals_for);
        self.goals_against = self.goals_against.saturating_sub(other.goals_against);
        self.points = self.points.saturating_sub(other.points);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check the points and result-count invariants.
    pub fn is_consistent(&self) -> bool {
        self.points == POINTS_PER_WIN * self.wins + POINTS_PER_DRAW * self.draws
            && self.matches_played == self.wins + self.draws + self.losses
    }
}

/// A registered team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub coach: String,
    /// Contact phone number
    pub contact: String,
    /// Squad, in the order players joined
    pub players: Vec<PlayerId>,
    pub registered_on: NaiveDate,
    /// Totals across every tournament the team has played in
    pub stats: TeamStats,
}

/// Tournament format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Every team plays every other team once
    RoundRobin,
    /// Single elimination
    Knockout,
}

impl fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentFormat::RoundRobin => write!(f, "round_robin"),
            TournamentFormat::Knockout => write!(f, "knockout"),
        }
    }
}

impl std::str::FromStr for TournamentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "round_robin" | "league" => Ok(TournamentFormat::RoundRobin),
            "knockout" | "cup" => Ok(TournamentFormat::Knockout),
            other => Err(format!("unknown tournament format: {other}")),
        }
    }
}

/// A tournament and its registered field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: TournamentFormat,
    /// Registered teams in registration order; this order drives seeding and
    /// standings tie-breaks
    pub team_ids: Vec<TeamId>,
    /// Fixtures in generation order
    pub match_ids: Vec<MatchId>,
    pub fixtures_generated: bool,
    /// Aggregates earned in this tournament only, keyed for stable
    /// serialization
    pub stats: BTreeMap<TeamId, TeamStats>,
    pub created_on: NaiveDate,
}

impl Tournament {
    /// Aggregates for a registered team within this tournament
    pub fn stats_for(&self, team_id: &TeamId) -> TeamStats {
        self.stats.get(team_id).copied().unwrap_or_default()
    }

    pub fn is_registered(&self, team_id: &TeamId) -> bool {
        self.team_ids.contains(team_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    Scheduled,
    Completed,
}

/// Final score of a completed match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

/// Which side of a match a slot is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

/// Participant of a match: a known team, or the winner of an earlier
/// knockout match that has not been played yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Team(TeamId),
    WinnerOf(MatchId),
}

impl Slot {
    pub fn team(&self) -> Option<&TeamId> {
        match self {
            Slot::Team(id) => Some(id),
            Slot::WinnerOf(_) => None,
        }
    }
}

/// Where the winner of a knockout match goes next
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Advancement {
    pub match_id: MatchId,
    pub side: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Draw,
}

/// A fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// 1-based round number
    pub round: u32,
    pub home: Slot,
    pub away: Slot,
    pub state: MatchState,
    pub date: Option<NaiveDate>,
    pub venue: Option<String>,
    /// Present iff `state == Completed`
    pub score: Option<Score>,
    /// Knockout only: the next-round slot this match feeds
    pub advances_to: Option<Advancement>,
}

impl Match {
    pub fn is_completed(&self) -> bool {
        self.state == MatchState::Completed
    }

    /// Both participants are known
    pub fn is_ready(&self) -> bool {
        self.home.team().is_some() && self.away.team().is_some()
    }

    pub fn home_team(&self) -> Option<&TeamId> {
        self.home.team()
    }

    pub fn away_team(&self) -> Option<&TeamId> {
        self.away.team()
    }

    pub fn involves(&self, team_id: &TeamId) -> bool {
        self.home_team() == Some(team_id) || self.away_team() == Some(team_id)
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Slot {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        let score = self.score?;
        Some(match score.home.cmp(&score.away) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        })
    }

    /// Winning team, `None` for draws and unplayed matches
    pub fn winner(&self) -> Option<&TeamId> {
        match self.outcome()? {
            MatchOutcome::HomeWin => self.home_team(),
            MatchOutcome::AwayWin => self.away_team(),
            MatchOutcome::Draw => None,
        }
    }

    /// Losing team, `None` for draws and unplayed matches
    pub fn loser(&self) -> Option<&TeamId> {
        match self.outcome()? {
            MatchOutcome::HomeWin => self.away_team(),
            MatchOutcome::AwayWin => self.home_team(),
            MatchOutcome::Draw => None,
        }
    }
}
