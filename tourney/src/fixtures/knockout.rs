//! Single-elimination bracket layout.
//!
//! Seeding rule: teams keep their registration order. The field is padded to
//! the next power of two; the first `byes` teams each receive a bye and the
//! remaining teams are paired consecutively, so two byes never meet.

use crate::ids::TeamId;

/// One side of a first-round pairing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entrant {
    Team(TeamId),
    Bye,
}

/// First-round layout of a bracket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketPlan {
    /// Number of slots, a power of two
    pub size: usize,
    /// Number of rounds including the final
    pub rounds: u32,
    /// First-round pairings in bracket order
    pub first_round: Vec<(Entrant, Entrant)>,
}

impl BracketPlan {
    pub fn bye_count(&self) -> usize {
        self.first_round
            .iter()
            .filter(|(_, away)| *away == Entrant::Bye)
            .count()
    }

    /// Number of bracket positions in a round (1-based)
    pub fn positions_in_round(&self, round: u32) -> usize {
        self.size >> round
    }
}

/// Smallest power of two holding `team_count` teams, at least 2
pub fn bracket_size(team_count: usize) -> usize {
    team_count.max(2).next_power_of_two()
}

/// Lay out the first round of a bracket for `team_ids`
pub fn plan(team_ids: &[TeamId]) -> BracketPlan {
    let size = bracket_size(team_ids.len());
    let byes = size.saturating_sub(team_ids.len());
    let pairs = size / 2;

    let mut first_round = Vec::with_capacity(pairs);
    for k in 0..pairs {
        if k < byes {
            if let Some(team) = team_ids.get(k) {
                first_round.push((Entrant::Team(team.clone()), Entrant::Bye));
            }
            continue;
        }
        let idx = byes + 2 * (k - byes);
        if let (Some(home), Some(away)) = (team_ids.get(idx), team_ids.get(idx + 1)) {
            first_round.push((Entrant::Team(home.clone()), Entrant::Team(away.clone())));
        }
    }

    BracketPlan {
        size,
        rounds: size.trailing_zeros(),
        first_round,
    }
}
