//! Round-robin pairing via the circle method.
//!
//! The first team stays fixed while the others rotate one position per round.
//! Each round pairs opposite positions of the circle. With an odd number of
//! teams a bye placeholder joins the circle, so every team sits out exactly
//! one round.

use crate::ids::TeamId;

/// One pairing of the round-robin schedule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pairing {
    /// 1-based round number
    pub round: u32,
    pub home: TeamId,
    pub away: TeamId,
}

/// Number of rounds needed for `team_count` teams
pub fn round_count(team_count: usize) -> usize {
    match team_count {
        0 | 1 => 0,
        n if n % 2 == 0 => n - 1,
        n => n,
    }
}

/// Build the complete round-robin schedule for `team_ids`.
///
/// Output order is round by round, and within a round the order in which the
/// rotation pairs positions. Home advantage alternates by round. The result
/// depends only on the input order.
pub fn schedule(team_ids: &[TeamId]) -> Vec<Pairing> {
    if team_ids.len() < 2 {
        return Vec::new();
    }

    let mut circle: Vec<Option<&TeamId>> = team_ids.iter().map(Some).collect();
    if circle.len() % 2 == 1 {
        circle.push(None);
    }

    let size = circle.len();
    let mut pairings = Vec::with_capacity(team_ids.len() * (team_ids.len() - 1) / 2);

    for round in 0..round_count(team_ids.len()) {
        for i in 0..size / 2 {
            let (Some(a), Some(b)) = (circle[i], circle[size - 1 - i]) else {
                continue; // bye
            };
            let (home, away) = if round % 2 == 0 { (a, b) } else { (b, a) };
            pairings.push(Pairing {
                round: round as u32 + 1,
                home: home.clone(),
                away: away.clone(),
            });
        }
        circle[1..].rotate_right(1);
    }

    pairings
}
