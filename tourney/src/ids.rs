//! Opaque identifiers and id generation.
//!
//! The core only relies on ids being unique and stable. Production registries
//! use random UUIDs; tests and benchmarks use [`SequentialIds`] so that output
//! is reproducible.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identifier for any registry entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Team ID type
pub type TeamId = EntityId;
/// Player ID type
pub type PlayerId = EntityId;
/// Tournament ID type
pub type TournamentId = EntityId;
/// Match ID type
pub type MatchId = EntityId;

/// Kind of entity an id is being minted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Team,
    Player,
    Tournament,
    Match,
}

impl EntityKind {
    fn prefix(self) -> &'static str {
        match self {
            EntityKind::Team => "team",
            EntityKind::Player => "player",
            EntityKind::Tournament => "tournament",
            EntityKind::Match => "match",
        }
    }
}

/// Source of fresh identifiers for the registry.
pub trait IdGenerator: Send + Sync {
    fn next_id(&mut self, kind: EntityKind) -> EntityId;
}

/// Random UUID v4 ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self, _kind: EntityKind) -> EntityId {
        EntityId(uuid::Uuid::new_v4().to_string())
    }
}

/// Deterministic ids of the form `team-1`, `match-7`, ...
///
/// A single counter is shared by all kinds, so ids never collide across kinds
/// even if prefixes were stripped.
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume numbering after `counter` ids have already been handed out.
    pub fn starting_at(counter: u64) -> Self {
        Self { counter }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: EntityKind) -> EntityId {
        self.counter += 1;
        EntityId(format!("{}-{}", kind.prefix(), self.counter))
    }
}
