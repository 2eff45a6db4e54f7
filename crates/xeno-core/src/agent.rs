use core::fmt::{self, Debug};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier for an agent.
///
/// Deterministic simulation requires:
/// - stable ordering (`Ord`)
/// - a stable numeric ID (`stable_id`) for seeding and logs
pub trait AgentId: Copy + Ord + Eq + Debug {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

impl AgentId for usize {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

/// Index of a combatant in the battle's combatant arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl AgentId for CombatantId {
    fn stable_id(self) -> u64 {
        self.0 as u64
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "combatant#{}", self.0)
    }
}

/// Index of a team (faction) in the battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TeamId(pub u32);

impl TeamId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl AgentId for TeamId {
    fn stable_id(self) -> u64 {
        self.0 as u64
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team#{}", self.0)
    }
}
