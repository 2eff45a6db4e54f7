//! Tunables for a battle. Every field has a default so partial config files work.

use xeno_nav::PathfinderConfig;

use crate::BattleError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    pub pathfinder: PathfinderConfig,
    pub movement: MovementConfig,
    pub combat: CombatConfig,
    pub turn: TurnConfig,
}

impl BattleConfig {
    /// Reject values that would stall a turn forever.
    pub fn validate(&self) -> Result<(), BattleError> {
        let step = self.movement.seconds_per_step;
        if !step.is_finite() || step < 0.0 {
            return Err(BattleError::invalid(format!(
                "seconds_per_step must be finite and >= 0, got {step}"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementConfig {
    /// Simulated seconds a combatant needs to cross one voxel.
    pub seconds_per_step: f32,
    /// Times a unit re-plans within one turn after its route gets blocked.
    pub max_replans: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            seconds_per_step: 0.25,
            max_replans: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Time units one attack costs.
    pub attack_cost: u32,
    pub morale_loss_on_ally_death: u32,
    pub morale_recovery_per_turn: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            attack_cost: 20,
            morale_loss_on_ally_death: 15,
            morale_recovery_per_turn: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TurnConfig {
    /// Force a team turn to end after this many `update` calls.
    pub max_updates_per_team_turn: Option<u32>,
}
