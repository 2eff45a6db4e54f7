use xeno_core::{CombatantId, TeamId};
use xeno_nav::{NavWorldMut, NavWorldView};

use crate::{BattleConfig, BattleError, BattleEvent, Roster, RosterMut, Team};

/// Read side of a battle as seen by combatant AIs and schedulers.
pub trait BattleView: NavWorldView<Agent = CombatantId> + Roster {
    fn config(&self) -> &BattleConfig;

    fn team(&self, id: TeamId) -> Option<&Team>;
}

pub trait BattleMut: BattleView + NavWorldMut + RosterMut {
    /// Start-of-turn upkeep for every member of `team`.
    fn start_team_turn(&mut self, team: TeamId) -> Result<(), BattleError>;

    /// Apply damage to `target`; returns whether it died.
    fn wound(&mut self, target: CombatantId, damage: u32) -> Result<bool, BattleError>;

    fn emit(&mut self, event: BattleEvent);
}
