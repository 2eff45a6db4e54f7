use xeno_core::{CombatantId, TeamId, Voxel};
use xeno_nav::Mobility;

use crate::BattleError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const MAX_MORALE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CombatantStats {
    pub max_health: u32,
    pub max_time_units: u32,
    pub bravery: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub can_fly: bool,
}

impl CombatantStats {
    pub fn validate(&self) -> Result<(), BattleError> {
        if self.max_health == 0 {
            return Err(BattleError::invalid("max_health must be > 0"));
        }
        if self.max_time_units == 0 {
            return Err(BattleError::invalid("max_time_units must be > 0"));
        }
        Ok(())
    }
}

impl Default for CombatantStats {
    fn default() -> Self {
        Self {
            max_health: 30,
            max_time_units: 60,
            bravery: 50,
            can_fly: false,
        }
    }
}

/// One unit on the battlefield.
#[derive(Debug, Clone, PartialEq)]
pub struct Combatant {
    id: CombatantId,
    name: String,
    team: TeamId,
    stats: CombatantStats,
    position: Voxel,
    health: u32,
    stun: u32,
    morale: u32,
    time_units: u32,
}

impl Combatant {
    pub fn new(
        id: CombatantId,
        name: impl Into<String>,
        team: TeamId,
        position: Voxel,
        stats: CombatantStats,
    ) -> Result<Self, BattleError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BattleError::invalid("combatant name must not be empty"));
        }
        stats.validate()?;

        Ok(Self {
            id,
            name,
            team,
            stats,
            position,
            health: stats.max_health,
            stun: 0,
            morale: MAX_MORALE,
            time_units: stats.max_time_units,
        })
    }

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    pub fn stats(&self) -> &CombatantStats {
        &self.stats
    }

    pub fn position(&self) -> Voxel {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Voxel) {
        self.position = position;
    }

    pub fn mobility(&self) -> Mobility {
        Mobility {
            can_fly: self.stats.can_fly,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn stun(&self) -> u32 {
        self.stun
    }

    pub fn morale(&self) -> u32 {
        self.morale
    }

    pub fn time_units(&self) -> u32 {
        self.time_units
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_conscious(&self) -> bool {
        self.stun < self.health
    }

    pub fn is_panicked(&self) -> bool {
        self.morale == 0
    }

    /// Alive, conscious and not panicked.
    pub fn can_take_orders(&self) -> bool {
        self.is_alive() && self.is_conscious() && !self.is_panicked()
    }

    /// Start-of-turn upkeep: refill time units, shake off one point of stun and
    /// recover some morale.
    pub fn on_start_turn(&mut self, morale_recovery: u32) {
        if !self.is_alive() {
            return;
        }
        self.time_units = self.stats.max_time_units;
        self.stun = self.stun.saturating_sub(1);
        self.morale = self.morale.saturating_add(morale_recovery).min(MAX_MORALE);
    }

    /// Deduct `cost` time units if available.
    pub fn spend_time_units(&mut self, cost: u32) -> bool {
        if self.time_units < cost {
            return false;
        }
        self.time_units -= cost;
        true
    }

    /// Returns `true` if this damage killed the combatant.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(amount);
        if !self.is_alive() {
            self.time_units = 0;
        }
        was_alive && !self.is_alive()
    }

    pub fn add_stun(&mut self, amount: u32) {
        self.stun = self.stun.saturating_add(amount);
    }

    pub fn lower_morale(&mut self, amount: u32) {
        self.morale = self.morale.saturating_sub(amount);
    }
}

/// Id-keyed read access to combatants.
pub trait Roster {
    fn combatant(&self, id: CombatantId) -> Option<&Combatant>;
}

pub trait RosterMut: Roster {
    fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant>;
}

/// Arena of every combatant in a battle, indexed by [`CombatantId`].
#[derive(Debug, Clone, Default)]
pub struct Combatants {
    items: Vec<Combatant>,
}

impl Combatants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> CombatantId {
        CombatantId(self.items.len() as u32)
    }

    /// Append a combatant. Its id must be [`Combatants::next_id`].
    pub fn insert(&mut self, combatant: Combatant) -> Result<CombatantId, BattleError> {
        let id = combatant.id();
        if id != self.next_id() {
            return Err(BattleError::invalid(format!(
                "expected {}, got {id}",
                self.next_id()
            )));
        }
        self.items.push(combatant);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> + '_ {
        self.items.iter()
    }
}

impl Roster for Combatants {
    fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.items.get(id.index())
    }
}

impl RosterMut for Combatants {
    fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.items.get_mut(id.index())
    }
}
