use xeno_core::{CombatantId, TeamId};

use crate::{BattleError, Roster, RosterMut};

/// A faction's roster. Combatants themselves live in the battle's arena; the
/// team lists them by id in a fixed acting order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    id: TeamId,
    name: String,
    roster: Vec<CombatantId>,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>) -> Result<Self, BattleError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BattleError::invalid("team name must not be empty"));
        }
        Ok(Self {
            id,
            name,
            roster: Vec::new(),
        })
    }

    pub fn id(&self) -> TeamId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roster(&self) -> &[CombatantId] {
        &self.roster
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn add(&mut self, id: CombatantId) {
        if !self.roster.contains(&id) {
            self.roster.push(id);
        }
    }

    /// Start-of-turn upkeep for every member.
    pub fn on_start_turn<R>(&self, roster: &mut R, morale_recovery: u32)
    where
        R: RosterMut + ?Sized,
    {
        for id in &self.roster {
            if let Some(c) = roster.combatant_mut(*id) {
                c.on_start_turn(morale_recovery);
            }
        }
    }

    /// True when nobody on the team can take orders. An empty team is defeated.
    pub fn is_defeated<R>(&self, roster: &R) -> bool
    where
        R: Roster + ?Sized,
    {
        !self
            .roster
            .iter()
            .filter_map(|id| roster.combatant(*id))
            .any(|c| c.can_take_orders())
    }

    pub fn active_count<R>(&self, roster: &R) -> usize
    where
        R: Roster + ?Sized,
    {
        self.roster
            .iter()
            .filter_map(|id| roster.combatant(*id))
            .filter(|c| c.can_take_orders())
            .count()
    }
}
