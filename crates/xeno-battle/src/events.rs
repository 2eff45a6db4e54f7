#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use xeno_core::{CombatantId, TeamId, Voxel};

/// What happened on the battlescape. Presentation layers subscribe through an
/// [`EventSink`]; the core never waits on them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum BattleEvent {
    TurnStarted {
        turn: u32,
    },
    TeamTurnStarted {
        turn: u32,
        team: TeamId,
    },
    /// Passed over because it cannot take orders.
    CombatantSkipped {
        combatant: CombatantId,
    },
    CombatantFinished {
        combatant: CombatantId,
    },
    Moved {
        combatant: CombatantId,
        from: Voxel,
        to: Voxel,
    },
    PathBlocked {
        combatant: CombatantId,
        at: Voxel,
    },
    Attacked {
        attacker: CombatantId,
        target: CombatantId,
        hit: bool,
    },
    Killed {
        combatant: CombatantId,
    },
    TeamTurnFinished {
        turn: u32,
        team: TeamId,
    },
    TurnFinished {
        turn: u32,
    },
    BattleOver {
        winner: Option<TeamId>,
    },
}

pub trait EventSink {
    fn emit(&mut self, event: BattleEvent);
}

#[derive(Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&mut self, _event: BattleEvent) {}
}

#[derive(Debug, Default)]
pub struct VecEventSink {
    pub events: Vec<BattleEvent>,
}

impl EventSink for VecEventSink {
    fn emit(&mut self, event: BattleEvent) {
        self.events.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn emit(&mut self, event: BattleEvent) {
        (**self).emit(event);
    }
}
