use std::collections::BTreeMap;

use xeno_core::{CombatantId, TeamId, TickContext};

use crate::{BattleError, BattleEvent, BattleMut, CombatantAi, TurnContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    /// No team turn has started yet.
    #[default]
    Idle,
    Acting,
    /// Every combatant on the roster has had its go.
    Done,
}

/// Hands a team's turn to its combatants one at a time, in roster order.
///
/// The combatant under the cursor keeps focus for as long as its AI reports
/// pending actions. Combatants that cannot take orders are skipped within
/// the same `update` call, as are those without an assigned AI.
pub struct TeamAi<W>
where
    W: BattleMut + 'static,
{
    team: TeamId,
    enemy: TeamId,
    state: TurnState,
    cursor: usize,
    brains: BTreeMap<CombatantId, Box<dyn CombatantAi<W>>>,
}

impl<W> TeamAi<W>
where
    W: BattleMut + 'static,
{
    pub fn new(team: TeamId, enemy: TeamId) -> Result<Self, BattleError> {
        if team == enemy {
            return Err(BattleError::invalid("a team cannot be its own enemy"));
        }
        Ok(Self {
            team,
            enemy,
            state: TurnState::Idle,
            cursor: 0,
            brains: BTreeMap::new(),
        })
    }

    pub fn team(&self) -> TeamId {
        self.team
    }

    pub fn enemy(&self) -> TeamId {
        self.enemy
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the AI previously assigned to `id`, if any.
    pub fn assign(
        &mut self,
        id: CombatantId,
        ai: Box<dyn CombatantAi<W>>,
    ) -> Option<Box<dyn CombatantAi<W>>> {
        self.brains.insert(id, ai)
    }

    pub fn on_start_team_turn(&mut self, world: &mut W) -> Result<(), BattleError> {
        let team = world
            .team(self.team)
            .ok_or(BattleError::UnknownTeam(self.team))?;
        for id in team.roster() {
            if let Some(ai) = self.brains.get_mut(id) {
                ai.on_start_turn(*id, world);
            }
        }

        self.state = TurnState::Acting;
        self.cursor = 0;
        tracing::debug!(team = %self.team, "team turn started");
        Ok(())
    }

    /// Give `ctx.dt_seconds` to whoever has focus. Returns `false` once the
    /// roster is exhausted.
    pub fn update(&mut self, ctx: &TickContext, world: &mut W) -> bool {
        if self.state != TurnState::Acting {
            return false;
        }

        let turn = TurnContext {
            team: self.team,
            enemy: self.enemy,
        };

        loop {
            let current = world
                .team(self.team)
                .and_then(|t| t.roster().get(self.cursor))
                .copied();
            let Some(id) = current else {
                self.state = TurnState::Done;
                tracing::debug!(team = %self.team, "roster exhausted");
                return false;
            };

            let can_act = world.combatant(id).is_some_and(|c| c.can_take_orders());
            if !can_act {
                tracing::debug!(team = %self.team, combatant = %id, cursor = self.cursor, "skipping");
                world.emit(BattleEvent::CombatantSkipped { combatant: id });
                self.cursor += 1;
                continue;
            }

            let busy = match self.brains.get_mut(&id) {
                Some(ai) => ai.update(ctx, &turn, id, world),
                None => false,
            };
            if busy {
                return true;
            }

            tracing::debug!(team = %self.team, combatant = %id, cursor = self.cursor, "finished");
            world.emit(BattleEvent::CombatantFinished { combatant: id });
            self.cursor += 1;
        }
    }
}
