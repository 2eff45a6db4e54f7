use xeno_core::{TeamId, TickContext};

use crate::{BattleError, BattleEvent, BattleMut, TeamAi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnProgress {
    /// `team` still has focus.
    Acting { team: TeamId },
    /// Every team has acted once in game turn `turn`.
    TurnComplete { turn: u32 },
    /// At most one team can still fight. `None` when nobody can.
    BattleOver { winner: Option<TeamId> },
}

/// Drives whole game turns: upkeep for every team, then each team's
/// [`TeamAi`] in fixed order until it reports the roster exhausted.
pub struct TurnController<W>
where
    W: BattleMut + 'static,
{
    teams: Vec<TeamAi<W>>,
    active: usize,
    turn: u32,
    in_turn: bool,
    updates: u32,
    outcome: Option<Option<TeamId>>,
}

impl<W> TurnController<W>
where
    W: BattleMut + 'static,
{
    pub fn new(teams: Vec<TeamAi<W>>) -> Result<Self, BattleError> {
        if teams.len() < 2 {
            return Err(BattleError::invalid("a battle needs at least two teams"));
        }
        Ok(Self {
            teams,
            active: 0,
            turn: 0,
            in_turn: false,
            updates: 0,
            outcome: None,
        })
    }

    /// Game turns started so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn active_team(&self) -> Option<TeamId> {
        self.in_turn.then(|| self.teams[self.active].team())
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn winner(&self) -> Option<TeamId> {
        self.outcome.flatten()
    }

    pub fn team_ai(&self, team: TeamId) -> Option<&TeamAi<W>> {
        self.teams.iter().find(|ai| ai.team() == team)
    }

    pub fn update(&mut self, ctx: &TickContext, world: &mut W) -> Result<TurnProgress, BattleError> {
        if let Some(winner) = self.outcome {
            return Ok(TurnProgress::BattleOver { winner });
        }

        if !self.in_turn {
            if let Some(progress) = self.check_over(world) {
                return Ok(progress);
            }
            self.begin_turn(world)?;
        }

        let team = self.teams[self.active].team();
        let busy = self.teams[self.active].update(ctx, world);
        self.updates += 1;

        if busy {
            let limit = world.config().turn.max_updates_per_team_turn;
            match limit {
                Some(max) if self.updates >= max => {
                    tracing::warn!(%team, updates = self.updates, "team turn cut short by update cap");
                }
                _ => return Ok(TurnProgress::Acting { team }),
            }
        }

        world.emit(BattleEvent::TeamTurnFinished {
            turn: self.turn,
            team,
        });
        tracing::info!(turn = self.turn, %team, updates = self.updates, "team turn finished");

        if let Some(progress) = self.check_over(world) {
            return Ok(progress);
        }

        self.active += 1;
        if self.active < self.teams.len() {
            self.begin_team(world)?;
            return Ok(TurnProgress::Acting {
                team: self.teams[self.active].team(),
            });
        }

        self.in_turn = false;
        world.emit(BattleEvent::TurnFinished { turn: self.turn });
        tracing::info!(turn = self.turn, "turn finished");
        Ok(TurnProgress::TurnComplete { turn: self.turn })
    }

    fn begin_turn(&mut self, world: &mut W) -> Result<(), BattleError> {
        self.turn += 1;
        world.emit(BattleEvent::TurnStarted { turn: self.turn });
        for ai in &self.teams {
            world.start_team_turn(ai.team())?;
        }
        self.active = 0;
        self.in_turn = true;
        self.begin_team(world)
    }

    fn begin_team(&mut self, world: &mut W) -> Result<(), BattleError> {
        self.updates = 0;
        let ai = &mut self.teams[self.active];
        world.emit(BattleEvent::TeamTurnStarted {
            turn: self.turn,
            team: ai.team(),
        });
        ai.on_start_team_turn(world)
    }

    fn check_over(&mut self, world: &mut W) -> Option<TurnProgress> {
        let mut standing = self.teams.iter().map(|ai| ai.team()).filter(|id| {
            world
                .team(*id)
                .is_some_and(|team| !team.is_defeated(&*world))
        });
        let first = standing.next();
        if standing.next().is_some() {
            return None;
        }

        self.outcome = Some(first);
        self.in_turn = false;
        world.emit(BattleEvent::BattleOver { winner: first });
        match first {
            Some(team) => tracing::info!(turn = self.turn, %team, "battle over"),
            None => tracing::info!(turn = self.turn, "battle over, no side left standing"),
        }
        Some(TurnProgress::BattleOver { winner: first })
    }
}
