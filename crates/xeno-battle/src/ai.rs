//! Per-combatant decision making.
//!
//! A [`CombatantAi`] is driven by its team's scheduler one `update` at a time
//! and keeps focus for as long as it reports `true`.

use xeno_core::{
    check_probability, roll_dice, CombatantId, DeterministicRng, Direction, SplitMix64,
    TeamId, TickContext, Voxel,
};
use xeno_nav::{FollowStatus, Path, PathFollower};

use crate::{BattleError, BattleEvent, BattleMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which side is acting and who it is fighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnContext {
    pub team: TeamId,
    pub enemy: TeamId,
}

pub trait CombatantAi<W>: 'static
where
    W: BattleMut + 'static,
{
    /// Called once when the owning team's turn begins.
    fn on_start_turn(&mut self, _me: CombatantId, _world: &W) {}

    /// Spend `ctx.dt_seconds` acting. Returns `true` while actions are still
    /// pending and `false` once the combatant is done for this turn.
    fn update(
        &mut self,
        ctx: &TickContext,
        turn: &TurnContext,
        me: CombatantId,
        world: &mut W,
    ) -> bool;
}

/// Does nothing; yields focus immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct HoldPositionAi;

impl<W> CombatantAi<W> for HoldPositionAi
where
    W: BattleMut + 'static,
{
    fn update(&mut self, _: &TickContext, _: &TurnContext, _: CombatantId, _: &mut W) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkStatus {
    Walking,
    Arrived,
    /// Out of time units, or no route left after re-planning.
    Stopped,
}

/// A path in progress plus the re-plan allowance for the current turn.
#[derive(Debug, Default)]
struct Walk {
    follower: Option<PathFollower>,
    replans: u32,
}

impl Walk {
    fn reset(&mut self) {
        self.follower = None;
        self.replans = 0;
    }

    fn is_active(&self) -> bool {
        self.follower.is_some()
    }

    fn begin<W: BattleMut>(&mut self, path: Path, world: &W) {
        let seconds_per_step = world.config().movement.seconds_per_step;
        self.follower = Some(PathFollower::new(path, seconds_per_step));
    }

    fn advance<W: BattleMut>(
        &mut self,
        ctx: &TickContext,
        me: CombatantId,
        world: &mut W,
    ) -> WalkStatus {
        let Some(follower) = self.follower.as_mut() else {
            return WalkStatus::Stopped;
        };

        match follower.tick(ctx.dt_seconds, me, world) {
            FollowStatus::Moving => WalkStatus::Walking,
            FollowStatus::Arrived => {
                self.follower = None;
                WalkStatus::Arrived
            }
            FollowStatus::Exhausted => {
                self.follower = None;
                WalkStatus::Stopped
            }
            FollowStatus::Blocked { at } => {
                let goal = follower.destination();
                self.follower = None;
                world.emit(BattleEvent::PathBlocked { combatant: me, at });

                let max_replans = world.config().movement.max_replans;
                if self.replans >= max_replans {
                    tracing::debug!(%me, %at, "route blocked, no re-plans left");
                    return WalkStatus::Stopped;
                }
                self.replans += 1;

                match goal.and_then(|goal| world.plan_path(me, goal)) {
                    Some(path) => {
                        tracing::debug!(%me, %at, replans = self.replans, "re-planned around blocker");
                        self.begin(path, world);
                        WalkStatus::Walking
                    }
                    None => {
                        tracing::debug!(%me, %at, "route blocked, no alternative");
                        WalkStatus::Stopped
                    }
                }
            }
        }
    }
}

/// Walk to a fixed voxel, resuming across turns until it is reached.
#[derive(Debug)]
pub struct MoveToAi {
    goal: Voxel,
    walk: Walk,
    done: bool,
}

impl MoveToAi {
    pub fn new(goal: Voxel) -> Self {
        Self {
            goal,
            walk: Walk::default(),
            done: false,
        }
    }

    pub fn goal(&self) -> Voxel {
        self.goal
    }
}

impl<W> CombatantAi<W> for MoveToAi
where
    W: BattleMut + 'static,
{
    fn on_start_turn(&mut self, _me: CombatantId, _world: &W) {
        self.walk.reset();
        self.done = false;
    }

    fn update(
        &mut self,
        ctx: &TickContext,
        _turn: &TurnContext,
        me: CombatantId,
        world: &mut W,
    ) -> bool {
        if self.done || world.position(me) == Some(self.goal) {
            return false;
        }

        if !self.walk.is_active() {
            match world.plan_path(me, self.goal) {
                Some(path) => self.walk.begin(path, world),
                None => {
                    tracing::debug!(%me, goal = %self.goal, "no path to goal");
                    self.done = true;
                    return false;
                }
            }
        }

        match self.walk.advance(ctx, me, world) {
            WalkStatus::Walking => true,
            WalkStatus::Arrived | WalkStatus::Stopped => {
                self.done = true;
                false
            }
        }
    }
}

/// Close on the nearest enemy that can still fight, then attack it while
/// time units last.
#[derive(Debug)]
pub struct AdvanceAi<R> {
    accuracy: f32,
    damage: u32,
    rng: R,
    target: Option<CombatantId>,
    walk: Walk,
    done: bool,
}

impl<R> AdvanceAi<R>
where
    R: DeterministicRng,
{
    pub fn new(accuracy: f32, damage: u32, rng: R) -> Result<Self, BattleError> {
        check_probability(accuracy)?;
        Ok(Self {
            accuracy,
            damage,
            rng,
            target: None,
            walk: Walk::default(),
            done: false,
        })
    }

    pub fn target(&self) -> Option<CombatantId> {
        self.target
    }

    fn pick_target<W: BattleMut>(
        &self,
        turn: &TurnContext,
        me: CombatantId,
        world: &W,
    ) -> Option<CombatantId> {
        let is_capable = |id: CombatantId| {
            world
                .combatant(id)
                .is_some_and(|c| c.can_take_orders())
        };
        if let Some(current) = self.target.filter(|id| is_capable(*id)) {
            return Some(current);
        }

        let origin = world.position(me)?;
        let enemies = world.team(turn.enemy)?;
        enemies
            .roster()
            .iter()
            .copied()
            .filter(|id| is_capable(*id))
            .filter_map(|id| world.position(id).map(|at| (id, at)))
            .min_by_key(|(_, at)| origin.chebyshev_distance(*at))
            .map(|(id, _)| id)
    }

    /// Route to the closest reachable free voxel next to `target_at`.
    fn plan_approach<W: BattleMut>(
        &self,
        me: CombatantId,
        origin: Voxel,
        target_at: Voxel,
        world: &mut W,
    ) -> Option<Path> {
        let mobility = world.mobility(me);
        let mut spots: Vec<Voxel> = Direction::HORIZONTAL
            .iter()
            .map(|dir| target_at.step(*dir))
            .filter(|spot| {
                let terrain = world.terrain();
                terrain.is_passable(*spot, mobility.can_fly)
                    && terrain.occupant_at(*spot).map_or(true, |id| id == me)
            })
            .collect();
        spots.sort_by_key(|spot| origin.chebyshev_distance(*spot));

        spots.into_iter().find_map(|spot| world.plan_path(me, spot))
    }

    fn attack<W: BattleMut>(&mut self, me: CombatantId, target: CombatantId, world: &mut W) -> bool {
        let cost = world.config().combat.attack_cost;
        let paid = world
            .combatant_mut(me)
            .is_some_and(|c| c.spend_time_units(cost));
        if !paid {
            return false;
        }

        let hit = matches!(roll_dice(&mut self.rng, self.accuracy), Ok(true));
        world.emit(BattleEvent::Attacked {
            attacker: me,
            target,
            hit,
        });
        if hit {
            if let Err(err) = world.wound(target, self.damage) {
                tracing::warn!(%me, %target, %err, "failed to apply damage");
            }
        }
        true
    }
}

impl<W, R> CombatantAi<W> for AdvanceAi<R>
where
    W: BattleMut + 'static,
    R: DeterministicRng + 'static,
{
    fn on_start_turn(&mut self, _me: CombatantId, _world: &W) {
        self.walk.reset();
        self.done = false;
    }

    fn update(
        &mut self,
        ctx: &TickContext,
        turn: &TurnContext,
        me: CombatantId,
        world: &mut W,
    ) -> bool {
        if self.done {
            return false;
        }

        self.target = self.pick_target(turn, me, world);
        let (Some(target), Some(origin)) = (self.target, world.position(me)) else {
            self.done = true;
            return false;
        };
        let Some(target_at) = world.position(target) else {
            self.done = true;
            return false;
        };

        if origin.is_adjacent(target_at) {
            self.walk.reset();
            if self.attack(me, target, world) {
                return true;
            }
            self.done = true;
            return false;
        }

        if !self.walk.is_active() {
            match self.plan_approach(me, origin, target_at, world) {
                Some(path) => self.walk.begin(path, world),
                None => {
                    tracing::debug!(%me, %target, "no route to target");
                    self.done = true;
                    return false;
                }
            }
        }

        match self.walk.advance(ctx, me, world) {
            WalkStatus::Walking | WalkStatus::Arrived => true,
            WalkStatus::Stopped => {
                self.done = true;
                false
            }
        }
    }
}

/// Data-driven choice of combatant AI.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum AiSpec {
    Hold,
    MoveTo { goal: Voxel },
    Advance { accuracy: f32, damage: u32 },
}

impl AiSpec {
    /// `rng` seeds strategies that roll dice.
    pub fn build<W>(&self, rng: SplitMix64) -> Result<Box<dyn CombatantAi<W>>, BattleError>
    where
        W: BattleMut + 'static,
    {
        let ai: Box<dyn CombatantAi<W>> = match *self {
            AiSpec::Hold => Box::new(HoldPositionAi),
            AiSpec::MoveTo { goal } => Box::new(MoveToAi::new(goal)),
            AiSpec::Advance { accuracy, damage } => {
                Box::new(AdvanceAi::new(accuracy, damage, rng)?)
            }
        };
        Ok(ai)
    }
}
