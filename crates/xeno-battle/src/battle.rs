use xeno_core::{CombatantId, TeamId, Voxel, WorldMut, WorldView};
use xeno_nav::{
    Mobility, NavWorldMut, NavWorldView, Path, Pathfinder, Terrain, TerrainError, TerrainMut,
    VoxelTerrain,
};

use crate::{
    BattleConfig, BattleError, BattleEvent, BattleMut, BattleView, Combatant, CombatantStats,
    Combatants, EventSink, NullEventSink, Roster, RosterMut, Team,
};

/// Root owner of a battle's state.
///
/// Terrain, combatants and teams live here; everything else refers to them
/// by [`CombatantId`] / [`TeamId`].
pub struct Battle {
    terrain: VoxelTerrain,
    combatants: Combatants,
    teams: Vec<Team>,
    pathfinder: Pathfinder,
    config: BattleConfig,
    events: Box<dyn EventSink>,
}

impl Battle {
    pub fn new(terrain: VoxelTerrain, config: BattleConfig) -> Self {
        Self {
            terrain,
            combatants: Combatants::new(),
            teams: Vec::new(),
            pathfinder: Pathfinder::new(config.pathfinder),
            config,
            events: Box::new(NullEventSink),
        }
    }

    pub fn with_event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.events = Box::new(sink);
        self
    }

    /// Swap the event sink, returning the old one.
    pub fn replace_event_sink(&mut self, sink: Box<dyn EventSink>) -> Box<dyn EventSink> {
        std::mem::replace(&mut self.events, sink)
    }

    pub fn terrain(&self) -> &VoxelTerrain {
        &self.terrain
    }

    pub fn combatants(&self) -> &Combatants {
        &self.combatants
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn add_team(&mut self, name: impl Into<String>) -> Result<TeamId, BattleError> {
        let id = TeamId(self.teams.len() as u32);
        self.teams.push(Team::new(id, name)?);
        Ok(id)
    }

    /// Create a combatant and stand it on `position`.
    pub fn spawn_combatant(
        &mut self,
        team: TeamId,
        name: impl Into<String>,
        position: Voxel,
        stats: CombatantStats,
    ) -> Result<CombatantId, BattleError> {
        if self.teams.get(team.index()).is_none() {
            return Err(BattleError::UnknownTeam(team));
        }

        let id = self.combatants.next_id();
        let combatant = Combatant::new(id, name, team, position, stats)?;

        if !self.terrain.is_passable(position, stats.can_fly) {
            return Err(BattleError::invalid(format!(
                "cannot spawn {} on impassable voxel {position}",
                combatant.name()
            )));
        }
        if let Some(by) = self.terrain.occupant_at(position) {
            return Err(BattleError::invalid(format!(
                "cannot spawn {} on {position}, already held by {by}",
                combatant.name()
            )));
        }
        self.terrain.place_combatant(id, position)?;
        self.combatants.insert(combatant)?;

        if let Some(t) = self.teams.get_mut(team.index()) {
            t.add(id);
        }
        tracing::debug!(combatant = %id, %team, %position, "spawned");
        Ok(id)
    }

    /// Combatants of `team` that can still take orders.
    pub fn survivors(&self, team: TeamId) -> usize {
        self.teams
            .get(team.index())
            .map_or(0, |t| t.active_count(&self.combatants))
    }
}

impl WorldView for Battle {
    type Agent = CombatantId;
}

impl WorldMut for Battle {}

impl Roster for Battle {
    fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.combatant(id)
    }
}

impl RosterMut for Battle {
    fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.combatant_mut(id)
    }
}

impl NavWorldView for Battle {
    fn position(&self, agent: CombatantId) -> Option<Voxel> {
        self.combatants.combatant(agent).map(|c| c.position())
    }

    fn mobility(&self, agent: CombatantId) -> Mobility {
        self.combatants
            .combatant(agent)
            .map(|c| c.mobility())
            .unwrap_or_default()
    }

    fn movement_budget(&self, agent: CombatantId) -> u32 {
        self.combatants
            .combatant(agent)
            .map_or(0, |c| c.time_units())
    }

    fn terrain(&self) -> &dyn Terrain {
        &self.terrain
    }
}

impl NavWorldMut for Battle {
    fn plan_path(&mut self, agent: CombatantId, dest: Voxel) -> Option<Path> {
        let c = self.combatants.combatant(agent)?;
        self.pathfinder
            .find_path(&self.terrain, c.position(), dest, c.mobility())
    }

    fn step_agent(&mut self, agent: CombatantId, to: Voxel) -> Result<(), TerrainError> {
        let Some(c) = self.combatants.combatant(agent) else {
            return Err(TerrainError::NotOccupant {
                voxel: to,
                combatant: agent,
            });
        };
        let from = c.position();
        if !from.is_adjacent(to) || !self.terrain.is_passable(to, c.mobility().can_fly) {
            return Err(TerrainError::Impassable(to));
        }

        self.terrain.move_combatant(agent, from, to)?;
        if let Some(c) = self.combatants.combatant_mut(agent) {
            c.set_position(to);
        }
        self.emit(BattleEvent::Moved {
            combatant: agent,
            from,
            to,
        });
        Ok(())
    }

    fn consume_movement(&mut self, agent: CombatantId, cost: u32) {
        if let Some(c) = self.combatants.combatant_mut(agent) {
            let cost = cost.min(c.time_units());
            c.spend_time_units(cost);
        }
    }
}

impl BattleView for Battle {
    fn config(&self) -> &BattleConfig {
        &self.config
    }

    fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(id.index())
    }
}

impl BattleMut for Battle {
    fn start_team_turn(&mut self, team: TeamId) -> Result<(), BattleError> {
        let t = self
            .teams
            .get(team.index())
            .ok_or(BattleError::UnknownTeam(team))?;
        t.on_start_turn(&mut self.combatants, self.config.combat.morale_recovery_per_turn);
        Ok(())
    }

    fn wound(&mut self, target: CombatantId, damage: u32) -> Result<bool, BattleError> {
        let c = self
            .combatants
            .combatant_mut(target)
            .ok_or(BattleError::UnknownCombatant(target))?;
        let killed = c.take_damage(damage);
        let (team, at) = (c.team(), c.position());
        tracing::debug!(combatant = %target, damage, health = c.health(), "wounded");
        if !killed {
            return Ok(false);
        }

        self.terrain.remove_combatant(target, at)?;
        self.emit(BattleEvent::Killed { combatant: target });

        let loss = self.config.combat.morale_loss_on_ally_death;
        if let Some(t) = self.teams.get(team.index()) {
            for ally in t.roster().iter().filter(|id| **id != target) {
                if let Some(c) = self.combatants.combatant_mut(*ally) {
                    if c.is_alive() {
                        c.lower_morale(loss);
                    }
                }
            }
        }
        Ok(true)
    }

    fn emit(&mut self, event: BattleEvent) {
        tracing::debug!(?event, "battle event");
        self.events.emit(event);
    }
}
