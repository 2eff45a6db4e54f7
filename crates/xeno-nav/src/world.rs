use xeno_core::{Voxel, WorldMut, WorldView};

use crate::{Mobility, Path, Terrain, TerrainError};

pub trait NavWorldView: WorldView {
    fn position(&self, agent: Self::Agent) -> Option<Voxel>;
    fn mobility(&self, agent: Self::Agent) -> Mobility;
    /// Time units the agent can still spend on movement this turn.
    fn movement_budget(&self, agent: Self::Agent) -> u32;
    fn terrain(&self) -> &dyn Terrain;
}

pub trait NavWorldMut: WorldMut + NavWorldView {
    /// Plan from the agent's current position against live occupancy.
    fn plan_path(&mut self, agent: Self::Agent, dest: Voxel) -> Option<Path>;

    /// Move the agent one voxel, keeping terrain occupancy in sync.
    fn step_agent(&mut self, agent: Self::Agent, to: Voxel) -> Result<(), TerrainError>;

    fn consume_movement(&mut self, agent: Self::Agent, cost: u32);
}
