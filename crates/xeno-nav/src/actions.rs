use xeno_core::Voxel;

use crate::{NavWorldMut, Path, TerrainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowStatus {
    /// Steps remain; call again with more time.
    Moving,
    Arrived,
    /// The next voxel cannot be entered any more (usually someone stepped in).
    Blocked { at: Voxel },
    /// Not enough time units left for the next step.
    Exhausted,
}

/// Walks an agent along a planned [`Path`] over several ticks.
///
/// One step is taken per `seconds_per_step` of accumulated time. Each step is
/// charged the path's edge cost and re-validated against live occupancy.
#[derive(Debug, Clone)]
pub struct PathFollower {
    path: Path,
    next_index: usize,
    seconds_per_step: f32,
    elapsed: f32,
}

impl PathFollower {
    pub fn new(path: Path, seconds_per_step: f32) -> Self {
        Self {
            path,
            next_index: 1,
            seconds_per_step: seconds_per_step.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn destination(&self) -> Option<Voxel> {
        self.path.destination()
    }

    pub fn is_finished(&self) -> bool {
        self.next_index >= self.path.len()
    }

    pub fn tick<W>(&mut self, dt_seconds: f32, agent: W::Agent, world: &mut W) -> FollowStatus
    where
        W: NavWorldMut + ?Sized,
    {
        if self.is_finished() {
            return FollowStatus::Arrived;
        }

        self.elapsed += dt_seconds.max(0.0);
        while !self.is_finished() && self.elapsed >= self.seconds_per_step {
            let target = self.path.steps[self.next_index].voxel;
            let cost = self.path.step_cost(self.next_index).unwrap_or(0);

            if world.movement_budget(agent) < cost {
                self.elapsed = 0.0;
                return FollowStatus::Exhausted;
            }

            match world.step_agent(agent, target) {
                Ok(()) => {}
                Err(TerrainError::Occupied { voxel, .. }) | Err(TerrainError::Impassable(voxel)) => {
                    return FollowStatus::Blocked { at: voxel };
                }
                Err(_) => return FollowStatus::Blocked { at: target },
            }

            world.consume_movement(agent, cost);
            self.elapsed -= self.seconds_per_step;
            self.next_index += 1;
        }

        if self.is_finished() {
            FollowStatus::Arrived
        } else {
            FollowStatus::Moving
        }
    }
}
