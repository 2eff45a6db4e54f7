use xeno_core::Voxel;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One node of a path: where the mover stands and the cumulative time-unit
/// cost of getting there (0 at the start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveData {
    pub voxel: Voxel,
    pub cost: u32,
}

impl MoveData {
    pub const fn new(voxel: Voxel, cost: u32) -> Self {
        Self { voxel, cost }
    }
}

/// Ordered moves from start (first) to destination (last), both inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Path {
    pub steps: Vec<MoveData>,
}

impl Path {
    pub fn new(steps: Vec<MoveData>) -> Self {
        Self { steps }
    }

    pub fn start(&self) -> Option<Voxel> {
        self.steps.first().map(|s| s.voxel)
    }

    pub fn destination(&self) -> Option<Voxel> {
        self.steps.last().map(|s| s.voxel)
    }

    pub fn total_cost(&self) -> u32 {
        self.steps.last().map(|s| s.cost).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn voxels(&self) -> impl Iterator<Item = Voxel> + '_ {
        self.steps.iter().map(|s| s.voxel)
    }

    pub fn contains(&self, voxel: Voxel) -> bool {
        self.voxels().any(|v| v == voxel)
    }

    /// Cost of the move that enters `steps[index]`.
    pub fn step_cost(&self, index: usize) -> Option<u32> {
        let current = self.steps.get(index)?;
        let previous = self.steps.get(index.checked_sub(1)?)?;
        Some(current.cost.saturating_sub(previous.cost))
    }
}
