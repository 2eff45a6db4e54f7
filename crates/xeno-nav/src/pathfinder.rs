use xeno_core::{Direction, Extent, Voxel};

use crate::{MoveData, OpenList, Path, Terrain};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Movement capability of the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mobility {
    /// Flyers can hold position in open air and move vertically anywhere.
    pub can_fly: bool,
}

impl Mobility {
    pub const WALKER: Mobility = Mobility { can_fly: false };
    pub const FLYER: Mobility = Mobility { can_fly: true };
}

/// Time-unit costs of single moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathfinderConfig {
    pub orthogonal_cost: u32,
    pub diagonal_cost: u32,
    pub vertical_cost: u32,
    /// Give up after expanding this many nodes.
    pub max_expansions: Option<u32>,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            orthogonal_cost: 4,
            diagonal_cost: 6,
            vertical_cost: 8,
            max_expansions: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SearchNode {
    index: usize,
    g: u32,
}

/// A* over a [`Terrain`], with reusable scratch buffers.
///
/// Nothing is cached between calls: every search reads passability and
/// occupancy from the terrain as it is at call time.
#[derive(Debug, Default)]
pub struct Pathfinder {
    config: PathfinderConfig,
    open: OpenList<SearchNode>,
    g_score: Vec<u32>,
    came_from: Vec<Option<usize>>,
}

impl Pathfinder {
    pub fn new(config: PathfinderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    pub fn find_path<T>(
        &mut self,
        terrain: &T,
        start: Voxel,
        dest: Voxel,
        mobility: Mobility,
    ) -> Option<Path>
    where
        T: Terrain + ?Sized,
    {
        let mut path = Path::default();
        self.find_path_into(terrain, start, dest, mobility, &mut path)
            .then_some(path)
    }

    /// Fill `out` with the cheapest path from `start` to `dest`.
    ///
    /// Returns `false` (and leaves `out` empty) when no path exists, including
    /// when the destination is impassable or held by another combatant. The
    /// combatant standing on `start` is assumed to be the mover.
    pub fn find_path_into<T>(
        &mut self,
        terrain: &T,
        start: Voxel,
        dest: Voxel,
        mobility: Mobility,
        out: &mut Path,
    ) -> bool
    where
        T: Terrain + ?Sized,
    {
        out.clear();

        let extent = terrain.extent();
        let Some(start_idx) = extent.index(start) else {
            tracing::debug!(%start, "path search rejected: start outside terrain");
            return false;
        };
        if start == dest {
            out.steps.push(MoveData::new(start, 0));
            return true;
        }
        let Some(dest_idx) = extent.index(dest) else {
            tracing::debug!(%dest, "path search rejected: destination outside terrain");
            return false;
        };
        if !terrain.is_passable(dest, mobility.can_fly) {
            tracing::debug!(%dest, "path search rejected: destination impassable");
            return false;
        }
        if let Some(by) = terrain.occupant_at(dest) {
            tracing::debug!(%dest, %by, "path search rejected: destination occupied");
            return false;
        }

        self.reset(extent.volume());
        self.g_score[start_idx] = 0;
        self.open.add(
            self.heuristic(start, dest),
            SearchNode {
                index: start_idx,
                g: 0,
            },
        );

        let mut expansions: u32 = 0;
        while let Some((_, node)) = self.open.pop_lowest() {
            if node.g != self.g_score[node.index] {
                // Stale entry.
                continue;
            }
            if node.index == dest_idx {
                self.reconstruct(extent, dest_idx, out);
                tracing::trace!(%start, %dest, expansions, cost = node.g, "path found");
                return true;
            }

            expansions += 1;
            if self.config.max_expansions.is_some_and(|max| expansions > max) {
                tracing::debug!(%start, %dest, expansions, "path search hit expansion limit");
                self.open.clear();
                return false;
            }

            let current = extent.voxel_at(node.index);
            for dir in Direction::ALL {
                let Some(step_cost) = self.step_cost(terrain, current, dir, mobility) else {
                    continue;
                };
                let next = current.step(dir);
                let Some(next_idx) = extent.index(next) else {
                    continue;
                };

                let tentative_g = node.g.saturating_add(step_cost);
                if tentative_g >= self.g_score[next_idx] {
                    continue;
                }

                self.came_from[next_idx] = Some(node.index);
                self.g_score[next_idx] = tentative_g;
                let f = tentative_g.saturating_add(self.heuristic(next, dest));
                self.open.add(
                    f,
                    SearchNode {
                        index: next_idx,
                        g: tentative_g,
                    },
                );
            }
        }

        tracing::debug!(%start, %dest, expansions, "path search exhausted frontier");
        false
    }

    /// Cost of moving one step from `from` in `dir`, or `None` if the move is
    /// not legal right now.
    fn step_cost<T>(
        &self,
        terrain: &T,
        from: Voxel,
        dir: Direction,
        mobility: Mobility,
    ) -> Option<u32>
    where
        T: Terrain + ?Sized,
    {
        let to = from.step(dir);
        if !terrain.is_passable(to, mobility.can_fly) || terrain.occupant_at(to).is_some() {
            return None;
        }

        match dir {
            Direction::Up => (mobility.can_fly || terrain.is_climbable(from))
                .then_some(self.config.vertical_cost),
            Direction::Down => (mobility.can_fly || terrain.is_climbable(to))
                .then_some(self.config.vertical_cost),
            d if d.is_diagonal() => {
                // No cutting corners past walls.
                let (dx, dy, _) = d.offset();
                let side_a = from.offset(dx, 0, 0);
                let side_b = from.offset(0, dy, 0);
                (terrain.is_passable(side_a, mobility.can_fly)
                    && terrain.is_passable(side_b, mobility.can_fly))
                .then_some(self.config.diagonal_cost)
            }
            _ => Some(self.config.orthogonal_cost),
        }
    }

    /// Lower bound on the remaining cost; never overestimates for any config.
    ///
    /// Octile distance on the level when diagonals cost at least as much as
    /// orthogonal steps. When diagonals are cheaper, every horizontal step
    /// moves at most one voxel along the longer axis, so `hi` steps at the
    /// diagonal price bound it instead. Vertical distance is added on top.
    fn heuristic(&self, a: Voxel, b: Voxel) -> u32 {
        let dx = a.x.abs_diff(b.x);
        let dy = a.y.abs_diff(b.y);
        let dz = a.z.abs_diff(b.z);
        let ortho = self.config.orthogonal_cost;
        let diag = self.config.diagonal_cost.min(ortho.saturating_mul(2));
        let (lo, hi) = (dx.min(dy), dx.max(dy));
        let level = if diag >= ortho {
            diag.saturating_mul(lo)
                .saturating_add(ortho.saturating_mul(hi - lo))
        } else {
            diag.saturating_mul(hi)
        };
        level.saturating_add(self.config.vertical_cost.saturating_mul(dz))
    }

    fn reset(&mut self, volume: usize) {
        self.open.clear();
        self.g_score.clear();
        self.g_score.resize(volume, u32::MAX);
        self.came_from.clear();
        self.came_from.resize(volume, None);
    }

    fn reconstruct(&self, extent: Extent, dest_idx: usize, out: &mut Path) {
        let mut current = dest_idx;
        loop {
            out.steps
                .push(MoveData::new(extent.voxel_at(current), self.g_score[current]));
            match self.came_from[current] {
                Some(prev) => current = prev,
                None => break,
            }
        }
        out.steps.reverse();
    }
}
