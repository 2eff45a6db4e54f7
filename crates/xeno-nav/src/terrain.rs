use thiserror::Error;
use xeno_core::{CombatantId, Extent, Voxel};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerrainError {
    #[error("terrain extent must be non-empty")]
    EmptyExtent,
    #[error("voxel {0} is outside the terrain")]
    OutOfBounds(Voxel),
    #[error("voxel {0} cannot be entered")]
    Impassable(Voxel),
    #[error("voxel {voxel} is occupied by {by}")]
    Occupied { voxel: Voxel, by: CombatantId },
    #[error("{combatant} does not stand on {voxel}")]
    NotOccupant { voxel: Voxel, combatant: CombatantId },
    #[error("terrain levels must all have the same number of rows and row width")]
    RaggedLevels,
    #[error("unknown terrain tile {0:?}")]
    UnknownTile(char),
    #[error("terrain data has {actual} cells, extent needs {expected}")]
    DataLength { expected: usize, actual: usize },
}

/// What a voxel is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VoxelKind {
    /// Open space; only flyers can hold position here.
    #[default]
    Air,
    Floor,
    /// Floor that connects to the level above.
    Stairs,
    Solid,
}

impl VoxelKind {
    pub fn from_tile(tile: char) -> Result<Self, TerrainError> {
        match tile {
            '_' => Ok(VoxelKind::Air),
            '.' => Ok(VoxelKind::Floor),
            'H' => Ok(VoxelKind::Stairs),
            '#' => Ok(VoxelKind::Solid),
            other => Err(TerrainError::UnknownTile(other)),
        }
    }

    pub fn tile(self) -> char {
        match self {
            VoxelKind::Air => '_',
            VoxelKind::Floor => '.',
            VoxelKind::Stairs => 'H',
            VoxelKind::Solid => '#',
        }
    }

    pub fn is_passable(self, can_fly: bool) -> bool {
        match self {
            VoxelKind::Floor | VoxelKind::Stairs => true,
            VoxelKind::Air => can_fly,
            VoxelKind::Solid => false,
        }
    }
}

/// Query surface the pathfinder searches over.
///
/// Implementations must answer from live state: occupancy changes between
/// calls are expected and must be visible to the next query.
pub trait Terrain {
    fn extent(&self) -> Extent;

    fn is_passable(&self, voxel: Voxel, can_fly: bool) -> bool;

    /// Walkers may climb up out of, and step down into, a climbable voxel.
    fn is_climbable(&self, voxel: Voxel) -> bool;

    fn occupant_at(&self, voxel: Voxel) -> Option<CombatantId>;
}

pub trait TerrainMut: Terrain {
    fn place_combatant(&mut self, id: CombatantId, at: Voxel) -> Result<(), TerrainError>;

    fn remove_combatant(&mut self, id: CombatantId, at: Voxel) -> Result<(), TerrainError>;

    fn move_combatant(
        &mut self,
        id: CombatantId,
        from: Voxel,
        to: Voxel,
    ) -> Result<(), TerrainError>;
}

/// Dense voxel grid with per-voxel occupancy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "TerrainRepr", into = "TerrainRepr")
)]
pub struct VoxelTerrain {
    extent: Extent,
    kinds: Vec<VoxelKind>,
    occupants: Vec<Option<CombatantId>>,
}

impl VoxelTerrain {
    /// All-air terrain of the given size.
    pub fn new(extent: Extent) -> Result<Self, TerrainError> {
        if extent.is_empty() {
            return Err(TerrainError::EmptyExtent);
        }
        Ok(Self {
            extent,
            kinds: vec![VoxelKind::Air; extent.volume()],
            occupants: vec![None; extent.volume()],
        })
    }

    /// Parse levels drawn as rows of tiles: `.` floor, `#` solid, `H` stairs,
    /// `_` air. Levels are listed bottom-up, rows north to south.
    pub fn from_ascii<L, R>(levels: &[L]) -> Result<Self, TerrainError>
    where
        L: AsRef<[R]>,
        R: AsRef<str>,
    {
        let height = levels.len();
        let depth = levels.first().map(|l| l.as_ref().len()).unwrap_or(0);
        let width = levels
            .first()
            .and_then(|l| l.as_ref().first())
            .map(|row| row.as_ref().chars().count())
            .unwrap_or(0);

        let extent = Extent::new(width as u32, depth as u32, height as u32);
        let mut terrain = Self::new(extent)?;

        for (z, level) in levels.iter().enumerate() {
            let rows = level.as_ref();
            if rows.len() != depth {
                return Err(TerrainError::RaggedLevels);
            }
            for (y, row) in rows.iter().enumerate() {
                let row = row.as_ref();
                if row.chars().count() != width {
                    return Err(TerrainError::RaggedLevels);
                }
                for (x, tile) in row.chars().enumerate() {
                    let kind = VoxelKind::from_tile(tile)?;
                    terrain.set_kind(Voxel::new(x as i32, y as i32, z as i32), kind)?;
                }
            }
        }

        Ok(terrain)
    }

    pub fn kind(&self, voxel: Voxel) -> Option<VoxelKind> {
        self.extent.index(voxel).map(|i| self.kinds[i])
    }

    pub fn set_kind(&mut self, voxel: Voxel, kind: VoxelKind) -> Result<(), TerrainError> {
        let idx = self.index(voxel)?;
        self.kinds[idx] = kind;
        Ok(())
    }

    /// Render one level back into tile rows.
    pub fn level_rows(&self, z: i32) -> Vec<String> {
        (0..self.extent.depth as i32)
            .map(|y| {
                (0..self.extent.width as i32)
                    .map(|x| {
                        self.kind(Voxel::new(x, y, z))
                            .map(VoxelKind::tile)
                            .unwrap_or(' ')
                    })
                    .collect()
            })
            .collect()
    }

    fn index(&self, voxel: Voxel) -> Result<usize, TerrainError> {
        self.extent
            .index(voxel)
            .ok_or(TerrainError::OutOfBounds(voxel))
    }

    fn check_enterable(&self, id: CombatantId, voxel: Voxel) -> Result<usize, TerrainError> {
        let idx = self.index(voxel)?;
        if self.kinds[idx] == VoxelKind::Solid {
            return Err(TerrainError::Impassable(voxel));
        }
        match self.occupants[idx] {
            Some(by) if by != id => Err(TerrainError::Occupied { voxel, by }),
            _ => Ok(idx),
        }
    }
}

impl Terrain for VoxelTerrain {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn is_passable(&self, voxel: Voxel, can_fly: bool) -> bool {
        self.kind(voxel)
            .map(|k| k.is_passable(can_fly))
            .unwrap_or(false)
    }

    fn is_climbable(&self, voxel: Voxel) -> bool {
        self.kind(voxel) == Some(VoxelKind::Stairs)
    }

    fn occupant_at(&self, voxel: Voxel) -> Option<CombatantId> {
        self.extent
            .index(voxel)
            .and_then(|idx| self.occupants[idx])
    }
}

impl TerrainMut for VoxelTerrain {
    fn place_combatant(&mut self, id: CombatantId, at: Voxel) -> Result<(), TerrainError> {
        let idx = self.check_enterable(id, at)?;
        self.occupants[idx] = Some(id);
        Ok(())
    }

    fn remove_combatant(&mut self, id: CombatantId, at: Voxel) -> Result<(), TerrainError> {
        let idx = self.index(at)?;
        if self.occupants[idx] != Some(id) {
            return Err(TerrainError::NotOccupant {
                voxel: at,
                combatant: id,
            });
        }
        self.occupants[idx] = None;
        Ok(())
    }

    fn move_combatant(
        &mut self,
        id: CombatantId,
        from: Voxel,
        to: Voxel,
    ) -> Result<(), TerrainError> {
        let from_idx = self.index(from)?;
        if self.occupants[from_idx] != Some(id) {
            return Err(TerrainError::NotOccupant {
                voxel: from,
                combatant: id,
            });
        }
        let to_idx = self.check_enterable(id, to)?;
        self.occupants[from_idx] = None;
        self.occupants[to_idx] = Some(id);
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct TerrainRepr {
    extent: Extent,
    kinds: Vec<VoxelKind>,
    #[serde(default)]
    occupants: Vec<Option<CombatantId>>,
}

#[cfg(feature = "serde")]
impl From<VoxelTerrain> for TerrainRepr {
    fn from(t: VoxelTerrain) -> Self {
        Self {
            extent: t.extent,
            kinds: t.kinds,
            occupants: t.occupants,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<TerrainRepr> for VoxelTerrain {
    type Error = TerrainError;

    fn try_from(repr: TerrainRepr) -> Result<Self, Self::Error> {
        let mut terrain = VoxelTerrain::new(repr.extent)?;
        let expected = repr.extent.volume();
        if repr.kinds.len() != expected {
            return Err(TerrainError::DataLength {
                expected,
                actual: repr.kinds.len(),
            });
        }
        terrain.kinds = repr.kinds;
        if !repr.occupants.is_empty() {
            if repr.occupants.len() != expected {
                return Err(TerrainError::DataLength {
                    expected,
                    actual: repr.occupants.len(),
                });
            }
            terrain.occupants = repr.occupants;
        }
        Ok(terrain)
    }
}
