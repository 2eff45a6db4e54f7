use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A discrete cell of battle terrain.
///
/// `x` grows east, `y` grows south, `z` is the level (0 = ground).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Voxel {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Voxel {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy, dz) = dir.offset();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Whether `other` is reachable in a single move: a king move on the same
    /// level, or straight up/down.
    pub fn is_adjacent(self, other: Voxel) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        let dz = (self.z - other.z).abs();
        match dz {
            0 => dx <= 1 && dy <= 1 && (dx + dy) > 0,
            1 => dx == 0 && dy == 0,
            _ => false,
        }
    }

    pub fn chebyshev_distance(self, other: Voxel) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        let dz = self.z.abs_diff(other.z);
        dx.max(dy).max(dz)
    }
}

impl From<[i32; 3]> for Voxel {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(i32, i32, i32)> for Voxel {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Voxel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Single-move directions, listed in the fixed order searches expand them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 10] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::Up,
        Direction::Down,
    ];

    pub const HORIZONTAL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::North => (0, -1, 0),
            Direction::NorthEast => (1, -1, 0),
            Direction::East => (1, 0, 0),
            Direction::SouthEast => (1, 1, 0),
            Direction::South => (0, 1, 0),
            Direction::SouthWest => (-1, 1, 0),
            Direction::West => (-1, 0, 0),
            Direction::NorthWest => (-1, -1, 0),
            Direction::Up => (0, 0, 1),
            Direction::Down => (0, 0, -1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::SouthEast
                | Direction::SouthWest
                | Direction::NorthWest
        )
    }

    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Size of a voxel grid; voxels inside are `0..width` x `0..depth` x `0..height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extent {
    pub width: u32,
    pub depth: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, depth: u32, height: u32) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    pub fn volume(self) -> usize {
        self.width as usize * self.depth as usize * self.height as usize
    }

    pub fn is_empty(self) -> bool {
        self.volume() == 0
    }

    pub fn contains(self, v: Voxel) -> bool {
        v.x >= 0
            && v.y >= 0
            && v.z >= 0
            && (v.x as u32) < self.width
            && (v.y as u32) < self.depth
            && (v.z as u32) < self.height
    }

    /// Linear index, x fastest then y then z.
    pub fn index(self, v: Voxel) -> Option<usize> {
        if !self.contains(v) {
            return None;
        }
        let (w, d) = (self.width as usize, self.depth as usize);
        Some((v.z as usize * d + v.y as usize) * w + v.x as usize)
    }

    pub fn voxel_at(self, index: usize) -> Voxel {
        let (w, d) = (self.width as usize, self.depth as usize);
        let x = index % w;
        let y = (index / w) % d;
        let z = index / (w * d);
        Voxel::new(x as i32, y as i32, z as i32)
    }
}
