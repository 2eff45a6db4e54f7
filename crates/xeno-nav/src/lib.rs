//! Battlescape navigation: terrain queries, the open list and the voxel pathfinder.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod actions;
pub mod open_list;
pub mod path;
pub mod pathfinder;
pub mod terrain;
pub mod world;

pub use actions::{FollowStatus, PathFollower};
pub use open_list::OpenList;
pub use path::{MoveData, Path};
pub use pathfinder::{Mobility, Pathfinder, PathfinderConfig};
pub use terrain::{Terrain, TerrainError, TerrainMut, VoxelKind, VoxelTerrain};
pub use world::{NavWorldMut, NavWorldView};
