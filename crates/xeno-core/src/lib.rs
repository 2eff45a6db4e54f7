//! Deterministic, engine-agnostic battlescape kernel primitives.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod agent;
pub mod dice;
pub mod rng;
pub mod tick;
pub mod voxel;
pub mod world;

pub use agent::{AgentId, CombatantId, TeamId};
pub use dice::{check_probability, roll_dice, DiceError, MAX_TOLERATED_PROBABILITY};
pub use rng::{DeterministicRng, ScriptedRng, SplitMix64};
pub use tick::TickContext;
pub use voxel::{Direction, Extent, Voxel};
pub use world::{WorldMut, WorldView};
