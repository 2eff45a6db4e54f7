//! Umbrella crate that re-exports the `xeno-*` battlescape building blocks.
//!
//! - [`core`]: voxels, ids, deterministic RNG and dice
//! - [`nav`]: terrain queries, the open list and the pathfinder
//! - [`battle`]: combatants, teams, AI strategies and turn scheduling

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "core")]
#[cfg_attr(docsrs, doc(cfg(feature = "core")))]
pub use xeno_core as core;

#[cfg(feature = "nav")]
#[cfg_attr(docsrs, doc(cfg(feature = "nav")))]
pub use xeno_nav as nav;

#[cfg(feature = "battle")]
#[cfg_attr(docsrs, doc(cfg(feature = "battle")))]
pub use xeno_battle as battle;
