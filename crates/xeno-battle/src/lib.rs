//! Battlescape simulation: combatants, teams, per-unit AI and turn scheduling.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod ai;
pub mod battle;
pub mod combatant;
pub mod config;
pub mod error;
pub mod events;
pub mod team;
pub mod team_ai;
pub mod turn;
pub mod world;

pub use ai::{AdvanceAi, AiSpec, CombatantAi, HoldPositionAi, MoveToAi, TurnContext};
pub use battle::Battle;
pub use combatant::{Combatant, CombatantStats, Combatants, Roster, RosterMut};
pub use config::{BattleConfig, CombatConfig, MovementConfig, TurnConfig};
pub use error::BattleError;
pub use events::{BattleEvent, EventSink, NullEventSink, VecEventSink};
pub use team::Team;
pub use team_ai::{TeamAi, TurnState};
pub use turn::{TurnController, TurnProgress};
pub use world::{BattleMut, BattleView};
