use thiserror::Error;
use xeno_core::{CombatantId, DiceError, TeamId};
use xeno_nav::TerrainError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BattleError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown {0}")]
    UnknownCombatant(CombatantId),
    #[error("unknown {0}")]
    UnknownTeam(TeamId),
    #[error(transparent)]
    Terrain(#[from] TerrainError),
    #[error(transparent)]
    Dice(#[from] DiceError),
}

impl BattleError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        BattleError::InvalidArgument(msg.into())
    }
}
