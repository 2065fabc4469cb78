// Game simulation: performance model, minute allocation, and the orchestrator
// that ties them into one persisted game.

pub mod game;
pub mod minutes;
pub mod performance;

pub use game::{GameRequest, GameSimulator};
pub use minutes::{allocate_minutes, TEAM_GAME_MINUTES};
pub use performance::{simulate_performance, FULL_GAME_MINUTES};

use thiserror::Error;

/// Errors the simulation surfaces to callers. Degenerate inputs the model
/// handles locally (zero minutes, zero FG%) never appear here.
#[derive(Debug, Error)]
pub enum SimError {
    /// Wrong starter count or an id that resolves to no player. Rejected
    /// before any write.
    #[error("invalid lineup: {0}")]
    InvalidLineup(String),

    /// Resimulation target absent. No state changed.
    #[error("game {0} not found")]
    GameNotFound(i64),

    /// Team id absent. No state changed.
    #[error("team {0} not found")]
    TeamNotFound(i64),

    /// Write-layer failure; the offending game's writes were rolled back.
    #[error(transparent)]
    Persistence(#[from] anyhow::Error),
}
