//! Error taxonomy.
//!
//! Recoverable conditions (a bad position or card supplied from outside the
//! engine) come back as `Result` values and leave the game state untouched.
//! Internal-consistency faults (an AI-produced illegal move, a missing card
//! instance, scoring a finalized board) panic with diagnostic context
//! instead, since they indicate a defect in move enumeration or state
//! bookkeeping rather than bad input.

use thiserror::Error;

use crate::cards::CardId;

/// A move that cannot be applied. Game state is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Setup phase: the target is not one of the open blank cells.
    #[error("({row}, {column}) is not an open setup cell")]
    NotAnOpenCell { row: usize, column: usize },

    /// Rotation phase: the coordinates do not name an outside-edge slot.
    #[error("({row}, {column}) is not a valid edge insertion point")]
    InvalidEdge { row: usize, column: usize },

    /// The ply references a card the acting player does not hold.
    #[error("{card} is not in the acting player's hand")]
    CardNotHeld { card: CardId },
}

/// A persistence snapshot that cannot be restored.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot was written by an incompatible engine version.
    #[error("unsupported snapshot version {0}")]
    Version(u32),

    /// The snapshot is internally inconsistent.
    #[error("malformed snapshot: {0}")]
    Malformed(String),

    /// The byte payload could not be decoded.
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),
}
