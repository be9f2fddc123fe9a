//! Oracle construction and access errors.

use crate::error::{ErrorSeverity, MovementError};
use crate::hex::Coords;

/// Errors raised while building or querying read-only board data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Coordinates lie outside the board.
    #[error("coordinates {0} are out of board bounds")]
    CoordsOutOfBounds(Coords),

    /// A row-major hex list does not match the declared dimensions.
    #[error("expected {expected} hexes, got {actual}")]
    HexCountMismatch { expected: usize, actual: usize },
}

impl MovementError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CoordsOutOfBounds(_) => "ORACLE_COORDS_OUT_OF_BOUNDS",
            Self::HexCountMismatch { .. } => "ORACLE_HEX_COUNT_MISMATCH",
        }
    }
}
