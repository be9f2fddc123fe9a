use crate::common::{BoardId, EntityId};
use crate::error::{ErrorSeverity, MovementError};
use crate::hex::Coords;
use crate::step::StepKind;

/// Misuse of the path API.
///
/// Rule violations never surface here; they are recorded on the step.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("coordinates {0} are not on the board")]
    UnknownCoordinate(Coords),

    #[error("{0} requires a target")]
    MissingTarget(StepKind),

    #[error("{0} requires a payload")]
    MissingPayload(StepKind),

    #[error("path was closed by {0}")]
    PathClosed(StepKind),

    /// The environment describes a different unit or board than the path.
    #[error("path belongs to {unit} on {board}, snapshot does not")]
    SnapshotMismatch { unit: EntityId, board: BoardId },

    #[error("no path to {0}")]
    NoPathFound(Coords),
}

impl MovementError for PathError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoPathFound(_) => ErrorSeverity::Recoverable,
            Self::SnapshotMismatch { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCoordinate(_) => "PATH_UNKNOWN_COORDINATE",
            Self::MissingTarget(_) => "PATH_MISSING_TARGET",
            Self::MissingPayload(_) => "PATH_MISSING_PAYLOAD",
            Self::PathClosed(_) => "PATH_CLOSED",
            Self::SnapshotMismatch { .. } => "PATH_SNAPSHOT_MISMATCH",
            Self::NoPathFound(_) => "PATH_NO_PATH_FOUND",
        }
    }
}
