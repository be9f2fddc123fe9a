//! Intents and their resolved outcomes.
mod flags;
mod intent;
mod kind;
mod move_type;
mod state;

pub use flags::StepFlags;
pub use intent::{Intent, ManeuverKind, StepPayload, StepTarget};
pub use kind::StepKind;
pub use move_type::{IllegalReason, MoveType};
pub use state::{AeroState, KindCounts, Step, StepState};
