/// Movement-type classification of a step.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MoveType {
    /// No points spent yet.
    #[default]
    None,
    Walk,
    Run,
    Sprint,
    Jump,
    VtolWalk,
    VtolRun,
    VtolSprint,
    SubmarineWalk,
    SubmarineRun,
    SafeThrust,
    OverThrust,
    Illegal,
}

impl MoveType {
    /// Ordering used when a step inherits the highest type used so far.
    pub const fn rank(self) -> u8 {
        match self {
            Self::None | Self::Illegal => 0,
            Self::Walk | Self::VtolWalk | Self::SubmarineWalk | Self::SafeThrust => 1,
            Self::Run | Self::VtolRun | Self::SubmarineRun | Self::OverThrust => 2,
            Self::Sprint | Self::VtolSprint => 3,
            Self::Jump => 4,
        }
    }

    pub const fn is_illegal(self) -> bool {
        matches!(self, Self::Illegal)
    }

    /// Higher-ranked of two types; ties keep `self`.
    pub const fn max_rank(self, other: MoveType) -> MoveType {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    pub const fn is_run_or_faster(self) -> bool {
        self.rank() >= 2 && !matches!(self, Self::Jump)
    }
}

/// Why a step was classified illegal or is not a valid stopping point.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IllegalReason {
    PrecedingIllegal,
    /// The intent's handler does not apply to this unit or situation.
    NotApplicable,
    OverBudget,
    /// The destination terrain is closed to this unit.
    Prohibited,
    OffBoard,
    ElevationChange,
    Prone,
    Stuck,
    GyroDestroyed,
    NotWhileJumping,
    JumpAfterMove,
    NoJump,
    JumpClearance,
    AlreadyUsed,
    AfterTerminal,
    RunProhibited,
    EnemyOccupied,
    Crash,
    Grounded,
    VelocityExhausted,
    TurnThreshold,
    InsufficientVelocity,
    Fuel,
    NotFirstStep,
    CannotConvert,
    TargetNotAdjacent,
    Shutdown,
    MaxElevation,
    DepthExceeded,
    // ===== end-position only =====
    Stacking,
    LandingProhibited,
    ZeroDistanceJump,
    VelocityRemaining,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_orders_tiers_across_modes() {
        assert!(MoveType::Run.rank() > MoveType::Walk.rank());
        assert_eq!(MoveType::VtolRun.rank(), MoveType::Run.rank());
        assert_eq!(MoveType::Walk.max_rank(MoveType::Sprint), MoveType::Sprint);
        assert_eq!(MoveType::Run.max_rank(MoveType::Walk), MoveType::Run);
        assert!(!MoveType::Jump.is_run_or_faster());
    }

    #[test]
    fn reasons_display_in_snake_case() {
        assert_eq!(IllegalReason::ZeroDistanceJump.to_string(), "zero_distance_jump");
        assert_eq!("over_budget".parse::<IllegalReason>(), Ok(IllegalReason::OverBudget));
    }
}
