use crate::hex::Facing;

/// Closed set of movement intents a path can contain.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StepKind {
    // ===== positional =====
    Forward,
    Backward,
    TurnLeft,
    TurnRight,
    LateralLeft,
    LateralRight,
    LateralLeftBackward,
    LateralRightBackward,
    Swim,

    // ===== stance =====
    GetUp,
    CarefulStand,
    GoProne,
    HullDown,
    Brace,
    DigIn,
    Fortify,
    TakeCover,
    ClimbModeOn,
    ClimbModeOff,

    // ===== jumping and elevation =====
    StartJump,
    Up,
    Down,

    // ===== transport =====
    Mount,
    Load,
    Unload,
    Tow,
    Disconnect,
    Launch,
    Drop,

    // ===== aerospace =====
    Accelerate,
    Decelerate,
    Roll,
    Loop,
    Maneuver,

    // ===== attacks and special actions =====
    Evade,
    Charge,
    DeathFromAbove,
    Ram,
    ConvertMode,
    Eject,
    Flee,
    Searchlight,
    Shutdown,
    Startup,
    SelfDestruct,
    UnjamRac,
    ClearMinefield,
    LayMine,
    ShakeOffSwarmers,
}

/// Actions that may follow an unload-style action.
const UNLOAD_FOLLOWERS: &[StepKind] = &[
    StepKind::Unload,
    StepKind::Launch,
    StepKind::Disconnect,
    StepKind::Drop,
];

impl StepKind {
    /// Hex-side this intent moves towards, for intents with a fixed direction.
    pub fn direction(self, facing: Facing) -> Option<Facing> {
        match self {
            Self::Forward | Self::Swim => Some(facing),
            Self::Backward => Some(facing.opposite()),
            Self::LateralLeft => Some(facing.rotate_left()),
            Self::LateralRight => Some(facing.rotate_right()),
            Self::LateralLeftBackward => Some(facing.offset(4)),
            Self::LateralRightBackward => Some(facing.offset(2)),
            _ => None,
        }
    }

    pub const fn is_turn(self) -> bool {
        matches!(self, Self::TurnLeft | Self::TurnRight)
    }

    pub const fn is_lateral(self) -> bool {
        matches!(
            self,
            Self::LateralLeft
                | Self::LateralRight
                | Self::LateralLeftBackward
                | Self::LateralRightBackward
        )
    }

    pub const fn is_backward(self) -> bool {
        matches!(
            self,
            Self::Backward | Self::LateralLeftBackward | Self::LateralRightBackward
        )
    }

    /// Intents the first-step amnesty may rescue.
    pub const fn is_amnesty_eligible(self) -> bool {
        matches!(self, Self::Forward | Self::LateralLeft | Self::LateralRight)
    }

    /// Intents allowed after this one; `None` when anything may follow.
    pub fn allowed_followers(self) -> Option<&'static [StepKind]> {
        match self {
            Self::Unload | Self::Launch | Self::Disconnect | Self::Drop => Some(UNLOAD_FOLLOWERS),
            Self::Brace | Self::UnjamRac | Self::ClearMinefield => Some(&[]),
            _ => None,
        }
    }

    /// Intents that end the path outright; nothing may be appended after them.
    pub const fn closes_path(self) -> bool {
        matches!(
            self,
            Self::Charge
                | Self::DeathFromAbove
                | Self::Ram
                | Self::Eject
                | Self::Flee
                | Self::SelfDestruct
                | Self::Mount
        )
    }

    pub const fn once_per_path(self) -> bool {
        matches!(
            self,
            Self::StartJump
                | Self::Evade
                | Self::HullDown
                | Self::DigIn
                | Self::Fortify
                | Self::TakeCover
                | Self::Loop
                | Self::Maneuver
                | Self::UnjamRac
                | Self::ClearMinefield
                | Self::LayMine
                | Self::ShakeOffSwarmers
        )
    }

    pub const fn requires_target(self) -> bool {
        matches!(
            self,
            Self::Charge
                | Self::DeathFromAbove
                | Self::Ram
                | Self::Mount
                | Self::Load
                | Self::Unload
                | Self::Tow
        )
    }

    pub const fn requires_payload(self) -> bool {
        matches!(
            self,
            Self::LayMine
                | Self::ClearMinefield
                | Self::Launch
                | Self::Drop
                | Self::Maneuver
                | Self::ConvertMode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn lateral_directions_flank_the_facing() {
        let facing = Facing::NORTH;
        assert_eq!(StepKind::LateralLeft.direction(facing), Some(Facing::NORTH_WEST));
        assert_eq!(StepKind::LateralRight.direction(facing), Some(Facing::NORTH_EAST));
        assert_eq!(
            StepKind::LateralLeftBackward.direction(facing),
            Some(Facing::SOUTH_WEST)
        );
        assert_eq!(
            StepKind::LateralRightBackward.direction(facing),
            Some(Facing::SOUTH_EAST)
        );
        assert_eq!(StepKind::TurnLeft.direction(facing), None);
    }

    #[test]
    fn kind_names_parse_back() {
        assert_eq!(StepKind::iter().count(), StepKind::COUNT);
        for kind in StepKind::iter() {
            assert_eq!(kind.as_ref().parse::<StepKind>(), Ok(kind));
        }
        assert_eq!("DEATH_FROM_ABOVE".parse::<StepKind>(), Ok(StepKind::DeathFromAbove));
    }

    #[test]
    fn unload_only_admits_other_unloads() {
        let followers = StepKind::Unload.allowed_followers().unwrap_or_default();
        assert!(followers.contains(&StepKind::Launch));
        assert!(!followers.contains(&StepKind::Forward));
        assert_eq!(StepKind::Brace.allowed_followers(), Some(&[][..]));
        assert_eq!(StepKind::Forward.allowed_followers(), None);
    }
}
