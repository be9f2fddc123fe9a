use crate::common::EntityId;
use crate::env::MovementMode;
use crate::hex::Coords;

use super::StepKind;

/// What an intent is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepTarget {
    Entity { id: EntityId, coords: Coords },
    Hex(Coords),
}

impl StepTarget {
    pub const fn coords(&self) -> Coords {
        match self {
            Self::Entity { coords, .. } | Self::Hex(coords) => *coords,
        }
    }

    pub const fn entity(&self) -> Option<EntityId> {
        match self {
            Self::Entity { id, .. } => Some(*id),
            Self::Hex(_) => None,
        }
    }
}

/// Aerospace maneuvers with their fixed thrust and geometry.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ManeuverKind {
    Immelmann,
    SplitS,
    Hammerhead,
    HalfRoll,
    BarrelRoll,
    SideSlipLeft,
    SideSlipRight,
}

impl ManeuverKind {
    pub const fn thrust_cost(self) -> u32 {
        match self {
            Self::Immelmann => 4,
            Self::SplitS | Self::Hammerhead => 2,
            Self::HalfRoll | Self::BarrelRoll | Self::SideSlipLeft | Self::SideSlipRight => 1,
        }
    }

    /// Clockwise hex-sides the facing rotates by.
    pub const fn facing_change(self) -> u8 {
        match self {
            Self::Immelmann | Self::SplitS | Self::Hammerhead => 3,
            _ => 0,
        }
    }

    pub const fn altitude_change(self) -> i32 {
        match self {
            Self::Immelmann => 1,
            Self::SplitS => -2,
            _ => 0,
        }
    }

    pub const fn min_velocity(self) -> u32 {
        match self {
            Self::Immelmann => 3,
            Self::BarrelRoll => 2,
            _ => 1,
        }
    }

    pub const fn is_side_slip(self) -> bool {
        matches!(self, Self::SideSlipLeft | Self::SideSlipRight)
    }

    /// Maneuvers that flip the unit onto its back.
    pub const fn inverts(self) -> bool {
        matches!(self, Self::HalfRoll | Self::SplitS)
    }
}

/// Auxiliary data some intents carry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepPayload {
    Mine(u16),
    CargoSlot(u8),
    Manifest(Vec<EntityId>),
    Maneuver(ManeuverKind),
    Mode(MovementMode),
}

/// The caller's request for one step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intent {
    pub kind: StepKind,
    pub target: Option<StepTarget>,
    pub payload: Option<StepPayload>,
}

impl Intent {
    pub const fn new(kind: StepKind) -> Self {
        Self {
            kind,
            target: None,
            payload: None,
        }
    }

    #[must_use]
    pub fn targeting(mut self, target: StepTarget) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: StepPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn target_coords(&self) -> Option<Coords> {
        self.target.map(|target| target.coords())
    }

    pub fn maneuver(&self) -> Option<ManeuverKind> {
        match self.payload {
            Some(StepPayload::Maneuver(kind)) => Some(kind),
            _ => None,
        }
    }

    pub fn mode(&self) -> Option<MovementMode> {
        match self.payload {
            Some(StepPayload::Mode(mode)) => Some(mode),
            _ => None,
        }
    }

    pub fn manifest(&self) -> &[EntityId] {
        match &self.payload {
            Some(StepPayload::Manifest(ids)) => ids,
            _ => &[],
        }
    }
}

impl From<StepKind> for Intent {
    fn from(kind: StepKind) -> Self {
        Self::new(kind)
    }
}
