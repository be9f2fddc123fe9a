use strum::EnumCount;

use crate::common::BoardId;
use crate::env::{BoosterSet, MoveEnv, UnitStatus};
use crate::hex::{Coords, Facing};

use super::{IllegalReason, Intent, MoveType, StepFlags, StepKind};

/// Velocity bookkeeping for airborne aerospace units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AeroState {
    pub velocity: u32,
    /// Hexes still owed this turn.
    pub velocity_left: u32,
    /// Hexes flown since the last facing change.
    pub straight: u32,
    pub turns: u32,
    pub free_turn: bool,
    pub rolls: u32,
    pub maneuvered: bool,
}

/// Fully resolved outcome of a step, derived from its predecessor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepState {
    pub board: BoardId,
    pub coords: Coords,
    pub facing: Facing,
    pub elevation: i32,
    pub altitude: i32,
    /// Points this step costs.
    pub mp: u32,
    pub mp_used: u32,
    /// Hexes entered so far.
    pub distance: u32,
    pub heat: u32,
    pub total_heat: u32,
    pub move_type: MoveType,
    pub illegal_reason: Option<IllegalReason>,
    /// Set when the step is passable but not a valid place to stop.
    pub end_violation: Option<IllegalReason>,
    pub flags: StepFlags,
    /// Boosters engaged so far.
    pub boosters: BoosterSet,
    /// Highest movement type used so far.
    pub highest: MoveType,
    pub jump_start: Option<Coords>,
    pub jump_start_level: i32,
    /// Last action that restricts what may follow it.
    pub terminal: Option<StepKind>,
    pub aero: AeroState,
}

impl StepState {
    /// State of the unit before any step, taken from the snapshot.
    pub fn origin(env: &MoveEnv<'_>) -> Self {
        let unit = env.unit();
        let mut flags = StepFlags::empty();
        if unit.status.contains(UnitStatus::PRONE) {
            flags |= StepFlags::PRONE;
        }
        if unit.status.contains(UnitStatus::HULL_DOWN) {
            flags |= StepFlags::HULL_DOWN;
        }
        if unit.status.contains(UnitStatus::SHUTDOWN) {
            flags |= StepFlags::SHUTDOWN;
        }
        if env
            .hex_at(unit.position)
            .is_some_and(|hex| hex.is_paved())
        {
            flags |= StepFlags::ON_PAVEMENT | StepFlags::ALL_PAVED;
        }

        Self {
            board: env.board().id(),
            coords: unit.position,
            facing: unit.facing,
            elevation: unit.elevation,
            altitude: unit.altitude,
            mp: 0,
            mp_used: 0,
            distance: 0,
            heat: 0,
            total_heat: 0,
            move_type: MoveType::None,
            illegal_reason: None,
            end_violation: None,
            flags,
            boosters: BoosterSet::empty(),
            highest: MoveType::None,
            jump_start: None,
            jump_start_level: 0,
            terminal: None,
            aero: AeroState {
                velocity: unit.velocity,
                velocity_left: unit.velocity,
                ..AeroState::default()
            },
        }
    }

    /// Copies the predecessor and clears everything that only describes one step.
    pub fn successor(&self) -> Self {
        let mut next = self.clone();
        next.mp = 0;
        next.heat = 0;
        next.end_violation = None;
        if self.flags.contains(StepFlags::DANGER) {
            next.flags |= StepFlags::PAST_DANGER;
        }
        next.flags.remove(StepFlags::TRANSIENT);
        if self.distance == 0 && self.mp_used == 0 {
            next.flags |= StepFlags::FIRST_STEP;
        }
        next
    }

    pub fn is_legal(&self) -> bool {
        !self.move_type.is_illegal()
    }

    /// Legal, and a valid place for the path to end.
    pub fn is_legal_end(&self) -> bool {
        self.is_legal() && self.end_violation.is_none()
    }

    /// Marks the step illegal; the first reason recorded wins.
    pub fn mark_illegal(&mut self, reason: IllegalReason) {
        self.move_type = MoveType::Illegal;
        if self.illegal_reason.is_none() {
            self.illegal_reason = Some(reason);
        }
    }

    pub fn set_end_violation(&mut self, reason: IllegalReason) {
        if self.end_violation.is_none() {
            self.end_violation = Some(reason);
        }
    }

    pub fn is_jumping(&self) -> bool {
        self.flags.contains(StepFlags::JUMPING)
    }

    pub fn is_prone(&self) -> bool {
        self.flags.contains(StepFlags::PRONE)
    }

    pub fn is_first_step(&self) -> bool {
        self.flags.contains(StepFlags::FIRST_STEP)
    }

    pub fn has_danger(&self) -> bool {
        self.flags.contains(StepFlags::DANGER)
    }

    pub fn add_danger(&mut self) {
        self.flags |= StepFlags::DANGER;
    }
}

/// One resolved action: the caller's intent plus its outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub intent: Intent,
    pub state: StepState,
}

impl Step {
    pub fn kind(&self) -> StepKind {
        self.intent.kind
    }

    pub fn is_legal(&self) -> bool {
        self.state.is_legal()
    }
}

/// Multiset of the intent kinds present in a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KindCounts([u16; StepKind::COUNT]);

impl KindCounts {
    pub const fn new() -> Self {
        Self([0; StepKind::COUNT])
    }

    pub fn add(&mut self, kind: StepKind) {
        self.0[kind as usize] = self.0[kind as usize].saturating_add(1);
    }

    pub fn remove(&mut self, kind: StepKind) {
        self.0[kind as usize] = self.0[kind as usize].saturating_sub(1);
    }

    pub fn count(&self, kind: StepKind) -> u16 {
        self.0[kind as usize]
    }

    pub fn contains(&self, kind: StepKind) -> bool {
        self.count(kind) > 0
    }

    pub fn clear(&mut self) {
        self.0 = [0; StepKind::COUNT];
    }
}

impl Default for KindCounts {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_counts_track_multiplicity() {
        let mut counts = KindCounts::new();
        counts.add(StepKind::Forward);
        counts.add(StepKind::Forward);
        counts.add(StepKind::StartJump);
        assert_eq!(counts.count(StepKind::Forward), 2);

        counts.remove(StepKind::Forward);
        counts.remove(StepKind::StartJump);
        assert!(counts.contains(StepKind::Forward));
        assert!(!counts.contains(StepKind::StartJump));

        counts.remove(StepKind::StartJump);
        assert_eq!(counts.count(StepKind::StartJump), 0);
    }
}
