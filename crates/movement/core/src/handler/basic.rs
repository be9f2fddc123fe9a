use crate::env::UnitStatus;
use crate::step::{StepFlags, StepKind, StepState};

use super::aero::turn_in_flight;
use super::{HandlerCtx, StepHandler, Verdict, always};

pub(super) static FORWARD: StepHandler = StepHandler {
    name: "forward",
    kinds: &[StepKind::Forward],
    interested: always,
    pre_compile: forward,
    post_compile: None,
};

pub(super) static BACKWARD: StepHandler = StepHandler {
    name: "backward",
    kinds: &[StepKind::Backward],
    interested: not_in_flight,
    pre_compile: backward,
    post_compile: None,
};

pub(super) static TURN: StepHandler = StepHandler {
    name: "turn",
    kinds: &[StepKind::TurnLeft, StepKind::TurnRight],
    interested: always,
    pre_compile: turn,
    post_compile: None,
};

pub(super) static LATERAL: StepHandler = StepHandler {
    name: "lateral",
    kinds: &[
        StepKind::LateralLeft,
        StepKind::LateralRight,
        StepKind::LateralLeftBackward,
        StepKind::LateralRightBackward,
    ],
    interested: can_shift,
    pre_compile: lateral,
    post_compile: None,
};

pub(super) static SWIM: StepHandler = StepHandler {
    name: "swim",
    kinds: &[StepKind::Swim],
    interested: submerged,
    pre_compile: swim,
    post_compile: None,
};

fn not_in_flight(ctx: &HandlerCtx<'_>) -> bool {
    !ctx.env.unit().is_airborne_aero()
}

fn can_shift(ctx: &HandlerCtx<'_>) -> bool {
    let unit = ctx.env.unit();
    !unit.is_airborne_aero() && unit.can_shift_laterally()
}

fn submerged(ctx: &HandlerCtx<'_>) -> bool {
    let unit = ctx.env.unit();
    ctx.prev.elevation < 0 && (unit.is_mek() || unit.is_protomek() || unit.is_battle_armor())
}

fn forward(state: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    Verdict::Compile(state.facing)
}

fn backward(state: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    state.flags |= StepFlags::BACKWARDS;
    if !state.is_jumping() {
        state.flags |= StepFlags::RUN_PROHIBITED;
    }
    Verdict::Compile(state.facing.opposite())
}

fn turn(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    let unit = ctx.env.unit();
    state.facing = match ctx.intent.kind {
        StepKind::TurnLeft => state.facing.rotate_left(),
        _ => state.facing.rotate_right(),
    };
    state.flags |= StepFlags::TURNING;

    if unit.is_airborne_aero() {
        turn_in_flight(state);
        return Verdict::Break;
    }

    let gyro_lockup = state.is_prone() && unit.status.contains(UnitStatus::GYRO_DESTROYED);
    let free = state.is_jumping()
        || state.flags.contains(StepFlags::STOOD_UP)
        || unit.turns_for_free();
    state.mp = if free && !gyro_lockup { 0 } else { 1 };
    Verdict::Break
}

fn lateral(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    let unit = ctx.env.unit();
    let kind = ctx.intent.kind;
    if kind.is_backward() {
        state.flags |= StepFlags::BACKWARDS;
        if !state.is_jumping() {
            state.flags |= StepFlags::RUN_PROHIBITED;
        }
    }

    if state.flags.contains(StepFlags::LATERAL_BONUS) {
        state.flags.remove(StepFlags::LATERAL_BONUS);
    } else if !state.is_jumping() && !unit.shifts_laterally_for_free() {
        state.mp += 1;
    }

    match kind.direction(state.facing) {
        Some(direction) => Verdict::Compile(direction),
        None => Verdict::Break,
    }
}

/// Moves one hex ahead while staying at the current depth.
fn swim(state: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    Verdict::Compile(state.facing)
}
