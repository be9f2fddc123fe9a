use crate::rules::aero::{self, LOOP_COST, LOOP_MIN_VELOCITY};
use crate::step::{IllegalReason, ManeuverKind, StepFlags, StepKind, StepState};

use super::{HandlerCtx, StepHandler, Verdict};

pub(super) static THRUST: StepHandler = StepHandler {
    name: "thrust",
    kinds: &[StepKind::Accelerate, StepKind::Decelerate],
    interested: in_flight,
    pre_compile: thrust,
    post_compile: None,
};

pub(super) static ROLL: StepHandler = StepHandler {
    name: "roll",
    kinds: &[StepKind::Roll],
    interested: in_flight,
    pre_compile: roll,
    post_compile: None,
};

pub(super) static LOOP: StepHandler = StepHandler {
    name: "loop",
    kinds: &[StepKind::Loop],
    interested: in_flight,
    pre_compile: loop_over,
    post_compile: None,
};

pub(super) static MANEUVER: StepHandler = StepHandler {
    name: "maneuver",
    kinds: &[StepKind::Maneuver],
    interested: in_flight,
    pre_compile: maneuver,
    post_compile: None,
};

fn in_flight(ctx: &HandlerCtx<'_>) -> bool {
    ctx.env.unit().is_airborne_aero()
}

/// Prices a facing change for an airborne unit.
pub(super) fn turn_in_flight(state: &mut StepState) {
    let flight = state.aero;
    if flight.free_turn {
        state.aero.free_turn = false;
        state.mp = 0;
    } else if flight.straight < aero::turn_threshold(flight.velocity) {
        state.mark_illegal(IllegalReason::TurnThreshold);
        return;
    } else {
        state.mp = aero::turn_cost(flight.velocity);
    }
    state.aero.straight = 0;
    state.aero.turns += 1;
}

/// Velocity only changes before the unit flies or turns.
fn thrust(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    let flight = state.aero;
    if state.distance > 0 || flight.turns > 0 {
        state.mark_illegal(IllegalReason::NotFirstStep);
        return Verdict::Break;
    }
    let accelerate = ctx.intent.kind == StepKind::Accelerate;
    if !accelerate && flight.velocity == 0 {
        state.mark_illegal(IllegalReason::InsufficientVelocity);
        return Verdict::Break;
    }
    state.mp = 1;
    if accelerate {
        state.aero.velocity += 1;
        state.aero.velocity_left += 1;
    } else {
        state.aero.velocity -= 1;
        state.aero.velocity_left = state.aero.velocity_left.saturating_sub(1);
    }
    Verdict::Break
}

fn roll(state: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    state.mp = aero::roll_cost(state.aero.rolls);
    state.aero.rolls += 1;
    state.flags.toggle(StepFlags::ROLLED);
    Verdict::Break
}

fn loop_over(state: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    if state.aero.velocity < LOOP_MIN_VELOCITY {
        state.mark_illegal(IllegalReason::InsufficientVelocity);
        return Verdict::Break;
    }
    state.mp = LOOP_COST;
    state.facing = state.facing.opposite();
    state.aero.straight = 0;
    Verdict::Break
}

fn maneuver(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    let Some(kind) = ctx.intent.maneuver() else {
        state.mark_illegal(IllegalReason::NotApplicable);
        return Verdict::Break;
    };
    if state.aero.maneuvered {
        state.mark_illegal(IllegalReason::AlreadyUsed);
        return Verdict::Break;
    }
    if state.aero.velocity < kind.min_velocity() {
        state.mark_illegal(IllegalReason::InsufficientVelocity);
        return Verdict::Break;
    }
    let altitude = state.altitude + kind.altitude_change();
    if altitude < 1 {
        state.mark_illegal(IllegalReason::Crash);
        return Verdict::Break;
    }

    state.mp = kind.thrust_cost();
    state.altitude = altitude;
    state.aero.maneuvered = true;
    state.add_danger();
    if kind.inverts() {
        state.flags.toggle(StepFlags::ROLLED);
    }
    if kind.facing_change() > 0 {
        state.facing = state.facing.offset(kind.facing_change());
        state.aero.straight = 0;
    }

    match kind {
        ManeuverKind::SideSlipLeft => Verdict::Compile(state.facing.rotate_left()),
        ManeuverKind::SideSlipRight => Verdict::Compile(state.facing.rotate_right()),
        _ => Verdict::Break,
    }
}
