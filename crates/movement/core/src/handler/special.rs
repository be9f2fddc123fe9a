use crate::env::UnitTraits;
use crate::rules::budget::MoveBudget;
use crate::step::{IllegalReason, StepFlags, StepKind, StepState};

use super::{HandlerCtx, StepHandler, Verdict, always};

pub(super) static EVADE: StepHandler = StepHandler {
    name: "evade",
    kinds: &[StepKind::Evade],
    interested: not_infantry,
    pre_compile: evade,
    post_compile: None,
};

pub(super) static CHARGE: StepHandler = StepHandler {
    name: "charge",
    kinds: &[StepKind::Charge],
    interested: may_charge,
    pre_compile: attack_ahead,
    post_compile: None,
};

pub(super) static DEATH_FROM_ABOVE: StepHandler = StepHandler {
    name: "death_from_above",
    kinds: &[StepKind::DeathFromAbove],
    interested: not_in_flight,
    pre_compile: death_from_above,
    post_compile: None,
};

pub(super) static RAM: StepHandler = StepHandler {
    name: "ram",
    kinds: &[StepKind::Ram],
    interested: may_ram,
    pre_compile: attack_ahead,
    post_compile: None,
};

pub(super) static CONVERT: StepHandler = StepHandler {
    name: "convert",
    kinds: &[StepKind::ConvertMode],
    interested: convertible,
    pre_compile: convert,
    post_compile: None,
};

pub(super) static ABANDON: StepHandler = StepHandler {
    name: "abandon",
    kinds: &[StepKind::Eject, StepKind::SelfDestruct],
    interested: not_infantry,
    pre_compile: free,
    post_compile: None,
};

pub(super) static FLEE: StepHandler = StepHandler {
    name: "flee",
    kinds: &[StepKind::Flee],
    interested: at_board_edge,
    pre_compile: free,
    post_compile: None,
};

pub(super) static SEARCHLIGHT: StepHandler = StepHandler {
    name: "searchlight",
    kinds: &[StepKind::Searchlight],
    interested: has_searchlight,
    pre_compile: searchlight,
    post_compile: None,
};

pub(super) static POWER: StepHandler = StepHandler {
    name: "power",
    kinds: &[StepKind::Shutdown, StepKind::Startup],
    interested: powered,
    pre_compile: power,
    post_compile: None,
};

pub(super) static UNJAM: StepHandler = StepHandler {
    name: "unjam",
    kinds: &[StepKind::UnjamRac],
    interested: not_infantry,
    pre_compile: unjam,
    post_compile: None,
};

pub(super) static MINES: StepHandler = StepHandler {
    name: "mines",
    kinds: &[StepKind::ClearMinefield, StepKind::LayMine],
    interested: not_in_flight,
    pre_compile: mines,
    post_compile: None,
};

pub(super) static SHAKE_OFF: StepHandler = StepHandler {
    name: "shake_off",
    kinds: &[StepKind::ShakeOffSwarmers],
    interested: always,
    pre_compile: shake_off,
    post_compile: None,
};

fn not_infantry(ctx: &HandlerCtx<'_>) -> bool {
    !ctx.env.unit().is_infantry_like()
}

fn not_in_flight(ctx: &HandlerCtx<'_>) -> bool {
    !ctx.env.unit().is_airborne_aero()
}

/// Charging needs solid ground and facing-based movement.
fn may_charge(ctx: &HandlerCtx<'_>) -> bool {
    let unit = ctx.env.unit();
    !unit.is_airborne_aero()
        && !unit.is_infantry_like()
        && !ctx.env.rules().vector_movement
        && !ctx.prev.is_jumping()
}

fn may_ram(ctx: &HandlerCtx<'_>) -> bool {
    ctx.env.unit().is_airborne_aero() && !ctx.env.rules().vector_movement
}

fn convertible(ctx: &HandlerCtx<'_>) -> bool {
    ctx.env.unit().traits.contains(UnitTraits::CONVERTIBLE)
}

fn at_board_edge(ctx: &HandlerCtx<'_>) -> bool {
    ctx.env.board().is_edge(ctx.prev.coords)
}

fn has_searchlight(ctx: &HandlerCtx<'_>) -> bool {
    ctx.env.unit().traits.contains(UnitTraits::SEARCHLIGHT)
}

fn powered(ctx: &HandlerCtx<'_>) -> bool {
    let shut_down = ctx.prev.flags.contains(StepFlags::SHUTDOWN);
    match ctx.intent.kind {
        StepKind::Startup => shut_down,
        _ => !shut_down && !ctx.env.unit().is_infantry_like(),
    }
}

fn free(_: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    Verdict::Break
}

fn evade(state: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    state.flags |= StepFlags::EVADING;
    Verdict::Break
}

/// Moves into the targeted hex directly ahead.
fn attack_ahead(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    let ahead = state.coords.translated(state.facing);
    if ctx.intent.target_coords() != Some(ahead) {
        state.mark_illegal(IllegalReason::TargetNotAdjacent);
        return Verdict::Break;
    }
    Verdict::Compile(state.facing)
}

fn death_from_above(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    if !state.is_jumping() {
        state.mark_illegal(IllegalReason::NoJump);
        return Verdict::Break;
    }
    let direction = ctx
        .intent
        .target_coords()
        .and_then(|target| state.coords.direction_to(target));
    match direction {
        Some(direction) => Verdict::Compile(direction),
        None => {
            state.mark_illegal(IllegalReason::TargetNotAdjacent);
            Verdict::Break
        }
    }
}

fn convert(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    match ctx.intent.mode() {
        Some(mode) if mode != ctx.env.unit().mode => {
            state.flags.toggle(StepFlags::CONVERTING);
        }
        _ => state.mark_illegal(IllegalReason::CannotConvert),
    }
    Verdict::Break
}

fn searchlight(state: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    state.flags.toggle(StepFlags::SEARCHLIGHT);
    Verdict::Break
}

fn power(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    let shutdown = ctx.intent.kind == StepKind::Shutdown;
    state.flags.set(StepFlags::SHUTDOWN, shutdown);
    Verdict::Break
}

/// Clearing a jam takes the unit's whole turn and counts as running.
fn unjam(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    if !state.is_first_step() {
        state.mark_illegal(IllegalReason::NotFirstStep);
        return Verdict::Break;
    }
    state.mp = MoveBudget::for_state(&ctx.env, state).run;
    Verdict::Break
}

fn mines(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    if ctx.intent.kind == StepKind::ClearMinefield && !state.is_first_step() {
        state.mark_illegal(IllegalReason::NotFirstStep);
    }
    Verdict::Break
}

fn shake_off(state: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    state.add_danger();
    Verdict::Break
}
