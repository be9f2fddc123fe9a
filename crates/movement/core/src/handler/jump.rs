use crate::rules::aero::CLIMB_COST;
use crate::step::{IllegalReason, StepFlags, StepKind, StepState};

use super::{HandlerCtx, StepHandler, Verdict};

pub(super) static START_JUMP: StepHandler = StepHandler {
    name: "start_jump",
    kinds: &[StepKind::StartJump],
    interested: may_jump,
    pre_compile: start_jump,
    post_compile: None,
};

pub(super) static ELEVATION: StepHandler = StepHandler {
    name: "elevation",
    kinds: &[StepKind::Up, StepKind::Down],
    interested: changes_elevation,
    pre_compile: elevation,
    post_compile: None,
};

fn may_jump(ctx: &HandlerCtx<'_>) -> bool {
    let unit = ctx.env.unit();
    !unit.is_aero() && !unit.is_vtol() && !unit.is_naval() && !unit.is_submarine()
}

fn changes_elevation(ctx: &HandlerCtx<'_>) -> bool {
    let unit = ctx.env.unit();
    unit.is_airborne_aero() || unit.is_vtol() || unit.is_wige() || unit.is_submarine()
}

fn start_jump(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    let env = &ctx.env;
    if env.unit().jump_mp == 0 {
        state.mark_illegal(IllegalReason::NoJump);
        return Verdict::Break;
    }
    if !state.is_first_step() {
        state.mark_illegal(IllegalReason::JumpAfterMove);
        return Verdict::Break;
    }
    let ground = env.hex_at(state.coords).map_or(0, |hex| hex.level);
    state.flags |= StepFlags::JUMPING;
    state.flags.remove(StepFlags::ALL_PAVED);
    state.jump_start = Some(state.coords);
    state.jump_start_level = ground + state.elevation.max(0);
    Verdict::Break
}

fn elevation(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    let unit = ctx.env.unit();
    let up = ctx.intent.kind == StepKind::Up;

    if unit.is_airborne_aero() {
        if up {
            state.altitude += 1;
            state.mp = CLIMB_COST;
        } else if state.altitude <= 1 {
            state.mark_illegal(IllegalReason::Crash);
        } else {
            state.altitude -= 1;
        }
        return Verdict::Break;
    }

    let Some(hex) = ctx.env.hex_at(state.coords) else {
        state.mark_illegal(IllegalReason::OffBoard);
        return Verdict::Break;
    };
    let next = if up {
        state.elevation + 1
    } else {
        state.elevation - 1
    };
    state.mp = 1;

    let ceiling = if unit.is_vtol() {
        ctx.env.rules().max_vtol_elevation
    } else if unit.is_wige() {
        1
    } else {
        0
    };
    if next > ceiling {
        state.mark_illegal(IllegalReason::MaxElevation);
        return Verdict::Break;
    }
    if unit.is_submarine() && -next > hex.depth() {
        state.mark_illegal(IllegalReason::DepthExceeded);
        return Verdict::Break;
    }
    if !unit.is_submarine() && next < 0 {
        state.mark_illegal(IllegalReason::Grounded);
        return Verdict::Break;
    }
    if unit.is_vtol() && next > 0 && next <= hex.obstruction_height() {
        state.mark_illegal(IllegalReason::Crash);
        return Verdict::Break;
    }

    state.elevation = next;
    if !up && !unit.is_submarine() {
        state.flags |= StepFlags::LATERAL_BONUS;
    }
    Verdict::Break
}
