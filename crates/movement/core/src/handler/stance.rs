use crate::hex::TerrainKind;
use crate::step::{IllegalReason, StepFlags, StepKind, StepState};

use super::{HandlerCtx, StepHandler, Verdict};

/// Points a Mek spends getting back on its feet.
const GET_UP_COST: u32 = 2;

pub(super) static GET_UP: StepHandler = StepHandler {
    name: "get_up",
    kinds: &[StepKind::GetUp],
    interested: prone_walker,
    pre_compile: get_up,
    post_compile: None,
};

pub(super) static CAREFUL_STAND: StepHandler = StepHandler {
    name: "careful_stand",
    kinds: &[StepKind::CarefulStand],
    interested: may_stand_carefully,
    pre_compile: careful_stand,
    post_compile: None,
};

pub(super) static GO_PRONE: StepHandler = StepHandler {
    name: "go_prone",
    kinds: &[StepKind::GoProne],
    interested: standing_mek,
    pre_compile: go_prone,
    post_compile: None,
};

pub(super) static HULL_DOWN: StepHandler = StepHandler {
    name: "hull_down",
    kinds: &[StepKind::HullDown],
    interested: may_hull_down,
    pre_compile: hull_down,
    post_compile: None,
};

pub(super) static BRACE: StepHandler = StepHandler {
    name: "brace",
    kinds: &[StepKind::Brace],
    interested: standing_mek,
    pre_compile: brace,
    post_compile: None,
};

pub(super) static ENTRENCH: StepHandler = StepHandler {
    name: "entrench",
    kinds: &[StepKind::DigIn, StepKind::Fortify],
    interested: infantry,
    pre_compile: entrench,
    post_compile: None,
};

pub(super) static TAKE_COVER: StepHandler = StepHandler {
    name: "take_cover",
    kinds: &[StepKind::TakeCover],
    interested: infantry_in_building,
    pre_compile: take_cover,
    post_compile: None,
};

pub(super) static CLIMB_MODE: StepHandler = StepHandler {
    name: "climb_mode",
    kinds: &[StepKind::ClimbModeOn, StepKind::ClimbModeOff],
    interested: grounded,
    pre_compile: climb_mode,
    post_compile: None,
};

fn prone_walker(ctx: &HandlerCtx<'_>) -> bool {
    let unit = ctx.env.unit();
    ctx.prev.is_prone() && (unit.is_mek() || unit.is_protomek())
}

fn may_stand_carefully(ctx: &HandlerCtx<'_>) -> bool {
    ctx.env.rules().careful_stand && ctx.prev.is_prone() && ctx.env.unit().is_mek()
}

fn standing_mek(ctx: &HandlerCtx<'_>) -> bool {
    ctx.env.unit().is_mek() && !ctx.prev.is_prone() && !ctx.prev.is_jumping()
}

fn may_hull_down(ctx: &HandlerCtx<'_>) -> bool {
    let unit = ctx.env.unit();
    ctx.env.rules().hull_down
        && !ctx.prev.flags.contains(StepFlags::HULL_DOWN)
        && (unit.is_mek() || (unit.is_tank() && (unit.is_tracked() || unit.is_wheeled())))
}

fn infantry(ctx: &HandlerCtx<'_>) -> bool {
    ctx.env.unit().is_infantry_like()
}

fn infantry_in_building(ctx: &HandlerCtx<'_>) -> bool {
    infantry(ctx)
        && ctx
            .env
            .hex_at(ctx.prev.coords)
            .is_some_and(|hex| hex.contains(TerrainKind::Building))
}

fn grounded(ctx: &HandlerCtx<'_>) -> bool {
    let unit = ctx.env.unit();
    !unit.is_airborne_aero() && !unit.is_vtol() && !ctx.prev.is_jumping()
}

fn get_up(state: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    state.mp = GET_UP_COST;
    state.flags.remove(StepFlags::PRONE);
    state.flags |= StepFlags::STOOD_UP;
    state.add_danger();
    Verdict::Break
}

/// Stands up using the whole walking budget in exchange for an easier check.
fn careful_stand(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    if !state.is_first_step() {
        state.mark_illegal(IllegalReason::NotFirstStep);
        return Verdict::Break;
    }
    state.mp = ctx.env.unit().walk_mp;
    state.flags.remove(StepFlags::PRONE);
    state.flags |= StepFlags::STOOD_UP;
    state.add_danger();
    Verdict::Break
}

fn go_prone(state: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    state.mp = 1;
    state.flags |= StepFlags::PRONE;
    Verdict::Break
}

fn hull_down(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    let unit = ctx.env.unit();
    if unit.is_tank() {
        if !state.is_first_step() {
            state.mark_illegal(IllegalReason::NotFirstStep);
            return Verdict::Break;
        }
        state.mp = unit.walk_mp;
    } else {
        state.mp = if unit.is_quad() { 1 } else { 2 };
    }
    state.flags.remove(StepFlags::PRONE);
    state.flags |= StepFlags::HULL_DOWN;
    Verdict::Break
}

fn brace(state: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    state.mp = 1;
    state.flags |= StepFlags::BRACED;
    Verdict::Break
}

/// Digging in or fortifying takes the unit's entire turn.
fn entrench(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    if !state.is_first_step() {
        state.mark_illegal(IllegalReason::NotFirstStep);
        return Verdict::Break;
    }
    state.mp = ctx.env.unit().walk_mp;
    state.flags |= match ctx.intent.kind {
        StepKind::DigIn => StepFlags::DUG_IN,
        _ => StepFlags::FORTIFIED,
    };
    Verdict::Break
}

fn take_cover(state: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    state.mp = 1;
    state.flags |= StepFlags::TAKING_COVER;
    Verdict::Break
}

fn climb_mode(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    let climbing = ctx.intent.kind == StepKind::ClimbModeOn;
    state.flags.set(StepFlags::CLIMBING, climbing);
    Verdict::Break
}
