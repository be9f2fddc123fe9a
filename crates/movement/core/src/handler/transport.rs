use crate::env::UnitTraits;
use crate::step::{IllegalReason, StepFlags, StepKind, StepState};

use super::{HandlerCtx, StepHandler, Verdict};

pub(super) static MOUNT: StepHandler = StepHandler {
    name: "mount",
    kinds: &[StepKind::Mount],
    interested: passenger,
    pre_compile: mount,
    post_compile: None,
};

pub(super) static LOAD: StepHandler = StepHandler {
    name: "load",
    kinds: &[StepKind::Load, StepKind::Tow],
    interested: carrier,
    pre_compile: load,
    post_compile: None,
};

pub(super) static UNLOAD: StepHandler = StepHandler {
    name: "unload",
    kinds: &[StepKind::Unload],
    interested: carrier,
    pre_compile: unload,
    post_compile: None,
};

pub(super) static DISCONNECT: StepHandler = StepHandler {
    name: "disconnect",
    kinds: &[StepKind::Disconnect],
    interested: tower,
    pre_compile: no_cost,
    post_compile: None,
};

pub(super) static DEPLOY: StepHandler = StepHandler {
    name: "deploy",
    kinds: &[StepKind::Launch, StepKind::Drop],
    interested: deployer,
    pre_compile: deploy,
    post_compile: None,
};

fn passenger(ctx: &HandlerCtx<'_>) -> bool {
    let unit = ctx.env.unit();
    unit.is_infantry_like() || unit.is_protomek()
}

fn carrier(ctx: &HandlerCtx<'_>) -> bool {
    let traits = ctx.env.unit().traits;
    match ctx.intent.kind {
        StepKind::Tow => traits.contains(UnitTraits::TOW_HITCH),
        _ => traits.contains(UnitTraits::TRANSPORT),
    }
}

fn tower(ctx: &HandlerCtx<'_>) -> bool {
    ctx.env.unit().traits.contains(UnitTraits::TOW_HITCH)
}

fn deployer(ctx: &HandlerCtx<'_>) -> bool {
    let unit = ctx.env.unit();
    let airborne = unit.is_airborne_aero() || (unit.is_vtol() && ctx.prev.elevation > 0);
    let carries = unit.traits.contains(UnitTraits::TRANSPORT);
    match ctx.intent.kind {
        StepKind::Drop => carries && airborne,
        _ => carries,
    }
}

/// Boards a transport in the same hex, or steps into an adjacent one.
fn mount(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    let Some(target) = ctx.intent.target_coords() else {
        state.mark_illegal(IllegalReason::TargetNotAdjacent);
        return Verdict::Break;
    };
    if target == state.coords {
        state.mp = 1;
        return Verdict::Break;
    }
    match state.coords.direction_to(target) {
        Some(direction) => Verdict::Compile(direction),
        None => {
            state.mark_illegal(IllegalReason::TargetNotAdjacent);
            Verdict::Break
        }
    }
}

fn load(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    let reachable = ctx
        .intent
        .target_coords()
        .is_some_and(|target| target == state.coords || target.is_adjacent(state.coords));
    if !reachable {
        state.mark_illegal(IllegalReason::TargetNotAdjacent);
        return Verdict::Break;
    }
    state.mp = 1;
    Verdict::Break
}

fn unload(state: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    state.mp = 1;
    state.flags |= StepFlags::EVER_UNLOADED;
    Verdict::Break
}

fn no_cost(_: &mut StepState, _: &HandlerCtx<'_>) -> Verdict {
    Verdict::Break
}

fn deploy(state: &mut StepState, ctx: &HandlerCtx<'_>) -> Verdict {
    if ctx.intent.manifest().is_empty() {
        state.mark_illegal(IllegalReason::NotApplicable);
        return Verdict::Break;
    }
    state.flags |= StepFlags::EVER_UNLOADED;
    Verdict::Break
}
