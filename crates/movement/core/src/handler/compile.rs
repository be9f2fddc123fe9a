//! Shared positional compilation: move one hex and price the entry.

use crate::hex::{Facing, Hex};
use crate::rules::cost::{CostInput, movement_cost};
use crate::rules::terrain::{self, ElevationInput};
use crate::step::{IllegalReason, StepFlags, StepKind, StepState};

use super::HandlerCtx;

pub(super) fn compile_move(state: &mut StepState, ctx: &HandlerCtx<'_>, direction: Facing) {
    let env = &ctx.env;
    let unit = env.unit();
    let src_coords = ctx.prev.coords;
    let dest_coords = src_coords.translated(direction);

    let (Some(src), Some(dest)) = (env.hex_at(src_coords), env.hex_at(dest_coords)) else {
        state.mark_illegal(IllegalReason::OffBoard);
        return;
    };

    state.coords = dest_coords;
    state.distance += 1;
    state.flags.remove(StepFlags::HULL_DOWN);

    if unit.is_airborne_aero() {
        fly_hex(state);
        return;
    }

    let jumping = state.is_jumping();
    let swimming = ctx.intent.kind == StepKind::Swim;
    let elevation = match terrain::next_elevation(&ElevationInput {
        unit,
        rules: env.rules(),
        src,
        dest,
        elevation: ctx.prev.elevation,
        climbing: state.flags.contains(StepFlags::CLIMBING),
        jumping,
        swimming,
    }) {
        Ok(elevation) => elevation,
        Err(reason) => {
            state.mark_illegal(reason);
            return;
        }
    };
    let flying = !jumping && (unit.is_vtol() || unit.is_wige()) && elevation > 0;

    let paved = !jumping
        && !flying
        && src.has_road_exit(direction)
        && dest.has_road_exit(direction.opposite());
    state.flags.set(StepFlags::ON_PAVEMENT, dest.is_paved());
    if !paved {
        state.flags.remove(StepFlags::ALL_PAVED);
    }

    if jumping {
        state.mp += 1;
        check_jump_clearance(state, ctx, dest);
    } else if swimming {
        state.mp += 1;
    } else {
        let cost = movement_cost(&CostInput {
            unit,
            conditions: env.conditions(),
            rules: env.rules(),
            src,
            dest,
            src_elevation: ctx.prev.elevation,
            dest_elevation: elevation,
            paved,
            careful: ctx.path.careful,
            searchlight: state.flags.contains(StepFlags::SEARCHLIGHT),
            flying,
        });
        state.mp += cost.total();
        if cost.leap || cost.skid {
            state.add_danger();
        }
    }

    if !jumping && !flying {
        check_level_change(state, ctx, src, dest, elevation);
        if terrain::is_prohibited(unit, dest) {
            state.mark_illegal(IllegalReason::Prohibited);
        }
        let hazards = terrain::hazards(unit, dest, elevation);
        state.heat += hazards.heat;
        if hazards.danger {
            state.add_danger();
        }
    }

    if unit.is_wige() && ctx.prev.elevation > 0 && dest.level < src.level {
        state.flags |= StepFlags::LATERAL_BONUS;
    }

    check_occupancy(state, ctx, elevation, jumping);
    state.elevation = elevation;
}

/// One hex of facing-based aerospace flight; costs no thrust but spends velocity.
fn fly_hex(state: &mut StepState) {
    if state.aero.velocity_left == 0 {
        state.mark_illegal(IllegalReason::VelocityExhausted);
        return;
    }
    let aero = &mut state.aero;
    aero.velocity_left -= 1;
    aero.straight += 1;
    aero.free_turn = aero.velocity_left == 0 && aero.turns == 0;
}

fn check_level_change(
    state: &mut StepState,
    ctx: &HandlerCtx<'_>,
    src: &Hex,
    dest: &Hex,
    elevation: i32,
) {
    let unit = ctx.env.unit();
    if unit.is_naval() || unit.is_submarine() {
        return;
    }
    let from = src.level + ctx.prev.elevation;
    let to = dest.level + elevation;
    let limit = terrain::max_level_change(unit);
    let delta = to - from;

    if delta > limit {
        state.mark_illegal(IllegalReason::ElevationChange);
    } else if delta < -limit {
        if terrain::can_leap(unit, ctx.env.rules()) {
            state.add_danger();
        } else {
            state.mark_illegal(IllegalReason::ElevationChange);
        }
    }
}

fn check_jump_clearance(state: &mut StepState, ctx: &HandlerCtx<'_>, dest: &Hex) {
    let env = &ctx.env;
    let reach = env.conditions().scale_by_gravity(env.unit().jump_mp) as i32;
    let top = dest.level + dest.obstruction_height();
    if top > state.jump_start_level + reach {
        state.mark_illegal(IllegalReason::JumpClearance);
    }
}

fn check_occupancy(state: &mut StepState, ctx: &HandlerCtx<'_>, elevation: i32, jumping: bool) {
    let unit = ctx.env.unit();
    let attack_target = matches!(
        ctx.intent.kind,
        StepKind::Charge | StepKind::DeathFromAbove | StepKind::Ram
    ) && ctx.intent.target_coords() == Some(state.coords);

    state.flags.remove(StepFlags::STACKING_VIOLATION);
    if attack_target {
        return;
    }

    for occupant in ctx.env.occupants(state.coords) {
        if occupant.elevation != elevation {
            continue;
        }
        if occupant.hostile && !occupant.infantry && !jumping {
            state.mark_illegal(IllegalReason::EnemyOccupied);
            return;
        }
        let blocks = occupant.hostile || !(occupant.infantry || unit.is_infantry_like());
        if blocks {
            state.flags |= StepFlags::STACKING_VIOLATION;
        }
    }
}
