//! Step handler registry and the per-step resolution pipeline.
//!
//! Every [`StepKind`] maps to exactly one [`StepHandler`]. A handler is a row of
//! plain function pointers: an interest test, a pre-compile phase that applies
//! intent-specific cost and flags, and an optional post-compile hook. When the
//! pre-compile phase returns [`Verdict::Compile`], the shared positional
//! compiler moves the unit one hex and prices the entry from terrain.
//!
//! ```text
//! resolve(prev, intent)
//!   ├─ admission: preceding illegal, terminal followers, once-per-path,
//!   │             stance restrictions, handler interest
//!   ├─ pre_compile ──► Break | Compile(direction)
//!   ├─ compile_move (Compile only) ──► post_compile
//!   ├─ accumulate points and heat
//!   ├─ classify movement type
//!   └─ end-position checks
//! ```
mod aero;
mod basic;
mod compile;
mod jump;
mod special;
mod stance;
mod transport;

use tracing::trace;

use crate::env::MoveEnv;
use crate::hex::Facing;
use crate::path::PathContext;
use crate::rules::legality;
use crate::step::{IllegalReason, Intent, StepFlags, StepKind, StepState};

/// Outcome of a handler's pre-compile phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing positional left to do.
    Break,
    /// Move one hex across the given side and price the entry.
    Compile(Facing),
}

/// Everything a handler may read while resolving one step.
#[derive(Clone, Copy, Debug)]
pub struct HandlerCtx<'a> {
    pub prev: &'a StepState,
    pub intent: &'a Intent,
    pub env: MoveEnv<'a>,
    pub path: PathContext<'a>,
}

pub type InterestFn = fn(&HandlerCtx<'_>) -> bool;
pub type PreCompileFn = fn(&mut StepState, &HandlerCtx<'_>) -> Verdict;
pub type PostCompileFn = fn(&mut StepState, &HandlerCtx<'_>);

/// One row of the dispatch table.
pub struct StepHandler {
    pub name: &'static str,
    pub kinds: &'static [StepKind],
    pub interested: InterestFn,
    pub pre_compile: PreCompileFn,
    pub post_compile: Option<PostCompileFn>,
}

impl StepHandler {
    pub fn handles(&self, kind: StepKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Interest test for handlers that accept every unit.
fn always(_: &HandlerCtx<'_>) -> bool {
    true
}

pub fn dispatch(kind: StepKind) -> &'static StepHandler {
    use StepKind::*;
    match kind {
        Forward => &basic::FORWARD,
        Backward => &basic::BACKWARD,
        TurnLeft | TurnRight => &basic::TURN,
        LateralLeft | LateralRight | LateralLeftBackward | LateralRightBackward => &basic::LATERAL,
        Swim => &basic::SWIM,

        GetUp => &stance::GET_UP,
        CarefulStand => &stance::CAREFUL_STAND,
        GoProne => &stance::GO_PRONE,
        HullDown => &stance::HULL_DOWN,
        Brace => &stance::BRACE,
        DigIn | Fortify => &stance::ENTRENCH,
        TakeCover => &stance::TAKE_COVER,
        ClimbModeOn | ClimbModeOff => &stance::CLIMB_MODE,

        StartJump => &jump::START_JUMP,
        Up | Down => &jump::ELEVATION,

        Mount => &transport::MOUNT,
        Load | Tow => &transport::LOAD,
        Unload => &transport::UNLOAD,
        Disconnect => &transport::DISCONNECT,
        Launch | Drop => &transport::DEPLOY,

        Accelerate | Decelerate => &aero::THRUST,
        Roll => &aero::ROLL,
        Loop => &aero::LOOP,
        Maneuver => &aero::MANEUVER,

        Evade => &special::EVADE,
        Charge => &special::CHARGE,
        DeathFromAbove => &special::DEATH_FROM_ABOVE,
        Ram => &special::RAM,
        ConvertMode => &special::CONVERT,
        Eject | SelfDestruct => &special::ABANDON,
        Flee => &special::FLEE,
        Searchlight => &special::SEARCHLIGHT,
        Shutdown | Startup => &special::POWER,
        UnjamRac => &special::UNJAM,
        ClearMinefield | LayMine => &special::MINES,
        ShakeOffSwarmers => &special::SHAKE_OFF,
    }
}

/// Resolves one intent against its predecessor.
///
/// Never fails: anything the rules forbid comes back as an illegal step.
pub fn resolve(
    prev: &StepState,
    intent: &Intent,
    path: &PathContext<'_>,
    env: &MoveEnv<'_>,
) -> StepState {
    let kind = intent.kind;
    let handler = dispatch(kind);
    let ctx = HandlerCtx {
        prev,
        intent,
        env: *env,
        path: *path,
    };
    let mut state = prev.successor();

    if let Some(reason) = admission(&ctx, handler) {
        state.mark_illegal(reason);
    } else {
        if kind.allowed_followers().is_some() {
            state.terminal = Some(kind);
        }
        if kind.closes_path() {
            state.flags |= StepFlags::CLOSED;
        }
        if !kind.is_turn() {
            state.flags.remove(StepFlags::STOOD_UP);
        }

        let verdict = (handler.pre_compile)(&mut state, &ctx);
        if let Verdict::Compile(direction) = verdict
            && state.is_legal()
        {
            compile::compile_move(&mut state, &ctx, direction);
            if state.is_legal()
                && let Some(post) = handler.post_compile
            {
                post(&mut state, &ctx);
            }
        }
    }

    state.mp_used = prev.mp_used + state.mp;
    state.total_heat = prev.total_heat + state.heat;

    if state.is_legal() {
        legality::classify(&mut state, prev, kind, env);
    }
    if state.is_legal() {
        state.highest = state.highest.max_rank(state.move_type);
    }
    legality::check_end_position(&mut state, env);

    trace!(
        handler = handler.name,
        kind = %kind,
        coords = %state.coords,
        facing = %state.facing,
        mp = state.mp,
        mp_used = state.mp_used,
        move_type = %state.move_type,
        reason = ?state.illegal_reason,
        "resolved step"
    );
    state
}

fn admission(ctx: &HandlerCtx<'_>, handler: &StepHandler) -> Option<IllegalReason> {
    let prev = ctx.prev;
    let kind = ctx.intent.kind;

    if !prev.is_legal() {
        return Some(IllegalReason::PrecedingIllegal);
    }
    if let Some(terminal) = prev.terminal
        && let Some(allowed) = terminal.allowed_followers()
        && !allowed.contains(&kind)
    {
        return Some(IllegalReason::AfterTerminal);
    }
    if kind.once_per_path() && ctx.path.kinds.contains(kind) {
        return Some(IllegalReason::AlreadyUsed);
    }
    if let Some(reason) = legality::restriction(prev, kind, &ctx.env) {
        return Some(reason);
    }
    if !handler.handles(kind) || !(handler.interested)(ctx) {
        return Some(IllegalReason::NotApplicable);
    }
    None
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_kind_dispatches_to_a_handler_that_claims_it() {
        for kind in StepKind::iter() {
            let handler = dispatch(kind);
            assert!(handler.handles(kind), "{} does not claim {kind}", handler.name);
        }
    }
}
