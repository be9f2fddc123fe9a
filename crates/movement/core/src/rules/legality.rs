//! Movement-type classification and legality of a resolved step.

use tracing::trace;

use crate::env::{MoveEnv, UnitSnapshot, UnitStatus};
use crate::hex::Facing;
use crate::step::{IllegalReason, MoveType, StepFlags, StepKind, StepState};

use super::budget::{MoveBudget, Pace};
use super::terrain;

/// Stance or damage restriction that forbids the intent outright.
pub fn restriction(prev: &StepState, kind: StepKind, env: &MoveEnv<'_>) -> Option<IllegalReason> {
    let unit = env.unit();

    if prev.flags.contains(StepFlags::SHUTDOWN) && !matches!(kind, StepKind::Startup | StepKind::Eject)
    {
        return Some(IllegalReason::Shutdown);
    }

    let gyro_destroyed = unit.status.contains(UnitStatus::GYRO_DESTROYED);
    if gyro_destroyed && prev.is_prone() {
        let lone_turn = kind.is_turn() && prev.mp_used == 0;
        if kind != StepKind::Eject && !lone_turn {
            return Some(IllegalReason::GyroDestroyed);
        }
        return None;
    }

    let moves = moves_unit(kind);
    if unit.status.contains(UnitStatus::STUCK) && (moves || kind.is_turn() || kind == StepKind::StartJump) {
        return Some(IllegalReason::Stuck);
    }
    if prev.is_prone() && (moves || kind == StepKind::StartJump) {
        return Some(IllegalReason::Prone);
    }
    None
}

fn moves_unit(kind: StepKind) -> bool {
    kind.direction(Facing::NORTH).is_some()
        || matches!(
            kind,
            StepKind::Charge | StepKind::DeathFromAbove | StepKind::Ram | StepKind::Flee
        )
}

/// Classifies a step whose position, cost and flags are already resolved.
pub fn classify(state: &mut StepState, prev: &StepState, kind: StepKind, env: &MoveEnv<'_>) {
    let unit = env.unit();
    let budget = MoveBudget::for_state(env, state);

    if state.is_jumping() {
        if state.mp_used > budget.jump {
            state.mark_illegal(IllegalReason::OverBudget);
            return;
        }
        if env.conditions().is_low_gravity() && state.mp_used > budget.nominal_jump {
            state.add_danger();
        }
        state.move_type = MoveType::Jump;
        return;
    }

    if unit.is_airborne_aero() {
        classify_thrust(state, unit, &budget);
        return;
    }

    if state.mp == 0 {
        state.move_type = prev.move_type;
        return;
    }

    let low_gravity = env.conditions().is_low_gravity();
    let Some(tier) = budget.classify(state.mp_used, low_gravity) else {
        if first_step_amnesty(state, kind, env) {
            trace!(kind = %kind, "first-step amnesty");
            state.move_type = pace_type(Pace::Run, unit);
        } else {
            state.mark_illegal(IllegalReason::OverBudget);
        }
        return;
    };

    let mut pace = tier.pace;
    if state.flags.contains(StepFlags::EVADING) && pace < Pace::Run {
        pace = Pace::Run;
    }
    if pace > Pace::Walk && state.flags.contains(StepFlags::RUN_PROHIBITED) {
        if env.rules().expanded_backward {
            state.add_danger();
        } else {
            state.mark_illegal(IllegalReason::RunProhibited);
            return;
        }
    }

    let newly_engaged = tier.boosters - state.boosters;
    if !newly_engaged.is_empty() {
        state.boosters |= newly_engaged;
        if !(newly_engaged - unit.boosters_checked).is_empty() {
            state.add_danger();
        }
    }
    if tier.beyond_nominal {
        state.add_danger();
    }

    let mut move_type = pace_type(pace, unit);
    if kind.is_turn() {
        move_type = move_type.max_rank(prev.highest);
        if move_type.is_run_or_faster() && is_slick(state, env) {
            state.add_danger();
        }
    }
    state.move_type = move_type;
}

fn classify_thrust(state: &mut StepState, unit: &UnitSnapshot, budget: &MoveBudget) {
    if unit.fuel.is_some_and(|fuel| state.mp_used > fuel) {
        state.mark_illegal(IllegalReason::Fuel);
    } else if state.mp_used <= budget.safe_thrust {
        state.move_type = MoveType::SafeThrust;
    } else if state.mp_used <= budget.max_thrust {
        state.move_type = MoveType::OverThrust;
        state.add_danger();
    } else {
        state.mark_illegal(IllegalReason::OverBudget);
    }
}

/// Movement type of a pace for the unit's propulsion.
pub fn pace_type(pace: Pace, unit: &UnitSnapshot) -> MoveType {
    if unit.is_vtol() {
        match pace {
            Pace::Walk => MoveType::VtolWalk,
            Pace::Run => MoveType::VtolRun,
            Pace::Sprint => MoveType::VtolSprint,
        }
    } else if unit.is_submarine() {
        match pace {
            Pace::Walk => MoveType::SubmarineWalk,
            Pace::Run | Pace::Sprint => MoveType::SubmarineRun,
        }
    } else {
        match pace {
            Pace::Walk => MoveType::Walk,
            Pace::Run => MoveType::Run,
            Pace::Sprint => MoveType::Sprint,
        }
    }
}

/// A unit may always move a single hex with its whole budget.
fn first_step_amnesty(state: &StepState, kind: StepKind, env: &MoveEnv<'_>) -> bool {
    let unit = env.unit();
    env.rules().minimum_movement
        && state.is_first_step()
        && kind.is_amnesty_eligible()
        && !state.is_jumping()
        && unit.walk_mp > 0
        && !state.is_prone()
        && !unit
            .status
            .intersects(UnitStatus::STUCK | UnitStatus::GYRO_DESTROYED)
}

fn is_slick(state: &StepState, env: &MoveEnv<'_>) -> bool {
    env.hex_at(state.coords)
        .is_some_and(|hex| hex.has_ice() || hex.is_paved())
}

/// Records why a legal step would not be a valid place to stop.
pub fn check_end_position(state: &mut StepState, env: &MoveEnv<'_>) {
    if !state.is_legal() {
        return;
    }
    let unit = env.unit();

    if state.flags.contains(StepFlags::STACKING_VIOLATION) {
        state.set_end_violation(IllegalReason::Stacking);
    }

    let hex = env.hex_at(state.coords);
    if state.is_jumping() {
        if hex.is_some_and(|hex| terrain::is_landing_prohibited(unit, hex)) {
            state.set_end_violation(IllegalReason::LandingProhibited);
        }
        if state.jump_start == Some(state.coords) {
            state.set_end_violation(IllegalReason::ZeroDistanceJump);
        }
    }
    if unit.is_vtol()
        && state.elevation == 0
        && hex.is_some_and(|hex| terrain::is_landing_prohibited(unit, hex))
    {
        state.set_end_violation(IllegalReason::LandingProhibited);
    }
    if unit.is_airborne_aero() && !env.rules().vector_movement && state.aero.velocity_left > 0 {
        state.set_end_violation(IllegalReason::VelocityRemaining);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{BoardId, EntityId};
    use crate::config::RulesConfig;
    use crate::env::{BoardDimensions, Conditions, MapBoard, MovementMode, UnitClass};

    fn with_env<R>(unit: UnitSnapshot, rules: RulesConfig, f: impl FnOnce(&MoveEnv<'_>) -> R) -> R {
        let board = MapBoard::new(BoardId(0), BoardDimensions::new(5, 5));
        let conditions = Conditions::new();
        let env = MoveEnv::new(&board, &unit, &conditions, &rules);
        f(&env)
    }

    fn mek() -> UnitSnapshot {
        UnitSnapshot::new(EntityId(1), UnitClass::Mek, MovementMode::Biped).with_walk(4)
    }

    #[test]
    fn walking_points_classify_as_walk() {
        with_env(mek(), RulesConfig::new(), |env| {
            let prev = StepState::origin(env);
            let mut state = prev.successor();
            state.mp = 3;
            state.mp_used = 3;
            classify(&mut state, &prev, StepKind::Forward, env);
            assert_eq!(state.move_type, MoveType::Walk);
        });
    }

    #[test]
    fn backing_up_forbids_running() {
        with_env(mek(), RulesConfig::new(), |env| {
            let prev = StepState::origin(env);
            let mut state = prev.successor();
            state.flags |= StepFlags::RUN_PROHIBITED;
            state.mp = 5;
            state.mp_used = 5;
            classify(&mut state, &prev, StepKind::Backward, env);
            assert_eq!(state.illegal_reason, Some(IllegalReason::RunProhibited));
        });
    }

    #[test]
    fn expanded_backward_trades_legality_for_a_check() {
        with_env(mek(), RulesConfig::advanced(), |env| {
            let prev = StepState::origin(env);
            let mut state = prev.successor();
            state.flags |= StepFlags::RUN_PROHIBITED;
            state.mp = 5;
            state.mp_used = 5;
            classify(&mut state, &prev, StepKind::Backward, env);
            assert_eq!(state.move_type, MoveType::Run);
            assert!(state.has_danger());
        });
    }

    #[test]
    fn free_steps_keep_the_previous_type() {
        with_env(mek(), RulesConfig::new(), |env| {
            let mut prev = StepState::origin(env);
            prev.move_type = MoveType::Run;
            prev.mp_used = 5;
            let mut state = prev.successor();
            classify(&mut state, &prev, StepKind::ConvertMode, env);
            assert_eq!(state.move_type, MoveType::Run);
        });
    }

    #[test]
    fn turns_inherit_the_fastest_pace_so_far() {
        with_env(mek(), RulesConfig::new(), |env| {
            let mut prev = StepState::origin(env);
            prev.move_type = MoveType::Run;
            prev.highest = MoveType::Run;

            let mut turn = prev.successor();
            turn.mp = 1;
            turn.mp_used = 1;
            classify(&mut turn, &prev, StepKind::TurnLeft, env);
            assert_eq!(turn.move_type, MoveType::Run);

            let mut step = prev.successor();
            step.mp = 1;
            step.mp_used = 1;
            classify(&mut step, &prev, StepKind::Forward, env);
            assert_eq!(step.move_type, MoveType::Walk);
        });
    }

    #[test]
    fn shutdown_units_may_only_start_up() {
        with_env(mek().with_status(UnitStatus::SHUTDOWN), RulesConfig::new(), |env| {
            let prev = StepState::origin(env);
            assert_eq!(
                restriction(&prev, StepKind::Forward, env),
                Some(IllegalReason::Shutdown)
            );
            assert_eq!(restriction(&prev, StepKind::Startup, env), None);
        });
    }

    #[test]
    fn destroyed_gyro_allows_one_turn() {
        let unit = mek().with_status(UnitStatus::PRONE | UnitStatus::GYRO_DESTROYED);
        with_env(unit, RulesConfig::new(), |env| {
            let prev = StepState::origin(env);
            assert_eq!(restriction(&prev, StepKind::TurnLeft, env), None);
            assert_eq!(
                restriction(&prev, StepKind::GetUp, env),
                Some(IllegalReason::GyroDestroyed)
            );

            let mut turned = prev.successor();
            turned.mp_used = 1;
            assert_eq!(
                restriction(&turned, StepKind::TurnLeft, env),
                Some(IllegalReason::GyroDestroyed)
            );
        });
    }

    #[test]
    fn vtol_tiers_use_vtol_types() {
        let vtol = UnitSnapshot::new(EntityId(2), UnitClass::Tank, MovementMode::Vtol);
        assert_eq!(pace_type(Pace::Run, &vtol), MoveType::VtolRun);
        let sub = UnitSnapshot::new(EntityId(3), UnitClass::Tank, MovementMode::Submarine);
        assert_eq!(pace_type(Pace::Walk, &sub), MoveType::SubmarineWalk);
    }
}
