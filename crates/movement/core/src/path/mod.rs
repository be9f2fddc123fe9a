//! Ordered, fully resolved movement paths.
//!
//! A [`MovePath`] owns the intents a caller appended and the resolved
//! [`Step`] for each of them. Every step is derived from its predecessor by
//! [`crate::resolve`], so a path is a pure function of its origin snapshot and
//! its intents; [`MovePath::recompile`] replays the intents against a fresh
//! snapshot.
mod error;
mod pathfinder;

pub use error::PathError;
pub use pathfinder::{Pathfinder, SearchBudget};

use std::cell::OnceCell;
use std::collections::BTreeSet;

use tracing::debug;

use crate::common::{BoardId, EntityId};
use crate::env::MoveEnv;
use crate::handler;
use crate::hex::{Coords, Facing};
use crate::step::{Intent, KindCounts, MoveType, Step, StepFlags, StepKind, StepState};

/// Path-wide facts a handler may consult while resolving one step.
#[derive(Clone, Copy, Debug)]
pub struct PathContext<'a> {
    /// Careful paths forgo the cheaper ice and black-ice costs.
    pub careful: bool,
    /// Kinds already present in the path, excluding the step being resolved.
    pub kinds: &'a KindCounts,
}

/// An ordered sequence of resolved steps for one unit on one board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePath {
    unit: EntityId,
    board: BoardId,
    origin: StepState,
    steps: Vec<Step>,
    kinds: KindCounts,
    careful: bool,
    /// Unit can hold an elevation above the ground on its own.
    flyer: bool,
    /// Hex every route found by [`MovePath::find_path_to`] must pass through.
    waypoint: Option<Coords>,
    visited: Visited,
}

/// Coordinates the steps enter, built on the first [`MovePath::crosses`] query.
#[derive(Clone, Debug, Default)]
struct Visited(OnceCell<BTreeSet<Coords>>);

impl Visited {
    fn get(&self, steps: &[Step]) -> &BTreeSet<Coords> {
        self.0
            .get_or_init(|| steps.iter().map(|step| step.state.coords).collect())
    }

    fn insert(&mut self, coords: Coords) {
        if let Some(set) = self.0.get_mut() {
            set.insert(coords);
        }
    }

    fn reset(&mut self) {
        self.0.take();
    }
}

// A cache never makes two paths differ.
impl PartialEq for Visited {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl Eq for Visited {}

impl MovePath {
    /// Starts an empty path at the unit's current position.
    pub fn new(env: &MoveEnv<'_>) -> Result<Self, PathError> {
        let unit = env.unit();
        if !env.board().contains(unit.position) {
            return Err(PathError::UnknownCoordinate(unit.position));
        }
        Ok(Self {
            unit: unit.id,
            board: env.board().id(),
            origin: StepState::origin(env),
            steps: Vec::new(),
            kinds: KindCounts::new(),
            careful: env.rules().careful_by_default,
            flyer: unit.is_aero() || unit.is_vtol() || unit.is_wige(),
            waypoint: None,
            visited: Visited::default(),
        })
    }

    /// Builds a path and appends every intent in order.
    pub fn compile<I>(env: &MoveEnv<'_>, intents: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = Intent>,
    {
        let mut path = Self::new(env)?;
        for intent in intents {
            path.append(intent, env)?;
        }
        Ok(path)
    }

    /// Resolves `intent` against the last step and appends the result.
    ///
    /// Rule violations produce an illegal step; only API misuse is an error.
    pub fn append(&mut self, intent: Intent, env: &MoveEnv<'_>) -> Result<&Step, PathError> {
        self.check_snapshot(env)?;
        self.validate(&intent, env)?;

        let ctx = PathContext {
            careful: self.careful,
            kinds: &self.kinds,
        };
        let state = handler::resolve(self.last_state(), &intent, &ctx, env);
        self.kinds.add(intent.kind);
        self.visited.insert(state.coords);
        self.steps.push(Step { intent, state });
        let index = self.steps.len() - 1;
        Ok(&self.steps[index])
    }

    /// Shorthand for appending an intent without target or payload.
    pub fn push(&mut self, kind: StepKind, env: &MoveEnv<'_>) -> Result<&Step, PathError> {
        self.append(Intent::new(kind), env)
    }

    /// Removes the last step.
    pub fn pop(&mut self) -> Option<Step> {
        let step = self.steps.pop()?;
        self.kinds.remove(step.kind());
        self.visited.reset();
        Some(step)
    }

    pub fn clear(&mut self) {
        self.steps.clear();
        self.kinds.clear();
        self.visited.reset();
    }

    /// Pins a hex that later pathfinder routes must pass through.
    pub fn set_waypoint(
        &mut self,
        waypoint: Option<Coords>,
        env: &MoveEnv<'_>,
    ) -> Result<(), PathError> {
        if let Some(coords) = waypoint
            && !env.board().contains(coords)
        {
            return Err(PathError::UnknownCoordinate(coords));
        }
        self.waypoint = waypoint;
        Ok(())
    }

    pub fn waypoint(&self) -> Option<Coords> {
        self.waypoint
    }

    /// Drops every step from the first illegal one onwards.
    ///
    /// Returns the number of steps removed.
    pub fn truncate_to_last_legal(&mut self) -> usize {
        let Some(first_illegal) = self.steps.iter().position(|step| !step.is_legal()) else {
            return 0;
        };
        let removed = self.steps.len() - first_illegal;
        while self.steps.len() > first_illegal {
            self.pop();
        }
        debug!(unit = %self.unit, removed, kept = self.steps.len(), "truncated path");
        removed
    }

    /// Replays every intent against a fresh snapshot of the same unit and board.
    ///
    /// On error the path is left exactly as it was.
    pub fn recompile(&mut self, env: &MoveEnv<'_>) -> Result<(), PathError> {
        self.check_snapshot(env)?;
        let mut next = Self::new(env)?;
        next.careful = self.careful;
        next.waypoint = self.waypoint;
        for step in &self.steps {
            next.append(step.intent.clone(), env)?;
        }
        debug!(unit = %self.unit, steps = next.steps.len(), "recompiled path");
        *self = next;
        Ok(())
    }

    /// Switches careful movement and recompiles, since costs depend on it.
    pub fn set_careful(&mut self, careful: bool, env: &MoveEnv<'_>) -> Result<(), PathError> {
        if self.careful == careful {
            return Ok(());
        }
        let previous = self.careful;
        self.careful = careful;
        let result = self.recompile(env);
        if result.is_err() {
            self.careful = previous;
        }
        result
    }

    /// Asks `pathfinder` for a route to `destination` and compiles it onto the path.
    ///
    /// A waypoint the path has not yet crossed is reached first. Returns the
    /// number of steps appended. All-or-nothing like [`MovePath::recompile`].
    pub fn find_path_to(
        &mut self,
        destination: Coords,
        preferred: StepKind,
        pathfinder: &dyn Pathfinder,
        budget: SearchBudget,
        env: &MoveEnv<'_>,
    ) -> Result<usize, PathError> {
        self.check_snapshot(env)?;
        if !env.board().contains(destination) {
            return Err(PathError::UnknownCoordinate(destination));
        }
        let mut next = self.clone();
        if let Some(waypoint) = self.waypoint
            && waypoint != destination
            && !self.crosses(waypoint)
        {
            next.extend_towards(waypoint, preferred, pathfinder, budget, env)?;
        }
        next.extend_towards(destination, preferred, pathfinder, budget, env)?;

        let appended = next.len() - self.len();
        debug!(unit = %self.unit, %destination, appended, "compiled pathfinder route");
        *self = next;
        Ok(appended)
    }

    fn extend_towards(
        &mut self,
        target: Coords,
        preferred: StepKind,
        pathfinder: &dyn Pathfinder,
        budget: SearchBudget,
        env: &MoveEnv<'_>,
    ) -> Result<(), PathError> {
        let intents = pathfinder
            .search(self, target, preferred, budget, env)
            .ok_or(PathError::NoPathFound(target))?;
        for intent in intents {
            self.append(intent, env)?;
        }
        Ok(())
    }

    pub fn unit(&self) -> EntityId {
        self.unit
    }

    pub fn board(&self) -> BoardId {
        self.board
    }

    pub fn origin(&self) -> &StepState {
        &self.origin
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_careful(&self) -> bool {
        self.careful
    }

    /// State after the last step, or the origin for an empty path.
    pub fn last_state(&self) -> &StepState {
        self.steps.last().map_or(&self.origin, |step| &step.state)
    }

    pub fn final_coords(&self) -> Coords {
        self.last_state().coords
    }

    pub fn final_facing(&self) -> Facing {
        self.last_state().facing
    }

    pub fn final_elevation(&self) -> i32 {
        self.last_state().elevation
    }

    pub fn total_mp(&self) -> u32 {
        self.last_state().mp_used
    }

    /// Hexes entered.
    pub fn distance(&self) -> u32 {
        self.last_state().distance
    }

    pub fn highest_move_type(&self) -> MoveType {
        self.last_state().highest
    }

    /// Any step triggered a piloting or control check.
    pub fn requires_check(&self) -> bool {
        self.steps.iter().any(|step| step.state.has_danger())
    }

    pub fn contains(&self, kind: StepKind) -> bool {
        self.kinds.contains(kind)
    }

    pub fn is_jumping(&self) -> bool {
        self.last_state().is_jumping()
    }

    pub fn is_airborne(&self) -> bool {
        let state = self.last_state();
        state.is_jumping() || state.altitude > 0 || (self.flyer && state.elevation > 0)
    }

    pub fn is_converting(&self) -> bool {
        self.last_state().flags.contains(StepFlags::CONVERTING)
    }

    /// The unit passes through or ends in `coords`.
    pub fn crosses(&self, coords: Coords) -> bool {
        self.visited.get(&self.steps).contains(&coords)
    }

    /// Heat generated by moving, plus heat from hazardous terrain.
    ///
    /// Only Meks build heat by moving.
    pub fn movement_heat(&self, env: &MoveEnv<'_>) -> u32 {
        let state = self.last_state();
        let movement = if env.unit().is_mek() {
            match state.highest {
                MoveType::Walk => 1,
                MoveType::Run => 2,
                MoveType::Sprint => 3,
                MoveType::Jump => state.distance.max(3),
                _ => 0,
            }
        } else {
            0
        };
        movement + state.total_heat
    }

    /// The last step is legal and a valid place to stop.
    pub fn is_valid(&self) -> bool {
        self.steps.last().is_some_and(|step| step.state.is_legal_end())
    }

    fn check_snapshot(&self, env: &MoveEnv<'_>) -> Result<(), PathError> {
        if env.unit().id != self.unit || env.board().id() != self.board {
            return Err(PathError::SnapshotMismatch {
                unit: self.unit,
                board: self.board,
            });
        }
        Ok(())
    }

    fn validate(&self, intent: &Intent, env: &MoveEnv<'_>) -> Result<(), PathError> {
        let kind = intent.kind;
        if let Some(last) = self.steps.last()
            && last.state.flags.contains(StepFlags::CLOSED)
        {
            return Err(PathError::PathClosed(last.kind()));
        }
        if kind.requires_target() && intent.target.is_none() {
            return Err(PathError::MissingTarget(kind));
        }
        if kind.requires_payload() && intent.payload.is_none() {
            return Err(PathError::MissingPayload(kind));
        }
        if let Some(coords) = intent.target_coords()
            && !env.board().contains(coords)
        {
            return Err(PathError::UnknownCoordinate(coords));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::config::RulesConfig;
    use crate::env::{BoardDimensions, Conditions, MapBoard, MovementMode, UnitClass, UnitSnapshot};
    use crate::step::{IllegalReason, StepTarget};

    fn board() -> MapBoard {
        MapBoard::new(BoardId(1), BoardDimensions::new(8, 8))
    }

    fn mek() -> UnitSnapshot {
        UnitSnapshot::new(EntityId(7), UnitClass::Mek, MovementMode::Biped)
            .with_walk(4)
            .at(Coords::new(3, 5), Facing::NORTH)
    }

    #[test]
    fn appending_after_a_charge_is_rejected() {
        let (board, unit) = (board(), mek());
        let (conditions, rules) = (Conditions::default(), RulesConfig::default());
        let env = MoveEnv::new(&board, &unit, &conditions, &rules);
        let mut path = MovePath::new(&env).unwrap();

        let ahead = unit.position.translated(Facing::NORTH);
        let charge = Intent::new(StepKind::Charge).targeting(StepTarget::Hex(ahead));
        assert!(path.append(charge, &env).unwrap().is_legal());

        let err = path.push(StepKind::Forward, &env).unwrap_err();
        assert_eq!(err, PathError::PathClosed(StepKind::Charge));
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn targets_must_exist_and_be_on_the_board() {
        let (board, unit) = (board(), mek());
        let (conditions, rules) = (Conditions::default(), RulesConfig::default());
        let env = MoveEnv::new(&board, &unit, &conditions, &rules);
        let mut path = MovePath::new(&env).unwrap();

        assert_eq!(
            path.push(StepKind::Charge, &env).unwrap_err(),
            PathError::MissingTarget(StepKind::Charge)
        );
        let far = Intent::new(StepKind::Charge).targeting(StepTarget::Hex(Coords::new(40, 40)));
        assert_eq!(
            path.append(far, &env).unwrap_err(),
            PathError::UnknownCoordinate(Coords::new(40, 40))
        );
        assert!(path.is_empty());
    }

    #[test]
    fn truncation_keeps_the_legal_prefix() {
        let (board, unit) = (board(), mek());
        let (conditions, rules) = (Conditions::default(), RulesConfig::default());
        let env = MoveEnv::new(&board, &unit, &conditions, &rules);
        let mut path = MovePath::new(&env).unwrap();

        path.push(StepKind::Forward, &env).unwrap();
        path.push(StepKind::StartJump, &env).unwrap();
        path.push(StepKind::Forward, &env).unwrap();
        assert_eq!(
            path.steps()[1].state.illegal_reason,
            Some(IllegalReason::NoJump)
        );

        assert_eq!(path.truncate_to_last_legal(), 2);
        assert_eq!(path.len(), 1);
        assert!(!path.contains(StepKind::StartJump));
        assert!(path.is_valid());
    }

    /// Walks straight ahead and records every destination it was asked for.
    #[derive(Default)]
    struct StraightAhead {
        asked: RefCell<Vec<Coords>>,
    }

    impl Pathfinder for StraightAhead {
        fn search(
            &self,
            start: &MovePath,
            destination: Coords,
            _: StepKind,
            _: SearchBudget,
            _: &MoveEnv<'_>,
        ) -> Option<Vec<Intent>> {
            self.asked.borrow_mut().push(destination);
            let hexes = start.final_coords().distance(destination) as usize;
            Some(vec![Intent::new(StepKind::Forward); hexes])
        }
    }

    #[test]
    fn crossed_hexes_follow_appends_and_undo() {
        let (board, unit) = (board(), mek());
        let (conditions, rules) = (Conditions::default(), RulesConfig::default());
        let env = MoveEnv::new(&board, &unit, &conditions, &rules);
        let one = unit.position.translated(Facing::NORTH);
        let two = one.translated(Facing::NORTH);

        let mut path = MovePath::compile(&env, [StepKind::Forward.into()]).unwrap();
        let before = path.clone();
        assert!(path.crosses(one));
        assert!(!path.crosses(unit.position));
        assert_eq!(path, before);

        path.push(StepKind::Forward, &env).unwrap();
        assert!(path.crosses(two));

        path.pop();
        assert!(!path.crosses(two));
        assert!(path.crosses(one));

        path.clear();
        assert!(!path.crosses(one));
    }

    #[test]
    fn routes_pass_through_the_waypoint_first() {
        let (board, unit) = (board(), mek());
        let (conditions, rules) = (Conditions::default(), RulesConfig::default());
        let env = MoveEnv::new(&board, &unit, &conditions, &rules);
        let waypoint = unit.position.translated(Facing::NORTH);
        let destination = waypoint.translated(Facing::NORTH);

        let mut path = MovePath::new(&env).unwrap();
        assert_eq!(
            path.set_waypoint(Some(Coords::new(40, 40)), &env).unwrap_err(),
            PathError::UnknownCoordinate(Coords::new(40, 40))
        );
        path.set_waypoint(Some(waypoint), &env).unwrap();
        assert_eq!(path.waypoint(), Some(waypoint));

        let pathfinder = StraightAhead::default();
        let appended = path
            .find_path_to(
                destination,
                StepKind::Forward,
                &pathfinder,
                SearchBudget::default(),
                &env,
            )
            .unwrap();
        assert_eq!(appended, 2);
        assert_eq!(*pathfinder.asked.borrow(), vec![waypoint, destination]);
        assert_eq!(path.final_coords(), destination);

        path.recompile(&env).unwrap();
        assert_eq!(path.waypoint(), Some(waypoint));
    }

    #[test]
    fn a_crossed_waypoint_is_not_revisited() {
        let (board, unit) = (board(), mek());
        let (conditions, rules) = (Conditions::default(), RulesConfig::default());
        let env = MoveEnv::new(&board, &unit, &conditions, &rules);
        let waypoint = unit.position.translated(Facing::NORTH);
        let destination = waypoint.translated(Facing::NORTH);

        let mut path = MovePath::compile(&env, [StepKind::Forward.into()]).unwrap();
        path.set_waypoint(Some(waypoint), &env).unwrap();

        let pathfinder = StraightAhead::default();
        path.find_path_to(
            destination,
            StepKind::Forward,
            &pathfinder,
            SearchBudget::default(),
            &env,
        )
        .unwrap();
        assert_eq!(*pathfinder.asked.borrow(), vec![destination]);
    }

    #[test]
    fn snapshot_for_another_unit_is_rejected_without_changes() {
        let (board, unit) = (board(), mek());
        let (conditions, rules) = (Conditions::default(), RulesConfig::default());
        let env = MoveEnv::new(&board, &unit, &conditions, &rules);
        let mut path = MovePath::compile(&env, [StepKind::Forward.into()]).unwrap();
        let before = path.clone();

        let stranger = UnitSnapshot { id: EntityId(99), ..mek() };
        let other = MoveEnv::new(&board, &stranger, &conditions, &rules);
        assert!(matches!(
            path.recompile(&other),
            Err(PathError::SnapshotMismatch { .. })
        ));
        assert_eq!(path, before);
    }
}
