use movement_core::{
    Coords, Intent, MoveEnv, MovePath, PathError, SearchBudget, Step, StepKind,
};
use tracing::{debug, info};

use crate::search::BestFirstPathfinder;

/// One unit's path under construction, bound to the snapshot it compiles against.
#[derive(Debug)]
pub struct PlanningSession<'a> {
    env: MoveEnv<'a>,
    path: MovePath,
    pathfinder: BestFirstPathfinder,
    budget: SearchBudget,
}

impl<'a> PlanningSession<'a> {
    pub fn new(env: MoveEnv<'a>) -> Result<Self, PathError> {
        let path = MovePath::new(&env)?;
        info!(unit = %path.unit(), board = %path.board(), "planning session started");
        Ok(Self {
            env,
            path,
            pathfinder: BestFirstPathfinder::new(),
            budget: SearchBudget::default(),
        })
    }

    #[must_use]
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn env(&self) -> &MoveEnv<'a> {
        &self.env
    }

    pub fn path(&self) -> &MovePath {
        &self.path
    }

    pub fn into_path(self) -> MovePath {
        self.path
    }

    pub fn append(&mut self, intent: Intent) -> Result<&Step, PathError> {
        let step = self.path.append(intent, &self.env)?;
        debug!(
            kind = %step.kind(),
            coords = %step.state.coords,
            mp_used = step.state.mp_used,
            move_type = %step.state.move_type,
            legal = step.is_legal(),
            "appended step"
        );
        Ok(step)
    }

    pub fn push(&mut self, kind: StepKind) -> Result<&Step, PathError> {
        self.append(Intent::new(kind))
    }

    /// Removes the last step.
    pub fn undo(&mut self) -> Option<Step> {
        let step = self.path.pop()?;
        debug!(kind = %step.kind(), remaining = self.path.len(), "undid step");
        Some(step)
    }

    pub fn clear(&mut self) {
        debug!(removed = self.path.len(), "cleared path");
        self.path.clear();
    }

    pub fn set_careful(&mut self, careful: bool) -> Result<(), PathError> {
        self.path.set_careful(careful, &self.env)
    }

    pub fn set_waypoint(&mut self, waypoint: Option<Coords>) -> Result<(), PathError> {
        self.path.set_waypoint(waypoint, &self.env)
    }

    /// Routes the path to `destination`, returning how many steps were added.
    pub fn plan_to(&mut self, destination: Coords, preferred: StepKind) -> Result<usize, PathError> {
        let appended = self.path.find_path_to(
            destination,
            preferred,
            &self.pathfinder,
            self.budget,
            &self.env,
        )?;
        info!(%destination, appended, mp = self.path.total_mp(), "planned route");
        Ok(appended)
    }

    /// Rebinds the session to a newer snapshot and recompiles.
    ///
    /// On error the session keeps its previous snapshot and path.
    pub fn refresh(&mut self, env: MoveEnv<'a>) -> Result<(), PathError> {
        self.path.recompile(&env)?;
        self.env = env;
        Ok(())
    }
}
