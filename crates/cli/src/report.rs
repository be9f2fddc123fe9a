//! Printable summary of a compiled path.
use std::fmt;

use movement_core::{Coords, MoveEnv, MovePath, Step};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub kind: String,
    pub coords: Coords,
    pub facing: u8,
    pub elevation: i32,
    pub mp: u32,
    pub mp_used: u32,
    pub move_type: String,
    pub danger: bool,
    pub illegal_reason: Option<String>,
    pub end_violation: Option<String>,
}

impl StepReport {
    fn new(index: usize, step: &Step) -> Self {
        let state = &step.state;
        Self {
            index,
            kind: step.kind().to_string(),
            coords: state.coords,
            facing: state.facing.index(),
            elevation: state.elevation,
            mp: state.mp,
            mp_used: state.mp_used,
            move_type: state.move_type.to_string(),
            danger: state.has_danger(),
            illegal_reason: state.illegal_reason.map(|reason| reason.to_string()),
            end_violation: state.end_violation.map(|reason| reason.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub unit: u32,
    pub board: u16,
    pub careful: bool,
    pub steps: Vec<StepReport>,
    pub final_coords: Coords,
    pub final_facing: u8,
    pub total_mp: u32,
    pub distance: u32,
    pub highest_move_type: String,
    pub requires_check: bool,
    pub movement_heat: u32,
    pub valid: bool,
}

impl Report {
    pub fn new(path: &MovePath, env: &MoveEnv<'_>) -> Self {
        Self {
            unit: path.unit().0,
            board: path.board().0,
            careful: path.is_careful(),
            steps: path
                .steps()
                .iter()
                .enumerate()
                .map(|(index, step)| StepReport::new(index, step))
                .collect(),
            final_coords: path.final_coords(),
            final_facing: path.final_facing().index(),
            total_mp: path.total_mp(),
            distance: path.distance(),
            highest_move_type: path.highest_move_type().to_string(),
            requires_check: path.requires_check(),
            movement_heat: path.movement_heat(env),
            valid: path.is_valid(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "unit #{} on board {}", self.unit, self.board)?;
        for step in &self.steps {
            write!(
                f,
                "{:>3}  {:<22} {:<10} facing {}  mp {:>2} ({:>2})  {}",
                step.index,
                step.kind,
                step.coords.to_string(),
                step.facing,
                step.mp,
                step.mp_used,
                step.move_type,
            )?;
            if step.danger {
                write!(f, "  [check]")?;
            }
            if let Some(reason) = &step.illegal_reason {
                write!(f, "  illegal: {reason}")?;
            } else if let Some(reason) = &step.end_violation {
                write!(f, "  cannot end: {reason}")?;
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "ends at {} facing {} after {} hexes, {} mp, {}",
            self.final_coords, self.final_facing, self.distance, self.total_mp, self.highest_move_type
        )?;
        writeln!(
            f,
            "heat {}  check {}  valid {}",
            self.movement_heat, self.requires_check, self.valid
        )
    }
}

#[cfg(test)]
mod tests {
    use movement_core::{
        BoardDimensions, BoardId, Conditions, EntityId, Facing, Intent, MapBoard, MovementMode,
        RulesConfig, StepKind, UnitClass, UnitSnapshot,
    };

    use super::*;

    #[test]
    fn report_lists_every_step_and_serializes() {
        let board = MapBoard::new(BoardId(2), BoardDimensions::new(6, 6));
        let unit = UnitSnapshot::new(EntityId(5), UnitClass::Mek, MovementMode::Biped)
            .with_walk(3)
            .at(Coords::new(2, 4), Facing::NORTH);
        let (conditions, rules) = (Conditions::default(), RulesConfig::default());
        let env = MoveEnv::new(&board, &unit, &conditions, &rules);
        let kinds = [StepKind::Forward, StepKind::TurnRight, StepKind::Forward];
        let path = MovePath::compile(&env, kinds.map(Intent::from)).unwrap();

        let report = Report::new(&path, &env);
        assert_eq!(report.steps.len(), 3);
        assert_eq!(report.total_mp, 3);
        assert_eq!(report.highest_move_type, "walk");
        assert_eq!(report.movement_heat, 1);

        let text = report.to_string();
        assert!(text.contains("turn_right"));
        assert!(text.contains("valid true"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["steps"][0]["kind"], "forward");
        assert_eq!(json["final_coords"]["x"], 3);
    }
}
