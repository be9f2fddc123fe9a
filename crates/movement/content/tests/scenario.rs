use std::fs;
use std::path::Path;

use movement_content::ScenarioLoader;
use movement_core::{
    Coords, Fog, MovePath, MoveType, OccupancyOracle, StepKind, StepTarget,
};

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("Failed to write fixture");
}

fn write_fixtures(dir: &Path) {
    write(
        dir,
        "board.ron",
        r#"(
            id: 1,
            dimensions: (8, 8),
            hexes: [
                (x: 3, y: 4, terrains: [(Woods, 1)]),
            ],
        )"#,
    );
    write(
        dir,
        "mek.ron",
        "(id: 1, class: Mek, mode: Biped, position: (3, 6), facing: 0, walk: 4, jump: 3)",
    );
    write(dir, "rules.toml", "sprint = true\n");
    write(
        dir,
        "scenario.ron",
        r#"(
            board: "board.ron",
            unit: "mek.ron",
            rules: Some("rules.toml"),
            conditions: (fog: Heavy),
            occupants: [
                (x: 5, y: 5, entity: 20, hostile: true),
            ],
            intents: [
                (kind: Forward),
                (kind: Forward),
                (kind: TurnRight),
                (kind: Charge, target: Some(Hex((x: 4, y: 3)))),
            ],
        )"#,
    );
}

#[test]
fn scenario_resolves_referenced_files_relative_to_itself() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_fixtures(dir.path());

    let scenario =
        ScenarioLoader::load(&dir.path().join("scenario.ron"), None).expect("scenario loads");

    assert!(scenario.rules.sprint);
    assert_eq!(scenario.conditions.fog, Fog::Heavy);
    assert_eq!(scenario.unit.position, Coords::new(3, 6));
    assert_eq!(scenario.intents.len(), 4);
    assert_eq!(
        scenario.intents[3].target,
        Some(StepTarget::Hex(Coords::new(4, 3)))
    );
    assert!(scenario.occupancy.is_occupied(Coords::new(5, 5)));
    assert_eq!(scenario.careful, None);
}

#[test]
fn rules_override_replaces_the_scenario_rules() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_fixtures(dir.path());
    write(dir.path(), "strict.toml", "sprint = false\nleaping = true\n");

    let scenario = ScenarioLoader::load(
        &dir.path().join("scenario.ron"),
        Some(&dir.path().join("strict.toml")),
    )
    .expect("scenario loads");
    assert!(!scenario.rules.sprint);
    assert!(scenario.rules.leaping);
}

#[test]
fn loaded_scenario_compiles() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_fixtures(dir.path());
    let scenario =
        ScenarioLoader::load(&dir.path().join("scenario.ron"), None).expect("scenario loads");

    let env = scenario.env();
    let kinds: Vec<StepKind> = scenario.intents.iter().map(|intent| intent.kind).collect();
    let path = MovePath::compile(&env, scenario.intents.iter().cloned().take(2))
        .expect("path compiles");

    assert_eq!(kinds[0], StepKind::Forward);
    // heavy fog adds a point to every hex; woods add one more on the second
    assert_eq!(path.steps()[0].state.mp, 2);
    assert_eq!(path.steps()[1].state.mp, 3);
    assert_eq!(path.highest_move_type(), MoveType::Run);
}

#[test]
fn missing_referenced_file_names_the_scenario() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write(
        dir.path(),
        "scenario.ron",
        r#"(board: "nowhere.ron", unit: "mek.ron")"#,
    );

    let err = ScenarioLoader::load(&dir.path().join("scenario.ron"), None)
        .expect_err("missing board must fail");
    let message = format!("{err:#}");
    assert!(message.contains("loading board"));
    assert!(message.contains("nowhere.ron"));
}
