mod common;

use std::fs;

use parcelgrid_lib::{
    render_plan, solve, AssignmentPolicy, Coord, Error, RenderMode, Scenario, SolveOptions,
    Strategy,
};
use tempfile::tempdir;

const LEGACY_STATE: &str = "3;3;1;1;2,2;";
const LEGACY_TRAFFIC: &str = "0,0,1,0,2;1,0,2,0,2;2,0,2,1,2;2,1,2,2,2;0,0,0,1,4;0,1,0,2,4;0,2,1,2,4;1,2,2,2,4";

#[test]
fn loads_json_scenario_with_options() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("scenario.json");
    fs::write(
        &path,
        r#"{
            "rows": 3,
            "columns": 3,
            "stores": [{"x": 0, "y": 0}],
            "customers": [{"x": 2, "y": 2}],
            "tunnels": [{"from": {"x": 0, "y": 2}, "to": {"x": 2, "y": 0}}],
            "traffic": [
                {"from": {"x": 0, "y": 0}, "to": {"x": 0, "y": 1}, "level": 1},
                {"from": {"x": 0, "y": 1}, "to": {"x": 0, "y": 2}, "level": 1},
                {"from": {"x": 2, "y": 0}, "to": {"x": 2, "y": 1}, "level": 1},
                {"from": {"x": 2, "y": 1}, "to": {"x": 2, "y": 2}, "level": 1}
            ],
            "options": {"strategy": "UC", "policy": "reusable"}
        }"#,
    )
    .expect("write scenario");

    let scenario = Scenario::load(&path).expect("scenario loads");
    let options = scenario.options.expect("options block present");
    assert_eq!(options.strategy, Strategy::UniformCost);
    assert_eq!(options.policy, AssignmentPolicy::ReusableTruck);

    let plan = solve(&scenario, &options).expect("scenario solves");
    assert_eq!(plan.deliveries.len(), 1);
    // right, right, tunnel (4), right, right
    assert_eq!(plan.deliveries[0].cost, 8);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("absent.json");
    let err = Scenario::load(&path).unwrap_err();
    assert!(matches!(err, Error::ScenarioRead { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn legacy_plan_renders_original_line_format() {
    let scenario = Scenario::from_legacy(LEGACY_STATE, LEGACY_TRAFFIC).expect("legacy parses");
    let plan = solve(
        &scenario,
        &SolveOptions::default().with_strategy(Strategy::UniformCost),
    )
    .expect("scenario solves");
    assert_eq!(
        render_plan(&plan, RenderMode::Legacy),
        "(Store0,Customer0);down,down,right,right;8;6"
    );
}

#[test]
fn legacy_traffic_stays_directional() {
    let scenario = Scenario::from_legacy(LEGACY_STATE, LEGACY_TRAFFIC).expect("legacy parses");
    let grid = scenario.build_grid().expect("valid scenario");
    assert!(grid.is_passable(Coord::new(0, 0), Coord::new(1, 0)));
    assert!(!grid.is_passable(Coord::new(1, 0), Coord::new(0, 0)));
}

#[test]
fn validation_rejects_bad_input() {
    let cases = [
        Scenario::new(0, 3),
        Scenario::new(3, 3).with_edge(Coord::new(0, 0), Coord::new(0, 1), 5),
        Scenario::new(3, 3).with_edge(Coord::new(0, 0), Coord::new(2, 2), 1),
        Scenario::new(3, 3).with_tunnel(Coord::new(1, 1), Coord::new(1, 1)),
        Scenario::new(3, 3).with_tunnel(Coord::new(1, 1), Coord::new(3, 1)),
        Scenario::new(3, 3).with_store(Coord::new(-1, 0)),
        Scenario::new(3, 3).with_truck(Coord::new(0, 3)),
    ];
    for scenario in cases {
        assert!(scenario.validate().is_err(), "{scenario:?}");
    }
    common::uniform_scenario(3, 3, 4)
        .with_store(Coord::new(0, 0))
        .validate()
        .expect("valid scenario");
}

#[test]
fn explicit_trucks_override_store_positions() {
    let scenario = common::uniform_scenario(3, 3, 1)
        .with_store(Coord::new(0, 0))
        .with_truck(Coord::new(2, 1))
        .with_customer(Coord::new(2, 2));
    assert_eq!(scenario.truck_positions(), vec![Coord::new(2, 1)]);
    let plan = solve(&scenario, &SolveOptions::default()).expect("scenario solves");
    assert_eq!(plan.deliveries[0].cost, 1);
}

#[test]
fn scenario_round_trips_through_json() {
    let scenario = common::uniform_scenario(2, 2, 3)
        .with_store(Coord::new(0, 0))
        .with_customer(Coord::new(1, 1))
        .with_tunnel(Coord::new(0, 1), Coord::new(1, 0))
        .with_symmetric_traffic(false);
    let json = serde_json::to_string(&scenario).expect("serialize");
    let parsed = Scenario::from_json_str(&json).expect("deserialize");
    assert_eq!(parsed, scenario);
}

#[test]
fn options_block_accepts_mixed_case_strategy_codes() {
    let scenario = Scenario::from_json_str(
        r#"{"rows": 2, "columns": 2, "options": {"strategy": "As1", "policy": "unique"}}"#,
    )
    .expect("scenario parses");
    let options = scenario.options.expect("options block present");
    assert_eq!(options.strategy, Strategy::AStarManhattan);
    assert_eq!(options.policy, AssignmentPolicy::UniqueTruck);
}
