//! End-to-end CLI tests driving the built binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn parkade_cmd() -> Command {
    Command::cargo_bin("parkade").unwrap()
}

/// Writes a one-area geometry: B1 -> P1, spots S1 (NORMAL, near),
/// S2 (EV, covered, far), S3 (PMR).
fn write_geometry(dir: &Path) {
    fs::write(
        dir.join("blocks.json"),
        r#"{"blocks": [{"id": "B1", "parking_id": "P1"}]}"#,
    )
    .unwrap();
    fs::write(
        dir.join("spots.json"),
        r#"{"spots": [
            {"id": "S1", "parking_id": "P1", "x": 10, "y": 0, "type": "NORMAL", "covered": 0},
            {"id": "S2", "parking_id": "P1", "x": 20, "y": 0, "type": "EV", "covered": 1},
            {"id": "S3", "parking_id": "P1", "x": 5, "y": 0, "type": "PMR", "covered": 0}
        ]}"#,
    )
    .unwrap();
    fs::write(dir.join("access_points.json"), r#"{"P1": {"x": 0, "y": 0}}"#).unwrap();
}

struct TestEnv {
    _root: TempDir,
    data_dir: String,
    geometry_dir: String,
}

fn setup() -> TestEnv {
    let root = TempDir::new().unwrap();
    let data_dir = root.path().join("data");
    let geometry_dir = root.path().join("geometry");
    fs::create_dir_all(&data_dir).unwrap();
    fs::create_dir_all(&geometry_dir).unwrap();
    write_geometry(&geometry_dir);

    TestEnv {
        data_dir: data_dir.to_str().unwrap().to_string(),
        geometry_dir: geometry_dir.to_str().unwrap().to_string(),
        _root: root,
    }
}

fn run(env: &TestEnv, args: &[&str]) -> assert_cmd::assert::Assert {
    parkade_cmd()
        .args(["--data-dir", &env.data_dir, "--geometry", &env.geometry_dir])
        .args(args)
        .assert()
}

#[test]
fn help_lists_commands() {
    parkade_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("allocate"))
        .stdout(predicate::str::contains("confirm"))
        .stdout(predicate::str::contains("cancel"));
}

#[test]
fn validate_accepts_good_geometry() {
    let env = setup();
    run(&env, &["validate"])
        .success()
        .stdout(predicate::str::contains("3 spots"));
}

#[test]
fn validate_rejects_dangling_references() {
    let env = setup();
    fs::write(
        Path::new(&env.geometry_dir).join("blocks.json"),
        r#"{"blocks": [{"id": "B1", "parking_id": "P9"}]}"#,
    )
    .unwrap();

    run(&env, &["validate"])
        .failure()
        .code(7)
        .stderr(predicate::str::contains("no access point"));
}

#[test]
fn allocate_confirm_cancel_flow() {
    let env = setup();

    run(&env, &["init"]).success();

    // NORMAL requester gets S1
    run(
        &env,
        &["allocate", "--block", "B1", "--class", "normal", "--tag", "RFID-1"],
    )
    .success()
    .stdout(predicate::str::contains("S1"));

    run(&env, &["confirm", "--spot", "S1"]).success();

    run(&env, &["cancel", "--spot", "S1"]).success();
    // Idempotent: a retried cancel also succeeds
    run(&env, &["cancel", "--spot", "S1"]).success();
}

#[test]
fn allocate_exhaustion_exits_semantic_failure() {
    let env = setup();

    for tag in ["V1", "V2", "V3"] {
        run(
            &env,
            &["allocate", "--block", "B1", "--class", "normal", "--tag", tag],
        )
        .success();
    }

    run(
        &env,
        &["allocate", "--block", "B1", "--class", "normal", "--tag", "V4"],
    )
    .failure()
    .code(1)
    .stderr(predicate::str::contains("NO_SPOT_AVAILABLE"));
}

#[test]
fn allocate_unknown_class_is_rejected() {
    let env = setup();

    run(
        &env,
        &["allocate", "--block", "B1", "--class", "submarine", "--tag", "V1"],
    )
    .failure()
    .code(4)
    .stderr(predicate::str::contains("unknown requester class"));
}

#[test]
fn allocate_unknown_block_is_rejected() {
    let env = setup();

    run(
        &env,
        &["allocate", "--block", "B9", "--class", "normal", "--tag", "V1"],
    )
    .failure()
    .code(4)
    .stderr(predicate::str::contains("unknown block"));
}

#[test]
fn confirm_without_reservation_is_invalid_transition() {
    let env = setup();
    run(&env, &["init"]).success();

    run(&env, &["confirm", "--spot", "S1"])
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid state transition"));
}

#[test]
fn weather_flag_roundtrip_and_tiebreak() {
    let env = setup();

    run(&env, &["weather"]).success().stdout(predicate::str::contains("dry"));

    run(&env, &["weather", "--set", "true", "--json"])
        .success()
        .stdout(predicate::str::contains("\"rain\":1"));

    // Raining: the EV fallback pass still ranks covered spots first, but a
    // NORMAL requester's first pass has only S1, so the grant is unchanged.
    run(
        &env,
        &["allocate", "--block", "B1", "--class", "normal", "--tag", "V1", "--json"],
    )
    .success()
    .stdout(predicate::str::contains("\"rain\": true"));
}

#[test]
fn list_reports_live_state() {
    let env = setup();

    run(
        &env,
        &["allocate", "--block", "B1", "--class", "pmr", "--tag", "RFID-7"],
    )
    .success()
    .stdout(predicate::str::contains("S3"));

    run(&env, &["list"])
        .success()
        .stdout(predicate::str::contains("RESERVED"))
        .stdout(predicate::str::contains("RFID-7"));

    run(&env, &["list", "--json"])
        .success()
        .stdout(predicate::str::contains("\"occupant\": \"RFID-7\""));
}

#[test]
fn block_and_unblock_steer_allocation() {
    let env = setup();

    run(&env, &["block", "--spot", "S1"]).success();

    // S1 blocked: the NORMAL requester falls through to the EV spot
    run(
        &env,
        &["allocate", "--block", "B1", "--class", "normal", "--tag", "V1"],
    )
    .success()
    .stdout(predicate::str::contains("S2"));

    run(&env, &["unblock", "--spot", "S1"]).success();

    run(
        &env,
        &["allocate", "--block", "B1", "--class", "normal", "--tag", "V2"],
    )
    .success()
    .stdout(predicate::str::contains("S1"));
}

#[test]
fn disable_autoinit_requires_init_first() {
    let env = setup();

    run(&env, &["--disable-autoinit", "list"]).failure().code(3);

    run(&env, &["init"]).success();
    run(&env, &["--disable-autoinit", "list"]).success();
}
