use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::{tempdir, TempDir};

fn cli() -> Command {
    cargo_bin_cmd!("evrange-cli")
}

/// Command with colors, logging and the banner disabled.
fn quiet_command() -> Command {
    let mut cmd = cli();
    cmd.env("NO_COLOR", "1")
        .env("RUST_LOG", "error")
        .env_remove("EVRANGE_CONFIG")
        .arg("--no-logo");
    cmd
}

/// Quiet command isolated from any user configuration.
fn prepare_command() -> (Command, TempDir) {
    let temp_dir = tempdir().expect("create temp dir");
    let config_path = temp_dir.path().join("config.json");
    fs::write(&config_path, "{}").expect("write config");

    let mut cmd = quiet_command();
    cmd.arg("--config").arg(&config_path);
    (cmd, temp_dir)
}

#[test]
fn estimate_reference_scenario() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["estimate", "--soc", "80", "--capacity", "85", "--wh-per-km", "185"]);

    cmd.assert()
        .success()
        .stdout(contains("368 km at 18.5 kWh/100"));
}

#[test]
fn estimate_with_zero_consumption_reports_zero() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args([
        "--format", "json", "estimate", "--soc", "50", "--capacity", "60", "--wh-per-km", "0",
    ]);

    cmd.assert()
        .success()
        .stdout(contains(r#""range_km":0"#));
}

#[test]
fn drive_reports_projection_after_trip() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["drive", "--speed", "100", "--km", "1"]);

    cmd.assert()
        .success()
        .stdout(contains("odometer 1 km"))
        .stdout(contains("367 km | max 367 km | min 367 km | 18.5 kWh/100 | SoC 80 %"));
}

#[test]
fn drive_clamps_edits() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args([
        "--format", "json", "drive", "--speed", "50", "--km", "0", "--soc=150", "--capacity", "5",
    ]);

    // 100% of 10 kWh at the 180 Wh/km baseline.
    cmd.assert()
        .success()
        .stdout(contains(r#""normal_km":56"#))
        .stdout(contains(r#""soc_percent":100"#));
}

#[test]
fn drive_clamps_negative_capacity() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args([
        "--format", "json", "drive", "--speed", "50", "--km", "0", "--soc", "100", "--capacity",
        "-5",
    ]);

    // Same as a 5 kWh request: clamped up to 10 kWh.
    cmd.assert()
        .success()
        .stdout(contains(r#""normal_km":56"#))
        .stdout(contains(r#""soc_percent":100"#));
}

#[test]
fn drive_handles_the_largest_distance() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["--format", "json", "drive", "--speed", "100", "--km", "4294967295"]);

    cmd.assert()
        .success()
        .stdout(contains(r#""normal_km":0"#))
        .stdout(contains(r#""odometer_km":4294967295"#));
}

#[test]
fn session_reads_commands_from_stdin() {
    let (mut cmd, _temp) = prepare_command();
    cmd.arg("session")
        .write_stdin("show\nstep 130 5\nbogus\nreset\nquit\nstep 50\n");

    cmd.assert()
        .success()
        .stdout(contains("378 km | max 378 km | min 378 km | 18.0 kWh/100 | SoC 80 %"))
        .stdout(contains("22.0 kWh/100"))
        .stderr(contains("line 3: unknown command 'bogus'"));
}

#[test]
fn session_json_lines() {
    let (mut cmd, _temp) = prepare_command();
    cmd.args(["--format", "json", "session"])
        .write_stdin("soc 40\ncapacity\n");

    cmd.assert()
        .success()
        .stdout(contains(r#""soc_percent":40"#))
        .stdout(contains(r#""odometer_km":0"#));
}

#[test]
fn tiers_lists_default_model() {
    let (mut cmd, _temp) = prepare_command();
    cmd.arg("tiers");

    cmd.assert()
        .success()
        .stdout(contains("Consumption tiers:"))
        .stdout(contains("< 60"))
        .stdout(contains("60 - 110"))
        .stdout(contains(">= 110"));
}

#[test]
fn custom_config_changes_tiers_and_defaults() {
    let temp = tempdir().expect("create temp dir");
    let mut cmd = quiet_command();
    let custom = temp.path().join("custom.json");
    fs::write(
        &custom,
        r#"{ "initial_soc": 100, "initial_capacity_kwh": 50,
             "consumption": { "tiers": [], "top_wh_per_km": 125 } }"#,
    )
    .expect("write custom config");

    cmd.arg("--config").arg(&custom).args(["--format", "json", "drive", "--speed", "90"]);

    cmd.assert()
        .success()
        .stdout(contains(r#""kwh_per_100":12.5"#));
}

#[test]
fn config_from_environment_variable() {
    let temp = tempdir().expect("create temp dir");
    let custom = temp.path().join("env.json");
    fs::write(&custom, r#"{ "consumption": { "tiers": [], "top_wh_per_km": 150 } }"#)
        .expect("write config");

    let mut cmd = quiet_command();
    cmd.env("EVRANGE_CONFIG", &custom).arg("tiers");

    cmd.assert()
        .success()
        .stdout(contains("any").and(contains("150")));
}

#[test]
fn missing_config_file_fails() {
    let mut cmd = quiet_command();
    cmd.args(["--config", "/nonexistent/evrange.json", "tiers"]);

    cmd.assert()
        .failure()
        .stderr(contains("failed to load simulator configuration"));
}

#[test]
fn estimate_does_not_read_configuration() {
    let temp = tempdir().expect("create temp dir");
    let broken = temp.path().join("broken.json");
    fs::write(&broken, "{ not json").expect("write config");

    let mut cmd = quiet_command();
    cmd.env("EVRANGE_CONFIG", &broken)
        .args(["estimate", "--soc", "80", "--capacity", "85", "--wh-per-km", "185"]);
    cmd.assert().success().stdout(contains("368 km"));

    let mut cmd = quiet_command();
    cmd.env("EVRANGE_CONFIG", &broken).arg("tiers");
    cmd.assert()
        .failure()
        .stderr(contains("failed to load simulator configuration"));
}

#[test]
fn invalid_config_values_fail() {
    let temp = tempdir().expect("create temp dir");
    let mut cmd = quiet_command();
    let bad = temp.path().join("bad.json");
    fs::write(&bad, r#"{ "optimistic_percentile": 2 }"#).expect("write config");

    cmd.arg("--config").arg(&bad).arg("tiers");

    cmd.assert()
        .failure()
        .stderr(contains("optimistic_percentile"));
}

#[test]
fn text_output_includes_banner_unless_disabled() {
    let mut cmd = cli();
    cmd.env("NO_COLOR", "1")
        .env("RUST_LOG", "error")
        .env("LANG", "C")
        .env_remove("LC_ALL")
        .env_remove("EVRANGE_CONFIG")
        .args(["estimate", "--soc", "80", "--capacity", "85", "--wh-per-km", "185"]);

    cmd.assert()
        .success()
        .stdout(contains("EV RANGE SIMULATOR"))
        .stdout(contains("Completed in"));
}
