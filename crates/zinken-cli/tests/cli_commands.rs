//! Integration tests for the zinken CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn zinken() -> Command {
    Command::cargo_bin("zinken").unwrap()
}

/// Write a test character sheet and return its path.
fn sheet_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("kael.json");
    fs::write(
        &path,
        r#"{
    "name": "Kael",
    "proficiency_bonus": 3,
    "abilities": {
        "strength": 16,
        "dexterity": 14,
        "wisdom": 8
    },
    "skills": {
        "stealth": { "ability": "dexterity", "training": "proficient" }
    },
    "saves": ["dexterity"],
    "attacks": {
        "longsword": { "ability": "strength", "bonus": 1 }
    }
}
"#,
    )
    .unwrap();
    path
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_reports_a_total() {
    zinken()
        .args(["roll", "1d20 + 5", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rolling").and(predicate::str::contains("Total")));
}

#[test]
fn roll_is_deterministic_with_a_seed() {
    let first = zinken()
        .args(["roll", "3d6 + 1", "--seed", "99"])
        .output()
        .unwrap();
    let second = zinken()
        .args(["roll", "3d6 + 1", "--seed", "99"])
        .output()
        .unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn roll_substitutes_bindings() {
    zinken()
        .args(["roll", "@prof + 2", "-b", "prof=3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5"));
}

#[test]
fn roll_rejects_a_malformed_formula() {
    zinken()
        .args(["roll", "1d20 +"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid formula"));
}

#[test]
fn roll_rejects_an_unbound_variable() {
    zinken()
        .args(["roll", "1d20 + @prof"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unbound variable: @prof"));
}

#[test]
fn roll_rejects_a_malformed_binding() {
    zinken()
        .args(["roll", "1d6", "-b", "prof"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("name=value"));
}

// ---------------------------------------------------------------------------
// seek
// ---------------------------------------------------------------------------

#[test]
fn seek_lands_on_the_target() {
    zinken()
        .args(["seek", "1d20 + 5", "--target", "17", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("landed on 17"));
}

#[test]
fn seek_without_a_target_shows_the_best_case() {
    zinken()
        .args(["seek", "2d20kh + 3"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("best possible roll").and(predicate::str::contains("23")),
        );
}

#[test]
fn seek_warns_on_an_unreachable_target() {
    zinken()
        .args(["seek", "1d20 + 5", "--target", "30", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("outside the achievable range 6..=25"));
}

#[test]
fn seek_warns_when_attempts_run_out() {
    zinken()
        .args([
            "seek",
            "5d20",
            "--target",
            "100",
            "--max-attempts",
            "3",
            "--seed",
            "7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("gave up after 3 attempts"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_seeks_the_requested_total() {
    let dir = TempDir::new().unwrap();
    let sheet = sheet_file(&dir);
    zinken()
        .args([
            "check",
            sheet.to_str().unwrap(),
            "skill",
            "stealth",
            "--target",
            "17",
            "--seed",
            "42",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Kael")
                .and(predicate::str::contains("stealth (skill check)"))
                .and(predicate::str::contains("landed on 17")),
        );
}

#[test]
fn check_without_a_target_rolls_honestly() {
    let dir = TempDir::new().unwrap();
    let sheet = sheet_file(&dir);
    zinken()
        .args([
            "check",
            sheet.to_str().unwrap(),
            "save",
            "dexterity",
            "--seed",
            "1",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("dexterity (saving throw)")
                .and(predicate::str::contains("Total")),
        );
}

#[test]
fn check_advantage_rolls_two_dice() {
    let dir = TempDir::new().unwrap();
    let sheet = sheet_file(&dir);
    zinken()
        .args([
            "check",
            sheet.to_str().unwrap(),
            "attack",
            "longsword",
            "--advantage",
            "--seed",
            "1",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("2d20kh")
                .and(predicate::str::contains("with advantage")),
        );
}

#[test]
fn check_rejects_an_unknown_skill() {
    let dir = TempDir::new().unwrap();
    let sheet = sheet_file(&dir);
    zinken()
        .args(["check", sheet.to_str().unwrap(), "skill", "juggling"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown skill: juggling"));
}

#[test]
fn check_rejects_a_missing_sheet() {
    zinken()
        .args(["check", "/no/such/sheet.json", "skill", "stealth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// odds
// ---------------------------------------------------------------------------

#[test]
fn odds_prints_the_distribution() {
    zinken()
        .args(["odds", "2d6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("16.67%"));
}

#[test]
fn odds_reports_seek_statistics_for_a_target() {
    zinken()
        .args(["odds", "1d6", "--target", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("about 6 seek attempts expected"));
}

#[test]
fn odds_warns_on_an_unreachable_target() {
    zinken()
        .args(["odds", "1d6", "--target", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unreachable"));
}
