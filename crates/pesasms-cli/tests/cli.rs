//! Integration tests for the pesasms binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

const KUTUMA_MESSAGE: &str = "TAD62EDKVQ Imethibitishwa Ksh1.00 imetumwa kwa John Doe \
                              0769641937 tarehe 13/1/25 saa 5:44 PM. Baki yako ya M-PESA ni \
                              Ksh263.47. Gharama ya kutuma ni Ksh0.00.";

const FAILURE_MESSAGE: &str =
    "Hakuna pesa za kutosha katika akaunti yako ya M-PESA kuweza kutuma Ksh3,251.00.";

#[test]
fn parse_success_as_json() {
    Command::cargo_bin("pesasms")
        .unwrap()
        .args(["parse", "--format", "json", KUTUMA_MESSAGE])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"SUCCESS\""))
        .stdout(predicate::str::contains("\"transaction_type\": \"KUTUMA\""))
        .stdout(predicate::str::contains("John Doe"));
}

#[test]
fn parse_failure_as_json() {
    Command::cargo_bin("pesasms")
        .unwrap()
        .args(["parse", "--format", "json", FAILURE_MESSAGE])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"FAILED\""))
        .stdout(predicate::str::contains("Hakuna pesa za kutosha"));
}

#[test]
fn parse_unrecognized_exits_nonzero() {
    Command::cargo_bin("pesasms")
        .unwrap()
        .args(["parse", "just some random text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not recognized"));
}

#[test]
fn batch_tallies_outcomes() {
    let mut input = tempfile::NamedTempFile::with_suffix(".txt").unwrap();
    writeln!(input, "{KUTUMA_MESSAGE}").unwrap();
    writeln!(input, "{FAILURE_MESSAGE}").unwrap();
    writeln!(input, "nothing recognizable").unwrap();

    Command::cargo_bin("pesasms")
        .unwrap()
        .args(["batch", input.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 successful"))
        .stdout(predicate::str::contains("1 failed transactions"))
        .stdout(predicate::str::contains("1 unrecognized"));
}

#[test]
fn demo_runs_clean() {
    Command::cargo_bin("pesasms")
        .unwrap()
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("KUTUMA"))
        .stdout(predicate::str::contains("FAILED"));
}
