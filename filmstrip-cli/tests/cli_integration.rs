use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

fn filmstrip_cmd() -> Command {
    Command::cargo_bin("filmstrip").expect("Failed to find filmstrip binary")
}

#[test]
fn formats_lists_every_format_with_properties() -> Result<(), Box<dyn Error>> {
    filmstrip_cmd()
        .arg("formats")
        .assert()
        .success()
        .stdout(contains("DVD (MPG)"))
        .stdout(contains("Flash-Video (FLV)"))
        .stdout(contains("FFOURCC (default: XVID)"))
        .stdout(contains("RenderSubtitle (default: false)"));
    Ok(())
}

#[test]
fn render_requires_input_and_output() {
    filmstrip_cmd()
        .arg("render")
        .assert()
        .failure()
        .stderr(contains("--input"));
}

#[test]
fn render_rejects_unknown_format() -> Result<(), Box<dyn Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    filmstrip_cmd()
        .arg("render")
        .arg("--input")
        .arg(input.path())
        .arg("--output")
        .arg(output.path())
        .arg("--format")
        .arg("divx5")
        .assert()
        .failure()
        .stderr(contains("unknown format"));
    Ok(())
}

#[test]
fn render_rejects_unknown_profile() -> Result<(), Box<dyn Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    filmstrip_cmd()
        .arg("render")
        .arg("--input")
        .arg(input.path())
        .arg("--output")
        .arg(output.path())
        .arg("--profile")
        .arg("Betamax")
        .arg("--skip-checks")
        .assert()
        .failure()
        .stderr(contains("unknown profile"));
    Ok(())
}

#[test]
fn render_rejects_malformed_property_assignment() -> Result<(), Box<dyn Error>> {
    let input = tempdir()?;
    let output = tempdir()?;
    filmstrip_cmd()
        .arg("render")
        .arg("--input")
        .arg(input.path())
        .arg("--output")
        .arg(output.path())
        .arg("--set")
        .arg("BitrateWithoutValue")
        .arg("--skip-checks")
        .assert()
        .failure()
        .stderr(contains("PROP=VALUE"));
    Ok(())
}
