// chatfilter/tests/cli_integration_tests.rs
//! Command-line integration tests for the `chatfilter` binary.
//!
//! Every test points `--config` and `--data-dir` at a temporary directory so
//! that nothing from the user's real configuration leaks in.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r##"
forbidden-words:
  - heck
forbidden-regex:
  - "b+a+d"
  - "(broken"
censor-character: "#"
warning-message: "&cWatch it!"
filter-signs: false
"##;

fn write_config(dir: &Path, body: &str) -> Result<std::path::PathBuf> {
    let path = dir.join("config.yml");
    fs::write(&path, body)?;
    Ok(path)
}

fn chatfilter(dir: &TempDir, config: &Path) -> Result<Command> {
    let mut cmd = Command::cargo_bin("chatfilter")?;
    cmd.env_remove("RUST_LOG")
        .arg("--config")
        .arg(config)
        .arg("--data-dir")
        .arg(dir.path().join("data"));
    Ok(cmd)
}

#[test]
fn test_check_censors_argument() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_config(dir.path(), CONFIG)?;
    chatfilter(&dir, &config)?
        .args(["check", "What the HECK, so baaad"])
        .assert()
        .success()
        .stdout("What the ####, so #####\n");
    Ok(())
}

#[test]
fn test_check_reads_stdin_line_by_line() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_config(dir.path(), CONFIG)?;
    chatfilter(&dir, &config)?
        .arg("check")
        .write_stdin("clean line\nheck\n")
        .assert()
        .success()
        .stdout("clean line\n####\n")
        .stderr(predicate::str::contains("Censored 1 of 2 line(s)."));
    Ok(())
}

#[test]
fn test_check_respects_surface_toggle() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_config(dir.path(), CONFIG)?;
    chatfilter(&dir, &config)?
        .args(["check", "--surface", "sign", "heck"])
        .assert()
        .success()
        .stdout("heck\n");
    Ok(())
}

#[test]
fn test_check_fail_on_violation() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_config(dir.path(), CONFIG)?;
    chatfilter(&dir, &config)?
        .args(["check", "--fail-on-violation", "heck"])
        .assert()
        .failure()
        .stdout("####\n");
    chatfilter(&dir, &config)?
        .args(["check", "--fail-on-violation", "fine"])
        .assert()
        .success();
    Ok(())
}

#[test]
fn test_validate_reports_rejected_pattern() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_config(dir.path(), CONFIG)?;
    chatfilter(&dir, &config)?
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("'(broken'"))
        .stdout(predicate::str::contains("Warning message: Watch it!"))
        .stdout(predicate::str::contains("1 forbidden word(s), 1 pattern(s) compiled, 1 rejected."));
    Ok(())
}

#[test]
fn test_missing_config_file_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    chatfilter(&dir, &dir.path().join("nope.yml"))?
        .args(["check", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
    Ok(())
}

#[test]
fn test_run_bridge_skips_disabled_surface() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_config(dir.path(), CONFIG)?;
    let request = r#"{"type":"submission","actor":{"name":"Steve","id":"123e4567-e89b-12d3-a456-426614174000"},"event":{"surface":"sign","lines":["hi",null,"heck",null]}}"#;

    let output = chatfilter(&dir, &config)?
        .arg("run")
        .write_stdin(format!("{}\n", request))
        .output()?;
    assert!(output.status.success());

    let lines: Vec<serde_json::Value> = String::from_utf8(output.stdout)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["status"], "skipped");
    assert_eq!(lines[0]["reason"], "surface_disabled");
    assert_eq!(lines[0]["event"]["lines"][2], "heck");
    Ok(())
}

#[test]
fn test_run_bridge_writes_offense_log() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_config(dir.path(), CONFIG)?;
    let request = r#"{"type":"submission","actor":{"name":"Steve","id":"123e4567-e89b-12d3-a456-426614174000"},"event":{"surface":"chat","message":"oh heck"}}"#;

    chatfilter(&dir, &config)?
        .arg("run")
        .write_stdin(format!("{}\n", request))
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""message":"§cWatch it!""#))
        .stdout(predicate::str::contains(r#""message":"oh ####""#));

    let log = fs::read_to_string(dir.path().join("data").join("offenses.log"))?;
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains(
        "Player: Steve (123e4567-e89b-12d3-a456-426614174000) | Context: CHAT | Message: oh heck"
    ));
    Ok(())
}

#[test]
fn test_run_bridge_reload_command() -> Result<()> {
    let dir = TempDir::new()?;
    let config = write_config(dir.path(), CONFIG)?;
    let denied = r#"{"type":"command","sender":{"name":"Alex","id":"00000000-0000-0000-0000-000000000002"},"args":["reload"]}"#;
    let console = r#"{"type":"command","args":["reload"]}"#;

    chatfilter(&dir, &config)?
        .args(["run", "--no-offense-log"])
        .write_stdin(format!("{}\n{}\n", denied, console))
        .assert()
        .success()
        .stdout(predicate::str::contains("You don't have permission to use this command."))
        .stdout(predicate::str::contains("ChatFilter configuration reloaded successfully!"));
    assert!(!dir.path().join("data").join("offenses.log").exists());
    Ok(())
}

#[test]
fn test_init_config_writes_default_once() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("fresh").join("config.yml");

    chatfilter(&dir, &path)?.arg("init-config").assert().success();
    assert!(fs::read_to_string(&path)?.contains("forbidden-words"));

    chatfilter(&dir, &path)?
        .arg("init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    chatfilter(&dir, &path)?.args(["init-config", "--force"]).assert().success();
    Ok(())
}
