use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn gemini_chat_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gemini-chat"));
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env("APPDATA", config_home.path())
        .env_remove("GEMINI_CHAT_MODEL")
        .env_remove("GEMINI_CHAT_REVEAL_DELAY_MS");
    cmd
}

#[test]
fn test_cli_help() {
    let home = TempDir::new().unwrap();
    gemini_chat_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gemini"))
        .stdout(predicate::str::contains("--model"))
        .stdout(predicate::str::contains("--reveal-delay-ms"));
}

#[test]
fn test_cli_version() {
    let home = TempDir::new().unwrap();
    gemini_chat_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gemini-chat"));
}

#[test]
fn test_config_where() {
    let home = TempDir::new().unwrap();
    gemini_chat_cmd(&home)
        .args(["config", "where"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.toml");
    let path_arg = path.to_str().unwrap();

    gemini_chat_cmd(&home)
        .args(["--config", path_arg, "config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file"));

    assert!(path.exists());

    gemini_chat_cmd(&home)
        .args(["--config", path_arg, "config", "init"])
        .assert()
        .failure();
}

#[test]
fn test_config_show_applies_flags() {
    let home = TempDir::new().unwrap();
    gemini_chat_cmd(&home)
        .args(["-m", "gemini-1.5-pro", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("model = \"gemini-1.5-pro\""))
        .stdout(predicate::str::contains("reveal_delay_ms = 1"));
}

#[test]
fn test_config_show_reads_environment() {
    let home = TempDir::new().unwrap();
    gemini_chat_cmd(&home)
        .env("GEMINI_CHAT_REVEAL_DELAY_MS", "25")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reveal_delay_ms = 25"));
}

#[test]
fn test_invalid_temperature_is_rejected() {
    let home = TempDir::new().unwrap();
    gemini_chat_cmd(&home)
        .args(["--temperature", "5", "config", "show"])
        .assert()
        .failure();
}

#[test]
fn test_broken_explicit_config_is_an_error() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("broken.toml");
    std::fs::write(&path, "model = [").unwrap();

    gemini_chat_cmd(&home)
        .args(["--config", path.to_str().unwrap(), "config", "show"])
        .assert()
        .failure();
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("typo.toml");

    gemini_chat_cmd(&home)
        .args(["--config", path.to_str().unwrap(), "config", "show"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("model =").not());
}

#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    gemini_chat_cmd(&home).arg("invalid-command").assert().failure();
}
