use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn dangling_scan() -> Command {
    let mut cmd = Command::cargo_bin("dangling-scan").unwrap();
    for var in [
        "DANGLING_API_URL",
        "DANGLING_API_TOKEN",
        "DANGLING_NOTIFY_URL",
        "DANGLING_CONCURRENCY",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn empty_config() -> tempfile::NamedTempFile {
    tempfile::NamedTempFile::new().unwrap()
}

#[test]
fn test_help_lists_commands() {
    dangling_scan()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("zones"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_config_path_uses_explicit_file() {
    let config = empty_config();

    dangling_scan()
        .arg("--config")
        .arg(config.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config.path().to_string_lossy().as_ref()));
}

#[test]
fn test_config_show_masks_token() {
    let mut config = empty_config();
    writeln!(config, "api_token = \"abcd1234efgh5678\"").unwrap();

    dangling_scan()
        .arg("--config")
        .arg(config.path())
        .args(["--output", "json", "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("abcd...5678"))
        .stdout(predicate::str::contains("abcd1234efgh5678").not());
}

#[test]
fn test_scan_without_api_url_fails() {
    let config = empty_config();

    dangling_scan()
        .arg("--config")
        .arg(config.path())
        .arg("scan")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Gateway URL required"));
}

#[test]
fn test_unreachable_directory_exits_with_2() {
    let config = empty_config();

    dangling_scan()
        .arg("--config")
        .arg(config.path())
        .args([
            "--api-url",
            "http://127.0.0.1:9",
            "--max-retries",
            "0",
            "--timeout",
            "5",
            "scan",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("DNS directory service unreachable"));
}

#[test]
fn test_invalid_config_file_fails() {
    let mut config = empty_config();
    writeln!(config, "concurrency = [").unwrap();

    dangling_scan()
        .arg("--config")
        .arg(config.path())
        .args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid config file"));
}
