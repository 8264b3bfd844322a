// Failure-path integration tests for the uvbridge binary.
//
// A successful open requires an installed UVtools core library, so these tests
// cover the discovery and bind contracts: the process must fail with the
// documented exit code before ever issuing the file prompt.
#![cfg(not(windows))]

use std::process::{Command, Stdio};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_uvbridge");
    let mut cmd = Command::new(exe);
    cmd.env_remove("UVTOOLS_PATH");
    cmd.stdin(Stdio::null());
    cmd
}

// -1 from std::process::exit is observed as 255 on Unix.
const FAILURE_CODE: i32 = 255;

#[test]
fn missing_env_var_fails_before_loading() {
    let output = cmd().output().expect("run uvbridge");
    assert_eq!(output.status.code(), Some(FAILURE_CODE));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unable to find the UVtools installation"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("UVTOOLS_PATH"), "stderr: {stderr}");

    // No version line and no prompt: the bind step was never reached.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.is_empty(), "stdout: {stdout}");
}

#[test]
fn env_var_pointing_at_a_missing_directory_fails() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("no-such-install");

    let output = cmd()
        .env("UVTOOLS_PATH", &missing)
        .output()
        .expect("run uvbridge");
    assert_eq!(output.status.code(), Some(FAILURE_CODE));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unable to find the UVtools installation"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("not a directory"), "stderr: {stderr}");
}

#[test]
fn install_dir_without_the_library_is_a_bind_failure() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = cmd()
        .env("UVTOOLS_PATH", temp.path())
        .output()
        .expect("run uvbridge");
    assert_eq!(output.status.code(), Some(FAILURE_CODE));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to load the UVtools core library"),
        "stderr: {stderr}"
    );

    // The prompt is only issued after a successful bind.
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.is_empty(), "stdout: {stdout}");
}

#[test]
fn positional_file_argument_is_accepted_by_the_parser() {
    // Discovery still fails first; the argument must not be rejected by clap.
    let output = cmd()
        .arg("/tmp/example.sl1")
        .output()
        .expect("run uvbridge");
    assert_eq!(output.status.code(), Some(FAILURE_CODE));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unable to find the UVtools installation"),
        "stderr: {stderr}"
    );
}

#[test]
fn help_exits_zero() {
    let output = cmd().arg("--help").output().expect("run uvbridge");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("uvbridge"), "stdout: {stdout}");
}
