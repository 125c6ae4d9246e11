use assert_cmd::Command;

#[test]
fn help_lists_lesson_options() {
    let output = Command::cargo_bin("keys")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    for flag in ["--unlocked", "--length", "--word-file", "--target-wpm", "--seed"] {
        assert!(help.contains(flag), "missing {flag} in help");
    }
}

#[test]
fn version_succeeds() {
    Command::cargo_bin("keys")
        .unwrap()
        .arg("--version")
        .assert()
        .success();
}

#[test]
fn refuses_to_run_without_a_tty() {
    Command::cargo_bin("keys")
        .unwrap()
        .arg("--no-save")
        .write_stdin("")
        .assert()
        .failure();
}
