use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

#[test]
fn help_lists_every_flag_group() {
    let mut cmd = cargo_bin_cmd!("cgx-tagger");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("Action"))
        .stdout(contains("Interfaces"))
        .stdout(contains("API"))
        .stdout(contains("Login"))
        .stdout(contains("Debug"));
}

#[test]
fn help_names_long_flags() {
    let mut cmd = cargo_bin_cmd!("cgx-tagger");
    let assert = cmd.arg("--help").assert().success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for flag in [
        "--add",
        "--remove",
        "--simulate",
        "--tag",
        "--object",
        "--key",
        "--pattern",
        "--interfaces-site-key",
        "--interfaces-site-pattern",
        "--interfaces-element-key",
        "--interfaces-element-pattern",
        "--output",
        "--controller",
        "--email",
        "--password",
        "--insecure",
        "--noregion",
        "--settings",
        "--sdkdebug",
    ] {
        assert!(out.contains(flag), "help is missing {flag}");
    }
}

#[test]
fn short_help_and_version() {
    cargo_bin_cmd!("cgx-tagger").arg("-h").assert().success();
    cargo_bin_cmd!("cgx-tagger")
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("cgx-tagger 1.0.0"));
}
