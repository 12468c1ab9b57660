// Integration testing can be done either by calling library functions directly or by invoking your CLI as a subprocess.
mod common;

use common::{fixture, write};
use predicates::prelude::*;

#[test]
fn generates_project() {
    let fx = fixture("Release");
    let mut cmd = assert_cmd::Command::cargo_bin("xwalk-corelib").unwrap();

    cmd.arg("-s").arg(&fx.source).arg("-t").arg(&fx.target);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Your Android library project has been created at",
        ));

    assert!(fx.library().join("src").join("README.md").is_file());
}

#[test]
fn missing_source_exits_with_one() {
    let fx = fixture("Release");
    let marker = fx.library().join("keep.txt");
    write(&marker, b"keep");
    let mut cmd = assert_cmd::Command::cargo_bin("xwalk-corelib").unwrap();

    cmd.arg("--source")
        .arg(fx.root.path().join("missing"))
        .arg("--target")
        .arg(&fx.target);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Source project does not exist"));

    assert!(marker.is_file());
}

#[test]
fn requires_target() {
    let fx = fixture("Release");
    let mut cmd = assert_cmd::Command::cargo_bin("xwalk-corelib").unwrap();

    cmd.arg("-s").arg(&fx.source);

    cmd.assert().failure();
}

#[test]
fn config_overrides_pak_list() {
    let fx = fixture("Debug");
    let config = fx.root.path().join("layout.toml");
    write(&config, br#"paks = ["xwalk.pak"]"#);
    let mut cmd = assert_cmd::Command::cargo_bin("xwalk-corelib").unwrap();

    cmd.arg("-s")
        .arg(&fx.source)
        .arg("-t")
        .arg(&fx.target)
        .arg("-c")
        .arg(&config);

    cmd.assert().success();

    let list = std::fs::read_to_string(
        fx.library()
            .join("res")
            .join("values")
            .join("xwalk_resources_list.xml"),
    )
    .unwrap();
    assert_eq!(list.matches("<item>").count(), 1);
    assert!(!fx.library().join("res").join("raw").join("icudtl.dat").exists());
}

#[test]
fn invalid_config_is_reported() {
    let fx = fixture("Debug");
    let config = fx.root.path().join("layout.toml");
    write(&config, b"unknown_key = 1");
    let mut cmd = assert_cmd::Command::cargo_bin("xwalk-corelib").unwrap();

    cmd.arg("-s")
        .arg(&fx.source)
        .arg("-t")
        .arg(&fx.target)
        .arg("-c")
        .arg(&config);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Parsing error"));
}
