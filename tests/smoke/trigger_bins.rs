//! Smoke tests driving the built trigger binaries end-to-end.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use trigger_rs::fixture::{
    write_corrupt_gzip_fixture, write_gzip_fixture, write_lying_zip_fixture,
};
use trigger_rs::probe::FAILURE_EXIT_CODE;

fn run(binary: &str, args: &[String], cwd: &Path) -> Output {
    Command::new(binary)
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("run trigger binary")
}

fn fixture_flag(path: &Path) -> Vec<String> {
    vec![format!("--fixture={}", path.display())]
}

#[test]
fn stream_trigger_drains_a_well_formed_fixture() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let fixture = dir.path().join("good.gz");
    write_gzip_fixture(&fixture, &vec![0x41; 4096]).expect("write fixture");

    let out = run(
        env!("CARGO_BIN_EXE_stream_trigger"),
        &fixture_flag(&fixture),
        dir.path(),
    );
    assert!(out.status.success(), "stderr: {:?}", out.stderr);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("decoded=4096"), "got: {stderr}");
}

#[test]
fn stream_trigger_prints_the_open_diagnostic_for_a_missing_fixture() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let out = run(
        env!("CARGO_BIN_EXE_stream_trigger"),
        &fixture_flag(&dir.path().join("nope.gz")),
        dir.path(),
    );
    assert_eq!(out.status.code(), Some(FAILURE_EXIT_CODE));
    assert_eq!(String::from_utf8_lossy(&out.stderr), "ERROR: open()\n");
}

#[test]
fn stream_trigger_prints_the_read_diagnostic_for_a_corrupt_fixture() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let fixture = dir.path().join("corrupt.gz");
    write_corrupt_gzip_fixture(&fixture, b"valid prefix").expect("write fixture");

    let out = run(
        env!("CARGO_BIN_EXE_stream_trigger"),
        &fixture_flag(&fixture),
        dir.path(),
    );
    assert_eq!(out.status.code(), Some(FAILURE_EXIT_CODE));
    assert_eq!(String::from_utf8_lossy(&out.stderr), "ERROR: read()\n");
}

#[test]
fn zip_trigger_reports_the_lying_declared_size() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let fixture = dir.path().join("trigger.zip");
    write_lying_zip_fixture(&fixture).expect("write fixture");

    let out = run(
        env!("CARGO_BIN_EXE_zip_trigger"),
        &fixture_flag(&fixture),
        dir.path(),
    );
    assert!(out.status.success(), "stderr: {:?}", out.stderr);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("declared=4294967294") && stderr.contains("actual=256"),
        "got: {stderr}"
    );
}

#[test]
fn pixel_trigger_aborts_via_the_bounds_check() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let out = run(env!("CARGO_BIN_EXE_pixel_trigger"), &[], dir.path());
    assert!(
        !out.status.success(),
        "the default geometry must reach the out-of-range index"
    );
}

#[test]
fn pixel_trigger_honors_usage_errors() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let out = run(
        env!("CARGO_BIN_EXE_pixel_trigger"),
        &["--width=0".to_string()],
        dir.path(),
    );
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn ext_skel_rewrites_the_generated_skeleton_end_to_end() {
    let dir = tempfile::tempdir().expect("create temp dir");

    // Stand-in generator: produces the skeleton the way the real one would.
    let stub = dir.path().join("gen.sh");
    fs::write(
        &stub,
        "#!/bin/sh\nmkdir -p foo\nprintf \"if (!extension_loaded('foo')) { dl('foo.so'); }\" > foo/foo.php\n",
    )
    .expect("write stub");

    let out = run(
        env!("CARGO_BIN_EXE_ext_skel"),
        &[
            format!("--generator={}", stub.display()),
            "--extname=foo".to_string(),
        ],
        dir.path(),
    );
    assert!(out.status.success(), "stderr: {:?}", out.stderr);

    let rewritten = fs::read_to_string(dir.path().join("foo/foo.php")).expect("skeleton exists");
    assert_eq!(
        rewritten,
        "if (!extension_loaded('foo')) { dl('php_foo.so'); }"
    );
}

#[test]
fn build_fixture_output_feeds_the_stream_trigger() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let fixture = dir.path().join("made.gz");

    let out = run(
        env!("CARGO_BIN_EXE_build_fixture"),
        &[
            "--kind=gzip".to_string(),
            format!("--out={}", fixture.display()),
        ],
        dir.path(),
    );
    assert!(out.status.success(), "stderr: {:?}", out.stderr);

    let out = run(
        env!("CARGO_BIN_EXE_stream_trigger"),
        &fixture_flag(&fixture),
        dir.path(),
    );
    assert!(out.status.success(), "stderr: {:?}", out.stderr);
}
