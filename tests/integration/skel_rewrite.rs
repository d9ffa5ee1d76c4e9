//! End-to-end coverage of the templater's generator run and rewrite step.

use std::fs;

use trigger_rs::skel::{
    parse_args, rewrite_skeleton, run_generator, GeneratorConfig, RewriteOutcome, SkelArgs,
};

fn args_for(extname: &str) -> SkelArgs {
    parse_args(vec![format!("--extname={extname}")])
}

#[test]
fn rewrites_the_generated_dl_call_in_place() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let ext_dir = dir.path().join("foo");
    fs::create_dir(&ext_dir).expect("create ext dir");

    let before = b"<?php\nif (!extension_loaded('foo')) {\n\tdl('foo.so');\n}\n?>\n";
    fs::write(ext_dir.join("foo.php"), before).expect("write skeleton");

    let outcome = rewrite_skeleton(dir.path(), "foo").expect("rewrite succeeds");
    assert_eq!(outcome, RewriteOutcome::Rewritten { occurrences: 1 });

    let after = fs::read(ext_dir.join("foo.php")).expect("read back");
    let want = b"<?php\nif (!extension_loaded('foo')) {\n\tdl('php_foo.so');\n}\n?>\n";
    assert_eq!(after, want, "only the dl() argument may change");
}

#[test]
fn missing_target_is_skipped() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let outcome = rewrite_skeleton(dir.path(), "absent").expect("skip is not an error");
    assert_eq!(outcome, RewriteOutcome::MissingTarget);
}

#[test]
fn target_without_dl_calls_is_left_untouched() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let ext_dir = dir.path().join("bar");
    fs::create_dir(&ext_dir).expect("create ext dir");
    fs::write(ext_dir.join("bar.php"), b"<?php ?>").expect("write skeleton");

    let outcome = rewrite_skeleton(dir.path(), "bar").expect("rewrite succeeds");
    assert_eq!(outcome, RewriteOutcome::Unchanged);
    assert_eq!(
        fs::read(ext_dir.join("bar.php")).expect("read back"),
        b"<?php ?>"
    );
}

#[test]
fn generator_runs_with_a_scoped_path_override() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let tools = dir.path().join("tools");
    fs::create_dir(&tools).expect("create tools dir");

    // The stub generator records the PATH its process saw.
    let stub = dir.path().join("gen.sh");
    fs::write(&stub, "#!/bin/sh\nprintf '%s' \"$PATH\" > \"$(dirname \"$0\")/seen_path\"\n")
        .expect("write stub");

    let config = GeneratorConfig {
        generator: stub,
        tools_dir: Some(tools.clone()),
        workdir: Some(dir.path().to_path_buf()),
    };
    let ambient_before = std::env::var_os("PATH");

    let status = run_generator(&config, &args_for("foo")).expect("run stub");
    assert!(status.success());

    let seen = fs::read_to_string(dir.path().join("seen_path")).expect("stub ran");
    assert!(
        seen.starts_with(tools.to_str().expect("utf-8 path")),
        "child PATH must start with the tools dir, got: {seen}"
    );
    // The override is scoped to the child.
    assert_eq!(std::env::var_os("PATH"), ambient_before);
}

#[test]
fn generator_receives_the_forwarded_flags() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let stub = dir.path().join("gen.sh");
    fs::write(&stub, "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$(dirname \"$0\")/seen_args\"\n")
        .expect("write stub");

    let config = GeneratorConfig {
        generator: stub,
        tools_dir: None,
        workdir: Some(dir.path().to_path_buf()),
    };
    let args = parse_args(vec!["--extname=foo".to_string(), "--quiet".to_string()]);
    let status = run_generator(&config, &args).expect("run stub");
    assert!(status.success());

    let seen = fs::read_to_string(dir.path().join("seen_args")).expect("stub ran");
    assert_eq!(seen, "--extname=foo\n--quiet\n");
}
