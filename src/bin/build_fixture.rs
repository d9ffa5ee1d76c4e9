//! Fixture generator binary.
//!
//! Writes one of the deterministic probe fixtures: a well-formed gzip
//! stream, a gzip stream that fails mid-read, or the lying zip archive.

use std::path::PathBuf;
use std::process;

use trigger_rs::fixture::{
    default_stream_payload, write_corrupt_gzip_fixture, write_gzip_fixture,
    write_lying_zip_fixture,
};
use trigger_rs::probe::USAGE_EXIT_CODE;

fn print_usage(exe: &std::ffi::OsStr) {
    eprintln!(
        "usage: {} --kind=<gzip|gzip-corrupt|zip> --out=<path>",
        exe.to_string_lossy()
    );
}

fn main() {
    let mut args = std::env::args_os();
    let exe = args.next().unwrap_or_else(|| "build_fixture".into());
    let mut kind: Option<String> = None;
    let mut out: Option<PathBuf> = None;

    for arg in args {
        let Some(flag) = arg.to_str() else {
            eprintln!("invalid (non-UTF-8) argument");
            process::exit(USAGE_EXIT_CODE);
        };
        if let Some(value) = flag.strip_prefix("--kind=") {
            kind = Some(value.to_string());
            continue;
        }
        if let Some(value) = flag.strip_prefix("--out=") {
            out = Some(PathBuf::from(value));
            continue;
        }
        match flag {
            "--help" | "-h" => {
                print_usage(&exe);
                process::exit(0);
            }
            _ => {
                eprintln!("unknown flag: {}", flag);
                print_usage(&exe);
                process::exit(USAGE_EXIT_CODE);
            }
        }
    }

    let (Some(kind), Some(out)) = (kind, out) else {
        print_usage(&exe);
        process::exit(USAGE_EXIT_CODE);
    };

    let result = match kind.as_str() {
        "gzip" => write_gzip_fixture(&out, &default_stream_payload()),
        "gzip-corrupt" => write_corrupt_gzip_fixture(&out, &default_stream_payload()),
        "zip" => write_lying_zip_fixture(&out),
        other => {
            eprintln!("unknown fixture kind: {}", other);
            print_usage(&exe);
            process::exit(USAGE_EXIT_CODE);
        }
    };

    if let Err(err) = result {
        eprintln!("writing {} failed: {err}", out.display());
        process::exit(1);
    }
    eprintln!("wrote {} fixture to {}", kind, out.display());
}
