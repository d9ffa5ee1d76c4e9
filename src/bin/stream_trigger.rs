//! Stream-read trigger binary.
//!
//! Opens a compressed fixture, pulls decoded chunks until end-of-stream,
//! then closes the handle. Prints `ERROR: open()` or `ERROR: read()` and
//! exits on the first failure sentinel; on success a one-line summary goes
//! to stderr.

use std::path::PathBuf;
use std::process;

use trigger_rs::probe::{self, USAGE_EXIT_CODE};
use trigger_rs::stream::{drive, StreamTriggerConfig};

fn print_usage(exe: &std::ffi::OsStr) {
    eprintln!(
        "usage: {} [OPTIONS]

OPTIONS:
    --fixture=<path>    Compressed fixture path (default: trigger.gz)
    --read-len=<N>      Decoded bytes per read attempt (default: 8192)
    --help, -h          Show this help message",
        exe.to_string_lossy()
    );
}

fn main() {
    let mut args = std::env::args_os();
    let exe = args.next().unwrap_or_else(|| "stream_trigger".into());
    let mut config = StreamTriggerConfig::default();

    for arg in args {
        let Some(flag) = arg.to_str() else {
            eprintln!("invalid (non-UTF-8) argument");
            process::exit(USAGE_EXIT_CODE);
        };
        if let Some(value) = flag.strip_prefix("--fixture=") {
            config.fixture_path = PathBuf::from(value);
            continue;
        }
        if let Some(value) = flag.strip_prefix("--read-len=") {
            config.read_len = value.parse().unwrap_or_else(|_| {
                eprintln!("invalid --read-len value: {}", value);
                process::exit(USAGE_EXIT_CODE);
            });
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

    if let Err(err) = config.validate() {
        eprintln!("{err}");
        process::exit(USAGE_EXIT_CODE);
    }

    match drive(&config) {
        Ok(report) => {
            eprintln!(
                "decoded={} compressed={} reads={}",
                report.decoded.len(),
                report.compressed_bytes,
                report.reads
            );
        }
        Err(err) => probe::abort(err.op()),
    }
}
