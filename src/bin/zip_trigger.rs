//! Archive-entry trigger binary.
//!
//! Opens a zip fixture, stats one entry by index, reads its payload, then
//! closes the handle. The entry's declared uncompressed size is reported
//! verbatim next to the byte count actually read.

use std::path::PathBuf;
use std::process;

use trigger_rs::probe::{self, USAGE_EXIT_CODE};
use trigger_rs::zip::{drive, ZipTriggerConfig};

fn print_usage(exe: &std::ffi::OsStr) {
    eprintln!(
        "usage: {} [OPTIONS]

OPTIONS:
    --fixture=<path>    Zip fixture path (default: trigger.zip)
    --entry=<N>         Central directory entry index (default: 1)
    --help, -h          Show this help message",
        exe.to_string_lossy()
    );
}

fn main() {
    let mut args = std::env::args_os();
    let exe = args.next().unwrap_or_else(|| "zip_trigger".into());
    let mut config = ZipTriggerConfig::default();

    for arg in args {
        let Some(flag) = arg.to_str() else {
            eprintln!("invalid (non-UTF-8) argument");
            process::exit(USAGE_EXIT_CODE);
        };
        if let Some(value) = flag.strip_prefix("--fixture=") {
            config.fixture_path = PathBuf::from(value);
            continue;
        }
        if let Some(value) = flag.strip_prefix("--entry=") {
            config.entry_index = value.parse().unwrap_or_else(|_| {
                eprintln!("invalid --entry value: {}", value);
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
                "entry={} method={} declared={} actual={}",
                String::from_utf8_lossy(&report.name),
                report.method,
                report.declared_size,
                report.actual_len()
            );
        }
        Err(err) => probe::abort(err.op()),
    }
}
