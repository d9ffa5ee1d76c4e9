//! Pixel-buffer overflow trigger binary.
//!
//! Builds the true-color/indexed image pair and fires the bundled palette
//! refit once. The call's outcome is not inspected: with the default
//! geometry the refit indexes past its buffer and the runtime's bounds
//! check aborts the process, which is the observable this probe exists to
//! produce.

use std::process;

use trigger_rs::pixel::{fire, PaletteRefit, PixelTriggerConfig};
use trigger_rs::probe::USAGE_EXIT_CODE;

fn print_usage(exe: &std::ffi::OsStr) {
    eprintln!(
        "usage: {} [OPTIONS]

OPTIONS:
    --width=<N>     Image width in pixels (default: 8)
    --height=<N>    Image height in pixels (default: 16)
    --seed=<N>      Counter seed for the source fill (default: 65)
    --help, -h      Show this help message",
        exe.to_string_lossy()
    );
}

fn main() {
    let mut args = std::env::args_os();
    let exe = args.next().unwrap_or_else(|| "pixel_trigger".into());
    let mut config = PixelTriggerConfig::default();

    for arg in args {
        let Some(flag) = arg.to_str() else {
            eprintln!("invalid (non-UTF-8) argument");
            process::exit(USAGE_EXIT_CODE);
        };
        if let Some(value) = flag.strip_prefix("--width=") {
            config.width = parse_or_usage(value, "--width");
            continue;
        }
        if let Some(value) = flag.strip_prefix("--height=") {
            config.height = parse_or_usage(value, "--height");
            continue;
        }
        if let Some(value) = flag.strip_prefix("--seed=") {
            config.seed = parse_or_usage(value, "--seed");
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

    // Fire and do not inspect the outcome; the images stay alive until
    // process exit.
    let (_source, _target) = fire(&config, &mut PaletteRefit);
    eprintln!(
        "fired width={} height={} seed={:#x}",
        config.width, config.height, config.seed
    );
}

fn parse_or_usage<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("invalid {} value: {}", flag, value);
        process::exit(USAGE_EXIT_CODE);
    })
}
