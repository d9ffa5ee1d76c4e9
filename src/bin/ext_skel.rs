//! Extension-skeleton templater binary.
//!
//! Forwards its arguments to the external skeleton generator, then rewrites
//! the generated `<extname>/<extname>.php` so every `dl('` call carries the
//! platform module prefix. Without `--extname=` the rewrite step is skipped,
//! matching the generator-only invocation.

use std::path::Path;
use std::process;

use trigger_rs::probe::{self, ProbeOp, USAGE_EXIT_CODE};
use trigger_rs::skel::{parse_args, rewrite_skeleton, run_generator, GeneratorConfig, RewriteOutcome};

fn main() {
    let mut generator = GeneratorConfig::default();
    let mut forwarded = Vec::new();

    for arg in std::env::args_os().skip(1) {
        let Some(arg) = arg.to_str().map(str::to_string) else {
            eprintln!("invalid (non-UTF-8) argument");
            process::exit(USAGE_EXIT_CODE);
        };
        if let Some(value) = arg.strip_prefix("--generator=") {
            generator.generator = value.into();
            continue;
        }
        if let Some(value) = arg.strip_prefix("--tools=") {
            generator.tools_dir = Some(value.into());
            continue;
        }
        forwarded.push(arg);
    }

    let args = parse_args(forwarded);

    match run_generator(&generator, &args) {
        Ok(status) if !status.success() => {
            eprintln!("generator exited with {status}");
        }
        Ok(_) => {}
        Err(_) => probe::abort(ProbeOp::Generate),
    }

    if args.extname.is_empty() {
        return;
    }
    match rewrite_skeleton(Path::new("."), &args.extname) {
        Ok(RewriteOutcome::Rewritten { occurrences }) => {
            eprintln!("rewrote {occurrences} dl() call(s) in {}/{}.php", args.extname, args.extname);
        }
        Ok(RewriteOutcome::Unchanged) | Ok(RewriteOutcome::MissingTarget) => {}
        Err(_) => probe::abort(ProbeOp::Rewrite),
    }
}
