//! Extension-skeleton templater.
//!
//! # Scope
//! Drives an external code generator with forwarded command-line arguments,
//! then post-processes one generated file by literal substitution: every
//! dynamic-load call argument gains the platform module prefix
//! (`dl('name.so')` becomes `dl('php_name.so')`).
//!
//! # Invariants
//! - All arguments, recognized flags included, are forwarded to the
//!   generator verbatim.
//! - Flag names match case-insensitively; the value starts after the `=`.
//! - The PATH adjustment needed to locate the generator's companion tools is
//!   scoped to the child process. The caller's environment is never mutated.
//! - A missing target file is a skip, not an error.

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use memchr::memmem;
use serde::{Deserialize, Serialize};

/// Skeleton name used when `--skel=` is absent. Parsed but otherwise unused
/// by the rewrite step.
pub const DEFAULT_SKEL: &str = "skeleton";

/// The dynamic-load call prefix the rewrite searches for.
pub const DL_OPEN: &[u8] = b"dl('";

/// Module prefix inserted after [`DL_OPEN`].
pub const MODULE_PREFIX: &[u8] = b"php_";

/// Arguments recognized by the templater, plus everything forwarded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkelArgs {
    /// Value of `--extname=`; empty when absent.
    pub extname: String,
    /// Value of `--skel=`; defaults to [`DEFAULT_SKEL`].
    pub skel: String,
    /// Every argument, in order, for the generator.
    pub forwarded: Vec<String>,
}

/// Scan arguments for the recognized flag pair while keeping all of them
/// for forwarding.
pub fn parse_args<I>(args: I) -> SkelArgs
where
    I: IntoIterator<Item = String>,
{
    let forwarded: Vec<String> = args.into_iter().collect();
    let mut extname = String::new();
    let mut skel = DEFAULT_SKEL.to_string();

    for arg in &forwarded {
        if let Some(head) = arg.get(..9) {
            if head.eq_ignore_ascii_case("--extname") {
                extname = arg.get(10..).unwrap_or_default().to_string();
            }
        }
        if let Some(head) = arg.get(..6) {
            if head.eq_ignore_ascii_case("--skel") {
                skel = arg.get(7..).unwrap_or_default().to_string();
            }
        }
    }

    SkelArgs {
        extname,
        skel,
        forwarded,
    }
}

/// Generator invocation settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Script handed to `sh`.
    pub generator: PathBuf,
    /// Directory prepended to the child's PATH, scoped to the child.
    pub tools_dir: Option<PathBuf>,
    /// Working directory for the child; inherited when `None`.
    pub workdir: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generator: PathBuf::from("ext_skel"),
            tools_dir: None,
            workdir: None,
        }
    }
}

/// Run `sh <generator> <forwarded args…>` and wait for it.
pub fn run_generator(config: &GeneratorConfig, args: &SkelArgs) -> io::Result<ExitStatus> {
    let mut cmd = Command::new("sh");
    cmd.arg(&config.generator).args(&args.forwarded);

    if let Some(tools) = &config.tools_dir {
        let mut parts = vec![tools.clone()];
        if let Some(ambient) = env::var_os("PATH") {
            parts.extend(env::split_paths(&ambient));
        }
        let joined = env::join_paths(parts)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        cmd.env("PATH", joined);
    }
    if let Some(dir) = &config.workdir {
        cmd.current_dir(dir);
    }

    cmd.status()
}

/// Insert [`MODULE_PREFIX`] after every [`DL_OPEN`] occurrence.
///
/// Returns the rewritten bytes and the occurrence count. All bytes outside
/// the insertions are preserved.
pub fn prefix_dl_calls(input: &[u8]) -> (Vec<u8>, usize) {
    let mut out = Vec::with_capacity(input.len());
    let mut last = 0;
    let mut count = 0;
    for at in memmem::find_iter(input, DL_OPEN) {
        let open_end = at + DL_OPEN.len();
        out.extend_from_slice(&input[last..open_end]);
        out.extend_from_slice(MODULE_PREFIX);
        last = open_end;
        count += 1;
    }
    out.extend_from_slice(&input[last..]);
    (out, count)
}

/// Path of the generated file the rewrite targets: `<extname>/<extname>.php`
/// under `root`.
pub fn skeleton_target(root: &Path, extname: &str) -> PathBuf {
    root.join(extname).join(format!("{extname}.php"))
}

/// What the rewrite step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The target was rewritten in place.
    Rewritten { occurrences: usize },
    /// The target exists but contains no dynamic-load call.
    Unchanged,
    /// The target does not exist; skipped.
    MissingTarget,
}

/// Templater error taxonomy.
#[derive(Debug)]
pub enum SkelError {
    /// `--extname=` was absent or empty; there is no target to rewrite.
    MissingExtName,
    /// Reading or writing the target failed.
    Io(io::Error),
}

impl fmt::Display for SkelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingExtName => write!(f, "--extname is required for the rewrite step"),
            Self::Io(err) => write!(f, "rewrite I/O failed: {err}"),
        }
    }
}

impl std::error::Error for SkelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::MissingExtName => None,
        }
    }
}

/// Rewrite the generated skeleton file under `root` in place.
pub fn rewrite_skeleton(root: &Path, extname: &str) -> Result<RewriteOutcome, SkelError> {
    if extname.is_empty() {
        return Err(SkelError::MissingExtName);
    }
    let target = skeleton_target(root, extname);
    let input = match fs::read(&target) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(RewriteOutcome::MissingTarget)
        }
        Err(err) => return Err(SkelError::Io(err)),
    };

    let (output, occurrences) = prefix_dl_calls(&input);
    if occurrences == 0 {
        return Ok(RewriteOutcome::Unchanged);
    }
    fs::write(&target, output).map_err(SkelError::Io)?;
    Ok(RewriteOutcome::Rewritten { occurrences })
}
