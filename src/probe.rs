//! Toolchain capability probes.
//!
//! Each probe answers one yes/no question about the local build environment
//! by compiling a scratch translation unit or querying an external tool.
//! Probes print a `Checking ...` line followed by `yes` or `no`.
//!
//! A probe tool that is missing or exits non-zero is a negative result, not
//! an error -- the invoking orchestrator only ever sees `yes` or `no`.
//! Errors are reserved for the probe's own scratch-file I/O.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::output;

// ---------------------------------------------------------------------------
// Probe snippets
// ---------------------------------------------------------------------------

/// Translation unit for the `long long` support probe.
const LONG_LONG_SNIPPET: &str = "\
int main() {
    long long ll = 42LL;
    return 0;
}
";

/// Minimal wxWidgets application for the compile/link probe.
const WX_APP_SNIPPET: &str = "\
#include <wx/app.h>

class ProbeApp : public wxApp {
public:
    virtual bool OnInit() { return true; }
};

wxIMPLEMENT_APP(ProbeApp);
";

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// The C++ compiler to probe with: `$CXX`, or `c++` when unset.
fn cxx_compiler() -> String {
    std::env::var("CXX").unwrap_or_else(|_| "c++".to_string())
}

/// Write `snippet` into a scratch directory and attempt to compile and link
/// it with `extra_args` appended to the compiler invocation.
///
/// A compiler that cannot be spawned or rejects the snippet yields
/// `Ok(false)`; only scratch-directory I/O failures are errors.
fn try_link(snippet: &str, extra_args: &[String]) -> Result<bool> {
    let dir = tempfile::tempdir().context("failed to create scratch directory for probe")?;
    let src: PathBuf = dir.path().join("probe.cpp");
    let out: PathBuf = dir.path().join("probe.out");
    std::fs::write(&src, snippet)
        .with_context(|| format!("failed to write probe source {}", src.display()))?;

    let status = Command::new(cxx_compiler())
        .arg(&src)
        .args(extra_args)
        .arg("-o")
        .arg(&out)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) => Ok(status.success()),
        Err(_) => Ok(false),
    }
}

/// Run `wx-config` with the given args and return its stdout, trimmed.
/// Returns `None` when the tool is missing, exits non-zero, or emits
/// non-UTF-8 output -- all negative probe results.
fn wx_config_output(args: &[&str]) -> Option<String> {
    let output = Command::new("wx-config").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8(output.stdout).ok()?;
    Some(stdout.trim().to_string())
}

/// Normalize a reported version string to exactly three dotted components so
/// it parses as semver: a leading `v`/`V` is stripped, extra components are
/// dropped (`3.2.4.0` -> `3.2.4`) and missing ones padded (`3.2` -> `3.2.0`).
fn normalize_version(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    let mut components: Vec<&str> = trimmed.split('.').take(3).collect();
    while components.len() < 3 {
        components.push("0");
    }
    components.join(".")
}

/// Whether `raw` names a version that is at least `major.minor`.
///
/// Equivalent to `(reported major, reported minor) >= (major, minor)`: the
/// patch level never disqualifies a matching major/minor. An unparseable
/// version is treated as too old.
pub fn version_at_least(raw: &str, major: u64, minor: u64) -> bool {
    match semver::Version::parse(&normalize_version(raw)) {
        Ok(version) => version >= semver::Version::new(major, minor, 0),
        Err(_) => false,
    }
}

// ---------------------------------------------------------------------------
// Probes
// ---------------------------------------------------------------------------

/// Does the C++ compiler accept a `long long` literal?
pub fn check_long_long() -> Result<bool> {
    output::checking("Checking for C++ compiler support for long long... ");
    let ok = try_link(LONG_LONG_SNIPPET, &[])?;
    output::probe_result(ok);
    Ok(ok)
}

/// Does the installed `wx-config` report at least version `major.minor`?
pub fn check_wx_config(major: u64, minor: u64) -> Result<bool> {
    output::checking(&format!("Checking for wx-config >= {major}.{minor}... "));
    let ok = match wx_config_output(&["--version"]) {
        Some(version) => version_at_least(&version, major, minor),
        None => false,
    };
    output::probe_result(ok);
    Ok(ok)
}

/// Does a minimal wxWidgets application compile and link with the flags
/// `wx-config` reports?
pub fn check_wx() -> Result<bool> {
    output::checking("Checking wxWidgets compilation... ");
    let ok = match wx_config_output(&["--cxxflags", "--libs"]) {
        Some(flags) => {
            let args: Vec<String> = flags.split_whitespace().map(str::to_string).collect();
            try_link(WX_APP_SNIPPET, &args)?
        }
        None => false,
    };
    output::probe_result(ok);
    Ok(ok)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
