//! Environment readiness checks. Advisory only; never gates a build.

use std::process::{Command, Stdio};
use std::time::Instant;

use crate::compiler::ClosureJar;

/// Outcome of one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Failed,
    Unknown,
}

/// The closed set of checks, run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Java,
    Libcurl,
    Graphviz,
    ClosureJar,
    ClosureVersion,
}

impl Check {
    pub const ALL: [Check; 5] = [
        Check::Java,
        Check::Libcurl,
        Check::Graphviz,
        Check::ClosureJar,
        Check::ClosureVersion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Check::Java => "Java",
            Check::Libcurl => "Libcurl",
            Check::Graphviz => "Graphviz",
            Check::ClosureJar => "Closure file",
            Check::ClosureVersion => "Closure version",
        }
    }
}

/// What the checks need to know about the environment.
pub struct DoctorContext {
    pub java: String,
    pub sfdp: String,
    pub jar: ClosureJar,
}

/// Runs `program args..` and reports whether it exited successfully.
/// A missing program is `Failed`; any other spawn error is an error.
fn probe(program: &str, args: &[&str]) -> std::io::Result<CheckStatus> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(s) if s.success() => Ok(CheckStatus::Ok),
        Ok(_) => Ok(CheckStatus::Failed),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(CheckStatus::Failed),
        Err(e) => Err(e),
    }
}

pub fn run_check(check: Check, ctx: &DoctorContext) -> std::io::Result<CheckStatus> {
    let start = Instant::now();
    let result = match check {
        Check::Java => probe(&ctx.java, &["-version"]),
        Check::Libcurl => {
            let v = curl::Version::get();
            tracing::debug!(version = v.version(), ssl = ?v.ssl_version(), "libcurl");
            Ok(if v.feature_ssl() {
                CheckStatus::Ok
            } else {
                CheckStatus::Failed
            })
        }
        Check::Graphviz => probe(&ctx.sfdp, &["-V"]),
        Check::ClosureJar => Ok(if ctx.jar.is_present() {
            CheckStatus::Ok
        } else {
            CheckStatus::Failed
        }),
        Check::ClosureVersion => {
            if !ctx.jar.is_present() {
                Ok(CheckStatus::Unknown)
            } else {
                let jar = ctx.jar.path().display().to_string();
                probe(&ctx.java, &["-jar", jar.as_str(), "--version"])
            }
        }
    };
    tracing::debug!(check = check.name(), elapsed = ?start.elapsed(), "check finished");
    result
}

/// Runs every check, in order.
pub fn run_all(ctx: &DoctorContext) -> Vec<(Check, std::io::Result<CheckStatus>)> {
    Check::ALL
        .iter()
        .map(|&c| (c, run_check(c, ctx)))
        .collect()
}
