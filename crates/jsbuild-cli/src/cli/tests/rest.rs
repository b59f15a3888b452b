//! Tests for ensure-closure, nuke-cache and doctor.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_ensure_closure() {
    match parse(&["jsbuild", "ensure-closure"]) {
        CliCommand::EnsureClosure { force } => assert!(!force),
        _ => panic!("expected EnsureClosure"),
    }
    match parse(&["jsbuild", "ensure-closure", "--force"]) {
        CliCommand::EnsureClosure { force } => assert!(force),
        _ => panic!("expected EnsureClosure --force"),
    }
}

#[test]
fn cli_parse_nuke_cache() {
    match parse(&["jsbuild", "nuke-cache"]) {
        CliCommand::NukeCache => {}
        _ => panic!("expected NukeCache"),
    }
}

#[test]
fn cli_parse_doctor_verbose() {
    let cli = Cli::try_parse_from(["jsbuild", "--verbose", "doctor"]).unwrap();
    assert!(cli.verbose);
    assert!(matches!(cli.command, CliCommand::Doctor));
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["jsbuild"]).is_err());
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["jsbuild", "serve"]).is_err());
}
