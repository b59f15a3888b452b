//! Tests for build, list-deps and dependency-dag.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_build_defaults() {
    match parse(&["jsbuild", "build", "src/main.js"]) {
        CliCommand::Build {
            file,
            output,
            language_out,
        } => {
            assert_eq!(file, Path::new("src/main.js"));
            assert!(output.is_none());
            assert!(language_out.is_none());
        }
        _ => panic!("expected Build"),
    }
}

#[test]
fn cli_parse_build_with_output_and_language() {
    match parse(&[
        "jsbuild",
        "build",
        "main.js",
        "--output",
        "dist/app.js",
        "--language-out",
        "ECMASCRIPT_2015",
    ]) {
        CliCommand::Build {
            output,
            language_out,
            ..
        } => {
            assert_eq!(output.as_deref(), Some(Path::new("dist/app.js")));
            assert_eq!(language_out.as_deref(), Some("ECMASCRIPT_2015"));
        }
        _ => panic!("expected Build"),
    }
}

#[test]
fn cli_parse_build_accepts_underscore_alias() {
    match parse(&["jsbuild", "build", "main.js", "--language_out", "ECMASCRIPT5"]) {
        CliCommand::Build { language_out, .. } => {
            assert_eq!(language_out.as_deref(), Some("ECMASCRIPT5"));
        }
        _ => panic!("expected Build"),
    }
}

#[test]
fn cli_parse_list_deps() {
    match parse(&["jsbuild", "list-deps", "main.js"]) {
        CliCommand::ListDeps { file, json } => {
            assert_eq!(file, Path::new("main.js"));
            assert!(!json);
        }
        _ => panic!("expected ListDeps"),
    }
    match parse(&["jsbuild", "list-deps", "main.js", "--json"]) {
        CliCommand::ListDeps { json, .. } => assert!(json),
        _ => panic!("expected ListDeps"),
    }
}

#[test]
fn cli_parse_dependency_dag() {
    match parse(&["jsbuild", "dependency-dag", "main.js", "--png", "deps.png"]) {
        CliCommand::DependencyDag { file, png } => {
            assert_eq!(file, Path::new("main.js"));
            assert_eq!(png.as_deref(), Some(Path::new("deps.png")));
        }
        _ => panic!("expected DependencyDag"),
    }
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["jsbuild", "build", "main.js", "--verbose", "--java", "/opt/java"])
        .unwrap();
    assert!(cli.verbose);
    assert_eq!(cli.java.as_deref(), Some("/opt/java"));
}

#[test]
fn cli_build_requires_file() {
    assert!(Cli::try_parse_from(["jsbuild", "build"]).is_err());
}
