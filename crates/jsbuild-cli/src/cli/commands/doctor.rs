//! `jsbuild doctor` – environment checks.

use jsbuild_core::compiler::ClosureJar;
use jsbuild_core::doctor::{self, CheckStatus, DoctorContext};

use crate::cli::Session;

pub fn run_doctor(session: &Session) {
    println!("Welcome to the doctor!");
    println!();
    println!("This tool will check if your environment is ready to run the tool.");
    println!();
    println!("If you are having problems, please run this tool with --verbose");
    println!("and report the output to the issue tracker.");
    println!();

    let ctx = DoctorContext {
        java: session.cfg.java.clone(),
        sfdp: "sfdp".to_string(),
        jar: ClosureJar::new(session.cache.clone(), &session.cfg.closure_version),
    };

    for (check, result) in doctor::run_all(&ctx) {
        let verdict = match result {
            Ok(CheckStatus::Ok) => "OK".to_string(),
            Ok(CheckStatus::Failed) => "Failed".to_string(),
            Ok(CheckStatus::Unknown) => "Unknown".to_string(),
            Err(e) if session.verbose => format!("ERROR\nException: {e}"),
            Err(_) => "ERROR (run with --verbose for more info)".to_string(),
        };
        println!("Checking {}... {}", check.name(), verdict);
    }
}
