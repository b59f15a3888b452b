mod cli;

fn main() {
    // Parse CLI, set up logging and config, then dispatch.
    if let Err(err) = cli::run_from_args() {
        eprintln!("jsbuild error: {:#}", err);
        std::process::exit(1);
    }
}
