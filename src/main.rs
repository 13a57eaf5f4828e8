use std::process::ExitCode;

use clap::Parser;
use hemicycle::cli::{self, Args};

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logger(args.verbose);

    tracing::debug!(?args, "starting hemicycle");

    match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
