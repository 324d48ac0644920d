// mdscrub/src/main.rs
//! mdscrub entry point.
//!
//! Exit status is 0 when every discovered file was processed (including when
//! none matched) and 1 when the run could not start or any file failed.

use clap::Parser;
use std::process::ExitCode;

use mdscrub::cli::Cli;
use mdscrub::commands::prep::{error_msg, run_prep, PrepOptions};
use mdscrub::logger;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_logger(logger::level_for(cli.verbose, cli.quiet));

    let opts = PrepOptions::from(cli);
    match run_prep(&opts) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error_msg(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
