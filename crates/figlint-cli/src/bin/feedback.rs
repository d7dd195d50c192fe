//! figlint-feedback entry point.

use std::{io, process};

use clap::Parser;
use log::{debug, info};

use figlint_cli::{FeedbackArgs, init_logger, report_error};

fn main() {
    miette::set_panic_hook();

    let args = FeedbackArgs::parse();
    init_logger(&args.log_level);

    info!(file = args.file; "Starting figlint-feedback");
    debug!(args:?; "Parsed arguments");

    let mut stdout = io::stdout().lock();
    if let Err(err) = figlint_cli::run_feedback(&args, &mut stdout) {
        report_error(&err);
        process::exit(1);
    }
}
