//! figlint CLI entry point.

use std::{io, process};

use clap::Parser;
use log::{debug, info};

use figlint_cli::{Args, init_logger, report_error};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);

    info!(log_level = args.log_level; "Starting figlint");
    debug!(args:?; "Parsed arguments");

    let mut stdout = io::stdout().lock();
    match figlint_cli::run(&args, &mut stdout) {
        Ok(report) if report.is_failure() => process::exit(1),
        Ok(_) => info!("Completed successfully"),
        Err(err) => {
            report_error(&err);
            process::exit(1);
        }
    }
}
