//! CLI logic for the figlint tools.
//!
//! `figlint` checks figures and prints a collision report; exit status 1
//! means at least one issue was found or a file could not be checked.
//! `figlint-feedback` renders one figure to PNG and prints a hosted model's
//! comments on it.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, FeedbackArgs};

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::{LevelFilter, error, info};

use figlint::{
    Checker, FiglintError,
    feedback::{FeedbackClient, api_key_from_env},
    render::{Rasterizer, encode_png},
    report::{Report, ReportFormatter},
};

use error_adapter::to_reportables;

/// Run the checker over the requested files and write the report to `out`.
///
/// With no files on the command line, every `*.svg` in the configured
/// figures directory is checked. Failures on individual files are part of
/// the returned [`Report`]; use [`Report::is_failure`] for the exit status.
///
/// # Errors
///
/// Returns `FiglintError` for:
/// - Configuration loading errors
/// - An empty figures directory when no files are given
/// - Errors writing the report
pub fn run(args: &Args, out: &mut impl Write) -> Result<Report, FiglintError> {
    let app_config = config::load_config(args.config.as_ref())?;

    let files: Vec<PathBuf> = if args.files.is_empty() {
        let dir = app_config.check().figures_dir();
        info!(dir:? = dir; "No files given, scanning figures directory");
        figlint::find_figures(dir)?
    } else {
        args.files.iter().map(PathBuf::from).collect()
    };

    if files.is_empty() {
        return Err(FiglintError::Config("No SVG files found".to_string()));
    }
    info!(files = files.len(); "Checking figures");

    let checker = Checker::new(app_config);
    let report = checker.check_paths(&files);
    ReportFormatter::new(args.verbose).write(&report, out)?;

    Ok(report)
}

/// Render a figure, save it as PNG next to the SVG, and print the model's
/// feedback to `out`.
///
/// The API key is read first; nothing is rendered or written without it.
///
/// # Errors
///
/// Returns `FiglintError` for:
/// - Configuration loading and file I/O errors
/// - Parsing and rendering errors
/// - API errors (missing key, network, authentication, quota)
pub fn run_feedback(args: &FeedbackArgs, out: &mut impl Write) -> Result<(), FiglintError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let settings = app_config.feedback().clone();
    let model = args.model.as_deref().unwrap_or(settings.model());
    let api_key = api_key_from_env(&settings)?;

    let svg_path = Path::new(&args.file);
    let source = fs::read_to_string(svg_path)?;
    let checker = Checker::new(app_config);
    let document = checker.load(&source)?;

    let image = Rasterizer::new(settings.scale()).render(&document)?;
    let png = encode_png(&image)?;

    if settings.save_png() {
        let png_path = svg_path.with_extension("png");
        fs::write(&png_path, &png)?;
        writeln!(out, "Created {}", figlint::display_name(&png_path))?;
    }

    let client = FeedbackClient::new(&settings, api_key)?;

    writeln!(out, "Analyzing {} with {model}...", figlint::display_name(svg_path))?;
    let feedback = client.feedback(model, &png)?;
    writeln!(out)?;
    writeln!(out, "{feedback}")?;

    Ok(())
}

/// Initialize `env_logger` at the given level, falling back to `warn`.
pub fn init_logger(log_level: &str) {
    let level = LevelFilter::from_str(log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {log_level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
}

/// Render an error with miette, one report per diagnostic.
pub fn report_error(err: &FiglintError) {
    let reporter = miette::GraphicalReportHandler::new();

    for reportable in to_reportables(err) {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_err() {
            writer = reportable.to_string();
        }
        error!("{writer}");
    }
}
