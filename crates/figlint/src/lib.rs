//! Figlint - layout checks for SVG figures.
//!
//! Parses figures, measures their text, and classifies every pair of shapes
//! with a fixed set of collision rules: overlapping text, lines through
//! text or boxes, text crossing box borders and partially overlapping boxes.
//! Results are collected into a plain-text report. A separate feedback path
//! renders a figure to PNG and asks a hosted model for comments.

pub mod config;
pub mod feedback;
pub mod finding;
pub mod render;
pub mod report;
pub mod rules;

mod error;

pub use figlint_core::{document, geometry, identifier, shape, text};

pub use error::FiglintError;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, trace};

use figlint_core::document::Document;

use config::AppConfig;
use report::{FileOutcome, FileReport, Report, ShapeCounts};
use rules::Evaluator;

/// Checks figures against the collision rules.
///
/// # Examples
///
/// ```
/// use figlint::{Checker, config::{AppConfig, CheckConfig, FeedbackConfig, RulesConfig}};
/// use figlint::text::MetricsBackend;
///
/// let config = AppConfig::new(
///     CheckConfig::default().with_metrics(MetricsBackend::Estimated),
///     RulesConfig::default(),
///     FeedbackConfig::default(),
/// );
/// let checker = Checker::new(config);
///
/// let source = r#"<svg xmlns="http://www.w3.org/2000/svg">
///     <text id="a" x="10" y="20">Label</text>
///     <text id="b" x="10" y="20">Label</text>
/// </svg>"#;
/// let report = checker.check_source("fig.svg", source).unwrap();
/// assert_eq!(report.issue_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Checker {
    config: AppConfig,
    evaluator: Evaluator,
}

impl Checker {
    /// Create a new checker with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        let evaluator = Evaluator::from_config(&config);
        Self { config, evaluator }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a figure and measure its text with the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `FiglintError::Parse` for malformed markup and
    /// `FiglintError::Metrics` when text cannot be measured.
    pub fn load(&self, source: &str) -> Result<Document, FiglintError> {
        let figure = figlint_parser::parse(source)
            .map_err(|err| FiglintError::new_parse_error(err, source))?;
        debug!(elements = figure.elements().len(); "Figure parsed successfully");

        let metrics = self.config.check().metrics();
        let document = figure.resolve(metrics.provider())?;
        trace!(document:?; "Resolved document");
        Ok(document)
    }

    /// Check figure source text and report under `name`.
    ///
    /// # Errors
    ///
    /// See [`Checker::load`].
    pub fn check_source(&self, name: &str, source: &str) -> Result<FileReport, FiglintError> {
        let document = self.load(source)?;
        let findings = self.evaluator.evaluate(&document);
        info!(name, findings = findings.len(); "Checked figure");

        Ok(FileReport::new(
            name,
            ShapeCounts::of(&document),
            findings,
            document.notices().to_vec(),
        ))
    }

    /// Check one file. Failures are captured in the outcome so that other
    /// files can still be checked.
    pub fn check_path(&self, path: &Path) -> FileOutcome {
        let name = display_name(path);
        info!(path:? = path; "Checking figure");

        let result = fs::read_to_string(path)
            .map_err(FiglintError::from)
            .and_then(|source| self.check_source(&name, &source));

        match result {
            Ok(report) => FileOutcome::Checked(report),
            Err(error) => {
                debug!(name, error:%; "Figure could not be checked");
                FileOutcome::Failed { name, error }
            }
        }
    }

    /// Check files in order, one after the other.
    pub fn check_paths(&self, paths: &[PathBuf]) -> Report {
        let mut report = Report::new();
        for path in paths {
            report.push(self.check_path(path));
        }
        report
    }
}

/// Lists the `*.svg` files directly inside `dir`, sorted by name.
///
/// A missing directory yields an empty list.
///
/// # Errors
///
/// Returns `FiglintError::Io` if the directory exists but cannot be read.
pub fn find_figures(dir: &Path) -> Result<Vec<PathBuf>, FiglintError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if is_svg && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Name used for a file in reports.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
