//! Plain-text reports for checked figures.
//!
//! A [`Report`] collects one [`FileOutcome`] per input file. The
//! [`ReportFormatter`] writes it as a block per file followed by a one-line
//! summary:
//!
//! ```text
//! Checking 1 SVG file(s) for collisions
//!
//! ============================================================
//!
//! fig1.svg: ISSUES (1)
//!   Issues:
//!     - text overlap: subtitle / title
//!
//! ============================================================
//! Result: 1 issue(s)
//! ```

use std::io::{self, Write};

use figlint_core::document::{Document, Notice, NoticeKind};
use figlint_core::shape::ShapeKind;
use figlint_parser::error::Diagnostic;

use crate::{
    FiglintError,
    finding::{Finding, Severity},
};

const RULE_WIDTH: usize = 60;

/// Shape counts shown in verbose mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeCounts {
    pub text: usize,
    pub boxes: usize,
    pub lines: usize,
}

impl ShapeCounts {
    pub fn of(document: &Document) -> Self {
        Self {
            text: document.count(ShapeKind::Text),
            boxes: document.count(ShapeKind::Box),
            lines: document.count(ShapeKind::Line),
        }
    }
}

/// Result of checking one figure.
#[derive(Debug, Clone)]
pub struct FileReport {
    name: String,
    counts: ShapeCounts,
    findings: Vec<Finding>,
    notices: Vec<Notice>,
}

impl FileReport {
    pub fn new(name: impl Into<String>, counts: ShapeCounts, findings: Vec<Finding>, notices: Vec<Notice>) -> Self {
        Self {
            name: name.into(),
            counts,
            findings,
            notices,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn counts(&self) -> ShapeCounts {
        self.counts
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Returns the findings with the given severity, in report order.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(move |finding| finding.severity() == severity)
    }

    pub fn issue_count(&self) -> usize {
        self.with_severity(Severity::Issue).count()
    }

    pub fn warning_count(&self) -> usize {
        self.with_severity(Severity::Warning).count()
    }

    pub fn missing_id_count(&self) -> usize {
        self.notices
            .iter()
            .filter(|notice| matches!(notice.kind(), NoticeKind::MissingId))
            .count()
    }

    pub fn duplicate_id_count(&self) -> usize {
        self.notices.len() - self.missing_id_count()
    }

    fn status(&self) -> String {
        let mut status = match (self.issue_count(), self.warning_count()) {
            (0, 0) => "OK".to_string(),
            (0, warnings) => format!("WARNINGS ({warnings})"),
            (issues, _) => format!("ISSUES ({issues})"),
        };
        if self.missing_id_count() > 0 {
            status.push_str(&format!(" [MISSING IDs: {}]", self.missing_id_count()));
        }
        if self.duplicate_id_count() > 0 {
            status.push_str(&format!(" [DUPLICATE IDs: {}]", self.duplicate_id_count()));
        }
        status
    }
}

/// Outcome for a single input file.
#[derive(Debug)]
pub enum FileOutcome {
    Checked(FileReport),
    Failed { name: String, error: FiglintError },
}

impl FileOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Checked(report) => report.name(),
            Self::Failed { name, .. } => name,
        }
    }
}

/// Outcomes of a whole run, in input order.
#[derive(Debug, Default)]
pub struct Report {
    files: Vec<FileOutcome>,
}

/// Totals over every file of a [`Report`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub issues: usize,
    pub warnings: usize,
    pub missing_ids: usize,
    pub duplicate_ids: usize,
    pub failed: usize,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        self.files.push(outcome);
    }

    pub fn files(&self) -> &[FileOutcome] {
        &self.files
    }

    pub fn totals(&self) -> Totals {
        self.files
            .iter()
            .fold(Totals::default(), |mut totals, outcome| {
                match outcome {
                    FileOutcome::Checked(report) => {
                        totals.issues += report.issue_count();
                        totals.warnings += report.warning_count();
                        totals.missing_ids += report.missing_id_count();
                        totals.duplicate_ids += report.duplicate_id_count();
                    }
                    FileOutcome::Failed { .. } => totals.failed += 1,
                }
                totals
            })
    }

    /// Returns `true` when the run should exit with a failure status:
    /// any issue, or any file that could not be checked. Warnings and
    /// notices alone never fail a run.
    pub fn is_failure(&self) -> bool {
        let totals = self.totals();
        totals.issues > 0 || totals.failed > 0
    }
}

/// Writes a [`Report`] as plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFormatter {
    verbose: bool,
}

impl ReportFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Writes the full report.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `out`.
    pub fn write(&self, report: &Report, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "Checking {} SVG file(s) for collisions", report.files().len())?;
        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

        for outcome in report.files() {
            writeln!(out)?;
            match outcome {
                FileOutcome::Checked(file) => self.write_file(file, out)?,
                FileOutcome::Failed { name, error } => write_failure(name, error, out)?,
            }
        }

        writeln!(out)?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "{}", summary(&report.totals()))
    }

    fn write_file(&self, file: &FileReport, out: &mut impl Write) -> io::Result<()> {
        let counts = if self.verbose {
            let c = file.counts();
            format!(" [{} text / {} box / {} line]", c.text, c.boxes, c.lines)
        } else {
            String::new()
        };
        writeln!(out, "{}{}: {}", file.name(), counts, file.status())?;

        for (severity, heading) in [(Severity::Issue, "Issues"), (Severity::Warning, "Warnings")] {
            let mut findings = file.with_severity(severity).peekable();
            if findings.peek().is_some() {
                writeln!(out, "  {heading}:")?;
                for finding in findings {
                    writeln!(out, "    - {finding}")?;
                }
            }
        }

        if !file.notices().is_empty() {
            writeln!(out, "  Identifier notices:")?;
            for notice in file.notices() {
                writeln!(out, "    - {notice}")?;
            }
        }
        Ok(())
    }
}

fn write_failure(name: &str, error: &FiglintError, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{name}: ERROR")?;
    match error {
        FiglintError::Parse { err, src } => {
            for diagnostic in err.diagnostics() {
                match location(diagnostic, src) {
                    Some((line, column)) => writeln!(out, "  line {line}:{column}: {diagnostic}")?,
                    None => writeln!(out, "  {diagnostic}")?,
                }
            }
            Ok(())
        }
        other => writeln!(out, "  error: {other}"),
    }
}

/// 1-based line and column of the diagnostic's primary label.
fn location(diagnostic: &Diagnostic, src: &str) -> Option<(usize, usize)> {
    let label = diagnostic.labels().iter().find(|label| label.is_primary())?;
    let before = src.get(..label.span().start())?;
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |tail| tail.chars().count()) + 1;
    Some((line, column))
}

fn summary(totals: &Totals) -> String {
    let parts: Vec<String> = [
        (totals.issues, "issue(s)"),
        (totals.warnings, "warning(s)"),
        (totals.missing_ids, "missing ID(s)"),
        (totals.duplicate_ids, "duplicate ID(s)"),
        (totals.failed, "failed file(s)"),
    ]
    .into_iter()
    .filter(|(count, _)| *count > 0)
    .map(|(count, label)| format!("{count} {label}"))
    .collect();

    if parts.is_empty() {
        "Result: No issues detected".to_string()
    } else {
        format!("Result: {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use figlint_core::identifier::Id;
    use figlint_core::shape::ShapeKind;
    use figlint_parser::error::{Diagnostic, ErrorCode, ParseError};

    use super::*;
    use crate::finding::{PairKey, Rule};

    fn render(report: &Report, verbose: bool) -> String {
        let mut out = Vec::new();
        ReportFormatter::new(verbose).write(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample_file() -> FileReport {
        let texts = PairKey::new(
            (ShapeKind::Text, Id::new("title")),
            (ShapeKind::Text, Id::new("subtitle")),
        );
        let corner = PairKey::new(
            (ShapeKind::Box, Id::new("box1")),
            (ShapeKind::Line, Id::new("arrow")),
        );
        FileReport::new(
            "fig1.svg",
            ShapeCounts {
                text: 3,
                boxes: 2,
                lines: 4,
            },
            vec![
                Finding::pair(Rule::TextOverlap, texts),
                Finding::pair(Rule::LineTouchesCorner, corner),
            ],
            vec![Notice::new(NoticeKind::MissingId, "rect", 42, Id::synthesized(7))],
        )
    }

    #[test]
    fn test_clean_report() {
        let mut report = Report::new();
        report.push(FileOutcome::Checked(FileReport::new(
            "clean.svg",
            ShapeCounts::default(),
            Vec::new(),
            Vec::new(),
        )));

        let text = render(&report, false);
        assert!(text.starts_with("Checking 1 SVG file(s) for collisions\n\n====="));
        assert!(text.contains("\nclean.svg: OK\n"));
        assert!(text.ends_with("Result: No issues detected\n"));
        assert!(!report.is_failure());
    }

    #[test]
    fn test_full_report() {
        let mut report = Report::new();
        report.push(FileOutcome::Checked(sample_file()));
        report.push(FileOutcome::Failed {
            name: "broken.svg".to_string(),
            error: FiglintError::new_parse_error(
                ParseError::from(
                    Diagnostic::error("malformed SVG markup: unexpected end of stream")
                        .with_code(ErrorCode::E001),
                ),
                "<svg",
            ),
        });

        let text = render(&report, true);
        let expected_file = "\
fig1.svg [3 text / 2 box / 4 line]: ISSUES (1) [MISSING IDs: 1]
  Issues:
    - text overlap: subtitle / title
  Warnings:
    - line touches corner: box1 / arrow
  Identifier notices:
    - line 42: <rect> has no id, temporarily named 'elem_7'
";
        assert!(text.contains(expected_file), "{text}");
        assert!(text.contains(
            "broken.svg: ERROR\n  error[E001]: malformed SVG markup: unexpected end of stream\n"
        ));
        assert!(text.ends_with(
            "Result: 1 issue(s), 1 warning(s), 1 missing ID(s), 1 failed file(s)\n"
        ));
        assert!(report.is_failure());
    }

    #[test]
    fn test_counts_hidden_without_verbose() {
        let mut report = Report::new();
        report.push(FileOutcome::Checked(sample_file()));
        let text = render(&report, false);
        assert!(text.contains("\nfig1.svg: ISSUES (1) [MISSING IDs: 1]\n"));
    }

    #[test]
    fn test_warnings_alone_do_not_fail() {
        let pair = PairKey::new(
            (ShapeKind::Box, Id::new("report_box")),
            (ShapeKind::Line, Id::new("report_line")),
        );
        let mut report = Report::new();
        report.push(FileOutcome::Checked(FileReport::new(
            "warn.svg",
            ShapeCounts::default(),
            vec![Finding::pair(Rule::LineTouchesCorner, pair)],
            Vec::new(),
        )));

        assert!(!report.is_failure());
        assert!(render(&report, false).contains("warn.svg: WARNINGS (1)"));
    }

    #[test]
    fn test_parse_failures_show_location() {
        let source = "<svg xmlns=\"http://www.w3.org/2000/svg\">\n\n\n\
                      <rect id=\"r\" width=\"wide\" height=\"5\"/>\n</svg>";
        let err = figlint_parser::parse(source).unwrap_err();

        let mut report = Report::new();
        report.push(FileOutcome::Failed {
            name: "bad.svg".to_string(),
            error: FiglintError::new_parse_error(err, source),
        });

        let text = render(&report, false);
        assert!(
            text.contains("bad.svg: ERROR\n  line 4:21: error[E002]: invalid numeric attribute `width`\n"),
            "{text}"
        );
    }

    #[test]
    fn test_other_errors_are_reported_inline() {
        let mut report = Report::new();
        report.push(FileOutcome::Failed {
            name: "missing.svg".to_string(),
            error: FiglintError::Io(io::Error::new(io::ErrorKind::NotFound, "no such file")),
        });
        let text = render(&report, false);
        assert!(text.contains("missing.svg: ERROR\n  error: I/O error: no such file\n"));
    }
}
