use std::fs;

use figlint::{
    Checker,
    config::{AppConfig, CheckConfig, FeedbackConfig, RulesConfig},
    finding::{Rule, Severity},
    report::{FileOutcome, FileReport},
    text::MetricsBackend,
};

const ARROWHEAD: &str = r##"<defs>
    <marker id="arrowhead" markerWidth="10" markerHeight="7" refX="9" refY="3.5" orient="auto">
        <polygon points="0 0, 10 3.5, 0 7" fill="#333"/>
    </marker>
</defs>"##;

#[derive(Debug, PartialEq, Eq)]
enum Expect {
    Issues,
    Warnings,
    Clean,
}

fn checker(rules: RulesConfig) -> Checker {
    Checker::new(AppConfig::new(
        CheckConfig::default().with_metrics(MetricsBackend::Estimated),
        rules,
        FeedbackConfig::default(),
    ))
}

fn figure(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="200" height="200" viewBox="0 0 200 200">
{body}
</svg>"#
    )
}

fn check_with(checker: &Checker, body: &str) -> FileReport {
    checker
        .check_source("test.svg", &figure(body))
        .expect("figure should be checked")
}

fn check(body: &str) -> FileReport {
    check_with(&checker(RulesConfig::default()), body)
}

fn outcome(report: &FileReport) -> Expect {
    match (report.issue_count(), report.warning_count()) {
        (0, 0) => Expect::Clean,
        (0, _) => Expect::Warnings,
        _ => Expect::Issues,
    }
}

fn rules(report: &FileReport) -> Vec<Rule> {
    report.findings().iter().map(|finding| finding.rule()).collect()
}

#[test]
fn test_text_text() {
    let overlapping = check(
        r#"<text id="hello" x="50" y="50" font-size="20">Hello</text>
           <text id="world" x="60" y="50" font-size="20">World</text>"#,
    );
    assert_eq!(rules(&overlapping), [Rule::TextOverlap]);

    let separate = check(
        r#"<text id="hello" x="10" y="50" font-size="12">Hello</text>
           <text id="world" x="100" y="50" font-size="12">World</text>"#,
    );
    assert_eq!(outcome(&separate), Expect::Clean);
}

#[test]
fn test_identical_text_is_one_issue() {
    let report = check(
        r#"<text id="title" x="40" y="40">Figure 1</text>
           <text id="subtitle" x="40" y="40">Figure 1</text>"#,
    );
    assert_eq!(report.findings().len(), 1);
    assert_eq!(report.findings()[0].to_string(), "text overlap: subtitle / title");
}

#[test]
fn test_text_line() {
    let through = check(
        r#"<text id="label" x="50" y="50" font-size="20">Hello</text>
           <line id="rule" x1="0" y1="50" x2="200" y2="50" stroke="black"/>"#,
    );
    assert_eq!(rules(&through), [Rule::LineThroughText]);
    assert_eq!(through.findings()[0].to_string(), "line through text: rule / label");

    let miss = check(
        r#"<text id="label" x="50" y="50" font-size="12">Hello</text>
           <line id="rule" x1="0" y1="100" x2="200" y2="100" stroke="black"/>"#,
    );
    assert_eq!(outcome(&miss), Expect::Clean);
}

#[test]
fn test_text_box() {
    let crossing = check(
        r#"<rect id="frame" x="50" y="30" width="50" height="50"/>
           <text id="label" x="40" y="50" font-size="20">Hello</text>"#,
    );
    assert_eq!(rules(&crossing), [Rule::TextCrossesBox]);

    let inside = check(
        r#"<rect id="frame" x="10" y="10" width="180" height="180"/>
           <text id="label" x="50" y="100" font-size="12">Hello</text>"#,
    );
    assert_eq!(outcome(&inside), Expect::Clean);

    let outside = check(
        r#"<rect id="frame" x="100" y="100" width="50" height="50"/>
           <text id="label" x="10" y="50" font-size="12">Hello</text>"#,
    );
    assert_eq!(outcome(&outside), Expect::Clean);
}

#[test]
fn test_text_enclosing_a_box_is_clean() {
    let report = check(
        r#"<rect id="dot" x="30" y="40" width="4" height="4"/>
           <text id="label" x="10" y="50" font-size="20">Wide label</text>"#,
    );
    assert!(report.findings().is_empty(), "{:?}", report.findings());
}

#[test]
fn test_box_box() {
    let overlapping = check(
        r#"<rect id="a" x="10" y="10" width="80" height="80"/>
           <rect id="b" x="50" y="50" width="80" height="80"/>"#,
    );
    assert_eq!(rules(&overlapping), [Rule::BoxOverlap]);

    let nested = check(
        r#"<rect id="outer" x="10" y="10" width="180" height="180"/>
           <rect id="inner" x="50" y="50" width="50" height="50"/>"#,
    );
    assert!(nested.findings().is_empty());

    let separate = check(
        r#"<rect id="a" x="10" y="10" width="40" height="40"/>
           <rect id="b" x="100" y="100" width="40" height="40"/>"#,
    );
    assert_eq!(outcome(&separate), Expect::Clean);
}

#[test]
fn test_polygons_are_boxes() {
    let report = check(
        r#"<rect id="a" x="10" y="10" width="80" height="80"/>
           <polygon id="b" points="50,50 130,50 130,130 50,130"/>"#,
    );
    assert_eq!(rules(&report), [Rule::BoxOverlap]);
}

#[test]
fn test_line_box() {
    let cases = [
        ("line passes through box", r#"<line id="l" x1="0" y1="75" x2="200" y2="75" stroke="black"/>"#, Expect::Issues),
        ("line misses box", r#"<line id="l" x1="0" y1="10" x2="200" y2="10" stroke="black"/>"#, Expect::Clean),
        ("line connects to box edge", r#"<line id="l" x1="0" y1="75" x2="50" y2="75" stroke="black"/>"#, Expect::Clean),
        ("line grazes box corner", r#"<line id="l" x1="0" y1="100" x2="100" y2="0" stroke="black"/>"#, Expect::Warnings),
        ("diagonal corner to corner", r#"<line id="l" x1="25" y1="25" x2="125" y2="125" stroke="black"/>"#, Expect::Issues),
        ("diagonal through interior", r#"<line id="l" x1="0" y1="60" x2="120" y2="90" stroke="black"/>"#, Expect::Issues),
        (
            "path crosses box via edge nodes",
            r#"<path id="l" d="M 25 75 L 50 75 L 100 75 L 125 75" stroke="black" fill="none"/>"#,
            Expect::Issues,
        ),
    ];

    for (name, line, expected) in cases {
        let body = format!(r#"<rect id="box" x="50" y="50" width="50" height="50"/>{line}"#);
        assert_eq!(outcome(&check(&body)), expected, "{name}");
    }
}

#[test]
fn test_line_inside_box_is_clean() {
    let report = check(
        r#"<rect id="legend" x="10" y="10" width="180" height="180"/>
           <line id="sample" x1="50" y1="100" x2="150" y2="100" stroke="black"/>"#,
    );
    assert_eq!(outcome(&report), Expect::Clean);
}

#[test]
fn test_diagonal_missing_box_with_overlapping_extent_is_clean() {
    let report = check_with(
        &checker(RulesConfig::default()),
        r#"<rect id="box" x="150" y="280" width="100" height="50"/>
           <line id="l" x1="160" y1="230" x2="110" y2="280" stroke="black"/>"#,
    );
    assert_eq!(outcome(&report), Expect::Clean);
}

#[test]
fn test_corner_warning_reads_line_first() {
    let report = check(
        r#"<rect id="box1" x="50" y="50" width="50" height="50"/>
           <line id="arrow" x1="0" y1="100" x2="100" y2="0" stroke="black"/>"#,
    );
    let warnings: Vec<_> = report.with_severity(Severity::Warning).collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].to_string(), "line touches corner: arrow / box1");
}

#[test]
fn test_defs_are_ignored() {
    let body = format!(
        r#"{ARROWHEAD}<line x1="0" y1="3" x2="100" y2="3" stroke="black"/>"#
    );
    let report = check(&body);
    assert_eq!(outcome(&report), Expect::Clean);
    // Only the unnamed line is reported, not the marker's polygon
    assert_eq!(report.missing_id_count(), 1);
}

#[test]
fn test_missing_id_does_not_fail() {
    let report = check(r#"<rect x="10" y="10" width="20" height="20"/>"#);
    assert_eq!(report.missing_id_count(), 1);
    assert_eq!(outcome(&report), Expect::Clean);
}

#[test]
fn test_short_marker_segment() {
    let short = check(&format!(
        r#"{ARROWHEAD}<line id="arrow1" x1="0" y1="50" x2="15" y2="50" stroke="black" marker-end="url(#arrowhead)"/>"#
    ));
    assert_eq!(rules(&short), [Rule::ShortMarkerSegment]);
    assert_eq!(
        short.findings()[0].to_string(),
        "short marker segment: arrow1 (15px < 20px)"
    );

    let adequate = check(&format!(
        r#"{ARROWHEAD}<line id="arrow1" x1="0" y1="50" x2="25" y2="50" stroke="black" marker-end="url(#arrowhead)"/>"#
    ));
    assert_eq!(outcome(&adequate), Expect::Clean);
}

#[test]
fn test_marker_collisions() {
    let through = check(&format!(
        r#"{ARROWHEAD}
           <line id="arrow1" x1="0" y1="50" x2="100" y2="50" stroke="black" marker-end="url(#arrowhead)"/>
           <line id="line2" x1="100" y1="0" x2="100" y2="100" stroke="black"/>"#
    ));
    assert_eq!(rules(&through), [Rule::LineThroughMarker]);
    assert_eq!(
        through.findings()[0].to_string(),
        "line through marker: line2 / arrow1:marker"
    );

    let miss = check(&format!(
        r#"{ARROWHEAD}
           <line id="arrow1" x1="0" y1="50" x2="100" y2="50" stroke="black" marker-end="url(#arrowhead)"/>
           <line id="line2" x1="50" y1="0" x2="50" y2="100" stroke="black"/>"#
    ));
    assert_eq!(outcome(&miss), Expect::Clean);
}

#[test]
fn test_arrow_into_box_is_clean() {
    let report = check(&format!(
        r#"{ARROWHEAD}
           <rect id="target-box" x="100" y="25" width="80" height="50"/>
           <line id="arrow1" x1="0" y1="50" x2="100" y2="50" stroke="black" marker-end="url(#arrowhead)"/>"#
    ));
    assert_eq!(outcome(&report), Expect::Clean);
}

#[test]
fn test_marker_rules_can_be_disabled() {
    let rules: RulesConfig = serde_json::from_str(
        r#"{"marker_segments": false, "marker_collisions": false}"#,
    )
    .unwrap();
    let report = check_with(
        &checker(rules),
        &format!(
            r#"{ARROWHEAD}<line id="arrow1" x1="0" y1="50" x2="15" y2="50" stroke="black" marker-end="url(#arrowhead)"/>"#
        ),
    );
    assert_eq!(outcome(&report), Expect::Clean);
}

#[test]
fn test_parallel_lines() {
    let checker = checker(RulesConfig::default().with_line_spacing(true));
    let cases = [
        ("too close", "10", "51", "100", "51", Expect::Issues),
        ("adequate distance", "10", "55", "100", "55", Expect::Clean),
        ("non-overlapping range", "60", "51", "100", "51", Expect::Clean),
        ("non-parallel", "10", "51", "100", "60", Expect::Clean),
    ];

    for (name, x1, y1, x2, y2, expected) in cases {
        let first_end = if name == "non-overlapping range" { "50" } else { "100" };
        let body = format!(
            r#"<line id="line1" x1="10" y1="50" x2="{first_end}" y2="50" stroke="black" stroke-width="1"/>
               <line id="line2" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="black" stroke-width="1"/>"#
        );
        assert_eq!(outcome(&check_with(&checker, &body)), expected, "{name}");
    }
}

#[test]
fn test_edge_clearance() {
    let checker = checker(RulesConfig::default().with_edge_clearance(true));
    let cases = [
        ("too close", "60", "49", "140", "49", Expect::Issues),
        ("adequate distance", "60", "45", "140", "45", Expect::Clean),
        ("diagonal", "60", "45", "140", "48", Expect::Clean),
        ("outside range", "10", "49", "40", "49", Expect::Clean),
    ];

    for (name, x1, y1, x2, y2, expected) in cases {
        let body = format!(
            r#"<rect id="box1" x="50" y="50" width="100" height="50"/>
               <line id="line1" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="black" stroke-width="1"/>"#
        );
        assert_eq!(outcome(&check_with(&checker, &body)), expected, "{name}");
    }
}

#[test]
fn test_findings_do_not_depend_on_document_order() {
    let shapes = [
        r#"<rect id="a" x="10" y="10" width="80" height="80"/>"#,
        r#"<rect id="b" x="50" y="50" width="80" height="80"/>"#,
        r#"<line id="c" x1="0" y1="30" x2="200" y2="30" stroke="black"/>"#,
        r#"<text id="d" x="20" y="35" font-size="12">Label</text>"#,
    ];
    let forward = check(&shapes.concat());
    let reversed: String = shapes.iter().rev().copied().collect();
    let backward = check(&reversed);

    assert!(!forward.findings().is_empty());
    assert_eq!(forward.findings(), backward.findings());
}

#[test]
fn test_check_path_captures_failures() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.svg");
    fs::write(&broken, "<svg><rect></svg>").unwrap();
    let missing = dir.path().join("missing.svg");

    let checker = checker(RulesConfig::default());
    let report = checker.check_paths(&[broken, missing]);

    assert_eq!(report.files().len(), 2);
    assert!(matches!(&report.files()[0], FileOutcome::Failed { name, .. } if name == "broken.svg"));
    assert!(matches!(&report.files()[1], FileOutcome::Failed { .. }));
    assert_eq!(report.totals().failed, 2);
    assert!(report.is_failure());
}

#[test]
fn test_find_figures_sorted() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b.svg", "a.svg", "notes.txt", "c.SVG"] {
        fs::write(dir.path().join(name), "<svg/>").unwrap();
    }

    let files = figlint::find_figures(dir.path()).unwrap();
    let names: Vec<_> = files.iter().map(|path| figlint::display_name(path)).collect();
    assert_eq!(names, ["a.svg", "b.svg", "c.SVG"]);

    assert!(figlint::find_figures(&dir.path().join("none")).unwrap().is_empty());
}
