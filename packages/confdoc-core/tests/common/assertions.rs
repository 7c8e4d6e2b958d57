//! Custom assertions for report verification

use confdoc_core::RunSummary;

/// Assert that no type or field was skipped
pub fn assert_clean(summary: &RunSummary) {
    assert!(
        summary.is_clean(),
        "Expected a clean run, got {} skipped types and {} skipped fields",
        summary.skipped_types,
        summary.skipped_fields
    );
}

/// Assert that `report` contains `line` as a whole line
pub fn assert_has_line(report: &str, line: &str) {
    assert!(
        report.lines().any(|l| l == line),
        "Expected line {line:?} in report:\n{report}"
    );
}

/// Assert that no line of `report` contains `needle`
pub fn assert_no_line_containing(report: &str, needle: &str) {
    assert!(
        !report.lines().any(|l| l.contains(needle)),
        "Unexpected {needle:?} in report:\n{report}"
    );
}

/// Number of lines of `report` equal to `line`
pub fn count_lines(report: &str, line: &str) -> usize {
    report.lines().filter(|l| *l == line).count()
}
