//! Terminal rendering of run results and the agent log panel.
//!
//! Everything here is a pure function of its input: rendering the same
//! [`RunResult`] twice yields the same text.

use std::fmt;

use crate::paper::RunResult;
use crate::run_log::LogEntry;

const SEPARATOR: &str =
    "================================================================================";

const TITLE_WIDTH: usize = 40;
const DATE_WIDTH: usize = 10;
const ANALYSIS_WIDTH: usize = 60;

// =============================================================================
// Report
// =============================================================================

/// Synthesis, then one card per paper, then the comparison table.
pub fn render_report(result: &RunResult) -> String {
    Report(result).to_string()
}

/// Display adapter behind [`render_report`].
pub struct Report<'a>(pub &'a RunResult);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;

        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, " Comparative Synthesis: {}", clean(&result.topic))?;
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "{}", clean(result.synthesis.trim()))?;
        writeln!(f)?;

        writeln!(f, "--- Top Selected Papers ({}) ---", result.data.len())?;
        if result.data.is_empty() {
            writeln!(f, "  No papers selected.")?;
        }
        for (idx, paper) in result.data.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, " [{}] {}", idx + 1, clean(&paper.title))?;
            writeln!(f, "     Published: {}", clean(&paper.published))?;
            writeln!(f, "     Authors:   {}", clean(&paper.authors))?;
            writeln!(f, "     Analysis:")?;
            let analysis = paper.analysis.as_deref().unwrap_or("(not analyzed)");
            for line in clean(analysis).lines().filter(|l| !l.trim().is_empty()) {
                writeln!(f, "       {}", line.trim())?;
            }
            writeln!(f, "     PDF:       {}", clean(&paper.url))?;
        }
        writeln!(f)?;

        writeln!(f, "--- Comparison Table ---")?;
        writeln!(
            f,
            " {:3} {:TITLE_WIDTH$} {:DATE_WIDTH$} {}",
            "#", "Title", "Published", "Analysis"
        )?;
        for (idx, paper) in result.data.iter().enumerate() {
            let analysis = paper.analysis.as_deref().unwrap_or_default();
            writeln!(
                f,
                " {:3} {:TITLE_WIDTH$} {:DATE_WIDTH$} {}",
                idx + 1,
                truncate_str(&paper.title, TITLE_WIDTH),
                truncate_str(&paper.published, DATE_WIDTH),
                truncate_str(&flatten(analysis), ANALYSIS_WIDTH),
            )?;
        }
        writeln!(f, "{SEPARATOR}")
    }
}

// =============================================================================
// Log panel
// =============================================================================

pub fn render_log_entry(entry: &LogEntry) -> String {
    clean(&entry.to_string())
}

/// All entries in insertion order, one per line.
pub fn render_log(entries: &[LogEntry]) -> String {
    let mut out = String::from("--- Agent Communication Logs ---\n");
    if entries.is_empty() {
        out.push_str("  (empty)\n");
    }
    for entry in entries {
        out.push_str(&render_log_entry(entry));
        out.push('\n');
    }
    out
}

/// Text progress bar, e.g. `[#####-----]  50%`.
pub fn render_progress(fraction: f32, width: usize) -> String {
    let fraction = fraction.clamp(0.0, 1.0);
    let filled = (fraction * width as f32).round() as usize;
    format!(
        "[{}{}] {:3.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        fraction * 100.0
    )
}

// =============================================================================
// Helpers
// =============================================================================

/// Drop control characters (ANSI escapes included) from model and index text.
fn clean(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

fn flatten(s: &str) -> String {
    clean(s).split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_str(s: &str, max: usize) -> String {
    let clean = flatten(s);
    if clean.chars().count() <= max {
        clean
    } else {
        let truncated: String = clean.chars().take(max.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::PaperRecord;

    fn result() -> RunResult {
        RunResult {
            topic: "Transformers vs LSTM for Time Series".into(),
            created_at: "2026-01-01T00:00:00+00:00".into(),
            synthesis: "Paper A used attention, while Paper B used recurrence.".into(),
            data: vec![
                PaperRecord {
                    title: "Informer: Beyond Efficient Transformer for Long Sequence Time-Series Forecasting".into(),
                    summary: "abstract".into(),
                    url: "http://arxiv.org/pdf/2012.07436v3".into(),
                    authors: "Haoyi Zhou, Shanghang Zhang".into(),
                    published: "2020-12-14".into(),
                    analysis: Some(
                        "1. Methodology: ProbSparse attention.\n2. Key Result: Faster.\n3. Limitation: Tuning."
                            .into(),
                    ),
                },
                PaperRecord {
                    title: "LSTM baselines \x1b[31mrevisited".into(),
                    summary: "abstract".into(),
                    url: "http://arxiv.org/pdf/1234.5678v1".into(),
                    authors: "A. Author".into(),
                    published: "2021-03-01".into(),
                    analysis: Some("1. Methodology: LSTM.".into()),
                },
            ],
        }
    }

    #[test]
    fn rendering_is_idempotent() {
        let r = result();
        assert_eq!(render_report(&r), render_report(&r));
    }

    #[test]
    fn report_sections_appear_in_order() {
        let text = render_report(&result());
        let synthesis = text.find("Paper A used attention").unwrap();
        let cards = text.find("--- Top Selected Papers (2) ---").unwrap();
        let first_card = text.find(" [1] Informer").unwrap();
        let second_card = text.find(" [2] LSTM baselines").unwrap();
        let table = text.find("--- Comparison Table ---").unwrap();
        assert!(synthesis < cards && cards < first_card);
        assert!(first_card < second_card && second_card < table);
        assert!(text.contains("PDF:       http://arxiv.org/pdf/2012.07436v3"));
        assert!(text.contains("       2. Key Result: Faster."));
    }

    #[test]
    fn display_adapter_matches_rendered_report() {
        let mut r = result();
        assert_eq!(format!("{}", Report(&r)), render_report(&r));

        r.data.clear();
        let text = render_report(&r);
        assert!(text.contains("--- Top Selected Papers (0) ---\n  No papers selected."));
        assert!(text.ends_with(&format!("{SEPARATOR}\n")));
    }

    #[test]
    fn control_sequences_are_stripped() {
        let text = render_report(&result());
        assert!(!text.contains('\x1b'));
        assert!(text.contains("LSTM baselines [31mrevisited"));
    }

    #[test]
    fn table_cells_are_truncated_to_width() {
        assert_eq!(truncate_str("short", 10), "short");
        let long = truncate_str(&"x".repeat(80), TITLE_WIDTH);
        assert_eq!(long.chars().count(), TITLE_WIDTH);
        assert!(long.ends_with("..."));
        assert_eq!(flatten("a\n  b\tc"), "a b c");
    }

    #[test]
    fn log_panel_keeps_insertion_order() {
        let entries = vec![
            LogEntry {
                timestamp: "10:00:00".into(),
                sender: "System".into(),
                receiver: "Search Agent".into(),
                message: "first".into(),
            },
            LogEntry {
                timestamp: "10:00:01".into(),
                sender: "Search Agent".into(),
                receiver: "Filter Agent".into(),
                message: "second".into(),
            },
        ];
        let text = render_log(&entries);
        assert!(text.find("first").unwrap() < text.find("second").unwrap());
        assert!(render_log(&[]).contains("(empty)"));
    }

    #[test]
    fn progress_bar_scales_with_fraction() {
        assert_eq!(render_progress(0.5, 10), "[#####-----]  50%");
        assert_eq!(render_progress(2.0, 4), "[####] 100%");
    }
}
