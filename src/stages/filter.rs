//! Filter stage: let the model pick the relevant subset by index.
//!
//! The model is asked for a comma-separated index list. A reply that does not
//! parse as such is discarded as a whole and the first [`FALLBACK_COUNT`]
//! records are kept instead.

use std::num::ParseIntError;

use thiserror::Error;

use crate::gateway::Attribution;
use crate::llm::LanguageModel;
use crate::paper::PaperRecord;
use crate::prompts::filter_prompt;
use crate::run_log::{Agent, RunContext};

/// Records kept when the model's reply cannot be parsed.
pub const FALLBACK_COUNT: usize = 3;

/// Upper bound on records kept from a parsed reply.
pub const MAX_SELECTED: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionParseError {
    #[error("empty reply")]
    Empty,
    #[error("token {token:?} is not an index: {source}")]
    InvalidIndex {
        token: String,
        #[source]
        source: ParseIntError,
    },
}

/// Parse a reply like `"1, 3, 4"` into indices, in reply order.
///
/// Every comma-separated token must be a non-negative integer; one bad token
/// rejects the whole reply.
pub fn parse_selection(reply: &str) -> Result<Vec<usize>, SelectionParseError> {
    if reply.trim().is_empty() {
        return Err(SelectionParseError::Empty);
    }

    reply
        .split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<usize>()
                .map_err(|source| SelectionParseError::InvalidIndex {
                    token: token.to_string(),
                    source,
                })
        })
        .collect()
}

/// Pick records by index, in the given order.
///
/// Out-of-range and repeated indices are skipped; at most [`MAX_SELECTED`]
/// records are returned.
pub fn apply_selection(papers: &[PaperRecord], indices: &[usize]) -> Vec<PaperRecord> {
    let mut taken = vec![false; papers.len()];
    let mut selected = Vec::new();

    for &i in indices {
        if selected.len() == MAX_SELECTED {
            break;
        }
        if i >= papers.len() || taken[i] {
            continue;
        }
        taken[i] = true;
        selected.push(papers[i].clone());
    }

    selected
}

/// Select from a raw reply, falling back to the input prefix on parse failure.
pub fn select_from_reply(papers: &[PaperRecord], reply: &str) -> Vec<PaperRecord> {
    match parse_selection(reply) {
        Ok(indices) => apply_selection(papers, &indices),
        Err(err) => {
            tracing::debug!(%err, reply, "unparseable filter reply, keeping first records");
            papers.iter().take(FALLBACK_COUNT).cloned().collect()
        }
    }
}

pub async fn filter_papers(
    llm: &LanguageModel,
    papers: Vec<PaperRecord>,
    topic: &str,
    ctx: &mut RunContext<'_>,
) -> Vec<PaperRecord> {
    ctx.log(
        Agent::Filter,
        Agent::Internal,
        "Analyzing relevance of papers...",
    );

    let prompt = filter_prompt(topic, &papers);
    let reply = llm
        .ask(
            &prompt.system,
            &prompt.user,
            Attribution::new("filter::select").with_run(ctx.run_id()),
        )
        .await;

    let selected = select_from_reply(&papers, &reply);

    tracing::info!(
        run_id = %ctx.run_id(),
        candidates = papers.len(),
        selected = selected.len(),
        "filter complete"
    );
    ctx.log(
        Agent::Filter,
        Agent::Summary,
        format!(
            "Selected {} high-relevance papers. Proceed to reading.",
            selected.len()
        ),
    );
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn papers(n: usize) -> Vec<PaperRecord> {
        (0..n)
            .map(|i| PaperRecord {
                title: format!("Paper {i}"),
                summary: format!("Abstract {i}"),
                url: format!("http://arxiv.org/pdf/{i}"),
                authors: "A. Author".into(),
                published: "2024-01-01".into(),
                analysis: None,
            })
            .collect()
    }

    fn titles(records: &[PaperRecord]) -> Vec<&str> {
        records.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn parse_selection_trims_and_keeps_reply_order() {
        assert_eq!(parse_selection("4, 1 ,3").unwrap(), vec![4, 1, 3]);
        assert_eq!(parse_selection("2").unwrap(), vec![2]);
    }

    #[test]
    fn parse_selection_rejects_words_blanks_and_negatives() {
        assert!(matches!(
            parse_selection("two, three"),
            Err(SelectionParseError::InvalidIndex { .. })
        ));
        assert_eq!(parse_selection("  "), Err(SelectionParseError::Empty));
        assert!(parse_selection("1, , 2").is_err());
        assert!(parse_selection("-1").is_err());
        assert!(parse_selection("1, 3, 4.").is_err());
    }

    #[test]
    fn word_reply_falls_back_to_first_three_in_order() {
        let input = papers(10);
        let out = select_from_reply(&input, "two, three");
        assert_eq!(titles(&out), ["Paper 0", "Paper 1", "Paper 2"]);
    }

    #[test]
    fn fallback_on_short_input_keeps_everything() {
        let input = papers(2);
        let out = select_from_reply(&input, "Error connecting to LLM: timeout");
        assert_eq!(out, input);
    }

    #[test]
    fn out_of_range_indices_are_dropped_silently() {
        let input = papers(5);
        let out = select_from_reply(&input, "0, 99");
        assert_eq!(titles(&out), ["Paper 0"]);
    }

    #[test]
    fn selection_follows_model_order() {
        let input = papers(10);
        let out = select_from_reply(&input, "4, 1, 3");
        assert_eq!(titles(&out), ["Paper 4", "Paper 1", "Paper 3"]);
    }

    #[test]
    fn output_never_exceeds_input_or_cap() {
        let replies = [
            "0, 1, 2, 3, 4, 5, 6, 7, 8, 9",
            "1, 1, 1, 1",
            "0",
            "9, 8, 7",
            "nonsense",
            "",
        ];
        for n in [0, 1, 2, 4, 10] {
            let input = papers(n);
            for reply in replies {
                let out = select_from_reply(&input, reply);
                assert!(out.len() <= input.len(), "n={n} reply={reply:?}");
                assert!(out.len() <= MAX_SELECTED, "n={n} reply={reply:?}");
                assert!(out.iter().all(|p| input.contains(p)));
            }
        }
    }
}
