//! Prompt templates for the filter, summary and comparison stages.
//!
//! Provider-agnostic: each builder returns a system/user pair.

use crate::paper::PaperRecord;

/// Rendered prompt ready for the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInstance {
    pub system: String,
    pub user: String,
}

// =============================================================================
// Filter
// =============================================================================

const FILTER_SYSTEM: &str = "You are a helpful research assistant.";

/// Numbered title list, one `"{index}. {title}"` per line.
pub fn numbered_titles(papers: &[PaperRecord]) -> String {
    papers
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{i}. {}", p.title))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn filter_prompt(topic: &str, papers: &[PaperRecord]) -> PromptInstance {
    let last = papers.len().saturating_sub(1);
    let user = format!(
        "You are a strict research filter.\n\
         Topic: {topic}\n\
         \n\
         Below is a list of papers. Return ONLY the indices (0-{last}) of the top 3-5 papers \
         that are strictly relevant to the topic.\n\
         Format: 0, 2, 5\n\
         \n\
         Papers:\n\
         {titles}",
        titles = numbered_titles(papers),
    );

    PromptInstance {
        system: FILTER_SYSTEM.to_string(),
        user,
    }
}

// =============================================================================
// Summary
// =============================================================================

const SUMMARY_SYSTEM: &str = "You are a scientific summarizer.";

pub fn summary_prompt(abstract_text: &str) -> PromptInstance {
    let user = format!(
        "Analyze this abstract:\n\
         {abstract_text}\n\
         \n\
         Extract 3 things strictly in this format:\n\
         1. Methodology: (1 sentence)\n\
         2. Key Result: (1 sentence)\n\
         3. Limitation: (1 sentence)"
    );

    PromptInstance {
        system: SUMMARY_SYSTEM.to_string(),
        user,
    }
}

// =============================================================================
// Comparison
// =============================================================================

const COMPARISON_SYSTEM: &str = "You are a Lead Researcher.";

/// `Paper:`/`Analysis:` blocks separated by blank lines, in input order.
pub fn comparison_context(papers: &[PaperRecord]) -> String {
    papers
        .iter()
        .map(|p| {
            format!(
                "Paper: {}\nAnalysis: {}",
                p.title,
                p.analysis.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn comparison_prompt(topic: &str, papers: &[PaperRecord]) -> PromptInstance {
    let user = format!(
        "Based on these paper summaries regarding '{topic}', write a brief 'State of the Art' \
         synthesis.\n\
         Compare the methodologies used (e.g., Paper A used X, while Paper B used Y).\n\
         \n\
         Summaries:\n\
         {context}",
        context = comparison_context(papers),
    );

    PromptInstance {
        system: COMPARISON_SYSTEM.to_string(),
        user,
    }
}
