//! Comparison stage: one synthesis across all analyzed papers.

use crate::gateway::Attribution;
use crate::llm::LanguageModel;
use crate::paper::PaperRecord;
use crate::prompts::comparison_prompt;
use crate::run_log::{Agent, RunContext};

/// Returns the synthesis text and the records, unchanged.
pub async fn compare_papers(
    llm: &LanguageModel,
    papers: Vec<PaperRecord>,
    topic: &str,
    ctx: &mut RunContext<'_>,
) -> (String, Vec<PaperRecord>) {
    ctx.log(
        Agent::Comparison,
        Agent::Internal,
        "Synthesizing findings and looking for patterns...",
    );

    let prompt = comparison_prompt(topic, &papers);
    let synthesis = llm
        .ask(
            &prompt.system,
            &prompt.user,
            Attribution::new("comparison::synthesize").with_run(ctx.run_id()),
        )
        .await;

    tracing::info!(
        run_id = %ctx.run_id(),
        papers = papers.len(),
        chars = synthesis.len(),
        "synthesis complete"
    );
    ctx.log(
        Agent::Comparison,
        Agent::Presentation,
        "Synthesis complete. Generating final report.",
    );
    (synthesis, papers)
}
