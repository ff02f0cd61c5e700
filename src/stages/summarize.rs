//! Summary stage: one model call per paper, strictly sequential.

use crate::gateway::Attribution;
use crate::llm::LanguageModel;
use crate::paper::PaperRecord;
use crate::prompts::summary_prompt;
use crate::run_log::{Agent, RunContext, Stage};

/// Fraction of work done after `done` of `total` items; an empty batch is complete.
pub fn progress_fraction(done: usize, total: usize) -> f32 {
    if total == 0 {
        return 1.0;
    }
    done as f32 / total as f32
}

/// Attach the model's raw reply to each record as `analysis`.
///
/// The reply is stored verbatim; the three labeled fields are not parsed.
pub async fn summarize_papers(
    llm: &LanguageModel,
    mut papers: Vec<PaperRecord>,
    ctx: &mut RunContext<'_>,
) -> Vec<PaperRecord> {
    ctx.log(
        Agent::Summary,
        Agent::Internal,
        "Reading abstracts and extracting key methodologies...",
    );

    let total = papers.len();
    for (idx, paper) in papers.iter_mut().enumerate() {
        let prompt = summary_prompt(&paper.summary);
        let analysis = llm
            .ask(
                &prompt.system,
                &prompt.user,
                Attribution::new("summary::extract").with_run(ctx.run_id()),
            )
            .await;
        paper.analysis = Some(analysis);
        ctx.progress(Stage::Summarize, Some(progress_fraction(idx + 1, total)));
    }
    ctx.progress(Stage::Summarize, None);

    tracing::info!(run_id = %ctx.run_id(), analyzed = total, "summaries complete");
    ctx.log(
        Agent::Summary,
        Agent::Comparison,
        "Analysis complete. Data ready for synthesis.",
    );
    papers
}
