//! Search stage: topic in, unanalyzed records out.

use crate::paper::PaperRecord;
use crate::run_log::{Agent, RunContext};
use crate::search::{PaperIndex, SearchError, SearchQuery};

/// Result cap for the search stage.
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Query the index once, relevance-sorted. Index errors propagate unchanged.
pub async fn search_papers(
    index: &dyn PaperIndex,
    topic: &str,
    ctx: &mut RunContext<'_>,
) -> Result<Vec<PaperRecord>, SearchError> {
    ctx.log(
        Agent::System,
        Agent::Search,
        format!("Initiating search for: '{topic}'"),
    );

    let query = SearchQuery::relevance(topic, MAX_SEARCH_RESULTS);
    let papers: Vec<PaperRecord> = index
        .search(&query)
        .await?
        .into_iter()
        .take(MAX_SEARCH_RESULTS)
        .map(PaperRecord::from)
        .collect();

    tracing::info!(run_id = %ctx.run_id(), found = papers.len(), "search complete");
    ctx.log(
        Agent::Search,
        Agent::Filter,
        format!(
            "Found {} raw papers. Handing over for filtering.",
            papers.len()
        ),
    );
    Ok(papers)
}
