//! Search → filter → summarize → compare, one stage at a time.
//!
//! Usage:
//! ```bash
//! paper-scout run --topic "Transformers vs LSTM for Time Series"
//! ```
//!
//! A [`Pipeline`] holds the two collaborators (paper index and model) and runs
//! the stages strictly in sequence. A [`Session`] is what an interactive
//! surface keeps between runs: the current topic, the last run's log and the
//! single most recent [`RunResult`].

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::Instrument;

use crate::llm::LanguageModel;
use crate::paper::RunResult;
use crate::run_log::{LogEntry, RunContext, RunObserver};
use crate::search::{PaperIndex, SearchError};
use crate::stages::{compare_papers, filter_papers, search_papers, summarize_papers};

pub const DEFAULT_TOPIC: &str = "Transformers vs LSTM for Time Series";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// =============================================================================
// Pipeline
// =============================================================================

#[derive(Clone)]
pub struct Pipeline {
    index: Arc<dyn PaperIndex>,
    llm: LanguageModel,
}

impl Pipeline {
    pub fn new(index: Arc<dyn PaperIndex>, llm: LanguageModel) -> Self {
        Self { index, llm }
    }

    pub fn model_id(&self) -> &str {
        self.llm.model_id()
    }

    /// Run all four stages for `topic`.
    ///
    /// Only a search failure aborts the run; model failures surface as text
    /// inside the result.
    pub async fn run(
        &self,
        topic: &str,
        ctx: &mut RunContext<'_>,
    ) -> Result<RunResult, PipelineError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(PipelineError::InvalidRequest(
                "topic must not be empty".into(),
            ));
        }

        let span = tracing::info_span!("run", run_id = %ctx.run_id(), model = self.model_id());
        async {
            tracing::info!(topic, "run started");

            let raw = search_papers(self.index.as_ref(), topic, ctx).await?;
            let relevant = filter_papers(&self.llm, raw, topic, ctx).await;
            let analyzed = summarize_papers(&self.llm, relevant, ctx).await;
            let (synthesis, data) = compare_papers(&self.llm, analyzed, topic, ctx).await;

            tracing::info!(papers = data.len(), "run finished");

            Ok::<_, PipelineError>(RunResult {
                topic: topic.to_string(),
                created_at: Utc::now().to_rfc3339(),
                synthesis,
                data,
            })
        }
        .instrument(span)
        .await
    }
}

// =============================================================================
// Session
// =============================================================================

/// State kept by an interactive surface across runs.
#[derive(Debug, Clone)]
pub struct Session {
    topic: String,
    logs: Vec<LogEntry>,
    last_result: Option<RunResult>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC)
    }
}

impl Session {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            logs: Vec::new(),
            last_result: None,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
    }

    pub fn last_result(&self) -> Option<&RunResult> {
        self.last_result.as_ref()
    }

    /// Start a run for the current topic.
    ///
    /// Logs and the previous result are cleared before the first stage, so a
    /// failed run leaves no stale result behind. The log of the failed run is
    /// kept.
    pub async fn start_run(
        &mut self,
        pipeline: &Pipeline,
        observer: &dyn RunObserver,
    ) -> Result<&RunResult, PipelineError> {
        self.logs.clear();
        self.last_result = None;

        let mut ctx = RunContext::new(observer);
        let outcome = pipeline.run(&self.topic, &mut ctx).await;
        self.logs = ctx.into_entries();

        let result = outcome?;
        Ok(self.last_result.insert(result))
    }
}
