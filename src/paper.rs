//! Records that flow through the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw record as returned by a paper index, before projection.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub title: String,
    pub summary: String,
    pub pdf_url: String,
    pub authors: Vec<String>,
    pub published: DateTime<Utc>,
}

/// One paper as seen by the stages.
///
/// Created by the search stage without `analysis`; the summary stage fills
/// it in. Records have no identity beyond their position in a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub title: String,
    pub summary: String,
    pub url: String,
    /// Author names joined with ", ".
    pub authors: String,
    /// Publication date as `YYYY-MM-DD`.
    pub published: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
}

impl PaperRecord {
    pub fn is_analyzed(&self) -> bool {
        self.analysis.is_some()
    }
}

impl From<IndexEntry> for PaperRecord {
    fn from(entry: IndexEntry) -> Self {
        Self {
            title: entry.title,
            summary: entry.summary,
            url: entry.pdf_url,
            authors: entry.authors.join(", "),
            published: entry.published.format("%Y-%m-%d").to_string(),
            analysis: None,
        }
    }
}

/// Outcome of one complete run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub topic: String,
    /// RFC 3339 creation time.
    pub created_at: String,
    pub synthesis: String,
    pub data: Vec<PaperRecord>,
}
