//! Paper index collaborators.

pub mod arxiv;

use thiserror::Error;

use crate::paper::IndexEntry;

pub use arxiv::ArxivClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub max_results: usize,
}

impl SearchQuery {
    /// Relevance-sorted query, the only ordering the pipeline asks for.
    pub fn relevance(query: impl Into<String>, max_results: usize) -> Self {
        Self {
            query: query.into(),
            max_results,
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("index returned HTTP {status}")]
    Status { status: u16 },

    /// The index answered but rejected the query itself.
    #[error("index rejected query: {0}")]
    Query(String),

    #[error("could not parse index response: {0}")]
    Parse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// A searchable academic paper index.
#[async_trait::async_trait]
pub trait PaperIndex: Send + Sync {
    /// Entries in the index's own order, at most `query.max_results` of them.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<IndexEntry>, SearchError>;
}
