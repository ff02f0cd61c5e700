//! arXiv export API client (Atom feed).

use std::time::Duration;

use async_trait::async_trait;
use feed_rs::model::Entry;

use super::{PaperIndex, SearchError, SearchQuery};
use crate::paper::IndexEntry;

pub const DEFAULT_BASE_URL: &str = "http://export.arxiv.org/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ArxivClient {
    client: reqwest::Client,
    base_url: String,
}

impl ArxivClient {
    pub fn with_config(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("paper-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn query_url(&self) -> String {
        format!("{}/query", self.base_url)
    }
}

#[async_trait]
impl PaperIndex for ArxivClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<IndexEntry>, SearchError> {
        let params = [
            ("search_query", query.query.clone()),
            ("start", "0".to_string()),
            ("max_results", query.max_results.to_string()),
            ("sortBy", "relevance".to_string()),
            ("sortOrder", "descending".to_string()),
        ];

        let response = self
            .client
            .get(self.query_url())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let feed = feed_rs::parser::parse(&body[..])
            .map_err(|e| SearchError::Parse(format!("Failed to parse Atom feed: {e}")))?;

        if let Some(message) = feed.entries.iter().find_map(query_error) {
            return Err(SearchError::Query(message));
        }

        let entries = feed
            .entries
            .into_iter()
            .filter_map(entry_to_index_entry)
            .take(query.max_results)
            .collect();

        Ok(entries)
    }
}

/// arXiv reports a rejected query as a 200 feed with one entry titled
/// "Error" whose id points at `api/errors`; the summary carries the reason.
fn query_error(entry: &Entry) -> Option<String> {
    let is_error = entry.id.contains("api/errors")
        && entry.title.as_ref().map(|t| t.content.trim()) == Some("Error");
    if !is_error {
        return None;
    }

    let reason = entry
        .summary
        .as_ref()
        .map(|s| collapse_whitespace(&s.content))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| entry.id.clone());
    Some(reason)
}

fn entry_to_index_entry(entry: Entry) -> Option<IndexEntry> {
    let title = entry
        .title
        .as_ref()
        .map(|t| collapse_whitespace(&t.content))
        .unwrap_or_default();

    let Some(published) = entry.published.or(entry.updated) else {
        tracing::warn!(id = %entry.id, "skipping arXiv entry without a date");
        return None;
    };

    let pdf_url = entry
        .links
        .iter()
        .find(|l| {
            l.title.as_deref() == Some("pdf") || l.media_type.as_deref() == Some("application/pdf")
        })
        .map(|l| l.href.clone())
        .unwrap_or_else(|| entry.id.replacen("/abs/", "/pdf/", 1));

    let summary = entry
        .summary
        .as_ref()
        .map(|s| s.content.trim().to_string())
        .unwrap_or_default();

    let authors = entry
        .authors
        .iter()
        .map(|a| collapse_whitespace(&a.name))
        .collect();

    Some(IndexEntry {
        title,
        summary,
        pdf_url,
        authors,
        published,
    })
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_whitespace_joins_wrapped_titles() {
        assert_eq!(
            collapse_whitespace("  Long Short-Term\n  Memory   Networks "),
            "Long Short-Term Memory Networks"
        );
    }
}
