//! Search parameters for one query against the article database

use crate::error::Result;
use crate::pubmed::client::PubMedClient;
use crate::pubmed::models::SearchResult;

const DEFAULT_PAGE_SIZE: usize = 20;

/// Parameters for a single search invocation: the term plus its page window
///
/// Constructed per search and discarded once the result is produced.
///
/// # Example
///
/// ```no_run
/// use scholared::{PubMedClient, SearchQuery};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut client = PubMedClient::new();
///     let result = SearchQuery::new("sleep deprivation")
///         .with_page_size(10)
///         .with_page_offset(20)
///         .run(&mut client)
///         .await?;
///     println!("Found {} articles", result.articles.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    term: String,
    page_size: usize,
    page_offset: usize,
}

impl SearchQuery {
    /// Create a query for the given term with default paging
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            page_size: DEFAULT_PAGE_SIZE,
            page_offset: 0,
        }
    }

    /// Set how many matches the search stage may return
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the offset into the remote result set
    pub fn with_page_offset(mut self, page_offset: usize) -> Self {
        self.page_offset = page_offset;
        self
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_offset(&self) -> usize {
        self.page_offset
    }

    /// Run this query against a client
    pub async fn run(&self, client: &mut PubMedClient) -> Result<SearchResult> {
        client.search_with_query(self).await
    }
}
