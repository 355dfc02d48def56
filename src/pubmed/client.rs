use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::pubmed::models::SearchResult;
use crate::pubmed::parser::PubMedXmlParser;
use crate::pubmed::query::SearchQuery;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

/// Client for the two-stage PubMed search pipeline
///
/// One search issues an ESearch request for the match count and identifier
/// list, then a batched EFetch request for those identifiers, and returns
/// the parsed result as a whole. Nothing is retained between searches.
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    base_url: String,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a new PubMed client with default configuration
    ///
    /// # Example
    ///
    /// ```
    /// use scholared::PubMedClient;
    ///
    /// let client = PubMedClient::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new())
    }

    /// Create a new PubMed client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use scholared::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_email("researcher@university.edu");
    /// let client = PubMedClient::with_config(config);
    /// ```
    pub fn with_config(config: ClientConfig) -> Self {
        let base_url = config.effective_base_url().to_string();

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.effective_user_agent())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            config,
        }
    }

    /// Create a new PubMed client with a custom HTTP client
    ///
    /// The injected client keeps its own timeout and connection settings;
    /// identification parameters still come from the default configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use scholared::PubMedClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = PubMedClient::with_client(http_client);
    /// ```
    pub fn with_client(client: Client) -> Self {
        let config = ClientConfig::new();
        let base_url = config.effective_base_url().to_string();

        Self {
            client,
            base_url,
            config,
        }
    }

    /// Search for articles with default paging (first 20 matches)
    ///
    /// Takes `&mut self`: at most one search per client instance may be in
    /// flight, and an overlapping call is rejected at compile time by the
    /// exclusive borrow rather than blocked or queued.
    ///
    /// # Errors
    ///
    /// * `PubMedError::RequestError` - if either HTTP request fails
    /// * `PubMedError::ApiError` - if either stage returns a non-success status
    /// * `PubMedError::XmlParseError` - if either response is not well-formed XML
    ///
    /// # Example
    ///
    /// ```no_run
    /// use scholared::PubMedClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let mut client = PubMedClient::new();
    ///     let result = client.search("circadian rhythm").await?;
    ///     println!("{} total matches", result.total_match_count);
    ///     for article in &result.articles {
    ///         println!("{} ({}): {}", article.author, article.year, article.title);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[instrument(skip(self), fields(term = %term))]
    pub async fn search(&mut self, term: &str) -> Result<SearchResult> {
        self.search_with_query(&SearchQuery::new(term)).await
    }

    /// Search for articles with explicit paging parameters
    #[instrument(
        skip(self, query),
        fields(term = %query.term(), retmax = query.page_size(), retstart = query.page_offset())
    )]
    pub async fn search_with_query(&mut self, query: &SearchQuery) -> Result<SearchResult> {
        if query.term().trim().is_empty() {
            debug!("Empty search term provided, returning empty result");
            return Ok(SearchResult::default());
        }

        let search_url = self.build_search_url(query);
        debug!("Making ESearch API request");
        let search_xml = self.get_text(&search_url).await?;
        let stage = PubMedXmlParser::parse_search_from_xml(&search_xml)?;

        let mut result = SearchResult {
            total_match_count: stage.count,
            identifiers: stage.ids,
            articles: Vec::new(),
        };

        if result.identifiers.is_empty() {
            info!("Search stage returned no identifiers, skipping fetch stage");
            return Ok(result);
        }

        let fetch_url = self.build_fetch_url(&result.identifiers);
        debug!("Making EFetch API request");
        let fetch_xml = self.get_text(&fetch_url).await?;
        result.articles = PubMedXmlParser::parse_articles_from_xml(&fetch_xml)?;

        info!(
            total = %result.total_match_count,
            identifiers = result.identifiers.len(),
            articles = result.articles.len(),
            "Search completed successfully"
        );

        Ok(result)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
            return Err(PubMedError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        Ok(response.text().await?)
    }

    fn build_search_url(&self, query: &SearchQuery) -> String {
        let mut url = format!(
            "{}/esearch.fcgi?db=pubmed&term={}&usehistory=y&retmax={}&retstart={}",
            self.base_url,
            urlencoding::encode(query.term()),
            query.page_size(),
            query.page_offset()
        );
        self.append_api_params(&mut url);
        url
    }

    fn build_fetch_url(&self, identifiers: &[String]) -> String {
        let mut url = format!(
            "{}/efetch.fcgi?db=pubmed&id={}&retmode=xml",
            self.base_url,
            urlencoding::encode(&identifiers.join(","))
        );
        self.append_api_params(&mut url);
        url
    }

    fn append_api_params(&self, url: &mut String) {
        for (key, value) in self.config.build_api_params() {
            url.push('&');
            url.push_str(&key);
            url.push('=');
            url.push_str(&urlencoding::encode(&value));
        }
    }
}

impl Default for PubMedClient {
    fn default() -> Self {
        Self::new()
    }
}
