//! # scholared
//!
//! Client library for the PubMed search pipeline behind the Scholared
//! desktop application. Given a free-text term it performs a two-stage
//! remote lookup against the NCBI E-utilities APIs — ESearch for the match
//! count and identifier list, then a batched EFetch for article details —
//! and returns an ordered list of article summaries (author, title, year,
//! abstract) for the shell to render.
//!
//! ## Quick Start
//!
//! ```no_run
//! use scholared::PubMedClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = PubMedClient::new();
//!
//!     let result = client.search("circadian rhythm").await?;
//!
//!     println!("{} total matches", result.total_match_count);
//!     for article in &result.articles {
//!         println!("{} ({}): {}", article.author, article.year, article.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Paging beyond the first 20 matches goes through [`SearchQuery`]:
//!
//! ```no_run
//! use scholared::{PubMedClient, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = PubMedClient::new();
//!     let result = SearchQuery::new("sleep deprivation")
//!         .with_page_size(10)
//!         .with_page_offset(20)
//!         .run(&mut client)
//!         .await?;
//!     println!("Found {} articles", result.articles.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod pubmed;

// Re-export main types for convenience
pub use config::ClientConfig;
pub use error::{PubMedError, Result};
pub use pubmed::{ArticleSummary, PubMedClient, SearchQuery, SearchResult};
