//! PubMed search pipeline: search stage, fetch stage, and XML parsing
//!
//! This module implements the two-stage lookup against the NCBI E-utilities
//! APIs: ESearch for the match count and identifier list, then a batched
//! EFetch for the article details.

pub mod client;
pub mod models;
pub mod parser;
pub mod query;
pub(crate) mod responses;

// Re-export public types
pub use client::PubMedClient;
pub use models::{ArticleSummary, SearchResult};
pub use parser::PubMedXmlParser;
pub use query::SearchQuery;
