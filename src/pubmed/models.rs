use serde::{Deserialize, Serialize};

/// One article row of a completed search
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ArticleSummary {
    /// Formatted as `"LastName, Initials"`; empty if no author was found
    pub author: String,
    /// Article title
    pub title: String,
    /// Publication year as reported; empty if absent
    pub year: String,
    /// Abstract text; empty if the record has no abstract section
    pub abstract_text: String,
}

/// Result of one two-stage search, rebuilt from scratch per invocation
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SearchResult {
    /// Total match count as reported by the service, kept as its literal text
    pub total_match_count: String,
    /// Record identifiers returned by the search stage, in document order
    pub identifiers: Vec<String>,
    /// Parsed article summaries, in fetch-stage document order
    pub articles: Vec<ArticleSummary>,
}

/// Format an author display name from the parts the fetch stage provides
pub(crate) fn format_author_name(last_name: &str, initials: &str) -> String {
    match (last_name.is_empty(), initials.is_empty()) {
        (true, _) => String::new(),
        (false, true) => last_name.to_string(),
        (false, false) => format!("{}, {}", last_name, initials),
    }
}
