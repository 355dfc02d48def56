//! Client configuration for the NCBI E-utilities endpoints

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const DEFAULT_TOOL: &str = "scholared";
const DEFAULT_EMAIL: &str = "email@yourdomain.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for PubMed client behavior
///
/// NCBI asks every E-utilities consumer to identify itself with a `tool`
/// name and a contact `email`; both are appended to each request URL.
///
/// # Example
///
/// ```
/// use scholared::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_tool("scholared")
///     .with_email("researcher@university.edu");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Option<String>,
    tool: Option<String>,
    email: Option<String>,
    /// Request timeout, applied when the client builds its own HTTP client
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            tool: None,
            email: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the API base URL (used by tests to point at a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the tool name reported to NCBI
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = Some(tool.into());
        self
    }

    /// Set the contact email reported to NCBI
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL to use for API requests
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Tool name to report to NCBI
    pub fn effective_tool(&self) -> &str {
        self.tool.as_deref().unwrap_or(DEFAULT_TOOL)
    }

    /// Contact email to report to NCBI
    pub fn effective_email(&self) -> &str {
        self.email.as_deref().unwrap_or(DEFAULT_EMAIL)
    }

    /// User-Agent header for outbound requests
    pub fn effective_user_agent(&self) -> String {
        format!(
            "{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        )
    }

    /// Build the identification parameters appended to every request URL
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        vec![
            ("tool".to_string(), self.effective_tool().to_string()),
            ("email".to_string(), self.effective_email().to_string()),
        ]
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
