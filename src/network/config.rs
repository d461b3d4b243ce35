use crate::constants::{DEFAULT_API_BASE_URL, GRAPHQL_PATH};

/// API route configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    /// Points at the local development backend.  Deployed builds set
    /// `API_BASE_URL` at compile time or pass a URL from JS.
    fn default() -> Self {
        Self::from_url(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    /// Create a new ApiConfig from the API_BASE_URL environment variable,
    /// falling back to the development host when it is unset.
    pub fn new() -> Self {
        option_env!("API_BASE_URL")
            .map(Self::from_url)
            .unwrap_or_default()
    }

    /// Create a new ApiConfig from a URL string
    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL for all API calls
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a full URL for a REST path such as `/participant/outbound`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Get the GET URL carrying a GraphQL query
    pub fn graphql_url(&self, query: &str) -> String {
        format!(
            "{}{}?query={}",
            self.base_url,
            GRAPHQL_PATH,
            urlencoding::encode(query)
        )
    }
}
