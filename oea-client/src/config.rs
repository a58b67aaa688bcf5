//! Client configuration

/// Configuration for connecting to the hosted backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "https://project-ref.supabase.co")
    pub base_url: String,

    /// Project API key, sent with every request
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: 30,
        }
    }

    /// Read the configuration from `OEA_BACKEND_URL` / `OEA_BACKEND_KEY`
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("OEA_BACKEND_URL").ok()?;
        let api_key = std::env::var("OEA_BACKEND_KEY").ok()?;
        Some(Self::new(base_url, api_key))
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create a network client from this configuration
    pub fn build_client(&self) -> super::NetworkClient {
        super::NetworkClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:54321", "local-anon-key")
    }
}
