/// Base URL of the profile-information endpoint. The username is appended as
/// the final path segment.
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com/users";

/// Form relay endpoint. Replace the form id with the one issued by the relay.
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://formspree.io/f/your-form-id";

/// Endpoints and credentials shared by the HTTP clients.
#[derive(Debug, Clone)]
pub struct Config {
    pub github_api: String,
    pub relay_endpoint: String,
    /// Optional GitHub token. Anonymous requests work but hit a lower rate limit.
    pub access_token: Option<String>,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_api: DEFAULT_GITHUB_API.to_string(),
            relay_endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            access_token: None,
            user_agent: format!("portfolio/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Points the GitHub client at another base URL (mock servers, enterprise hosts).
    pub fn with_github_api(mut self, base: impl Into<String>) -> Self {
        self.github_api = base.into();
        self
    }

    pub fn with_relay_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.relay_endpoint = endpoint.into();
        self
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        // Empty env vars show up as Some("") through clap.
        self.access_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    /// Full profile URL for `username`.
    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/{}", self.github_api.trim_end_matches('/'), username)
    }
}
