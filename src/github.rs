use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use std::sync::Arc;

use crate::config::Config;

/// Counters read from the public profile endpoint. Any counter missing from
/// the body reads as zero.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub public_gists: u64,
}

#[derive(Clone)]
pub struct GithubClient {
    config: Arc<Config>,
    http: Arc<Client>,
}

impl GithubClient {
    /// Create a REST client for the profile endpoint described by `config`.
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build GitHub HTTP client")?;
        Ok(Self {
            config: Arc::new(config),
            http: Arc::new(http),
        })
    }

    /// Single GET of `/{username}`. No retry: a failed read is reported once.
    pub async fn fetch_profile(&self, username: &str) -> Result<ProfileResponse> {
        let url = self.config.profile_url(username);

        let mut req = self
            .http
            .get(&url)
            .header(USER_AGENT, &self.config.user_agent)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.config.access_token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .with_context(|| format!("Network error fetching profile {url}"))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "GitHub API returned HTTP {} for {username}",
                status.as_u16()
            ));
        }

        let profile: ProfileResponse = resp
            .json()
            .await
            .context("Failed to parse profile JSON from GitHub")?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_counters_default_to_zero() {
        let parsed: ProfileResponse =
            serde_json::from_str(r#"{"login":"octo","followers":9}"#).unwrap();
        assert_eq!(
            parsed,
            ProfileResponse {
                public_repos: 0,
                followers: 9,
                public_gists: 0
            }
        );
    }

    #[test]
    fn non_numeric_counter_is_a_decode_error() {
        let parsed = serde_json::from_str::<ProfileResponse>(r#"{"public_repos":"many"}"#);
        assert!(parsed.is_err());
    }
}
