use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::sync::Arc;
use tracing::{debug, error};

use super::form::ContactForm;
use crate::config::Config;

/// Client for the third-party form relay.
#[derive(Clone)]
pub struct RelayClient {
    endpoint: Arc<String>,
    user_agent: Arc<String>,
    http: Arc<Client>,
}

impl RelayClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build relay HTTP client")?;
        Ok(Self {
            endpoint: Arc::new(config.relay_endpoint.clone()),
            user_agent: Arc::new(config.user_agent.clone()),
            http: Arc::new(http),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `form` as JSON. `true` only for a 2xx response; every failure
    /// (transport, non-2xx) is logged and reported as `false`.
    pub async fn send(&self, form: &ContactForm) -> bool {
        match self.post(form).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error sending message: {e:#}");
                false
            }
        }
    }

    async fn post(&self, form: &ContactForm) -> Result<()> {
        let resp = self
            .http
            .post(self.endpoint.as_str())
            .header(USER_AGENT, self.user_agent.as_str())
            .json(form)
            .send()
            .await
            .context("Network error posting to form relay")?;

        let status = resp.status();
        debug!(status = status.as_u16(), "form relay responded");
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Form relay returned HTTP {}",
                status.as_u16()
            ));
        }
        Ok(())
    }
}
