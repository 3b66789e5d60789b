//! Blocking REST calls through `reqwest`

use std::time::Duration;

use reqwest::blocking::Client;

use crate::core::models::{HttpOutcome, HttpRequest, Method};
use crate::core::ports::HttpGateway;
use crate::error::NetworkError;

/// [`HttpGateway`] over a blocking `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    client: Client,
}

impl ReqwestGateway {
    /// Gateway whose calls give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NetworkError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpGateway for ReqwestGateway {
    fn send(&self, request: &HttpRequest) -> Result<HttpOutcome, NetworkError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .map_err(|e| NetworkError::Transport(e.to_string()))?;
        let status = response.status();
        log::debug!("Response headers: {:?}", response.headers());
        let body = response
            .text()
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        Ok(HttpOutcome {
            status_code: status.as_u16(),
            body,
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }
}
