//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the seam between the sans-IO `NewsApi` and real I/O. It
//! returns whatever response arrived, any status included; deciding what a
//! status means is the parser's job. Only failures that prevent a response
//! from being read at all become errors here.

use std::future::Future;

use reqwest::Client;
use tracing::debug;

use crate::config::NetworkConfig;
use crate::error::NetworkError;
use crate::http::{HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, NetworkError>> + Send;
}

/// `Transport` backed by a pooled `reqwest::Client`.
///
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    log_traffic: bool,
}

impl ReqwestTransport {
    pub fn new(config: &NetworkConfig) -> Result<Self, NetworkError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self::with_client(client, config.log_traffic))
    }

    /// Wraps an existing client, e.g. one shared with other API consumers.
    pub fn with_client(client: Client, log_traffic: bool) -> Self {
        Self {
            client,
            log_traffic,
        }
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
        let url = request.url();
        if self.log_traffic {
            debug!(%url, "GET");
        }

        let mut builder = self.client.get(&url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                if self.log_traffic {
                    debug!(%url, error = %err, "request failed");
                }
                return Err(err.into());
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        // Bytes, not `text()`: invalid UTF-8 must fail rather than be replaced.
        let bytes = response.bytes().await?;
        let body = String::from_utf8(bytes.to_vec())
            .map_err(|err| NetworkError::Decode(format!("response body is not UTF-8: {err}")))?;

        if self.log_traffic {
            debug!(%url, status, bytes = body.len(), "response");
        }

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
