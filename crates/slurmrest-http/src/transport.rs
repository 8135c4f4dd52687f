//! [`Transport`] over reqwest.

use crate::metrics::TransportMetrics;
use async_trait::async_trait;
use reqwest::{Client, Url};
use slurmrest_core::{
    ApiRequest, ApiResponse, Authenticator, Method, NoAuth, RequestContext, Transport,
    TransportError,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("slurmrest/", env!("CARGO_PKG_VERSION"));

pub struct HttpTransportBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
    authenticator: Arc<dyn Authenticator>,
    metrics: Option<Arc<TransportMetrics>>,
}

impl HttpTransportBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    /// Share counters with another transport or a caller.
    pub fn metrics(mut self, metrics: Arc<TransportMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn build(self) -> Result<HttpTransport, TransportError> {
        let base_url = Url::parse(self.base_url.trim())
            .map_err(|e| TransportError::Request(format!("invalid base URL: {}", e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(TransportError::Request(format!(
                "base URL must be http or https, got {}",
                base_url.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .use_rustls_tls()
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(HttpTransport {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            authenticator: self.authenticator,
            metrics: self.metrics.unwrap_or_default(),
        })
    }
}

/// Sends [`ApiRequest`]s to one slurmrestd base URL.
pub struct HttpTransport {
    client: Client,
    base_url: String,
    authenticator: Arc<dyn Authenticator>,
    metrics: Arc<TransportMetrics>,
}

impl HttpTransport {
    pub fn builder(base_url: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            authenticator: Arc::new(NoAuth),
            metrics: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn metrics(&self) -> &TransportMetrics {
        &self.metrics
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        ctx: &RequestContext,
        mut request: ApiRequest,
    ) -> Result<ApiResponse, TransportError> {
        self.authenticator.authenticate(ctx, &mut request).await?;
        self.metrics.record_request();

        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        // A context deadline shorter than the client timeout wins.
        if let Some(remaining) = ctx.remaining() {
            builder = builder.timeout(remaining);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                self.metrics.record_failure();
                warn!("{} {} failed: {}", request.method, url, e);
                return Err(classify(e));
            }
        };

        let status = response.status().as_u16();
        self.metrics.record_status(status);
        debug!("{} {} -> {}", request.method, url, status);

        let body = response.bytes().await.map_err(|e| {
            self.metrics.record_failure();
            TransportError::Body(e.to_string())
        })?;
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}
