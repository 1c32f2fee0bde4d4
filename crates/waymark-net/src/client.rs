//! HTTP client
//!
//! Talks JSON to a remote alert service. Requests go through reqwest's
//! blocking client on smol's blocking thread pool, so callers never stall the
//! executor they run on.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use smol::Timer;
use url::Url;
use waymark_geo::{AlertRadius, Coordinate, Destination};

use crate::wire::{self, AlertReply, PositionPayload, RadiusPayload, StatusReply};
use crate::{AlertService, NetError, Response};

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root URL the endpoint paths are resolved against
    pub base_url: String,
    /// User agent string
    pub user_agent: String,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Whole-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Extra attempts after a retryable failure (0 = fail fast)
    pub max_retries: u32,
    /// Pause between attempts in milliseconds
    pub retry_backoff_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://locationtrackerapp.onrender.com/".into(),
            user_agent: format!("Waymark/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
            max_retries: 0,
            retry_backoff_ms: 500,
        }
    }
}

impl ClientConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

/// Builder for [`RemoteAlertClient`]
#[derive(Debug, Default)]
pub struct RemoteAlertClientBuilder {
    config: ClientConfig,
}

impl RemoteAlertClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.config.base_url = url.to_string();
        self
    }

    pub fn user_agent(mut self, ua: &str) -> Self {
        self.config.user_agent = ua.to_string();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.config.retry_backoff_ms = backoff.as_millis() as u64;
        self
    }

    pub fn build(self) -> Result<RemoteAlertClient, NetError> {
        RemoteAlertClient::with_config(self.config)
    }
}

/// Client for a remote alert service
#[derive(Debug, Clone)]
pub struct RemoteAlertClient {
    http: reqwest::blocking::Client,
    base: Url,
    config: ClientConfig,
}

impl RemoteAlertClient {
    /// Client with default settings against `base_url`
    pub fn new(base_url: &str) -> Result<Self, NetError> {
        Self::builder().base_url(base_url).build()
    }

    pub fn builder() -> RemoteAlertClientBuilder {
        RemoteAlertClientBuilder::new()
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, NetError> {
        let base = normalize_base(&config.base_url)?;

        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| NetError::Network(e.to_string()))?;

        Ok(Self { http, base, config })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve an endpoint path against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url, NetError> {
        self.base
            .join(path)
            .map_err(|e| NetError::InvalidUrl(format!("{path}: {e}")))
    }

    async fn post<T: Serialize>(&self, path: &str, payload: &T) -> Result<Response, NetError> {
        let body = serde_json::to_vec(payload).map_err(|e| NetError::Decode(e.to_string()))?;
        let url = self.endpoint(path)?;
        self.send(Method::POST, url, Some(body)).await
    }

    async fn get(&self, path: &str) -> Result<Response, NetError> {
        let url = self.endpoint(path)?;
        self.send(Method::GET, url, None).await
    }

    /// Send a request, retrying transport errors and 5xx replies
    async fn send(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<Response, NetError> {
        let mut attempt = 0;
        loop {
            let http = self.http.clone();
            let (m, u, b) = (method.clone(), url.clone(), body.clone());
            let result = smol::unblock(move || execute(&http, m, u, b))
                .await
                .and_then(|resp| {
                    if resp.is_success() {
                        Ok(resp)
                    } else {
                        Err(NetError::HttpError { status: resp.status })
                    }
                });

            match result {
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "{} {} failed: {}; retry {}/{}",
                        method, url, err, attempt, self.config.max_retries
                    );
                    Timer::after(self.config.retry_backoff()).await;
                }
                other => return other,
            }
        }
    }
}

/// Perform one blocking round trip
fn execute(
    http: &reqwest::blocking::Client,
    method: Method,
    url: Url,
    body: Option<Vec<u8>>,
) -> Result<Response, NetError> {
    tracing::debug!("HTTP {} {}", method, url);

    let mut req = http.request(method, url).header(ACCEPT, "application/json");
    if let Some(body) = body {
        req = req.header(CONTENT_TYPE, "application/json").body(body);
    }

    let resp = req.send().map_err(|e| NetError::Network(e.to_string()))?;
    let status = resp.status().as_u16();
    let body = resp
        .bytes()
        .map_err(|e| NetError::Network(e.to_string()))?
        .to_vec();

    Ok(Response { status, body })
}

/// Parse the base URL so relative endpoint paths append to it
fn normalize_base(raw: &str) -> Result<Url, NetError> {
    let mut url = Url::parse(raw).map_err(|e| NetError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(NetError::InvalidUrl(raw.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

impl AlertService for RemoteAlertClient {
    async fn submit_destination(&self, destination: Destination) -> Result<String, NetError> {
        let resp = self
            .post(wire::SET_DESTINATION, &PositionPayload::from(destination))
            .await?;
        Ok(resp.json::<StatusReply>()?.status)
    }

    async fn report_location(&self, position: Coordinate, radius: AlertRadius) -> Result<String, NetError> {
        let resp = self
            .post(wire::LOCATION, &PositionPayload::new(position, radius))
            .await?;
        Ok(resp.json::<AlertReply>()?.alert)
    }

    async fn update_radius(&self, radius: AlertRadius) -> Result<String, NetError> {
        let payload = RadiusPayload {
            alert_radius: radius.meters(),
        };
        let resp = self.post(wire::SET_ALERT_RADIUS, &payload).await?;
        Ok(resp.json::<StatusReply>()?.status)
    }

    async fn status(&self) -> Result<String, NetError> {
        let resp = self.get(wire::STATUS).await?;
        Ok(resp.json::<StatusReply>()?.status)
    }
}
