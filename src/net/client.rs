use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};
use crate::net::dns::{DnsError, PinnedResolver};

/// Keep idle upstream connections open between requests
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// HTTP client for upstream catalog calls
///
/// Built once at startup and shared; reqwest pools connections per host
/// underneath, so repeated calls to the same upstream reuse sockets. DNS goes
/// through the pinned public resolvers and every request carries a fixed
/// total timeout, so a stuck upstream fails deterministically instead of
/// hanging. This client never retries; retrying is caller policy.
#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(dns_servers: &[IpAddr], timeout: Duration) -> AppResult<Self> {
        let resolver = PinnedResolver::new(dns_servers);

        let inner = Client::builder()
            .dns_resolver(Arc::new(resolver))
            .timeout(timeout)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .build()?;

        Ok(Self { inner })
    }

    /// Issues a GET request and decodes the JSON body
    ///
    /// Failures come back classified: DNS (with the offending host attached),
    /// timeout, other transport errors, non-2xx statuses, and undecodable
    /// bodies.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self
            .inner
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(classify)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to decode API response: {}", e)))
    }
}

/// Classifies a transport-level reqwest failure
fn classify(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        return AppError::UpstreamTimeout;
    }
    if let Some(host) = dns_failure_host(&err) {
        return AppError::Dns { host };
    }
    AppError::HttpClient(err)
}

/// Walks the error source chain looking for the pinned resolver's DNS error
fn dns_failure_host(err: &reqwest::Error) -> Option<String> {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if let Some(dns) = inner.downcast_ref::<DnsError>() {
            return Some(dns.host().to_string());
        }
        source = inner.source();
    }
    None
}
