use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use hickory_resolver::config::{
    LookupIpStrategy, NameServerConfigGroup, ResolverConfig, ResolverOpts,
};
use hickory_resolver::TokioAsyncResolver;
use reqwest::dns::{Addrs, Name, Resolve, Resolving};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// DNS failure carrying the hostname that did not resolve
#[derive(Debug, thiserror::Error)]
#[error("DNS lookup for {host} failed: {source}")]
pub struct DnsError {
    host: String,
    #[source]
    source: hickory_resolver::error::ResolveError,
}

impl DnsError {
    pub fn host(&self) -> &str {
        &self.host
    }
}

/// Resolver pinned to an explicit set of public DNS servers
///
/// A broken local resolver otherwise shows up as an opaque connection error
/// on every upstream call. Querying well-known public servers directly keeps
/// resolution independent of host configuration, and IPv4-only lookup avoids
/// dual-stack races against the upstream API.
#[derive(Clone)]
pub struct PinnedResolver {
    inner: Arc<TokioAsyncResolver>,
}

impl PinnedResolver {
    pub fn new(servers: &[IpAddr]) -> Self {
        let name_servers = NameServerConfigGroup::from_ips_clear(servers, 53, true);
        let config = ResolverConfig::from_parts(None, vec![], name_servers);

        let mut opts = ResolverOpts::default();
        opts.ip_strategy = LookupIpStrategy::Ipv4Only;

        Self {
            inner: Arc::new(TokioAsyncResolver::tokio(config, opts)),
        }
    }
}

impl Resolve for PinnedResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = self.inner.clone();
        Box::pin(async move {
            let host = name.as_str().to_string();
            let lookup = resolver
                .lookup_ip(host.as_str())
                .await
                .map_err(|source| -> BoxError { Box::new(DnsError { host, source }) })?;

            // Port 0 is a placeholder; reqwest substitutes the request's port.
            let addrs: Addrs = Box::new(lookup.into_iter().map(|ip| SocketAddr::new(ip, 0)));
            Ok(addrs)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::error::ResolveError;

    #[test]
    fn test_dns_error_display_names_the_host() {
        let err = DnsError {
            host: "api.themoviedb.org".to_string(),
            source: ResolveError::from("no records found"),
        };

        assert!(err.to_string().contains("api.themoviedb.org"));
        assert_eq!(err.host(), "api.themoviedb.org");
    }

    #[tokio::test]
    async fn test_resolver_builds_from_server_list() {
        // Construction only; no queries are issued.
        let servers = vec![IpAddr::from([8, 8, 8, 8]), IpAddr::from([1, 1, 1, 1])];
        let _resolver = PinnedResolver::new(&servers);
    }
}
