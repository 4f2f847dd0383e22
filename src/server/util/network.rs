//! Checks on the connection hosts of registered servers.

use std::net::IpAddr;

use url::Host;

/// Returns whether `address` is a literal IPv4 or IPv6 address.
pub fn is_valid_ipaddress(address: &str) -> bool {
    address.parse::<IpAddr>().is_ok()
}

/// Returns whether `host` names something a client can connect to: an IP literal, a Unix
/// socket directory or a DNS name.
pub fn is_valid_host(host: &str) -> bool {
    let host = host.trim();
    if host.is_empty() {
        return false;
    }

    is_valid_ipaddress(host) || host.starts_with('/') || Host::parse(host).is_ok()
}
