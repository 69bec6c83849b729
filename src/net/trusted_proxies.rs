//! Trusted proxy list and client IP determination.
//!
//! # Responsibilities
//! - Parse `--proxy` entries (plain IPs or CIDR blocks)
//! - Derive the client address for access logs
//!
//! # Design Decisions
//! - Forwarding headers are only honored when the peer itself is trusted
//! - `X-Forwarded-For` is walked right to left; the first untrusted hop wins
//! - Unparseable header values are ignored, never an error

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use axum::http::HeaderMap;
use thiserror::Error;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid trusted proxy {entry:?}: {reason}")]
pub struct ProxyParseError {
    pub entry: String,
    pub reason: &'static str,
}

/// An address block: an IP plus prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IpBlock {
    network: IpAddr,
    prefix: u8,
}

impl IpBlock {
    pub fn contains(&self, ip: IpAddr) -> bool {
        match (self.network, normalize(ip)) {
            (IpAddr::V4(net), IpAddr::V4(ip)) => {
                let mask = prefix_mask_u32(self.prefix);
                u32::from(net) & mask == u32::from(ip) & mask
            }
            (IpAddr::V6(net), IpAddr::V6(ip)) => {
                let mask = prefix_mask_u128(self.prefix);
                u128::from(net) & mask == u128::from(ip) & mask
            }
            _ => false,
        }
    }
}

impl FromStr for IpBlock {
    type Err = ProxyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ProxyParseError {
            entry: s.to_string(),
            reason,
        };

        let (addr, prefix) = match s.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix)),
            None => (s, None),
        };

        let network = normalize(addr.parse::<IpAddr>().map_err(|_| invalid("not an IP address"))?);
        let max = if network.is_ipv4() { 32 } else { 128 };
        let prefix = match prefix {
            Some(p) => p.parse::<u8>().map_err(|_| invalid("bad prefix length"))?,
            None => max,
        };
        if prefix > max {
            return Err(invalid("prefix length out of range"));
        }

        Ok(Self { network, prefix })
    }
}

fn prefix_mask_u32(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    }
}

fn prefix_mask_u128(prefix: u8) -> u128 {
    if prefix == 0 {
        0
    } else {
        u128::MAX << (128 - u32::from(prefix))
    }
}

/// IPv4-mapped IPv6 peers compare as IPv4.
fn normalize(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
        v4 => v4,
    }
}

/// Set of proxies whose forwarding headers are believed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedProxies {
    blocks: Vec<IpBlock>,
}

impl TrustedProxies {
    /// Trust nobody; the peer address is always the client.
    pub fn none() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Parse entries, skipping blanks.
    pub fn parse<I, S>(entries: I) -> Result<Self, ProxyParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let blocks = entries
            .into_iter()
            .map(|entry| entry.as_ref().trim().to_string())
            .filter(|entry| !entry.is_empty())
            .map(|entry| entry.parse())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { blocks })
    }

    /// Parse a comma-separated list.
    pub fn parse_list(list: &str) -> Result<Self, ProxyParseError> {
        Self::parse(list.split(','))
    }

    pub fn is_trusted(&self, ip: IpAddr) -> bool {
        self.blocks.iter().any(|block| block.contains(ip))
    }

    /// Address of the client that originated the request.
    pub fn client_ip(&self, peer: SocketAddr, headers: &HeaderMap) -> IpAddr {
        let peer_ip = normalize(peer.ip());
        if !self.is_trusted(peer_ip) {
            return peer_ip;
        }

        if let Some(ip) = self.from_forwarded_for(headers) {
            return ip;
        }

        headers
            .get(X_REAL_IP)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<IpAddr>().ok())
            .map(normalize)
            .unwrap_or(peer_ip)
    }

    fn from_forwarded_for(&self, headers: &HeaderMap) -> Option<IpAddr> {
        let hops: Vec<IpAddr> = headers
            .get_all(X_FORWARDED_FOR)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .filter_map(|hop| hop.trim().parse::<IpAddr>().ok())
            .map(normalize)
            .collect();

        hops.iter()
            .rev()
            .find(|ip| !self.is_trusted(**ip))
            .or_else(|| hops.first())
            .copied()
    }
}

impl Default for TrustedProxies {
    fn default() -> Self {
        Self::parse_list("127.0.0.1").unwrap_or_else(|_| Self::none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer(ip: &str) -> SocketAddr {
        SocketAddr::new(ip.parse().unwrap(), 40000)
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_parse_entries() {
        let proxies = TrustedProxies::parse_list("127.0.0.1, 10.0.0.0/8,,::1").unwrap();
        assert!(proxies.is_trusted("127.0.0.1".parse().unwrap()));
        assert!(proxies.is_trusted("10.20.30.40".parse().unwrap()));
        assert!(proxies.is_trusted("::1".parse().unwrap()));
        assert!(!proxies.is_trusted("11.0.0.1".parse().unwrap()));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(TrustedProxies::parse_list("localhost").is_err());
        assert!(TrustedProxies::parse_list("10.0.0.0/33").is_err());
        assert!(TrustedProxies::parse_list("10.0.0.0/x").is_err());
    }

    #[test]
    fn test_default_trusts_loopback_v4() {
        let proxies = TrustedProxies::default();
        assert!(proxies.is_trusted("127.0.0.1".parse().unwrap()));
        assert!(proxies.is_trusted("::ffff:127.0.0.1".parse().unwrap()));
        assert!(!proxies.is_trusted("127.0.0.2".parse().unwrap()));
    }

    #[test]
    fn test_untrusted_peer_ignores_headers() {
        let proxies = TrustedProxies::default();
        let ip = proxies.client_ip(peer("203.0.113.9"), &headers(&[(X_FORWARDED_FOR, "1.2.3.4")]));
        assert_eq!(ip, "203.0.113.9".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_forwarded_for_walks_right_to_left() {
        let proxies = TrustedProxies::parse_list("127.0.0.1,10.0.0.0/8").unwrap();
        let map = headers(&[(X_FORWARDED_FOR, "198.51.100.1, 203.0.113.7, 10.1.1.1")]);
        let ip = proxies.client_ip(peer("127.0.0.1"), &map);
        assert_eq!(ip, "203.0.113.7".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_all_hops_trusted_uses_leftmost() {
        let proxies = TrustedProxies::parse_list("127.0.0.1,10.0.0.0/8").unwrap();
        let map = headers(&[(X_FORWARDED_FOR, "10.0.0.5, 10.0.0.6")]);
        let ip = proxies.client_ip(peer("127.0.0.1"), &map);
        assert_eq!(ip, "10.0.0.5".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_real_ip_fallback() {
        let proxies = TrustedProxies::default();
        let map = headers(&[(X_REAL_IP, "198.51.100.2")]);
        assert_eq!(
            proxies.client_ip(peer("127.0.0.1"), &map),
            "198.51.100.2".parse::<IpAddr>().unwrap()
        );
        assert_eq!(
            proxies.client_ip(peer("127.0.0.1"), &HeaderMap::new()),
            "127.0.0.1".parse::<IpAddr>().unwrap()
        );
    }
}
