use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use client::Error;


/// Name resolution used when connecting
///
/// Implement this to plug in a custom resolver, `SystemResolver` is used
/// by default.
pub trait Resolve {
    /// Returns a single address of the host
    fn resolve(&self, host: &str) -> Result<IpAddr, Error>;
}

/// Resolves names with the resolver of the operating system
///
/// IPv4 addresses are preferred. Literal IP addresses (including bracketed
/// IPv6 ones) are returned without any lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl Resolve for SystemResolver {
    fn resolve(&self, host: &str) -> Result<IpAddr, Error> {
        let bare = host.trim_start_matches('[').trim_end_matches(']');
        if let Ok(ip) = bare.parse::<IpAddr>() {
            return Ok(ip);
        }
        let addrs: Vec<SocketAddr> = match (bare, 0).to_socket_addrs() {
            Ok(addrs) => addrs.collect(),
            Err(e) => {
                error!("can't resolve host {:?}: {}", host, e);
                return Err(Error::HostUnresolvable(host.to_string()));
            }
        };
        let ip = addrs.iter().find(|a| a.is_ipv4()).or(addrs.first())
            .map(|a| a.ip())
            .ok_or_else(|| Error::HostUnresolvable(host.to_string()))?;
        info!("host {} resolved to {}", host, ip);
        Ok(ip)
    }
}
