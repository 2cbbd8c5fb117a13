//! Network infrastructure — implements `DnsResolver` and `LocalAddresses`.

use std::collections::BTreeSet;
use std::net::{IpAddr, SocketAddrV4, SocketAddrV6};

use anyhow::{Context, Result};

use crate::application::ports::{DnsResolver, LocalAddresses};
use crate::domain::address::local_set;

/// Resolves through the system resolver (`getaddrinfo`) on a blocking thread.
pub struct SystemResolver;

impl DnsResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<Vec<IpAddr>> {
        let target = format!("{host}:80");
        let addrs = tokio::task::spawn_blocking(move || {
            use std::net::ToSocketAddrs;
            target
                .to_socket_addrs()
                .map(|it| it.map(|sa| sa.ip()).collect::<Vec<_>>())
        })
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
        .with_context(|| format!("resolving {host}"))?;
        Ok(addrs)
    }
}

/// Reads addresses of every interface via `getifaddrs(3)`.
pub struct InterfaceAddresses;

impl LocalAddresses for InterfaceAddresses {
    fn local_addresses(&self) -> Result<BTreeSet<IpAddr>> {
        let ifaddrs = nix::ifaddrs::getifaddrs().context("listing network interfaces")?;
        let addrs = ifaddrs.filter_map(|ifa| {
            let storage = ifa.address?;
            if let Some(sin) = storage.as_sockaddr_in() {
                Some(IpAddr::V4(*SocketAddrV4::from(*sin).ip()))
            } else {
                // The scope id lives on the socket address, not the IpAddr.
                storage
                    .as_sockaddr_in6()
                    .map(|sin6| IpAddr::V6(*SocketAddrV6::from(*sin6).ip()))
            }
        });
        Ok(local_set(addrs))
    }
}
