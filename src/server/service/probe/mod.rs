//! Status probes for the two server families.
//!
//! `StatusProbe` is the seam between the monitoring services and the network. The
//! production implementation, `MinecraftProbe`, speaks the Java Server List Ping protocol
//! over TCP and the Bedrock unconnected ping over UDP. Services wrap every call with
//! `probe_with_timeout` so a silent server cannot stall a cycle.

pub mod bedrock;
pub mod java;

use serenity::async_trait;
use std::time::Duration;

use crate::server::{
    error::probe::ProbeError,
    model::probe::{Edition, ProbeResult},
    util::parse::parse_address,
};

/// Queries the status of a single server.
#[async_trait]
pub trait StatusProbe: Send + Sync {
    /// Probes `address` (`host:port`) using the protocol of `edition`.
    async fn status(&self, address: &str, edition: Edition) -> ProbeResult;
}

/// Probe implementation talking to real servers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinecraftProbe;

#[async_trait]
impl StatusProbe for MinecraftProbe {
    async fn status(&self, address: &str, edition: Edition) -> ProbeResult {
        let (host, port) = parse_address(address)?;

        match edition {
            Edition::Java => java::query(&host, port).await,
            Edition::Bedrock => bedrock::query(&host, port).await,
        }
    }
}

/// Runs a probe bounded by `timeout`.
///
/// An elapsed timeout becomes `ProbeError::Timeout`; the probe future is dropped, which
/// closes its socket.
pub async fn probe_with_timeout(
    probe: &dyn StatusProbe,
    address: &str,
    edition: Edition,
    timeout: Duration,
) -> ProbeResult {
    match tokio::time::timeout(timeout, probe.status(address, edition)).await {
        Ok(result) => result,
        Err(_) => Err(ProbeError::Timeout),
    }
}
