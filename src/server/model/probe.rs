//! Models describing the outcome of a status probe.

use serde::Serialize;

use crate::server::{
    error::probe::ProbeError,
    model::server_status::{Players, Version},
};

/// Wire protocol family spoken by a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Edition {
    /// TCP Server List Ping.
    Java,
    /// RakNet unconnected ping over UDP.
    Bedrock,
}

/// Message of the day in its three renderings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Motd {
    /// Text including `§` formatting codes.
    pub raw: String,
    /// Text with all formatting codes removed.
    pub clean: String,
    /// Formatting codes translated to HTML `<span>` elements.
    pub html: String,
}

/// Status reported by a reachable server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusPayload {
    pub version: Version,
    pub players: Players,
    pub motd: Motd,
    /// Base64 PNG data URI, Java servers only.
    pub favicon: Option<String>,
    /// Round trip of the ping exchange, when the server answered it.
    pub latency_ms: Option<u64>,
    /// Edition tag advertised by Bedrock servers (`MCPE` or `MCEE`).
    pub edition: Option<String>,
}

pub type ProbeResult = Result<StatusPayload, ProbeError>;
