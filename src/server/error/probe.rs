use thiserror::Error;

/// Failure of a single status probe.
///
/// Probe failures are an expected part of monitoring: they are routed through the flap
/// debouncer and never surfaced as application errors.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The server did not answer within the probe timeout.
    #[error("timed out")]
    Timeout,

    /// The connection could not be established or broke mid-exchange.
    #[error("connection error: {0}")]
    Connection(#[from] std::io::Error),

    /// The server answered with something that is not a valid status response.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The address is not of the form `host:port`.
    #[error("invalid address '{0}'")]
    InvalidAddress(String),
}
