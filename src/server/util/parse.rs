use crate::server::error::probe::ProbeError;

/// Splits a `host:port` address.
///
/// The port is taken after the last colon so bracketless IPv6 literals are rejected rather
/// than misread.
///
/// # Arguments
/// - `address` - The address to split
///
/// # Returns
/// - `Ok((host, port))` - Successfully split address
/// - `Err(ProbeError::InvalidAddress)` - Missing host, missing port or port out of range
pub fn parse_address(address: &str) -> Result<(String, u16), ProbeError> {
    let invalid = || ProbeError::InvalidAddress(address.to_string());

    let (host, port) = address.trim().rsplit_once(':').ok_or_else(invalid)?;
    if host.is_empty() || host.contains(':') {
        return Err(invalid());
    }
    let port = port.parse::<u16>().map_err(|_| invalid())?;

    Ok((host.to_string(), port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_host_and_port() {
        let (host, port) = parse_address("buildtheearth.net:25565").unwrap();
        assert_eq!(host, "buildtheearth.net");
        assert_eq!(port, 25565);
    }

    #[test]
    fn trims_whitespace() {
        let (host, port) = parse_address(" 10.0.0.2:25566 ").unwrap();
        assert_eq!(host, "10.0.0.2");
        assert_eq!(port, 25566);
    }

    #[test]
    fn rejects_missing_port() {
        assert!(matches!(
            parse_address("buildtheearth.net"),
            Err(ProbeError::InvalidAddress(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(parse_address("host:70000").is_err());
    }

    #[test]
    fn rejects_empty_host() {
        assert!(parse_address(":25565").is_err());
    }
}
