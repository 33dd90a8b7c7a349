use crate::core::errors::{Error, Result};
use std::net::Ipv4Addr;

/*-------------------------------------------------------------------------------------------------
  IPv4 Address Validation
-------------------------------------------------------------------------------------------------*/

/// Returns `true` when `token` is a dotted-quad IPv4 address (`a.b.c.d`, each component a
/// decimal number in `0..=255` without leading zeros) and nothing else.
///
/// ```
/// assert!(cfipcheck::is_valid_ipv4("54.182.204.72"));
/// assert!(!cfipcheck::is_valid_ipv4("256.1.1.1"));
/// assert!(!cfipcheck::is_valid_ipv4(" 1.2.3.4"));
/// ```
pub fn is_valid_ipv4(token: &str) -> bool {
    parse_ipv4(token).is_ok()
}

/// Parse a candidate token into an [Ipv4Addr]. Hostnames, IPv6 addresses, CIDR notation, and
/// surrounding whitespace are all rejected with [Error::InvalidAddress].
pub fn parse_ipv4(token: &str) -> Result<Ipv4Addr> {
    // The standard parser already rejects out-of-range octets, leading zeros, and wrong dot
    // counts.
    token
        .parse::<Ipv4Addr>()
        .map_err(|_| Error::InvalidAddress(token.to_string()))
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_addresses() {
        for token in [
            "0.0.0.0",
            "255.255.255.255",
            "54.182.204.72",
            "5.175.193.164",
            "10.0.0.1",
        ] {
            assert!(is_valid_ipv4(token), "{token:?} should be valid");
        }
    }

    #[test]
    fn test_rejects_invalid_addresses() {
        for token in [
            "",
            "256.1.1.1",
            "999.1.1.1",
            "1.2.3",
            "1.2.3.4.5",
            "abc.def.ghi.jkl",
            "1.2.3.-4",
            "1..2.3",
            "1.2.3.4 ",
            " 1.2.3.4",
            "1.2.3.4/32",
            "1.2.3.4:80",
            "01.2.3.4",
            "::1",
            "2001:db8::1",
            "example.com",
        ] {
            assert!(!is_valid_ipv4(token), "{token:?} should be invalid");
        }
    }

    #[test]
    fn test_parse_ipv4() {
        assert_eq!(
            parse_ipv4("54.182.204.72").unwrap(),
            Ipv4Addr::new(54, 182, 204, 72)
        );

        let error = parse_ipv4("1.2.3").unwrap_err();
        assert!(matches!(error, Error::InvalidAddress(token) if token == "1.2.3"));
    }
}
