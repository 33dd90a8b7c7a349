use crate::core::errors::Error;
use ipnetwork::Ipv4Network;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  CIDR Block
-------------------------------------------------------------------------------------------------*/

/// An IPv4 network address and prefix length (`a.b.c.d/n`).
///
/// The network address is kept exactly as published; host bits beyond the prefix are ignored
/// when testing membership, never cleared.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CidrBlock {
    network: Ipv4Network,
}

impl CidrBlock {
    /// Build a block from a network address and a prefix length in `0..=32`.
    pub fn new(network: Ipv4Addr, prefix_len: u8) -> Result<Self, Error> {
        Ipv4Network::new(network, prefix_len)
            .map(|network| CidrBlock { network })
            .map_err(|error| Error::InvalidCidr {
                value: format!("{network}/{prefix_len}"),
                reason: error.to_string(),
            })
    }

    /// The network address as published.
    pub fn network(&self) -> Ipv4Addr {
        self.network.ip()
    }

    pub fn prefix_len(&self) -> u8 {
        self.network.prefix()
    }

    /// The netmask as a `u32` with the top `prefix_len` bits set.
    pub fn mask(&self) -> u32 {
        // `u32 << 32` overflows; a /0 block has an empty mask.
        u32::MAX
            .checked_shl(32 - u32::from(self.prefix_len()))
            .unwrap_or(0)
    }

    /// Returns `true` when the first `prefix_len` bits of `address` equal those of the network
    /// address.
    pub fn contains(&self, address: Ipv4Addr) -> bool {
        let mask = self.mask();
        u32::from(address) & mask == u32::from(self.network()) & mask
    }
}

impl FromStr for CidrBlock {
    type Err = Error;

    /// Parse `a.b.c.d/n`. Both the `/` and the prefix length are required.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| Error::InvalidCidr {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let (network, prefix_len) = value
            .split_once('/')
            .ok_or_else(|| invalid("missing `/` prefix length"))?;
        let network: Ipv4Addr = network
            .parse()
            .map_err(|_| invalid("network is not a valid IPv4 address"))?;
        let prefix_len: u8 = prefix_len
            .parse()
            .map_err(|_| invalid("prefix length is not an integer in 0..=32"))?;

        CidrBlock::new(network, prefix_len).map_err(|_| invalid("prefix length exceeds 32"))
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix_len())
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
