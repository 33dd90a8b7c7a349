use crate::core::cidr_block::CidrBlock;
use crate::core::errors::{Error, Result};
use crate::core::json;
use chrono::{DateTime, Utc};
use log::{info, warn};
use std::net::Ipv4Addr;

/*-------------------------------------------------------------------------------------------------
  CIDR Set
-------------------------------------------------------------------------------------------------*/

/// The CIDR blocks published for one service tag, in document order. Built once and read-only
/// afterwards.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CidrSet {
    pub(crate) blocks: Vec<CidrBlock>,
    pub(crate) sync_token: Option<String>,
    pub(crate) create_date: Option<DateTime<Utc>>,
}

impl CidrSet {
    /// Build a set directly from blocks; order is preserved.
    ///
    /// ```
    /// let blocks = ["54.182.0.0/16".parse().unwrap()];
    /// let cidr_set = cfipcheck::CidrSet::from_blocks(blocks);
    ///
    /// assert!(cidr_set.contains("54.182.204.72".parse().unwrap()));
    /// assert!(!cidr_set.contains("5.175.193.164".parse().unwrap()));
    /// ```
    pub fn from_blocks<I: IntoIterator<Item = CidrBlock>>(blocks: I) -> Self {
        CidrSet {
            blocks: blocks.into_iter().collect(),
            ..CidrSet::default()
        }
    }

    /// Parse a provider document (`{"prefixes": [{"ip_prefix": .., "service": ..}, ..]}`) and
    /// keep the blocks whose `service` is exactly `service`.
    ///
    /// An empty or malformed document is [Error::SourceUnavailable]. Entries with an unparsable
    /// `ip_prefix` are skipped with a warning, and an unreadable `syncToken` or `createDate` is
    /// dropped. No matching entries gives an empty set.
    pub fn from_json(document: &[u8], service: &str) -> Result<Self> {
        if document.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::source_unavailable("provider document", "empty document"));
        }

        let json_ip_ranges = json::parse(document)
            .map_err(|error| Error::source_unavailable("provider document", error))?;

        let mut skipped = 0usize;
        let blocks: Vec<CidrBlock> = json_ip_ranges
            .prefixes
            .iter()
            .filter(|json_ip_prefix| json_ip_prefix.service == service)
            .filter_map(|json_ip_prefix| {
                let parsed = match json_ip_prefix.ip_prefix.as_str() {
                    Some(ip_prefix) => ip_prefix.parse::<CidrBlock>(),
                    None => Err(Error::InvalidCidr {
                        value: json_ip_prefix.ip_prefix.to_string(),
                        reason: "not a string".to_string(),
                    }),
                };
                parsed
                    .inspect_err(|error| {
                        skipped += 1;
                        warn!("Skipping {service} prefix: {error}");
                    })
                    .ok()
            })
            .collect();

        if let Some(sync_token) = &json_ip_ranges.sync_token {
            info!("IP ranges sync token: {sync_token}");
        }
        if let Some(create_date) = &json_ip_ranges.create_date {
            info!("IP ranges create date: {create_date}");
        }
        info!(
            "Loaded {} {service} CIDR block(s) from {} prefix entries",
            blocks.len(),
            json_ip_ranges.prefixes.len()
        );
        if skipped > 0 {
            warn!("Skipped {skipped} malformed {service} prefix(es)");
        }
        if blocks.is_empty() {
            warn!("No CIDR blocks found for service {service:?}; every address will be reported unmatched");
        }

        Ok(CidrSet {
            blocks,
            sync_token: json_ip_ranges.sync_token,
            create_date: json_ip_ranges.create_date,
        })
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn blocks(&self) -> &[CidrBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Publication time of the document, in Unix epoch time format, when present.
    pub fn sync_token(&self) -> Option<&str> {
        self.sync_token.as_deref()
    }

    pub fn create_date(&self) -> Option<&DateTime<Utc>> {
        self.create_date.as_ref()
    }

    /*-------------------------------------------------------------------------
      Membership
    -------------------------------------------------------------------------*/

    /// The first block, in document order, that contains `address`.
    pub fn find(&self, address: Ipv4Addr) -> Option<&CidrBlock> {
        self.blocks.iter().find(|block| block.contains(address))
    }

    /// Returns `true` when any block contains `address`.
    pub fn contains(&self, address: Ipv4Addr) -> bool {
        self.find(address).is_some()
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
