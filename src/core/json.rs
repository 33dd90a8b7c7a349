use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::borrow::Cow;

/*-------------------------------------------------------------------------------------------------
  Parse JSON
-------------------------------------------------------------------------------------------------*/

pub fn parse(json: &[u8]) -> serde_json::Result<JsonIpRanges<'_>> {
    serde_json::from_slice(json)
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  JSON IP Ranges
--------------------------------------------------------------------------------------*/

/// The parts of the provider document the classifier reads. Unknown fields (including
/// `ipv6_prefixes`) are ignored, and unreadable `syncToken`/`createDate` values are dropped.
#[derive(Debug, Deserialize, Eq, PartialEq)]
pub struct JsonIpRanges<'j> {
    #[serde(rename = "syncToken", default, deserialize_with = "deserialize_sync_token")]
    pub sync_token: Option<String>,

    #[serde(rename = "createDate", default, with = "crate::core::datetime")]
    pub create_date: Option<DateTime<Utc>>,

    #[serde(borrow)]
    pub prefixes: Vec<JsonIpPrefix<'j>>,
}

/*--------------------------------------------------------------------------------------
  JSON IP (IPv4) Prefix
--------------------------------------------------------------------------------------*/

/// `ip_prefix` is kept as a raw value so one malformed entry can be skipped without rejecting
/// the whole document.
#[derive(Debug, Deserialize, Eq, PartialEq)]
pub struct JsonIpPrefix<'j> {
    pub ip_prefix: Value,

    #[serde(borrow)]
    pub service: Cow<'j, str>,
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

fn deserialize_sync_token<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(sync_token)) => Some(sync_token),
        Some(other) => {
            warn!("Ignoring syncToken {other}: not a string");
            None
        }
    })
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
