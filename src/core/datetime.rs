use chrono::{DateTime, NaiveDateTime, Utc};
use log::warn;
use serde::{self, Deserialize, Deserializer};
use serde_json::Value;

/*-------------------------------------------------------------------------------------------------
  DateTime Format
-------------------------------------------------------------------------------------------------*/

const IP_RANGES_DATETIME_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Deserialize an optional `createDate` value (`2024-01-01-00-00-00`).
///
/// The value is informational only; one that is not a string in the expected format is logged
/// and read as `None`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(create_date)) => {
            NaiveDateTime::parse_from_str(&create_date, IP_RANGES_DATETIME_FORMAT)
                .map(|naive_date_time| naive_date_time.and_utc())
                .inspect_err(|error| warn!("Ignoring createDate {create_date:?}: {error}"))
                .ok()
        }
        Some(other) => {
            warn!("Ignoring createDate {other}: not a string");
            None
        }
    })
}
