//! Check whether IPv4 addresses fall within the AWS CloudFront IP ranges.
//!
//! The crate retrieves the AWS IP ranges document, keeps the CIDR blocks published for one
//! service (`CLOUDFRONT` by default), and classifies candidate addresses against them.
//!
//! ```
//! use cfipcheck::{CidrSet, Classification, Pipeline};
//!
//! let document = br#"{"prefixes": [
//!     {"ip_prefix": "54.182.0.0/16", "service": "CLOUDFRONT"},
//!     {"ip_prefix": "3.5.140.0/22", "service": "AMAZON"}
//! ]}"#;
//! let cidr_set = CidrSet::from_json(document, "CLOUDFRONT")?;
//! let pipeline = Pipeline::new(&cidr_set);
//!
//! assert_eq!(pipeline.classify("54.182.204.72").classification, Classification::Matched);
//! assert_eq!(pipeline.classify("3.5.140.1").classification, Classification::Unmatched);
//! assert_eq!(pipeline.classify("999.1.1.1").classification, Classification::Invalid);
//! # Ok::<(), cfipcheck::Error>(())
//! ```

/*-------------------------------------------------------------------------------------------------
  Modules
-------------------------------------------------------------------------------------------------*/

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::address::{is_valid_ipv4, parse_ipv4};
pub use crate::core::cidr_block::CidrBlock;
pub use crate::core::cidr_set::CidrSet;
pub use crate::core::client::{get_cidr_set, Client};
pub use crate::core::config::{Config, ConfigBuilder, ProxyRule, DEFAULT_SERVICE, DEFAULT_URL};
pub use crate::core::errors::{Error, Result};
pub use crate::core::pipeline::{
    tokenize, Classification, ClassificationResult, InputSource, Pipeline, Summary,
};
